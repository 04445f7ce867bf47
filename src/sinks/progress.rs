//! # Progress sink: the orchestrator's system of record.
//!
//! The engine reports each step of a mutating operation — and the initial
//! acknowledgment of a fresh operation — through [`ProgressSink::report`].
//! Reports for one operation are emitted in loop-iteration order; the
//! orchestrator treats the most recent one as authoritative.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{HandlerErrorCode, SinkError};
use crate::progress::{OperationStatus, ProgressEvent};

/// One progress report, as handed to the sink.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusReport {
    /// Correlation token of the operation.
    pub bearer_token: String,
    /// Status being reported.
    pub status: OperationStatus,
    /// Status the orchestrator currently holds, when transitioning.
    pub current_status: Option<OperationStatus>,
    /// Failure classification, when `status == Failed`.
    pub error_code: Option<HandlerErrorCode>,
    /// Resource state snapshot, if available.
    pub resource_model: Option<Value>,
    /// Human-readable status message.
    pub message: String,
}

impl StatusReport {
    /// Initial acknowledgment for a fresh operation: PENDING → IN_PROGRESS,
    /// no resource model.
    pub fn ack(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            status: OperationStatus::InProgress,
            current_status: Some(OperationStatus::Pending),
            error_code: None,
            resource_model: None,
            message: String::new(),
        }
    }

    /// Report for one loop iteration of a mutating action.
    pub fn of(bearer_token: impl Into<String>, event: &ProgressEvent) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            status: event.status,
            current_status: Some(OperationStatus::InProgress),
            error_code: event.error_code,
            resource_model: event.resource_model.clone(),
            message: event.message.clone(),
        }
    }
}

/// Reports operation status to the orchestrator.
#[async_trait]
pub trait ProgressSink: Send + Sync + 'static {
    /// Records one status transition.
    ///
    /// ### Errors
    /// Any failure must be returned, not swallowed; the engine terminates
    /// the loop and reports `InternalFailure`.
    async fn report(&self, report: StatusReport) -> Result<(), SinkError>;
}
