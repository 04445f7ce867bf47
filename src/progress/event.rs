//! # Progress events emitted by resource handlers.
//!
//! A [`ProgressEvent`] is the immutable outcome of one invocation step. A
//! chain of progress events across possibly many process invocations
//! (connected via the persisted callback context) forms one logical
//! operation.
//!
//! ## Invariants
//! - `error_code` is present **iff** `status == Failed`. The constructors
//!   enforce this structurally: only [`ProgressEvent::failed`] sets a code.
//! - `callback_context` is meaningful only when `status == InProgress`.
//! - `callback_delay_seconds` defaults to 0 ("reinvoke as soon as possible").
//!
//! ## Example
//! ```rust
//! use provisor::{OperationStatus, ProgressEvent};
//! use serde_json::json;
//!
//! let ev = ProgressEvent::in_progress()
//!     .with_resource_model(json!({"id": "res-1"}))
//!     .with_callback_delay(30);
//!
//! assert_eq!(ev.status, OperationStatus::InProgress);
//! assert_eq!(ev.callback_delay_seconds, 30);
//! assert!(ev.error_code.is_none());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HandlerErrorCode;

/// Operation state as tracked by the orchestrator.
///
/// `Pending` is used only for the orchestrator's initial acknowledgment;
/// `Success` and `Failed` are terminal; `InProgress` is non-terminal and
/// carries continuation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    /// Operation acknowledged but no step has run yet.
    Pending,
    /// Operation is running and may request continuation.
    InProgress,
    /// Operation finished successfully (terminal).
    Success,
    /// Operation finished with a classified error (terminal).
    Failed,
}

impl OperationStatus {
    /// Returns `true` for `Success` and `Failed`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationStatus::Success | OperationStatus::Failed)
    }
}

/// Immutable outcome of one invocation step.
///
/// Built via the status constructors ([`success`](ProgressEvent::success),
/// [`in_progress`](ProgressEvent::in_progress),
/// [`failed`](ProgressEvent::failed)) plus `with_*` builders for the
/// optional payload fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Outcome status of this step.
    pub status: OperationStatus,
    /// Failure classification; set iff `status == Failed`.
    pub error_code: Option<HandlerErrorCode>,
    /// Human-readable status message.
    pub message: String,
    /// Snapshot of the resource state, if the handler produced one.
    pub resource_model: Option<Value>,
    /// Opaque continuation state to hand back on the next invocation.
    /// Meaningful only when `status == InProgress`.
    pub callback_context: Option<Map<String, Value>>,
    /// Requested delay before the next invocation, in whole seconds.
    pub callback_delay_seconds: u64,
}

impl ProgressEvent {
    fn new(status: OperationStatus) -> Self {
        Self {
            status,
            error_code: None,
            message: String::new(),
            resource_model: None,
            callback_context: None,
            callback_delay_seconds: 0,
        }
    }

    /// Creates a terminal SUCCESS event.
    pub fn success() -> Self {
        Self::new(OperationStatus::Success)
    }

    /// Creates a non-terminal IN_PROGRESS event requesting continuation.
    pub fn in_progress() -> Self {
        Self::new(OperationStatus::InProgress)
    }

    /// Creates a terminal FAILED event carrying the given error code.
    ///
    /// This is the only constructor that sets `error_code`, which keeps the
    /// code-iff-failed invariant out of runtime checks.
    pub fn failed(code: HandlerErrorCode, message: impl Into<String>) -> Self {
        let mut ev = Self::new(OperationStatus::Failed);
        ev.error_code = Some(code);
        ev.message = message.into();
        ev
    }

    /// Attaches a status message.
    #[inline]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches a resource state snapshot.
    #[inline]
    pub fn with_resource_model(mut self, model: Value) -> Self {
        self.resource_model = Some(model);
        self
    }

    /// Attaches continuation state for the next invocation.
    #[inline]
    pub fn with_callback_context(mut self, ctx: Map<String, Value>) -> Self {
        self.callback_context = Some(ctx);
        self
    }

    /// Sets the requested delay before the next invocation (seconds).
    #[inline]
    pub fn with_callback_delay(mut self, seconds: u64) -> Self {
        self.callback_delay_seconds = seconds;
        self
    }

    /// Returns `true` if this event requests continuation.
    #[inline]
    pub fn is_in_progress(&self) -> bool {
        matches!(self.status, OperationStatus::InProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_code_only_on_failed() {
        assert!(ProgressEvent::success().error_code.is_none());
        assert!(ProgressEvent::in_progress().error_code.is_none());

        let failed = ProgressEvent::failed(HandlerErrorCode::NotFound, "gone");
        assert_eq!(failed.status, OperationStatus::Failed);
        assert_eq!(failed.error_code, Some(HandlerErrorCode::NotFound));
        assert_eq!(failed.message, "gone");
    }

    #[test]
    fn test_default_delay_is_zero() {
        assert_eq!(ProgressEvent::in_progress().callback_delay_seconds, 0);
    }

    #[test]
    fn test_builders_compose() {
        let mut ctx = Map::new();
        ctx.insert("step".into(), json!(2));

        let ev = ProgressEvent::in_progress()
            .with_message("stabilizing")
            .with_resource_model(json!({"id": "res-1"}))
            .with_callback_context(ctx.clone())
            .with_callback_delay(5);

        assert!(ev.is_in_progress());
        assert_eq!(ev.message, "stabilizing");
        assert_eq!(ev.resource_model, Some(json!({"id": "res-1"})));
        assert_eq!(ev.callback_context, Some(ctx));
        assert_eq!(ev.callback_delay_seconds, 5);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OperationStatus::Success.is_terminal());
        assert!(OperationStatus::Failed.is_terminal());
        assert!(!OperationStatus::InProgress.is_terminal());
        assert!(!OperationStatus::Pending.is_terminal());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&OperationStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::to_string(&OperationStatus::Failed).unwrap(),
            "\"FAILED\""
        );
    }
}
