//! # Outbound response with fail-closed serialization.
//!
//! [`Response`] is the only shape that leaves the engine. It is always
//! structurally valid: if serializing a normal result fails, the response is
//! replaced wholesale with a FAILED/InternalFailure payload so the
//! orchestrator always receives well-formed JSON.
//!
//! ## Rules
//! - `errorCode` is serialized **iff** the status is FAILED (guaranteed by
//!   [`ProgressEvent`] construction; optional fields are skipped when absent).
//! - The correlation token from the inbound request is always carried when
//!   known, even on parse failures.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::HandlerErrorCode;
use crate::progress::{OperationStatus, ProgressEvent};

/// Outbound payload returned to the orchestrator.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Final status of this invocation.
    pub status: OperationStatus,
    /// Failure classification; present iff `status == Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,
    /// Human-readable status message.
    pub message: String,
    /// Resource state snapshot, if produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<Value>,
    /// Continuation state for the next invocation, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<Map<String, Value>>,
    /// Requested delay before the next invocation, seconds.
    pub callback_delay_seconds: u64,
    /// Correlation token from the inbound request, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl Response {
    /// Builds the response from the final progress event of the invocation.
    pub fn from_event(event: ProgressEvent, bearer_token: Option<String>) -> Self {
        Self {
            status: event.status,
            error_code: event.error_code,
            message: event.message,
            resource_model: event.resource_model,
            callback_context: event.callback_context,
            callback_delay_seconds: event.callback_delay_seconds,
            bearer_token,
        }
    }

    /// Serializes the response, falling back to a FAILED/InternalFailure
    /// payload if serialization itself fails.
    pub fn into_value(self) -> Value {
        let bearer = self.bearer_token.clone();
        match serde_json::to_value(&self) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(error = %e, "response serialization failed; replacing wholesale");
                let mut fallback = json!({
                    "status": "FAILED",
                    "errorCode": "InternalFailure",
                    "message": format!("failed to serialize response: {e}"),
                    "callbackDelaySeconds": 0,
                });
                if let (Some(obj), Some(token)) = (fallback.as_object_mut(), bearer) {
                    obj.insert("bearerToken".into(), Value::String(token));
                }
                fallback
            }
        }
    }
}
