//! # Simplified payload for provider contract tests.
//!
//! [`TestEvent`] is the single-shot variant of the inbound payload used by
//! the contract-test entrypoint: one credential set, an already-modelled
//! request, and an optional callback context. No request context, no
//! platform credentials, no metrics.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HandlerError;
use crate::handlers::Action;
use crate::payload::{Credentials, ResourceRequest};

/// Modelled request portion of a [`TestEvent`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    /// Correlation token for downstream idempotency.
    #[serde(default)]
    pub client_request_token: Option<String>,
    /// Desired resource state.
    #[serde(default)]
    pub desired_resource_state: Option<Value>,
    /// Previous resource state.
    #[serde(default)]
    pub previous_resource_state: Option<Value>,
    /// Logical identifier of the resource.
    #[serde(default)]
    pub logical_resource_identifier: Option<String>,
}

impl From<TestRequest> for ResourceRequest {
    fn from(request: TestRequest) -> Self {
        ResourceRequest {
            client_request_token: request.client_request_token,
            desired_state: request.desired_resource_state,
            previous_state: request.previous_resource_state,
            logical_resource_id: request.logical_resource_identifier,
        }
    }
}

/// Inbound payload of the contract-test entrypoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestEvent {
    /// Credentials the handler acts with.
    pub credentials: Credentials,
    /// Requested lifecycle action.
    pub action: Action,
    /// Modelled request.
    pub request: TestRequest,
    /// Callback context to resume with, if any.
    #[serde(default)]
    pub callback_context: Option<Map<String, Value>>,
    /// Region the operation targets.
    #[serde(default)]
    pub region: Option<String>,
}

impl TestEvent {
    /// Parses and validates the raw contract-test payload.
    ///
    /// ### Errors
    /// [`HandlerError::InvalidRequest`] for malformed payloads.
    pub fn parse(payload: &Value) -> Result<Self, HandlerError> {
        serde_json::from_value(payload.clone())
            .map_err(|e| HandlerError::InvalidRequest(e.to_string()))
    }
}
