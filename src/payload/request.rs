//! # Inbound handler request.
//!
//! [`HandlerRequest`] mirrors the orchestrator's wire payload (camelCase
//! field names). Parsing failures of any kind are classified as
//! `InvalidRequest` *before* any handler is invoked.
//!
//! The request is also `Serialize`: when the engine delegates to the
//! reschedule service it re-serializes a snapshot of the request — with the
//! advanced [`Continuation`](crate::Continuation) embedded back into
//! `requestContext` — as the payload of the future trigger.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::HandlerError;
use crate::handlers::Action;
use crate::payload::Continuation;

/// Opaque credential triple carried in the inbound payload.
///
/// Treated as an immutable, read-only capability: constructed once per
/// invocation and passed down, never mutated. The `Debug` impl redacts the
/// secret components.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Access key identifier.
    pub access_key_id: String,
    /// Secret key.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    #[serde(default)]
    pub session_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .finish()
    }
}

/// Resource-state portion of the inbound payload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    /// Desired resource state.
    pub resource_properties: Value,
    /// Previous resource state (updates only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_resource_properties: Option<Value>,
    /// Logical identifier of the resource within the caller's template.
    pub logical_resource_id: String,
    /// Credentials the handler acts with.
    pub caller_credentials: Credentials,
    /// Optional provider-account credentials (second metrics publisher).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_credentials: Option<Credentials>,
    /// Credentials used to construct the platform collaborators.
    pub platform_credentials: Credentials,
}

/// Continuation substructure of the inbound payload.
///
/// Present only on resumed invocations (produced by an external reschedule).
/// The engine reads it once to seed a [`Continuation`] and to find the
/// trigger identifiers to clean up; it never mutates it in place.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Number of reinvocations (local or external) performed so far.
    #[serde(default)]
    pub invocation: u32,
    /// Callback context returned by the previous step, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<Map<String, Value>>,
    /// Name of the timer rule that triggered this invocation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_watch_events_rule_name: Option<String>,
    /// Target identifier of that rule, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_watch_events_target_id: Option<String>,
}

/// Full inbound payload for one process invocation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HandlerRequest {
    /// Requested lifecycle action.
    pub action: Action,
    /// Opaque token correlating all messages of this operation.
    pub bearer_token: String,
    /// Region the operation targets.
    pub region: String,
    /// Resource state and credentials.
    pub request_data: RequestData,
    /// Continuation substructure; absent on the first invocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_context: Option<RequestContext>,
    /// Resource type name (used for metric dimensions by collaborators).
    pub resource_type: String,
    /// Account the operation runs in.
    pub aws_account_id: String,
}

impl HandlerRequest {
    /// Parses and validates the raw inbound payload.
    ///
    /// ### Errors
    /// [`HandlerError::InvalidRequest`] for malformed or incomplete payloads
    /// (missing bearer token, missing credentials, unknown action, ...).
    pub fn parse(payload: &Value) -> Result<Self, HandlerError> {
        let request: HandlerRequest = serde_json::from_value(payload.clone())
            .map_err(|e| HandlerError::InvalidRequest(e.to_string()))?;
        if request.bearer_token.is_empty() {
            return Err(HandlerError::InvalidRequest(
                "bearerToken must not be empty".into(),
            ));
        }
        Ok(request)
    }

    /// Returns a snapshot of this request with `continuation` embedded into
    /// the request context, for handing to the reschedule service.
    ///
    /// Trigger identifiers are left unset; the reschedule implementation
    /// fills them in when it registers the timer.
    pub fn with_continuation(&self, continuation: &Continuation) -> Self {
        let mut snapshot = self.clone();
        snapshot.request_context = Some(RequestContext {
            invocation: continuation.invocation(),
            callback_context: if continuation.callback_context().is_empty() {
                None
            } else {
                Some(continuation.callback_context().clone())
            },
            cloud_watch_events_rule_name: None,
            cloud_watch_events_target_id: None,
        });
        snapshot
    }
}

/// Modelled view of the request handed to handlers.
///
/// Carries only what handler code needs; credentials travel separately as a
/// [`Session`](crate::Session).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceRequest {
    /// Correlation token for downstream idempotency (the bearer token on the
    /// main path).
    pub client_request_token: Option<String>,
    /// Desired resource state.
    pub desired_state: Option<Value>,
    /// Previous resource state, when the action is an update.
    pub previous_state: Option<Value>,
    /// Logical identifier of the resource.
    pub logical_resource_id: Option<String>,
}

impl ResourceRequest {
    /// Builds the modelled view from a full inbound request.
    pub fn from_request(request: &HandlerRequest) -> Self {
        Self {
            client_request_token: Some(request.bearer_token.clone()),
            desired_state: Some(request.request_data.resource_properties.clone()),
            previous_state: request.request_data.previous_resource_properties.clone(),
            logical_resource_id: Some(request.request_data.logical_resource_id.clone()),
        }
    }
}
