//! Error types used by the invocation engine and resource handlers.
//!
//! This module defines three layers:
//!
//! - [`HandlerErrorCode`] — the closed set of failure categories reported to
//!   the orchestrator. Codes carry no payload beyond their name.
//! - [`HandlerError`] — structured errors raised deliberately by handler or
//!   framework code, one variant per code. These travel as the `Err` arm of
//!   handler results and are folded into a terminal FAILED progress event at
//!   the loop boundary.
//! - [`SinkError`] — failures from external collaborators (progress sink,
//!   reschedule service, metric publishers).
//!
//! Collaborator failures on the progress/reschedule path are never swallowed:
//! they convert into [`HandlerError::InternalFailure`] and terminate the loop,
//! so the orchestrator learns the operation could not proceed.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::progress::ProgressEvent;

/// Closed set of failure categories understood by the orchestrator.
///
/// The code is attached to the outbound response **iff** the final status is
/// [`OperationStatus::Failed`](crate::OperationStatus::Failed). Serialized by
/// variant name (`"NotFound"`, `"InternalFailure"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    /// The requested update cannot be applied to this resource.
    NotUpdatable,
    /// Inbound payload or handler input was malformed or incomplete.
    InvalidRequest,
    /// The caller is not allowed to perform the operation.
    AccessDenied,
    /// Supplied credentials were rejected.
    InvalidCredentials,
    /// A resource with the requested identifier already exists.
    AlreadyExists,
    /// The requested resource does not exist.
    NotFound,
    /// The resource is in a state that conflicts with the operation.
    ResourceConflict,
    /// The downstream service throttled the request.
    Throttling,
    /// A service quota would be exceeded.
    ServiceLimitExceeded,
    /// The resource did not reach a stable state in time.
    NotStabilized,
    /// Generic failure reported by the downstream service.
    GeneralServiceException,
    /// The downstream service reported an internal error.
    ServiceInternalError,
    /// A network-level failure while talking to the downstream service.
    NetworkFailure,
    /// The downstream service did not respond in time.
    ServiceTimeout,
    /// Unclassified failure inside the handler or the framework.
    InternalFailure,
}

impl HandlerErrorCode {
    /// Returns the code's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerErrorCode::NotUpdatable => "NotUpdatable",
            HandlerErrorCode::InvalidRequest => "InvalidRequest",
            HandlerErrorCode::AccessDenied => "AccessDenied",
            HandlerErrorCode::InvalidCredentials => "InvalidCredentials",
            HandlerErrorCode::AlreadyExists => "AlreadyExists",
            HandlerErrorCode::NotFound => "NotFound",
            HandlerErrorCode::ResourceConflict => "ResourceConflict",
            HandlerErrorCode::Throttling => "Throttling",
            HandlerErrorCode::ServiceLimitExceeded => "ServiceLimitExceeded",
            HandlerErrorCode::NotStabilized => "NotStabilized",
            HandlerErrorCode::GeneralServiceException => "GeneralServiceException",
            HandlerErrorCode::ServiceInternalError => "ServiceInternalError",
            HandlerErrorCode::NetworkFailure => "NetworkFailure",
            HandlerErrorCode::ServiceTimeout => "ServiceTimeout",
            HandlerErrorCode::InternalFailure => "InternalFailure",
        }
    }
}

impl fmt::Display for HandlerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Structured errors raised by handlers or the framework.
///
/// One variant per [`HandlerErrorCode`]; each carries a human-readable
/// message. Raising one of these terminates the operation — the engine
/// converts it into a FAILED progress event carrying the matching code. There
/// is no retry.
///
/// # Example
/// ```
/// use provisor::{HandlerError, HandlerErrorCode};
///
/// let err = HandlerError::NotFound("vpc-123 does not exist".into());
/// assert_eq!(err.code(), HandlerErrorCode::NotFound);
/// ```
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// See [`HandlerErrorCode::NotUpdatable`].
    #[error("not updatable: {0}")]
    NotUpdatable(String),

    /// See [`HandlerErrorCode::InvalidRequest`]. Also raised by the engine
    /// for malformed inbound payloads, before any handler runs.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// See [`HandlerErrorCode::AccessDenied`].
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// See [`HandlerErrorCode::InvalidCredentials`].
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// See [`HandlerErrorCode::AlreadyExists`].
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// See [`HandlerErrorCode::NotFound`].
    #[error("not found: {0}")]
    NotFound(String),

    /// See [`HandlerErrorCode::ResourceConflict`].
    #[error("resource conflict: {0}")]
    ResourceConflict(String),

    /// See [`HandlerErrorCode::Throttling`].
    #[error("throttled: {0}")]
    Throttling(String),

    /// See [`HandlerErrorCode::ServiceLimitExceeded`].
    #[error("service limit exceeded: {0}")]
    ServiceLimitExceeded(String),

    /// See [`HandlerErrorCode::NotStabilized`].
    #[error("not stabilized: {0}")]
    NotStabilized(String),

    /// See [`HandlerErrorCode::GeneralServiceException`].
    #[error("service exception: {0}")]
    GeneralServiceException(String),

    /// See [`HandlerErrorCode::ServiceInternalError`].
    #[error("service internal error: {0}")]
    ServiceInternalError(String),

    /// See [`HandlerErrorCode::NetworkFailure`].
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// See [`HandlerErrorCode::ServiceTimeout`].
    #[error("service timeout: {0}")]
    ServiceTimeout(String),

    /// See [`HandlerErrorCode::InternalFailure`]. Also produced for
    /// collaborator failures and handler contract violations.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}

impl HandlerError {
    /// Returns the [`HandlerErrorCode`] this error reports to the orchestrator.
    pub fn code(&self) -> HandlerErrorCode {
        match self {
            HandlerError::NotUpdatable(_) => HandlerErrorCode::NotUpdatable,
            HandlerError::InvalidRequest(_) => HandlerErrorCode::InvalidRequest,
            HandlerError::AccessDenied(_) => HandlerErrorCode::AccessDenied,
            HandlerError::InvalidCredentials(_) => HandlerErrorCode::InvalidCredentials,
            HandlerError::AlreadyExists(_) => HandlerErrorCode::AlreadyExists,
            HandlerError::NotFound(_) => HandlerErrorCode::NotFound,
            HandlerError::ResourceConflict(_) => HandlerErrorCode::ResourceConflict,
            HandlerError::Throttling(_) => HandlerErrorCode::Throttling,
            HandlerError::ServiceLimitExceeded(_) => HandlerErrorCode::ServiceLimitExceeded,
            HandlerError::NotStabilized(_) => HandlerErrorCode::NotStabilized,
            HandlerError::GeneralServiceException(_) => HandlerErrorCode::GeneralServiceException,
            HandlerError::ServiceInternalError(_) => HandlerErrorCode::ServiceInternalError,
            HandlerError::NetworkFailure(_) => HandlerErrorCode::NetworkFailure,
            HandlerError::ServiceTimeout(_) => HandlerErrorCode::ServiceTimeout,
            HandlerError::InternalFailure(_) => HandlerErrorCode::InternalFailure,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use provisor::HandlerError;
    ///
    /// let err = HandlerError::Throttling("slow down".into());
    /// assert_eq!(err.as_label(), "throttling");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::NotUpdatable(_) => "not_updatable",
            HandlerError::InvalidRequest(_) => "invalid_request",
            HandlerError::AccessDenied(_) => "access_denied",
            HandlerError::InvalidCredentials(_) => "invalid_credentials",
            HandlerError::AlreadyExists(_) => "already_exists",
            HandlerError::NotFound(_) => "not_found",
            HandlerError::ResourceConflict(_) => "resource_conflict",
            HandlerError::Throttling(_) => "throttling",
            HandlerError::ServiceLimitExceeded(_) => "service_limit_exceeded",
            HandlerError::NotStabilized(_) => "not_stabilized",
            HandlerError::GeneralServiceException(_) => "general_service_exception",
            HandlerError::ServiceInternalError(_) => "service_internal_error",
            HandlerError::NetworkFailure(_) => "network_failure",
            HandlerError::ServiceTimeout(_) => "service_timeout",
            HandlerError::InternalFailure(_) => "internal_failure",
        }
    }

    /// Converts this error into a terminal FAILED progress event.
    pub fn to_progress_event(&self) -> ProgressEvent {
        ProgressEvent::failed(self.code(), self.to_string())
    }
}

impl From<SinkError> for HandlerError {
    /// Collaborator failures terminate the operation as `InternalFailure`.
    fn from(err: SinkError) -> Self {
        HandlerError::InternalFailure(err.to_string())
    }
}

/// Failure reported by an external collaborator (progress sink, reschedule
/// service, metric publisher).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{collaborator} call failed: {message}")]
pub struct SinkError {
    /// Which collaborator failed (e.g. `"progress"`, `"reschedule"`).
    pub collaborator: &'static str,
    /// Underlying failure description.
    pub message: String,
}

impl SinkError {
    /// Creates a new collaborator error.
    pub fn new(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self {
            collaborator,
            message: message.into(),
        }
    }
}
