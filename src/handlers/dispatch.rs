//! # Dispatch one handler call and enforce the handler contract.
//!
//! [`dispatch`] selects the handler capability for the requested action via
//! an exhaustive match and checks the synchronous-handler invariant on the
//! result.
//!
//! ## Rules
//! - Exactly **one** handler call per dispatch.
//! - A `Read`/`List` result with status IN_PROGRESS is a contract violation
//!   by the handler author; it is raised as a structured `InternalFailure`
//!   error and propagated, never silently accepted.
//! - Handler errors are **not** caught here; tier handling happens at the
//!   engine boundary.

use serde_json::{Map, Value};

use crate::error::HandlerError;
use crate::handlers::{Action, ResourceHandler};
use crate::payload::ResourceRequest;
use crate::progress::ProgressEvent;
use crate::session::Session;

/// Invokes the handler capability for `action` and returns its progress
/// event.
///
/// ### Errors
/// - Whatever the handler itself raises (passed through untouched).
/// - [`HandlerError::InternalFailure`] when a non-mutating action returns
///   IN_PROGRESS.
pub async fn dispatch(
    handler: &dyn ResourceHandler,
    session: Option<&Session>,
    request: &ResourceRequest,
    action: Action,
    callback: &Map<String, Value>,
) -> Result<ProgressEvent, HandlerError> {
    let event = match action {
        Action::Create => handler.create(session, request, callback).await?,
        Action::Read => handler.read(session, request, callback).await?,
        Action::Update => handler.update(session, request, callback).await?,
        Action::Delete => handler.delete(session, request, callback).await?,
        Action::List => handler.list(session, request, callback).await?,
    };

    if event.is_in_progress() && !action.is_mutating() {
        return Err(HandlerError::InternalFailure(
            "READ and LIST handlers must return synchronously".into(),
        ));
    }
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerErrorCode;
    use crate::progress::OperationStatus;
    use async_trait::async_trait;

    struct InProgressEverywhere;

    #[async_trait]
    impl ResourceHandler for InProgressEverywhere {
        async fn create(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            _callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            Ok(ProgressEvent::in_progress().with_callback_delay(5))
        }

        async fn read(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            _callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            Ok(ProgressEvent::in_progress())
        }

        async fn list(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            _callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            Ok(ProgressEvent::in_progress())
        }
    }

    struct Failing;

    #[async_trait]
    impl ResourceHandler for Failing {
        async fn read(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            _callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            Err(HandlerError::NotFound("no such resource".into()))
        }
    }

    #[tokio::test]
    async fn test_mutating_action_may_request_continuation() {
        let ev = dispatch(
            &InProgressEverywhere,
            None,
            &ResourceRequest::default(),
            Action::Create,
            &Map::new(),
        )
        .await
        .unwrap();
        assert_eq!(ev.status, OperationStatus::InProgress);
    }

    #[tokio::test]
    async fn test_read_in_progress_is_contract_violation() {
        let err = dispatch(
            &InProgressEverywhere,
            None,
            &ResourceRequest::default(),
            Action::Read,
            &Map::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), HandlerErrorCode::InternalFailure);
        assert!(err.to_string().contains("synchronously"));
    }

    #[tokio::test]
    async fn test_list_in_progress_is_contract_violation() {
        let err = dispatch(
            &InProgressEverywhere,
            None,
            &ResourceRequest::default(),
            Action::List,
            &Map::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), HandlerErrorCode::InternalFailure);
    }

    #[tokio::test]
    async fn test_handler_errors_pass_through() {
        let err = dispatch(
            &Failing,
            None,
            &ResourceRequest::default(),
            Action::Read,
            &Map::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), HandlerErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_unregistered_action_is_reportable_not_fatal() {
        let ev = dispatch(
            &Failing,
            None,
            &ResourceRequest::default(),
            Action::Delete,
            &Map::new(),
        )
        .await
        .unwrap();
        assert_eq!(ev.status, OperationStatus::Failed);
        assert_eq!(ev.error_code, Some(HandlerErrorCode::InternalFailure));
    }
}
