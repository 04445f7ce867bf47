//! # Resource handler trait.
//!
//! [`ResourceHandler`] is the seam between the engine and user code: one
//! async capability per lifecycle action, each returning a
//! `Result<ProgressEvent, HandlerError>`. The engine selects the capability
//! by an exhaustive match on [`Action`](crate::Action), so the compiler
//! enforces coverage of the action set.
//!
//! Every method has a default implementation that returns a terminal
//! `FAILED/InternalFailure` event naming the missing action. An unimplemented
//! action is therefore a reportable condition, never a panic, and the
//! behavior is deterministic.
//!
//! ## Contract
//! - Handlers receive an optional [`Session`] (caller credentials), the
//!   modelled [`ResourceRequest`], and the callback context from the
//!   previous step. All three are borrowed; handlers must not assume any
//!   state survives beyond the returned event.
//! - `Read`/`List` implementations must return a terminal event; returning
//!   IN_PROGRESS from them is a contract violation surfaced by the
//!   dispatcher.
//!
//! # Example
//! ```
//! use async_trait::async_trait;
//! use serde_json::{json, Map, Value};
//! use provisor::{HandlerError, ProgressEvent, ResourceHandler, ResourceRequest, Session};
//!
//! struct BucketHandler;
//!
//! #[async_trait]
//! impl ResourceHandler for BucketHandler {
//!     async fn create(
//!         &self,
//!         _session: Option<&Session>,
//!         request: &ResourceRequest,
//!         _callback: &Map<String, Value>,
//!     ) -> Result<ProgressEvent, HandlerError> {
//!         let model = request.desired_state.clone().unwrap_or_else(|| json!({}));
//!         Ok(ProgressEvent::success().with_resource_model(model))
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{HandlerError, HandlerErrorCode};
use crate::handlers::Action;
use crate::payload::ResourceRequest;
use crate::progress::ProgressEvent;
use crate::session::Session;

fn unregistered(action: Action) -> ProgressEvent {
    ProgressEvent::failed(
        HandlerErrorCode::InternalFailure,
        format!("no handler registered for {action}"),
    )
}

/// One capability per lifecycle action.
///
/// Implement the actions your resource type supports; the defaults report
/// the rest as unregistered.
#[async_trait]
pub trait ResourceHandler: Send + Sync + 'static {
    /// Provisions a new resource.
    async fn create(
        &self,
        session: Option<&Session>,
        request: &ResourceRequest,
        callback: &Map<String, Value>,
    ) -> Result<ProgressEvent, HandlerError> {
        let _ = (session, request, callback);
        Ok(unregistered(Action::Create))
    }

    /// Fetches the current state of one resource. Must return synchronously
    /// (a terminal event) within this invocation.
    async fn read(
        &self,
        session: Option<&Session>,
        request: &ResourceRequest,
        callback: &Map<String, Value>,
    ) -> Result<ProgressEvent, HandlerError> {
        let _ = (session, request, callback);
        Ok(unregistered(Action::Read))
    }

    /// Applies a state change to an existing resource.
    async fn update(
        &self,
        session: Option<&Session>,
        request: &ResourceRequest,
        callback: &Map<String, Value>,
    ) -> Result<ProgressEvent, HandlerError> {
        let _ = (session, request, callback);
        Ok(unregistered(Action::Update))
    }

    /// Removes an existing resource.
    async fn delete(
        &self,
        session: Option<&Session>,
        request: &ResourceRequest,
        callback: &Map<String, Value>,
    ) -> Result<ProgressEvent, HandlerError> {
        let _ = (session, request, callback);
        Ok(unregistered(Action::Delete))
    }

    /// Enumerates resources of this type. Must return synchronously (a
    /// terminal event) within this invocation.
    async fn list(
        &self,
        session: Option<&Session>,
        request: &ResourceRequest,
        callback: &Map<String, Value>,
    ) -> Result<ProgressEvent, HandlerError> {
        let _ = (session, request, callback);
        Ok(unregistered(Action::List))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::OperationStatus;

    struct Empty;
    impl ResourceHandler for Empty {}

    #[tokio::test]
    async fn test_default_methods_report_unregistered() {
        let handler = Empty;
        let request = ResourceRequest::default();
        let callback = Map::new();

        let ev = handler
            .create(None, &request, &callback)
            .await
            .expect("default is a reportable event, not an error");
        assert_eq!(ev.status, OperationStatus::Failed);
        assert_eq!(ev.error_code, Some(HandlerErrorCode::InternalFailure));
        assert!(ev.message.contains("CREATE"));

        let ev = handler.list(None, &request, &callback).await.unwrap();
        assert!(ev.message.contains("LIST"));
    }
}
