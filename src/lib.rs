//! # provisor
//!
//! **Provisor** is an execution engine for resource lifecycle operations
//! (create, read, update, delete, list) that run across short-lived,
//! stateless process invocations.
//!
//! A long-running operation cannot assume its process survives: each
//! invocation gets a bounded time budget, and continuation state must travel
//! through the payload. The engine wraps user-written [`ResourceHandler`]
//! implementations in a control loop that reports progress, records metrics,
//! and decides per step whether to wait in-process or hand off to an
//! external reschedule service and terminate.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                     inbound payload (JSON)
//!                             │
//!                             ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Engine (control loop)                                        │
//! │  - payload parsing / validation (InvalidRequest before any    │
//! │    handler runs)                                              │
//! │  - ack / trigger-cleanup branch                               │
//! │  - Continuation (explicit per-iteration state)                │
//! │  - ReinvokePolicy (local sleep vs external reschedule)        │
//! │  - three-tier error boundary (structured / collaborator /     │
//! │    panic)                                                     │
//! └────┬──────────────┬──────────────┬──────────────┬─────────────┘
//!      ▼              ▼              ▼              ▼
//! ResourceHandler  ProgressSink  RescheduleService  MetricsProxy
//! (user CRUDL      (operation    (future trigger    (fan-out to
//!  capabilities)    status of     registration +     MetricsSink
//!                   record)       cleanup)           publishers)
//!      │
//!      └─► Session (immutable credentials + region capability)
//! ```
//!
//! ### One invocation
//! ```text
//! handle(payload, env)
//!   ├─► LogRelay::attach(payload)
//!   ├─► HandlerRequest::parse ──► InvalidRequest? ─► FAILED response
//!   ├─► fresh op?    ─► ProgressSink::report(PENDING → IN_PROGRESS)
//!   │   resumed op?  ─► RescheduleService::cleanup_trigger(rule, target)
//!   │
//!   loop {
//!     ├─► MetricsProxy::record_invocation
//!     ├─► dispatch(handler, action, ...)        (timed)
//!     ├─► MetricsProxy::record_duration         (always)
//!     ├─► Err? ─► record_exception, FAILED response
//!     ├─► absorb callback context into Continuation
//!     ├─► mutating action ─► ProgressSink::report(step)
//!     └─► ReinvokePolicy::decide(status, delay, remaining):
//!           ├─ No       ─► response
//!           ├─ Local    ─► advance, cancellable sleep, repeat
//!           └─ External ─► advance, snapshot request,
//!                          RescheduleService::reschedule, response
//!   }
//! ```
//!
//! ## Features
//! | Area            | Description                                             | Key types / traits                        |
//! |-----------------|---------------------------------------------------------|-------------------------------------------|
//! | **Handlers**    | One capability per lifecycle action, dispatched exhaustively. | [`ResourceHandler`], [`Action`], [`dispatch`] |
//! | **Progress**    | Immutable per-step outcome and status classification.   | [`ProgressEvent`], [`OperationStatus`]    |
//! | **Errors**      | Closed failure taxonomy with structured error values.   | [`HandlerError`], [`HandlerErrorCode`]    |
//! | **Continuation**| Explicit reinvocation state threaded through the loop.  | [`Continuation`], [`Reinvoke`], [`ReinvokePolicy`] |
//! | **Collaborators**| Seams to the orchestrator, scheduler and telemetry.    | [`ProgressSink`], [`RescheduleService`], [`MetricsSink`], [`LogRelay`] |
//! | **Engine**      | The control loop and its construction.                  | [`Engine`], [`EngineBuilder`], [`EngineConfig`] |
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use async_trait::async_trait;
//! use serde_json::{json, Map, Value};
//! use provisor::{
//!     Engine, EngineConfig, HandlerError, ProgressEvent, ProgressSink,
//!     RescheduleService, ResourceHandler, ResourceRequest, Session,
//!     SinkError, StaticEnvironment, StatusReport, HandlerRequest,
//! };
//!
//! struct MyResource;
//!
//! #[async_trait]
//! impl ResourceHandler for MyResource {
//!     async fn create(
//!         &self,
//!         _session: Option<&Session>,
//!         request: &ResourceRequest,
//!         _callback: &Map<String, Value>,
//!     ) -> Result<ProgressEvent, HandlerError> {
//!         let model = request.desired_state.clone().unwrap_or(Value::Null);
//!         Ok(ProgressEvent::success().with_resource_model(model))
//!     }
//! }
//!
//! struct Orchestrator; // talks to the real control plane
//!
//! #[async_trait]
//! impl ProgressSink for Orchestrator {
//!     async fn report(&self, _report: StatusReport) -> Result<(), SinkError> {
//!         Ok(())
//!     }
//! }
//!
//! #[async_trait]
//! impl RescheduleService for Orchestrator {
//!     async fn reschedule(
//!         &self,
//!         _target_id: &str,
//!         _delay_minutes: u64,
//!         _snapshot: &HandlerRequest,
//!     ) -> Result<(), SinkError> {
//!         Ok(())
//!     }
//!     async fn cleanup_trigger(&self, _rule: &str, _target: &str) -> Result<(), SinkError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let engine = Engine::builder(
//!         EngineConfig::default(),
//!         Arc::new(MyResource),
//!         Arc::new(Orchestrator),
//!         Arc::new(Orchestrator),
//!     )
//!     .build();
//!
//!     let env = StaticEnvironment::new(Duration::from_secs(900), "fn-self");
//!     let payload: Value = json!({ /* inbound request */ });
//!     let response = engine.handle(payload, &env).await;
//!     println!("{response}");
//! }
//! ```

mod config;
mod engine;
mod environment;
mod error;
mod handlers;
mod payload;
mod policies;
mod progress;
mod session;
mod sinks;

// ---- Public re-exports ----

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use environment::{Environment, StaticEnvironment};
pub use error::{HandlerError, HandlerErrorCode, SinkError};
pub use handlers::{dispatch, Action, ResourceHandler};
pub use payload::{
    Continuation, Credentials, HandlerRequest, RequestContext, RequestData, ResourceRequest,
    Response, TestEvent, TestRequest,
};
pub use policies::{Reinvoke, ReinvokePolicy};
pub use progress::{OperationStatus, ProgressEvent};
pub use session::Session;
pub use sinks::{
    LogRelay, MetricsProxy, MetricsSink, NullLogRelay, ProgressSink, RescheduleService,
    StatusReport,
};
