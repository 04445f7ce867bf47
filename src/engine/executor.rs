//! # The invocation loop.
//!
//! [`Engine::handle`] drives one full process invocation: parse the payload,
//! acknowledge or resume the operation, then loop — dispatch, record metrics,
//! report progress, decide how to continue — until the operation reaches a
//! terminal status, runs out of in-process budget, or fails.
//!
//! ```text
//! payload ──► parse ──► ack / cleanup ──► ┌─────────── loop ───────────┐
//!                                         │ invocation metric          │
//!                                         │ dispatch (timed)           │
//!                                         │ duration metric            │
//!                                         │ absorb callback context    │
//!                                         │ progress report (mutating) │
//!                                         │ decide:                    │
//!                                         │   No ───────────► response │
//!                                         │   Local ──sleep──► repeat  │
//!                                         │   External ──┐             │
//!                                         └──────────────┼─────────────┘
//!                                                reschedule ──► response
//! ```
//!
//! ## Rules
//! - Three error tiers. Structured [`HandlerError`]s travel as `Err` values
//!   and fold into a FAILED event at the loop boundary. Collaborator
//!   failures on the progress/reschedule path convert to `InternalFailure`
//!   and terminate the loop. Panics are caught **only** at the outermost
//!   boundary and fail closed.
//! - The response is always well-formed JSON, whatever went wrong.
//! - The correlation token is extracted leniently from the raw payload so
//!   even a parse failure's response carries it when present.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::FutureExt;
use serde_json::Value;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::engine::EngineBuilder;
use crate::environment::Environment;
use crate::error::{HandlerError, HandlerErrorCode};
use crate::handlers::{dispatch, ResourceHandler};
use crate::payload::{Continuation, HandlerRequest, ResourceRequest, Response, TestEvent};
use crate::policies::Reinvoke;
use crate::progress::ProgressEvent;
use crate::session::Session;
use crate::sinks::{LogRelay, MetricsProxy, ProgressSink, RescheduleService, StatusReport};

/// Drives resource lifecycle operations across short-lived invocations.
///
/// Construct via [`Engine::builder`]. One engine instance serves any number
/// of invocations; all per-operation state travels in the payload.
pub struct Engine {
    cfg: EngineConfig,
    handler: Arc<dyn ResourceHandler>,
    progress: Arc<dyn ProgressSink>,
    scheduler: Arc<dyn RescheduleService>,
    metrics: MetricsProxy,
    log_relay: Arc<dyn LogRelay>,
    cancel: CancellationToken,
}

impl Engine {
    /// Starts building an engine around `handler` and the required
    /// collaborators.
    pub fn builder(
        cfg: EngineConfig,
        handler: Arc<dyn ResourceHandler>,
        progress: Arc<dyn ProgressSink>,
        scheduler: Arc<dyn RescheduleService>,
    ) -> EngineBuilder {
        EngineBuilder::new(cfg, handler, progress, scheduler)
    }

    pub(crate) fn new_internal(
        cfg: EngineConfig,
        handler: Arc<dyn ResourceHandler>,
        progress: Arc<dyn ProgressSink>,
        scheduler: Arc<dyn RescheduleService>,
        metrics: MetricsProxy,
        log_relay: Arc<dyn LogRelay>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            handler,
            progress,
            scheduler,
            metrics,
            log_relay,
            cancel,
        }
    }

    /// Token that aborts in-process continuation sleeps.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Handles one process invocation end to end and returns the outbound
    /// response as JSON.
    ///
    /// Never panics and never returns malformed output: structured errors,
    /// collaborator failures and panics all fold into a FAILED response.
    pub async fn handle(&self, payload: Value, env: &dyn Environment) -> Value {
        // Lenient extraction so even unparseable payloads keep correlation.
        let bearer = payload
            .get("bearerToken")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let outcome = AssertUnwindSafe(self.process(&payload, env))
            .catch_unwind()
            .await;
        let event = match outcome {
            Ok(Ok(event)) => event,
            Ok(Err(err)) => {
                tracing::error!(code = err.as_label(), error = %err, "operation failed");
                err.to_progress_event()
            }
            Err(panic) => {
                let info = panic_message(panic);
                tracing::error!(panic = %info, "handler panicked; failing closed");
                ProgressEvent::failed(HandlerErrorCode::InternalFailure, info)
            }
        };
        Response::from_event(event, bearer).into_value()
    }

    /// Handles one contract-test invocation: exactly one dispatch, no
    /// acknowledgment, no metrics, no progress reports, no reschedule.
    pub async fn handle_test(&self, payload: Value) -> Value {
        let outcome = AssertUnwindSafe(self.process_test(&payload))
            .catch_unwind()
            .await;
        let event = match outcome {
            Ok(Ok(event)) => event,
            Ok(Err(err)) => {
                tracing::error!(code = err.as_label(), error = %err, "contract test failed");
                err.to_progress_event()
            }
            Err(panic) => {
                let info = panic_message(panic);
                tracing::error!(panic = %info, "handler panicked; failing closed");
                ProgressEvent::failed(HandlerErrorCode::InternalFailure, info)
            }
        };
        Response::from_event(event, None).into_value()
    }

    async fn process(
        &self,
        payload: &Value,
        env: &dyn Environment,
    ) -> Result<ProgressEvent, HandlerError> {
        self.log_relay.attach(payload).await;

        let request = HandlerRequest::parse(payload)?;
        let session = Session::new(
            request.request_data.caller_credentials.clone(),
            request.region.clone(),
        );
        let resource = ResourceRequest::from_request(&request);
        let action = request.action;

        let mut continuation = match &request.request_context {
            None => {
                self.progress
                    .report(StatusReport::ack(request.bearer_token.as_str()))
                    .await?;
                Continuation::default()
            }
            Some(ctx) => {
                let rule = ctx.cloud_watch_events_rule_name.as_deref().unwrap_or("");
                let target = ctx.cloud_watch_events_target_id.as_deref().unwrap_or("");
                if !rule.is_empty() || !target.is_empty() {
                    self.scheduler.cleanup_trigger(rule, target).await?;
                }
                Continuation::from_context(ctx)
            }
        };

        loop {
            self.metrics.record_invocation(Utc::now(), action).await;
            let started = Instant::now();
            let result = dispatch(
                self.handler.as_ref(),
                Some(&session),
                &resource,
                action,
                continuation.callback_context(),
            )
            .await;
            self.metrics
                .record_duration(Utc::now(), action, started.elapsed())
                .await;

            let event = match result {
                Ok(event) => event,
                Err(err) => {
                    self.metrics.record_exception(Utc::now(), action, &err).await;
                    return Err(err);
                }
            };

            if let Some(ctx) = event.callback_context.as_ref().filter(|c| !c.is_empty()) {
                continuation = continuation.with_callback_context(ctx.clone());
            }

            if action.is_mutating() {
                self.progress
                    .report(StatusReport::of(request.bearer_token.as_str(), &event))
                    .await?;
            }

            match self.cfg.reinvoke.decide(
                event.status,
                event.callback_delay_seconds,
                env.remaining_time(),
            ) {
                Reinvoke::No => return Ok(event),
                Reinvoke::Local { delay } => {
                    continuation = continuation.advance();
                    let sleep = time::sleep(delay);
                    tokio::pin!(sleep);
                    tokio::select! {
                        _ = &mut sleep => {}
                        _ = self.cancel.cancelled() => return Ok(event),
                    }
                }
                Reinvoke::External { delay_minutes } => {
                    continuation = continuation.advance();
                    let snapshot = request.with_continuation(&continuation);
                    self.scheduler
                        .reschedule(env.function_identifier(), delay_minutes, &snapshot)
                        .await?;
                    return Ok(event);
                }
            }
        }
    }

    async fn process_test(&self, payload: &Value) -> Result<ProgressEvent, HandlerError> {
        let event = TestEvent::parse(payload)?;
        let session = Session::new(
            event.credentials.clone(),
            event.region.clone().unwrap_or_default(),
        );
        let callback = event.callback_context.clone().unwrap_or_default();
        let request: ResourceRequest = event.request.clone().into();
        dispatch(
            self.handler.as_ref(),
            Some(&session),
            &request,
            event.action,
            &callback,
        )
        .await
    }
}

/// Renders a caught panic payload into a message for the response.
fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;
    use crate::error::SinkError;
    use crate::handlers::Action;
    use crate::progress::OperationStatus;
    use crate::sinks::MetricsSink;
    use async_trait::async_trait;
    use serde_json::{json, Map};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingProgress {
        reports: Mutex<Vec<StatusReport>>,
        fail: bool,
    }

    #[async_trait]
    impl ProgressSink for RecordingProgress {
        async fn report(&self, report: StatusReport) -> Result<(), SinkError> {
            if self.fail {
                return Err(SinkError::new("progress", "endpoint unreachable"));
            }
            self.reports.lock().unwrap().push(report);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingScheduler {
        reschedules: Mutex<Vec<(String, u64, HandlerRequest)>>,
        cleanups: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl RescheduleService for RecordingScheduler {
        async fn reschedule(
            &self,
            target_id: &str,
            delay_minutes: u64,
            snapshot: &HandlerRequest,
        ) -> Result<(), SinkError> {
            self.reschedules.lock().unwrap().push((
                target_id.to_owned(),
                delay_minutes,
                snapshot.clone(),
            ));
            Ok(())
        }

        async fn cleanup_trigger(
            &self,
            rule_name: &str,
            target_id: &str,
        ) -> Result<(), SinkError> {
            self.cleanups
                .lock()
                .unwrap()
                .push((rule_name.to_owned(), target_id.to_owned()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingMetrics {
        entries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MetricsSink for RecordingMetrics {
        async fn record_invocation(
            &self,
            _timestamp: chrono::DateTime<Utc>,
            action: Action,
        ) -> Result<(), SinkError> {
            self.entries
                .lock()
                .unwrap()
                .push(format!("invocation:{action}"));
            Ok(())
        }

        async fn record_duration(
            &self,
            _timestamp: chrono::DateTime<Utc>,
            action: Action,
            _elapsed: Duration,
        ) -> Result<(), SinkError> {
            self.entries
                .lock()
                .unwrap()
                .push(format!("duration:{action}"));
            Ok(())
        }

        async fn record_exception(
            &self,
            _timestamp: chrono::DateTime<Utc>,
            action: Action,
            error: &HandlerError,
        ) -> Result<(), SinkError> {
            self.entries
                .lock()
                .unwrap()
                .push(format!("exception:{action}:{}", error.as_label()));
            Ok(())
        }
    }

    /// Handler replaying a scripted sequence of outcomes, recording each
    /// callback context it was handed.
    #[derive(Default)]
    struct Scripted {
        script: Mutex<VecDeque<Result<ProgressEvent, HandlerError>>>,
        calls: AtomicU32,
        seen_callbacks: Mutex<Vec<Map<String, Value>>>,
    }

    impl Scripted {
        fn new(script: Vec<Result<ProgressEvent, HandlerError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                ..Self::default()
            }
        }

        fn next(&self, callback: &Map<String, Value>) -> Result<ProgressEvent, HandlerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_callbacks.lock().unwrap().push(callback.clone());
            self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
                Ok(ProgressEvent::failed(
                    HandlerErrorCode::InternalFailure,
                    "script exhausted",
                ))
            })
        }
    }

    #[async_trait]
    impl ResourceHandler for Scripted {
        async fn create(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            self.next(callback)
        }

        async fn read(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            self.next(callback)
        }

        async fn update(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            self.next(callback)
        }

        async fn delete(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            self.next(callback)
        }

        async fn list(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            self.next(callback)
        }
    }

    struct Panicking;

    #[async_trait]
    impl ResourceHandler for Panicking {
        async fn create(
            &self,
            _session: Option<&Session>,
            _request: &ResourceRequest,
            _callback: &Map<String, Value>,
        ) -> Result<ProgressEvent, HandlerError> {
            panic!("downstream client exploded");
        }
    }

    struct Harness {
        engine: Engine,
        progress: Arc<RecordingProgress>,
        scheduler: Arc<RecordingScheduler>,
        metrics: Arc<RecordingMetrics>,
        handler: Arc<Scripted>,
    }

    fn harness(script: Vec<Result<ProgressEvent, HandlerError>>) -> Harness {
        harness_with(script, RecordingProgress::default())
    }

    fn harness_with(
        script: Vec<Result<ProgressEvent, HandlerError>>,
        progress: RecordingProgress,
    ) -> Harness {
        let handler = Arc::new(Scripted::new(script));
        let progress = Arc::new(progress);
        let scheduler = Arc::new(RecordingScheduler::default());
        let metrics = Arc::new(RecordingMetrics::default());
        let engine = Engine::builder(
            EngineConfig::default(),
            handler.clone(),
            progress.clone(),
            scheduler.clone(),
        )
        .with_metrics_sink(metrics.clone())
        .build();
        Harness {
            engine,
            progress,
            scheduler,
            metrics,
            handler,
        }
    }

    fn env() -> StaticEnvironment {
        StaticEnvironment::new(Duration::from_secs(900), "fn-self")
    }

    fn payload(action: &str) -> Value {
        json!({
            "action": action,
            "bearerToken": "token-123",
            "region": "us-east-1",
            "requestData": {
                "resourceProperties": {"name": "demo"},
                "logicalResourceId": "MyResource",
                "callerCredentials": {
                    "accessKeyId": "AKIA-caller",
                    "secretAccessKey": "s1",
                    "sessionToken": "t1"
                },
                "platformCredentials": {
                    "accessKeyId": "AKIA-platform",
                    "secretAccessKey": "s2",
                    "sessionToken": "t2"
                }
            },
            "resourceType": "Org::Service::Resource",
            "awsAccountId": "123456789012"
        })
    }

    #[tokio::test]
    async fn test_create_success_is_single_dispatch() {
        let h = harness(vec![Ok(
            ProgressEvent::success().with_resource_model(json!({"id": "res-1"}))
        )]);

        let response = h.engine.handle(payload("CREATE"), &env()).await;

        assert_eq!(response["status"], json!("SUCCESS"));
        assert_eq!(response["bearerToken"], json!("token-123"));
        assert_eq!(response["resourceModel"], json!({"id": "res-1"}));
        assert_eq!(h.handler.calls.load(Ordering::SeqCst), 1);

        let reports = h.progress.reports.lock().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].status, OperationStatus::InProgress);
        assert_eq!(reports[0].current_status, Some(OperationStatus::Pending));
        assert_eq!(reports[1].status, OperationStatus::Success);
        assert_eq!(
            reports[1].current_status,
            Some(OperationStatus::InProgress)
        );

        assert!(h.scheduler.reschedules.lock().unwrap().is_empty());
        assert_eq!(
            h.metrics.entries.lock().unwrap().as_slice(),
            ["invocation:CREATE", "duration:CREATE"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_short_delay_loops_locally() {
        let mut ctx = Map::new();
        ctx.insert("step".into(), json!(1));
        let h = harness(vec![
            Ok(ProgressEvent::in_progress()
                .with_callback_context(ctx.clone())
                .with_callback_delay(5)),
            Ok(ProgressEvent::success()),
        ]);

        let response = h.engine.handle(payload("UPDATE"), &env()).await;

        assert_eq!(response["status"], json!("SUCCESS"));
        assert_eq!(h.handler.calls.load(Ordering::SeqCst), 2);

        // Second dispatch resumed with the context the first one returned.
        let seen = h.handler.seen_callbacks.lock().unwrap();
        assert!(seen[0].is_empty());
        assert_eq!(seen[1], ctx);

        let reports = h.progress.reports.lock().unwrap();
        assert_eq!(reports.len(), 3); // ack, IN_PROGRESS, SUCCESS
        assert_eq!(reports[1].status, OperationStatus::InProgress);
        assert_eq!(reports[2].status, OperationStatus::Success);
        assert!(h.scheduler.reschedules.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_long_delay_goes_external() {
        let h = harness(vec![Ok(ProgressEvent::in_progress().with_callback_delay(900))]);

        let response = h.engine.handle(payload("DELETE"), &env()).await;

        assert_eq!(response["status"], json!("IN_PROGRESS"));
        assert_eq!(response["callbackDelaySeconds"], json!(900));
        assert_eq!(h.handler.calls.load(Ordering::SeqCst), 1);

        let reschedules = h.scheduler.reschedules.lock().unwrap();
        assert_eq!(reschedules.len(), 1);
        let (target, minutes, snapshot) = &reschedules[0];
        assert_eq!(target, "fn-self");
        assert_eq!(*minutes, 15);
        assert_eq!(snapshot.request_context.as_ref().unwrap().invocation, 1);
    }

    #[tokio::test]
    async fn test_read_error_fails_without_reschedule_or_mutating_report() {
        let h = harness(vec![Err(HandlerError::NotFound("no such resource".into()))]);

        let response = h.engine.handle(payload("READ"), &env()).await;

        assert_eq!(response["status"], json!("FAILED"));
        assert_eq!(response["errorCode"], json!("NotFound"));
        assert!(h.scheduler.reschedules.lock().unwrap().is_empty());

        // Only the initial acknowledgment; READ never reports iterations.
        let reports = h.progress.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].current_status, Some(OperationStatus::Pending));

        assert_eq!(
            h.metrics.entries.lock().unwrap().as_slice(),
            [
                "invocation:READ",
                "duration:READ",
                "exception:READ:not_found"
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_fails_before_any_dispatch() {
        let h = harness(vec![]);

        let response = h
            .engine
            .handle(json!({"action": "CREATE"}), &env())
            .await;

        assert_eq!(response["status"], json!("FAILED"));
        assert_eq!(response["errorCode"], json!("InvalidRequest"));
        assert!(response.get("bearerToken").is_none());
        assert_eq!(h.handler.calls.load(Ordering::SeqCst), 0);
        assert!(h.progress.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resumed_invocation_cleans_trigger_and_threads_continuation() {
        let h = harness(vec![Ok(ProgressEvent::in_progress().with_callback_delay(900))]);

        let mut p = payload("DELETE");
        p["requestContext"] = json!({
            "invocation": 3,
            "callbackContext": {"step": "waiting"},
            "cloudWatchEventsRuleName": "rule-1",
            "cloudWatchEventsTargetId": "target-1"
        });
        let response = h.engine.handle(p, &env()).await;

        assert_eq!(response["status"], json!("IN_PROGRESS"));
        assert_eq!(
            h.scheduler.cleanups.lock().unwrap().as_slice(),
            [("rule-1".to_owned(), "target-1".to_owned())]
        );

        // Resumed: no PENDING acknowledgment, just the iteration report.
        let reports = h.progress.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].current_status,
            Some(OperationStatus::InProgress)
        );

        let seen = h.handler.seen_callbacks.lock().unwrap();
        assert_eq!(seen[0].get("step"), Some(&json!("waiting")));

        let reschedules = h.scheduler.reschedules.lock().unwrap();
        assert_eq!(reschedules[0].2.request_context.as_ref().unwrap().invocation, 4);
    }

    #[tokio::test]
    async fn test_resumed_invocation_skips_cleanup_for_empty_identifiers() {
        let h = harness(vec![Ok(ProgressEvent::success())]);

        let mut p = payload("CREATE");
        p["requestContext"] = json!({"invocation": 1});
        let response = h.engine.handle(p, &env()).await;

        assert_eq!(response["status"], json!("SUCCESS"));
        assert!(h.scheduler.cleanups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_panic_fails_closed_with_wellformed_response() {
        let progress = Arc::new(RecordingProgress::default());
        let scheduler = Arc::new(RecordingScheduler::default());
        let engine = Engine::builder(
            EngineConfig::default(),
            Arc::new(Panicking),
            progress,
            scheduler,
        )
        .build();

        let response = engine.handle(payload("CREATE"), &env()).await;

        assert_eq!(response["status"], json!("FAILED"));
        assert_eq!(response["errorCode"], json!("InternalFailure"));
        assert_eq!(
            response["message"],
            json!("downstream client exploded")
        );
        assert_eq!(response["bearerToken"], json!("token-123"));
        assert_eq!(response["callbackDelaySeconds"], json!(0));
    }

    #[tokio::test]
    async fn test_progress_sink_failure_terminates_the_loop() {
        let h = harness_with(
            vec![Ok(ProgressEvent::success())],
            RecordingProgress {
                fail: true,
                ..RecordingProgress::default()
            },
        );

        let response = h.engine.handle(payload("CREATE"), &env()).await;

        assert_eq!(response["status"], json!("FAILED"));
        assert_eq!(response["errorCode"], json!("InternalFailure"));
        // The acknowledgment already failed, so no handler ever ran.
        assert_eq!(h.handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_aborts_local_wait() {
        let handler = Arc::new(Scripted::new(vec![
            Ok(ProgressEvent::in_progress().with_callback_delay(30)),
            Ok(ProgressEvent::success()),
        ]));
        let cancel = CancellationToken::new();
        let engine = Engine::builder(
            EngineConfig::default(),
            handler.clone(),
            Arc::new(RecordingProgress::default()),
            Arc::new(RecordingScheduler::default()),
        )
        .with_cancellation(cancel.clone())
        .build();

        cancel.cancel();
        let response = engine.handle(payload("UPDATE"), &env()).await;

        // The wait is aborted and the last event is returned as-is.
        assert_eq!(response["status"], json!("IN_PROGRESS"));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_contract_entrypoint_is_a_single_bare_dispatch() {
        let h = harness(vec![Ok(
            ProgressEvent::success().with_resource_model(json!({"id": "res-1"}))
        )]);

        let response = h
            .engine
            .handle_test(json!({
                "credentials": {
                    "accessKeyId": "AKIA",
                    "secretAccessKey": "s",
                    "sessionToken": "t"
                },
                "action": "READ",
                "request": {"logicalResourceIdentifier": "MyResource"}
            }))
            .await;

        assert_eq!(response["status"], json!("SUCCESS"));
        assert!(response.get("bearerToken").is_none());
        assert_eq!(h.handler.calls.load(Ordering::SeqCst), 1);
        assert!(h.progress.reports.lock().unwrap().is_empty());
        assert!(h.metrics.entries.lock().unwrap().is_empty());
        assert!(h.scheduler.reschedules.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invocation_counter_advances_once_per_continuation() {
        // Two local hops, then an external one: counter ends at 3.
        let h = harness(vec![
            Ok(ProgressEvent::in_progress().with_callback_delay(1)),
            Ok(ProgressEvent::in_progress().with_callback_delay(1)),
            Ok(ProgressEvent::in_progress().with_callback_delay(600)),
        ]);

        let response = h.engine.handle(payload("CREATE"), &env()).await;

        assert_eq!(response["status"], json!("IN_PROGRESS"));
        assert_eq!(h.handler.calls.load(Ordering::SeqCst), 3);
        let reschedules = h.scheduler.reschedules.lock().unwrap();
        assert_eq!(reschedules[0].1, 10);
        assert_eq!(reschedules[0].2.request_context.as_ref().unwrap().invocation, 3);
    }
}
