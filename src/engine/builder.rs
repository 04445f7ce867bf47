//! Builder for constructing an [`Engine`] with optional collaborators.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::handlers::ResourceHandler;
use crate::sinks::{LogRelay, MetricsProxy, MetricsSink, NullLogRelay, ProgressSink, RescheduleService};

/// Builder for [`Engine`].
///
/// The handler, progress sink and reschedule service are required and taken
/// up front; metric publishers, the log relay and the cancellation token are
/// optional.
pub struct EngineBuilder {
    cfg: EngineConfig,
    handler: Arc<dyn ResourceHandler>,
    progress: Arc<dyn ProgressSink>,
    scheduler: Arc<dyn RescheduleService>,
    metrics: MetricsProxy,
    log_relay: Arc<dyn LogRelay>,
    cancel: CancellationToken,
}

impl EngineBuilder {
    /// Creates a new builder with the required collaborators.
    pub fn new(
        cfg: EngineConfig,
        handler: Arc<dyn ResourceHandler>,
        progress: Arc<dyn ProgressSink>,
        scheduler: Arc<dyn RescheduleService>,
    ) -> Self {
        Self {
            cfg,
            handler,
            progress,
            scheduler,
            metrics: MetricsProxy::new(),
            log_relay: Arc::new(NullLogRelay),
            cancel: CancellationToken::new(),
        }
    }

    /// Adds a metric publisher to the fan-out set.
    ///
    /// Call once for the platform publisher and again for the
    /// provider-account publisher when provider credentials are present.
    pub fn with_metrics_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.metrics.push(sink);
        self
    }

    /// Sets the log-forwarding setup hook.
    pub fn with_log_relay(mut self, relay: Arc<dyn LogRelay>) -> Self {
        self.log_relay = relay;
        self
    }

    /// Sets the token that aborts in-process continuation sleeps.
    ///
    /// Cancellation ends the local wait and returns the last progress event;
    /// it never cancels the logical operation itself.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Builds the engine.
    pub fn build(self) -> Engine {
        Engine::new_internal(
            self.cfg,
            self.handler,
            self.progress,
            self.scheduler,
            self.metrics,
            self.log_relay,
            self.cancel,
        )
    }
}
