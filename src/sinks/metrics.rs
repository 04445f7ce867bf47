//! # Metric publishing with fan-out.
//!
//! [`MetricsSink`] is the seam for one metric publisher; [`MetricsProxy`]
//! fans each record out to every registered sink — the platform publisher
//! always, plus a provider-account publisher when provider credentials are
//! present.
//!
//! ## Rules
//! - One invocation metric per loop iteration, before dispatch.
//! - One duration metric per iteration, regardless of outcome.
//! - One exception metric when the iteration's dispatch errored.
//! - Sink failures are logged (`warn`) and swallowed: telemetry never fails
//!   an operation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{HandlerError, SinkError};
use crate::handlers::Action;

/// One metric publisher.
#[async_trait]
pub trait MetricsSink: Send + Sync + 'static {
    /// Records that a handler invocation started.
    async fn record_invocation(
        &self,
        timestamp: DateTime<Utc>,
        action: Action,
    ) -> Result<(), SinkError>;

    /// Records how long one handler invocation took.
    async fn record_duration(
        &self,
        timestamp: DateTime<Utc>,
        action: Action,
        elapsed: Duration,
    ) -> Result<(), SinkError>;

    /// Records a handler invocation failure.
    async fn record_exception(
        &self,
        timestamp: DateTime<Utc>,
        action: Action,
        error: &HandlerError,
    ) -> Result<(), SinkError>;
}

/// Fans metric records out to all registered sinks.
///
/// An empty proxy is valid and records nothing.
#[derive(Clone, Default)]
pub struct MetricsProxy {
    sinks: Vec<Arc<dyn MetricsSink>>,
}

impl MetricsProxy {
    /// Creates an empty proxy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a publisher to the fan-out set.
    pub fn push(&mut self, sink: Arc<dyn MetricsSink>) {
        self.sinks.push(sink);
    }

    /// Number of registered publishers.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Returns `true` when no publisher is registered.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Records an invocation metric on every sink.
    pub async fn record_invocation(&self, timestamp: DateTime<Utc>, action: Action) {
        for sink in &self.sinks {
            if let Err(e) = sink.record_invocation(timestamp, action).await {
                tracing::warn!(error = %e, "invocation metric dropped");
            }
        }
    }

    /// Records a duration metric on every sink.
    pub async fn record_duration(
        &self,
        timestamp: DateTime<Utc>,
        action: Action,
        elapsed: Duration,
    ) {
        for sink in &self.sinks {
            if let Err(e) = sink.record_duration(timestamp, action, elapsed).await {
                tracing::warn!(error = %e, "duration metric dropped");
            }
        }
    }

    /// Records an exception metric on every sink.
    pub async fn record_exception(
        &self,
        timestamp: DateTime<Utc>,
        action: Action,
        error: &HandlerError,
    ) {
        for sink in &self.sinks {
            if let Err(e) = sink.record_exception(timestamp, action, error).await {
                tracing::warn!(error = %e, "exception metric dropped");
            }
        }
    }
}
