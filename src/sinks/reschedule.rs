//! # Reschedule service: external re-invocation triggers.
//!
//! When a wait cannot be absorbed locally, the engine registers a future
//! trigger through [`RescheduleService::reschedule`] and terminates the
//! current invocation. A resumed invocation first cleans up the trigger that
//! fired it via [`RescheduleService::cleanup_trigger`] so it does not fire
//! again spuriously.

use async_trait::async_trait;

use crate::error::SinkError;
use crate::payload::HandlerRequest;

/// Arranges future re-invocations through an external timer mechanism.
#[async_trait]
pub trait RescheduleService: Send + Sync + 'static {
    /// Registers a trigger that re-invokes `target_id` after `delay_minutes`
    /// with `snapshot` as its payload. Fire-and-forget: the implementation
    /// must not block on the future invocation.
    ///
    /// A delay of 0 minutes means "as soon as possible".
    async fn reschedule(
        &self,
        target_id: &str,
        delay_minutes: u64,
        snapshot: &HandlerRequest,
    ) -> Result<(), SinkError>;

    /// Removes the trigger that caused the current invocation.
    ///
    /// Must be idempotent: a no-op when the trigger is already gone. The
    /// engine skips the call entirely when both identifiers are empty.
    async fn cleanup_trigger(&self, rule_name: &str, target_id: &str) -> Result<(), SinkError>;
}
