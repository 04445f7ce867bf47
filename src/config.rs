//! # Engine configuration.
//!
//! Provides [`EngineConfig`], the centralized settings for the invocation
//! engine. Handed to [`Engine::builder`](crate::Engine::builder).
//!
//! The reinvocation constants are policy, not code: they encode a
//! cost/latency tradeoff that differs per deployment target, so they are
//! carried here rather than hard-coded in the loop.

use crate::policies::ReinvokePolicy;

/// Global configuration for the invocation engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineConfig {
    /// Local-vs-external continuation arithmetic.
    ///
    /// Defaults: 60s locality threshold, 1200ms reserved per requested
    /// delay-second, 60s reserved for the next handler run.
    pub reinvoke: ReinvokePolicy,
}
