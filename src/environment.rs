//! # Execution environment.
//!
//! [`Environment`] is what the compute platform must supply to the engine:
//! the remaining time budget of the current invocation and a stable
//! self-identifier to hand to the reschedule service. [`StaticEnvironment`]
//! is a fixed-value implementation for embedding and tests.

use std::time::Duration;

/// Platform-supplied facts about the current invocation.
pub trait Environment: Send + Sync {
    /// Execution budget remaining before the platform kills this invocation.
    fn remaining_time(&self) -> Duration;

    /// Stable identifier of this function, used as the reschedule target.
    fn function_identifier(&self) -> &str;
}

/// Environment with fixed values.
#[derive(Clone, Debug)]
pub struct StaticEnvironment {
    remaining: Duration,
    identifier: String,
}

impl StaticEnvironment {
    /// Creates an environment reporting `remaining` budget and `identifier`.
    pub fn new(remaining: Duration, identifier: impl Into<String>) -> Self {
        Self {
            remaining,
            identifier: identifier.into(),
        }
    }
}

impl Environment for StaticEnvironment {
    fn remaining_time(&self) -> Duration {
        self.remaining
    }

    fn function_identifier(&self) -> &str {
        &self.identifier
    }
}
