//! # Reinvocation decision: local sleep vs external reschedule.
//!
//! [`ReinvokePolicy::decide`] is a pure function over the previous step's
//! status, the delay the handler requested, and the remaining execution
//! budget. A short wait that fits comfortably in the budget is absorbed by
//! an in-process sleep; anything else is delegated to the external
//! reschedule service so a paid compute slot is never held idle.
//!
//! The budget test reserves `per_second_margin` per requested delay-second
//! (1.2 real seconds per unit, a 20% margin over the 1-second baseline) plus
//! one full invocation's worth of timeout so the handler itself can run to
//! completion after waking.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use provisor::{OperationStatus, Reinvoke, ReinvokePolicy};
//!
//! let policy = ReinvokePolicy::default();
//!
//! // Terminal status: the operation is over.
//! assert_eq!(
//!     policy.decide(OperationStatus::Success, 5, Duration::from_secs(900)),
//!     Reinvoke::No
//! );
//!
//! // Short wait, ample budget: sleep in-process.
//! assert_eq!(
//!     policy.decide(OperationStatus::InProgress, 5, Duration::from_secs(900)),
//!     Reinvoke::Local { delay: Duration::from_secs(5) }
//! );
//!
//! // Long wait: hand off, 900s → 15 minutes.
//! assert_eq!(
//!     policy.decide(OperationStatus::InProgress, 900, Duration::from_secs(900)),
//!     Reinvoke::External { delay_minutes: 15 }
//! );
//! ```

use std::time::Duration;

use crate::progress::OperationStatus;

/// Where the next step of the operation runs, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reinvoke {
    /// Operation is terminal; do not continue.
    No,
    /// Sleep for `delay` in-process, then dispatch again.
    Local {
        /// Exact requested delay.
        delay: Duration,
    },
    /// Register an external trigger and terminate this invocation.
    External {
        /// Requested delay floored to whole minutes; 0 = as soon as possible.
        delay_minutes: u64,
    },
}

/// Budget arithmetic for the local-vs-external decision.
///
/// The constants encode an environment-specific cost/latency tradeoff, so
/// they are configuration rather than code.
#[derive(Clone, Copy, Debug)]
pub struct ReinvokePolicy {
    /// Requested delays at or above this never loop locally.
    pub locality_threshold: Duration,
    /// Budget reserved per requested delay-second.
    pub per_second_margin: Duration,
    /// Budget reserved for the next handler run itself.
    pub invocation_timeout: Duration,
}

impl Default for ReinvokePolicy {
    /// Returns the standard policy:
    /// - `locality_threshold = 60s`;
    /// - `per_second_margin = 1200ms` (20% over the 1s baseline);
    /// - `invocation_timeout = 60s`.
    fn default() -> Self {
        Self {
            locality_threshold: Duration::from_secs(60),
            per_second_margin: Duration::from_millis(1200),
            invocation_timeout: Duration::from_secs(60),
        }
    }
}

impl ReinvokePolicy {
    /// Decides how the operation continues after a step.
    ///
    /// ### Rules
    /// - `status != InProgress` → [`Reinvoke::No`].
    /// - `delay < locality_threshold` **and** `remaining > delay ×
    ///   per_second_margin + invocation_timeout` → [`Reinvoke::Local`] with
    ///   the exact requested delay.
    /// - Otherwise → [`Reinvoke::External`] with the delay floored to whole
    ///   minutes. A sub-minute delay that fails the budget test still
    ///   reschedules externally, at 0 minutes.
    pub fn decide(
        &self,
        status: OperationStatus,
        delay_seconds: u64,
        remaining: Duration,
    ) -> Reinvoke {
        if status != OperationStatus::InProgress {
            return Reinvoke::No;
        }

        let delay = Duration::from_secs(delay_seconds);
        let needed = self
            .per_second_margin
            .saturating_mul(delay_seconds.min(u32::MAX as u64) as u32)
            .saturating_add(self.invocation_timeout);

        if delay < self.locality_threshold && remaining > needed {
            Reinvoke::Local { delay }
        } else {
            Reinvoke::External {
                delay_minutes: delay_seconds / 60,
            }
        }
    }
}
