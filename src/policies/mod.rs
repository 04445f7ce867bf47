//! Reinvocation policy.
//!
//! This module groups the knobs that control **whether** an operation
//! continues and **where** the next step runs.
//!
//! ## Contents
//! - [`ReinvokePolicy`] — budget arithmetic for local-vs-external continuation
//! - [`Reinvoke`] — the decision: none / local sleep / external reschedule
//!
//! ## Quick wiring
//! ```text
//! EngineConfig { reinvoke: ReinvokePolicy }
//!      └─► engine loop calls reinvoke.decide(status, delay, remaining):
//!           - No       → exit loop, build response
//!           - Local    → cancellable sleep(delay), repeat
//!           - External → RescheduleService::reschedule(minutes), exit
//! ```

mod reinvoke;

pub use reinvoke::{Reinvoke, ReinvokePolicy};
