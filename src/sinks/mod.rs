//! # External collaborator seams.
//!
//! The engine talks to its environment exclusively through the traits in
//! this module; implementations live with the embedder. Wire formats,
//! metric schemas and log transports are deliberately behind these seams —
//! swapping them does not affect the control loop.
//!
//! ## Architecture
//! ```text
//! Engine loop
//!   ├── ProgressSink::report .......... operation status of record
//!   ├── RescheduleService::reschedule . future re-invocation trigger
//!   │                    ::cleanup_trigger
//!   ├── MetricsProxy ──► MetricsSink #1 (platform)
//!   │                └─► MetricsSink #2 (provider, optional)
//!   └── LogRelay::attach .............. provider log forwarding
//! ```
//!
//! ## Rules
//! - `ProgressSink` and `RescheduleService` failures terminate the loop and
//!   surface as `InternalFailure` — the orchestrator must learn the
//!   operation could not proceed.
//! - `MetricsSink` failures are logged and swallowed by the proxy; telemetry
//!   never fails an operation.

mod log_relay;
mod metrics;
mod progress;
mod reschedule;

pub use log_relay::{LogRelay, NullLogRelay};
pub use metrics::{MetricsProxy, MetricsSink};
pub use progress::{ProgressSink, StatusReport};
pub use reschedule::RescheduleService;
