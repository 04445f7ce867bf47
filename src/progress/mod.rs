//! Progress reporting: operation status and per-iteration progress events.
//!
//! This module groups the **data model** for the progress/error state machine
//! driven by the invocation engine.
//!
//! ## Contents
//! - [`OperationStatus`] — operation state classification
//! - [`ProgressEvent`] — immutable outcome of one invocation step
//!
//! ## Quick reference
//! - **Producers**: resource handlers (one event per dispatch), the error
//!   taxonomy (`HandlerError::to_progress_event`).
//! - **Consumers**: the invocation engine (reinvocation decision, progress
//!   sink reports, final response construction).

mod event;

pub use event::{OperationStatus, ProgressEvent};
