//! Invocation engine: the control loop and its construction.
//!
//! This module contains the embedded implementation of the provisor runtime.
//! The public API is [`Engine`] (built via [`EngineBuilder`]), which drives
//! one full process invocation from inbound payload to outbound response,
//! looping zero or more times internally.
//!
//! Internal modules:
//! - [`executor`]: the loop — dispatch, metrics, progress reports, the
//!   reinvocation decision, and the three-tier error boundary;
//! - [`builder`]: wires the handler and collaborators into an engine.

mod builder;
mod executor;

pub use builder::EngineBuilder;
pub use executor::Engine;
