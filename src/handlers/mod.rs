//! # Resource handlers and dispatch.
//!
//! This module provides the handler-facing types:
//! - [`Action`] — the five lifecycle operations
//! - [`ResourceHandler`] — trait with one capability per action
//! - [`dispatch`] — exhaustive action switch plus contract enforcement
//!
//! ## Architecture
//! ```text
//! Engine loop ──► dispatch(handler, action, ...)
//!                    │
//!                    ├─ Create ──► handler.create(...)   (mutating)
//!                    ├─ Read ────► handler.read(...)     (synchronous only)
//!                    ├─ Update ──► handler.update(...)   (mutating)
//!                    ├─ Delete ──► handler.delete(...)   (mutating)
//!                    └─ List ────► handler.list(...)     (synchronous only)
//!                    │
//!                    └─► enforce: non-mutating action + IN_PROGRESS result
//!                        = contract violation (InternalFailure error)
//! ```

mod action;
mod dispatch;
mod handler;

pub use action::Action;
pub use dispatch::dispatch;
pub use handler::ResourceHandler;
