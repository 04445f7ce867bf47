//! # Inbound and outbound payloads.
//!
//! This module owns everything that crosses the serialization boundary:
//!
//! - [`HandlerRequest`] — full inbound payload (action, resource state,
//!   credentials, request context, time-budget-bearing environment fields
//!   live on [`Environment`](crate::Environment) instead)
//! - [`ResourceRequest`] — the modelled view handed to handlers
//! - [`Continuation`] — explicit continuation state threaded through the loop
//! - [`Response`] — outbound payload with fail-closed serialization
//! - [`TestEvent`] — simplified single-shot payload for contract tests
//!
//! ## Lifecycle
//! A `HandlerRequest` is constructed once per process invocation from the
//! deserialized external payload and discarded at the end of it. Continuation
//! state travels externally: the engine embeds the final [`Continuation`]
//! back into the request context before handing the snapshot to the
//! reschedule service, and it is reconstructed on the next invocation.

mod continuation;
mod request;
mod response;
mod test_event;

pub use continuation::Continuation;
pub use request::{Credentials, HandlerRequest, RequestContext, RequestData, ResourceRequest};
pub use response::Response;
pub use test_event::{TestEvent, TestRequest};
