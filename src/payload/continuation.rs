//! # Explicit continuation state.
//!
//! [`Continuation`] replaces in-place mutation of a shared request-context
//! structure: each loop iteration returns a new value that is threaded
//! explicitly into the next iteration, so there is no hidden aliasing between
//! the loop, the reinvocation decision, and the reschedule snapshot.
//!
//! ## Rules
//! - [`advance`](Continuation::advance) bumps the invocation counter by
//!   exactly 1 and is called once per continuation, local or external.
//! - The counter is 0 on a fresh operation and strictly increases across the
//!   lifetime of the logical operation (it is persisted through the
//!   externalized request context).

use serde_json::{Map, Value};

use crate::payload::RequestContext;

/// Continuation state for one logical operation, threaded through the
/// invocation loop.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Continuation {
    invocation: u32,
    callback_context: Map<String, Value>,
}

impl Continuation {
    /// Seeds continuation state from a resumed invocation's request context.
    pub fn from_context(ctx: &RequestContext) -> Self {
        Self {
            invocation: ctx.invocation,
            callback_context: ctx.callback_context.clone().unwrap_or_default(),
        }
    }

    /// Number of reinvocations performed so far.
    #[inline]
    pub fn invocation(&self) -> u32 {
        self.invocation
    }

    /// Callback context to hand to the next dispatch.
    #[inline]
    pub fn callback_context(&self) -> &Map<String, Value> {
        &self.callback_context
    }

    /// Returns a new continuation carrying the handler's callback context.
    #[inline]
    pub fn with_callback_context(mut self, ctx: Map<String, Value>) -> Self {
        self.callback_context = ctx;
        self
    }

    /// Returns a new continuation with the invocation counter bumped by 1.
    #[inline]
    pub fn advance(mut self) -> Self {
        self.invocation += 1;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fresh_operation_starts_at_zero() {
        assert_eq!(Continuation::default().invocation(), 0);
        assert!(Continuation::default().callback_context().is_empty());
    }

    #[test]
    fn test_advance_bumps_by_exactly_one() {
        let c = Continuation::default();
        let c = c.advance();
        assert_eq!(c.invocation(), 1);
        let c = c.advance().advance();
        assert_eq!(c.invocation(), 3);
    }

    #[test]
    fn test_seeded_from_resumed_context() {
        let mut callback = Map::new();
        callback.insert("step".into(), json!(4));
        let ctx = RequestContext {
            invocation: 7,
            callback_context: Some(callback.clone()),
            ..RequestContext::default()
        };
        let c = Continuation::from_context(&ctx);
        assert_eq!(c.invocation(), 7);
        assert_eq!(c.callback_context(), &callback);
    }
}
