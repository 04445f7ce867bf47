//! # Provider log forwarding setup.
//!
//! [`LogRelay::attach`] runs once per invocation, before payload parsing,
//! and gives the embedder a hook to wire handler log output to its transport
//! of choice. The transport itself is out of scope; [`NullLogRelay`] is the
//! default.

use async_trait::async_trait;
use serde_json::Value;

/// Hook to set up log forwarding for one invocation.
#[async_trait]
pub trait LogRelay: Send + Sync + 'static {
    /// Inspects the raw inbound payload and attaches whatever forwarding the
    /// implementation provides. Infallible: a relay that cannot attach
    /// should log locally and return.
    async fn attach(&self, payload: &Value);
}

/// Log relay that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLogRelay;

#[async_trait]
impl LogRelay for NullLogRelay {
    async fn attach(&self, _payload: &Value) {}
}
