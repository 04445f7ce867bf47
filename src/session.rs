//! # Authenticated session capability.
//!
//! [`Session`] bundles the caller credentials with the target region into an
//! immutable, read-only capability. It is constructed once per invocation
//! from the inbound payload and passed to handlers by reference; handlers use
//! it to build whatever downstream clients they need. The engine itself never
//! calls through it.

use crate::payload::Credentials;

/// Immutable credential/region capability handed to handlers.
#[derive(Clone, Debug)]
pub struct Session {
    credentials: Credentials,
    region: String,
}

impl Session {
    /// Creates a session from inbound credentials and a region.
    pub fn new(credentials: Credentials, region: impl Into<String>) -> Self {
        Self {
            credentials,
            region: region.into(),
        }
    }

    /// Credentials this session acts with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Region this session targets.
    pub fn region(&self) -> &str {
        &self.region
    }
}
