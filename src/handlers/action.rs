//! # Lifecycle actions.
//!
//! [`Action`] enumerates the five resource lifecycle operations. `Create`,
//! `Update` and `Delete` are *mutating*: they may run asynchronously across
//! invocations and have their progress reported to the orchestrator. `Read`
//! and `List` must complete within a single invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One resource lifecycle operation.
///
/// Deserialized from the payload's SCREAMING_CASE names (`"CREATE"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Provision a new resource.
    Create,
    /// Fetch the current state of one resource (synchronous only).
    Read,
    /// Apply a state change to an existing resource.
    Update,
    /// Remove an existing resource.
    Delete,
    /// Enumerate resources of this type (synchronous only).
    List,
}

impl Action {
    /// Returns `true` for actions that may run asynchronously across
    /// invocations (`Create`, `Update`, `Delete`).
    ///
    /// Only mutating actions report progress to the progress sink; only they
    /// may return an IN_PROGRESS event.
    #[inline]
    pub fn is_mutating(&self) -> bool {
        matches!(self, Action::Create | Action::Update | Action::Delete)
    }

    /// Returns the action's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
            Action::List => "LIST",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
