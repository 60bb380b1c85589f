//! ID types
//!
//! Newtype wrapper for the identity store's opaque handle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle of an identity in the host's identity store.
///
/// The store decides the format: a database row id, an LDAP DN, a UUID.
/// The core only carries it between `list` and `delete`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(String);

impl IdentityId {
    /// Create an id from the store's handle value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the handle value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IdentityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for IdentityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
