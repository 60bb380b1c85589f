//! Identity records and reconciliation outputs.

use serde::{Deserialize, Serialize};

use crate::ids::IdentityId;

/// A candidate mail identity extracted from the directory.
///
/// Two records are the same identity iff their `email` values are equal
/// (exact string match, no normalization). Empty string is the canonical
/// "absent" value for every field except `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Sender address. Non-empty and always contains `@`.
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Organization.
    #[serde(default)]
    pub organization: String,
    /// Reply-to address.
    #[serde(default)]
    pub reply_to: String,
    /// Blind carbon copy address.
    #[serde(default)]
    pub bcc: String,
    /// Signature text.
    #[serde(default)]
    pub signature: String,
    /// Whether the signature is HTML rather than plain text.
    #[serde(default)]
    pub html_signature: bool,
}

impl IdentityRecord {
    /// Create a record with only the email set.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: String::new(),
            organization: String::new(),
            reply_to: String::new(),
            bcc: String::new(),
            signature: String::new(),
            html_signature: false,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the organization.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Set the signature and its HTML flag.
    pub fn with_signature(mut self, signature: impl Into<String>, html: bool) -> Self {
        self.signature = signature.into();
        self.html_signature = html;
        self
    }
}

/// An identity already present in the host's identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingIdentity {
    /// The store's opaque handle for this identity.
    pub id: IdentityId,
    /// Sender address, compared exactly against candidate emails.
    pub email: String,
}

impl ExistingIdentity {
    /// Create an existing identity.
    pub fn new(id: impl Into<IdentityId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// The delta transforming the store's state into the directory-derived
/// target state. The two sets are disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Candidates absent from the store, deduplicated by email.
    pub to_insert: Vec<IdentityRecord>,
    /// Store handles of identities absent from the candidates.
    pub to_delete: Vec<IdentityId>,
}

impl ReconciliationResult {
    /// Create an empty (no-op) result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether applying this result would change nothing.
    pub fn is_noop(&self) -> bool {
        self.to_insert.is_empty() && self.to_delete.is_empty()
    }
}

/// Outcome of applying a [`ReconciliationResult`] to the identity store.
///
/// Store write failures are per-item: a failed insert or delete is counted
/// and logged, and the remaining items are still applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    /// Identities inserted into the store.
    pub inserted: usize,
    /// Identities deleted from the store.
    pub deleted: usize,
    /// Insert calls that failed.
    pub insert_failures: usize,
    /// Delete calls that failed.
    pub delete_failures: usize,
}

impl SyncSummary {
    /// Check whether every item of the delta was applied.
    pub fn is_complete(&self) -> bool {
        self.insert_failures == 0 && self.delete_failures == 0
    }
}
