//! Boundary traits
//!
//! The two external collaborators of the pipeline: the directory that is
//! searched and the identity store the delta is applied to.

use async_trait::async_trait;

use crate::entry::DirectoryEntry;
use crate::error::SyncResult;
use crate::identity::{ExistingIdentity, IdentityRecord};
use crate::ids::IdentityId;

/// A directory that can be searched for identity entries.
///
/// Implementations own connection, bind, and transport concerns. The core
/// only supplies the base scope, an already-expanded filter string, and the
/// attribute names it wants back.
#[async_trait]
pub trait DirectorySearch: Send + Sync {
    /// Run a search and return all matching entries.
    ///
    /// Zero entries is a normal outcome meaning "no matching identity".
    /// Fails with [`SyncError::DirectoryUnavailable`] when the connection
    /// or bind cannot be established and [`SyncError::QueryError`] when the
    /// search itself is rejected.
    ///
    /// [`SyncError::DirectoryUnavailable`]: crate::error::SyncError::DirectoryUnavailable
    /// [`SyncError::QueryError`]: crate::error::SyncError::QueryError
    async fn search(
        &self,
        base_dn: &str,
        filter: &str,
        attributes: &[String],
    ) -> SyncResult<Vec<DirectoryEntry>>;
}

/// The host application's identity store.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// List the identities currently in the store.
    async fn list(&self) -> SyncResult<Vec<ExistingIdentity>>;

    /// Insert a new identity, returning the store's handle for it.
    async fn insert(&self, identity: &IdentityRecord) -> SyncResult<IdentityId>;

    /// Delete the identity with the given handle.
    async fn delete(&self, id: &IdentityId) -> SyncResult<()>;
}
