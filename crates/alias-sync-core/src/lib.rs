//! # alias-sync-core
//!
//! Login-time reconciliation of mail identities against a directory
//! service. One login event triggers one run of the pipeline:
//!
//! 1. [`login::resolve_login`] - derive the canonical search identity from
//!    the raw login string
//! 2. [`filter::expand_filter`] - substitute the resolved fields into the
//!    configured filter template
//! 3. [`traits::DirectorySearch`] - execute the search (implemented by the
//!    `alias-sync-ldap` crate or a host-supplied backend)
//! 4. [`extract::extract_identities`] - map multi-valued directory entries
//!    to candidate identity records
//! 5. [`reconcile::reconcile`] - compute the insert/delete delta against
//!    the host's identity store, keyed by email
//!
//! [`pipeline::LoginSync`] ties the stages together; the host's adapter
//! calls [`pipeline::LoginSync::run`] once per login and applies nothing
//! else. The directory is authoritative: identities in the store that the
//! directory no longer returns are deleted, except when the directory
//! returns no candidates at all, which is treated as a no-op.
//!
//! ## Crate Organization
//!
//! - [`ids`] - the store's opaque identity handle
//! - [`error`] - error types with transient/permanent classification
//! - [`config`] - mail and directory options
//! - [`login`] - login resolution
//! - [`filter`] - filter template expansion
//! - [`entry`] - case-insensitive multi-valued directory entries
//! - [`identity`] - identity records and delta/summary types
//! - [`extract`] - candidate extraction
//! - [`reconcile`] - delta computation
//! - [`traits`] - directory and store boundary traits
//! - [`pipeline`] - orchestration

pub mod config;
pub mod entry;
pub mod error;
pub mod extract;
pub mod filter;
pub mod identity;
pub mod ids;
pub mod login;
pub mod pipeline;
pub mod reconcile;
pub mod traits;

/// Prelude module for convenient imports.
///
/// ```
/// use alias_sync_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{DirectoryOptions, MailOptions, SyncConfig};
    pub use crate::entry::DirectoryEntry;
    pub use crate::error::{SyncError, SyncResult};
    pub use crate::extract::extract_identities;
    pub use crate::filter::expand_filter;
    pub use crate::identity::{
        ExistingIdentity, IdentityRecord, ReconciliationResult, SyncSummary,
    };
    pub use crate::ids::IdentityId;
    pub use crate::login::{resolve_login, LoginContext};
    pub use crate::pipeline::LoginSync;
    pub use crate::reconcile::reconcile;
    pub use crate::traits::{DirectorySearch, IdentityStore};
}

// Re-export async_trait for boundary implementors
pub use async_trait::async_trait;
