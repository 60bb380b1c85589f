//! Login sync pipeline
//!
//! Orchestrates one reconciliation run: resolve the login, expand the
//! filter, search the directory, extract candidates, compute the delta,
//! and (optionally) apply it to the identity store.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::extract::extract_identities;
use crate::filter::expand_filter;
use crate::identity::{ReconciliationResult, SyncSummary};
use crate::login::resolve_login;
use crate::reconcile::reconcile;
use crate::traits::{DirectorySearch, IdentityStore};

/// One-shot sync pipeline triggered by a login event.
///
/// Holds no state across runs; every call to [`plan`](Self::plan) or
/// [`run`](Self::run) builds a fresh login context, candidate list, and
/// delta.
pub struct LoginSync {
    config: SyncConfig,
    directory: Arc<dyn DirectorySearch>,
    store: Arc<dyn IdentityStore>,
}

impl std::fmt::Debug for LoginSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginSync")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LoginSync {
    /// Create a pipeline over the given boundaries.
    ///
    /// Validates the configuration and normalizes attribute names.
    pub fn new(
        config: SyncConfig,
        directory: Arc<dyn DirectorySearch>,
        store: Arc<dyn IdentityStore>,
    ) -> SyncResult<Self> {
        config.validate()?;
        let config = SyncConfig {
            directory: config.directory.normalized(),
            ..config
        };
        Ok(Self {
            config,
            directory,
            store,
        })
    }

    /// Compute the reconciliation delta for a login without touching the
    /// store's contents.
    ///
    /// Directory errors propagate and leave the store unread; an empty
    /// directory result short-circuits to a no-op delta so previously
    /// synced identities survive transient empty lookups.
    #[instrument(skip(self), fields(login = %raw_login))]
    pub async fn plan(&self, raw_login: &str) -> SyncResult<ReconciliationResult> {
        let ctx = resolve_login(raw_login, &self.config.mail);
        let filter = expand_filter(&self.config.directory.filter, &ctx);
        debug!(local = %ctx.local, domain = %ctx.domain, filter = %filter, "Resolved login");

        let entries = self
            .directory
            .search(
                &self.config.directory.base_dn,
                &filter,
                &self.config.directory.requested_attributes(),
            )
            .await?;

        let candidates = extract_identities(&entries, &self.config.directory, &self.config.mail);
        if candidates.is_empty() {
            info!(entries = entries.len(), "No candidate identities, leaving store untouched");
            return Ok(ReconciliationResult::empty());
        }

        let existing = self.store.list().await?;
        let result = reconcile(&candidates, &existing);

        info!(
            candidates = candidates.len(),
            existing = existing.len(),
            to_insert = result.to_insert.len(),
            to_delete = result.to_delete.len(),
            "Computed reconciliation delta"
        );

        Ok(result)
    }

    /// Compute the delta for a login and apply it to the store.
    ///
    /// Applies all inserts, then all deletes. A failure on one item is
    /// logged and counted but never aborts the remaining items; a later
    /// run converges the remainder.
    #[instrument(skip(self), fields(login = %raw_login))]
    pub async fn run(&self, raw_login: &str) -> SyncResult<SyncSummary> {
        let delta = self.plan(raw_login).await?;
        let mut summary = SyncSummary::default();

        for record in &delta.to_insert {
            match self.store.insert(record).await {
                Ok(id) => {
                    info!(email = %record.email, id = %id, "Added identity");
                    summary.inserted += 1;
                }
                Err(err) => {
                    warn!(email = %record.email, error = %err, "Failed to insert identity");
                    summary.insert_failures += 1;
                }
            }
        }

        for id in &delta.to_delete {
            match self.store.delete(id).await {
                Ok(()) => {
                    info!(id = %id, "Removed identity");
                    summary.deleted += 1;
                }
                Err(err) => {
                    warn!(id = %id, error = %err, "Failed to delete identity");
                    summary.delete_failures += 1;
                }
            }
        }

        Ok(summary)
    }

    /// The validated, normalized configuration this pipeline runs with.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }
}
