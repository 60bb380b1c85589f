//! LDAP directory client
//!
//! Implements the [`DirectorySearch`] boundary over a real LDAP server
//! using the `ldap3` async client.

use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use alias_sync_core::entry::DirectoryEntry;
use alias_sync_core::error::{SyncError, SyncResult};
use alias_sync_core::traits::DirectorySearch;

use crate::config::LdapConfig;

/// LDAP-backed implementation of [`DirectorySearch`].
///
/// The connection is established lazily on first use and reused across
/// searches until [`dispose`](Self::dispose) is called.
pub struct LdapDirectory {
    config: LdapConfig,

    /// Cached LDAP connection (lazily initialized).
    connection: Arc<RwLock<Option<Ldap>>>,

    /// Whether the client has been disposed.
    disposed: Arc<RwLock<bool>>,
}

impl LdapDirectory {
    /// Create a directory client with the given configuration.
    pub fn new(config: LdapConfig) -> SyncResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            connection: Arc::new(RwLock::new(None)),
            disposed: Arc::new(RwLock::new(false)),
        })
    }

    /// Get an LDAP connection, creating one if necessary.
    async fn get_connection(&self) -> SyncResult<Ldap> {
        if *self.disposed.read().await {
            return Err(SyncError::directory_unavailable(
                "LDAP client has been disposed",
            ));
        }

        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let conn = self.create_connection().await?;

        {
            let mut conn_guard = self.connection.write().await;
            *conn_guard = Some(conn.clone());
        }

        Ok(conn)
    }

    /// Create a new LDAP connection and bind.
    async fn create_connection(&self) -> SyncResult<Ldap> {
        let url = self.config.url();

        debug!(url = %url, "Connecting to LDAP server");

        let settings = LdapConnSettings::new()
            .set_conn_timeout(std::time::Duration::from_secs(
                self.config.connect_timeout_secs,
            ))
            .set_starttls(self.config.use_starttls);

        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &url)
            .await
            .map_err(|e| {
                SyncError::directory_unavailable_with_source(
                    format!("Failed to connect to LDAP server at {url}"),
                    e,
                )
            })?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "LDAP connection driver error");
            }
        });

        if self.config.bind_dn.is_empty() {
            debug!("Using anonymous bind");
        } else {
            let bind_dn = &self.config.bind_dn;
            let bind_password = self.config.bind_password.as_deref().unwrap_or("");

            debug!(bind_dn = %bind_dn, "Performing LDAP bind");

            let result = ldap.simple_bind(bind_dn, bind_password).await.map_err(|e| {
                SyncError::directory_unavailable_with_source(
                    format!("LDAP bind failed for {bind_dn}"),
                    e,
                )
            })?;

            if result.rc != 0 {
                // 49 is invalidCredentials
                if result.rc == 49 {
                    return Err(SyncError::directory_unavailable(format!(
                        "LDAP bind rejected for {bind_dn}: invalid credentials"
                    )));
                }
                return Err(SyncError::directory_unavailable(format!(
                    "LDAP bind failed with code {}: {}",
                    result.rc, result.text
                )));
            }
        }

        info!(host = %self.config.host, "LDAP connection established");

        Ok(ldap)
    }

    /// Convert a raw search entry into a [`DirectoryEntry`].
    ///
    /// Binary-valued attributes are dropped; identity fields are text.
    fn convert_entry(entry: SearchEntry) -> DirectoryEntry {
        entry.attrs.into_iter().collect()
    }

    /// Verify connectivity by reading the root DSE.
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> SyncResult<()> {
        let mut ldap = self.get_connection().await?;

        let result = ldap
            .search("", Scope::Base, "(objectClass=*)", vec!["namingContexts"])
            .await
            .map_err(|e| {
                SyncError::directory_unavailable_with_source("Root DSE read failed", e)
            })?;

        result.success().map_err(|e| {
            SyncError::directory_unavailable(format!("Root DSE read failed: {e:?}"))
        })?;

        info!("LDAP connection test successful");
        Ok(())
    }

    /// Close the connection and mark the client unusable.
    pub async fn dispose(&self) -> SyncResult<()> {
        *self.disposed.write().await = true;

        let mut conn_guard = self.connection.write().await;
        if let Some(mut ldap) = conn_guard.take() {
            if let Err(e) = ldap.unbind().await {
                warn!(error = %e, "Error during LDAP unbind");
            }
        }

        info!("LDAP client disposed");
        Ok(())
    }
}

#[async_trait]
impl DirectorySearch for LdapDirectory {
    #[instrument(skip(self, attributes), fields(base_dn = %base_dn, filter = %filter))]
    async fn search(
        &self,
        base_dn: &str,
        filter: &str,
        attributes: &[String],
    ) -> SyncResult<Vec<DirectoryEntry>> {
        let mut ldap = self.get_connection().await?;

        debug!(attributes = ?attributes, "Searching LDAP");

        let result = ldap
            .search(base_dn, Scope::Subtree, filter, attributes.to_vec())
            .await
            .map_err(|e| SyncError::query_with_source("LDAP search failed", e))?;

        let (entries, _) = result
            .success()
            .map_err(|e| SyncError::query(format!("LDAP search failed: {e:?}")))?;

        let entries: Vec<DirectoryEntry> = entries
            .into_iter()
            .map(SearchEntry::construct)
            .map(Self::convert_entry)
            .collect();

        info!(entries = entries.len(), "LDAP search completed");

        Ok(entries)
    }
}

impl std::fmt::Debug for LdapDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LdapDirectory")
            .field("config", &self.config.redacted())
            .finish()
    }
}
