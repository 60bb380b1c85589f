//! LDAP directory adapter for the alias-sync reconciliation core.
//!
//! Provides [`LdapDirectory`], an implementation of the core's
//! [`DirectorySearch`](alias_sync_core::traits::DirectorySearch) boundary
//! backed by the `ldap3` async client, plus connection configuration and
//! filter-value escaping helpers.
//!
//! ```no_run
//! use std::sync::Arc;
//! use alias_sync_ldap::{LdapConfig, LdapDirectory};
//!
//! # fn demo() -> alias_sync_core::error::SyncResult<()> {
//! let config = LdapConfig::new("ldap.example.com")
//!     .with_bind("cn=reader,dc=example,dc=com", "secret");
//! let directory = Arc::new(LdapDirectory::new(config)?);
//! # let _ = directory;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod escape;

pub use client::LdapDirectory;
pub use config::LdapConfig;
pub use escape::escape_filter_value;
