//! Sync configuration
//!
//! Configuration consumed by the reconciliation pipeline. The host loads
//! these however it likes; the core only validates and reads them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{SyncError, SyncResult};

/// Options controlling how the login string resolves to a search identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailOptions {
    /// Domain to use when the login carries none (or when replaced).
    #[serde(default)]
    pub search_domain: String,

    /// Override the login's own domain part with `search_domain`.
    #[serde(default)]
    pub replace_domain: bool,

    /// Domain appended to bare local-part mail values found in the
    /// directory (e.g. `sales` becomes `sales@example.com`). Mail values
    /// without a domain are dropped when this is empty.
    #[serde(default)]
    pub find_domain: String,

    /// Impersonation separator (e.g. the Dovecot master-user `*`). When a
    /// login reads `realuser<sep>masteruser`, only the part before the
    /// first separator is the real identity. Empty disables the feature.
    #[serde(default)]
    pub impersonation_separator: String,
}

/// Options controlling the directory search and attribute mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryOptions {
    /// Search base DN (e.g. "ou=users,dc=example,dc=com").
    pub base_dn: String,

    /// Search filter template. Placeholders: `%login`, `%local`,
    /// `%domain`, `%email`.
    pub filter: String,

    /// Attribute holding the identity email addresses (multi-valued).
    pub mail_attr: String,

    /// Attribute holding the display name. Empty means "do not populate".
    #[serde(default)]
    pub name_attr: String,

    /// Attribute holding the organization. Empty means "do not populate".
    #[serde(default)]
    pub org_attr: String,

    /// Attribute holding the reply-to address. Empty means "do not populate".
    #[serde(default)]
    pub reply_attr: String,

    /// Attribute holding the bcc address. Empty means "do not populate".
    #[serde(default)]
    pub bcc_attr: String,

    /// Attribute holding the signature. Empty means "do not populate".
    #[serde(default)]
    pub sig_attr: String,

    /// Mail domains whose addresses are silently skipped.
    #[serde(default)]
    pub ignored_domains: BTreeSet<String>,
}

impl DirectoryOptions {
    /// Create directory options with the required fields.
    pub fn new(
        base_dn: impl Into<String>,
        filter: impl Into<String>,
        mail_attr: impl Into<String>,
    ) -> Self {
        Self {
            base_dn: base_dn.into(),
            filter: filter.into(),
            mail_attr: mail_attr.into(),
            name_attr: String::new(),
            org_attr: String::new(),
            reply_attr: String::new(),
            bcc_attr: String::new(),
            sig_attr: String::new(),
            ignored_domains: BTreeSet::new(),
        }
    }

    /// Set the display name attribute.
    pub fn with_name_attr(mut self, attr: impl Into<String>) -> Self {
        self.name_attr = attr.into();
        self
    }

    /// Set the organization attribute.
    pub fn with_org_attr(mut self, attr: impl Into<String>) -> Self {
        self.org_attr = attr.into();
        self
    }

    /// Set the reply-to attribute.
    pub fn with_reply_attr(mut self, attr: impl Into<String>) -> Self {
        self.reply_attr = attr.into();
        self
    }

    /// Set the bcc attribute.
    pub fn with_bcc_attr(mut self, attr: impl Into<String>) -> Self {
        self.bcc_attr = attr.into();
        self
    }

    /// Set the signature attribute.
    pub fn with_sig_attr(mut self, attr: impl Into<String>) -> Self {
        self.sig_attr = attr.into();
        self
    }

    /// Add a domain whose addresses are skipped during extraction.
    pub fn ignore_domain(mut self, domain: impl Into<String>) -> Self {
        self.ignored_domains.insert(domain.into());
        self
    }

    /// Lower-case all attribute names. LDAP attribute names are
    /// case-insensitive (RFC 4512); normalizing up front keeps lookups and
    /// request lists consistent regardless of how the host spelled them.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.mail_attr = self.mail_attr.to_lowercase();
        self.name_attr = self.name_attr.to_lowercase();
        self.org_attr = self.org_attr.to_lowercase();
        self.reply_attr = self.reply_attr.to_lowercase();
        self.bcc_attr = self.bcc_attr.to_lowercase();
        self.sig_attr = self.sig_attr.to_lowercase();
        self
    }

    /// The configured (non-empty) attribute names to request from the
    /// directory.
    pub fn requested_attributes(&self) -> Vec<String> {
        [
            &self.mail_attr,
            &self.name_attr,
            &self.org_attr,
            &self.reply_attr,
            &self.bcc_attr,
            &self.sig_attr,
        ]
        .into_iter()
        .filter(|attr| !attr.is_empty())
        .cloned()
        .collect()
    }

    /// Validate the options.
    pub fn validate(&self) -> SyncResult<()> {
        if self.base_dn.is_empty() {
            return Err(SyncError::invalid_configuration("base_dn is required"));
        }
        if self.filter.is_empty() {
            return Err(SyncError::invalid_configuration("filter is required"));
        }
        if self.mail_attr.is_empty() {
            return Err(SyncError::invalid_configuration("mail_attr is required"));
        }
        Ok(())
    }
}

/// Complete configuration for one sync pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Login resolution options.
    #[serde(default)]
    pub mail: MailOptions,

    /// Directory search and attribute mapping options.
    pub directory: DirectoryOptions,
}

impl SyncConfig {
    /// Create a config from its parts.
    pub fn new(mail: MailOptions, directory: DirectoryOptions) -> Self {
        Self { mail, directory }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        self.directory.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> DirectoryOptions {
        DirectoryOptions::new("ou=users,dc=example,dc=com", "(uid=%local)", "mail")
    }

    #[test]
    fn test_directory_options_builders() {
        let opts = options()
            .with_name_attr("cn")
            .with_org_attr("o")
            .ignore_domain("other.org");

        assert_eq!(opts.name_attr, "cn");
        assert_eq!(opts.org_attr, "o");
        assert!(opts.ignored_domains.contains("other.org"));
    }

    #[test]
    fn test_requested_attributes_skips_empty() {
        let opts = options().with_name_attr("cn").with_sig_attr("signature");
        assert_eq!(opts.requested_attributes(), vec!["mail", "cn", "signature"]);
    }

    #[test]
    fn test_normalized_lowercases_attribute_names() {
        let mut opts = options().with_name_attr("displayName");
        opts.mail_attr = "proxyAddresses".to_string();

        let opts = opts.normalized();
        assert_eq!(opts.mail_attr, "proxyaddresses");
        assert_eq!(opts.name_attr, "displayname");
    }

    #[test]
    fn test_validation() {
        assert!(options().validate().is_ok());

        let mut missing_base = options();
        missing_base.base_dn = String::new();
        assert!(missing_base.validate().is_err());

        let mut missing_filter = options();
        missing_filter.filter = String::new();
        assert!(missing_filter.validate().is_err());

        let mut missing_mail = options();
        missing_mail.mail_attr = String::new();
        assert!(missing_mail.validate().is_err());
    }

    #[test]
    fn test_sync_config_serialization() {
        let config = SyncConfig::new(
            MailOptions {
                search_domain: "example.com".to_string(),
                impersonation_separator: "*".to_string(),
                ..MailOptions::default()
            },
            options().with_name_attr("cn"),
        );

        let json = serde_json::to_string(&config).unwrap();
        let parsed: SyncConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.mail.search_domain, "example.com");
        assert_eq!(parsed.mail.impersonation_separator, "*");
        assert!(!parsed.mail.replace_domain);
        assert_eq!(parsed.directory.name_attr, "cn");
    }

    #[test]
    fn test_mail_options_default() {
        let json = r#"{"directory":{"base_dn":"dc=x","filter":"(uid=%local)","mail_attr":"mail"}}"#;
        let parsed: SyncConfig = serde_json::from_str(json).unwrap();

        assert!(parsed.mail.search_domain.is_empty());
        assert!(!parsed.mail.replace_domain);
        assert!(parsed.directory.ignored_domains.is_empty());
    }
}
