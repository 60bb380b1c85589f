//! Login resolution
//!
//! Turns the raw login string into the canonical search identity used for
//! filter expansion.

use serde::{Deserialize, Serialize};

use crate::config::MailOptions;

/// The resolved search identity for one sync run.
///
/// Invariant: `email` equals `"{local}@{domain}"` whenever `domain` is
/// non-empty, and is empty otherwise. Downstream stages must tolerate an
/// empty domain and email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginContext {
    /// Local part of the login, after impersonation stripping.
    pub local: String,
    /// Domain part, possibly substituted from configuration. May be empty.
    pub domain: String,
    /// Composed `local@domain`, or empty when no domain could be resolved.
    pub email: String,
    /// The login string exactly as supplied by the host.
    pub raw: String,
}

/// Resolve a raw login string into a [`LoginContext`].
///
/// Never fails: a login that resolves to no domain yields an empty `domain`
/// and `email`, which the filter expander substitutes as empty strings.
pub fn resolve_login(raw_login: &str, options: &MailOptions) -> LoginContext {
    let (mut local, domain) = match raw_login.split_once('@') {
        Some((local, domain)) => {
            let domain = if options.replace_domain && !options.search_domain.is_empty() {
                options.search_domain.as_str()
            } else {
                domain
            };
            (local.to_string(), domain.to_string())
        }
        None => {
            // No domain in the login: fall back to the configured search
            // domain, which may itself be empty.
            (raw_login.to_string(), options.search_domain.clone())
        }
    };

    // Master-user impersonation: keep only the real user before the first
    // separator occurrence.
    let separator = &options.impersonation_separator;
    if !separator.is_empty() {
        if let Some(index) = local.find(separator.as_str()) {
            local.truncate(index);
        }
    }

    let email = if domain.is_empty() {
        String::new()
    } else {
        format!("{local}@{domain}")
    };

    LoginContext {
        local,
        domain,
        email,
        raw: raw_login.to_string(),
    }
}
