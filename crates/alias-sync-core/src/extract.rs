//! Identity extraction
//!
//! Maps directory entries to candidate identity records, applying domain
//! completion and domain-ignore filtering to every mail value.

use tracing::{debug, warn};

use crate::config::{DirectoryOptions, MailOptions};
use crate::entry::DirectoryEntry;
use crate::identity::IdentityRecord;

/// Extract candidate identities from a directory search result.
///
/// Each entry contributes one candidate per surviving value of the mail
/// attribute, all sharing the entry's scalar fields. A mail value with no
/// domain is completed with `find_domain` when configured, dropped
/// otherwise; values in an ignored domain are skipped. Candidates are
/// emitted in entry order, then mail-value order, without deduplication.
pub fn extract_identities(
    entries: &[DirectoryEntry],
    directory: &DirectoryOptions,
    mail: &MailOptions,
) -> Vec<IdentityRecord> {
    let mut candidates = Vec::new();

    for entry in entries {
        let name = scalar(entry, &directory.name_attr);
        let organization = scalar(entry, &directory.org_attr);
        let reply_to = scalar(entry, &directory.reply_attr);
        let bcc = scalar(entry, &directory.bcc_attr);
        let signature = scalar(entry, &directory.sig_attr);
        let html_signature = looks_like_html(&signature);

        for value in entry.values(&directory.mail_attr) {
            let email = if !value.is_empty() && !value.contains('@') && !mail.find_domain.is_empty()
            {
                format!("{}@{}", value, mail.find_domain)
            } else {
                value.clone()
            };

            let Some((_, domain)) = email.split_once('@') else {
                warn!(mail_value = %value, "Domain missing in mail value, dropping candidate");
                continue;
            };

            if directory.ignored_domains.contains(domain) {
                debug!(email = %email, domain = %domain, "Skipping ignored domain");
                continue;
            }

            candidates.push(IdentityRecord {
                email,
                name: name.clone(),
                organization: organization.clone(),
                reply_to: reply_to.clone(),
                bcc: bcc.clone(),
                signature: signature.clone(),
                html_signature,
            });
        }
    }

    candidates
}

/// First value of a configured scalar attribute, or empty when the
/// attribute is unconfigured or has no values.
fn scalar(entry: &DirectoryEntry, attr: &str) -> String {
    if attr.is_empty() {
        return String::new();
    }
    entry.first(attr).unwrap_or_default().to_string()
}

/// Loose HTML sniff: after leading whitespace, a `<` followed immediately
/// by one or more ASCII letters. Not a validator.
fn looks_like_html(signature: &str) -> bool {
    let trimmed = signature.trim_start();
    let mut chars = trimmed.chars();
    chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}
