//! Directory entries
//!
//! One row of a directory search result: a case-insensitive mapping from
//! attribute name to an ordered list of string values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single entry returned by a directory search.
///
/// Attribute names are lower-cased at insert and lookup, matching LDAP's
/// case-insensitive attribute naming (RFC 4512). An absent attribute and an
/// attribute present with zero values are both "no value".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryEntry {
    #[serde(flatten)]
    attributes: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    /// Create an empty entry.
    pub fn new() -> Self {
        Self {
            attributes: HashMap::new(),
        }
    }

    /// Set all values of an attribute, replacing any previous values.
    pub fn set(&mut self, name: impl AsRef<str>, values: Vec<String>) {
        self.attributes
            .insert(name.as_ref().to_lowercase(), values);
    }

    /// Set an attribute using the builder pattern.
    #[must_use]
    pub fn with(mut self, name: impl AsRef<str>, values: &[&str]) -> Self {
        self.set(name, values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// All values of an attribute, in directory order. Empty when the
    /// attribute is absent or has no values.
    pub fn values(&self, name: &str) -> &[String] {
        self.attributes
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The first value of an attribute, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// Check whether the attribute has at least one value.
    pub fn has(&self, name: &str) -> bool {
        !self.values(name).is_empty()
    }

    /// The attribute names present in this entry (lower-cased).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Check whether the entry has no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for DirectoryEntry {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut entry = Self::new();
        for (name, values) in iter {
            entry.set(name, values);
        }
        entry
    }
}
