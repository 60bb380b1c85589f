//! LDAP filter value escaping (RFC 4515).

/// Escape special characters in an LDAP filter value.
///
/// Hosts expanding login-derived values into a filter template should run
/// each value through this before substitution to prevent filter injection.
#[must_use]
pub fn escape_filter_value(value: &str) -> String {
    value
        .replace('\\', "\\5c")
        .replace('*', "\\2a")
        .replace('(', "\\28")
        .replace(')', "\\29")
        .replace('\0', "\\00")
}
