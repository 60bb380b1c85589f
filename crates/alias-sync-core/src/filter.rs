//! Filter template expansion
//!
//! Substitutes resolved login fields into the configured directory filter
//! template.

use crate::login::LoginContext;

const PLACEHOLDERS: [&str; 4] = ["%login", "%local", "%domain", "%email"];

/// Expand the filter template with the resolved login fields.
///
/// Placeholders `%login`, `%local`, `%domain` and `%email` are replaced with
/// the corresponding [`LoginContext`] field. Substitution is a single
/// left-to-right pass: a placeholder-like substring inside a substituted
/// value is inserted verbatim and never re-expanded. There is no escaping
/// mechanism; the output is handed opaquely to the directory boundary.
pub fn expand_filter(template: &str, ctx: &LoginContext) -> String {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(percent) = rest.find('%') {
        expanded.push_str(&rest[..percent]);
        rest = &rest[percent..];

        match PLACEHOLDERS.iter().find(|p| rest.starts_with(**p)) {
            Some(placeholder) => {
                expanded.push_str(match *placeholder {
                    "%login" => &ctx.raw,
                    "%local" => &ctx.local,
                    "%domain" => &ctx.domain,
                    _ => &ctx.email,
                });
                rest = &rest[placeholder.len()..];
            }
            None => {
                expanded.push('%');
                rest = &rest[1..];
            }
        }
    }

    expanded.push_str(rest);
    expanded
}
