//! Identifier spelling rules.
//!
//! Pawn identifiers may carry a tag (`Float:origin`, skipped by the
//! declaration matcher) and an optional `@`
//! disambiguation prefix (`@TaskHandler`). Symbol comparison is
//! case-insensitive throughout the analyzer.

use smol_str::SmolStr;

/// Check if a character can start a Pawn identifier.
///
/// Uses Unicode Standard Annex #31 start characters plus `_` and the `@`
/// prefix. The lexer's identifier pattern uses the same classes.
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    unicode_ident::is_xid_start(c) || c == '_' || c == '@'
}

/// Check if a character can be part of a Pawn identifier.
#[inline]
pub fn is_identifier_char(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || c == '@'
}

/// Drop a leading `@`, if any.
pub fn strip_at_prefix(name: &str) -> &str {
    name.strip_prefix('@').unwrap_or(name)
}

/// The alternate spelling of `name`: with `@` removed if present, added otherwise.
pub fn toggle_at_prefix(name: &str) -> String {
    match name.strip_prefix('@') {
        Some(rest) => rest.to_string(),
        None => format!("@{name}"),
    }
}

/// Normalized key used for case-insensitive identifier comparison.
pub fn identifier_key(name: &str) -> SmolStr {
    SmolStr::from(name.to_ascii_lowercase())
}
