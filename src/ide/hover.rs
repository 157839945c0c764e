//! Hover information implementation.

use std::sync::Arc;

use super::file_position::FilePosition;
use super::goto::symbol_at_cursor;
use crate::base::{FileId, Span};
use crate::hir::{ResolvedSymbol, SymbolView};

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// Identifier of the hovered symbol.
    pub name: Arc<str>,
    /// File declaring the symbol.
    pub definition_file: FileId,
    /// Range of the hovered text.
    pub span: Span,
}

/// Get hover information at a position.
///
/// Resolution is the same as for go-to-definition, so hovering a symbol on
/// its own declaration line shows nothing.
pub fn hover(pos: FilePosition<'_>, symbols: &SymbolView) -> Option<HoverResult> {
    let found = symbol_at_cursor(pos, symbols)?;
    Some(HoverResult {
        contents: build_hover_content(&found.symbol),
        name: Arc::from(found.symbol.identifier()),
        definition_file: found.symbol.file().clone(),
        span: found.span,
    })
}

/// Fenced `pawn` label, then the documentation below a rule.
fn build_hover_content(symbol: &ResolvedSymbol<'_>) -> String {
    let mut content = format!("```pawn\n{}\n```", symbol.label());
    if let Some(doc) = symbol.documentation().filter(|d| !d.trim().is_empty()) {
        content.push_str("\n---\n\n");
        content.push_str(doc);
    }
    content
}
