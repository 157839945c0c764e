//! Completion suggestions implementation.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::file_position::FilePosition;
use super::text_utils::{identifier_behind_cursor, inside_parentheses};
use crate::hir::SymbolView;
use crate::syntax::strip_at_prefix;

/// Keywords offered alongside symbols.
const KEYWORDS: &[&str] = &[
    "break", "case", "const", "continue", "default", "do", "else", "enum", "false", "for",
    "forward", "if", "native", "new", "public", "return", "sizeof", "static", "stock", "switch",
    "tagof", "true", "while",
];

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Keyword,
    Constant,
    Variable,
    Function,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Function => 3,  // Function
            CompletionKind::Variable => 6,  // Variable
            CompletionKind::Keyword => 14,  // Keyword
            CompletionKind::Constant => 21, // Constant
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text shown in the list.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: Option<Arc<str>>) -> Self {
        self.documentation = doc;
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }
}

/// Case-insensitive prefix test against the name and its `@`-less form.
fn matches_prefix(name: &str, prefix: &str) -> bool {
    let starts = |candidate: &str| {
        candidate
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts(name) || starts(strip_at_prefix(name))
}

/// Get completion suggestions at a position.
///
/// The token is the identifier text behind the cursor. Nothing is offered
/// for an empty token or inside a parenthesis group on the current line.
/// Otherwise keywords come first, then constants, values and callables.
pub fn completions(pos: FilePosition<'_>, symbols: &SymbolView) -> Vec<CompletionItem> {
    let chars = pos.chars();
    let offset = pos.offset();
    let token = identifier_behind_cursor(chars, offset);
    if token.is_empty() || inside_parentheses(chars, offset) {
        return Vec::new();
    }

    let mut items = Vec::new();
    items.extend(
        KEYWORDS
            .iter()
            .filter(|kw| matches_prefix(kw, &token))
            .map(|kw| CompletionItem::new(*kw, CompletionKind::Keyword)),
    );
    items.extend(
        symbols
            .constants()
            .iter()
            .filter(|c| matches_prefix(&c.identifier, &token))
            .map(|c| {
                CompletionItem::new(c.identifier.as_str(), CompletionKind::Constant)
                    .with_detail(c.label.as_str())
            }),
    );
    items.extend(
        symbols
            .values()
            .iter()
            .filter(|v| matches_prefix(&v.identifier, &token))
            .map(|v| {
                let kind = if v.is_const {
                    CompletionKind::Constant
                } else {
                    CompletionKind::Variable
                };
                CompletionItem::new(v.identifier.as_str(), kind)
                    .with_detail(v.label.as_str())
                    .with_documentation(v.documentation.clone())
                    .with_insert_text(v.insert_text())
            }),
    );
    items.extend(
        symbols
            .callables()
            .filter(|c| matches_prefix(&c.identifier, &token))
            .map(|c| {
                CompletionItem::new(c.identifier.as_str(), CompletionKind::Function)
                    .with_detail(c.label.as_str())
                    .with_documentation(c.documentation.clone())
                    .with_insert_text(c.insert_text())
            }),
    );

    let mut seen = FxHashSet::default();
    items.retain(|item| seen.insert((item.label.clone(), item.kind)));
    items
}
