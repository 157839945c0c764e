//! Go-to-definition implementation.

use std::sync::Arc;

use tracing::trace;

use super::file_position::FilePosition;
use super::text_utils::{enclosing_call, identifier_at_cursor, string_at_cursor};
use crate::base::{FileId, Span};
use crate::hir::{ResolvedSymbol, SymbolView};
use crate::syntax::SymbolKind;

/// Functions whose string arguments name a callback function.
pub const CALLBACK_FUNCTIONS: &[&str] = &[
    "set_task",
    "set_task_ex",
    "register_clcmd",
    "register_concmd",
    "register_srvcmd",
    "register_event",
    "register_event_ex",
    "register_logevent",
    "register_forward",
    "register_message",
    "register_menucmd",
    "register_think",
    "register_touch",
    "register_impulse",
    "register_native",
    "RegisterHam",
    "RegisterHamPlayer",
    "RegisterHookChain",
    "menu_create",
    "menu_makecallback",
    "CreateMultiForward",
    "CreateOneForward",
    "callfunc_begin",
];

/// Result of a go-to-definition request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Create a result with a single target.
    pub fn single(target: GotoTarget) -> Self {
        Self {
            targets: vec![target],
        }
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    /// The file containing the target.
    pub file: FileId,
    /// Span of the declared identifier.
    pub span: Span,
    pub kind: SymbolKind,
    pub name: Arc<str>,
}

impl From<ResolvedSymbol<'_>> for GotoTarget {
    fn from(symbol: ResolvedSymbol<'_>) -> Self {
        Self {
            file: symbol.file().clone(),
            span: symbol.span(),
            kind: symbol.kind(),
            name: Arc::from(symbol.identifier()),
        }
    }
}

/// A symbol referenced at the cursor.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CursorSymbol<'a> {
    pub symbol: ResolvedSymbol<'a>,
    /// Span of the referencing text under the cursor
    pub span: Span,
}

/// Resolve what the cursor refers to.
///
/// Inside the string argument of a callback-registering function the string
/// names a callable. Anywhere else the identifier under the cursor is looked
/// up as constant, callable, then value. A cursor already on the symbol's
/// declaration line yields nothing.
pub(crate) fn symbol_at_cursor<'v>(
    pos: FilePosition<'_>,
    symbols: &'v SymbolView,
) -> Option<CursorSymbol<'v>> {
    let chars = pos.chars();
    let offset = pos.offset();

    let (symbol, start, end) = match callback_name(chars, offset) {
        Some((name, start)) => {
            let end = start + name.chars().count();
            (ResolvedSymbol::Callable(symbols.callable(&name)?), start, end)
        }
        None => {
            let ident = identifier_at_cursor(chars, offset)?;
            (symbols.lookup(&ident.name)?, ident.start, ident.end)
        }
    };

    if symbol.file() == pos.file && symbol.span().start.line == pos.position.line {
        trace!(identifier = symbol.identifier(), "cursor is on the declaration");
        return None;
    }

    Some(CursorSymbol {
        symbol,
        span: pos.text.span(start, end),
    })
}

/// The callback name if the cursor is inside a string passed to one of
/// [`CALLBACK_FUNCTIONS`]; returns the name and the offset it starts at.
fn callback_name(chars: &[char], offset: usize) -> Option<(String, usize)> {
    let (content, open_quote) = string_at_cursor(chars, offset)?;
    let call = enclosing_call(chars, open_quote)?;
    if !CALLBACK_FUNCTIONS.contains(&call.name.as_str()) {
        return None;
    }
    let name = content.trim();
    if name.is_empty() {
        return None;
    }
    let leading = content.chars().take_while(|c| c.is_whitespace()).count();
    Some((name.to_string(), open_quote + 1 + leading))
}

/// Find the definition of the symbol at the cursor.
///
/// # Arguments
/// * `pos` - The file, its text and the cursor position (0-indexed)
/// * `symbols` - The merged symbol view of the file
///
/// # Returns
/// The location of the definition, or empty if not found.
pub fn goto_definition(pos: FilePosition<'_>, symbols: &SymbolView) -> GotoResult {
    match symbol_at_cursor(pos, symbols) {
        Some(found) => GotoResult::single(GotoTarget::from(found.symbol)),
        None => GotoResult::empty(),
    }
}
