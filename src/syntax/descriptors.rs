//! Descriptors extracted from one file by the line parser.
//!
//! Every descriptor records the file that defines it, so a merged view built
//! from many files can still navigate back to the declaration.

use std::sync::Arc;

use smol_str::SmolStr;

use super::identifier::{identifier_key, strip_at_prefix};
use crate::base::{FileId, Span};

/// Kind of an extracted symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Function prototype or implementation
    Callable,
    /// Parameterized `#define NAME(params) body`
    Macro,
    /// Global variable
    Value,
    /// Object-like `#define NAME value`
    Constant,
}

impl SymbolKind {
    /// Get a display string for this kind.
    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Callable => "function",
            SymbolKind::Macro => "macro",
            SymbolKind::Value => "variable",
            SymbolKind::Constant => "constant",
        }
    }
}

/// An `#include` / `#tryinclude` directive as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionDescriptor {
    /// Filename text between the delimiters
    pub filename: SmolStr,
    /// `"quoted"` rather than `<angle>` form
    pub is_local: bool,
    /// `#tryinclude`: a missing file is not an error
    pub is_silent: bool,
    /// The whole directive line
    pub span: Span,
}

/// An inclusion paired with the file it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedInclusion {
    pub descriptor: InclusionDescriptor,
    pub uri: FileId,
}

/// A function prototype, implementation, or function-like macro.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallableDescriptor {
    pub identifier: SmolStr,
    /// Full prototype text, e.g. `stock Float:get_speed(id)`
    pub label: SmolStr,
    pub kind: SymbolKind,
    pub file: FileId,
    /// Span of the identifier token only
    pub span: Span,
    /// Raw parameter text, one entry per top-level comma-separated parameter
    pub parameters: Vec<SmolStr>,
    pub documentation: Option<Arc<str>>,
    /// `forward`/`native` declaration rather than a body
    pub is_forward: bool,
    /// Declared with `static` (file-local)
    pub is_static: bool,
}

/// A global variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueDescriptor {
    pub identifier: SmolStr,
    /// Declaration text without initializer, e.g. `new const g_szPrefix[]`
    pub label: SmolStr,
    pub is_const: bool,
    pub file: FileId,
    pub span: Span,
    pub documentation: Option<Arc<str>>,
    pub is_static: bool,
}

/// An object-like macro.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstantDescriptor {
    pub identifier: SmolStr,
    /// Raw replacement text
    pub value: SmolStr,
    pub label: SmolStr,
    pub file: FileId,
    pub span: Span,
}

/// Everything the parser extracted from one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParserResults {
    pub inclusions: Vec<InclusionDescriptor>,
    pub callables: Vec<CallableDescriptor>,
    pub values: Vec<ValueDescriptor>,
    pub constants: Vec<ConstantDescriptor>,
}

impl ParserResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callable(&self, name: &str) -> Option<&CallableDescriptor> {
        self.callables.iter().find(|c| c.is_named(name))
    }

    pub fn value(&self, name: &str) -> Option<&ValueDescriptor> {
        self.values
            .iter()
            .find(|v| v.identifier.eq_ignore_ascii_case(name))
    }

    pub fn constant(&self, name: &str) -> Option<&ConstantDescriptor> {
        self.constants
            .iter()
            .find(|c| c.identifier.eq_ignore_ascii_case(name))
    }
}

impl CallableDescriptor {
    /// Case-insensitive identifier comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.identifier.eq_ignore_ascii_case(name)
    }

    /// Key under which this callable is unique within a table.
    pub fn key(&self) -> SmolStr {
        identifier_key(&self.identifier)
    }

    /// Identifier without the `@` prefix, as inserted by completion.
    pub fn insert_text(&self) -> &str {
        strip_at_prefix(&self.identifier)
    }
}

impl ValueDescriptor {
    pub fn insert_text(&self) -> &str {
        strip_at_prefix(&self.identifier)
    }
}
