// Syntax-level records produced by the line parser
pub mod descriptors;
pub mod identifier;

pub use descriptors::{
    CallableDescriptor, ConstantDescriptor, InclusionDescriptor, ParserResults,
    ResolvedInclusion, SymbolKind, ValueDescriptor,
};
pub use identifier::{
    identifier_key, is_identifier_char, is_identifier_start, strip_at_prefix, toggle_at_prefix,
};

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
