//! # pawnsense-base
//!
//! Core library for AMX Mod X Pawn source intelligence: a line-oriented
//! declaration parser, a reference-counted include graph, symbol merging
//! across includes, and editor queries (definition, hover, completion,
//! signature help).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (goto-def, hover, completion, signature help)
//!   ↓
//! hir       → Merged symbol views across includes
//!   ↓
//! semantic  → Include graph, per-file DocumentData
//!   ↓
//! project   → Configuration, include resolution, compiler collaborator
//!   ↓
//! parser    → Logos lexer, line scanner, declaration shapes
//!   ↓
//! syntax    → Descriptors, identifier rules
//!   ↓
//! base      → Primitives (FileId, Position/Span, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → parser → project → semantic → hir → ide)
// ============================================================================

/// Foundation types: FileId, Position/Span, LineIndex
pub mod base;

/// Syntax: descriptors produced by the parser
pub mod syntax;

/// Parser: Logos lexer and line-oriented declaration extraction
pub mod parser;

/// Project environment: config, include lookup, compiler output
pub mod project;

/// Semantic state: include graph and per-file data
pub mod semantic;

/// High-level IR: merged symbol views
pub mod hir;

/// IDE features: goto-definition, hover, completion, signature help
pub mod ide;

/// Error types for the host and project layer
pub mod error;

// Re-export foundation types
pub use base::{FileId, LineIndex, Position, Span, TextRange, TextSize};
pub use error::{AnalysisError, Result};
pub use parser::parse;
