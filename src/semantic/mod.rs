//! # Semantic State
//!
//! The include graph and the per-file data hung off it. Nothing here parses
//! or reads files; the analysis host drives both.

mod document;
pub mod graphs;

pub use document::DocumentData;
pub use graphs::{DependencyEdges, DependencyId, FileDependency, FileDependencyManager};
