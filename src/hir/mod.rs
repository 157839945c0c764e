//! High-level IR (HIR): merged symbol views.
//!
//! Per-file tables come from the parser; this layer combines a file's table
//! with the tables of everything it includes.
//!
//! ## Key Types
//!
//! - [`SymbolView`] - callables, values and constants visible from one file
//! - [`DocumentLookup`] - access to the parsed data of dependency nodes
//! - [`ResolvedSymbol`] - the answer of a name lookup

mod resolve;

pub use resolve::{DocumentLookup, ResolvedSymbol, SymbolView, resolve};
