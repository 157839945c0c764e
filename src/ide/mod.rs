//! IDE features: High-level APIs for editor requests.
//!
//! This module provides the interface between the merged symbol views (HIR)
//! and an editor front end. Each query function corresponds to one request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at the LSP boundary
//! 3. **Composable**: Built on top of HIR symbol views
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use pawnsense::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new(AnalysisConfig::default());
//! host.open_document(uri.clone(), "#include <amxmodx>\n...");
//!
//! let analysis = host.analysis();
//! let items = analysis.completions(&uri, Position::new(3, 8))?;
//! ```

mod analysis;
mod completion;
mod file_position;
mod goto;
mod hover;
mod signature;
pub mod text_utils;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use file_position::{DocumentText, FilePosition};
pub use goto::{CALLBACK_FUNCTIONS, GotoResult, GotoTarget, goto_definition};
pub use hover::{HoverResult, hover};
pub use signature::{SignatureHelp, signature_help};
pub use text_utils::{identifier_at_cursor, identifier_behind_cursor};
