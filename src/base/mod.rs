//! Foundation types for the pawnsense toolchain.
//!
//! This module provides fundamental types used throughout the analyzer:
//! - [`FileId`] - Opaque, cheap-to-clone file identities
//! - [`Position`], [`Span`] - Zero-based line/column locations
//! - [`LineIndex`] - Line/column to flat offset conversion
//!
//! This module has NO dependencies on other pawnsense modules.

mod file_id;
mod line_index;
mod position;

pub use file_id::FileId;
pub use line_index::LineIndex;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
