//! Error types for the analysis host and project layer.
//!
//! Parsing, merging and queries never fail; they answer with `Option` or an
//! empty collection. Errors only come from the layer that touches the file
//! system or external configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::base::FileId;

/// Errors raised while loading files or building compiler invocations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No candidate file exists for an inclusion.
    #[error("cannot resolve include '{filename}' from {from}")]
    UnresolvedInclusion { filename: String, from: FileId },

    /// A dependency file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Operation on a document that is not open.
    #[error("document is not open: {0}")]
    UnknownDocument(FileId),

    /// The compiler settings cannot produce an invocation.
    #[error("invalid compiler settings: {0}")]
    InvalidCompilerSettings(String),
}

impl AnalysisError {
    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an unresolved-inclusion error.
    pub fn unresolved(filename: impl Into<String>, from: &FileId) -> Self {
        Self::UnresolvedInclusion {
            filename: filename.into(),
            from: from.clone(),
        }
    }
}

/// Result type for fallible analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
