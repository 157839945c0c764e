//! Source access seam.
//!
//! The host never touches the file system directly; it asks a
//! [`SourceLoader`]. [`FsLoader`] reads from disk, [`MemoryLoader`] serves a
//! fixed set of files and is handy for tests and unsaved buffers.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::{AnalysisError, Result};

/// Existence checks and reads for include targets.
pub trait SourceLoader {
    fn exists(&self, path: &Path) -> bool;

    fn load(&self, path: &Path) -> Result<String>;
}

/// Reads files from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))
    }
}

/// Serves files from memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    pub fn remove(&mut self, path: &Path) -> Option<String> {
        self.files.remove(path)
    }
}

impl SourceLoader for MemoryLoader {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn load(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            AnalysisError::io(path, std::io::Error::from(std::io::ErrorKind::NotFound))
        })
    }
}
