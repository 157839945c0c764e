use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Identity of a source file: a URI or an absolute path, compared verbatim.
///
/// Cloning is a reference-count increment, so ids can be stored freely in
/// descriptors and maps.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(Arc<str>);

impl FileId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Build an id from a filesystem path.
    ///
    /// `.` and `..` components are folded lexically so the same file reached
    /// through different relative spellings maps to one id. The filesystem is
    /// not consulted.
    pub fn from_path(path: &Path) -> Self {
        Self::new(lexical_normalize(path).to_string_lossy().as_ref())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id interpreted as a filesystem path (a `file://` scheme is dropped).
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(self.0.strip_prefix("file://").unwrap_or(&self.0))
    }
}

fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FileId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
