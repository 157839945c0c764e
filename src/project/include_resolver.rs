//! Map `#include` directives to files.

use std::path::{Path, PathBuf};

use tracing::trace;

use super::config::AnalysisConfig;
use super::loader::SourceLoader;
use super::path_vars::resolve_path_variables;
use crate::base::FileId;
use crate::error::{AnalysisError, Result};
use crate::syntax::{InclusionDescriptor, ResolvedInclusion};

/// Search rules for include targets.
///
/// Quoted includes look next to the including file first, then in the
/// configured include paths. Angle-bracket includes only search the include
/// paths. A name written without an extension tries each configured
/// extension before the bare name.
#[derive(Clone, Debug)]
pub struct IncludeResolver {
    include_paths: Vec<PathBuf>,
    workspace_root: Option<PathBuf>,
    extensions: Vec<String>,
}

impl IncludeResolver {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            include_paths: config.include_paths.clone(),
            workspace_root: config.workspace_root.clone(),
            extensions: config.include_extensions.clone(),
        }
    }

    /// Candidate paths for `inclusion`, in search order.
    pub fn candidates(&self, inclusion: &InclusionDescriptor, from: &FileId) -> Vec<PathBuf> {
        let from_path = from.to_path();
        let mut dirs = Vec::new();
        if inclusion.is_local {
            if let Some(parent) = from_path.parent() {
                dirs.push(parent.to_path_buf());
            }
        }
        for path in &self.include_paths {
            let expanded = resolve_path_variables(
                &path.to_string_lossy(),
                self.workspace_root.as_deref(),
                Some(&from_path),
            );
            dirs.push(PathBuf::from(expanded));
        }

        let filename = inclusion.filename.as_str();
        let names: Vec<String> = if Path::new(filename).extension().is_none() {
            self.extensions
                .iter()
                .map(|ext| format!("{filename}.{ext}"))
                .chain(std::iter::once(filename.to_string()))
                .collect()
        } else {
            vec![filename.to_string()]
        };

        dirs.iter()
            .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
            .collect()
    }

    /// Resolve `inclusion` to the first candidate that exists.
    pub fn resolve(
        &self,
        inclusion: &InclusionDescriptor,
        from: &FileId,
        loader: &impl SourceLoader,
    ) -> Result<ResolvedInclusion> {
        let found = self
            .candidates(inclusion, from)
            .into_iter()
            .find(|candidate| loader.exists(candidate))
            .ok_or_else(|| AnalysisError::unresolved(inclusion.filename.as_str(), from))?;

        trace!(filename = %inclusion.filename, resolved = %found.display(), "include resolved");
        Ok(ResolvedInclusion {
            descriptor: inclusion.clone(),
            uri: FileId::from_path(&found),
        })
    }
}
