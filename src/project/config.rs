//! Analysis and compiler configuration.
//!
//! Plain structs with builder-style setters. With the `serde` feature they
//! deserialize from editor settings using camelCase keys; every field has a
//! default, so partial settings objects are accepted.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings that drive include resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AnalysisConfig {
    /// Directories searched for `#include` targets; may contain `${...}`
    /// path variables.
    pub include_paths: Vec<PathBuf>,

    /// Root used to expand `${workspaceRoot}` and friends.
    pub workspace_root: Option<PathBuf>,

    /// Extensions tried, in order, when an include is written without one.
    pub include_extensions: Vec<String>,

    pub compiler: CompilerSettings,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            include_paths: Vec::new(),
            workspace_root: None,
            include_extensions: vec!["inc".to_string()],
            compiler: CompilerSettings::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include search directory.
    pub fn with_include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Replace the list of default include extensions.
    pub fn with_include_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_compiler(mut self, compiler: CompilerSettings) -> Self {
        self.compiler = compiler;
        self
    }
}

/// Where the compiled `.amxx` lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum OutputType {
    /// In [`CompilerSettings::output_path`]
    #[default]
    Path,
    /// Next to the source file
    Source,
}

/// Settings for invoking the external `amxxpc` compiler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CompilerSettings {
    pub executable_path: PathBuf,
    /// Extra flags passed through verbatim
    pub options: Vec<String>,
    /// `-i` directories; may contain path variables
    pub include_paths: Vec<PathBuf>,
    pub output_type: OutputType,
    /// Output directory for [`OutputType::Path`]; may contain path variables
    pub output_path: PathBuf,
}

impl CompilerSettings {
    pub fn new(executable_path: impl Into<PathBuf>) -> Self {
        Self {
            executable_path: executable_path.into(),
            ..Self::default()
        }
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn with_include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    pub fn with_output(mut self, output_type: OutputType, output_path: impl Into<PathBuf>) -> Self {
        self.output_type = output_type;
        self.output_path = output_path.into();
        self
    }
}
