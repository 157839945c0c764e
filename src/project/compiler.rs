//! Collaborator pieces for the external `amxxpc` compiler.
//!
//! Running the compiler is left to the caller. This module builds the
//! command line and reads back what the compiler printed.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::config::{CompilerSettings, OutputType};
use super::path_vars::resolve_path_variables;
use crate::base::{FileId, Span};
use crate::error::{AnalysisError, Result};

// ============================================================================
// INVOCATION
// ============================================================================

/// A ready-to-spawn compiler command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerInvocation {
    pub executable: PathBuf,
    /// Arguments, already quoted the way `amxxpc` expects them
    pub args: Vec<String>,
    /// The `.amxx` file the compiler will write
    pub output: PathBuf,
    /// Directory of the executable; `amxxpc` finds its own includes from there
    pub working_dir: PathBuf,
}

impl CompilerInvocation {
    /// Build the command for compiling `input`.
    ///
    /// Arguments are the quoted input, the configured options, one
    /// `-i"<dir>"` per include path and `-o"<output>"`. Include and output
    /// paths have their path variables expanded against `input`.
    pub fn new(
        settings: &CompilerSettings,
        input: &Path,
        workspace_root: Option<&Path>,
    ) -> Result<Self> {
        if settings.executable_path.as_os_str().is_empty() {
            return Err(AnalysisError::InvalidCompilerSettings(
                "compiler executable path is empty".to_string(),
            ));
        }
        let stem = input.file_stem().ok_or_else(|| {
            AnalysisError::InvalidCompilerSettings(format!(
                "input has no file name: {}",
                input.display()
            ))
        })?;
        let output_name = format!("{}.amxx", stem.to_string_lossy());

        let expand = |path: &Path| {
            PathBuf::from(resolve_path_variables(
                &path.to_string_lossy(),
                workspace_root,
                Some(input),
            ))
        };

        let output_dir = match settings.output_type {
            OutputType::Path => {
                if settings.output_path.as_os_str().is_empty() {
                    return Err(AnalysisError::InvalidCompilerSettings(
                        "output type is 'path' but no output path is set".to_string(),
                    ));
                }
                expand(&settings.output_path)
            }
            OutputType::Source => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        let output = output_dir.join(output_name);

        let mut args = Vec::with_capacity(settings.options.len() + settings.include_paths.len() + 2);
        args.push(format!("\"{}\"", input.display()));
        args.extend(settings.options.iter().cloned());
        args.extend(
            settings
                .include_paths
                .iter()
                .map(|path| format!("-i\"{}\"", expand(path).display())),
        );
        args.push(format!("-o\"{}\"", output.display()));

        Ok(Self {
            executable: settings.executable_path.clone(),
            args,
            output,
            working_dir: settings
                .executable_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        })
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// One `file(line[ -- end]) : kind code: message` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerDiagnostic {
    /// Path as printed by the compiler
    pub file: String,
    /// One-based line numbers as printed
    pub start_line: usize,
    pub end_line: Option<usize>,
    pub severity: Severity,
    pub code: u32,
    pub message: String,
}

impl CompilerDiagnostic {
    pub fn file_id(&self) -> FileId {
        FileId::from_path(Path::new(&self.file))
    }

    /// Zero-based span covering the whole reported lines.
    pub fn span(&self) -> Span {
        let start = self.start_line.saturating_sub(1);
        let end = self.end_line.unwrap_or(self.start_line).saturating_sub(1);
        Span::from_coords(start, 0, end, usize::MAX)
    }
}

/// Size figures printed after a successful compile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompilerStats {
    pub header_size: Option<u64>,
    pub code_size: Option<u64>,
    pub data_size: Option<u64>,
    pub total_requirements: Option<u64>,
}

/// Everything read from one compiler run.
#[derive(Clone, Debug, Default)]
pub struct CompilerReport {
    diagnostics: IndexMap<String, Vec<CompilerDiagnostic>, FxBuildHasher>,
    pub stats: CompilerStats,
    done: bool,
}

impl CompilerReport {
    /// Files with diagnostics, in the order the compiler first reported them.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.keys().map(String::as_str)
    }

    pub fn diagnostics_for(&self, file: &str) -> &[CompilerDiagnostic] {
        self.diagnostics.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &CompilerDiagnostic> {
        self.diagnostics.values().flatten()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(|d| d.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics().any(|d| d.severity == Severity::Warning)
    }

    /// The compiler printed `Done.` and reported no error.
    pub fn succeeded(&self) -> bool {
        self.done && !self.has_errors()
    }
}

/// Read the compiler's standard output.
pub fn parse_compiler_output(text: &str) -> CompilerReport {
    let mut report = CompilerReport::default();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(diagnostic) = parse_diagnostic_line(line) {
            report
                .diagnostics
                .entry(diagnostic.file.clone())
                .or_default()
                .push(diagnostic);
        }
        if line.contains("Done.") {
            report.done = true;
        }
    }

    report.stats = CompilerStats {
        header_size: find_size(text, "Header size:"),
        code_size: find_size(text, "Code size:"),
        data_size: find_size(text, "Data size:"),
        total_requirements: find_size(text, "Total requirements:"),
    };
    report
}

/// The shortest file prefix whose remainder has the diagnostic shape wins.
fn parse_diagnostic_line(line: &str) -> Option<CompilerDiagnostic> {
    line.match_indices('(')
        .filter(|(idx, _)| *idx > 0)
        .find_map(|(idx, _)| parse_location(&line[..idx], &line[idx + 1..]))
}

fn parse_location(file: &str, rest: &str) -> Option<CompilerDiagnostic> {
    let (start_line, rest) = take_number(rest)?;
    let (end_line, rest) = match take_whitespace(rest).and_then(|r| r.strip_prefix("--")) {
        Some(after) => {
            let (end, rest) = take_number(take_whitespace(after)?)?;
            (Some(end as usize), rest)
        }
        None => (None, rest),
    };
    let rest = rest.strip_prefix(')')?;
    let rest = take_whitespace(rest)?.strip_prefix(':')?;
    let rest = take_whitespace(rest)?;
    let (severity, rest) = if let Some(r) = rest.strip_prefix("warning") {
        (Severity::Warning, r)
    } else {
        (Severity::Error, rest.strip_prefix("error")?)
    };
    let (code, rest) = take_number(take_whitespace(rest)?)?;
    let message = take_whitespace(rest.strip_prefix(':')?)?;

    Some(CompilerDiagnostic {
        file: file.to_string(),
        start_line: start_line as usize,
        end_line,
        severity,
        code: u32::try_from(code).ok()?,
        message: message.to_string(),
    })
}

/// Strip exactly one whitespace character.
fn take_whitespace(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    chars.next().filter(|c| c.is_whitespace())?;
    Some(chars.as_str())
}

fn take_number(text: &str) -> Option<(u64, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

fn find_size(text: &str, label: &str) -> Option<u64> {
    let after = &text[text.find(label)? + label.len()..];
    let (value, rest) = take_number(after.trim_start())?;
    rest.trim_start().starts_with("bytes").then_some(value)
}
