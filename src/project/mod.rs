//! Project environment: configuration, include lookup, the compiler
//! collaborator, and file access.

mod compiler;
mod config;
mod include_resolver;
mod loader;
mod path_vars;

pub use compiler::{
    CompilerDiagnostic, CompilerInvocation, CompilerReport, CompilerStats, Severity,
    parse_compiler_output,
};
pub use config::{AnalysisConfig, CompilerSettings, OutputType};
pub use include_resolver::IncludeResolver;
pub use loader::{FsLoader, MemoryLoader, SourceLoader};
pub use path_vars::resolve_path_variables;
