//! Host test helpers for setting up analysis hosts over in-memory files.

use pawnsense::FileId;
use pawnsense::ide::AnalysisHost;
use pawnsense::project::{AnalysisConfig, MemoryLoader};

pub const INCLUDE_DIR: &str = "/srv/include";
pub const PLUGIN_URI: &str = "/srv/plugins/test.sma";

/// Creates a host whose include directory holds the given `(name, text)` files.
pub fn host_with_includes(includes: &[(&str, &str)]) -> AnalysisHost<MemoryLoader> {
    let mut loader = MemoryLoader::new();
    for (name, text) in includes {
        loader.insert(format!("{INCLUDE_DIR}/{name}"), *text);
    }
    AnalysisHost::with_loader(AnalysisConfig::new().with_include_path(INCLUDE_DIR), loader)
}

/// Creates a host with includes and one open plugin document.
pub fn open_plugin(
    includes: &[(&str, &str)],
    source: &str,
) -> (AnalysisHost<MemoryLoader>, FileId) {
    let mut host = host_with_includes(includes);
    let uri = FileId::new(PLUGIN_URI);
    host.open_document(uri.clone(), source);
    (host, uri)
}

/// Line and column of the first occurrence of `needle` in `source`, plus `delta` columns.
pub fn position_of(source: &str, needle: &str, delta: usize) -> pawnsense::Position {
    for (line, text) in source.split('\n').enumerate() {
        if let Some(byte) = text.find(needle) {
            let column = text[..byte].chars().count() + delta;
            return pawnsense::Position::new(line, column);
        }
    }
    panic!("'{needle}' not found in source");
}
