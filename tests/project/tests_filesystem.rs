//! Include resolution against real files on disk.

use std::fs;

use pawnsense::FileId;
use pawnsense::ide::AnalysisHost;
use pawnsense::project::AnalysisConfig;
use tempfile::TempDir;

use crate::helpers::source_fixtures::*;

fn write_tree(root: &TempDir) {
    let include = root.path().join("include");
    let plugins = root.path().join("plugins");
    fs::create_dir_all(&include).unwrap();
    fs::create_dir_all(&plugins).unwrap();
    fs::write(include.join("amxmodx.inc"), AMXMODX_INC).unwrap();
    fs::write(plugins.join("shared.inc"), "stock shared_helper(id) {}\n").unwrap();
}

#[test]
fn test_workspace_include_path_variable() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(&temp_dir);

    let config = AnalysisConfig::new()
        .with_workspace_root(temp_dir.path())
        .with_include_path("${workspaceRoot}/include");
    let mut host = AnalysisHost::new(config);
    let uri = FileId::from_path(&temp_dir.path().join("plugins/test.sma"));
    host.open_document(uri.clone(), PLUGIN_SMA);

    let symbols = host.analysis().symbols(&uri).unwrap();
    assert!(symbols.callable("register_plugin").is_some());
    assert_eq!(host.dependency_graph().len(), 1);
}

#[test]
fn test_local_include_next_to_plugin() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(&temp_dir);

    let mut host = AnalysisHost::new(AnalysisConfig::new());
    let uri = FileId::from_path(&temp_dir.path().join("plugins/test.sma"));
    host.open_document(uri.clone(), "#include \"shared\"\n");

    let symbols = host.analysis().symbols(&uri).unwrap();
    let helper = symbols.callable("shared_helper").unwrap();
    assert!(helper.file.as_str().ends_with("shared.inc"));
}

#[test]
fn test_angle_include_ignores_plugin_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(&temp_dir);

    let mut host = AnalysisHost::new(AnalysisConfig::new());
    let uri = FileId::from_path(&temp_dir.path().join("plugins/test.sma"));
    host.open_document(uri.clone(), "#include <shared>\n");

    assert!(host.dependency_graph().is_empty());
}

#[test]
fn test_file_changed_on_disk_is_picked_up_on_reopen() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(&temp_dir);
    let config = AnalysisConfig::new().with_include_path(temp_dir.path().join("include"));
    let mut host = AnalysisHost::new(config);
    let uri = FileId::from_path(&temp_dir.path().join("plugins/test.sma"));

    host.open_document(uri.clone(), "#include <amxmodx>");
    host.close_document(&uri).unwrap();
    fs::write(temp_dir.path().join("include/amxmodx.inc"), "native fresh_native();").unwrap();
    host.open_document(uri.clone(), "#include <amxmodx>");

    let symbols = host.analysis().symbols(&uri).unwrap();
    assert!(symbols.callable("fresh_native").is_some());
    assert!(symbols.callable("register_plugin").is_none());
}
