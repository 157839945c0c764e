//! Include graph lifetime through the analysis host.

use pawnsense::FileId;

use crate::helpers::host_helpers::*;

#[test]
fn test_shared_include_is_loaded_once() {
    let mut host = host_with_includes(&[
        ("a.inc", "#include <shared>\nnative a_call();"),
        ("b.inc", "#include <shared>\nnative b_call();"),
        ("shared.inc", "native shared_call();"),
    ]);
    let first = FileId::new("/srv/plugins/one.sma");
    let second = FileId::new("/srv/plugins/two.sma");
    host.open_document(first.clone(), "#include <a>\n#include <b>");
    host.open_document(second.clone(), "#include <shared>");

    assert_eq!(host.dependency_graph().len(), 3);

    host.close_document(&first).unwrap();
    let graph = host.dependency_graph();
    assert_eq!(graph.len(), 1);
    let (_, shared) = graph.iter().next().unwrap();
    assert!(shared.uri.as_str().ends_with("shared.inc"));

    host.close_document(&second).unwrap();
    assert!(host.dependency_graph().is_empty());
}

#[test]
fn test_cyclic_includes_are_released() {
    let mut host = host_with_includes(&[
        ("a.inc", "#include <b>\nnative from_a();"),
        ("b.inc", "#include <a>\nnative from_b();"),
    ]);
    let uri = FileId::new(PLUGIN_URI);
    host.open_document(uri.clone(), "#include <a>");
    assert_eq!(host.dependency_graph().len(), 2);

    host.close_document(&uri).unwrap();
    assert!(host.dependency_graph().is_empty());
}

#[test]
fn test_update_drops_removed_include() {
    let (mut host, uri) = open_plugin(
        &[("a.inc", "native a_call();"), ("b.inc", "native b_call();")],
        "#include <a>\n#include <b>",
    );
    assert_eq!(host.dependency_graph().len(), 2);

    host.update_document(uri.clone(), "#include <b>").unwrap();
    assert_eq!(host.dependency_graph().len(), 1);
    let symbols = host.analysis().symbols(&uri).unwrap();
    assert!(symbols.callable("a_call").is_none());
    assert!(symbols.callable("b_call").is_some());
}

#[test]
fn test_duplicate_include_is_one_edge() {
    let (host, uri) = open_plugin(&[("a.inc", "native a_call();")], "#include <a>\n#include <a>");
    let data = host.document_data(&uri).unwrap();
    assert_eq!(data.dependencies.len(), 1);
    let (_, node) = host.dependency_graph().iter().next().unwrap();
    assert_eq!(node.ref_count(), 1);
}

#[test]
fn test_missing_include_is_skipped() {
    let (host, uri) = open_plugin(&[], "#include <missing>\n#tryinclude <optional>\nnew g_x;");
    assert!(host.dependency_graph().is_empty());
    let symbols = host.analysis().symbols(&uri).unwrap();
    assert!(symbols.value("g_x").is_some());
}

#[test]
fn test_open_include_edits_reach_includers() {
    let (mut host, plugin) = open_plugin(&[("util.inc", "native old_call();")], "#include <util>");
    let util = FileId::new(format!("{INCLUDE_DIR}/util.inc"));

    host.open_document(util.clone(), "native old_call();\nnative new_call();");
    let symbols = host.analysis().symbols(&plugin).unwrap();
    assert!(symbols.callable("new_call").is_some());

    host.update_document(util.clone(), "native new_call();").unwrap();
    let symbols = host.analysis().symbols(&plugin).unwrap();
    assert!(symbols.callable("old_call").is_none());
    assert!(symbols.callable("new_call").is_some());
}

#[test]
fn test_include_added_in_open_include_is_linked() {
    let (mut host, plugin) = open_plugin(
        &[("util.inc", "native util_call();"), ("extra.inc", "native extra_call();")],
        "#include <util>",
    );
    let util = FileId::new(format!("{INCLUDE_DIR}/util.inc"));

    host.open_document(util.clone(), "#include <extra>\nnative util_call();");
    let extra = FileId::new(format!("{INCLUDE_DIR}/extra.inc"));
    assert!(host.dependency_graph().get_dependency(&extra).is_some());
    let symbols = host.analysis().symbols(&plugin).unwrap();
    assert!(symbols.callable("extra_call").is_some());

    // Closing the buffer falls back to the copy on disk
    host.close_document(&util).unwrap();
    let symbols = host.analysis().symbols(&plugin).unwrap();
    assert!(symbols.callable("extra_call").is_none());
    assert!(symbols.callable("util_call").is_some());
    assert_eq!(host.dependency_graph().len(), 1);
}

#[test]
fn test_include_opened_before_includer_uses_buffer() {
    let mut host = host_with_includes(&[("util.inc", "native disk_call();")]);
    let util = FileId::new(format!("{INCLUDE_DIR}/util.inc"));
    host.open_document(util, "native buffer_call();");

    let plugin = FileId::new(PLUGIN_URI);
    host.open_document(plugin.clone(), "#include <util>");
    let symbols = host.analysis().symbols(&plugin).unwrap();
    assert!(symbols.callable("buffer_call").is_some());
    assert!(symbols.callable("disk_call").is_none());
}
