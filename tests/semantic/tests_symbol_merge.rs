//! Symbol merging across include trees.

use pawnsense::FileId;
use pawnsense::parse;

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_no_includes_matches_own_table() {
    let source = "#define LIMIT 4\nnew g_x;\nstock helper() {}";
    let (host, uri) = open_plugin(&[], source);
    let symbols = host.analysis().symbols(&uri).unwrap();
    let own = parse(&uri, source, false);

    assert_eq!(symbols.callables().count(), own.callables.len());
    assert_eq!(symbols.values(), own.values.as_slice());
    assert_eq!(symbols.constants(), own.constants.as_slice());
}

#[test]
fn test_include_symbols_are_visible() {
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], PLUGIN_SMA);
    let symbols = host.analysis().symbols(&uri).unwrap();

    assert!(symbols.callable("register_plugin").is_some());
    assert!(symbols.constant("MAX_PLAYERS").is_some());
    assert!(symbols.value("g_iCount").is_some());
}

#[test]
fn test_forward_prototype_wins_over_plugin_body() {
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], PLUGIN_SMA);
    let symbols = host.analysis().symbols(&uri).unwrap();
    let callable = symbols.callable("client_putinserver").unwrap();
    assert!(callable.is_forward);
    assert!(callable.file.as_str().ends_with("amxmodx.inc"));
}

#[test]
fn test_prototype_wins_regardless_of_include_order() {
    let includes = [
        ("proto.inc", "forward OnThing(id);"),
        ("body.inc", "stock OnThing(id) {}"),
    ];
    for source in ["#include <proto>\n#include <body>", "#include <body>\n#include <proto>"] {
        let (host, uri) = open_plugin(&includes, source);
        let symbols = host.analysis().symbols(&uri).unwrap();
        assert!(symbols.callable("OnThing").unwrap().is_forward, "{source}");
    }
}

#[test]
fn test_cycle_contributes_each_file_once() {
    let (host, uri) = open_plugin(
        &[
            ("a.inc", "#include <b>\nnew g_a;"),
            ("b.inc", "#include <a>\nnew g_b;"),
        ],
        "#include <a>",
    );
    let symbols = host.analysis().symbols(&uri).unwrap();
    let names: Vec<&str> = symbols.values().iter().map(|v| v.identifier.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"g_a"));
    assert!(names.contains(&"g_b"));
}

#[test]
fn test_static_symbols_of_includes_are_hidden() {
    let (host, uri) = open_plugin(
        &[("util.inc", "static hidden() {}\nstatic g_hidden;\nstock shown() {}")],
        "#include <util>\nstatic local_helper() {}",
    );
    let symbols = host.analysis().symbols(&uri).unwrap();
    assert!(symbols.callable("hidden").is_none());
    assert!(symbols.value("g_hidden").is_none());
    assert!(symbols.callable("shown").is_some());
    assert!(symbols.callable("local_helper").is_some());
}

#[test]
fn test_symbols_for_unknown_document_fail() {
    let host = host_with_includes(&[]);
    assert!(host.analysis().symbols(&FileId::new("/nowhere.sma")).is_err());
}
