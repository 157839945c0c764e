//! Parser tests over whole Pawn sources.

use pawnsense::syntax::SymbolKind;
use pawnsense::{FileId, Span, parse};
use rstest::rstest;

use crate::helpers::source_fixtures::*;

fn parse_plugin(text: &str) -> pawnsense::syntax::ParserResults {
    parse(&FileId::new("/srv/plugins/test.sma"), text, false)
}

// =============================================================================
// INCLUDES
// =============================================================================

#[rstest]
#[case("#include <amxmodx>", "amxmodx", false, false)]
#[case("#include \"common.inc\"", "common.inc", true, false)]
#[case("#tryinclude <fakemeta>", "fakemeta", false, true)]
#[case("#include cstrike", "cstrike", false, false)]
fn test_include_forms(
    #[case] line: &str,
    #[case] filename: &str,
    #[case] is_local: bool,
    #[case] is_silent: bool,
) {
    let results = parse_plugin(line);
    assert_eq!(results.inclusions.len(), 1);
    let inclusion = &results.inclusions[0];
    assert_eq!(inclusion.filename, filename);
    assert_eq!(inclusion.is_local, is_local);
    assert_eq!(inclusion.is_silent, is_silent);
}

#[test]
fn test_include_inside_function_is_ignored() {
    let results = parse_plugin("public f()\n{\n#include <inner>\n}");
    assert!(results.inclusions.is_empty());
}

// =============================================================================
// DEFINES
// =============================================================================

#[test]
fn test_define_without_parameters_is_constant() {
    let results = parse_plugin("#define SIZE 64");
    let constant = results.constant("SIZE").unwrap();
    assert_eq!(constant.value, "64");
    assert_eq!(constant.label, "#define SIZE 64");
    assert!(results.callable("SIZE").is_none());
}

#[test]
fn test_define_with_parameters_is_macro() {
    let results = parse_plugin("#define MAX(%1,%2) ((%1) > (%2) ? (%1) : (%2))");
    let callable = results.callable("MAX").unwrap();
    assert_eq!(callable.kind, SymbolKind::Macro);
    assert_eq!(callable.parameters.len(), 2);
    assert!(results.constant("MAX").is_none());
}

#[test]
fn test_define_with_space_before_paren_is_constant() {
    let results = parse_plugin("#define VALUE (1 + 2)");
    assert!(results.constant("VALUE").is_some());
    assert!(results.callable("VALUE").is_none());
}

// =============================================================================
// CALLABLES AND VALUES
// =============================================================================

#[rstest]
#[case("native get_speed(id);", "get_speed", true)]
#[case("forward OnEvent(id);", "OnEvent", true)]
#[case("public plugin_init()", "plugin_init", false)]
#[case("stock Float:get_vector(const Float:v[3])", "get_vector", false)]
#[case("bool:is_valid(id)", "is_valid", false)]
fn test_callable_declarations(
    #[case] line: &str,
    #[case] identifier: &str,
    #[case] is_forward: bool,
) {
    let results = parse_plugin(line);
    let callable = results.callable(identifier).unwrap();
    assert_eq!(callable.identifier, identifier);
    assert_eq!(callable.is_forward, is_forward);
    assert_eq!(callable.kind, SymbolKind::Callable);
}

#[test]
fn test_native_documentation_and_parameters() {
    let results = parse(&FileId::new("/srv/include/amxmodx.inc"), AMXMODX_INC, true);
    let callable = results.callable("register_plugin").unwrap();
    assert_eq!(callable.parameters.len(), 3);
    let doc = callable.documentation.as_deref().unwrap();
    assert!(doc.starts_with("Registers a plugin."));
    assert!(doc.contains("@param author"));
    assert_eq!(results.constant("MAX_PLAYERS").unwrap().value, "32");
}

#[test]
fn test_multiple_value_declarators() {
    let results = parse_plugin("new g_a, g_b = 5, Float:g_c[3];");
    assert!(results.value("g_a").is_some());
    assert!(results.value("g_b").is_some());
    assert!(results.value("g_c").is_some());
}

#[test]
fn test_const_value_is_marked() {
    let results = parse_plugin("new const PLUGIN[] = \"Test\";");
    assert!(results.value("PLUGIN").unwrap().is_const);
}

#[test]
fn test_lookups_are_case_insensitive() {
    let results = parse_plugin("new g_Count;\nstock DoThing() {}");
    assert!(results.value("G_COUNT").is_some());
    assert!(results.callable("dothing").is_some());
}

#[test]
fn test_declaration_spans_point_at_identifier() {
    let results = parse_plugin("\nstock helper(id)\n{\n}");
    let callable = results.callable("helper").unwrap();
    assert_eq!(callable.span, Span::on_line(1, 6, 6));
}

#[test]
fn test_plugin_fixture_declarations() {
    let results = parse_plugin(PLUGIN_SMA);
    assert_eq!(results.inclusions.len(), 1);
    assert!(results.value("g_iCount").is_some());
    for name in ["plugin_init", "TaskTick", "client_putinserver"] {
        assert!(results.callable(name).is_some(), "missing {name}");
    }
    // Calls inside bodies are not declarations
    assert!(results.callable("register_plugin").is_none());
}
