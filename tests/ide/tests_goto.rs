//! Go-to-definition tests.
//!
//! Cursor positions are found by searching the plugin source, so fixtures
//! can change without hand-maintained coordinates.

use pawnsense::{Position, Span};
use pawnsense::syntax::SymbolKind;

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// IDENTIFIERS
// =============================================================================

#[test]
fn test_goto_native_in_include() {
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], PLUGIN_SMA);
    let position = position_of(PLUGIN_SMA, "register_plugin(", 3);

    let result = host.analysis().goto_definition(&uri, position).unwrap();
    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(&*target.name, "register_plugin");
    assert_eq!(target.kind, SymbolKind::Callable);
    assert!(target.file.as_str().ends_with("amxmodx.inc"));
    let declared = position_of(AMXMODX_INC, "register_plugin", 0);
    assert_eq!(target.span, Span::on_line(declared.line, declared.column, 15));
}

#[test]
fn test_goto_global_in_same_file() {
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], PLUGIN_SMA);
    let position = position_of(PLUGIN_SMA, "g_iCount++", 2);

    let result = host.analysis().goto_definition(&uri, position).unwrap();
    let target = &result.targets[0];
    assert_eq!(target.file, uri);
    assert_eq!(target.span.start.line, 2);
}

#[test]
fn test_goto_on_declaration_line_is_empty() {
    let (host, uri) = open_plugin(&[], PLUGIN_SMA);
    let position = position_of(PLUGIN_SMA, "TaskTick()", 2);

    let result = host.analysis().goto_definition(&uri, position).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_goto_unknown_identifier_is_empty() {
    let (host, uri) = open_plugin(&[], "public f()\n{\n\tunknown_call();\n}");
    let result = host.analysis().goto_definition(&uri, Position::new(2, 3)).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_goto_constant_shadows_callable() {
    let source = "#define Thing 5\nstock thing() {}\npublic f()\n{\n\treturn Thing;\n}";
    let (host, uri) = open_plugin(&[], source);
    let result = host
        .analysis()
        .goto_definition(&uri, position_of(source, "return Thing", 8))
        .unwrap();
    assert_eq!(result.targets[0].kind, SymbolKind::Constant);
}

// =============================================================================
// CALLBACK STRINGS
// =============================================================================

#[test]
fn test_goto_callback_string() {
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], PLUGIN_SMA);
    let position = position_of(PLUGIN_SMA, "\"TaskTick\"", 3);

    let result = host.analysis().goto_definition(&uri, position).unwrap();
    let target = &result.targets[0];
    assert_eq!(&*target.name, "TaskTick");
    assert_eq!(target.span.start.line, position_of(PLUGIN_SMA, "public TaskTick", 0).line);
}

#[test]
fn test_plain_string_argument_is_not_a_callback() {
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], PLUGIN_SMA);
    let position = position_of(PLUGIN_SMA, "\"Test\"", 2);

    let result = host.analysis().goto_definition(&uri, position).unwrap();
    assert!(result.is_empty());
}
