//! Hover tests.

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_hover_shows_label_and_documentation() {
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], PLUGIN_SMA);
    let position = position_of(PLUGIN_SMA, "set_task(", 2);

    let hover = host.analysis().hover(&uri, position).unwrap().unwrap();
    assert!(hover.contents.starts_with("```pawn\nnative set_task(Float:time"));
    assert!(hover.contents.contains("\n---\n\nCalls a function after a specified time"));
    assert_eq!(&*hover.name, "set_task");
    assert!(hover.definition_file.as_str().ends_with("amxmodx.inc"));
}

#[test]
fn test_hover_range_covers_identifier_under_cursor() {
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], PLUGIN_SMA);
    let start = position_of(PLUGIN_SMA, "get_user_name(", 0);
    let position = position_of(PLUGIN_SMA, "get_user_name(", 5);

    let hover = host.analysis().hover(&uri, position).unwrap().unwrap();
    assert_eq!(hover.span.start, start);
    assert_eq!(hover.span.end.column, start.column + "get_user_name".len());
}

#[test]
fn test_hover_without_documentation_has_no_rule() {
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], PLUGIN_SMA);
    let position = position_of(PLUGIN_SMA, "get_user_name(", 1);

    let hover = host.analysis().hover(&uri, position).unwrap().unwrap();
    assert_eq!(hover.contents, "```pawn\nnative get_user_name(index, name[], len)\n```");
}

#[test]
fn test_hover_value_label() {
    let (host, uri) = open_plugin(&[], PLUGIN_SMA);
    let position = position_of(PLUGIN_SMA, "g_iCount++", 0);

    let hover = host.analysis().hover(&uri, position).unwrap().unwrap();
    assert_eq!(hover.contents, "```pawn\nnew g_iCount\n```");
}

#[test]
fn test_hover_on_declaration_line_is_none() {
    let (host, uri) = open_plugin(&[], PLUGIN_SMA);
    let position = position_of(PLUGIN_SMA, "new g_iCount", 5);
    assert!(host.analysis().hover(&uri, position).unwrap().is_none());
}

#[test]
fn test_hover_macro_documentation() {
    let source = "/** Larger of two */\n#define MAX(%1,%2) ((%1) > (%2) ? (%1) : (%2))\npublic f()\n{\n\tMAX(1, 2);\n}";
    let (host, uri) = open_plugin(&[], source);
    let hover = host
        .analysis()
        .hover(&uri, position_of(source, "\tMAX(1", 2))
        .unwrap()
        .unwrap();
    assert!(hover.contents.contains("Larger of two\n\nMacro: "));
}
