//! Completion tests.

use pawnsense::Position;
use pawnsense::ide::CompletionKind;
use rstest::rstest;

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

fn source_with_line(line: &str) -> String {
    format!("#include <amxmodx>\nnew g_iCount;\nnew const g_szName[] = \"x\";\n\npublic f()\n{{\n{line}\n}}\n")
}

fn complete_at_end_of(line: &str) -> Vec<pawnsense::ide::CompletionItem> {
    let source = source_with_line(line);
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], &source);
    let position = Position::new(6, line.chars().count());
    host.analysis().completions(&uri, position).unwrap()
}

#[test]
fn test_completion_matches_prefix_case_insensitively() {
    let items = complete_at_end_of("\tREG");
    assert!(items.iter().any(|i| &*i.label == "register_plugin"));
    assert!(items.iter().all(|i| i.label.to_lowercase().starts_with("reg")));
}

#[test]
fn test_completion_order_keywords_first() {
    let items = complete_at_end_of("\tne");
    assert_eq!(items[0].kind, CompletionKind::Keyword);
    assert_eq!(&*items[0].label, "new");
}

#[test]
fn test_completion_kinds() {
    let items = complete_at_end_of("\tg_");
    let count = items.iter().find(|i| &*i.label == "g_iCount").unwrap();
    assert_eq!(count.kind, CompletionKind::Variable);
    assert_eq!(count.detail.as_deref(), Some("new g_iCount"));

    let name = items.iter().find(|i| &*i.label == "g_szName").unwrap();
    assert_eq!(name.kind, CompletionKind::Constant);
}

#[test]
fn test_completion_includes_define_constants() {
    let items = complete_at_end_of("\tMAX_");
    let item = items.iter().find(|i| &*i.label == "MAX_PLAYERS").unwrap();
    assert_eq!(item.kind, CompletionKind::Constant);
    assert_eq!(item.detail.as_deref(), Some("#define MAX_PLAYERS 32"));
}

#[test]
fn test_function_completion_carries_documentation() {
    let items = complete_at_end_of("\tset_t");
    let item = items.iter().find(|i| &*i.label == "set_task").unwrap();
    assert_eq!(item.kind, CompletionKind::Function);
    assert_eq!(item.kind.to_lsp(), 3);
    assert!(item.documentation.as_deref().unwrap().starts_with("Calls a function"));
}

#[rstest]
#[case("\t")]
#[case("\tregister_plugin(g_")]
#[case("\tFoo(bar, ")]
fn test_no_completions(#[case] line: &str) {
    assert!(complete_at_end_of(line).is_empty());
}

#[test]
fn test_at_prefixed_names_insert_without_at() {
    let source = "stock @on_think(ent) {}\npublic f()\n{\n\ton_th\n}";
    let (host, uri) = open_plugin(&[], source);
    let items = host.analysis().completions(&uri, Position::new(3, 6)).unwrap();
    let item = items.iter().find(|i| &*i.label == "@on_think").unwrap();
    assert_eq!(item.insert_text.as_deref(), Some("on_think"));
}
