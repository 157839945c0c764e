//! Signature help tests.

use pawnsense::Position;
use rstest::rstest;

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;

fn help_at_end_of(line: &str) -> Option<pawnsense::ide::SignatureHelp> {
    let source = format!(
        "#include <amxmodx>\nstock Foo(a, b, c) {{}}\npublic f()\n{{\n{line}\n}}\n"
    );
    let (host, uri) = open_plugin(&[("amxmodx.inc", AMXMODX_INC)], &source);
    let position = Position::new(4, line.chars().count());
    host.analysis().signature_help(&uri, position).unwrap()
}

#[rstest]
#[case("\tFoo(", 0)]
#[case("\tFoo(1, ", 1)]
#[case("\tFoo(1, 2, ", 2)]
#[case("\tFoo(bar(1, 2), ", 1)]
#[case("\tFoo(\"a,b\", ", 1)]
#[case("\tFoo(\"a;b\", ", 1)]
#[case("\tFoo(\"(\", ')', ", 2)]
fn test_active_parameter(#[case] line: &str, #[case] expected: usize) {
    let help = help_at_end_of(line).unwrap();
    assert_eq!(&*help.label, "stock Foo(a, b, c)");
    assert_eq!(help.parameters.len(), 3);
    assert_eq!(help.active_parameter, expected);
}

#[test]
fn test_innermost_call_wins() {
    let help = help_at_end_of("\tFoo(1, get_user_name(2, ").unwrap();
    assert_eq!(&*help.label, "native get_user_name(index, name[], len)");
    assert_eq!(help.active_parameter, 1);
}

#[test]
fn test_named_argument_selects_parameter() {
    let help = help_at_end_of("\tset_task(1.0, \"cb\", .repeat").unwrap();
    assert_eq!(help.active_parameter, 6);
}

#[test]
fn test_documentation_is_carried() {
    let help = help_at_end_of("\tregister_plugin(").unwrap();
    assert!(help.documentation.as_deref().unwrap().starts_with("Registers a plugin."));
}

#[rstest]
#[case("\tunknown(")]
#[case("\tFoo(1);")]
#[case("\t(1, ")]
fn test_no_signature(#[case] line: &str) {
    assert!(help_at_end_of(line).is_none());
}

#[test]
fn test_declaration_line_has_no_signature() {
    let source = "stock Foo(a, b, c) {}";
    let (host, uri) = open_plugin(&[], source);
    let help = host.analysis().signature_help(&uri, Position::new(0, 13)).unwrap();
    assert!(help.is_none());
}
