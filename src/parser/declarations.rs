//! Declaration shapes recognized at brace depth zero.
//!
//! Matching works on the token stream of one (possibly joined) code line.
//! Nothing here knows about files or documentation; the driver in
//! [`super::parse`] turns shapes into descriptors.

use smol_str::SmolStr;

use super::lexer::{Token, TokenKind, tokenize};
use super::params::split_parameters;

/// Storage specifiers accepted in front of a declaration.
const SPECIFIERS: &[&str] = &["forward", "native", "public", "static", "stock", "new", "const"];

/// Words that can never name a declaration.
const RESERVED: &[&str] = &[
    "if", "else", "while", "for", "do", "switch", "case", "default", "return", "sizeof", "tagof",
    "charsof", "enum", "goto", "break", "continue", "operator", "assert", "defined", "state",
    "sleep", "exit", "forward", "native", "public", "static", "stock", "new", "const",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallableShape {
    pub identifier: SmolStr,
    /// Byte offset of the identifier within the matched code
    pub name_offset: usize,
    pub label: SmolStr,
    pub parameters: Vec<SmolStr>,
    pub is_forward: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValueShape {
    pub identifier: SmolStr,
    pub name_offset: usize,
    pub label: SmolStr,
    pub is_const: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Declaration {
    Callable(CallableShape),
    Values(Vec<ValueShape>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Match {
    Declaration(Declaration),
    /// The parameter list is still open; retry with the next line appended
    Incomplete,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Directive {
    Include {
        filename: SmolStr,
        is_local: bool,
        is_silent: bool,
    },
    Macro {
        identifier: SmolStr,
        name_offset: usize,
        label: SmolStr,
        parameters: Vec<SmolStr>,
        /// `NAME(params) body`, used for the synthesized documentation
        definition: SmolStr,
    },
    Constant {
        identifier: SmolStr,
        name_offset: usize,
        value: SmolStr,
        label: SmolStr,
    },
}

fn is_name(token: Option<&Token<'_>>) -> bool {
    token.is_some_and(|t| t.kind == TokenKind::Ident && !RESERVED.contains(&t.text))
}

fn is_kind(token: Option<&Token<'_>>, kind: TokenKind) -> bool {
    token.is_some_and(|t| t.kind == kind)
}

/// Skip a `tag:` prefix starting at `i`.
fn skip_tag(tokens: &[Token<'_>], i: usize) -> usize {
    if is_kind(tokens.get(i), TokenKind::Ident) && is_kind(tokens.get(i + 1), TokenKind::Colon) {
        i + 2
    } else {
        i
    }
}

/// Index of the parenthesis closing the one at `open`.
fn matching_paren(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (j, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
    }
    None
}

/// Whether `code` can be the next line of a parameter list left open on a
/// previous line.
///
/// A statement end or body brace before the list closes, a directive, or a
/// line opening a new declaration means the list was never closed (usually
/// mid-edit). Braces of a default-value initializer (`= {0.0, 0.0}`) are
/// allowed.
pub(crate) fn continues_parameter_list(code: &str) -> bool {
    let tokens = tokenize(code);
    match tokens.first() {
        None => return true,
        Some(first) if first.kind == TokenKind::Directive => return false,
        Some(first)
            if first.kind == TokenKind::Ident
                && SPECIFIERS.contains(&first.text)
                && first.text != "const" =>
        {
            return false;
        }
        Some(_) => {}
    }

    let mut paren_depth = 0usize;
    let mut initializer_depth = 0usize;
    let mut after_assign = false;
    for token in &tokens {
        match token.kind {
            TokenKind::LParen => paren_depth += 1,
            // Closes the open list; whatever follows is the declaration's tail
            TokenKind::RParen if paren_depth == 0 => return true,
            TokenKind::RParen => paren_depth -= 1,
            TokenKind::Semicolon => return false,
            TokenKind::LBrace if after_assign || initializer_depth > 0 => initializer_depth += 1,
            TokenKind::RBrace if initializer_depth > 0 => initializer_depth -= 1,
            TokenKind::LBrace | TokenKind::RBrace => return false,
            _ => {}
        }
        after_assign = token.kind == TokenKind::Operator && token.text == "=";
    }
    true
}

/// Match a function or global-variable declaration.
///
/// `complete` tells the matcher that no more lines can be appended, so an
/// unclosed parameter list takes the rest of the code.
pub(crate) fn match_declaration(code: &str, complete: bool) -> Match {
    let tokens = tokenize(code);
    let mut i = 0;
    let mut specifiers: Vec<&str> = Vec::new();
    while let Some(token) = tokens.get(i) {
        if token.kind == TokenKind::Ident && SPECIFIERS.contains(&token.text) {
            specifiers.push(token.text);
            i += 1;
        } else {
            break;
        }
    }

    let declarators_start = i;
    let name_idx = skip_tag(&tokens, i);
    if !is_name(tokens.get(name_idx)) {
        return Match::NoMatch;
    }

    if is_kind(tokens.get(name_idx + 1), TokenKind::LParen) {
        if specifiers.contains(&"new") {
            return Match::NoMatch;
        }
        return match_callable(code, &tokens, &specifiers, name_idx, complete);
    }

    let starts_value = specifiers
        .first()
        .is_some_and(|s| matches!(*s, "new" | "static" | "const" | "public" | "stock"))
        && !specifiers.iter().any(|s| matches!(*s, "forward" | "native"));
    if !starts_value {
        return Match::NoMatch;
    }

    let values = match_values(code, &tokens, &specifiers, declarators_start);
    if values.is_empty() {
        Match::NoMatch
    } else {
        Match::Declaration(Declaration::Values(values))
    }
}

fn match_callable(
    code: &str,
    tokens: &[Token<'_>],
    specifiers: &[&str],
    name_idx: usize,
    complete: bool,
) -> Match {
    let name = &tokens[name_idx];
    let open = &tokens[name_idx + 1];
    let (params_text, label_end) = match matching_paren(tokens, name_idx + 1) {
        Some(close) => (&code[open.end()..tokens[close].start()], tokens[close].end()),
        None if !complete => return Match::Incomplete,
        None => (&code[open.end()..], code.len()),
    };

    let label = code[tokens[0].start()..label_end].trim();
    Match::Declaration(Declaration::Callable(CallableShape {
        identifier: SmolStr::from(name.text),
        name_offset: name.start(),
        label: SmolStr::from(label),
        parameters: split_parameters(params_text),
        is_forward: specifiers.iter().any(|s| matches!(*s, "forward" | "native")),
        is_static: specifiers.contains(&"static"),
    }))
}

fn match_values(
    code: &str,
    tokens: &[Token<'_>],
    specifiers: &[&str],
    start: usize,
) -> Vec<ValueShape> {
    let prefix = specifiers.join(" ");
    let is_static = specifiers.contains(&"static");
    let mut values = Vec::new();
    let mut j = start;

    loop {
        let text_start = match tokens.get(j) {
            Some(token) => token.start(),
            None => break,
        };
        let mut is_const = specifiers.contains(&"const");
        if tokens.get(j).is_some_and(|t| t.is_ident("const")) {
            is_const = true;
            j += 1;
        }
        j = skip_tag(tokens, j);
        let Some(name) = tokens.get(j).filter(|t| is_name(Some(t))) else {
            break;
        };
        j += 1;

        // Array dimensions belong to the label, the initializer does not
        let mut label_end = name.end();
        let mut depth = 0usize;
        let mut initializer = false;
        while let Some(token) = tokens.get(j) {
            match token.kind {
                TokenKind::Comma | TokenKind::Semicolon if depth == 0 => break,
                TokenKind::Operator if depth == 0 && token.text == "=" => initializer = true,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            if !initializer {
                label_end = token.end();
            }
            j += 1;
        }

        let declarator = code[text_start..label_end].trim();
        values.push(ValueShape {
            identifier: SmolStr::from(name.text),
            name_offset: name.start(),
            label: SmolStr::from(format!("{prefix} {declarator}")),
            is_const,
            is_static,
        });

        if is_kind(tokens.get(j), TokenKind::Comma) {
            j += 1;
        } else {
            break;
        }
    }

    values
}

/// Match a preprocessor line (`#include`, `#tryinclude`, `#define`).
pub(crate) fn match_directive(code: &str) -> Option<Directive> {
    let tokens = tokenize(code);
    let first = tokens.first().filter(|t| t.kind == TokenKind::Directive)?;
    let name = first.text[1..].trim_start();
    match name {
        "include" | "tryinclude" => {
            match_include(&code[first.end()..], name == "tryinclude")
        }
        "define" => match_define(code, &tokens),
        _ => None,
    }
}

fn match_include(rest: &str, is_silent: bool) -> Option<Directive> {
    let rest = rest.trim();
    let (filename, is_local) = if let Some(quoted) = rest.strip_prefix('"') {
        (&quoted[..quoted.find('"')?], true)
    } else if let Some(angled) = rest.strip_prefix('<') {
        (&angled[..angled.find('>')?], false)
    } else {
        (rest.split_whitespace().next()?, false)
    };

    let filename = filename.trim();
    if filename.is_empty() {
        return None;
    }
    Some(Directive::Include {
        filename: SmolStr::from(filename),
        is_local,
        is_silent,
    })
}

fn match_define(code: &str, tokens: &[Token<'_>]) -> Option<Directive> {
    let name = tokens.get(1).filter(|t| t.kind == TokenKind::Ident)?;

    // Function-like only when `(` follows the name without whitespace
    let open = tokens
        .get(2)
        .filter(|t| t.kind == TokenKind::LParen && t.start() == name.end());
    if open.is_some() {
        let (params_text, label_end) = match matching_paren(tokens, 2) {
            Some(close) => (&code[tokens[2].end()..tokens[close].start()], tokens[close].end()),
            None => (&code[tokens[2].end()..], code.len()),
        };
        return Some(Directive::Macro {
            identifier: SmolStr::from(name.text),
            name_offset: name.start(),
            label: SmolStr::from(code[name.start()..label_end].trim()),
            parameters: split_parameters(params_text),
            definition: SmolStr::from(code[name.start()..].trim()),
        });
    }

    let value = code[name.end()..].trim();
    let label = if value.is_empty() {
        format!("#define {}", name.text)
    } else {
        format!("#define {} {}", name.text, value)
    };
    Some(Directive::Constant {
        identifier: SmolStr::from(name.text),
        name_offset: name.start(),
        value: SmolStr::from(value),
        label: SmolStr::from(label),
    })
}
