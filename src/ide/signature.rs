//! Signature help implementation.

use std::sync::Arc;

use smol_str::SmolStr;

use super::file_position::FilePosition;
use super::text_utils::{enclosing_call, is_identifier_char};
use crate::hir::SymbolView;
use crate::parser::parameter_name;

/// Signature of the call around the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHelp {
    /// Full prototype text
    pub label: Arc<str>,
    /// One entry per declared parameter, as written
    pub parameters: Vec<SmolStr>,
    pub documentation: Option<Arc<str>>,
    /// Zero-based; may point past the last parameter
    pub active_parameter: usize,
}

/// Get signature help at a position.
///
/// Finds the innermost open call before the cursor and counts the
/// top-level commas between its `(` and the cursor. When the argument being
/// typed starts with `.name`, the parameter of that name is active instead.
pub fn signature_help(pos: FilePosition<'_>, symbols: &SymbolView) -> Option<SignatureHelp> {
    let chars = pos.chars();
    let offset = pos.offset().min(chars.len());
    let call = enclosing_call(chars, offset)?;
    if call.name.is_empty() {
        return None;
    }

    let callable = symbols.callable(&call.name)?;
    if callable.file == *pos.file && callable.span.start.line == pos.position.line {
        return None;
    }

    let (commas, current_start) = count_arguments(&chars[call.open_paren + 1..offset]);
    let current = &chars[call.open_paren + 1 + current_start..offset];
    let active_parameter = named_argument(current)
        .and_then(|name| {
            callable.parameters.iter().position(|param| {
                parameter_name(param).is_some_and(|p| p.eq_ignore_ascii_case(&name))
            })
        })
        .unwrap_or(commas);

    Some(SignatureHelp {
        label: Arc::from(callable.label.as_str()),
        parameters: callable.parameters.clone(),
        documentation: callable.documentation.clone(),
        active_parameter,
    })
}

/// Top-level commas in `args`, and the offset where the last argument
/// starts. Nested groups and string/char literals are skipped.
fn count_arguments(args: &[char]) -> (usize, usize) {
    let mut commas = 0;
    let mut current_start = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, &c) in args.iter().enumerate() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '^' || c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                commas += 1;
                current_start = idx + 1;
            }
            _ => {}
        }
    }
    (commas, current_start)
}

/// `speed` for an argument written as `.speed = ...`.
fn named_argument(argument: &[char]) -> Option<String> {
    let mut chars = argument.iter().copied().skip_while(|c| c.is_whitespace());
    if chars.next()? != '.' {
        return None;
    }
    let name: String = chars.take_while(|c| is_identifier_char(*c)).collect();
    (!name.is_empty()).then_some(name)
}
