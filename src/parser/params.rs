//! Parameter list helpers shared by the parser and signature help.

use smol_str::SmolStr;

use crate::syntax::is_identifier_char;

/// Split a raw parameter list on top-level commas.
///
/// Commas nested in `()`, `[]`, `{}` or inside string/char literals do not
/// split. Entries are trimmed; empty entries are dropped.
pub fn split_parameters(text: &str) -> Vec<SmolStr> {
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
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
                push_trimmed(&mut params, &text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    push_trimmed(&mut params, &text[start..]);
    params
}

fn push_trimmed(params: &mut Vec<SmolStr>, param: &str) {
    let param = param.trim();
    if !param.is_empty() {
        params.push(SmolStr::from(param));
    }
}

/// The declared name of one parameter signature.
///
/// Drops a default value (`= ...`), array dimensions, and the tag, then
/// takes the trailing identifier: `const Float:origin[3] = {0.0, 0.0, 0.0}`
/// yields `origin`. Returns `None` for `...` and other nameless entries.
pub fn parameter_name(param: &str) -> Option<&str> {
    let declared = param.split('=').next().unwrap_or(param);
    let declared = declared.split('[').next().unwrap_or(declared).trim_end();
    let start = declared
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_identifier_char(*c))
        .last()
        .map(|(idx, _)| idx)?;
    Some(&declared[start..])
}
