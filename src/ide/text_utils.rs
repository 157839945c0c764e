//! Cursor-relative text scanning for the query layer.
//!
//! All functions work on a document as a `&[char]` with a flat char offset,
//! the same unit [`LineIndex`](crate::base::LineIndex) produces.

pub use crate::syntax::is_identifier_char;

/// An identifier found under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifierAtCursor {
    pub name: String,
    /// Char offset of the first character
    pub start: usize,
    /// Char offset after the last character
    pub end: usize,
    /// Followed by `(`, ignoring whitespace
    pub is_call: bool,
}

/// Find the boundaries of the identifier covering `offset`.
///
/// The character at `offset` itself must be an identifier character.
pub fn find_word_boundaries(chars: &[char], offset: usize) -> Option<(usize, usize)> {
    if !chars.get(offset).is_some_and(|c| is_identifier_char(*c)) {
        return None;
    }

    let mut start = offset;
    while start > 0 && is_identifier_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = offset;
    while end < chars.len() && is_identifier_char(chars[end]) {
        end += 1;
    }
    Some((start, end))
}

/// The identifier under the cursor, and whether it is used like a call.
pub fn identifier_at_cursor(chars: &[char], offset: usize) -> Option<IdentifierAtCursor> {
    let (start, end) = find_word_boundaries(chars, offset)?;
    let is_call = chars[end..]
        .iter()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| *c == '(');
    Some(IdentifierAtCursor {
        name: chars[start..end].iter().collect(),
        start,
        end,
        is_call,
    })
}

/// The run of identifier characters strictly before the cursor.
pub fn identifier_behind_cursor(chars: &[char], offset: usize) -> String {
    let offset = offset.min(chars.len());
    let start = chars[..offset]
        .iter()
        .rposition(|c| !is_identifier_char(*c))
        .map_or(0, |idx| idx + 1);
    chars[start..offset].iter().collect()
}

fn line_start(chars: &[char], offset: usize) -> usize {
    chars[..offset]
        .iter()
        .rposition(|c| *c == '\n')
        .map_or(0, |idx| idx + 1)
}

/// Whether the cursor sits inside an open parenthesis group on its line.
///
/// Counts `(` against `)` from the start of the line; strings are not
/// considered.
pub fn inside_parentheses(chars: &[char], offset: usize) -> bool {
    let offset = offset.min(chars.len());
    let mut depth: i32 = 0;
    for c in &chars[line_start(chars, offset)..offset] {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth > 0
}

/// The innermost unmatched call around the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnclosingCall {
    /// Identifier before the open parenthesis; may be empty
    pub name: String,
    /// Char offset of the `(`
    pub open_paren: usize,
}

/// Scan backward from the cursor for the innermost unmatched `(`.
///
/// A `;` on the way means the cursor is past the end of the statement and
/// there is no call. Parentheses and semicolons inside string or character
/// literals are skipped.
pub fn enclosing_call(chars: &[char], offset: usize) -> Option<EnclosingCall> {
    let offset = offset.min(chars.len());
    let in_literal = literal_mask(&chars[..offset]);
    let mut depth = 0usize;

    for idx in (0..offset).rev() {
        if in_literal[idx] {
            continue;
        }
        match chars[idx] {
            ';' => return None,
            ')' => depth += 1,
            '(' if depth > 0 => depth -= 1,
            '(' => {
                let mut end = idx;
                while end > 0 && chars[end - 1].is_whitespace() {
                    end -= 1;
                }
                let mut start = end;
                while start > 0 && is_identifier_char(chars[start - 1]) {
                    start -= 1;
                }
                return Some(EnclosingCall {
                    name: chars[start..end].iter().collect(),
                    open_paren: idx,
                });
            }
            _ => {}
        }
    }
    None
}

/// Marks every char that belongs to a string or character literal, quotes
/// included. Literals end at a line break; `^` and `\` escape the next
/// character. An unterminated literal runs to the end of its line.
fn literal_mask(chars: &[char]) -> Vec<bool> {
    let mut mask = vec![false; chars.len()];
    let mut quote: Option<char> = None;
    let mut idx = 0;

    while idx < chars.len() {
        let c = chars[idx];
        if c == '\n' {
            quote = None;
            idx += 1;
            continue;
        }
        match quote {
            Some(q) => {
                mask[idx] = true;
                let escapes = chars.get(idx + 1).is_some_and(|next| *next != '\n');
                if (c == '^' || c == '\\') && escapes {
                    mask[idx + 1] = true;
                    idx += 1;
                } else if c == q {
                    quote = None;
                }
            }
            None if c == '"' || c == '\'' => {
                mask[idx] = true;
                quote = Some(c);
            }
            None => {}
        }
        idx += 1;
    }
    mask
}

/// Contents of the string literal containing the cursor, with the char
/// offset of its opening quote.
///
/// Literals do not span lines; `^` and `\` escape the next character.
pub fn string_at_cursor(chars: &[char], offset: usize) -> Option<(String, usize)> {
    let offset = offset.min(chars.len());
    let mut open: Option<usize> = None;
    let mut idx = line_start(chars, offset);

    while idx < chars.len() && chars[idx] != '\n' {
        let c = chars[idx];
        match open {
            Some(start) => {
                if c == '^' || c == '\\' {
                    idx += 2;
                    continue;
                }
                if c == '"' {
                    if start < offset && offset <= idx {
                        return Some((chars[start + 1..idx].iter().collect(), start));
                    }
                    open = None;
                }
            }
            None => {
                if idx >= offset {
                    return None;
                }
                if c == '"' {
                    open = Some(idx);
                }
            }
        }
        idx += 1;
    }
    None
}
