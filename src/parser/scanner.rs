//! Line scanner: turns raw text into per-line code with comments removed.
//!
//! Comment text is replaced by spaces so token columns still line up with
//! the source line. Block comments opened with `/**` are captured as
//! documentation. Brace depth is tracked across lines; the depth in force at
//! the start of a line is what the declaration matcher looks at.

use super::lexer::{TokenKind, tokenize};

/// One physical line after comment stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScannedLine<'a> {
    /// Zero-based line number
    pub number: usize,
    /// Line text as written, without the line terminator
    pub raw: &'a str,
    /// Code with comments blanked out
    pub code: String,
    /// Doc comment that was closed on this line
    pub doc: Option<String>,
    /// The doc comment closes after the line's code rather than before it
    pub doc_trails_code: bool,
    /// Brace depth at the start of the line
    pub depth: u32,
}

#[derive(Debug, Default)]
struct BlockComment {
    is_doc: bool,
    text: String,
}

/// Scan all lines of `text`.
pub(crate) fn scan_lines(text: &str) -> Vec<ScannedLine<'_>> {
    let mut block: Option<BlockComment> = None;
    let mut depth: u32 = 0;
    let mut lines = Vec::new();

    for (number, raw) in text.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let stripped = strip_comments(raw, &mut block);
        let line_depth = depth;
        depth = apply_braces(depth, &stripped.code);

        lines.push(ScannedLine {
            number,
            raw,
            code: stripped.code,
            doc: stripped.doc,
            doc_trails_code: stripped.doc_trails_code,
            depth: line_depth,
        });
    }

    lines
}

struct Stripped {
    code: String,
    doc: Option<String>,
    doc_trails_code: bool,
}

fn strip_comments(line: &str, block: &mut Option<BlockComment>) -> Stripped {
    let chars: Vec<char> = line.chars().collect();
    let mut code = String::with_capacity(line.len());
    let mut doc = None;
    let mut doc_trails_code = false;
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if block.is_some() {
            if c == '*' && chars.get(i + 1) == Some(&'/') {
                if let Some(finished) = block.take().filter(|b| b.is_doc) {
                    doc = Some(clean_doc(&finished.text));
                    doc_trails_code = !code.trim().is_empty();
                }
                code.push_str("  ");
                i += 2;
                continue;
            }
            if let Some(comment) = block.as_mut().filter(|b| b.is_doc) {
                comment.text.push(c);
            }
            code.push(' ');
            i += 1;
            continue;
        }

        if let Some(q) = quote {
            code.push(c);
            if (c == '^' || c == '\\') && i + 1 < chars.len() {
                code.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match (c, chars.get(i + 1)) {
            ('"', _) | ('\'', _) => {
                quote = Some(c);
                code.push(c);
                i += 1;
            }
            ('/', Some('/')) => {
                code.extend(std::iter::repeat_n(' ', chars.len() - i));
                break;
            }
            ('/', Some('*')) => {
                let is_doc = chars.get(i + 2) == Some(&'*') && chars.get(i + 3) != Some(&'/');
                *block = Some(BlockComment {
                    is_doc,
                    text: String::new(),
                });
                let skip = if is_doc { 3 } else { 2 };
                code.extend(std::iter::repeat_n(' ', skip));
                i += skip;
            }
            _ => {
                code.push(c);
                i += 1;
            }
        }
    }

    // A doc comment still open at end of line keeps its line break
    if let Some(comment) = block.as_mut().filter(|b| b.is_doc) {
        comment.text.push('\n');
    }

    Stripped {
        code,
        doc,
        doc_trails_code,
    }
}

/// Strip the `*` decoration from each line of a doc comment body.
fn clean_doc(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();
    lines.join("\n").trim().to_string()
}

fn apply_braces(mut depth: u32, code: &str) -> u32 {
    for token in tokenize(code) {
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}
