//! Line-oriented declaration parser for Pawn sources
//!
//! This is not a full grammar. The parser extracts the declarations an
//! editor needs for navigation and completion:
//!
//! ```text
//! Source Text
//!     ↓
//! Scanner → per-line code with comments blanked, doc comments, brace depth
//!     ↓
//! Lexer (logos) → tokens for one (possibly joined) line
//!     ↓
//! Shape matching → includes, defines, functions, globals at depth 0
//!     ↓
//! ParserResults → descriptors tagged with the owning FileId
//! ```
//!
//! Bodies (`{ ... }`) are skipped entirely. Malformed lines are ignored;
//! parsing never fails.

mod declarations;
mod lexer;
mod params;
mod scanner;

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::{FileId, Span};
use crate::syntax::{
    CallableDescriptor, ConstantDescriptor, InclusionDescriptor, ParserResults, SymbolKind,
    ValueDescriptor, identifier_key,
};
use declarations::{
    Declaration, Directive, Match, continues_parameter_list, match_declaration, match_directive,
};
use scanner::{ScannedLine, scan_lines};

pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use params::{parameter_name, split_parameters};

/// How many extra lines an unclosed parameter list may pull in.
const MAX_CONTINUATION_LINES: usize = 8;

/// Parse one file into its inclusions and top-level declarations.
///
/// With `skip_static` set, `static` functions and variables are dropped;
/// this is used for files reached through `#include`, whose file-local
/// symbols are invisible to the includer.
pub fn parse(file: &FileId, text: &str, skip_static: bool) -> ParserResults {
    let lines = scan_lines(text);
    let mut table = TableBuilder::new(file.clone(), skip_static);
    let mut pending_doc: Option<Arc<str>> = None;
    let mut idx = 0;

    while idx < lines.len() {
        let line = &lines[idx];
        idx += 1;

        if let Some(doc) = line.doc.as_deref().filter(|_| !line.doc_trails_code) {
            pending_doc = Some(Arc::from(doc));
        }
        let code = line.code.trim();
        if code.is_empty() {
            continue;
        }

        let doc = pending_doc.take();
        if line.depth == 0 {
            if code.starts_with('#') {
                let (joined, consumed) = join_continuations(&lines, idx - 1);
                idx += consumed;
                if let Some(directive) = match_directive(&joined) {
                    table.add_directive(line, &joined, directive, doc);
                }
            } else {
                idx += parse_declaration(&lines, idx - 1, &mut table, doc);
            }
        }

        if line.doc_trails_code {
            pending_doc = line.doc.as_deref().map(Arc::from);
        }
    }

    table.finish()
}

/// Match a declaration starting at `start`, appending following lines while
/// the parameter list stays open. Returns the number of extra lines consumed.
///
/// Joining stops at a line that cannot belong to a parameter list; the text
/// joined so far is then matched as it stands and that line is left for the
/// main loop.
fn parse_declaration(
    lines: &[ScannedLine<'_>],
    start: usize,
    table: &mut TableBuilder,
    doc: Option<Arc<str>>,
) -> usize {
    let line = &lines[start];
    let mut joined = line.code.clone();
    let mut extra = 0;

    loop {
        let next = start + extra + 1;
        let complete = extra >= MAX_CONTINUATION_LINES || next >= lines.len();
        match match_declaration(&joined, complete) {
            Match::Declaration(declaration) => {
                table.add_declaration(line, &joined, declaration, doc);
                return extra;
            }
            Match::Incomplete => {
                let following = &lines[next];
                if following.depth > 0 || !continues_parameter_list(&following.code) {
                    trace!(line = following.number, "parameter list left open");
                    if let Match::Declaration(declaration) = match_declaration(&joined, true) {
                        table.add_declaration(line, &joined, declaration, doc);
                    }
                    return extra;
                }
                joined.push(' ');
                joined.push_str(&lines[next].code);
                extra += 1;
            }
            Match::NoMatch => return 0,
        }
    }
}

/// Join a directive with the lines it continues onto via a trailing `\`.
fn join_continuations(lines: &[ScannedLine<'_>], start: usize) -> (String, usize) {
    let mut joined = lines[start].code.trim_end().to_string();
    let mut consumed = 0;
    while joined.ends_with('\\') && start + consumed + 1 < lines.len() {
        joined.pop();
        consumed += 1;
        joined.push(' ');
        joined.push_str(lines[start + consumed].code.trim());
    }
    (joined, consumed)
}

/// Character column of a byte offset into the line's code.
fn char_column(code: &str, byte_offset: usize) -> usize {
    code.get(..byte_offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(0)
}

fn identifier_span(line: &ScannedLine<'_>, code: &str, offset: usize, name: &str) -> Span {
    Span::on_line(line.number, char_column(code, offset), name.chars().count())
}

/// Accumulates descriptors for one file, applying the within-file rules.
struct TableBuilder {
    file: FileId,
    skip_static: bool,
    inclusions: Vec<InclusionDescriptor>,
    callables: IndexMap<SmolStr, CallableDescriptor, FxBuildHasher>,
    values: Vec<ValueDescriptor>,
    value_keys: FxHashSet<SmolStr>,
    constants: Vec<ConstantDescriptor>,
    constant_keys: FxHashSet<SmolStr>,
}

impl TableBuilder {
    fn new(file: FileId, skip_static: bool) -> Self {
        Self {
            file,
            skip_static,
            inclusions: Vec::new(),
            callables: IndexMap::default(),
            values: Vec::new(),
            value_keys: FxHashSet::default(),
            constants: Vec::new(),
            constant_keys: FxHashSet::default(),
        }
    }

    fn add_directive(
        &mut self,
        line: &ScannedLine<'_>,
        code: &str,
        directive: Directive,
        doc: Option<Arc<str>>,
    ) {
        match directive {
            Directive::Include {
                filename,
                is_local,
                is_silent,
            } => {
                trace!(file = %self.file, %filename, "inclusion");
                self.inclusions.push(InclusionDescriptor {
                    filename,
                    is_local,
                    is_silent,
                    span: Span::on_line(line.number, 0, line.raw.chars().count()),
                });
            }
            Directive::Macro {
                identifier,
                name_offset,
                label,
                parameters,
                definition,
            } => {
                let documentation = match doc {
                    Some(doc) => format!("{doc}\n\nMacro: {definition}"),
                    None => format!("Macro: {definition}"),
                };
                let span = identifier_span(line, code, name_offset, &identifier);
                self.add_callable(CallableDescriptor {
                    identifier,
                    label,
                    kind: SymbolKind::Macro,
                    file: self.file.clone(),
                    span,
                    parameters,
                    documentation: Some(Arc::from(documentation)),
                    is_forward: false,
                    is_static: false,
                });
            }
            Directive::Constant {
                identifier,
                name_offset,
                value,
                label,
            } => {
                if !self.constant_keys.insert(identifier_key(&identifier)) {
                    return;
                }
                let span = identifier_span(line, code, name_offset, &identifier);
                self.constants.push(ConstantDescriptor {
                    identifier,
                    value,
                    label,
                    file: self.file.clone(),
                    span,
                });
            }
        }
    }

    fn add_declaration(
        &mut self,
        line: &ScannedLine<'_>,
        code: &str,
        declaration: Declaration,
        doc: Option<Arc<str>>,
    ) {
        match declaration {
            Declaration::Callable(shape) => {
                if shape.is_static && self.skip_static {
                    return;
                }
                let span = identifier_span(line, code, shape.name_offset, &shape.identifier);
                self.add_callable(CallableDescriptor {
                    identifier: shape.identifier,
                    label: shape.label,
                    kind: SymbolKind::Callable,
                    file: self.file.clone(),
                    span,
                    parameters: shape.parameters,
                    documentation: doc,
                    is_forward: shape.is_forward,
                    is_static: shape.is_static,
                });
            }
            Declaration::Values(shapes) => {
                for shape in shapes {
                    if shape.is_static && self.skip_static {
                        continue;
                    }
                    if !self.value_keys.insert(identifier_key(&shape.identifier)) {
                        continue;
                    }
                    let span = identifier_span(line, code, shape.name_offset, &shape.identifier);
                    self.values.push(ValueDescriptor {
                        identifier: shape.identifier,
                        label: shape.label,
                        is_const: shape.is_const,
                        file: self.file.clone(),
                        span,
                        documentation: doc.clone(),
                        is_static: shape.is_static,
                    });
                }
            }
        }
    }

    /// Later declarations replace earlier ones, except that a body never
    /// replaces a `forward`/`native` prototype.
    fn add_callable(&mut self, callable: CallableDescriptor) {
        let key = callable.key();
        let keeps_prototype = self
            .callables
            .get(&key)
            .is_some_and(|existing| existing.is_forward && !callable.is_forward);
        if keeps_prototype {
            debug!(
                file = %self.file,
                identifier = %callable.identifier,
                "keeping prototype over later definition"
            );
            return;
        }
        self.callables.insert(key, callable);
    }

    fn finish(self) -> ParserResults {
        ParserResults {
            inclusions: self.inclusions,
            callables: self.callables.into_values().collect(),
            values: self.values,
            constants: self.constants,
        }
    }
}
