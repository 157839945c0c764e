//! Line/column ↔ flat offset conversion.
//!
//! Offsets are counted in characters, matching how the query layer walks a
//! document as a `&[char]`.

use super::Position;

/// Precomputed line starts for one text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Char offset at which each line begins
    line_starts: Vec<usize>,
    /// Total length of the text in chars
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut len = 0;
        for c in text.chars() {
            len += 1;
            if c == '\n' {
                line_starts.push(len);
            }
        }
        Self { line_starts, len }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Total length of the indexed text, in chars.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flat char offset of a position.
    ///
    /// A column past the end of its line clamps to the line end (before the
    /// newline); a line past the end of the text clamps to the text length.
    pub fn offset(&self, position: Position) -> usize {
        let Some(&start) = self.line_starts.get(position.line) else {
            return self.len;
        };
        let end = self
            .line_starts
            .get(position.line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.len);
        start + position.column.min(end - start)
    }

    /// Position of a flat char offset (clamped to the text length).
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line, offset - self.line_starts[line])
    }

    /// Char offset at which `line` begins, if the line exists.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}
