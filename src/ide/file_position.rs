//! A cursor inside an open document.

use crate::base::{FileId, LineIndex, Position, Span};

/// Document text prepared for cursor queries.
#[derive(Clone, Debug)]
pub struct DocumentText {
    chars: Vec<char>,
    line_index: LineIndex,
}

impl DocumentText {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            line_index: LineIndex::new(text),
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Span between two char offsets.
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.line_index.position(start), self.line_index.position(end))
    }
}

/// File, text and zero-based position of a query.
#[derive(Clone, Copy, Debug)]
pub struct FilePosition<'a> {
    pub file: &'a FileId,
    pub text: &'a DocumentText,
    pub position: Position,
}

impl<'a> FilePosition<'a> {
    pub fn new(file: &'a FileId, text: &'a DocumentText, position: Position) -> Self {
        Self {
            file,
            text,
            position,
        }
    }

    /// Flat char offset of the cursor.
    pub fn offset(&self) -> usize {
        self.text.line_index().offset(self.position)
    }

    pub fn chars(&self) -> &'a [char] {
        self.text.chars()
    }
}
