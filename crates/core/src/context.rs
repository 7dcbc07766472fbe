//! Editing context handed to every flow
//!
//! Instead of reaching into a live editor, flows receive the active file,
//! its buffer text and the current selection as plain values.

use std::path::{Path, PathBuf};

/// Byte range of the current selection; `start == end` for a bare cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn cursor(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }
}

/// Zero-based line and column (in characters)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Byte offset of this position in `text`, clamped to the line's content
    pub fn offset_in(&self, text: &str) -> usize {
        let mut line_start = 0;
        for (index, line) in text.split_inclusive('\n').enumerate() {
            if index == self.line {
                let content = line.trim_end_matches('\n').trim_end_matches('\r');
                let column = content
                    .char_indices()
                    .nth(self.column)
                    .map(|(i, _)| i)
                    .unwrap_or(content.len());
                return line_start + column;
            }
            line_start += line.len();
        }
        text.len()
    }
}

/// The line the cursor sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorLine<'a> {
    pub text: &'a str,
    /// Byte offset of the line's first character in the buffer
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingContext {
    pub file_path: PathBuf,
    pub text: String,
    pub selection: Selection,
}

impl EditingContext {
    pub fn new(file_path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            text: text.into(),
            selection: Selection::default(),
        }
    }

    pub fn with_cursor(mut self, offset: usize) -> Self {
        self.selection = Selection::cursor(offset);
        self
    }

    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.selection = Selection { start, end };
        self
    }

    pub fn with_position(self, position: Position) -> Self {
        let offset = position.offset_in(&self.text);
        self.with_cursor(offset)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Selection start, clamped into the buffer
    pub fn insertion_point(&self) -> usize {
        floor_boundary(&self.text, self.selection.start)
    }

    /// Line containing the end of the selection, without its line terminator
    pub fn cursor_line(&self) -> CursorLine<'_> {
        let end = floor_boundary(&self.text, self.selection.end);
        let start = self.text[..end].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let stop = self.text[end..]
            .find('\n')
            .map(|i| end + i)
            .unwrap_or(self.text.len());
        CursorLine {
            text: self.text[start..stop].trim_end_matches('\r'),
            offset: start,
        }
    }

    pub fn text_before_cursor(&self) -> &str {
        &self.text[..floor_boundary(&self.text, self.selection.start)]
    }
}

fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
