//! Hard-wrap geometry for a prompt-prefixed line on a fixed-width display.
//!
//! Every value here is derived from `(text length, cursor, display width,
//! prompt width)` on demand. Nothing is cached, so there is nothing to
//! invalidate when the line changes at an arbitrary offset.
//!
//! The line is laid out as if the prompt and the text were one flat run of
//! cells: the character at index `i` occupies flat cell `prompt_width + i`,
//! which lands on row `flat / width` and column `flat % width`. Rows are cut
//! by character count, never at word boundaries.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

/// A cell on the display, relative to the row where the prompt starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Row offset from the prompt row.
    pub row: usize,
    /// Column within the row.
    pub col: usize,
}

impl Position {
    /// Creates a position from a row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Display geometry: the column count and the prompt that precedes the text.
///
/// # Examples
///
/// ```
/// use lineterm::{Layout, Position};
///
/// let layout = Layout::new(5, 2);
/// assert_eq!(layout.num_rows(6), 2);
/// assert_eq!(layout.position(6), Position::new(1, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    prompt_width: usize,
}

impl Layout {
    /// Creates a layout. A zero `width` is clamped to one column.
    pub fn new(width: usize, prompt_width: usize) -> Self {
        Self {
            width: width.max(1),
            prompt_width,
        }
    }

    /// Columns per display row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Columns consumed by the prompt.
    pub fn prompt_width(&self) -> usize {
        self.prompt_width
    }

    /// Returns a copy of this layout with a different prompt width.
    pub fn with_prompt_width(self, prompt_width: usize) -> Self {
        Self {
            prompt_width,
            ..self
        }
    }

    /// Total cells occupied by the prompt plus `len` characters.
    pub fn actual_length(&self, len: usize) -> usize {
        len + self.prompt_width
    }

    /// Rows occupied by the prompt plus `len` characters, never less than one.
    pub fn num_rows(&self, len: usize) -> usize {
        self.actual_length(len).div_ceil(self.width).max(1)
    }

    /// Display cell of the character index `index` (or of the cursor sitting
    /// before it).
    ///
    /// An index at the very end of a line that fills its last row exactly
    /// maps to column 0 of the following row.
    pub fn position(&self, index: usize) -> Position {
        let flat = self.actual_length(index);
        Position {
            row: flat / self.width,
            col: flat % self.width,
        }
    }

    /// The first row that can hold text, i.e. the row where the prompt ends.
    pub fn first_text_row(&self) -> usize {
        self.prompt_width / self.width
    }

    /// Column where text starts on `row`.
    ///
    /// Only the first text row is offset by the prompt; later rows start at 0.
    pub fn row_start_col(&self, row: usize) -> usize {
        if row == self.first_text_row() {
            self.prompt_width % self.width
        } else {
            0
        }
    }

    /// Character indices shown on `row` for a line of `len` characters.
    ///
    /// Rows before [`first_text_row`](Self::first_text_row) and rows past the
    /// end of the line yield an empty range.
    pub fn row_span(&self, row: usize, len: usize) -> Range<usize> {
        if row < self.first_text_row() {
            return 0..0;
        }
        let row_start = row * self.width;
        let row_end = row_start + self.width;
        let start = row_start.max(self.prompt_width) - self.prompt_width;
        let end = row_end.saturating_sub(self.prompt_width).min(len);
        start.min(end)..end
    }

    /// Splits `text` into display rows.
    ///
    /// The first entry is the part of the text sharing a row with the prompt;
    /// every following entry holds `width` characters except possibly the
    /// last. An empty line yields a single empty row.
    pub fn wrap(&self, text: &[char]) -> Vec<String> {
        let last = self.num_rows(text.len());
        (self.first_text_row()..last.max(self.first_text_row() + 1))
            .map(|row| text[self.row_span(row, text.len())].iter().collect())
            .collect()
    }
}
