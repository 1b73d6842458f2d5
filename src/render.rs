//! Render programs and the diff that produces them.
//!
//! A [`RenderProgram`] is the ordered list of primitive display operations
//! that brings the rendered input region from one logical state to the next.
//! The host executes it verbatim; choosing control-code bytes for each
//! primitive is the host's job (see [`crate::ansi`] for the default
//! encoding).

use crate::layout::{Layout, Position};
use alloc::string::String;
use alloc::vec::Vec;

/// One primitive display operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// Move the cursor relative to its current cell. Positive `rows` moves
    /// down, positive `cols` moves right.
    MoveCursor { rows: isize, cols: isize },
    /// Write literal text starting at the cursor. Never crosses a row end.
    WriteText(String),
    /// Clear from the cursor to the end of the current row.
    ClearToEndOfRow,
    /// Return the cursor to column 0 of the current row.
    CarriageReturn,
}

/// An ordered sequence of [`RenderOp`]s.
///
/// # Examples
///
/// ```
/// use lineterm::{LineEditor, RenderOp};
///
/// let mut editor = LineEditor::new(80);
/// let program = editor.insert("hi", 0);
/// assert_eq!(program.ops(), [RenderOp::WriteText("hi".into())]);
///
/// let program = editor.move_cursor_by(-1);
/// assert!(program.is_pure_motion());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderProgram {
    ops: Vec<RenderOp>,
}

impl RenderProgram {
    /// Creates an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// The operations in execution order.
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if executing the program would change nothing.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterates over the operations.
    pub fn iter(&self) -> core::slice::Iter<'_, RenderOp> {
        self.ops.iter()
    }

    /// Returns `true` if the program only moves the cursor.
    pub fn is_pure_motion(&self) -> bool {
        self.ops
            .iter()
            .all(|op| matches!(op, RenderOp::MoveCursor { .. }))
    }

    /// Consumes the program, returning its operations.
    pub fn into_ops(self) -> Vec<RenderOp> {
        self.ops
    }

    /// Appends all operations of `other`.
    pub fn extend(&mut self, other: RenderProgram) {
        self.ops.extend(other.ops);
    }

    pub(crate) fn move_cursor(&mut self, from: Position, to: Position) {
        let rows = to.row as isize - from.row as isize;
        let cols = to.col as isize - from.col as isize;
        if rows != 0 || cols != 0 {
            self.ops.push(RenderOp::MoveCursor { rows, cols });
        }
    }

    fn write_text(&mut self, text: String) {
        if !text.is_empty() {
            self.ops.push(RenderOp::WriteText(text));
        }
    }

    fn push(&mut self, op: RenderOp) {
        self.ops.push(op);
    }
}

impl IntoIterator for RenderProgram {
    type Item = RenderOp;
    type IntoIter = alloc::vec::IntoIter<RenderOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a RenderProgram {
    type Item = &'a RenderOp;
    type IntoIter = core::slice::Iter<'a, RenderOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// A logical line state as it is (or will be) rendered.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame<'a> {
    pub text: &'a [char],
    pub cursor: usize,
}

/// Computes the program that turns the rendering of `old` into that of `new`.
///
/// The display is assumed to show exactly `old`, with the cursor at
/// `old.cursor`. Rows whose cells are identical in both frames are left
/// alone; a changed row is cleared and rewritten from its first differing
/// column only.
pub(crate) fn diff(layout: Layout, old: Frame<'_>, new: Frame<'_>) -> RenderProgram {
    let mut program = RenderProgram::new();
    let mut at = layout.position(old.cursor);
    let last_row = layout
        .num_rows(old.text.len())
        .max(layout.num_rows(new.text.len()));
    let mut touched = 0usize;

    for row in layout.first_text_row()..last_row {
        let old_cells = &old.text[layout.row_span(row, old.text.len())];
        let new_cells = &new.text[layout.row_span(row, new.text.len())];
        if old_cells == new_cells {
            continue;
        }
        touched += 1;

        let common = old_cells
            .iter()
            .zip(new_cells)
            .take_while(|(a, b)| a == b)
            .count();
        let start = Position::new(row, layout.row_start_col(row) + common);
        program.move_cursor(at, start);
        if common < old_cells.len() {
            program.push(RenderOp::ClearToEndOfRow);
        }

        let tail = &new_cells[common..];
        program.write_text(tail.iter().collect());
        let end = start.col + tail.len();
        at = if end >= layout.width() {
            // The terminal parks the cursor in the last column after filling
            // a row; pin it to a known cell.
            program.push(RenderOp::CarriageReturn);
            Position::new(row, 0)
        } else {
            Position::new(row, end)
        };
    }

    program.move_cursor(at, layout.position(new.cursor));
    tracing::trace!(ops = program.len(), rows = touched, "render diff");
    program
}

/// Computes the cursor-only program for moving from `from` to `to`.
pub(crate) fn motion(layout: Layout, from: usize, to: usize) -> RenderProgram {
    let mut program = RenderProgram::new();
    program.move_cursor(layout.position(from), layout.position(to));
    program
}

#[cfg(all(test, feature = "std"))]
pub(crate) mod screen {
    //! A tiny display model used to check render programs by executing them.

    use super::{RenderOp, RenderProgram};
    use crate::layout::{Layout, Position};

    pub const PROMPT_CELL: char = '>';

    #[derive(Debug)]
    pub struct Screen {
        width: usize,
        rows: Vec<Vec<char>>,
        cursor: Position,
    }

    impl Screen {
        /// A screen showing only a prompt, cursor right after it.
        pub fn with_prompt(layout: Layout) -> Self {
            let mut screen = Self {
                width: layout.width(),
                rows: vec![Vec::new()],
                cursor: Position::default(),
            };
            for _ in 0..layout.prompt_width() {
                screen.put(PROMPT_CELL);
            }
            screen.cursor = layout.position(0);
            screen.ensure_row();
            screen
        }

        fn ensure_row(&mut self) {
            while self.rows.len() <= self.cursor.row {
                self.rows.push(Vec::new());
            }
        }

        fn put(&mut self, c: char) {
            self.ensure_row();
            let row = &mut self.rows[self.cursor.row];
            while row.len() <= self.cursor.col {
                row.push(' ');
            }
            row[self.cursor.col] = c;
            self.cursor.col += 1;
            if self.cursor.col == self.width {
                self.cursor.col = 0;
                self.cursor.row += 1;
            }
        }

        pub fn run(&mut self, program: &RenderProgram) {
            for op in program {
                match op {
                    RenderOp::MoveCursor { rows, cols } => {
                        let row = self.cursor.row as isize + rows;
                        let col = self.cursor.col as isize + cols;
                        assert!(row >= 0, "moved above the prompt row");
                        assert!(
                            (0..self.width as isize).contains(&col),
                            "moved outside the row: {col}"
                        );
                        self.cursor = Position::new(row as usize, col as usize);
                        self.ensure_row();
                    }
                    RenderOp::WriteText(text) => {
                        let count = text.chars().count();
                        assert!(
                            self.cursor.col + count <= self.width,
                            "write crosses the row end"
                        );
                        text.chars().for_each(|c| self.put(c));
                        if self.cursor.col == 0 && count > 0 {
                            // Pending wrap: the terminal keeps the cursor on
                            // the row it just filled.
                            self.cursor.row -= 1;
                            self.cursor.col = self.width - 1;
                        }
                    }
                    RenderOp::ClearToEndOfRow => {
                        self.ensure_row();
                        self.rows[self.cursor.row].truncate(self.cursor.col);
                    }
                    RenderOp::CarriageReturn => self.cursor.col = 0,
                }
            }
        }

        pub fn cursor(&self) -> Position {
            self.cursor
        }

        /// The visible rows with trailing blanks and blank rows removed.
        pub fn lines(&self) -> Vec<String> {
            let mut lines: Vec<String> = self
                .rows
                .iter()
                .map(|r| r.iter().collect::<String>().trim_end().to_string())
                .collect();
            while lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
                lines.pop();
            }
            lines
        }
    }

    /// The rows a prompt-prefixed line should occupy.
    pub fn expected_lines(layout: Layout, text: &str) -> Vec<String> {
        let flat: Vec<char> = core::iter::repeat(PROMPT_CELL)
            .take(layout.prompt_width())
            .chain(text.chars())
            .collect();
        let mut lines: Vec<String> = flat
            .chunks(layout.width())
            .map(|chunk| chunk.iter().collect::<String>().trim_end().to_string())
            .collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        while lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::screen::{expected_lines, Screen};
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn frame(text: &[char], cursor: usize) -> Frame<'_> {
        Frame { text, cursor }
    }

    /// Renders `before`, applies the diff to `after` and checks the result
    /// against a fresh rendering.
    fn check(
        layout: Layout,
        before: &str,
        before_cursor: usize,
        after: &str,
        after_cursor: usize,
    ) -> RenderProgram {
        let (old, new) = (chars(before), chars(after));
        let mut screen = Screen::with_prompt(layout);
        screen.run(&diff(layout, frame(&[], 0), frame(&old, before_cursor)));

        let program = diff(layout, frame(&old, before_cursor), frame(&new, after_cursor));
        screen.run(&program);
        assert_eq!(screen.lines(), expected_lines(layout, after));
        assert_eq!(screen.cursor(), layout.position(after_cursor));
        program
    }

    #[test]
    fn test_identical_frames_yield_empty_program() {
        let text = chars("hello");
        let program = diff(Layout::new(10, 2), frame(&text, 3), frame(&text, 3));
        assert!(program.is_empty());
    }

    #[test]
    fn test_append_writes_only_new_cell() {
        let layout = Layout::new(10, 2);
        let program = check(layout, "ab", 2, "abc", 3);
        assert_eq!(program.ops(), [RenderOp::WriteText("c".into())]);
    }

    #[test]
    fn test_insert_across_boundary_rewrites_following_rows() {
        let layout = Layout::new(5, 2);
        let program = check(layout, "abcdef", 1, "aXbcdef", 2);
        let writes: Vec<&RenderOp> = program
            .iter()
            .filter(|op| matches!(op, RenderOp::WriteText(_)))
            .collect();
        assert_eq!(
            writes,
            [
                &RenderOp::WriteText("Xb".into()),
                &RenderOp::WriteText("cdef".into()),
            ]
        );
    }

    #[test]
    fn test_shrink_clears_dropped_row() {
        let layout = Layout::new(5, 2);
        let program = check(layout, "abcdef", 6, "abc", 3);
        assert!(program.ops().contains(&RenderOp::ClearToEndOfRow));
        assert!(!program
            .iter()
            .any(|op| matches!(op, RenderOp::WriteText(_))));
    }

    #[test]
    fn test_unchanged_rows_are_skipped() {
        let layout = Layout::new(4, 0);
        let program = check(layout, "aaaabbbbcccc", 12, "aaaaXbbbcccc", 12);
        assert_eq!(
            program.ops(),
            [
                RenderOp::MoveCursor { rows: -2, cols: 0 },
                RenderOp::ClearToEndOfRow,
                RenderOp::WriteText("Xbbb".into()),
                RenderOp::CarriageReturn,
                RenderOp::MoveCursor { rows: 2, cols: 0 },
            ]
        );
    }

    #[test]
    fn test_full_row_ends_with_carriage_return() {
        let layout = Layout::new(5, 2);
        let program = check(layout, "", 0, "abcdef", 6);
        assert_eq!(
            program.ops(),
            [
                RenderOp::WriteText("abc".into()),
                RenderOp::CarriageReturn,
                RenderOp::MoveCursor { rows: 1, cols: 0 },
                RenderOp::WriteText("def".into()),
            ]
        );
    }

    #[test]
    fn test_cursor_lands_below_exactly_full_line() {
        let layout = Layout::new(5, 1);
        let program = check(layout, "abc", 3, "abcd", 4);
        assert_eq!(
            program.ops(),
            [
                RenderOp::WriteText("d".into()),
                RenderOp::CarriageReturn,
                RenderOp::MoveCursor { rows: 1, cols: 0 },
            ]
        );
    }

    #[test]
    fn test_replace_with_shorter_line() {
        let layout = Layout::new(6, 3);
        check(layout, "a long command line", 19, "ls", 2);
    }

    #[test]
    fn test_prompt_wider_than_row() {
        let layout = Layout::new(4, 9);
        check(layout, "abc", 3, "abcdefgh", 8);
        check(layout, "abcdefgh", 2, "ab", 2);
    }

    #[test]
    fn test_motion_is_single_move() {
        let layout = Layout::new(5, 2);
        let program = motion(layout, 6, 1);
        assert_eq!(program.ops(), [RenderOp::MoveCursor { rows: -1, cols: 0 }]);
        assert!(program.is_pure_motion());
        assert!(motion(layout, 2, 2).is_empty());
    }
}
