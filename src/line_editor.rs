//! The editable input line and its render programs.

use crate::layout::{Layout, Position};
use crate::render::{self, Frame, RenderProgram};
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

/// Text buffer with cursor tracking, rendered on a fixed-width display.
///
/// Every mutating operation updates the logical state and returns the
/// [`RenderProgram`] that brings the display from the previous rendering to
/// the new one. Indices and deltas are clamped, never rejected, so
/// `0 <= cursor <= len` holds after any sequence of calls.
///
/// Indices count characters (`char`s), not bytes.
///
/// # Examples
///
/// ```
/// use lineterm::{LineEditor, Position};
///
/// let mut editor = LineEditor::new(5);
/// editor.set_prompt_width(2);
/// editor.insert("abcdef", 0);
///
/// assert_eq!(editor.num_rows(), 2);
/// assert_eq!(editor.rows(), ["abc", "def"]);
/// assert_eq!(editor.cursor_position(), Position::new(1, 3));
/// ```
#[derive(Debug, Clone)]
pub struct LineEditor {
    text: Vec<char>,
    cursor: usize,
    layout: Layout,
}

impl LineEditor {
    /// Creates an empty editor for a display `display_width` columns wide.
    ///
    /// A zero width is clamped to one column.
    pub fn new(display_width: usize) -> Self {
        Self {
            text: Vec::new(),
            cursor: 0,
            layout: Layout::new(display_width, 0),
        }
    }

    /// Returns the line as a `String`.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Returns the line as characters.
    pub fn chars(&self) -> &[char] {
        &self.text
    }

    /// Length of the line in characters.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Index where the next inserted character lands.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn display_width(&self) -> usize {
        self.layout.width()
    }

    pub fn prompt_width(&self) -> usize {
        self.layout.prompt_width()
    }

    /// Current geometry.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Rows the prompt and text occupy.
    pub fn num_rows(&self) -> usize {
        self.layout.num_rows(self.text.len())
    }

    /// Display cell of the cursor.
    pub fn cursor_position(&self) -> Position {
        self.layout.position(self.cursor)
    }

    /// The line split into display rows.
    pub fn rows(&self) -> Vec<String> {
        self.layout.wrap(&self.text)
    }

    /// Splices `text` in at `index` and moves the cursor past it.
    ///
    /// `index` is clamped to the line length. Every row from the first
    /// changed one to the new last row is redrawn, since a mid-line insert
    /// shifts the rest of the line across row boundaries.
    pub fn insert(&mut self, text: &str, index: usize) -> RenderProgram {
        let index = index.min(self.text.len());
        let before = self.text.clone();
        let old_cursor = self.cursor;

        let tail = self.text.split_off(index);
        self.text.extend(text.chars());
        self.cursor = self.text.len();
        self.text.extend(tail);
        self.redraw_from(&before, old_cursor)
    }

    /// Removes the character at `index`.
    ///
    /// With `is_backspace` the cursor additionally moves one left after the
    /// removal (the deleted character was before it); otherwise the cursor
    /// stays put, clamped to the new length. An `index` past the end is a
    /// no-op and yields an empty program.
    pub fn remove(&mut self, index: usize, is_backspace: bool) -> RenderProgram {
        if index >= self.text.len() {
            return RenderProgram::new();
        }
        let before = self.text.clone();
        let old_cursor = self.cursor;

        self.text.remove(index);
        if is_backspace {
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.cursor = self.cursor.min(self.text.len());
        self.redraw_from(&before, old_cursor)
    }

    /// Removes the characters in `range`, clamped to the line.
    ///
    /// A cursor inside the range moves to its start; a cursor after it shifts
    /// left by the number of removed characters.
    pub fn remove_range(&mut self, range: Range<usize>) -> RenderProgram {
        let end = range.end.min(self.text.len());
        let start = range.start.min(end);
        if start == end {
            return RenderProgram::new();
        }
        let before = self.text.clone();
        let old_cursor = self.cursor;

        self.text.drain(start..end);
        self.cursor = if self.cursor >= end {
            self.cursor - (end - start)
        } else {
            self.cursor.min(start)
        };
        self.redraw_from(&before, old_cursor)
    }

    /// Replaces the whole line and moves the cursor to its end.
    pub fn replace_all(&mut self, text: &str) -> RenderProgram {
        let before = core::mem::replace(&mut self.text, text.chars().collect());
        let old_cursor = self.cursor;
        self.cursor = self.text.len();
        self.redraw_from(&before, old_cursor)
    }

    /// Moves the cursor by `delta` characters, clamped to the line.
    ///
    /// The program only moves the cursor; nothing is cleared or rewritten.
    pub fn move_cursor_by(&mut self, delta: isize) -> RenderProgram {
        let target = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta.unsigned_abs())
        };
        self.move_cursor_to(target)
    }

    /// Moves the cursor to the end of the line.
    pub fn move_cursor_to_end(&mut self) -> RenderProgram {
        self.move_cursor_to(self.text.len())
    }

    /// Moves the cursor to `index`, clamped to the line.
    pub fn move_cursor_to(&mut self, index: usize) -> RenderProgram {
        let from = self.cursor;
        self.cursor = index.min(self.text.len());
        render::motion(self.layout, from, self.cursor)
    }

    /// Sets the width of the prompt preceding the text.
    ///
    /// Called after the host has written a fresh prompt, with the display
    /// cursor right after it. The returned program draws the current line
    /// behind the new prompt; for an empty line it is empty.
    pub fn set_prompt_width(&mut self, width: usize) -> RenderProgram {
        self.layout = self.layout.with_prompt_width(width);
        render::diff(
            self.layout,
            Frame {
                text: &[],
                cursor: 0,
            },
            self.frame(),
        )
    }

    /// Clears the line after submission.
    ///
    /// Rows rendered so far stay on the display as committed output; the
    /// next program starts from an empty line.
    pub fn reset(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Start of the word left of the cursor.
    pub fn word_start_left(&self) -> usize {
        let mut pos = self.cursor;

        // Skip the gap (if any), then the word before it.
        while pos > 0 && !is_word_char(self.text[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(self.text[pos - 1]) {
            pos -= 1;
        }

        pos
    }

    /// Start of the next word right of the cursor.
    pub fn word_start_right(&self) -> usize {
        let len = self.text.len();
        let mut pos = self.cursor;

        while pos < len && is_word_char(self.text[pos]) {
            pos += 1;
        }
        while pos < len && !is_word_char(self.text[pos]) {
            pos += 1;
        }

        pos
    }

    fn frame(&self) -> Frame<'_> {
        Frame {
            text: &self.text,
            cursor: self.cursor,
        }
    }

    fn redraw_from(&self, before: &[char], old_cursor: usize) -> RenderProgram {
        render::diff(
            self.layout,
            Frame {
                text: before,
                cursor: old_cursor,
            },
            self.frame(),
        )
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}


#[cfg(all(test, feature = "std"))]
mod proptests {
    use super::*;
    use crate::render::screen::{expected_lines, Screen};
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Edit {
        Insert(String, usize),
        Remove(usize, bool),
        RemoveRange(usize, usize),
        Replace(String),
        Move(isize),
    }

    fn edit_strategy() -> impl Strategy<Value = Edit> {
        prop_oneof![
            ("[a-z ]{0,12}", 0..40usize).prop_map(|(s, i)| Edit::Insert(s, i)),
            (0..40usize, any::<bool>()).prop_map(|(i, b)| Edit::Remove(i, b)),
            (0..40usize, 0..40usize).prop_map(|(a, b)| Edit::RemoveRange(a, b)),
            "[a-z]{0,30}".prop_map(Edit::Replace),
            (-30..30isize).prop_map(Edit::Move),
        ]
    }

    fn apply(ed: &mut LineEditor, edit: &Edit) -> RenderProgram {
        match edit {
            Edit::Insert(s, i) => ed.insert(s, *i),
            Edit::Remove(i, b) => ed.remove(*i, *b),
            Edit::RemoveRange(a, b) => ed.remove_range(*a..*b),
            Edit::Replace(s) => ed.replace_all(s),
            Edit::Move(d) => ed.move_cursor_by(*d),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // Property: the cursor never leaves 0..=len.
        #[test]
        fn cursor_always_in_bounds(edits in prop::collection::vec(edit_strategy(), 0..30)) {
            let mut ed = LineEditor::new(7);
            for edit in &edits {
                apply(&mut ed, edit);
                prop_assert!(ed.cursor() <= ed.len());
            }
        }

        // Property: cursor moves never touch the text or emit writes/clears.
        #[test]
        fn move_is_pure_motion(text in "[a-z ]{0,40}", back in 0..50isize, delta in -60..60isize) {
            let mut ed = LineEditor::new(6);
            ed.set_prompt_width(3);
            ed.insert(&text, 0);
            ed.move_cursor_by(-back);
            let program = ed.move_cursor_by(delta);
            prop_assert_eq!(ed.text(), text);
            prop_assert!(program.is_pure_motion());
        }

        // Property: removing an inserted span restores the line.
        #[test]
        fn insert_then_remove_restores_text(
            base in "[a-z]{0,20}",
            inserted in "[A-Z]{1,8}",
            at in 0..25usize,
        ) {
            let mut ed = LineEditor::new(9);
            ed.insert(&base, 0);
            let at = at.min(base.chars().count());
            ed.insert(&inserted, at);
            for _ in 0..inserted.len() {
                ed.remove(at, false);
            }
            prop_assert_eq!(ed.text(), base);
        }

        // Property: executing every program keeps the display in sync with a
        // fresh rendering of the line.
        #[test]
        fn programs_keep_display_in_sync(
            width in 1..12usize,
            prompt in 0..15usize,
            edits in prop::collection::vec(edit_strategy(), 0..25),
        ) {
            let mut ed = LineEditor::new(width);
            let mut screen = Screen::with_prompt(ed.layout().with_prompt_width(prompt));
            screen.run(&ed.set_prompt_width(prompt));
            for edit in &edits {
                let program = apply(&mut ed, edit);
                screen.run(&program);
                prop_assert_eq!(screen.lines(), expected_lines(ed.layout(), &ed.text()));
                prop_assert_eq!(screen.cursor(), ed.cursor_position());
            }
        }
    }
}
