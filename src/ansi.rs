//! Default ANSI/VT encoding of render programs.
//!
//! Downward moves are encoded as repeated `ESC D` (index) rather than
//! `CSI n B`: index scrolls the screen when the cursor is on the bottom row,
//! which is what a line growing past the last row needs, and it keeps the
//! current column. `CSI n B` stops at the bottom margin instead.

use crate::render::{RenderOp, RenderProgram};
use alloc::string::String;
use core::fmt::Write;

/// Cursor up: `CSI n A`.
pub const CURSOR_UP: &str = "A";
/// Cursor forward: `CSI n C`.
pub const CURSOR_RIGHT: &str = "C";
/// Cursor backward: `CSI n D`.
pub const CURSOR_LEFT: &str = "D";
/// Index (down one row, scrolling at the bottom margin).
pub const INDEX: &str = "\x1bD";
/// Erase from the cursor to the end of the line.
pub const CLEAR_EOL: &str = "\x1b[K";

/// Appends the control sequence for a relative cursor move to `out`.
pub fn push_move(out: &mut String, rows: isize, cols: isize) {
    if rows < 0 {
        push_csi(out, rows.unsigned_abs(), CURSOR_UP);
    }
    for _ in 0..rows.max(0) {
        out.push_str(INDEX);
    }
    if cols > 0 {
        push_csi(out, cols.unsigned_abs(), CURSOR_RIGHT);
    } else if cols < 0 {
        push_csi(out, cols.unsigned_abs(), CURSOR_LEFT);
    }
}

fn push_csi(out: &mut String, count: usize, command: &str) {
    // Writing into a String cannot fail.
    let _ = write!(out, "\x1b[{count}{command}");
}

/// Appends the encoding of a single operation to `out`.
pub fn push_op(out: &mut String, op: &RenderOp) {
    match op {
        RenderOp::MoveCursor { rows, cols } => push_move(out, *rows, *cols),
        RenderOp::WriteText(text) => out.push_str(text),
        RenderOp::ClearToEndOfRow => out.push_str(CLEAR_EOL),
        RenderOp::CarriageReturn => out.push('\r'),
    }
}

/// Encodes a whole program.
///
/// # Examples
///
/// ```
/// use lineterm::{ansi, LineEditor};
///
/// let mut editor = LineEditor::new(80);
/// editor.insert("abc", 0);
/// let program = editor.move_cursor_by(-2);
/// assert_eq!(ansi::encode(&program), "\x1b[2D");
/// ```
pub fn encode(program: &RenderProgram) -> String {
    let mut out = String::new();
    for op in program {
        push_op(&mut out, op);
    }
    out
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn encode_op(op: RenderOp) -> String {
        let mut out = String::new();
        push_op(&mut out, &op);
        out
    }

    #[test]
    fn test_encode_moves() {
        assert_eq!(encode_op(RenderOp::MoveCursor { rows: -2, cols: 0 }), "\x1b[2A");
        assert_eq!(encode_op(RenderOp::MoveCursor { rows: 2, cols: 0 }), "\x1bD\x1bD");
        assert_eq!(encode_op(RenderOp::MoveCursor { rows: 0, cols: 3 }), "\x1b[3C");
        assert_eq!(encode_op(RenderOp::MoveCursor { rows: 0, cols: -1 }), "\x1b[1D");
        assert_eq!(
            encode_op(RenderOp::MoveCursor { rows: -1, cols: 4 }),
            "\x1b[1A\x1b[4C"
        );
    }

    #[test]
    fn test_encode_text_and_clear() {
        assert_eq!(encode_op(RenderOp::WriteText("ls -la".into())), "ls -la");
        assert_eq!(encode_op(RenderOp::ClearToEndOfRow), "\x1b[K");
        assert_eq!(encode_op(RenderOp::CarriageReturn), "\r");
    }

    #[test]
    fn test_encode_empty_program() {
        assert_eq!(encode(&RenderProgram::new()), "");
    }
}
