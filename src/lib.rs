//! Terminal input line editor with wrapping-aware minimal redraw and history.
//!
//! This library keeps an editable line inside a fixed-width display region,
//! tracks a cursor within it and turns every edit into a [`RenderProgram`]:
//! the shortest sequence of cursor moves, row clears and text writes that
//! brings the previously rendered (possibly multi-row) line up to date.
//! Nothing is redrawn from scratch, so editing long wrapped lines does not
//! flicker.
//!
//! # Features
//!
//! - **Full line editing**: Insert, delete, backspace and cursor movement at any position
//! - **Hard wrapping**: Lines longer than the display width wrap by character count,
//!   with the prompt occupying the start of the first row
//! - **Minimal redraw**: Only rows whose content changed are cleared and rewritten
//! - **Word-aware navigation**: Ctrl+Left/Right, Alt+Backspace, Ctrl+Delete
//! - **Command history**: Bounded FIFO buffer with up/down navigation that
//!   restores the line being composed
//! - **Smart history**: Automatically skips consecutive duplicates and blank lines
//! - **Zero global state**: Each session owns its editor and history
//!
//! # Quick Start
//!
//! ```no_run
//! use lineterm::{terminals::StdioTerminal, Error, Session};
//!
//! let mut terminal = StdioTerminal::new();
//! let mut session = Session::new(terminal.columns().unwrap_or(80), 50);
//!
//! loop {
//!     match session.read_line(&mut terminal, "> ") {
//!         Ok(line) if line == "exit" => break,
//!         Ok(line) => println!("You typed: {}", line),
//!         Err(Error::Interrupted) => continue,
//!         Err(e) => {
//!             eprintln!("Error: {}", e);
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`LineEditor`]: the logical line, its cursor and the render diff
//! - [`HistoryBuffer`]: bounded log of submitted lines with a browse cursor
//! - [`Layout`]: pure wrapping and cursor geometry
//! - [`Session`]: one editor and one history, driven by classified [`KeyEvent`]s
//!
//! The editing core never touches I/O. Hosts either execute render programs
//! themselves or implement the [`Terminal`] trait and let
//! [`Session::read_line`] drive the loop.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::string::String;

pub mod ansi;
mod config;
mod history;
pub mod keys;
mod layout;
mod line_editor;
mod render;
mod session;

#[cfg(all(feature = "std", unix))]
pub mod terminals;

pub use config::{EditorConfig, DEFAULT_DISPLAY_WIDTH, DEFAULT_HISTORY_CAPACITY};
pub use history::HistoryBuffer;
pub use layout::{Layout, Position};
pub use line_editor::LineEditor;
pub use render::{RenderOp, RenderProgram};
pub use session::{Outcome, Session, Terminal};

/// Error type for lineterm operations.
///
/// Editing itself cannot fail; errors come from terminal I/O and
/// configuration checks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(&'static str),
    /// Invalid UTF-8 data
    #[error("invalid UTF-8")]
    InvalidUtf8,
    /// End of file
    #[error("end of file")]
    Eof,
    /// Operation interrupted
    #[error("interrupted")]
    Interrupted,
    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match e.kind() {
            ErrorKind::UnexpectedEof => Error::Eof,
            ErrorKind::Interrupted => Error::Interrupted,
            _ => Error::Io("I/O error"),
        }
    }
}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        use std::io::{Error as IoError, ErrorKind};
        match e {
            Error::Io(msg) => IoError::new(ErrorKind::Other, msg),
            Error::InvalidUtf8 => IoError::new(ErrorKind::InvalidData, "invalid UTF-8"),
            Error::Eof => IoError::new(ErrorKind::UnexpectedEof, "end of file"),
            Error::Interrupted => IoError::new(ErrorKind::Interrupted, "interrupted"),
            Error::InvalidConfig(msg) => IoError::new(ErrorKind::InvalidInput, msg),
        }
    }
}

impl From<core::str::Utf8Error> for Error {
    fn from(_: core::str::Utf8Error) -> Self {
        Error::InvalidUtf8
    }
}

/// Result type for lineterm operations
pub type Result<T> = core::result::Result<T, Error>;

/// Key events that can be processed by a [`Session`].
///
/// Hosts classify raw input into these before calling
/// [`Session::handle_key`]; the editor never sees raw key codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// Normal printable character
    Normal(char),
    /// Text pasted in one go
    Paste(String),
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow (history previous)
    Up,
    /// Down arrow (history next)
    Down,
    /// Home key
    Home,
    /// End key
    End,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Enter/Return
    Enter,
    /// Ctrl+Left (word left)
    CtrlLeft,
    /// Ctrl+Right (word right)
    CtrlRight,
    /// Ctrl+Delete (delete word right)
    CtrlDelete,
    /// Alt+Backspace (delete word left)
    AltBackspace,
    /// Ctrl+C (abandon the line)
    Interrupt,
    /// Any other key or unrecognized sequence
    Ignored,
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(Error::from(eof), Error::Eof));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(matches!(Error::from(other), Error::Io(_)));

        let io: std::io::Error = Error::Interrupted.into();
        assert_eq!(io.kind(), std::io::ErrorKind::Interrupted);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(Error::Eof.to_string(), "end of file");
        assert_eq!(Error::Io("read failed").to_string(), "I/O error: read failed");
    }
}
