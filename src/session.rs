//! One interactive input session: an editor, its history and key dispatch.
//!
//! A [`Session`] owns exactly one [`LineEditor`] and one [`HistoryBuffer`].
//! Independent terminal views each construct their own session; nothing is
//! shared between them.

use crate::ansi;
use crate::config::EditorConfig;
use crate::history::HistoryBuffer;
use crate::line_editor::LineEditor;
use crate::render::{RenderOp, RenderProgram};
use crate::{Error, KeyEvent, Result};
use alloc::string::String;

/// Terminal abstraction that enables platform-agnostic line editing.
///
/// Implement this trait to drive a [`Session`] from any I/O system:
/// standard terminals, UART connections, network sockets, or custom
/// devices. The output primitives default to ANSI/VT control sequences
/// written through [`write`](Self::write); override them for displays that
/// speak something else.
///
/// # Example
///
/// ```
/// use lineterm::{KeyEvent, Result, Terminal};
///
/// struct MockTerminal {
///     input: Vec<KeyEvent>,
///     output: Vec<u8>,
/// }
///
/// impl Terminal for MockTerminal {
///     fn write(&mut self, data: &[u8]) -> Result<()> {
///         self.output.extend_from_slice(data);
///         Ok(())
///     }
///
///     fn parse_key_event(&mut self) -> Result<KeyEvent> {
///         self.input.pop().ok_or(lineterm::Error::Eof)
///     }
///
///     // ... implement other methods
/// #   fn flush(&mut self) -> Result<()> { Ok(()) }
/// #   fn enter_raw_mode(&mut self) -> Result<()> { Ok(()) }
/// #   fn exit_raw_mode(&mut self) -> Result<()> { Ok(()) }
/// }
/// ```
pub trait Terminal {
    /// Writes raw bytes to the output.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Flushes any buffered output.
    ///
    /// Called after each key event to ensure immediate visual feedback.
    fn flush(&mut self) -> Result<()>;

    /// Enters raw mode for character-by-character input.
    ///
    /// Should disable line buffering and echo. Called at the start of
    /// [`Session::read_line`].
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Exits raw mode and restores normal terminal settings.
    ///
    /// Called at the end of [`Session::read_line`], on success or error.
    fn exit_raw_mode(&mut self) -> Result<()>;

    /// Reads and classifies the next key press.
    fn parse_key_event(&mut self) -> Result<KeyEvent>;

    /// Moves the cursor relative to its current cell.
    fn move_cursor(&mut self, rows: isize, cols: isize) -> Result<()> {
        let mut out = String::new();
        ansi::push_move(&mut out, rows, cols);
        self.write(out.as_bytes())
    }

    /// Clears from the cursor to the end of the row.
    fn clear_eol(&mut self) -> Result<()> {
        self.write(ansi::CLEAR_EOL.as_bytes())
    }

    /// Returns the cursor to column 0.
    fn carriage_return(&mut self) -> Result<()> {
        self.write(b"\r")
    }

    /// Executes a render program through the primitives above.
    fn render(&mut self, program: &RenderProgram) -> Result<()> {
        for op in program {
            match op {
                RenderOp::MoveCursor { rows, cols } => self.move_cursor(*rows, *cols)?,
                RenderOp::WriteText(text) => self.write(text.as_bytes())?,
                RenderOp::ClearToEndOfRow => self.clear_eol()?,
                RenderOp::CarriageReturn => self.carriage_return()?,
            }
        }
        Ok(())
    }
}

/// Result of dispatching one key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The line is still being edited.
    Render(RenderProgram),
    /// Enter was pressed. The program parks the cursor at the end of the
    /// line; the host writes the line break.
    Submitted { line: String, program: RenderProgram },
    /// The line was abandoned (Ctrl+C).
    Interrupted(RenderProgram),
}

impl Outcome {
    /// The render program carried by any outcome.
    pub fn program(&self) -> &RenderProgram {
        match self {
            Outcome::Render(program)
            | Outcome::Submitted { program, .. }
            | Outcome::Interrupted(program) => program,
        }
    }
}

/// An editor and its history, driven by classified key events.
///
/// # Examples
///
/// ```
/// use lineterm::{KeyEvent, Outcome, Session};
///
/// let mut session = Session::new(80, 50);
/// session.set_prompt("$ ");
/// for c in "ls".chars() {
///     session.handle_key(KeyEvent::Normal(c));
/// }
///
/// match session.handle_key(KeyEvent::Enter) {
///     Outcome::Submitted { line, .. } => assert_eq!(line, "ls"),
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// assert_eq!(session.history().latest(), Some("ls"));
/// ```
///
/// # Key Bindings
///
/// - **Arrow keys**: Move cursor left/right, navigate history up/down
/// - **Home/End**: Jump to start/end of line
/// - **Backspace/Delete**: Delete characters
/// - **Ctrl+Left/Right**: Move by word
/// - **Alt+Backspace**: Delete word left
/// - **Ctrl+Delete**: Delete word right
/// - **Ctrl+C**: Abandon the line
/// - **Enter**: Submit line
#[derive(Debug, Clone)]
pub struct Session {
    editor: LineEditor,
    history: HistoryBuffer,
}

impl Session {
    /// Creates a session for a display `display_width` columns wide keeping
    /// up to `history_capacity` entries.
    pub fn new(display_width: usize, history_capacity: usize) -> Self {
        Self {
            editor: LineEditor::new(display_width),
            history: HistoryBuffer::new(history_capacity),
        }
    }

    /// Creates a session from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a limit is zero.
    pub fn from_config(config: &EditorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.display_width, config.history_capacity))
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Registers a freshly written prompt. See
    /// [`LineEditor::set_prompt_width`].
    pub fn set_prompt(&mut self, prompt: &str) -> RenderProgram {
        self.editor.set_prompt_width(prompt.chars().count())
    }

    /// Applies one key event.
    pub fn handle_key(&mut self, event: KeyEvent) -> Outcome {
        let ed = &mut self.editor;
        let cursor = ed.cursor();
        let program = match event {
            KeyEvent::Normal(c) => {
                self.history.reset_cursor();
                let mut buf = [0; 4];
                ed.insert(c.encode_utf8(&mut buf), cursor)
            }
            KeyEvent::Paste(text) => {
                self.history.reset_cursor();
                ed.insert(&sanitize_paste(&text), cursor)
            }
            KeyEvent::Backspace => {
                self.history.reset_cursor();
                match cursor {
                    0 => RenderProgram::new(),
                    _ => ed.remove(cursor - 1, true),
                }
            }
            KeyEvent::Delete => {
                self.history.reset_cursor();
                ed.remove(cursor, false)
            }
            KeyEvent::AltBackspace => {
                self.history.reset_cursor();
                let start = ed.word_start_left();
                ed.remove_range(start..cursor)
            }
            KeyEvent::CtrlDelete => {
                self.history.reset_cursor();
                let end = ed.word_start_right();
                ed.remove_range(cursor..end)
            }
            KeyEvent::Left => ed.move_cursor_by(-1),
            KeyEvent::Right => ed.move_cursor_by(1),
            KeyEvent::Home => ed.move_cursor_to(0),
            KeyEvent::End => ed.move_cursor_to_end(),
            KeyEvent::CtrlLeft => {
                let target = ed.word_start_left();
                ed.move_cursor_to(target)
            }
            KeyEvent::CtrlRight => {
                let target = ed.word_start_right();
                ed.move_cursor_to(target)
            }
            KeyEvent::Up => {
                if self.history.is_at_live_edge() {
                    self.history.latch(&ed.text());
                }
                ed.replace_all(self.history.get_previous())
            }
            KeyEvent::Down => {
                if self.history.is_at_live_edge() {
                    self.history.latch(&ed.text());
                }
                ed.replace_all(self.history.get_next())
            }
            KeyEvent::Enter => {
                let program = ed.move_cursor_to_end();
                let line = ed.text();
                self.history.push(&line);
                self.history.reset_cursor();
                ed.reset();
                tracing::debug!(len = line.len(), "line submitted");
                return Outcome::Submitted { line, program };
            }
            KeyEvent::Interrupt => {
                let program = ed.move_cursor_to_end();
                self.history.reset_cursor();
                ed.reset();
                tracing::debug!("line interrupted");
                return Outcome::Interrupted(program);
            }
            KeyEvent::Ignored => RenderProgram::new(),
        };
        Outcome::Render(program)
    }

    /// Reads a line from the terminal with full editing support.
    ///
    /// Writes `prompt`, enters raw mode and processes key events until Enter
    /// is pressed, then returns the line as typed. Non-blank lines are
    /// added to history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interrupted`] when the user presses Ctrl+C, or any
    /// I/O error raised by the terminal.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lineterm::{terminals::StdioTerminal, Session};
    ///
    /// let mut terminal = StdioTerminal::new();
    /// let mut session = Session::new(terminal.columns().unwrap_or(80), 50);
    ///
    /// let line = session.read_line(&mut terminal, "> ")?;
    /// println!("You entered: {}", line);
    /// # Ok::<(), lineterm::Error>(())
    /// ```
    pub fn read_line<T: Terminal>(&mut self, terminal: &mut T, prompt: &str) -> Result<String> {
        terminal.enter_raw_mode()?;

        // Use a closure to ensure we always exit raw mode, even on error
        let result = (|| -> Result<String> {
            terminal.write(prompt.as_bytes())?;
            let program = self.set_prompt(prompt);
            terminal.render(&program)?;
            terminal.flush()?;

            loop {
                let event = terminal.parse_key_event()?;
                match self.handle_key(event) {
                    Outcome::Render(program) => terminal.render(&program)?,
                    Outcome::Submitted { line, program } => {
                        terminal.render(&program)?;
                        // A line filling its last row already left the cursor on a fresh row
                        let end = self.editor.layout().position(line.chars().count());
                        if line.is_empty() || end.col != 0 {
                            terminal.write(b"\r\n")?;
                        }
                        terminal.flush()?;
                        return Ok(line);
                    }
                    Outcome::Interrupted(program) => {
                        terminal.render(&program)?;
                        terminal.write(b"^C\r\n")?;
                        terminal.flush()?;
                        return Err(Error::Interrupted);
                    }
                }
                terminal.flush()?;
            }
        })();

        // Always exit raw mode, even if an error occurred
        terminal.exit_raw_mode()?;

        result
    }
}

/// Flattens pasted text onto one line: line breaks and tabs become spaces,
/// other control characters are dropped.
fn sanitize_paste(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' | '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
