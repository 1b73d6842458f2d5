// Unix terminal implementation using termios and ANSI escape codes

use crate::keys::decode_key;
use crate::{KeyEvent, Result, Terminal};
use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;

const BRACKETED_PASTE_ON: &[u8] = b"\x1b[?2004h";
const BRACKETED_PASTE_OFF: &[u8] = b"\x1b[?2004l";

/// Unix terminal using stdin/stdout with termios
pub struct StdioTerminal {
    stdin: io::Stdin,
    stdout: io::Stdout,
    original_termios: Option<libc::termios>,
}

impl StdioTerminal {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            original_termios: None,
        }
    }

    /// Width of the terminal window in columns, if stdout is a terminal.
    pub fn columns(&self) -> Option<usize> {
        let fd = self.stdout.as_raw_fd();

        unsafe {
            let mut size: libc::winsize = std::mem::zeroed();
            if libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) != 0 || size.ws_col == 0 {
                return None;
            }
            Some(usize::from(size.ws_col))
        }
    }

    fn read_byte_internal(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.stdin.read_exact(&mut buf)?;
        Ok(buf[0])
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdioTerminal {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        Ok(self.stdout.write_all(data)?)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.stdout.flush()?)
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        let fd = self.stdin.as_raw_fd();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();

            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error().into());
            }

            // Save original settings
            self.original_termios = Some(termios);

            // Disable canonical mode, echo and signal keys (Ctrl+C arrives as a byte)
            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG);

            // Set minimum characters and timeout
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &termios) != 0 {
                return Err(io::Error::last_os_error().into());
            }
        }

        self.write(BRACKETED_PASTE_ON)?;
        self.flush()
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        if let Some(original) = self.original_termios {
            self.write(BRACKETED_PASTE_OFF)?;
            self.flush()?;

            let fd = self.stdin.as_raw_fd();

            unsafe {
                if libc::tcsetattr(fd, libc::TCSAFLUSH, &original) != 0 {
                    return Err(io::Error::last_os_error().into());
                }
            }

            self.original_termios = None;
        }

        Ok(())
    }

    fn parse_key_event(&mut self) -> Result<KeyEvent> {
        let event = decode_key(&mut || Ok(self.read_byte_internal()?))?;
        tracing::trace!(?event, "key");
        Ok(event)
    }
}

impl Drop for StdioTerminal {
    fn drop(&mut self) {
        let _ = self.exit_raw_mode();
    }
}
