//! Platform-specific terminal implementations.
//!
//! This module provides a [`Terminal`](crate::Terminal) implementation for
//! Unix-like systems: [`StdioTerminal`], using termios for raw mode and ANSI
//! escape codes for output. Key decoding is shared through
//! [`keys::decode_key`](crate::keys::decode_key).

mod unix;

pub use unix::StdioTerminal;
