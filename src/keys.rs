//! Decoding of raw terminal input bytes into [`KeyEvent`]s.
//!
//! Handles the VT/xterm sequences sent by common terminal emulators:
//! arrows, Home/End, Delete, their Ctrl-modified forms, bracketed paste and
//! UTF-8 encoded characters. Any byte-stream [`Terminal`](crate::Terminal)
//! can build its `parse_key_event` on [`decode_key`].

use crate::{KeyEvent, Result};
use alloc::string::String;
use alloc::vec::Vec;

const ESC: u8 = 0x1b;
const PASTE_END: &[u8] = b"\x1b[201~";
/// Longest parameter string kept from a CSI sequence.
const MAX_CSI_PARAMS: usize = 16;
/// Largest bracketed paste kept; later bytes are read and dropped.
const MAX_PASTE_BYTES: usize = 64 * 1024;

/// Reads one key event, pulling bytes from `next` as needed.
///
/// Unknown sequences and control bytes decode to [`KeyEvent::Ignored`].
///
/// # Errors
///
/// Propagates any error returned by `next`.
///
/// # Examples
///
/// ```
/// use lineterm::{keys::decode_key, KeyEvent};
///
/// let mut input = b"\x1b[1;5Cx".iter().copied();
/// let mut next = || input.next().ok_or(lineterm::Error::Eof);
/// assert_eq!(decode_key(&mut next).unwrap(), KeyEvent::CtrlRight);
/// assert_eq!(decode_key(&mut next).unwrap(), KeyEvent::Normal('x'));
/// ```
pub fn decode_key<F>(next: &mut F) -> Result<KeyEvent>
where
    F: FnMut() -> Result<u8>,
{
    let c = next()?;
    let event = match c {
        b'\r' | b'\n' => KeyEvent::Enter,
        127 | 8 => KeyEvent::Backspace,
        3 => KeyEvent::Interrupt,
        ESC => decode_escape(next)?,
        32..=126 => KeyEvent::Normal(c as char),
        0x80..=0xff => decode_utf8(c, next)?,
        _ => KeyEvent::Ignored,
    };
    Ok(event)
}

fn decode_escape<F>(next: &mut F) -> Result<KeyEvent>
where
    F: FnMut() -> Result<u8>,
{
    let c2 = next()?;
    let event = match c2 {
        127 | 8 => KeyEvent::AltBackspace,
        b'[' => decode_csi(next)?,
        b'O' => match next()? {
            b'A' => KeyEvent::Up,
            b'B' => KeyEvent::Down,
            b'C' => KeyEvent::Right,
            b'D' => KeyEvent::Left,
            b'H' => KeyEvent::Home,
            b'F' => KeyEvent::End,
            _ => KeyEvent::Ignored,
        },
        // Alt+key and stray ESC never become text
        _ => KeyEvent::Ignored,
    };
    Ok(event)
}

fn decode_csi<F>(next: &mut F) -> Result<KeyEvent>
where
    F: FnMut() -> Result<u8>,
{
    let mut params = Vec::new();
    let mut overlong = false;
    let final_byte = loop {
        let b = next()?;
        if (0x40..=0x7e).contains(&b) {
            break b;
        }
        if params.len() == MAX_CSI_PARAMS {
            overlong = true;
        } else {
            params.push(b);
        }
    };
    if overlong {
        return Ok(KeyEvent::Ignored);
    }

    let event = match (params.as_slice(), final_byte) {
        (b"", b'A') => KeyEvent::Up,
        (b"", b'B') => KeyEvent::Down,
        (b"", b'C') => KeyEvent::Right,
        (b"", b'D') => KeyEvent::Left,
        (b"", b'H') | (b"1" | b"7", b'~') => KeyEvent::Home,
        (b"", b'F') | (b"4" | b"8", b'~') => KeyEvent::End,
        (b"3", b'~') => KeyEvent::Delete,
        (b"1;5", b'C') => KeyEvent::CtrlRight,
        (b"1;5", b'D') => KeyEvent::CtrlLeft,
        (b"3;5", b'~') => KeyEvent::CtrlDelete,
        (b"200", b'~') => KeyEvent::Paste(read_paste(next)?),
        _ => KeyEvent::Ignored,
    };
    Ok(event)
}

/// Collects bracketed-paste payload up to the closing `ESC [ 201 ~`.
///
/// At most [`MAX_PASTE_BYTES`] are kept; the rest is consumed up to the
/// terminator and discarded.
fn read_paste<F>(next: &mut F) -> Result<String>
where
    F: FnMut() -> Result<u8>,
{
    let mut bytes = Vec::new();
    let mut window = [0u8; PASTE_END.len()];
    let mut read = 0;
    loop {
        let b = next()?;
        window.copy_within(1.., 0);
        window[PASTE_END.len() - 1] = b;
        read += 1;
        if bytes.len() < MAX_PASTE_BYTES {
            bytes.push(b);
        }
        if read >= PASTE_END.len() && window[..] == *PASTE_END {
            // Drop whichever terminator bytes made it into the buffer.
            let stored = MAX_PASTE_BYTES.saturating_sub(read - PASTE_END.len());
            bytes.truncate(bytes.len() - stored.min(PASTE_END.len()));
            break;
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn decode_utf8<F>(lead: u8, next: &mut F) -> Result<KeyEvent>
where
    F: FnMut() -> Result<u8>,
{
    let len = match lead {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Ok(KeyEvent::Ignored),
    };
    let mut buf = [lead, 0, 0, 0];
    for slot in &mut buf[1..len] {
        *slot = next()?;
    }
    let event = core::str::from_utf8(&buf[..len])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(KeyEvent::Ignored, KeyEvent::Normal);
    Ok(event)
}
