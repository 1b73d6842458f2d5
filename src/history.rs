//! Bounded command history with a browse cursor.

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};

/// Command history with FIFO eviction.
///
/// Maintains up to `capacity` submitted lines, oldest first, with
/// automatic blank-line and consecutive-duplicate filtering. A browse cursor
/// walks the entries independently of the edit cursor; the position one
/// past the newest entry is the *live edge*, where the line the user was
/// composing (the staged line) is restored.
///
/// # Examples
///
/// ```
/// use lineterm::HistoryBuffer;
///
/// let mut hist = HistoryBuffer::new(50);
/// hist.push("first command");
/// hist.push("second command");
///
/// hist.latch("half-typed");
/// assert_eq!(hist.get_previous(), "second command");
/// assert_eq!(hist.get_previous(), "first command");
/// assert_eq!(hist.get_next(), "second command");
/// assert_eq!(hist.get_next(), "half-typed");
/// ```
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
    browse_cursor: usize,
    staged: String,
}

impl HistoryBuffer {
    /// Creates an empty history holding at most `capacity` entries.
    ///
    /// A zero capacity is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            browse_cursor: 0,
            staged: String::new(),
        }
    }

    /// Records a submitted line.
    ///
    /// Blank (empty or whitespace-only) lines and a repeat of the most recent
    /// entry are skipped. When the buffer is full the oldest entry is
    /// evicted. The browse cursor returns to the live edge after a successful
    /// push.
    ///
    /// Returns `true` if the line was recorded.
    pub fn push(&mut self, entry: &str) -> bool {
        if entry.trim().is_empty() {
            return false;
        }

        if self.latest() == Some(entry) {
            tracing::debug!("history: skipped repeat of latest entry");
            return false;
        }

        self.entries.push_back(entry.to_string());
        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::debug!(evicted = %evicted, "history full, evicted oldest entry");
            }
        }

        self.reset_cursor();
        true
    }

    /// Saves the line being composed so browsing can return to it.
    pub fn latch(&mut self, current: &str) {
        self.staged.clear();
        self.staged.push_str(current);
    }

    /// Steps toward older entries.
    ///
    /// Saturates at the oldest entry. With no entries the staged line is
    /// returned unchanged.
    pub fn get_previous(&mut self) -> &str {
        if self.entries.is_empty() {
            return &self.staged;
        }
        self.browse_cursor = self.browse_cursor.saturating_sub(1);
        &self.entries[self.browse_cursor]
    }

    /// Steps toward newer entries.
    ///
    /// Stepping past the newest entry returns to the live edge and yields the
    /// staged line.
    pub fn get_next(&mut self) -> &str {
        if self.browse_cursor + 1 >= self.entries.len() {
            self.reset_cursor();
            return &self.staged;
        }
        self.browse_cursor += 1;
        &self.entries[self.browse_cursor]
    }

    /// Moves the browse cursor back to the live edge.
    pub fn reset_cursor(&mut self) {
        self.browse_cursor = self.entries.len();
    }

    /// Returns `true` if not currently browsing.
    pub fn is_at_live_edge(&self) -> bool {
        self.browse_cursor == self.entries.len()
    }

    /// The browse cursor, in `0..=len()`.
    pub fn browse_cursor(&self) -> usize {
        self.browse_cursor
    }

    /// The most recently pushed entry.
    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// The line saved by the last [`latch`](Self::latch).
    pub fn staged(&self) -> &str {
        &self.staged
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
