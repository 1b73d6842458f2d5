//! Per-session configuration.

use crate::{Error, Result};

/// Columns assumed when the display width is unknown.
pub const DEFAULT_DISPLAY_WIDTH: usize = 80;

/// History entries kept per session by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 999;

/// Settings fixed for the lifetime of one editing session.
///
/// # Examples
///
/// ```
/// use lineterm::{EditorConfig, Session};
///
/// let config = EditorConfig::default()
///     .with_display_width(120)
///     .with_history_capacity(100);
/// let session = Session::from_config(&config)?;
/// assert_eq!(session.editor().display_width(), 120);
/// # Ok::<(), lineterm::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Columns per display row.
    pub display_width: usize,
    /// Maximum number of history entries.
    pub history_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            display_width: DEFAULT_DISPLAY_WIDTH,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EditorConfig {
    pub fn with_display_width(mut self, display_width: usize) -> Self {
        self.display_width = display_width;
        self
    }

    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }

    /// Checks that both limits are positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.display_width == 0 {
            return Err(Error::InvalidConfig("display_width must be positive"));
        }
        if self.history_capacity == 0 {
            return Err(Error::InvalidConfig("history_capacity must be positive"));
        }
        Ok(())
    }
}
