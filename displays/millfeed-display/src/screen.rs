//! Screen buffer
//!
//! A character-based line buffer for the 16x2 status display. Each row
//! tracks its own dirty flag so a refresh only rewrites what changed; an
//! HD44780 write of a full row costs the better part of a millisecond, all
//! of it stolen from the step generator.

use heapless::String;

use crate::backend::{CharacterDisplay, DisplayError};

/// Number of character rows
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns
pub const SCREEN_COLS: usize = 16;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Line buffer for the status display
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Rows changed since the last flush
    dirty: [bool; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a blank screen with every row due for a write
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: [true; SCREEN_ROWS],
        }
    }

    /// Set the content of a row, truncated to the line length
    ///
    /// The row is only marked dirty if its text actually changed.
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let mut next: String<LINE_LEN> = String::new();
        for ch in text.chars() {
            if next.push(ch).is_err() {
                break;
            }
        }
        if *line != next {
            *line = next;
            self.dirty[row] = true;
        }
    }

    /// Get the content of a row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Check if any row needs rewriting
    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|&d| d)
    }

    /// Mark every row as needing a rewrite
    pub fn mark_dirty(&mut self) {
        self.dirty = [true; SCREEN_ROWS];
    }

    /// Write dirty rows to the display
    ///
    /// A row that fails to write stays dirty and is retried on the next flush.
    pub fn flush<D: CharacterDisplay + ?Sized>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        for (row, line) in self.lines.iter().enumerate() {
            if self.dirty[row] {
                display.write_line(row as u8, line.as_str())?;
                self.dirty[row] = false;
            }
        }
        Ok(())
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
