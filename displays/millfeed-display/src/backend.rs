//! Display backend trait
//!
//! Defines the interface for character-cell display hardware.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Row outside the display
    InvalidCoordinates,
}

/// Text-mode display
///
/// Provides a hardware-agnostic interface for writing whole rows of text.
pub trait CharacterDisplay {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Replace the contents of a row
    ///
    /// Text is written from column 0; the rest of the row is blanked and
    /// anything past the last column is dropped.
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}

impl<T: CharacterDisplay + ?Sized> CharacterDisplay for &mut T {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        (**self).write_line(row, text)
    }

    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }
}
