//! HD44780 character LCD, 4-bit parallel interface
//!
//! Write-only wiring (R/W tied to ground), so every command is followed by a
//! fixed delay instead of a busy-flag poll.

use embedded_hal::delay::DelayNs;
use millfeed_hal::gpio::{Level, OutputPin};

use crate::backend::{CharacterDisplay, DisplayError};
use crate::screen::{SCREEN_COLS, SCREEN_ROWS};

/// Controller commands
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// Most commands take 37 us
const COMMAND_US: u32 = 50;
/// Clear and home take 1.52 ms
const CLEAR_US: u32 = 2_000;

/// Control and data lines
#[derive(Debug)]
pub struct Hd44780Pins<RS, EN, D4, D5, D6, D7> {
    /// Register select (low = command, high = data)
    pub rs: RS,
    /// Enable strobe
    pub en: EN,
    pub d4: D4,
    pub d5: D5,
    pub d6: D6,
    pub d7: D7,
}

/// 16x2 HD44780 module
pub struct Hd44780<RS, EN, D4, D5, D6, D7, DLY> {
    pins: Hd44780Pins<RS, EN, D4, D5, D6, D7>,
    delay: DLY,
}

impl<RS, EN, D4, D5, D6, D7, DLY> Hd44780<RS, EN, D4, D5, D6, D7, DLY>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    DLY: DelayNs,
{
    /// Wrap the pins; call [`init`](Self::init) before use
    pub fn new(pins: Hd44780Pins<RS, EN, D4, D5, D6, D7>, delay: DLY) -> Self {
        Self { pins, delay }
    }

    /// Power-on initialisation by instruction
    ///
    /// Works whatever mode the controller was left in: three 8-bit function
    /// sets resynchronise it, then it is switched to 4-bit mode.
    pub fn init(&mut self) {
        self.delay.delay_ms(50);
        self.pins.rs.set_low();
        self.pins.en.set_low();

        self.write_nibble(0x3);
        self.delay.delay_us(4_500);
        self.write_nibble(0x3);
        self.delay.delay_us(150);
        self.write_nibble(0x3);
        self.delay.delay_us(150);
        self.write_nibble(0x2);

        self.command(cmd::FUNCTION_4BIT_2LINE);
        self.command(cmd::DISPLAY_ON);
        self.command(cmd::CLEAR);
        self.delay.delay_us(CLEAR_US);
        self.command(cmd::ENTRY_MODE_INCREMENT);
    }

    fn command(&mut self, byte: u8) {
        self.pins.rs.set_low();
        self.write_byte(byte);
    }

    fn data(&mut self, byte: u8) {
        self.pins.rs.set_high();
        self.write_byte(byte);
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
        self.delay.delay_us(COMMAND_US);
    }

    fn write_nibble(&mut self, nibble: u8) {
        self.pins.d4.set_level(Level::from_high(nibble & 0x1 != 0));
        self.pins.d5.set_level(Level::from_high(nibble & 0x2 != 0));
        self.pins.d6.set_level(Level::from_high(nibble & 0x4 != 0));
        self.pins.d7.set_level(Level::from_high(nibble & 0x8 != 0));

        // Data is latched on the falling edge; 450 ns minimum pulse
        self.pins.en.set_high();
        self.delay.delay_us(1);
        self.pins.en.set_low();
        self.delay.delay_us(1);
    }
}

impl<RS, EN, D4, D5, D6, D7, DLY> CharacterDisplay for Hd44780<RS, EN, D4, D5, D6, D7, DLY>
where
    RS: OutputPin,
    EN: OutputPin,
    D4: OutputPin,
    D5: OutputPin,
    D6: OutputPin,
    D7: OutputPin,
    DLY: DelayNs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR);
        self.delay.delay_us(CLEAR_US);
        Ok(())
    }

    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let offset = ROW_OFFSETS
            .get(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        self.command(cmd::SET_DDRAM | offset);

        let mut written = 0;
        for ch in text.chars().take(SCREEN_COLS) {
            // Character ROM A00 matches ASCII in the printable range
            let byte = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                b'?'
            };
            self.data(byte);
            written += 1;
        }
        for _ in written..SCREEN_COLS {
            self.data(b' ');
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}
