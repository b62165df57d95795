//! Keypad input source

/// Keypad returning raw key codes
///
/// Polled once per scheduler pass. Codes are device specific (for example
/// a serial LCD keypad reports `b'A'..=b'Y'`); the menu keymap translates
/// them.
pub trait Keypad {
    /// Read the next pending key code, or `None` if nothing was pressed
    fn read_key(&mut self) -> Option<u8>;
}
