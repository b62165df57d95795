//! Character display sink
//!
//! Abstracts a character LCD (HD44780-style, serial LCD backpacks, ...).
//! The display acts as a dumb terminal: all layout and diffing happen in
//! the runtime, the driver only positions the cursor and writes bytes.

/// Character display driver
///
/// Writes are fire-and-forget. Bus errors are swallowed by the driver;
/// the renderer compensates with periodic full repaints instead of
/// reading anything back.
pub trait CharDisplay {
    /// Move the write position
    ///
    /// - `col`: Column (0-based)
    /// - `row`: Row (0-based)
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write a run of characters at the current position
    fn write_run(&mut self, chars: &[u8]);

    /// Clear the whole display
    fn clear(&mut self);

    /// Switch the display (and backlight) on or off
    fn set_power(&mut self, on: bool);

    /// Show or hide the hardware cursor at the current position
    fn set_cursor_visible(&mut self, visible: bool);
}

impl<T: CharDisplay + ?Sized> CharDisplay for &mut T {
    fn set_cursor(&mut self, col: u8, row: u8) {
        (**self).set_cursor(col, row)
    }

    fn write_run(&mut self, chars: &[u8]) {
        (**self).write_run(chars)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn set_power(&mut self, on: bool) {
        (**self).set_power(on)
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        (**self).set_cursor_visible(visible)
    }
}
