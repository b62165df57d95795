//! HID-style press/release sink
//!
//! Models a USB keyboard or mouse button output. Calls take `&self`
//! because one physical sink is shared by every key bound to it; drivers
//! keep whatever state they need behind interior mutability.

/// Binary press/release output
pub trait HidOutput {
    /// Press (and hold) the given key or button code
    fn press(&self, code: u16);

    /// Release the given key or button code
    fn release(&self, code: u16);
}

impl<T: HidOutput + ?Sized> HidOutput for &T {
    fn press(&self, code: u16) {
        (**self).press(code)
    }

    fn release(&self, code: u16) {
        (**self).release(code)
    }
}
