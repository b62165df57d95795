//! Shared signals
//!
//! A [`Signal`] is a value owned by the application and read or written by
//! tasks through shared references. There is one thread of control, so a
//! `Cell` is enough; by convention every signal has a single writer.

use core::cell::Cell;

pub mod composite;
pub mod ops;

pub use composite::EnableComposite;
pub use ops::{AndInputs, Chooser, Constrain, Inverter, Mapper, OrInputs};

/// Shared `Copy` value
#[derive(Debug, Default)]
pub struct Signal<T: Copy> {
    value: Cell<T>,
}

/// Boolean signal, used for clock outputs and enable flags
pub type Flag = Signal<bool>;

impl<T: Copy> Signal<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value: Cell::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        self.value.get()
    }

    #[inline]
    pub fn set(&self, value: T) {
        self.value.set(value);
    }

    /// Store a new value and return the old one
    pub fn replace(&self, value: T) -> T {
        self.value.replace(value)
    }
}

/// Something that can be switched on and off
///
/// Menu toggles and key bindings target this capability.
pub trait Enable {
    fn enable(&self, on: bool);

    fn enabled(&self) -> bool;

    fn toggle(&self) {
        self.enable(!self.enabled());
    }
}

impl Enable for Flag {
    fn enable(&self, on: bool) {
        self.set(on);
    }

    fn enabled(&self) -> bool {
        self.get()
    }
}
