//! Keypad routing
//!
//! A [`KeypadPoller`] task reads one raw code per pass and hands it to a
//! [`KeyHandler`]. Handlers return whether they consumed the code, so they
//! can be stacked in a [`KeyHandlerChain`]: global shortcuts first, the
//! menu last.

use core::cell::RefCell;

use heapless::Vec;
use tickloop_core::{CapacityError, Enable, Poll};
use tickloop_hal::{Keypad, TickSource};

use crate::context::MenuContext;

/// Code that never matches a key, for unused keymap slots
pub const NO_KEY: u8 = 0;

/// Menu action produced from a raw key code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuKey {
    Up,
    Down,
    Back,
    Select,
    Delete,
    /// Jump to a visible item row (0-based, below the title)
    Line(u8),
    /// Digit 0..=9
    Digit(u8),
}

/// Raw key codes for each menu action
///
/// Slots set to [`NO_KEY`] are unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuKeymap {
    pub up: u8,
    pub down: u8,
    pub back: u8,
    pub select: u8,
    pub delete: u8,
    pub lines: [u8; 4],
    pub digits: [u8; 10],
}

impl MenuKeymap {
    /// 4x4 keypad on an LK204-25 serial LCD
    ///
    /// A/B scroll, C goes back, D selects, `*` deletes. `#` is left free
    /// for application shortcuts.
    pub const fn lk204() -> Self {
        Self {
            up: b'D',
            down: b'I',
            back: b'N',
            select: b'S',
            delete: b'P',
            lines: [NO_KEY; 4],
            digits: [b'Q', b'A', b'B', b'C', b'F', b'G', b'H', b'K', b'L', b'M'],
        }
    }

    /// Translate a raw code, `None` for unmapped codes
    pub fn map(&self, code: u8) -> Option<MenuKey> {
        if code == NO_KEY {
            return None;
        }
        let key = if code == self.up {
            MenuKey::Up
        } else if code == self.down {
            MenuKey::Down
        } else if code == self.back {
            MenuKey::Back
        } else if code == self.select {
            MenuKey::Select
        } else if code == self.delete {
            MenuKey::Delete
        } else if let Some(row) = self.lines.iter().position(|&c| c == code) {
            MenuKey::Line(row as u8)
        } else {
            let digit = self.digits.iter().position(|&c| c == code)?;
            MenuKey::Digit(digit as u8)
        };
        Some(key)
    }
}

impl Default for MenuKeymap {
    fn default() -> Self {
        Self::lk204()
    }
}

/// Consumer of raw key codes
pub trait KeyHandler {
    /// Handle a key, returning whether it was consumed
    fn handle_key(&mut self, code: u8) -> bool;

    /// Called once per pass whether or not a key arrived
    fn tick(&mut self) {}
}

impl<T: KeyHandler + ?Sized> KeyHandler for &mut T {
    fn handle_key(&mut self, code: u8) -> bool {
        (**self).handle_key(code)
    }

    fn tick(&mut self) {
        (**self).tick()
    }
}

/// Offers each key to its handlers in order until one consumes it
pub struct KeyHandlerChain<'a, const N: usize> {
    handlers: Vec<&'a mut dyn KeyHandler, N>,
}

impl<'a, const N: usize> KeyHandlerChain<'a, N> {
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Add a handler, silently ignoring it once full
    pub fn add(&mut self, handler: &'a mut dyn KeyHandler) {
        let _ = self.try_add(handler);
    }

    pub fn try_add(&mut self, handler: &'a mut dyn KeyHandler) -> Result<(), CapacityError> {
        self.handlers
            .push(handler)
            .map_err(|_| CapacityError::GroupFull { capacity: N })
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<const N: usize> Default for KeyHandlerChain<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> KeyHandler for KeyHandlerChain<'_, N> {
    fn handle_key(&mut self, code: u8) -> bool {
        self.handlers.iter_mut().any(|handler| handler.handle_key(code))
    }

    fn tick(&mut self) {
        for handler in self.handlers.iter_mut() {
            handler.tick();
        }
    }
}

/// Toggles a target each time its key is pressed
pub struct ToggleKey<'a> {
    code: u8,
    target: &'a dyn Enable,
}

impl<'a> ToggleKey<'a> {
    pub fn new(code: u8, target: &'a dyn Enable) -> Self {
        Self { code, target }
    }
}

impl KeyHandler for ToggleKey<'_> {
    fn handle_key(&mut self, code: u8) -> bool {
        if code != self.code {
            return false;
        }
        self.target.toggle();
        true
    }
}

/// Switches a target to a fixed state when its key is pressed
pub struct EnableKey<'a> {
    code: u8,
    target: &'a dyn Enable,
    state: bool,
}

impl<'a> EnableKey<'a> {
    /// Key turning the target on
    pub fn on(code: u8, target: &'a dyn Enable) -> Self {
        Self {
            code,
            target,
            state: true,
        }
    }

    /// Key turning the target off
    pub fn off(code: u8, target: &'a dyn Enable) -> Self {
        Self {
            code,
            target,
            state: false,
        }
    }
}

impl KeyHandler for EnableKey<'_> {
    fn handle_key(&mut self, code: u8) -> bool {
        if code != self.code {
            return false;
        }
        self.target.enable(self.state);
        true
    }
}

/// Routes mapped keys into a shared [`MenuContext`]
///
/// Also drives the context's idle processing from `tick`, so multi-tap
/// characters commit on time even without further keys.
pub struct MenuKeypad<'r, 'a, T: TickSource + ?Sized> {
    context: &'r RefCell<MenuContext<'a>>,
    keymap: MenuKeymap,
    ticks: &'r T,
}

impl<'r, 'a, T: TickSource + ?Sized> MenuKeypad<'r, 'a, T> {
    pub fn new(context: &'r RefCell<MenuContext<'a>>, keymap: MenuKeymap, ticks: &'r T) -> Self {
        Self {
            context,
            keymap,
            ticks,
        }
    }

    pub fn keymap(&self) -> &MenuKeymap {
        &self.keymap
    }
}

impl<T: TickSource + ?Sized> KeyHandler for MenuKeypad<'_, '_, T> {
    fn handle_key(&mut self, code: u8) -> bool {
        let Some(key) = self.keymap.map(code) else {
            return false;
        };
        match self.context.try_borrow_mut() {
            Ok(mut context) => {
                context.handle_key(key, self.ticks.now());
                true
            }
            Err(_) => false,
        }
    }

    fn tick(&mut self) {
        if let Ok(mut context) = self.context.try_borrow_mut() {
            context.tick(self.ticks.now());
        }
    }
}

/// Task reading the keypad once per pass
pub struct KeypadPoller<K: Keypad, H: KeyHandler> {
    keypad: K,
    handler: H,
}

impl<K: Keypad, H: KeyHandler> KeypadPoller<K, H> {
    pub fn new(keypad: K, handler: H) -> Self {
        Self { keypad, handler }
    }

    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

impl<K: Keypad, H: KeyHandler> Poll for KeypadPoller<K, H> {
    fn poll(&mut self) {
        self.handler.tick();
        if let Some(code) = self.keypad.read_key() {
            self.handler.handle_key(code);
        }
    }
}
