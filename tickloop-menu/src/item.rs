//! Menu items and screens

use core::cell::RefCell;

use heapless::String;
use tickloop_core::{Enable, Signal};

use crate::config::MultiTapTiming;

/// Longest text a [`TextField`] holds
pub const TEXT_CAPACITY: usize = 32;

/// Text value stored by the application and edited through the menu
#[derive(Debug, Default)]
pub struct TextField {
    text: RefCell<String<TEXT_CAPACITY>>,
}

impl TextField {
    pub const fn new() -> Self {
        Self {
            text: RefCell::new(String::new()),
        }
    }

    /// Create a field holding `text`, truncated to capacity
    pub fn with_text(text: &str) -> Self {
        let field = Self::new();
        field.set(text);
        field
    }

    /// Copy of the current text
    pub fn get(&self) -> String<TEXT_CAPACITY> {
        self.text
            .try_borrow()
            .map(|text| text.clone())
            .unwrap_or_default()
    }

    /// Replace the text, truncated to capacity
    pub fn set(&self, text: &str) {
        if let Ok(mut current) = self.text.try_borrow_mut() {
            current.clear();
            for ch in text.chars() {
                if current.push(ch).is_err() {
                    break;
                }
            }
        }
    }
}

/// Navigation requested by a [`MenuItem::Command`] after it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuCommand {
    /// Stay on the current screen
    #[default]
    Stay,
    /// Return to the parent screen
    Back,
    /// Return to the root screen
    Root,
}

/// One entry on a menu screen
///
/// Items borrow their targets; the menu never owns application state.
#[derive(Clone, Copy)]
pub enum MenuItem<'a> {
    /// Run a callback
    Action {
        label: &'a str,
        action: &'a dyn Fn(),
    },
    /// Run a callback, then navigate as it asks
    Command {
        label: &'a str,
        command: &'a dyn Fn() -> MenuCommand,
    },
    /// Open a child screen
    Submenu {
        label: &'a str,
        screen: &'a MenuScreen<'a>,
    },
    /// Flip an on/off target, shown with a `*` indicator
    Toggle {
        label: &'a str,
        target: &'a dyn Enable,
    },
    /// Change a number live with up/down, `step` per key press
    EditLong {
        label: &'a str,
        target: &'a Signal<i32>,
        step: i32,
    },
    /// Type a number on the digit keys
    EnterLong {
        label: &'a str,
        target: &'a Signal<i32>,
    },
    /// Type text with multi-tap digit keys
    ///
    /// At most `max_len - 1` characters are accepted.
    EnterString {
        label: &'a str,
        target: &'a TextField,
        max_len: usize,
        timing: MultiTapTiming,
    },
}

impl<'a> MenuItem<'a> {
    pub const fn action(label: &'a str, action: &'a dyn Fn()) -> Self {
        MenuItem::Action { label, action }
    }

    pub const fn command(label: &'a str, command: &'a dyn Fn() -> MenuCommand) -> Self {
        MenuItem::Command { label, command }
    }

    pub const fn submenu(label: &'a str, screen: &'a MenuScreen<'a>) -> Self {
        MenuItem::Submenu { label, screen }
    }

    pub const fn toggle(label: &'a str, target: &'a dyn Enable) -> Self {
        MenuItem::Toggle { label, target }
    }

    pub const fn edit_long(label: &'a str, target: &'a Signal<i32>, step: i32) -> Self {
        MenuItem::EditLong {
            label,
            target,
            step,
        }
    }

    pub const fn enter_long(label: &'a str, target: &'a Signal<i32>) -> Self {
        MenuItem::EnterLong { label, target }
    }

    /// Text entry with default multi-tap timing
    pub fn enter_string(label: &'a str, target: &'a TextField, max_len: usize) -> Self {
        MenuItem::EnterString {
            label,
            target,
            max_len,
            timing: MultiTapTiming::default(),
        }
    }

    pub fn label(&self) -> &'a str {
        match *self {
            MenuItem::Action { label, .. }
            | MenuItem::Command { label, .. }
            | MenuItem::Submenu { label, .. }
            | MenuItem::Toggle { label, .. }
            | MenuItem::EditLong { label, .. }
            | MenuItem::EnterLong { label, .. }
            | MenuItem::EnterString { label, .. } => label,
        }
    }

    /// Toggle state, `None` for other kinds
    pub fn toggle_state(&self) -> Option<bool> {
        match *self {
            MenuItem::Toggle { target, .. } => Some(target.enabled()),
            _ => None,
        }
    }
}

/// A titled list of items
#[derive(Clone, Copy)]
pub struct MenuScreen<'a> {
    pub title: &'a str,
    pub items: &'a [MenuItem<'a>],
}

impl<'a> MenuScreen<'a> {
    pub const fn new(title: &'a str, items: &'a [MenuItem<'a>]) -> Self {
        Self { title, items }
    }

    pub fn item(&self, index: usize) -> Option<&'a MenuItem<'a>> {
        self.items.get(index)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}
