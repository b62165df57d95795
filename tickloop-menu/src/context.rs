//! Menu navigation and editing state machine

use heapless::Vec;
use tickloop_core::log::NOOP_LOG;
use tickloop_core::{CapacityError, Log, LogEvent, Signal};
use tickloop_hal::Ticks;

use crate::item::{MenuCommand, MenuItem, MenuScreen, TextField};
use crate::multitap::MultiTap;
use crate::router::MenuKey;

/// Maximum number of screens on the navigation stack (root included)
pub const MAX_DEPTH: usize = 8;

/// Rows available for items on a 4-line display (one is the title)
pub const DEFAULT_VISIBLE_ROWS: usize = 3;

/// What the menu is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuMode {
    /// Moving through items
    Browsing,
    /// Changing a number live with up/down
    EditingStepped,
    /// Typing a number
    EnteringNumeric,
    /// Typing text with multi-tap keys
    EnteringText,
}

/// In-progress edit
enum Edit<'a> {
    Stepped {
        label: &'a str,
        target: &'a Signal<i32>,
        step: i32,
        original: i32,
    },
    Numeric {
        label: &'a str,
        target: &'a Signal<i32>,
        value: i32,
        /// No digit typed yet; the next one replaces the value
        fresh: bool,
    },
    Text {
        label: &'a str,
        target: &'a TextField,
        input: MultiTap,
    },
}

impl<'a> Edit<'a> {
    fn label(&self) -> &'a str {
        match *self {
            Edit::Stepped { label, .. }
            | Edit::Numeric { label, .. }
            | Edit::Text { label, .. } => label,
        }
    }

    fn mode(&self) -> MenuMode {
        match self {
            Edit::Stepped { .. } => MenuMode::EditingStepped,
            Edit::Numeric { .. } => MenuMode::EnteringNumeric,
            Edit::Text { .. } => MenuMode::EnteringText,
        }
    }
}

/// Navigation stack, selection and edit state
///
/// All operations are total: keys that make no sense in the current mode
/// are ignored.
pub struct MenuContext<'a> {
    root: &'a MenuScreen<'a>,
    /// Screens opened above the root
    stack: Vec<&'a MenuScreen<'a>, { MAX_DEPTH - 1 }>,
    selected: usize,
    top: usize,
    visible_rows: usize,
    edit: Option<Edit<'a>>,
    log: &'a dyn Log,
}

impl<'a> MenuContext<'a> {
    /// Create a context showing `root`, sized for a 4-line display
    pub fn new(root: &'a MenuScreen<'a>) -> Self {
        Self {
            root,
            stack: Vec::new(),
            selected: 0,
            top: 0,
            visible_rows: DEFAULT_VISIBLE_ROWS,
            edit: None,
            log: &NOOP_LOG,
        }
    }

    /// Set how many item rows fit under the title
    pub fn with_visible_rows(mut self, rows: usize) -> Self {
        self.set_visible_rows(rows);
        self
    }

    /// Resize the item window, scrolling so the selection stays inside it
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        if self.selected >= self.top + self.visible_rows {
            self.top = self.selected + 1 - self.visible_rows;
        }
    }

    pub fn with_log(mut self, log: &'a dyn Log) -> Self {
        self.log = log;
        self
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn screen(&self) -> &'a MenuScreen<'a> {
        self.stack.last().copied().unwrap_or(self.root)
    }

    /// Number of screens above the root
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Index of the first item shown
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn mode(&self) -> MenuMode {
        self.edit.as_ref().map_or(MenuMode::Browsing, Edit::mode)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Label of the item being edited
    pub fn edit_label(&self) -> Option<&'a str> {
        self.edit.as_ref().map(Edit::label)
    }

    /// Number shown while editing a numeric item
    pub fn edit_value(&self) -> Option<i32> {
        match self.edit.as_ref()? {
            Edit::Stepped { target, .. } => Some(target.get()),
            Edit::Numeric { value, .. } => Some(*value),
            Edit::Text { .. } => None,
        }
    }

    /// Text shown while entering a string
    pub fn edit_text(&self) -> Option<&str> {
        match self.edit.as_ref()? {
            Edit::Text { input, .. } => Some(input.as_str()),
            _ => None,
        }
    }

    /// Character position of the text entry cursor
    pub fn text_cursor(&self) -> Option<usize> {
        match self.edit.as_ref()? {
            Edit::Text { input, .. } => Some(input.cursor()),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Open a screen, ignored (and logged) at maximum depth
    pub fn push(&mut self, screen: &'a MenuScreen<'a>) {
        let _ = self.try_push(screen);
    }

    pub fn try_push(&mut self, screen: &'a MenuScreen<'a>) -> Result<(), CapacityError> {
        if self.stack.push(screen).is_err() {
            self.log.log(LogEvent::ScreenPushRejected { depth: MAX_DEPTH });
            return Err(CapacityError::MenuStackFull { depth: MAX_DEPTH });
        }
        self.selected = 0;
        self.top = 0;
        Ok(())
    }

    /// Back: cancel an edit, or return to the parent screen
    pub fn pop(&mut self) {
        if self.edit.is_some() {
            self.cancel_edit();
            return;
        }
        if self.stack.pop().is_some() {
            self.selected = 0;
            self.top = 0;
        }
    }

    /// Close every screen above the root
    pub fn pop_to_root(&mut self) {
        if self.edit.is_some() {
            self.cancel_edit();
        }
        self.stack.clear();
        self.selected = 0;
        self.top = 0;
    }

    /// Up/down
    ///
    /// Moves the selection while browsing, keeping it inside the visible
    /// window. While stepping a value, adds `delta * step` to it.
    pub fn move_by(&mut self, delta: i32) {
        match &self.edit {
            Some(Edit::Stepped { target, step, .. }) => {
                target.set(target.get().saturating_add(delta.saturating_mul(*step)));
                return;
            }
            Some(_) => return,
            None => {}
        }

        let count = self.screen().count();
        if count == 0 {
            return;
        }

        let selected = (self.selected as i64 + delta as i64).clamp(0, count as i64 - 1);
        self.selected = selected as usize;

        if self.selected < self.top {
            self.top = self.selected;
        }
        if self.selected >= self.top + self.visible_rows {
            self.top = self.selected + 1 - self.visible_rows;
        }
    }

    /// Select: run the selected item, or confirm an edit
    pub fn activate(&mut self) {
        if self.edit.is_some() {
            self.confirm_edit();
            return;
        }

        let Some(item) = self.screen().item(self.selected) else {
            return;
        };

        match *item {
            MenuItem::Action { action, .. } => action(),
            MenuItem::Command { command, .. } => match command() {
                MenuCommand::Stay => {}
                MenuCommand::Back => self.pop(),
                MenuCommand::Root => self.pop_to_root(),
            },
            MenuItem::Submenu { screen, .. } => self.push(screen),
            MenuItem::Toggle { target, .. } => target.toggle(),
            MenuItem::EditLong {
                label,
                target,
                step,
            } => {
                self.begin_edit(Edit::Stepped {
                    label,
                    target,
                    step,
                    original: target.get(),
                });
            }
            MenuItem::EnterLong { label, target } => {
                self.begin_edit(Edit::Numeric {
                    label,
                    target,
                    value: target.get(),
                    fresh: true,
                });
            }
            MenuItem::EnterString {
                label,
                target,
                max_len,
                timing,
            } => {
                let input = MultiTap::new(&target.get(), max_len, timing);
                self.begin_edit(Edit::Text {
                    label,
                    target,
                    input,
                });
            }
        }
    }

    /// Jump to a visible row (0 is the first item row) and activate it
    ///
    /// Ignored while editing or past the end of the screen.
    pub fn select_visible_row(&mut self, row: usize) {
        if self.edit.is_some() {
            return;
        }
        let index = self.top + row;
        if index < self.screen().count() {
            self.selected = index;
            self.activate();
        }
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Digit key (0..=9) at tick `now`
    pub fn digit(&mut self, digit: u8, now: Ticks) {
        if digit > 9 {
            return;
        }
        match &mut self.edit {
            Some(Edit::Numeric { value, fresh, .. }) => {
                let digit = i32::from(digit);
                if *fresh {
                    *value = digit;
                    *fresh = false;
                } else if *value < 0 {
                    *value = value.saturating_mul(10).saturating_sub(digit);
                } else {
                    *value = value.saturating_mul(10).saturating_add(digit);
                }
            }
            Some(Edit::Text { input, .. }) => input.press(digit, now),
            _ => {}
        }
    }

    /// Delete key: drop the last digit or character
    pub fn delete(&mut self) {
        match &mut self.edit {
            Some(Edit::Numeric { value, fresh, .. }) => {
                *value /= 10;
                *fresh = false;
            }
            Some(Edit::Text { input, .. }) => input.delete(),
            _ => {}
        }
    }

    /// Idle processing, call every pass
    ///
    /// Commits a pending multi-tap character after the long timeout.
    pub fn tick(&mut self, now: Ticks) {
        if let Some(Edit::Text { input, .. }) = &mut self.edit {
            input.tick(now);
        }
    }

    /// Dispatch a routed key
    pub fn handle_key(&mut self, key: MenuKey, now: Ticks) {
        match key {
            MenuKey::Up => self.move_by(-1),
            MenuKey::Down => self.move_by(1),
            MenuKey::Back => self.pop(),
            MenuKey::Select => self.activate(),
            MenuKey::Delete => self.delete(),
            MenuKey::Line(row) => self.select_visible_row(row as usize),
            MenuKey::Digit(digit) => self.digit(digit, now),
        }
    }

    fn begin_edit(&mut self, edit: Edit<'a>) {
        self.edit = Some(edit);
        self.log.log(LogEvent::EditStarted);
    }

    fn confirm_edit(&mut self) {
        match self.edit.take() {
            Some(Edit::Stepped { .. }) => {}
            Some(Edit::Numeric { target, value, .. }) => target.set(value),
            Some(Edit::Text {
                target, mut input, ..
            }) => {
                input.commit();
                target.set(input.as_str());
            }
            None => return,
        }
        self.log.log(LogEvent::EditCommitted);
    }

    fn cancel_edit(&mut self) {
        match self.edit.take() {
            Some(Edit::Stepped {
                target, original, ..
            }) => target.set(original),
            // Numeric and text edits work on a copy
            Some(_) => {}
            None => return,
        }
        self.log.log(LogEvent::EditCancelled);
    }
}
