//! Host test doubles
//!
//! Recording implementations of every HAL trait, usable from `#[test]`
//! code in downstream crates (enable the `mock` feature in
//! `[dev-dependencies]`). Nothing here allocates; recordings are bounded
//! and silently stop once full.

use core::cell::{Cell, RefCell};

use heapless::{Deque, Vec};

use crate::clock::{TickSource, Ticks};
use crate::display::CharDisplay;
use crate::gpio::{InputPin, OutputPin};
use crate::hid::HidOutput;
use crate::keypad::Keypad;

/// Maximum recorded operations per double
pub const MAX_RECORDED: usize = 256;

/// Maximum bytes kept per recorded display write
pub const MAX_RUN: usize = 40;

// ============================================================================
// Ticks
// ============================================================================

/// Manually advanced tick counter
#[derive(Debug, Default)]
pub struct MockTicks {
    now: Cell<Ticks>,
}

impl MockTicks {
    /// Start at tick 0
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Start at an arbitrary tick, e.g. just below the wrap point
    pub const fn starting_at(now: Ticks) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Advance time, wrapping like a hardware counter
    pub fn advance(&self, ticks: Ticks) {
        self.now.set(self.now.get().wrapping_add(ticks));
    }

    /// Jump to an absolute tick
    pub fn set(&self, now: Ticks) {
        self.now.set(now);
    }
}

impl TickSource for MockTicks {
    fn now(&self) -> Ticks {
        self.now.get()
    }
}

// ============================================================================
// Display
// ============================================================================

/// A single call made on [`MockDisplay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    SetCursor { col: u8, row: u8 },
    Write(Vec<u8, MAX_RUN>),
    Clear,
    Power(bool),
    CursorVisible(bool),
}

/// Character display that records calls and mirrors the visible glyphs
///
/// `ROWS`/`COLS` size the emulated panel; writes past the end of a row
/// are dropped like on a display with line wrap disabled.
#[derive(Debug)]
pub struct MockDisplay<const ROWS: usize, const COLS: usize> {
    ops: Vec<DisplayOp, MAX_RECORDED>,
    cells: [[u8; COLS]; ROWS],
    col: usize,
    row: usize,
    powered: bool,
    cursor_visible: bool,
}

impl<const ROWS: usize, const COLS: usize> Default for MockDisplay<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> MockDisplay<ROWS, COLS> {
    /// Create a blank, powered-off panel
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            cells: [[b' '; COLS]; ROWS],
            col: 0,
            row: 0,
            powered: false,
            cursor_visible: false,
        }
    }

    /// All calls recorded so far
    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }

    /// Forget recorded calls (the panel contents are kept)
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// The recorded `write_run` payloads, in order
    pub fn runs(&self) -> impl Iterator<Item = &[u8]> {
        self.ops.iter().filter_map(|op| match op {
            DisplayOp::Write(run) => Some(run.as_slice()),
            _ => None,
        })
    }

    /// Number of `write_run` calls recorded
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// What the panel currently shows on a row
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row]
    }

    /// Current write position as (col, row)
    pub fn cursor(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn record(&mut self, op: DisplayOp) {
        let _ = self.ops.push(op);
    }
}

impl<const ROWS: usize, const COLS: usize> CharDisplay for MockDisplay<ROWS, COLS> {
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col as usize;
        self.row = row as usize;
        self.record(DisplayOp::SetCursor { col, row });
    }

    fn write_run(&mut self, chars: &[u8]) {
        for &ch in chars {
            if self.row < ROWS && self.col < COLS {
                self.cells[self.row][self.col] = ch;
            }
            self.col += 1;
        }
        let mut run = Vec::new();
        let _ = run.extend_from_slice(&chars[..chars.len().min(MAX_RUN)]);
        self.record(DisplayOp::Write(run));
    }

    fn clear(&mut self) {
        self.cells = [[b' '; COLS]; ROWS];
        self.col = 0;
        self.row = 0;
        self.record(DisplayOp::Clear);
    }

    fn set_power(&mut self, on: bool) {
        self.powered = on;
        self.record(DisplayOp::Power(on));
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
        self.record(DisplayOp::CursorVisible(visible));
    }
}

// ============================================================================
// Keypad
// ============================================================================

/// Keypad fed from a queue of scripted key codes
#[derive(Debug)]
pub struct MockKeypad {
    pending: Deque<u8, 32>,
}

impl Default for MockKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl MockKeypad {
    pub fn new() -> Self {
        Self { pending: Deque::new() }
    }

    /// Queue a key press; it is returned by the next `read_key`
    pub fn press(&mut self, code: u8) {
        let _ = self.pending.push_back(code);
    }

    /// Queue several key presses, one per poll
    pub fn press_all(&mut self, codes: &[u8]) {
        for &code in codes {
            self.press(code);
        }
    }

    /// Keys not yet read
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Keypad for MockKeypad {
    fn read_key(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }
}

// ============================================================================
// HID
// ============================================================================

/// A single call made on [`MockHid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HidEvent {
    Press(u16),
    Release(u16),
}

/// HID sink recording press/release calls
#[derive(Debug, Default)]
pub struct MockHid {
    events: RefCell<Vec<HidEvent, MAX_RECORDED>>,
}

impl MockHid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<HidEvent, MAX_RECORDED> {
        self.events.borrow().clone()
    }

    fn record(&self, event: HidEvent) {
        let _ = self.events.borrow_mut().push(event);
    }
}

impl HidOutput for MockHid {
    fn press(&self, code: u16) {
        self.record(HidEvent::Press(code));
    }

    fn release(&self, code: u16) {
        self.record(HidEvent::Release(code));
    }
}

// ============================================================================
// GPIO
// ============================================================================

/// Input pin whose level is set by the test
#[derive(Debug, Default)]
pub struct MockInputPin {
    high: Cell<bool>,
}

impl MockInputPin {
    pub fn new(high: bool) -> Self {
        Self { high: Cell::new(high) }
    }

    pub fn set_high(&self, high: bool) {
        self.high.set(high);
    }
}

impl InputPin for MockInputPin {
    fn is_high(&self) -> bool {
        self.high.get()
    }
}

impl InputPin for &MockInputPin {
    fn is_high(&self) -> bool {
        self.high.get()
    }
}

/// Output pin remembering its level and how often it was written
#[derive(Debug, Default)]
pub struct MockOutputPin {
    high: bool,
    writes: usize,
}

impl MockOutputPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set_high(&self) -> bool {
        self.high
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl OutputPin for MockOutputPin {
    fn set_high(&mut self) {
        self.high = true;
        self.writes += 1;
    }

    fn set_low(&mut self) {
        self.high = false;
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_display_mirrors_writes() {
        let mut display: MockDisplay<2, 8> = MockDisplay::new();
        display.set_cursor(2, 1);
        display.write_run(b"hi");
        assert_eq!(&display.row(1)[..4], b"  hi");
        assert_eq!(display.run_count(), 1);
        assert_eq!(display.cursor(), (4, 1));
    }

    #[test]
    fn test_mock_display_drops_overflow() {
        let mut display: MockDisplay<1, 4> = MockDisplay::new();
        display.set_cursor(2, 0);
        display.write_run(b"abcd");
        assert_eq!(display.row(0), b"  ab");
    }

    #[test]
    fn test_mock_keypad_is_fifo() {
        let mut keypad = MockKeypad::new();
        keypad.press_all(b"AB");
        assert_eq!(keypad.read_key(), Some(b'A'));
        assert_eq!(keypad.read_key(), Some(b'B'));
        assert_eq!(keypad.read_key(), None);
    }

    #[test]
    fn test_mock_ticks_wrap() {
        let ticks = MockTicks::starting_at(u32::MAX);
        ticks.advance(2);
        assert_eq!(ticks.now(), 1);
    }
}
