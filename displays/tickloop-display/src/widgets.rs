//! Basic drawables
//!
//! Small building blocks for status screens. Combine them with a
//! [`DrawableStack`] and hand the stack to the renderer.

use core::fmt::{Display, Write};

use heapless::{String, Vec};
use tickloop_core::{CapacityError, Enable, Signal};

use crate::drawable::Drawable;
use crate::grid::{Grid, BLANK};

/// Longest formatted value a [`ValueField`] can show
pub const VALUE_TEXT_LEN: usize = 16;

/// Static text at a fixed position
pub struct Label<'a> {
    row: usize,
    col: usize,
    text: &'a str,
}

impl<'a> Label<'a> {
    pub const fn new(row: usize, col: usize, text: &'a str) -> Self {
        Self { row, col, text }
    }
}

impl<const ROWS: usize, const COLS: usize> Drawable<ROWS, COLS> for Label<'_> {
    fn draw(&mut self, grid: &mut Grid<ROWS, COLS>) {
        grid.write_str(self.row, self.col, self.text);
    }
}

/// Live value between a prefix and a suffix, e.g. `Speed: 120 rpm`
///
/// With a width set, the value is padded or truncated to exactly that
/// many cells so the suffix does not jump around as the value changes.
pub struct ValueField<'a, V: Copy + Display> {
    row: usize,
    col: usize,
    prefix: &'a str,
    value: &'a Signal<V>,
    suffix: &'a str,
    width: Option<usize>,
}

impl<'a, V: Copy + Display> ValueField<'a, V> {
    pub fn new(
        row: usize,
        col: usize,
        prefix: &'a str,
        value: &'a Signal<V>,
        suffix: &'a str,
    ) -> Self {
        Self {
            row,
            col,
            prefix,
            value,
            suffix,
            width: None,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

impl<V: Copy + Display, const ROWS: usize, const COLS: usize> Drawable<ROWS, COLS>
    for ValueField<'_, V>
{
    fn draw(&mut self, grid: &mut Grid<ROWS, COLS>) {
        let mut col = self.col;
        grid.write_str(self.row, col, self.prefix);
        col += self.prefix.len();

        let mut text: String<VALUE_TEXT_LEN> = String::new();
        // Overlong values are cut off at the buffer size
        let _ = write!(text, "{}", self.value.get());
        let width = self.width.unwrap_or(text.len());
        grid.write_width(self.row, col, text.as_bytes(), width);
        col += width;

        grid.write_str(self.row, col, self.suffix);
    }
}

/// Activity indicator cycling through characters while enabled
///
/// Advances one character per frame; shows a blank while disabled.
pub struct Spinner<'a> {
    row: usize,
    col: usize,
    enabled: &'a dyn Enable,
    chars: &'a [u8],
    index: usize,
}

impl<'a> Spinner<'a> {
    /// Default animation: blinking star
    pub const STAR: &'static [u8] = b"* ";

    pub fn new(row: usize, col: usize, enabled: &'a dyn Enable) -> Self {
        Self::with_chars(row, col, enabled, Self::STAR)
    }

    pub fn with_chars(row: usize, col: usize, enabled: &'a dyn Enable, chars: &'a [u8]) -> Self {
        Self {
            row,
            col,
            enabled,
            chars,
            index: 0,
        }
    }
}

impl<const ROWS: usize, const COLS: usize> Drawable<ROWS, COLS> for Spinner<'_> {
    fn draw(&mut self, grid: &mut Grid<ROWS, COLS>) {
        match self.chars.get(self.index) {
            Some(&ch) if self.enabled.enabled() => {
                grid.set(self.row, self.col, ch);
                self.index = (self.index + 1) % self.chars.len();
            }
            _ => grid.set(self.row, self.col, BLANK),
        }
    }
}

/// Paints every child in order; later children overwrite earlier ones
///
/// The cursor request of the first child that has one wins.
pub struct DrawableStack<'a, const ROWS: usize, const COLS: usize, const N: usize> {
    children: Vec<&'a mut dyn Drawable<ROWS, COLS>, N>,
}

impl<'a, const ROWS: usize, const COLS: usize, const N: usize> DrawableStack<'a, ROWS, COLS, N> {
    pub const fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Add a child, silently ignoring it once full
    pub fn add(&mut self, child: &'a mut dyn Drawable<ROWS, COLS>) {
        let _ = self.try_add(child);
    }

    pub fn try_add(
        &mut self,
        child: &'a mut dyn Drawable<ROWS, COLS>,
    ) -> Result<(), CapacityError> {
        self.children
            .push(child)
            .map_err(|_| CapacityError::GroupFull { capacity: N })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<const ROWS: usize, const COLS: usize, const N: usize> Default
    for DrawableStack<'_, ROWS, COLS, N>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize, const N: usize> Drawable<ROWS, COLS>
    for DrawableStack<'_, ROWS, COLS, N>
{
    fn draw(&mut self, grid: &mut Grid<ROWS, COLS>) {
        for child in self.children.iter_mut() {
            child.draw(grid);
        }
    }

    fn cursor(&self) -> Option<(u8, u8)> {
        self.children.iter().find_map(|child| child.cursor())
    }
}
