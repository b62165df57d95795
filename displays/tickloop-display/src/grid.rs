//! Character grid
//!
//! A fixed `ROWS x COLS` byte matrix. The renderer keeps two of them: the
//! frame being painted and the last state sent to the panel.

/// Fill byte for a blank cell
pub const BLANK: u8 = b' ';

/// Shown in place of characters the panel's ASCII font lacks
pub const SUBSTITUTE: u8 = b'?';

/// Fixed-size character matrix
///
/// Writes outside the grid are silently dropped, so widgets can paint
/// text without clipping it themselves.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<const ROWS: usize, const COLS: usize> {
    cells: [[u8; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Default for Grid<ROWS, COLS> {
    fn default() -> Self {
        Self::new(BLANK)
    }
}

impl<const ROWS: usize, const COLS: usize> Grid<ROWS, COLS> {
    /// Create a grid with every cell set to `fill`
    pub const fn new(fill: u8) -> Self {
        Self {
            cells: [[fill; COLS]; ROWS],
        }
    }

    /// Set every cell to `fill`
    pub fn clear(&mut self, fill: u8) {
        for row in &mut self.cells {
            row.fill(fill);
        }
    }

    /// Read a cell, `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Write a cell; out-of-range positions are ignored
    pub fn set(&mut self, row: usize, col: usize, ch: u8) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = ch;
        }
    }

    /// Write bytes starting at (`row`, `col`), clipped to the grid
    ///
    /// NUL bytes are written as blanks.
    pub fn write(&mut self, row: usize, col: usize, text: &[u8]) {
        for (i, &ch) in text.iter().enumerate() {
            self.set(row, col + i, if ch == 0 { BLANK } else { ch });
        }
    }

    /// Write text one cell per character
    ///
    /// Characters outside ASCII are shown as [`SUBSTITUTE`].
    pub fn write_str(&mut self, row: usize, col: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            let byte = if ch.is_ascii() { ch as u8 } else { SUBSTITUTE };
            self.set(row, col + i, if byte == 0 { BLANK } else { byte });
        }
    }

    /// Write exactly `width` cells: `text` truncated or padded with blanks
    pub fn write_width(&mut self, row: usize, col: usize, text: &[u8], width: usize) {
        for i in 0..width {
            let ch = match text.get(i) {
                Some(&ch) if ch != 0 => ch,
                _ => BLANK,
            };
            self.set(row, col + i, ch);
        }
    }

    /// Contents of one row, `None` outside the grid
    pub fn row(&self, row: usize) -> Option<&[u8; COLS]> {
        self.cells.get(row)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8; COLS]> {
        self.cells.iter()
    }

    pub const fn height(&self) -> usize {
        ROWS
    }

    pub const fn width(&self) -> usize {
        COLS
    }
}

impl<const ROWS: usize, const COLS: usize> core::fmt::Debug for Grid<ROWS, COLS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut list = f.debug_list();
        for row in &self.cells {
            match core::str::from_utf8(row) {
                Ok(text) => list.entry(&text),
                Err(_) => list.entry(row),
            };
        }
        list.finish()
    }
}

#[cfg(feature = "defmt")]
impl<const ROWS: usize, const COLS: usize> defmt::Format for Grid<ROWS, COLS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Grid[");
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{=[u8]:a}", row.as_slice());
        }
        defmt::write!(f, "]");
    }
}
