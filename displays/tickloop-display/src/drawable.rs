//! Drawable capability

use crate::grid::Grid;

/// Anything that can paint itself into a character grid
///
/// `draw` is called once per frame on a freshly blanked grid. Drawables
/// may keep per-frame state such as an animation index.
pub trait Drawable<const ROWS: usize, const COLS: usize> {
    fn draw(&mut self, grid: &mut Grid<ROWS, COLS>);

    /// Requested hardware cursor as `(row, col)`, `None` to hide it
    fn cursor(&self) -> Option<(u8, u8)> {
        None
    }
}

impl<T, const ROWS: usize, const COLS: usize> Drawable<ROWS, COLS> for &mut T
where
    T: Drawable<ROWS, COLS> + ?Sized,
{
    fn draw(&mut self, grid: &mut Grid<ROWS, COLS>) {
        (**self).draw(grid)
    }

    fn cursor(&self) -> Option<(u8, u8)> {
        (**self).cursor()
    }
}
