//! Menu drawable
//!
//! Paints a [`MenuContext`] into a grid. Layout on a 20x4 display:
//!
//! ```text
//! Main                   <- screen title, or the label being edited
//! > * Motor              <- selection marker, toggle state, label
//!   Speed
//!   Settings
//! ```

use core::cell::RefCell;
use core::fmt::Write;

use heapless::String;
use tickloop_display::{Drawable, Grid};

use crate::context::{MenuContext, MenuMode};

/// Prefix of the value line in numeric edit modes
const VALUE_PREFIX: &str = "Value:";

const HELP_STEPPED: &str = "Up/Down change";
const HELP_NUMERIC: &str = "0-9 type, Del erase";
const HELP_TEXT: &str = "Tap keys, Del erase";
const HELP_CONFIRM: &str = "Select=OK Back=Esc";

/// Draws a shared menu context
pub struct MenuRenderer<'r, 'a> {
    context: &'r RefCell<MenuContext<'a>>,
    marker: u8,
}

impl<'r, 'a> MenuRenderer<'r, 'a> {
    pub fn new(context: &'r RefCell<MenuContext<'a>>) -> Self {
        Self {
            context,
            marker: b'>',
        }
    }

    /// Use a different selection marker
    pub fn with_marker(mut self, marker: u8) -> Self {
        self.marker = marker;
        self
    }
}

/// Formatted `Value:<n>` line
fn value_line(value: i32) -> String<24> {
    let mut line = String::new();
    // 6 + 11 characters at most
    let _ = write!(line, "{}{}", VALUE_PREFIX, value);
    line
}

/// First character shown on the text line so the cursor stays on screen
fn text_window_start(cursor: usize, cols: usize) -> usize {
    (cursor + 1).saturating_sub(cols)
}

impl<const ROWS: usize, const COLS: usize> Drawable<ROWS, COLS> for MenuRenderer<'_, '_> {
    fn draw(&mut self, grid: &mut Grid<ROWS, COLS>) {
        // Item rows are whatever the grid has below the title
        if let Ok(mut context) = self.context.try_borrow_mut() {
            context.set_visible_rows(ROWS.saturating_sub(1));
        }
        let Ok(context) = self.context.try_borrow() else {
            return;
        };

        let title = context.edit_label().unwrap_or(context.screen().title);
        grid.write_width(0, 0, title.as_bytes(), COLS);

        match context.mode() {
            MenuMode::Browsing => {
                let screen = context.screen();
                let rows = context.visible_rows().min(ROWS.saturating_sub(1));
                for i in 0..rows {
                    let index = context.top() + i;
                    let Some(item) = screen.item(index) else {
                        break;
                    };
                    let row = i + 1;
                    if index == context.selected() {
                        grid.set(row, 0, self.marker);
                    }
                    let label_col = match item.toggle_state() {
                        Some(on) => {
                            grid.set(row, 2, if on { b'*' } else { b' ' });
                            4
                        }
                        None => 2,
                    };
                    grid.write_str(row, label_col, item.label());
                }
            }
            MenuMode::EditingStepped | MenuMode::EnteringNumeric => {
                let value = context.edit_value().unwrap_or(0);
                grid.write_str(1, 0, &value_line(value));
                let help = if context.mode() == MenuMode::EditingStepped {
                    HELP_STEPPED
                } else {
                    HELP_NUMERIC
                };
                grid.write_str(2, 0, help);
                grid.write_str(3, 0, HELP_CONFIRM);
            }
            MenuMode::EnteringText => {
                let text = context.edit_text().unwrap_or("");
                let cursor = context.text_cursor().unwrap_or(0);
                let start = text_window_start(cursor, COLS);
                let offset = text.char_indices().nth(start).map_or(text.len(), |(i, _)| i);
                grid.write_str(1, 0, &text[offset..]);
                grid.write_str(2, 0, HELP_TEXT);
                grid.write_str(3, 0, HELP_CONFIRM);
            }
        }
    }

    fn cursor(&self) -> Option<(u8, u8)> {
        let context = self.context.try_borrow().ok()?;
        let col = match context.mode() {
            MenuMode::EnteringNumeric => value_line(context.edit_value()?).len(),
            MenuMode::EnteringText => {
                let cursor = context.text_cursor()?;
                cursor.saturating_sub(text_window_start(cursor, COLS))
            }
            _ => return None,
        };
        let col = col.min(COLS.saturating_sub(1));
        Some((1, u8::try_from(col).ok()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{MenuItem, MenuScreen, TextField};
    use tickloop_core::{Flag, Signal};
    use tickloop_display::DiffRenderer;
    use tickloop_hal::mock::{MockDisplay, MockTicks};

    fn paint<const ROWS: usize, const COLS: usize>(
        renderer: &mut MenuRenderer,
    ) -> Grid<ROWS, COLS> {
        let mut grid = Grid::default();
        renderer.draw(&mut grid);
        grid
    }

    #[test]
    fn test_browsing_layout() {
        let motor = Flag::new(true);
        let speed = Signal::new(0);
        let items = [
            MenuItem::toggle("Motor", &motor),
            MenuItem::edit_long("Speed", &speed, 1),
        ];
        let root = MenuScreen::new("Main", &items);
        let context = RefCell::new(MenuContext::new(&root));
        let mut renderer = MenuRenderer::new(&context);

        let grid: Grid<4, 12> = paint(&mut renderer);
        assert_eq!(grid.row(0), Some(b"Main        "));
        assert_eq!(grid.row(1), Some(b"> * Motor   "));
        assert_eq!(grid.row(2), Some(b"  Speed     "));
        assert_eq!(grid.row(3), Some(b"            "));
        assert_eq!(Drawable::<4, 12>::cursor(&renderer), None);

        motor.set(false);
        context.borrow_mut().move_by(1);
        let grid: Grid<4, 12> = paint(&mut renderer);
        assert_eq!(grid.row(1), Some(b"    Motor   "));
        assert_eq!(grid.row(2), Some(b"> Speed     "));
    }

    #[test]
    fn test_scrolled_rows_and_truncation() {
        let flags: [Flag; 5] = Default::default();
        let items: [MenuItem; 5] =
            core::array::from_fn(|i| MenuItem::toggle("A very long label", &flags[i]));
        let root = MenuScreen::new("Title that is long", &items);
        let context = RefCell::new(MenuContext::new(&root));
        context.borrow_mut().move_by(4);
        let mut renderer = MenuRenderer::new(&context);

        let grid: Grid<4, 8> = paint(&mut renderer);
        assert_eq!(grid.row(0), Some(b"Title th"));
        assert_eq!(grid.row(1), Some(b"    A ve"));
        assert_eq!(grid.row(3), Some(b">   A ve"));
    }

    #[test]
    fn test_stepped_edit_layout() {
        let speed = Signal::new(-15);
        let items = [MenuItem::edit_long("Speed", &speed, 5)];
        let root = MenuScreen::new("Main", &items);
        let context = RefCell::new(MenuContext::new(&root));
        context.borrow_mut().activate();
        let mut renderer = MenuRenderer::new(&context);

        let grid: Grid<4, 20> = paint(&mut renderer);
        assert_eq!(grid.row(0), Some(b"Speed               "));
        assert_eq!(grid.row(1), Some(b"Value:-15           "));
        assert_eq!(grid.row(2), Some(b"Up/Down change      "));
        assert_eq!(grid.row(3), Some(b"Select=OK Back=Esc  "));
        assert_eq!(Drawable::<4, 20>::cursor(&renderer), None);
    }

    #[test]
    fn test_numeric_entry_cursor() {
        let count = Signal::new(7);
        let items = [MenuItem::enter_long("Count", &count)];
        let root = MenuScreen::new("Main", &items);
        let context = RefCell::new(MenuContext::new(&root));
        context.borrow_mut().activate();
        context.borrow_mut().digit(4, 0);
        context.borrow_mut().digit(2, 0);
        let mut renderer = MenuRenderer::new(&context);

        let grid: Grid<4, 20> = paint(&mut renderer);
        assert_eq!(grid.row(1), Some(b"Value:42            "));
        assert_eq!(Drawable::<4, 20>::cursor(&renderer), Some((1, 8)));
    }

    #[test]
    fn test_text_entry_cursor_and_window() {
        let name = TextField::with_text("abcdef");
        let items = [MenuItem::enter_string("Name", &name, 16)];
        let root = MenuScreen::new("Main", &items);
        let context = RefCell::new(MenuContext::new(&root));
        context.borrow_mut().activate();
        let mut renderer = MenuRenderer::new(&context);

        let grid: Grid<4, 10> = paint(&mut renderer);
        assert_eq!(grid.row(1), Some(b"abcdef    "));
        assert_eq!(Drawable::<4, 10>::cursor(&renderer), Some((1, 6)));

        context.borrow_mut().digit(9, 0);
        assert_eq!(Drawable::<4, 10>::cursor(&renderer), Some((1, 6)));

        // Narrow display scrolls the text to keep the cursor visible
        let grid: Grid<4, 4> = paint(&mut renderer);
        assert_eq!(grid.row(1), Some(b"defw"));
        assert_eq!(Drawable::<4, 4>::cursor(&renderer), Some((1, 3)));
    }

    #[test]
    fn test_text_window_with_non_ascii() {
        let name = TextField::with_text("\u{e9}abc");
        let items = [MenuItem::enter_string("Name", &name, 16)];
        let root = MenuScreen::new("Main", &items);
        let context = RefCell::new(MenuContext::new(&root));
        context.borrow_mut().activate();
        let mut renderer = MenuRenderer::new(&context);

        let grid: Grid<4, 8> = paint(&mut renderer);
        assert_eq!(grid.row(1), Some(b"?abc    "));
        assert_eq!(Drawable::<4, 8>::cursor(&renderer), Some((1, 4)));

        let grid: Grid<4, 4> = paint(&mut renderer);
        assert_eq!(grid.row(1), Some(b"abc "));
        assert_eq!(Drawable::<4, 4>::cursor(&renderer), Some((1, 3)));
    }

    #[test]
    fn test_two_row_grid_scrolls_one_item() {
        let flags: [Flag; 3] = Default::default();
        let items = [
            MenuItem::toggle("One", &flags[0]),
            MenuItem::toggle("Two", &flags[1]),
            MenuItem::toggle("Three", &flags[2]),
        ];
        let root = MenuScreen::new("Root", &items);
        let context = RefCell::new(MenuContext::new(&root));
        context.borrow_mut().move_by(2);
        let mut renderer = MenuRenderer::new(&context);

        let grid: Grid<2, 16> = paint(&mut renderer);
        assert_eq!(grid.row(0), Some(b"Root            "));
        assert_eq!(grid.row(1), Some(b">   Three       "));
        assert_eq!(context.borrow().visible_rows(), 1);

        context.borrow_mut().move_by(-1);
        let grid: Grid<2, 16> = paint(&mut renderer);
        assert_eq!(grid.row(1), Some(b">   Two         "));
    }

    #[test]
    fn test_menu_through_diff_renderer() {
        let ticks = MockTicks::new();
        let flags: [Flag; 4] = Default::default();
        let items = [
            MenuItem::toggle("One", &flags[0]),
            MenuItem::toggle("Two", &flags[1]),
        ];
        let root = MenuScreen::new("Menu", &items);
        let context = RefCell::new(MenuContext::new(&root));

        let mut renderer: DiffRenderer<_, _, _, 4, 10> = DiffRenderer::new(
            MockDisplay::<4, 10>::new(),
            MenuRenderer::new(&context),
            &ticks,
            10,
            5000,
        );
        renderer.begin();
        renderer.render_pass(false);
        assert_eq!(renderer.display().row(1), b">   One   ");

        renderer.display_mut().clear_ops();
        context.borrow_mut().move_by(1);
        renderer.render_pass(false);

        // Only the two marker cells change
        let runs: Vec<&[u8]> = renderer.display().runs().collect();
        assert_eq!(runs, vec![&b" "[..], &b">"[..]]);
        assert_eq!(renderer.display().row(2), b">   Two   ");
    }
}
