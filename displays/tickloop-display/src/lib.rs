//! Character display pipeline
//!
//! Drawables paint into a [`Grid`] every frame; the [`DiffRenderer`] task
//! compares that desired grid against what it last sent and writes only
//! the changed runs to the [`CharDisplay`](tickloop_hal::CharDisplay).
//!
//! ```text
//! ┌────────────┐  draw   ┌─────────┐  diff   ┌─────────┐  runs  ┌─────────┐
//! │  Drawable  │ ──────► │ desired │ ──────► │ flushed │ ─────► │   LCD   │
//! └────────────┘         └─────────┘         └─────────┘        └─────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod drawable;
pub mod grid;
pub mod renderer;
pub mod widgets;

pub use drawable::Drawable;
pub use grid::Grid;
pub use renderer::DiffRenderer;
pub use widgets::{DrawableStack, Label, Spinner, ValueField};

/// Number of character rows on standard display
pub const LCD_ROWS: usize = 4;

/// Number of character columns on standard display
pub const LCD_COLS: usize = 20;

/// Grid sized for the common 20x4 character LCD
pub type LcdGrid = Grid<LCD_ROWS, LCD_COLS>;
