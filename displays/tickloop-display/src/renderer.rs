//! Diff renderer task
//!
//! Once per frame the renderer blanks the desired grid, lets the drawable
//! paint it, and writes to the panel only the cells that differ from what
//! was flushed before. Adjacent changed cells on a row are coalesced into
//! a single cursor move plus write.
//!
//! Nothing is read back from the panel. A bus glitch leaves a stale cell
//! until the periodic full refresh repaints everything.

use heapless::Vec;
use tickloop_core::log::NOOP_LOG;
use tickloop_core::{Log, LogEvent, LoopConfig, Poll, Timer};
use tickloop_hal::{CharDisplay, TickSource, Ticks};

use crate::drawable::Drawable;
use crate::grid::{Grid, BLANK};

/// Byte no drawable produces; marks every flushed cell as stale
const UNKNOWN: u8 = 0;

/// Display task reconciling a drawable with a character panel
///
/// Panel addresses are bytes, so on grids wider or taller than 256 cells
/// the cells past column or row 255 are never sent.
pub struct DiffRenderer<'a, D, W, T, const ROWS: usize, const COLS: usize>
where
    D: CharDisplay,
    W: Drawable<ROWS, COLS>,
    T: TickSource + ?Sized,
{
    display: D,
    drawable: W,
    frame: Timer<'a, T>,
    full_refresh: Timer<'a, T>,
    desired: Grid<ROWS, COLS>,
    flushed: Grid<ROWS, COLS>,
    has_flushed: bool,
    refresh_requested: bool,
    /// Cursor request applied after the last pass
    cursor: Option<(u8, u8)>,
    log: &'a dyn Log,
}

impl<'a, D, W, T, const ROWS: usize, const COLS: usize> DiffRenderer<'a, D, W, T, ROWS, COLS>
where
    D: CharDisplay,
    W: Drawable<ROWS, COLS>,
    T: TickSource + ?Sized,
{
    /// Create a renderer
    ///
    /// - `frame_period`: ticks between render passes
    /// - `full_refresh_period`: ticks between complete repaints
    pub fn new(
        display: D,
        drawable: W,
        ticks: &'a T,
        frame_period: Ticks,
        full_refresh_period: Ticks,
    ) -> Self {
        Self {
            display,
            drawable,
            frame: Timer::new(ticks, frame_period),
            full_refresh: Timer::new(ticks, full_refresh_period),
            desired: Grid::new(BLANK),
            flushed: Grid::new(BLANK),
            has_flushed: false,
            refresh_requested: false,
            cursor: None,
            log: &NOOP_LOG,
        }
    }

    /// Create a renderer using the periods from a loop configuration
    pub fn from_config(display: D, drawable: W, ticks: &'a T, config: &LoopConfig) -> Self {
        Self::new(
            display,
            drawable,
            ticks,
            config.frame_period,
            config.full_refresh_period,
        )
    }

    pub fn with_log(mut self, log: &'a dyn Log) -> Self {
        self.log = log;
        self
    }

    /// Initialize the panel
    ///
    /// Powers it on, clears it, hides the cursor and restarts both timers.
    /// The next pass rewrites every cell.
    pub fn begin(&mut self) {
        self.frame.rearm();
        self.full_refresh.rearm();
        self.display.set_power(true);
        self.display.clear();
        self.display.set_cursor(0, 0);
        self.display.set_cursor_visible(false);
        self.has_flushed = false;
        self.cursor = None;
    }

    /// Make the next pass a full repaint
    pub fn request_full_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Run one render pass immediately, regardless of the frame timer
    ///
    /// `force_full` rewrites every cell even if it looks unchanged.
    pub fn render_pass(&mut self, force_full: bool) {
        let full = force_full || self.refresh_requested || !self.has_flushed;
        self.refresh_requested = false;
        if full {
            self.log.log(LogEvent::FullRefresh);
        }

        self.desired.clear(BLANK);
        self.drawable.draw(&mut self.desired);
        let wrote = self.flush(full);
        self.apply_cursor(full, wrote);
    }

    /// Send changed runs to the panel, returns whether anything was written
    fn flush(&mut self, full: bool) -> bool {
        if full {
            self.flushed.clear(UNKNOWN);
        }

        let mut wrote = false;
        for row in 0..ROWS {
            let Ok(row_addr) = u8::try_from(row) else {
                break;
            };
            let mut col = 0;
            while col < COLS {
                if !self.is_changed(row, col, full) {
                    col += 1;
                    continue;
                }
                // Runs can only start at a byte-addressable column
                let Ok(col_addr) = u8::try_from(col) else {
                    break;
                };

                let mut run: Vec<u8, COLS> = Vec::new();
                while col < COLS && self.is_changed(row, col, full) {
                    let ch = self.desired.get(row, col).unwrap_or(BLANK);
                    // Capacity is COLS and a run never spans rows
                    let _ = run.push(ch);
                    self.flushed.set(row, col, ch);
                    col += 1;
                }

                self.display.set_cursor(col_addr, row_addr);
                self.display.write_run(&run);
                wrote = true;
            }
        }

        self.has_flushed = true;
        wrote
    }

    fn is_changed(&self, row: usize, col: usize, full: bool) -> bool {
        full || self.desired.get(row, col) != self.flushed.get(row, col)
    }

    /// Place or hide the hardware cursor as the drawable asks
    ///
    /// Writes move the hardware cursor, so a visible cursor is repositioned
    /// after any run was written.
    fn apply_cursor(&mut self, full: bool, wrote: bool) {
        let request = self.drawable.cursor();
        let changed = request != self.cursor;

        match request {
            Some((row, col)) => {
                if changed || full || wrote {
                    self.display.set_cursor(col, row);
                }
                if full || self.cursor.is_none() {
                    self.display.set_cursor_visible(true);
                }
            }
            None => {
                if full || self.cursor.is_some() {
                    self.display.set_cursor_visible(false);
                }
            }
        }

        self.cursor = request;
    }

    /// Grid painted by the last pass
    pub fn desired(&self) -> &Grid<ROWS, COLS> {
        &self.desired
    }

    /// What the renderer believes the panel shows
    pub fn flushed(&self) -> &Grid<ROWS, COLS> {
        &self.flushed
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn drawable(&self) -> &W {
        &self.drawable
    }

    pub fn drawable_mut(&mut self) -> &mut W {
        &mut self.drawable
    }
}

impl<D, W, T, const ROWS: usize, const COLS: usize> Poll for DiffRenderer<'_, D, W, T, ROWS, COLS>
where
    D: CharDisplay,
    W: Drawable<ROWS, COLS>,
    T: TickSource + ?Sized,
{
    fn poll(&mut self) {
        if !self.frame.expired() {
            return;
        }
        self.frame.rearm();

        let full = self.full_refresh.expired();
        if full {
            self.full_refresh.rearm();
        }
        self.render_pass(full);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;
    use std::vec::Vec;
    use tickloop_hal::mock::{DisplayOp, MockDisplay, MockTicks};

    /// Paints fixed text, one line per row
    struct Text<const ROWS: usize> {
        lines: [&'static str; ROWS],
        cursor: Option<(u8, u8)>,
    }

    impl<const ROWS: usize> Text<ROWS> {
        fn new(lines: [&'static str; ROWS]) -> Self {
            Self {
                lines,
                cursor: None,
            }
        }
    }

    impl<const ROWS: usize, const COLS: usize> Drawable<ROWS, COLS> for Text<ROWS> {
        fn draw(&mut self, grid: &mut Grid<ROWS, COLS>) {
            for (row, line) in self.lines.iter().enumerate() {
                grid.write_str(row, 0, line);
            }
        }

        fn cursor(&self) -> Option<(u8, u8)> {
            self.cursor
        }
    }

    #[derive(Default)]
    struct CountingLog {
        full_refreshes: Cell<u32>,
    }

    impl Log for CountingLog {
        fn log(&self, event: LogEvent) {
            if event == LogEvent::FullRefresh {
                self.full_refreshes.set(self.full_refreshes.get() + 1);
            }
        }
    }

    fn text_renderer<'t, const R: usize, const C: usize>(
        ticks: &'t MockTicks,
        lines: [&'static str; R],
        frame_period: Ticks,
        full_refresh_period: Ticks,
    ) -> DiffRenderer<'t, MockDisplay<R, C>, Text<R>, MockTicks, R, C> {
        DiffRenderer::new(
            MockDisplay::new(),
            Text::new(lines),
            ticks,
            frame_period,
            full_refresh_period,
        )
    }

    fn runs<const R: usize, const C: usize>(display: &MockDisplay<R, C>) -> Vec<Vec<u8>> {
        display.runs().map(|run| run.to_vec()).collect()
    }

    #[test]
    fn test_first_pass_writes_every_cell() {
        let ticks = MockTicks::new();
        let mut renderer = text_renderer::<2, 5>(&ticks, ["Hi", ""], 100, 5000);

        renderer.render_pass(false);

        let display = renderer.display();
        assert_eq!(display.run_count(), 2);
        assert_eq!(display.row(0), b"Hi   ");
        assert_eq!(display.row(1), b"     ");
    }

    #[test]
    fn test_only_changed_run_is_written() {
        let ticks = MockTicks::new();
        let mut renderer = text_renderer::<1, 5>(&ticks, ["XY  C"], 100, 5000);
        renderer.render_pass(false);
        renderer.display_mut().clear_ops();

        renderer.drawable_mut().lines = ["AB  C"];
        renderer.render_pass(false);

        assert_eq!(
            renderer.display().ops(),
            &[
                DisplayOp::SetCursor { col: 0, row: 0 },
                DisplayOp::Write(heapless::Vec::from_slice(b"AB").unwrap()),
            ]
        );
        assert_eq!(renderer.display().row(0), b"AB  C");
    }

    /// Marks a single cell on a one-row grid
    struct Dot {
        at: Option<usize>,
    }

    impl<const COLS: usize> Drawable<1, COLS> for Dot {
        fn draw(&mut self, grid: &mut Grid<1, COLS>) {
            if let Some(col) = self.at {
                grid.set(0, col, b'*');
            }
        }
    }

    #[test]
    fn test_cells_past_byte_address_are_not_sent() {
        let ticks = MockTicks::new();
        let mut renderer: DiffRenderer<'_, MockDisplay<1, 300>, Dot, MockTicks, 1, 300> =
            DiffRenderer::new(MockDisplay::new(), Dot { at: None }, &ticks, 100, 5000);
        renderer.render_pass(false);

        renderer.drawable_mut().at = Some(10);
        renderer.render_pass(false);
        renderer.display_mut().clear_ops();

        // Column 280 would alias column 24 if truncated to a byte
        renderer.drawable_mut().at = Some(280);
        renderer.render_pass(false);

        assert_eq!(
            renderer.display().ops(),
            &[
                DisplayOp::SetCursor { col: 10, row: 0 },
                DisplayOp::Write(heapless::Vec::from_slice(b" ").unwrap()),
            ]
        );
        assert_eq!(renderer.display().row(0)[24], b' ');
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let ticks = MockTicks::new();
        let mut renderer = text_renderer::<2, 4>(&ticks, ["ab", "cd"], 100, 5000);
        renderer.render_pass(false);
        renderer.display_mut().clear_ops();

        renderer.render_pass(false);
        assert!(renderer.display().ops().is_empty());
    }

    #[test]
    fn test_separate_runs_for_gaps() {
        let ticks = MockTicks::new();
        let mut renderer = text_renderer::<1, 6>(&ticks, ["aaaaaa"], 100, 5000);
        renderer.render_pass(false);
        renderer.display_mut().clear_ops();

        renderer.drawable_mut().lines = ["baabba"];
        renderer.render_pass(false);

        assert_eq!(runs(renderer.display()), vec![b"b".to_vec(), b"bb".to_vec()]);
        assert!(renderer
            .display()
            .ops()
            .contains(&DisplayOp::SetCursor { col: 3, row: 0 }));
    }

    #[test]
    fn test_full_refresh_rewrites_everything() {
        let ticks = MockTicks::new();
        let log = CountingLog::default();
        let mut renderer = text_renderer::<2, 4>(&ticks, ["ab", "cd"], 10, 50)
            .with_log(&log);
        renderer.render_pass(false);
        renderer.display_mut().clear_ops();

        renderer.render_pass(true);
        assert_eq!(
            runs(renderer.display()),
            vec![b"ab  ".to_vec(), b"cd  ".to_vec()]
        );
        assert_eq!(log.full_refreshes.get(), 2);
    }

    #[test]
    fn test_requested_refresh_applies_once() {
        let ticks = MockTicks::new();
        let mut renderer = text_renderer::<1, 3>(&ticks, ["abc"], 10, 5000);
        renderer.render_pass(false);
        renderer.display_mut().clear_ops();

        renderer.request_full_refresh();
        renderer.render_pass(false);
        assert_eq!(renderer.display().run_count(), 1);

        renderer.display_mut().clear_ops();
        renderer.render_pass(false);
        assert_eq!(renderer.display().run_count(), 0);
    }

    #[test]
    fn test_poll_follows_frame_and_refresh_timers() {
        let ticks = MockTicks::new();
        let log = CountingLog::default();
        let mut renderer = text_renderer::<1, 3>(&ticks, ["abc"], 9, 99)
            .with_log(&log);

        renderer.poll();
        assert_eq!(renderer.display().run_count(), 0);

        // First frame at tick 10 paints everything
        for _ in 0..10 {
            ticks.advance(1);
            renderer.poll();
        }
        assert_eq!(renderer.display().run_count(), 1);
        assert_eq!(log.full_refreshes.get(), 1);

        // Frames at 20..=90 are unchanged, the one at 100 is a full refresh
        for _ in 0..89 {
            ticks.advance(1);
            renderer.poll();
        }
        assert_eq!(renderer.display().run_count(), 1);
        ticks.advance(1);
        renderer.poll();
        assert_eq!(renderer.display().run_count(), 2);
        assert_eq!(log.full_refreshes.get(), 2);
    }

    #[test]
    fn test_begin_initializes_panel() {
        let ticks = MockTicks::new();
        let mut renderer = text_renderer::<1, 3>(&ticks, ["abc"], 10, 5000);
        renderer.render_pass(false);
        renderer.display_mut().clear_ops();

        renderer.begin();
        let display = renderer.display();
        assert!(display.is_powered());
        assert!(!display.is_cursor_visible());
        assert_eq!(display.ops()[1], DisplayOp::Clear);

        renderer.display_mut().clear_ops();
        renderer.render_pass(false);
        assert_eq!(runs(renderer.display()), vec![b"abc".to_vec()]);
    }

    #[test]
    fn test_cursor_request_shown_and_hidden() {
        let ticks = MockTicks::new();
        let mut renderer = text_renderer::<2, 4>(&ticks, ["ab", ""], 10, 5000);
        renderer.render_pass(false);
        assert!(!renderer.display().is_cursor_visible());

        renderer.drawable_mut().cursor = Some((1, 2));
        renderer.render_pass(false);
        assert!(renderer.display().is_cursor_visible());
        assert_eq!(renderer.display().cursor(), (2, 1));

        // Unchanged request and no writes: nothing sent
        renderer.display_mut().clear_ops();
        renderer.render_pass(false);
        assert!(renderer.display().ops().is_empty());

        // A write moves the hardware cursor, which is put back afterwards
        renderer.drawable_mut().lines = ["xy", ""];
        renderer.render_pass(false);
        assert_eq!(renderer.display().cursor(), (2, 1));

        renderer.drawable_mut().cursor = None;
        renderer.render_pass(false);
        assert!(!renderer.display().is_cursor_visible());
    }

    /// Drawable painting arbitrary owned rows, for property tests
    struct Rows {
        rows: [[u8; 6]; 2],
    }

    impl Drawable<2, 6> for Rows {
        fn draw(&mut self, grid: &mut Grid<2, 6>) {
            for (row, text) in self.rows.iter().enumerate() {
                grid.write(row, 0, text);
            }
        }
    }

    fn row_strategy() -> impl Strategy<Value = [u8; 6]> {
        prop::array::uniform6(prop::sample::select(vec![b' ', b'a', b'b']))
    }

    proptest! {
        #[test]
        fn prop_diff_converges_with_minimal_writes(
            before in prop::array::uniform2(row_strategy()),
            after in prop::array::uniform2(row_strategy()),
        ) {
            let ticks = MockTicks::new();
            let mut renderer: DiffRenderer<_, _, _, 2, 6> = DiffRenderer::new(
                MockDisplay::<2, 6>::new(),
                Rows { rows: before },
                &ticks,
                10,
                5000,
            );
            renderer.render_pass(false);
            renderer.display_mut().clear_ops();

            renderer.drawable_mut().rows = after;
            renderer.render_pass(false);

            let mut differing = 0;
            let mut segments = 0;
            for row in 0..2 {
                prop_assert_eq!(renderer.display().row(row), &after[row][..]);
                let mut in_segment = false;
                for col in 0..6 {
                    let diff = before[row][col] != after[row][col];
                    if diff {
                        differing += 1;
                        if !in_segment {
                            segments += 1;
                        }
                    }
                    in_segment = diff;
                }
            }

            let written: usize = renderer.display().runs().map(|run| run.len()).sum();
            prop_assert_eq!(written, differing);
            prop_assert_eq!(renderer.display().run_count(), segments);
            prop_assert_eq!(renderer.flushed(), renderer.desired());
        }
    }
}
