//! Menu engine for character displays
//!
//! A tree of immutable [`MenuScreen`]s is navigated through a
//! [`MenuContext`], which also runs the editing modes:
//!
//! | Mode              | Entered by              | Keys                         |
//! |-------------------|-------------------------|------------------------------|
//! | `Browsing`        | -                       | up/down, select, back, lines |
//! | `EditingStepped`  | `MenuItem::EditLong`    | up/down change the value     |
//! | `EnteringNumeric` | `MenuItem::EnterLong`   | digits, delete               |
//! | `EnteringText`    | `MenuItem::EnterString` | digits (multi-tap), delete   |
//!
//! Select confirms an edit, back cancels it. The [`MenuRenderer`] paints
//! the context into a grid for the diff renderer; the [`router`] module
//! turns raw keypad codes into [`MenuKey`]s.
//!
//! The context is shared between the renderer and the key handler, so it
//! lives in a `RefCell`. Both only borrow it for the duration of a call.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod item;
pub mod multitap;
pub mod renderer;
pub mod router;

pub use config::MultiTapTiming;
pub use context::{MenuContext, MenuMode, MAX_DEPTH};
pub use item::{MenuCommand, MenuItem, MenuScreen, TextField};
pub use multitap::MultiTap;
pub use renderer::MenuRenderer;
pub use router::{
    EnableKey, KeyHandler, KeyHandlerChain, KeypadPoller, MenuKey, MenuKeymap, MenuKeypad,
    ToggleKey,
};

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use tickloop_core::{Flag, Scheduler, Signal};
    use tickloop_display::DiffRenderer;
    use tickloop_hal::mock::{MockDisplay, MockKeypad, MockTicks};

    #[test]
    fn test_main_loop_edits_value_on_screen() {
        let ticks = MockTicks::new();
        let motor = Flag::new(false);
        let speed = Signal::new(120);
        let settings_items = [MenuItem::enter_long("Speed", &speed)];
        let settings = MenuScreen::new("Settings", &settings_items);
        let root_items = [
            MenuItem::toggle("Motor", &motor),
            MenuItem::submenu("Settings", &settings),
        ];
        let root = MenuScreen::new("Main", &root_items);
        let context = RefCell::new(MenuContext::new(&root));

        let mut keypad = MockKeypad::new();
        // Toggle motor, open settings, enter 75, confirm
        keypad.press_all(b"SISSKGS");
        let menu = MenuKeypad::new(&context, MenuKeymap::lk204(), &ticks);
        let mut input = KeypadPoller::new(keypad, menu);
        let mut display: DiffRenderer<_, _, _, 4, 20> = DiffRenderer::new(
            MockDisplay::<4, 20>::new(),
            MenuRenderer::new(&context),
            &ticks,
            10,
            5000,
        );
        display.begin();

        {
            let mut scheduler: Scheduler<2> = Scheduler::new();
            scheduler.register(&mut input);
            scheduler.register(&mut display);
            for _ in 0..100 {
                ticks.advance(1);
                scheduler.poll_all();
            }
        }

        assert!(motor.get());
        assert_eq!(speed.get(), 75);

        let panel = display.display();
        assert_eq!(panel.row(0), b"Settings            ");
        assert_eq!(panel.row(1), b"> Speed             ");
        assert!(!panel.is_cursor_visible());
    }
}
