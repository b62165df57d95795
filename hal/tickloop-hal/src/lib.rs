//! Tickloop Hardware Abstraction Layer
//!
//! This crate defines the traits the runtime consumes from the board:
//! a monotonic tick counter, a character display, a keypad, a HID-style
//! press/release sink and digital input pins. Chip or driver crates
//! implement them; the runtime never touches hardware directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (schedule + tasks + menu)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tickloop-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  LCD / keypad │       │  clock, GPIO, │
//! │    drivers    │       │    USB HID    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`clock::TickSource`] - Wrapping millisecond counter
//! - [`display::CharDisplay`] - Character LCD sink
//! - [`keypad::Keypad`] - Key code source
//! - [`hid::HidOutput`] - Fire-and-forget press/release sink
//! - [`gpio::InputPin`], [`gpio::OutputPin`] - Digital I/O
//!
//! With the `mock` feature, [`mock`] provides recording test doubles for
//! all of them.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod display;
pub mod gpio;
pub mod hid;
pub mod keypad;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use clock::{elapsed, Ticks, TickSource};
pub use display::CharDisplay;
pub use gpio::{InputPin, OutputPin};
pub use hid::HidOutput;
pub use keypad::Keypad;
