//! Time-based primitives
//!
//! Everything here is driven by a borrowed [`TickSource`](tickloop_hal::TickSource):
//! a [`Timer`] answers "has this much time passed", a [`Clock`] turns timers
//! into a square-wave signal and [`Periodic`] runs a handler at a fixed rate.

pub mod clock;
pub mod expires;
pub mod periodic;
pub mod timer;

pub use clock::Clock;
pub use expires::{Expires, ExpiresComposite, ExpiryMode};
pub use periodic::Periodic;
pub use timer::{Timer, NEVER};
