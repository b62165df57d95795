//! Board-agnostic runtime core for cooperative control loops
//!
//! This crate contains everything that runs inside the main poll loop and
//! does not depend on a specific display or input device:
//!
//! - Fixed-capacity poll scheduler and poll groups
//! - Wraparound-safe timers, square-wave clocks and periodic tasks
//! - Shared signals, signal transforms and edge detection
//! - Quadrature encoder wheels
//! - Press/release outputs driven by edges (HID keys, delayed followers)
//! - Pin sampling into signals
//! - Injected logging capability and loop configuration
//!
//! Everything is single-threaded and allocation-free. Tasks borrow their
//! collaborators; shared state lives in [`Signal`]s with exactly one writer
//! by convention.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod edge;
pub mod error;
pub mod log;
pub mod pins;
pub mod scheduler;
pub mod signal;
pub mod time;

pub use config::LoopConfig;
pub use edge::{
    EdgeDetector, EdgeHandler, EncoderStep, EncoderWheel, HidKey, PressComposite, PressFollower,
    Pressable, ValuePresser,
};
pub use error::CapacityError;
pub use log::{Log, LogEvent, LogLevel, NoopLog};
pub use pins::{PinDriver, PinSampler};
pub use scheduler::{Poll, PollGroup, Scheduler};
pub use signal::{
    AndInputs, Chooser, Constrain, Enable, EnableComposite, Flag, Inverter, Mapper, OrInputs,
    Signal,
};
pub use time::{Clock, Expires, ExpiresComposite, ExpiryMode, Periodic, Timer, NEVER};

pub use tickloop_hal::{Ticks, TickSource};
