//! Edge detection and press outputs
//!
//! Edge detectors turn level signals into one-shot events; pressers turn
//! those events into press/release calls on HID keys or other outputs. An
//! encoder wheel is an edge handler too.

pub mod detector;
pub mod encoder;
pub mod press;

pub use detector::{EdgeCallbacks, EdgeDetector, EdgeHandler};
pub use encoder::{EncoderStep, EncoderWheel};
pub use press::{HidKey, PressComposite, PressFollower, Pressable, ValuePresser};
