//! Quadrature encoder wheel
//!
//! An [`EncoderWheel`] is the handler of an [`EdgeDetector`] watching the
//! encoder's clock line. On each rising clock edge the data line tells the
//! direction: low means a step clockwise, high a step back.
//!
//! ```text
//! clock pin -> PinSampler -> clock flag -> EdgeDetector<EncoderWheel> -> position
//! data pin  -> PinSampler -> data flag  ------------^
//! ```
//!
//! The position can feed a [`Mapper`](crate::signal::Mapper) to control a
//! value over a range, or a [`Chooser`](crate::signal::Chooser) to pick from
//! a list.
//!
//! [`EdgeDetector`]: super::EdgeDetector

use super::detector::EdgeHandler;
use crate::signal::{Flag, Signal};

/// Direction of one detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderStep {
    Left,
    Right,
}

impl EncoderStep {
    /// Decode from the data level sampled at a rising clock edge
    pub fn from_data(data: bool) -> Self {
        // The clock is high on a rising edge
        if data {
            EncoderStep::Left
        } else {
            EncoderStep::Right
        }
    }

    fn delta(self) -> i32 {
        match self {
            EncoderStep::Left => -1,
            EncoderStep::Right => 1,
        }
    }
}

/// Edge handler moving a position by one per detent, held in `[min, max]`
pub struct EncoderWheel<'a> {
    data: &'a Flag,
    position: &'a Signal<i32>,
    min: i32,
    max: i32,
}

impl<'a> EncoderWheel<'a> {
    /// Position range `[0, i32::MAX - 10]`
    pub fn new(data: &'a Flag, position: &'a Signal<i32>) -> Self {
        Self::with_range(data, position, 0, i32::MAX - 10)
    }

    /// Position held in `[min, max]` (bounds may be given in either order)
    pub fn with_range(data: &'a Flag, position: &'a Signal<i32>, min: i32, max: i32) -> Self {
        Self {
            data,
            position,
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Symmetric range `[-sensitivity, sensitivity]`, starting centred
    ///
    /// Pair with a [`Mapper`](crate::signal::Mapper) from that range onto the
    /// controlled value; `sensitivity` is the number of detents per half
    /// range.
    pub fn centred(data: &'a Flag, position: &'a Signal<i32>, sensitivity: i32) -> Self {
        let sensitivity = sensitivity.saturating_abs();
        position.set(0);
        Self::with_range(data, position, -sensitivity, sensitivity)
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    /// Apply one detent
    pub fn step(&mut self, step: EncoderStep) {
        let next = self.position.get().saturating_add(step.delta());
        self.position.set(next.clamp(self.min, self.max));
    }
}

impl EdgeHandler for EncoderWheel<'_> {
    fn on_rising_edge(&mut self) {
        self.step(EncoderStep::from_data(self.data.get()));
    }

    fn on_falling_edge(&mut self) {}
}
