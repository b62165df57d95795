//! Loop configuration
//!
//! Compile-time defaults for the main loop. Boards override them by
//! building a [`LoopConfig`] (optionally deserialized, feature `serde`).

use tickloop_hal::Ticks;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of scheduler passes run by `Scheduler::warmup`
pub const WARMUP_PASSES: u8 = 25;

/// Display frame period in ticks
pub const DEFAULT_FRAME_PERIOD: Ticks = 100;

/// Period between forced full display repaints in ticks
pub const DEFAULT_FULL_REFRESH_PERIOD: Ticks = 5000;

/// Main loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopConfig {
    /// Ticks between display render passes
    pub frame_period: Ticks,
    /// Ticks between forced full repaints
    pub full_refresh_period: Ticks,
    /// Scheduler passes to run before the loop starts
    pub warmup_passes: u8,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            frame_period: DEFAULT_FRAME_PERIOD,
            full_refresh_period: DEFAULT_FULL_REFRESH_PERIOD,
            warmup_passes: WARMUP_PASSES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoopConfig::default();
        assert_eq!(config.warmup_passes, 25);
        assert!(config.full_refresh_period > config.frame_period);
    }
}
