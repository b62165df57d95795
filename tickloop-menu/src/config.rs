//! Menu timing configuration

use tickloop_hal::Ticks;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Same-key window for cycling a multi-tap character
pub const DEFAULT_SHORT_TIMEOUT: Ticks = 1000;

/// Idle time after which a pending multi-tap character is committed
pub const DEFAULT_LONG_TIMEOUT: Ticks = 2000;

/// Multi-tap text entry timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiTapTiming {
    /// Pressing the same key again within this many ticks cycles the character
    pub short_timeout: Ticks,
    /// Without any key for this many ticks the pending character is committed
    pub long_timeout: Ticks,
}

impl Default for MultiTapTiming {
    fn default() -> Self {
        Self {
            short_timeout: DEFAULT_SHORT_TIMEOUT,
            long_timeout: DEFAULT_LONG_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let timing = MultiTapTiming::default();
        assert_eq!(timing.short_timeout, 1000);
        assert_eq!(timing.long_timeout, 2000);
    }
}
