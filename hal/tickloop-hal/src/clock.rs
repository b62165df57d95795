//! Monotonic tick source
//!
//! The runtime measures every delay in ticks of a free-running counter,
//! normally milliseconds since boot. The counter is allowed to wrap.

/// Tick count as reported by a [`TickSource`]
pub type Ticks = u32;

/// Free-running tick counter
///
/// Implementations typically wrap a hardware timer or `embassy_time::Instant`
/// truncated to 32 bits. The value wraps at `u32::MAX`; consumers must only
/// ever look at differences computed with [`elapsed`].
pub trait TickSource {
    /// Current tick count
    fn now(&self) -> Ticks;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now(&self) -> Ticks {
        (**self).now()
    }
}

/// Ticks elapsed from `earlier` to `now`
///
/// Correct across a single wraparound of the counter.
#[inline]
pub const fn elapsed(now: Ticks, earlier: Ticks) -> Ticks {
    now.wrapping_sub(earlier)
}
