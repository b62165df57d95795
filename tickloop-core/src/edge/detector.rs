//! Rising/falling edge detection

use crate::scheduler::Poll;
use crate::signal::Flag;

/// Receives edge notifications
pub trait EdgeHandler {
    /// Signal went from false to true
    fn on_rising_edge(&mut self);

    /// Signal went from true to false
    fn on_falling_edge(&mut self);
}

/// Edge handler built from two closures
pub struct EdgeCallbacks<R: FnMut(), F: FnMut()> {
    pub rising: R,
    pub falling: F,
}

impl<R: FnMut(), F: FnMut()> EdgeHandler for EdgeCallbacks<R, F> {
    fn on_rising_edge(&mut self) {
        (self.rising)()
    }

    fn on_falling_edge(&mut self) {
        (self.falling)()
    }
}

/// Watches a boolean signal and reports each transition exactly once
///
/// Steady-state polls do nothing. The detector must be registered after
/// the task writing the signal to see changes in the same pass.
pub struct EdgeDetector<'a, H: EdgeHandler> {
    signal: &'a Flag,
    last: bool,
    handler: H,
}

impl<'a, H: EdgeHandler> EdgeDetector<'a, H> {
    /// Create a detector assuming the signal starts low
    pub fn new(signal: &'a Flag, handler: H) -> Self {
        Self::with_initial(signal, false, handler)
    }

    /// Create a detector with an explicit last-observed level
    pub fn with_initial(signal: &'a Flag, last: bool, handler: H) -> Self {
        Self {
            signal,
            last,
            handler,
        }
    }

    /// Last level seen by `poll`
    pub fn last(&self) -> bool {
        self.last
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}

impl<H: EdgeHandler> Poll for EdgeDetector<'_, H> {
    fn poll(&mut self) {
        let value = self.signal.get();
        if value == self.last {
            return;
        }
        self.last = value;
        if value {
            self.handler.on_rising_edge();
        } else {
            self.handler.on_falling_edge();
        }
    }
}
