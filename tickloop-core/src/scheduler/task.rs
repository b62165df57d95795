//! Task capability

/// A unit of cooperative work
///
/// `poll` must return promptly: no busy-waiting, no blocking bus
/// transactions waiting for completion. Anything that takes time is split
/// across polls with a [`Timer`](crate::time::Timer).
pub trait Poll {
    fn poll(&mut self);
}

/// Closures can be registered directly
impl<F: FnMut()> Poll for F {
    fn poll(&mut self) {
        self()
    }
}
