//! Press/release outputs
//!
//! A [`Pressable`] is anything with a binary held state: a USB key, a
//! mouse button, a relay. Edges are turned into presses by
//! [`ValuePresser`], fanned out by [`PressComposite`] and delayed by
//! [`PressFollower`].
//!
//! Like [`HidOutput`], calls take `&self`: the same output is usually
//! reachable from several tasks (an edge handler pressing it and the
//! scheduler polling it), so implementors use interior mutability.

use core::cell::Cell;

use heapless::Vec;
use tickloop_hal::{elapsed, HidOutput, Ticks, TickSource};

use super::detector::EdgeHandler;
use crate::error::CapacityError;
use crate::scheduler::Poll;
use crate::time::NEVER;

/// Binary press/release output
pub trait Pressable {
    fn press(&self);
    fn release(&self);
}

impl<T: Pressable + ?Sized> Pressable for &T {
    fn press(&self) {
        (**self).press()
    }

    fn release(&self) {
        (**self).release()
    }
}

/// Key or button code on a shared HID sink
///
/// The code can be reassigned at runtime; the old code is released first
/// so no key is left stuck down on the host.
pub struct HidKey<H: HidOutput> {
    hid: H,
    code: Cell<u16>,
    held: Cell<bool>,
}

impl<H: HidOutput> HidKey<H> {
    pub fn new(hid: H, code: u16) -> Self {
        Self {
            hid,
            code: Cell::new(code),
            held: Cell::new(false),
        }
    }

    pub fn code(&self) -> u16 {
        self.code.get()
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }

    /// Change the emitted code, releasing the previous one
    pub fn assign(&self, code: u16) {
        self.hid.release(self.code.get());
        self.held.set(false);
        self.code.set(code);
    }
}

impl<H: HidOutput> Pressable for HidKey<H> {
    fn press(&self) {
        self.hid.press(self.code.get());
        self.held.set(true);
    }

    fn release(&self) {
        self.hid.release(self.code.get());
        self.held.set(false);
    }
}

/// Forwards press/release to every child in registration order
pub struct PressComposite<'a, const N: usize> {
    children: Vec<&'a dyn Pressable, N>,
}

impl<'a, const N: usize> PressComposite<'a, N> {
    pub const fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Add a child, silently ignoring it once full
    pub fn add(&mut self, child: &'a dyn Pressable) {
        let _ = self.try_add(child);
    }

    pub fn try_add(&mut self, child: &'a dyn Pressable) -> Result<(), CapacityError> {
        self.children
            .push(child)
            .map_err(|_| CapacityError::GroupFull { capacity: N })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<const N: usize> Default for PressComposite<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Pressable for PressComposite<'_, N> {
    fn press(&self) {
        for child in &self.children {
            child.press();
        }
    }

    fn release(&self) {
        for child in &self.children {
            child.release();
        }
    }
}

/// Edge handler pressing on rising and releasing on falling edges
pub struct ValuePresser<P: Pressable> {
    output: P,
}

impl<P: Pressable> ValuePresser<P> {
    pub fn new(output: P) -> Self {
        Self { output }
    }

    pub fn output(&self) -> &P {
        &self.output
    }
}

impl<P: Pressable> EdgeHandler for ValuePresser<P> {
    fn on_rising_edge(&mut self) {
        self.output.press();
    }

    fn on_falling_edge(&mut self) {
        self.output.release();
    }
}

/// One pending event: when it was requested and how long to wait
///
/// Idle slots carry a `NEVER` delay and therefore never fire.
struct Pending {
    since: Cell<Ticks>,
    delay: Cell<Ticks>,
}

impl Pending {
    const fn idle() -> Self {
        Self {
            since: Cell::new(0),
            delay: Cell::new(NEVER),
        }
    }

    fn arm(&self, now: Ticks, delay: Ticks) {
        self.since.set(now);
        self.delay.set(delay);
    }

    fn take_if_due(&self, now: Ticks) -> bool {
        if elapsed(now, self.since.get()) > self.delay.get() {
            self.delay.set(NEVER);
            true
        } else {
            false
        }
    }
}

/// Repeats press/release onto an output after a fixed delay
///
/// Acts as a [`Pressable`] for whoever drives it and as a task that
/// replays each event `delay` ticks later. Assumes the delay is shorter
/// than the time between events; a second press before the first one
/// fired restarts its delay.
///
/// The follower is shared between its driver and the scheduler, so the
/// task is implemented on `&PressFollower`:
///
/// ```ignore
/// let follower = PressFollower::new(&ticks, 5, &key);
/// let mut presser = EdgeDetector::new(&clock_out, ValuePresser::new(&follower));
/// let mut task = &follower;
/// scheduler.register(&mut presser);
/// scheduler.register(&mut task);
/// ```
pub struct PressFollower<'a, T: TickSource + ?Sized, P: Pressable> {
    ticks: &'a T,
    delay: Ticks,
    output: P,
    press: Pending,
    release: Pending,
}

impl<'a, T: TickSource + ?Sized, P: Pressable> PressFollower<'a, T, P> {
    pub fn new(ticks: &'a T, delay: Ticks, output: P) -> Self {
        Self {
            ticks,
            delay,
            output,
            press: Pending::idle(),
            release: Pending::idle(),
        }
    }

    pub fn delay(&self) -> Ticks {
        self.delay
    }

    /// Fire any events whose delay has passed
    pub fn service(&self) {
        let now = self.ticks.now();
        if self.press.take_if_due(now) {
            self.output.press();
        }
        if self.release.take_if_due(now) {
            self.output.release();
        }
    }
}

impl<T: TickSource + ?Sized, P: Pressable> Pressable for PressFollower<'_, T, P> {
    fn press(&self) {
        self.press.arm(self.ticks.now(), self.delay);
    }

    fn release(&self) {
        self.release.arm(self.ticks.now(), self.delay);
    }
}

impl<T: TickSource + ?Sized, P: Pressable> Poll for &PressFollower<'_, T, P> {
    fn poll(&mut self) {
        self.service();
    }
}
