//! Signal transforms
//!
//! Small tasks that read one or two signals and write a derived value each
//! poll. Register them after the producers of their inputs and before the
//! consumers of their output.

use crate::scheduler::Poll;
use crate::signal::{Flag, Signal};

/// Copies a flag, optionally inverted
///
/// The inversion is itself a flag so it can be switched at run time, for
/// example to support active-low and active-high wiring from one setting.
pub struct Inverter<'a> {
    input: &'a Flag,
    output: &'a Flag,
    invert: &'a Flag,
}

impl<'a> Inverter<'a> {
    pub fn new(input: &'a Flag, output: &'a Flag, invert: &'a Flag) -> Self {
        Self {
            input,
            output,
            invert,
        }
    }
}

impl Poll for Inverter<'_> {
    fn poll(&mut self) {
        self.output.set(self.input.get() ^ self.invert.get());
    }
}

/// `output = a && b`
pub struct AndInputs<'a> {
    a: &'a Flag,
    b: &'a Flag,
    output: &'a Flag,
}

impl<'a> AndInputs<'a> {
    pub fn new(a: &'a Flag, b: &'a Flag, output: &'a Flag) -> Self {
        Self { a, b, output }
    }
}

impl Poll for AndInputs<'_> {
    fn poll(&mut self) {
        self.output.set(self.a.get() && self.b.get());
    }
}

/// `output = a || b`
pub struct OrInputs<'a> {
    a: &'a Flag,
    b: &'a Flag,
    output: &'a Flag,
}

impl<'a> OrInputs<'a> {
    pub fn new(a: &'a Flag, b: &'a Flag, output: &'a Flag) -> Self {
        Self { a, b, output }
    }
}

impl Poll for OrInputs<'_> {
    fn poll(&mut self) {
        self.output.set(self.a.get() || self.b.get());
    }
}

/// Clamps a value into `[min, max]`
///
/// The bounds may be given in either order.
pub struct Constrain<'a, T: Copy + PartialOrd> {
    input: &'a Signal<T>,
    output: &'a Signal<T>,
    min: T,
    max: T,
}

impl<'a, T: Copy + PartialOrd> Constrain<'a, T> {
    pub fn new(input: &'a Signal<T>, output: &'a Signal<T>, a: T, b: T) -> Self {
        let (min, max) = if b < a { (b, a) } else { (a, b) };
        Self {
            input,
            output,
            min,
            max,
        }
    }
}

impl<T: Copy + PartialOrd> Poll for Constrain<'_, T> {
    fn poll(&mut self) {
        let value = self.input.get();
        let value = if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        };
        self.output.set(value);
    }
}

/// Linear rescale from `[in_low, in_high]` onto `[out_low, out_high]`
///
/// Inputs outside the range extrapolate. Integer division truncates toward
/// zero and results beyond `i32` saturate.
pub struct Mapper<'a> {
    input: &'a Signal<i32>,
    output: &'a Signal<i32>,
    in_low: i32,
    in_high: i32,
    out_low: i32,
    out_high: i32,
}

impl<'a> Mapper<'a> {
    pub fn new(
        input: &'a Signal<i32>,
        output: &'a Signal<i32>,
        (in_low, in_high): (i32, i32),
        (out_low, out_high): (i32, i32),
    ) -> Self {
        Self {
            input,
            output,
            in_low,
            in_high,
            out_low,
            out_high,
        }
    }

    /// Rescale a single value
    pub fn map(&self, value: i32) -> i32 {
        let in_span = i64::from(self.in_high) - i64::from(self.in_low);
        if in_span == 0 {
            return self.out_low;
        }
        let out_span = i64::from(self.out_high) - i64::from(self.out_low);
        let offset = i64::from(value) - i64::from(self.in_low);
        let scaled = i128::from(offset) * i128::from(out_span) / i128::from(in_span);
        let result = scaled + i128::from(self.out_low);
        result.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
    }
}

impl Poll for Mapper<'_> {
    fn poll(&mut self) {
        self.output.set(self.map(self.input.get()));
    }
}

/// Picks an option by index, wrapping in both directions
///
/// An index of -1 selects the last option. With no options the output is
/// left alone.
pub struct Chooser<'a, T: Copy> {
    input: &'a Signal<i32>,
    output: &'a Signal<T>,
    options: &'a [T],
}

impl<'a, T: Copy> Chooser<'a, T> {
    pub fn new(input: &'a Signal<i32>, output: &'a Signal<T>, options: &'a [T]) -> Self {
        Self {
            input,
            output,
            options,
        }
    }

    /// Position of `value` among the options, for seeding the index signal
    pub fn index_of(options: &[T], value: T) -> Option<usize>
    where
        T: PartialEq,
    {
        options.iter().position(|&option| option == value)
    }
}

impl<T: Copy> Poll for Chooser<'_, T> {
    fn poll(&mut self) {
        let count = self.options.len() as i64;
        if count == 0 {
            return;
        }
        let index = i64::from(self.input.get()).rem_euclid(count) as usize;
        if let Some(&option) = self.options.get(index) {
            self.output.set(option);
        }
    }
}
