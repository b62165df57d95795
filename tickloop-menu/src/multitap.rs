//! Multi-tap text entry
//!
//! Phone-keypad style typing: each digit key owns a list of candidate
//! characters. Pressing the same key again quickly cycles the character
//! under the cursor; a different key, or a pause, moves on to the next
//! position.
//!
//! The character being cycled is kept at the end of the buffer and is
//! called *pending* until it is committed.

use heapless::String;
use tickloop_hal::{elapsed, Ticks};

use crate::config::MultiTapTiming;
use crate::item::TEXT_CAPACITY;

/// Candidate characters for a digit key, empty for anything else
pub fn candidates(digit: u8) -> &'static [u8] {
    match digit {
        0 => b" 0",
        1 => b".,-1",
        2 => b"abc2ABC",
        3 => b"def3DEF",
        4 => b"ghi4GHI",
        5 => b"jkl5JKL",
        6 => b"mno6MNO",
        7 => b"pqrs7PQRS",
        8 => b"tuv8TUV",
        9 => b"wxyz9WXYZ",
        _ => b"",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tap {
    digit: u8,
    index: usize,
    at: Ticks,
}

/// Multi-tap decoder over a bounded text buffer
#[derive(Debug, Clone)]
pub struct MultiTap {
    buffer: String<TEXT_CAPACITY>,
    max_chars: usize,
    timing: MultiTapTiming,
    pending: Option<Tap>,
}

impl MultiTap {
    /// Start editing `initial`
    ///
    /// `max_len` counts a terminator slot, so at most `max_len - 1`
    /// characters are kept.
    pub fn new(initial: &str, max_len: usize, timing: MultiTapTiming) -> Self {
        let max_chars = max_len.saturating_sub(1).min(TEXT_CAPACITY);
        let mut buffer = String::new();
        for ch in initial.chars().take(max_chars) {
            if buffer.push(ch).is_err() {
                break;
            }
        }
        Self {
            buffer,
            max_chars,
            timing,
            pending: None,
        }
    }

    /// Handle a digit key press at tick `now`
    pub fn press(&mut self, digit: u8, now: Ticks) {
        let chars = candidates(digit);
        if chars.is_empty() {
            return;
        }

        if let Some(tap) = self.pending.as_mut() {
            if tap.digit == digit && elapsed(now, tap.at) <= self.timing.short_timeout {
                tap.index = (tap.index + 1) % chars.len();
                tap.at = now;
                let ch = chars[tap.index] as char;
                self.buffer.pop();
                let _ = self.buffer.push(ch);
                return;
            }
        }

        self.pending = None;
        if self.buffer.chars().count() >= self.max_chars {
            return;
        }
        if self.buffer.push(chars[0] as char).is_ok() {
            self.pending = Some(Tap {
                digit,
                index: 0,
                at: now,
            });
        }
    }

    /// Drop the pending character, or erase the last committed one
    pub fn delete(&mut self) {
        self.pending = None;
        self.buffer.pop();
    }

    /// Commit the pending character once the idle timeout has passed
    ///
    /// Returns whether a character was committed.
    pub fn tick(&mut self, now: Ticks) -> bool {
        match self.pending {
            Some(tap) if elapsed(now, tap.at) > self.timing.long_timeout => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Commit the pending character, if any
    pub fn commit(&mut self) {
        self.pending = None;
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Character position the next key acts on
    ///
    /// The pending character while one is being cycled, otherwise the slot
    /// after the text.
    pub fn cursor(&self) -> usize {
        let len = self.buffer.chars().count();
        if self.pending.is_some() {
            len.saturating_sub(1)
        } else {
            len
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}
