//! Expiry queries over several timers

use heapless::Vec;
use tickloop_hal::TickSource;

use super::Timer;
use crate::error::CapacityError;

/// Anything that can report "time is up"
pub trait Expires {
    fn expired(&self) -> bool;
}

impl<T: TickSource + ?Sized> Expires for Timer<'_, T> {
    fn expired(&self) -> bool {
        Timer::expired(self)
    }
}

/// How an [`ExpiresComposite`] combines its members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpiryMode {
    /// Expired once any member is
    Any,
    /// Expired once every member is
    All,
}

/// Combines several expiry sources into one
///
/// An empty `Any` composite never expires; an empty `All` composite is
/// always expired.
pub struct ExpiresComposite<'a, const N: usize> {
    members: Vec<&'a dyn Expires, N>,
    mode: ExpiryMode,
}

impl<'a, const N: usize> ExpiresComposite<'a, N> {
    pub const fn new(mode: ExpiryMode) -> Self {
        Self {
            members: Vec::new(),
            mode,
        }
    }

    pub fn add(&mut self, member: &'a dyn Expires) {
        let _ = self.try_add(member);
    }

    pub fn try_add(&mut self, member: &'a dyn Expires) -> Result<(), CapacityError> {
        self.members
            .push(member)
            .map_err(|_| CapacityError::GroupFull { capacity: N })
    }

    pub fn mode(&self) -> ExpiryMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<const N: usize> Expires for ExpiresComposite<'_, N> {
    fn expired(&self) -> bool {
        match self.mode {
            ExpiryMode::Any => self.members.iter().any(|member| member.expired()),
            ExpiryMode::All => self.members.iter().all(|member| member.expired()),
        }
    }
}
