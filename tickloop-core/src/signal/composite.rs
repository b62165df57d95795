//! Switching several targets together

use heapless::Vec;

use super::Enable;
use crate::error::CapacityError;

/// Fans [`Enable`] calls out to every member
///
/// Reads as enabled while any member is. `toggle` flips each member on its
/// own, so members that started out of step stay out of step.
pub struct EnableComposite<'a, const N: usize> {
    members: Vec<&'a dyn Enable, N>,
}

impl<'a, const N: usize> EnableComposite<'a, N> {
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Add a member, silently ignoring it once full
    pub fn add(&mut self, member: &'a dyn Enable) {
        let _ = self.try_add(member);
    }

    pub fn try_add(&mut self, member: &'a dyn Enable) -> Result<(), CapacityError> {
        self.members
            .push(member)
            .map_err(|_| CapacityError::GroupFull { capacity: N })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<const N: usize> Default for EnableComposite<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Enable for EnableComposite<'_, N> {
    fn enable(&self, on: bool) {
        for member in &self.members {
            member.enable(on);
        }
    }

    fn enabled(&self) -> bool {
        self.members.iter().any(|member| member.enabled())
    }

    fn toggle(&self) {
        for member in &self.members {
            member.toggle();
        }
    }
}
