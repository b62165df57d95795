//! Switchable group of tasks

use super::registry::TaskList;
use super::task::Poll;
use crate::error::CapacityError;
use crate::log::{Log, LogEvent, NOOP_LOG};
use crate::signal::Flag;

/// A task that polls its members while enabled
///
/// Lets a whole feature (for example an auto-clicker built from a clock,
/// an edge detector and a presser) be switched on and off from one flag.
/// Members are polled in the order they were added.
pub struct PollGroup<'a, const N: usize> {
    members: TaskList<'a, N>,
    enable: &'a Flag,
    log: &'a dyn Log,
}

impl<'a, const N: usize> PollGroup<'a, N> {
    pub fn new(enable: &'a Flag) -> Self {
        Self::with_log(enable, &NOOP_LOG)
    }

    pub fn with_log(enable: &'a Flag, log: &'a dyn Log) -> Self {
        Self {
            members: TaskList::new(),
            enable,
            log,
        }
    }

    /// Add a member; past capacity it is dropped
    pub fn add(&mut self, task: &'a mut dyn Poll) {
        let _ = self.try_add(task);
    }

    pub fn try_add(&mut self, task: &'a mut dyn Poll) -> Result<(), CapacityError> {
        if self.members.push(task).is_err() {
            self.log.log(LogEvent::GroupMemberRejected { capacity: N });
            return Err(CapacityError::GroupFull { capacity: N });
        }
        Ok(())
    }

    pub fn enabled(&self) -> bool {
        self.enable.get()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<const N: usize> Poll for PollGroup<'_, N> {
    fn poll(&mut self) {
        if self.enable.get() {
            self.members.poll_each();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use core::cell::Cell;

    #[test]
    fn test_group_follows_flag() {
        let enable = Flag::new(false);
        let hits = Cell::new(0u32);
        let mut member = || hits.set(hits.get() + 1);

        let mut group: PollGroup<2> = PollGroup::new(&enable);
        group.add(&mut member);

        let mut scheduler: Scheduler<1> = Scheduler::new();
        scheduler.register(&mut group);

        scheduler.poll_all();
        assert_eq!(hits.get(), 0);

        enable.set(true);
        scheduler.poll_all();
        scheduler.poll_all();
        assert_eq!(hits.get(), 2);

        enable.set(false);
        scheduler.poll_all();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_group_capacity() {
        let enable = Flag::new(true);
        let mut a = || {};
        let mut b = || {};
        let mut group: PollGroup<1> = PollGroup::new(&enable);
        assert!(group.try_add(&mut a).is_ok());
        assert_eq!(
            group.try_add(&mut b),
            Err(CapacityError::GroupFull { capacity: 1 })
        );
        assert_eq!(group.len(), 1);
    }
}
