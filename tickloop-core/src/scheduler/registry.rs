//! Fixed-capacity task registry and the main scheduler

use heapless::Vec;

use super::task::Poll;
use crate::config::WARMUP_PASSES;
use crate::error::CapacityError;
use crate::log::{Log, LogEvent, NOOP_LOG};

/// Ordered list of borrowed tasks
///
/// Shared by [`Scheduler`] and [`PollGroup`](super::PollGroup). Insertion
/// order is poll order and entries are never removed.
pub struct TaskList<'a, const N: usize> {
    tasks: Vec<&'a mut dyn Poll, N>,
}

impl<'a, const N: usize> TaskList<'a, N> {
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Append a task, handing it back if the list is full
    pub fn push(&mut self, task: &'a mut dyn Poll) -> Result<(), &'a mut dyn Poll> {
        self.tasks.push(task)
    }

    /// Poll every task once, in insertion order
    pub fn poll_each(&mut self) {
        for task in self.tasks.iter_mut() {
            task.poll();
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tasks.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for TaskList<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Main scheduler
///
/// Holds up to `N` tasks and polls them round-robin. Size `N` above the
/// number of tasks the application will ever register: registering past
/// capacity drops the task (and logs a warning) rather than failing at
/// runtime. Use [`Scheduler::try_register`] to assert the sizing at
/// startup instead.
///
/// The scheduler is itself a [`Poll`], so schedules can nest.
pub struct Scheduler<'a, const N: usize> {
    tasks: TaskList<'a, N>,
    log: &'a dyn Log,
}

impl<'a, const N: usize> Scheduler<'a, N> {
    /// Create an empty scheduler that logs nowhere
    pub fn new() -> Self {
        Self::with_log(&NOOP_LOG)
    }

    /// Create an empty scheduler reporting to `log`
    pub fn with_log(log: &'a dyn Log) -> Self {
        Self {
            tasks: TaskList::new(),
            log,
        }
    }

    /// Register a task; past capacity the task is dropped
    pub fn register(&mut self, task: &'a mut dyn Poll) {
        let _ = self.try_register(task);
    }

    /// Register a task, reporting when the scheduler is full
    pub fn try_register(&mut self, task: &'a mut dyn Poll) -> Result<(), CapacityError> {
        if self.tasks.push(task).is_err() {
            self.log.log(LogEvent::TaskRejected { capacity: N });
            return Err(CapacityError::SchedulerFull { capacity: N });
        }
        Ok(())
    }

    /// Poll every registered task exactly once, in registration order
    pub fn poll_all(&mut self) {
        self.tasks.poll_each();
    }

    /// Run the startup settling passes
    ///
    /// Several feedback loops (clocks feeding edge detectors, samplers
    /// feeding renderers) need a few passes before their outputs are
    /// consistent. Call this once before observing any output.
    pub fn warmup(&mut self) {
        self.warmup_passes(WARMUP_PASSES);
    }

    /// Run `passes` settling passes
    pub fn warmup_passes(&mut self, passes: u8) {
        for _ in 0..passes {
            self.poll_all();
        }
        self.log.log(LogEvent::WarmupComplete {
            passes,
            tasks: self.tasks.len(),
        });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tasks.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Scheduler<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Poll for Scheduler<'_, N> {
    fn poll(&mut self) {
        self.poll_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::testing::RecordingLog;
    use core::cell::RefCell;
    use heapless::Vec as HVec;

    struct Recorder<'a> {
        id: u8,
        trace: &'a RefCell<HVec<u8, 64>>,
    }

    impl Poll for Recorder<'_> {
        fn poll(&mut self) {
            let _ = self.trace.borrow_mut().push(self.id);
        }
    }

    #[test]
    fn test_polls_in_registration_order() {
        let trace = RefCell::new(HVec::new());
        let mut a = Recorder { id: 1, trace: &trace };
        let mut b = Recorder { id: 2, trace: &trace };
        let mut c = Recorder { id: 3, trace: &trace };

        let mut scheduler: Scheduler<4> = Scheduler::new();
        scheduler.register(&mut b);
        scheduler.register(&mut a);
        scheduler.register(&mut c);

        scheduler.poll_all();
        scheduler.poll_all();
        assert_eq!(trace.borrow().as_slice(), &[2, 1, 3, 2, 1, 3]);
    }

    #[test]
    fn test_register_past_capacity_is_dropped() {
        let log = RecordingLog::default();
        let trace = RefCell::new(HVec::new());
        let mut a = Recorder { id: 1, trace: &trace };
        let mut b = Recorder { id: 2, trace: &trace };
        let mut c = Recorder { id: 3, trace: &trace };

        let mut scheduler: Scheduler<2> = Scheduler::with_log(&log);
        scheduler.register(&mut a);
        assert_eq!(scheduler.try_register(&mut b), Ok(()));
        assert!(scheduler.is_full());
        assert_eq!(
            scheduler.try_register(&mut c),
            Err(CapacityError::SchedulerFull { capacity: 2 })
        );

        scheduler.poll_all();
        assert_eq!(trace.borrow().as_slice(), &[1, 2]);
        assert_eq!(scheduler.len(), 2);
        assert_eq!(log.events().as_slice(), &[LogEvent::TaskRejected { capacity: 2 }]);
    }

    #[test]
    fn test_warmup_runs_fixed_passes() {
        let log = RecordingLog::default();
        let mut count = 0u32;
        {
            let mut counter = || count += 1;
            let mut scheduler: Scheduler<1> = Scheduler::with_log(&log);
            scheduler.register(&mut counter);
            scheduler.warmup();
        }
        assert_eq!(count, u32::from(WARMUP_PASSES));
        assert_eq!(
            log.events().as_slice(),
            &[LogEvent::WarmupComplete { passes: 25, tasks: 1 }]
        );
    }

    #[test]
    fn test_schedulers_nest() {
        let mut count = 0u32;
        {
            let mut counter = || count += 1;
            let mut inner: Scheduler<1> = Scheduler::new();
            inner.register(&mut counter);

            let mut outer: Scheduler<1> = Scheduler::new();
            outer.register(&mut inner);
            outer.poll_all();
            outer.poll_all();
        }
        assert_eq!(count, 2);
    }
}
