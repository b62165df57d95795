//! Cooperative poll scheduler
//!
//! The whole runtime is a single loop calling [`Scheduler::poll_all`].
//! Every task does a small, non-blocking unit of work per poll; any wait is
//! expressed as "not expired yet, check again next pass".

pub mod group;
pub mod registry;
pub mod task;

pub use group::PollGroup;
pub use registry::{Scheduler, TaskList};
pub use task::Poll;
