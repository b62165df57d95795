//! Capacity errors
//!
//! Registries in this runtime are sized at compile time. Running out of
//! room is a sizing bug in the application, not something to recover from
//! at runtime, so the plain `register`/`push` calls drop the request and
//! log it. The `try_*` variants return these errors for startup checks.

/// A fixed-capacity registry was full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapacityError {
    /// Scheduler task list full
    SchedulerFull { capacity: usize },
    /// Poll group (or other composite) full
    GroupFull { capacity: usize },
    /// Menu screen stack at maximum depth
    MenuStackFull { depth: usize },
}

impl core::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CapacityError::SchedulerFull { capacity } => {
                write!(f, "scheduler is full ({} tasks)", capacity)
            }
            CapacityError::GroupFull { capacity } => {
                write!(f, "group is full ({} members)", capacity)
            }
            CapacityError::MenuStackFull { depth } => {
                write!(f, "menu stack is full ({} screens)", depth)
            }
        }
    }
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            CapacityError::SchedulerFull { capacity: 4 }.to_string(),
            "scheduler is full (4 tasks)"
        );
        assert_eq!(
            CapacityError::MenuStackFull { depth: 8 }.to_string(),
            "menu stack is full (8 screens)"
        );
    }
}
