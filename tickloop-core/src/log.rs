//! Injected logging capability
//!
//! Library code never logs through a global. Components that have
//! something worth reporting take a `&dyn Log` at construction and fall
//! back to [`NoopLog`]. Firmware builds hand in [`DefmtLog`] (feature
//! `defmt`) to get the events over RTT.

/// Severity of a [`LogEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

/// Structured events emitted by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogEvent {
    /// A task was registered past scheduler capacity and dropped
    TaskRejected { capacity: usize },
    /// A member was added past a group's capacity and dropped
    GroupMemberRejected { capacity: usize },
    /// A submenu was opened past the screen stack depth and ignored
    ScreenPushRejected { depth: usize },
    /// Startup warmup passes finished
    WarmupComplete { passes: u8, tasks: usize },
    /// The display renderer is repainting every cell
    FullRefresh,
    /// A menu edit was started
    EditStarted,
    /// A menu edit was confirmed and written to its target
    EditCommitted,
    /// A menu edit was cancelled and its target restored
    EditCancelled,
}

impl LogEvent {
    pub fn level(&self) -> LogLevel {
        match self {
            LogEvent::TaskRejected { .. }
            | LogEvent::GroupMemberRejected { .. }
            | LogEvent::ScreenPushRejected { .. } => LogLevel::Warn,
            LogEvent::WarmupComplete { .. } => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

/// Logging sink
pub trait Log {
    fn log(&self, event: LogEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _event: LogEvent) {}
}

/// Shared no-op logger used when nothing is injected
pub static NOOP_LOG: NoopLog = NoopLog;

/// Forwards events to defmt at the matching level
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtLog;

#[cfg(feature = "defmt")]
impl Log for DefmtLog {
    fn log(&self, event: LogEvent) {
        match event.level() {
            LogLevel::Debug => defmt::debug!("{}", event),
            LogLevel::Info => defmt::info!("{}", event),
            LogLevel::Warn => defmt::warn!("{}", event),
        }
    }
}
