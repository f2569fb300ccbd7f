//! Core error types for daydash-core.
//!
//! None of these are fatal in normal operation: invalid speed input and
//! malformed queries are recovered interactively by the caller, and the only
//! way the process exits is the virtual day ending.

use thiserror::Error;

use crate::time::TimeOfDay;

/// Core error type for daydash-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Schedule construction or store access errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Virtual clock configuration errors
    #[error("Clock error: {0}")]
    Clock(#[from] ClockError),

    /// Out-of-band query parsing errors
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// IO errors from the console collaborator
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors constructing or mutating the day's schedule.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Hour or minute outside the valid range
    #[error("Invalid time of day: {hour:02}:{minute:02}")]
    InvalidTimeOfDay { hour: u8, minute: u8 },

    /// Activity name is empty or whitespace-only
    #[error("Activity name must not be empty")]
    EmptyName,

    /// Window end does not come after window start
    #[error("Invalid window for '{name}': start {start} must precede end {end}")]
    InvalidWindow {
        name: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    /// Activity index outside the store
    #[error("Activity index {index} out of bounds (length: {len})")]
    OutOfBounds { index: usize, len: usize },
}

/// Errors configuring the virtual clock.
#[derive(Error, Debug)]
pub enum ClockError {
    /// Non-numeric or out-of-range speed factor input
    #[error("Speed factor must be an integer between {min} and {max}, got '{input}'")]
    InvalidSpeed { input: String, min: u8, max: u8 },
}

/// Errors parsing an out-of-band status query.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// Neither the literal `now` nor a valid `HH:MM` time
    #[error("Expected \"now\" or a HH:MM time, got '{0}'")]
    InvalidFormat(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
