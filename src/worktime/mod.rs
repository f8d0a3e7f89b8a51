//! Attendance time computation and validation engine.
//!
//! Pure, synchronous logic: the [`TrainingTime`] value type, work-status
//! classification, batch validation of day-by-day submissions, and the
//! merge step that decides insert vs. update intent. No I/O happens here;
//! the services layer feeds this module and persists its output.

pub mod classify;
pub mod reconcile;
pub mod training_time;
pub mod validate;

pub use classify::{classify, worked_minutes, WorkSchedule};
pub use reconcile::{reconcile, PendingWrite, WriteIntent};
pub use training_time::TrainingTime;
pub use validate::{validate_batch, DayInput, RuleCode, ValidatedDay, ValidationError};

use thiserror::Error;

/// Time component of an hour/minute pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePart {
    Hour,
    Minute,
}

impl std::fmt::Display for TimePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimePart::Hour => write!(f, "hour"),
            TimePart::Minute => write!(f, "minute"),
        }
    }
}

/// Failures of time construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorktimeError {
    /// Exactly one of an hour/minute pair was supplied.
    #[error("time field is missing its {0} component")]
    MissingPart(TimePart),

    /// A supplied component is outside 0-23 / 0-59.
    #[error("time {0} component is out of range")]
    OutOfRange(TimePart),

    /// A persisted time literal could not be parsed.
    #[error("malformed time literal: {0:?}")]
    Malformed(String),

    /// Subtraction where the end precedes the start.
    #[error("end time precedes start time")]
    NegativeRange,

    /// Comparison or subtraction on a blank value.
    #[error("operation on a blank time value")]
    BlankOperand,
}
