//! Work-status classification and net-duration arithmetic.

use crate::models::enums::AttendanceStatus;

use super::{TrainingTime, WorktimeError};

/// Organizational training hours used as the tardy / leaving-early
/// reference. Either bound may be blank, meaning no schedule is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkSchedule {
    pub work_start: TrainingTime,
    pub work_end: TrainingTime,
}

impl WorkSchedule {
    pub fn is_enforced(&self) -> bool {
        self.work_start.is_set() && self.work_end.is_set()
    }
}

/// Judge tardiness and early leaving against the scheduled bounds.
///
/// With either bound blank there is nothing to judge against and the
/// result is always [`AttendanceStatus::None`]. Arriving exactly on the
/// scheduled minute is on time; leaving exactly on it is not early.
pub fn classify(start: TrainingTime, end: TrainingTime, schedule: &WorkSchedule) -> AttendanceStatus {
    if !schedule.is_enforced() {
        return AttendanceStatus::None;
    }
    let late = start.is_set() && start > schedule.work_start;
    let early = end.is_set() && end < schedule.work_end;
    match (late, early) {
        (true, true) => AttendanceStatus::TardyAndLeavingEarly,
        (true, false) => AttendanceStatus::Tardy,
        (false, true) => AttendanceStatus::LeavingEarly,
        (false, false) => AttendanceStatus::None,
    }
}

/// Net worked span in minutes.
///
/// Fails with [`WorktimeError::NegativeRange`] when `end < start` and
/// with [`WorktimeError::BlankOperand`] when either side is blank.
pub fn worked_minutes(start: TrainingTime, end: TrainingTime) -> Result<i32, WorktimeError> {
    let duration = end.subtract(&start)?;
    Ok(duration.total_minutes().unwrap_or(0))
}
