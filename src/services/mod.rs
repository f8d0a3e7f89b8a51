//! Business logic services

pub mod attendance;

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

#[cfg(test)]
use mockall::automock;

use crate::{repository::Repository, worktime::WorkSchedule};

/// Wall-clock collaborator. Injected so punch operations can be driven
/// to any time of day in tests.
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Today's training date (local calendar day, time-of-day dropped).
    fn today(&self) -> NaiveDate;

    /// Current local time of day.
    fn time_of_day(&self) -> NaiveTime;
}

/// Production clock reading the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub attendance: attendance::AttendanceService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, schedule: WorkSchedule, clock: Arc<dyn Clock>) -> Self {
        Self {
            attendance: attendance::AttendanceService::new(
                Arc::new(repository.attendance.clone()),
                Arc::new(repository.sections.clone()),
                schedule,
                clock,
            ),
        }
    }
}
