//! Repository layer for database operations

pub mod attendance;
pub mod sections;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

#[cfg(test)]
use mockall::automock;

use crate::{
    error::AppResult,
    models::attendance::{AttendanceListRow, StudentAttendance},
};

/// Store collaborator for attendance records. The service layer only
/// sees this seam; the sqlx repository below is the production
/// implementation and tests substitute a mock.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// The student's active record for one training date, if any.
    async fn find_by_user_and_date(
        &self,
        lms_user_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<StudentAttendance>>;

    /// All active records for a student, ordered by training date.
    async fn find_all_active(&self, lms_user_id: i32) -> AppResult<Vec<StudentAttendance>>;

    async fn insert(&self, record: &StudentAttendance) -> AppResult<i32>;

    async fn update(&self, record: &StudentAttendance) -> AppResult<()>;

    /// Active past records with a missing clock-in or clock-out.
    async fn count_unfilled_before(&self, lms_user_id: i32, date: NaiveDate) -> AppResult<i64>;

    /// Every section date of the course, left-joined with the student's
    /// record for that date.
    async fn list_for_course(
        &self,
        course_id: i32,
        lms_user_id: i32,
    ) -> AppResult<Vec<AttendanceListRow>>;
}

/// Source of the course training calendar.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SectionSource: Send + Sync {
    /// Number of sections scheduled for the course on a date; zero means
    /// the date is not a training day.
    async fn count_on(&self, course_id: i32, date: NaiveDate) -> AppResult<i64>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub attendance: attendance::AttendanceRepository,
    pub sections: sections::SectionsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            attendance: attendance::AttendanceRepository::new(pool.clone()),
            sections: sections::SectionsRepository::new(pool.clone()),
            pool,
        }
    }
}
