//! Student attendance entity and related request types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// StudentAttendance
// ---------------------------------------------------------------------------

/// Attendance record from database, one per student and training date.
///
/// Clock times are persisted as canonical `"HH:MM"` strings; the empty
/// string means the time was never recorded.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentAttendance {
    pub student_attendance_id: Option<i32>,
    pub lms_user_id: i32,
    pub account_id: i32,
    pub training_date: NaiveDate,
    pub training_start_time: String,
    pub training_end_time: String,
    pub status: i16,
    pub break_minutes: Option<i32>,
    pub note: String,
    pub deleted: bool,
    pub created_by: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_by: Option<i32>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// One row of the attendance listing: every section date of the course,
/// left-joined with the student's record for that date.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceListRow {
    pub training_date: NaiveDate,
    pub section_name: String,
    pub student_attendance_id: Option<i32>,
    pub training_start_time: Option<String>,
    pub training_end_time: Option<String>,
    pub status: Option<i16>,
    pub break_minutes: Option<i32>,
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Display / form types
// ---------------------------------------------------------------------------

/// One day of the attendance grid, shaped for display and form prefill
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceDetails {
    pub student_attendance_id: Option<i32>,
    /// Training date (YYYY-MM-DD)
    pub training_date: NaiveDate,
    pub section_name: String,
    pub start_hour: Option<u32>,
    pub start_minute: Option<u32>,
    pub end_hour: Option<u32>,
    pub end_minute: Option<u32>,
    pub break_minutes: Option<i32>,
    /// Break time rendered for display (e.g. "1h30m")
    pub break_label: Option<String>,
    pub status: i16,
    pub status_label: String,
    pub note: String,
    pub is_today: bool,
}

/// A legal break-time choice with its display label
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BreakTimeOption {
    pub minutes: i32,
    pub label: String,
}

/// Multi-day attendance submission
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AttendanceForm {
    /// Target student; staff may edit on a student's behalf
    pub lms_user_id: Option<i32>,
    pub days: Vec<DailyAttendanceForm>,
}

/// One submitted day of an attendance edit
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DailyAttendanceForm {
    pub student_attendance_id: Option<i32>,
    /// Training date (YYYY-MM-DD)
    pub training_date: String,
    pub start_hour: Option<u32>,
    pub start_minute: Option<u32>,
    pub end_hour: Option<u32>,
    pub end_minute: Option<u32>,
    pub break_minutes: Option<i32>,
    /// Submitted status code; kept when the day cannot be reclassified
    pub status: Option<i16>,
    pub note: Option<String>,
}
