//! Attendance service (student-entered records)

use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::{
    error::{AppError, AppResult},
    messages,
    models::{
        attendance::{AttendanceDetails, AttendanceForm, BreakTimeOption, StudentAttendance},
        enums::{AttendanceStatus, Role},
    },
    repository::{AttendanceStore, SectionSource},
    worktime::{
        classify, reconcile, validate_batch, DayInput, TrainingTime, WorkSchedule, WriteIntent,
    },
};

use super::Clock;

/// Caller identity as asserted by the session gateway.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub lms_user_id: i32,
    pub account_id: i32,
    pub course_id: i32,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

/// Legal break-time choices: 15-minute increments up to (not including)
/// eight hours, in presentation order.
static BREAK_TIME_OPTIONS: Lazy<IndexMap<i32, String>> = Lazy::new(|| {
    (1..32)
        .map(|i| {
            let minutes = i * 15;
            (minutes, messages::format_minutes(minutes))
        })
        .collect()
});

#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    sections: Arc<dyn SectionSource>,
    schedule: WorkSchedule,
    clock: Arc<dyn Clock>,
}

impl AttendanceService {
    pub fn new(
        store: Arc<dyn AttendanceStore>,
        sections: Arc<dyn SectionSource>,
        schedule: WorkSchedule,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            sections,
            schedule,
            clock,
        }
    }

    /// The attendance grid for one student: every section date of the
    /// course with the student's record, display labels resolved.
    pub async fn list_attendance(
        &self,
        course_id: i32,
        lms_user_id: i32,
    ) -> AppResult<Vec<AttendanceDetails>> {
        let rows = self.store.list_for_course(course_id, lms_user_id).await?;
        let today = self.clock.today();

        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            let start = parse_stored(row.training_start_time.as_deref())?;
            let end = parse_stored(row.training_end_time.as_deref())?;
            let (start_hour, start_minute) = split_parts(start);
            let (end_hour, end_minute) = split_parts(end);
            let status = row.status.unwrap_or(0);

            details.push(AttendanceDetails {
                student_attendance_id: row.student_attendance_id,
                training_date: row.training_date,
                section_name: row.section_name,
                start_hour,
                start_minute,
                end_hour,
                end_minute,
                break_minutes: row.break_minutes,
                break_label: row.break_minutes.map(messages::format_minutes),
                status,
                status_label: AttendanceStatus::from(status).to_string(),
                note: row.note.unwrap_or_default(),
                is_today: row.training_date == today,
            });
        }

        Ok(details)
    }

    /// True when the student has an active past record with a missing
    /// clock-in or clock-out.
    pub async fn has_unfilled_past(&self, lms_user_id: i32) -> AppResult<bool> {
        let count = self
            .store
            .count_unfilled_before(lms_user_id, self.clock.today())
            .await?;
        Ok(count > 0)
    }

    /// The legal break-time choices with display labels.
    pub fn break_time_options(&self) -> Vec<BreakTimeOption> {
        BREAK_TIME_OPTIONS
            .iter()
            .map(|(minutes, label)| BreakTimeOption {
                minutes: *minutes,
                label: label.clone(),
            })
            .collect()
    }

    /// Record a clock-in for today. Permitted once per training date.
    pub async fn punch_in(&self, user: &CurrentUser) -> AppResult<String> {
        self.ensure_student(user)?;
        let today = self.ensure_training_day(user).await?;

        let existing = self
            .store
            .find_by_user_and_date(user.lms_user_id, today)
            .await?;
        if let Some(record) = &existing {
            if !record.training_start_time.is_empty() {
                return Err(AppError::StateConflict(messages::get(
                    messages::PUNCH_ALREADY_EXISTS,
                )));
            }
        }

        let start = TrainingTime::from_time(self.clock.time_of_day());
        // End is still unknown; only tardiness can be judged here.
        let status = classify(start, TrainingTime::Blank, &self.schedule);
        let now = self.clock.now_utc();

        match existing {
            Some(mut record) => {
                record.training_start_time = start.to_string();
                record.status = status.into();
                record.deleted = false;
                record.modified_by = Some(user.lms_user_id);
                record.modified_at = Some(now);
                self.store.update(&record).await?;
            }
            None => {
                let record = StudentAttendance {
                    student_attendance_id: None,
                    lms_user_id: user.lms_user_id,
                    account_id: user.account_id,
                    training_date: today,
                    training_start_time: start.to_string(),
                    training_end_time: String::new(),
                    status: status.into(),
                    break_minutes: None,
                    note: String::new(),
                    deleted: false,
                    created_by: Some(user.lms_user_id),
                    created_at: Some(now),
                    modified_by: Some(user.lms_user_id),
                    modified_at: Some(now),
                };
                self.store.insert(&record).await?;
            }
        }

        tracing::info!(lms_user_id = user.lms_user_id, %start, "Clock-in recorded");
        Ok(messages::get(messages::ATTENDANCE_UPDATED))
    }

    /// Record a clock-out for today. Requires a clock-in and no previous
    /// clock-out.
    pub async fn punch_out(&self, user: &CurrentUser) -> AppResult<String> {
        self.ensure_student(user)?;
        let today = self.ensure_training_day(user).await?;

        let mut record = match self
            .store
            .find_by_user_and_date(user.lms_user_id, today)
            .await?
        {
            Some(record) if !record.training_start_time.is_empty() => record,
            _ => {
                return Err(AppError::StateConflict(messages::get(
                    messages::PUNCH_IN_EMPTY,
                )))
            }
        };
        if !record.training_end_time.is_empty() {
            return Err(AppError::StateConflict(messages::get(
                messages::PUNCH_ALREADY_EXISTS,
            )));
        }

        let start = TrainingTime::from_formatted(&record.training_start_time)
            .map_err(|e| AppError::Internal(format!("stored clock-in unreadable: {}", e)))?;
        let end = TrainingTime::from_time(self.clock.time_of_day());
        if end < start {
            return Err(AppError::InvalidRange(messages::get(
                messages::TRAINING_TIME_RANGE,
            )));
        }

        let status = classify(start, end, &self.schedule);
        record.training_end_time = end.to_string();
        record.status = status.into();
        record.deleted = false;
        record.modified_by = Some(user.lms_user_id);
        record.modified_at = Some(self.clock.now_utc());
        self.store.update(&record).await?;

        tracing::info!(lms_user_id = user.lms_user_id, %end, "Clock-out recorded");
        Ok(messages::get(messages::ATTENDANCE_UPDATED))
    }

    /// Validate and persist a multi-day submission as one all-or-nothing
    /// unit.
    pub async fn update_batch(&self, user: &CurrentUser, form: AttendanceForm) -> AppResult<String> {
        // Students edit their own records; staff name the target student.
        let lms_user_id = if user.is_student() {
            user.lms_user_id
        } else {
            form.lms_user_id.ok_or_else(|| {
                AppError::InvalidInput("lms_user_id is required for staff edits".to_string())
            })?
        };

        let mut days = Vec::with_capacity(form.days.len());
        for day in &form.days {
            let training_date =
                NaiveDate::parse_from_str(&day.training_date, "%Y-%m-%d").map_err(|_| {
                    AppError::InvalidInput(format!("invalid training date: {}", day.training_date))
                })?;
            days.push(DayInput {
                training_date,
                start_hour: day.start_hour,
                start_minute: day.start_minute,
                end_hour: day.end_hour,
                end_minute: day.end_minute,
                break_minutes: day.break_minutes,
                status: AttendanceStatus::from(day.status.unwrap_or(0)),
                note: day.note.clone().unwrap_or_default(),
            });
        }

        let validated = validate_batch(&days, &self.schedule).map_err(AppError::BatchRejected)?;

        let existing = self.store.find_all_active(lms_user_id).await?;
        let writes = reconcile(
            validated,
            &existing,
            lms_user_id,
            user.account_id,
            user.lms_user_id,
            self.clock.now_utc(),
        );

        for write in &writes {
            match write.intent {
                WriteIntent::Insert => {
                    self.store.insert(&write.record).await?;
                }
                WriteIntent::Update => self.store.update(&write.record).await?,
            }
        }

        tracing::info!(lms_user_id, days = writes.len(), "Attendance batch persisted");
        Ok(messages::get(messages::ATTENDANCE_UPDATED))
    }

    fn ensure_student(&self, user: &CurrentUser) -> AppResult<()> {
        if !user.is_student() {
            return Err(AppError::PermissionDenied(messages::get(
                messages::AUTHORIZATION,
            )));
        }
        Ok(())
    }

    async fn ensure_training_day(&self, user: &CurrentUser) -> AppResult<NaiveDate> {
        let today = self.clock.today();
        let sections = self.sections.count_on(user.course_id, today).await?;
        if sections == 0 {
            return Err(AppError::NotAWorkday(messages::get(messages::NOT_WORKDAY)));
        }
        Ok(today)
    }
}

fn parse_stored(text: Option<&str>) -> AppResult<TrainingTime> {
    TrainingTime::from_formatted(text.unwrap_or(""))
        .map_err(|e| AppError::Internal(format!("stored time unreadable: {}", e)))
}

fn split_parts(time: TrainingTime) -> (Option<u32>, Option<u32>) {
    match time {
        TrainingTime::Blank => (None, None),
        TrainingTime::At { hour, minute } => (Some(hour as u32), Some(minute as u32)),
    }
}
