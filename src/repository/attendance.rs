//! Attendance repository for database operations

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::attendance::{AttendanceListRow, StudentAttendance},
};

use super::AttendanceStore;

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: Pool<Postgres>,
}

impl AttendanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for AttendanceRepository {
    async fn find_by_user_and_date(
        &self,
        lms_user_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<StudentAttendance>> {
        let record = sqlx::query_as::<_, StudentAttendance>(
            r#"
            SELECT * FROM student_attendances
            WHERE lms_user_id = $1 AND training_date = $2 AND deleted = FALSE
            "#,
        )
        .bind(lms_user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_all_active(&self, lms_user_id: i32) -> AppResult<Vec<StudentAttendance>> {
        let records = sqlx::query_as::<_, StudentAttendance>(
            r#"
            SELECT * FROM student_attendances
            WHERE lms_user_id = $1 AND deleted = FALSE
            ORDER BY training_date
            "#,
        )
        .bind(lms_user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn insert(&self, record: &StudentAttendance) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO student_attendances (
                lms_user_id, account_id, training_date,
                training_start_time, training_end_time, status,
                break_minutes, note, deleted,
                created_by, created_at, modified_by, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING student_attendance_id
            "#,
        )
        .bind(record.lms_user_id)
        .bind(record.account_id)
        .bind(record.training_date)
        .bind(&record.training_start_time)
        .bind(&record.training_end_time)
        .bind(record.status)
        .bind(record.break_minutes)
        .bind(&record.note)
        .bind(record.deleted)
        .bind(record.created_by)
        .bind(record.created_at)
        .bind(record.modified_by)
        .bind(record.modified_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, record: &StudentAttendance) -> AppResult<()> {
        let id = record
            .student_attendance_id
            .ok_or_else(|| AppError::Internal("update of a record without identity".to_string()))?;

        sqlx::query(
            r#"
            UPDATE student_attendances
            SET training_start_time = $1, training_end_time = $2, status = $3,
                break_minutes = $4, note = $5, deleted = $6,
                modified_by = $7, modified_at = $8
            WHERE student_attendance_id = $9
            "#,
        )
        .bind(&record.training_start_time)
        .bind(&record.training_end_time)
        .bind(record.status)
        .bind(record.break_minutes)
        .bind(&record.note)
        .bind(record.deleted)
        .bind(record.modified_by)
        .bind(record.modified_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_unfilled_before(&self, lms_user_id: i32, date: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM student_attendances
            WHERE lms_user_id = $1 AND deleted = FALSE AND training_date < $2
              AND (training_start_time = '' OR training_end_time = '')
            "#,
        )
        .bind(lms_user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn list_for_course(
        &self,
        course_id: i32,
        lms_user_id: i32,
    ) -> AppResult<Vec<AttendanceListRow>> {
        let rows = sqlx::query_as::<_, AttendanceListRow>(
            r#"
            SELECT s.section_date AS training_date, s.section_name,
                   a.student_attendance_id, a.training_start_time,
                   a.training_end_time, a.status, a.break_minutes, a.note
            FROM sections s
            LEFT JOIN student_attendances a
              ON a.lms_user_id = $2
             AND a.training_date = s.section_date
             AND a.deleted = FALSE
            WHERE s.course_id = $1
            ORDER BY s.section_date
            "#,
        )
        .bind(course_id)
        .bind(lms_user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
