//! Sections repository (course training calendar)

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;

use super::SectionSource;

#[derive(Clone)]
pub struct SectionsRepository {
    pool: Pool<Postgres>,
}

impl SectionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionSource for SectionsRepository {
    async fn count_on(&self, course_id: i32, date: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sections WHERE course_id = $1 AND section_date = $2",
        )
        .bind(course_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
