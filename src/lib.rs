//! LMS Attendance Server
//!
//! A Rust implementation of the LMS student attendance module, providing
//! a REST JSON API for clock-in/clock-out tracking and day-by-day
//! attendance editing within the course-management application.

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub mod api;
pub mod config;
pub mod error;
pub mod messages;
pub mod models;
pub mod repository;
pub mod services;
pub mod worktime;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub pool: Pool<Postgres>,
}
