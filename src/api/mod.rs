//! API handlers for the LMS attendance REST endpoints

pub mod attendance;
pub mod health;
pub mod openapi;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    error::AppError, models::enums::Role, services::attendance::CurrentUser, AppState,
};

/// Extractor for the caller identity asserted by the session gateway.
///
/// Login and session handling live in front of this service; the gateway
/// forwards the authenticated user as `x-lms-user-id`, `x-account-id`,
/// `x-course-id` and `x-lms-role` headers.
pub struct GatewayUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for GatewayUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let numeric = |name: &str| -> Result<i32, AppError> {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok())
                .ok_or_else(|| {
                    AppError::Unauthenticated(format!("Missing or invalid {} header", name))
                })
        };

        let lms_user_id = numeric("x-lms-user-id")?;
        let account_id = numeric("x-account-id")?;
        let course_id = numeric("x-course-id")?;

        let role = parts
            .headers
            .get("x-lms-role")
            .and_then(|value| value.to_str().ok())
            .and_then(Role::parse)
            .ok_or_else(|| {
                AppError::Unauthenticated("Missing or invalid x-lms-role header".to_string())
            })?;

        Ok(GatewayUser(CurrentUser {
            lms_user_id,
            account_id,
            course_id,
            role,
        }))
    }
}
