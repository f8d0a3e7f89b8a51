//! Attendance endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::attendance::{AttendanceDetails, AttendanceForm, BreakTimeOption},
};

use super::GatewayUser;

/// Attendance grid with form support data
#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    /// One row per section date of the course
    pub days: Vec<AttendanceDetails>,
    /// Legal break-time choices for the edit form
    pub break_time_options: Vec<BreakTimeOption>,
}

/// Completion message for punch and update operations
#[derive(Serialize, ToSchema)]
pub struct PunchResponse {
    pub message: String,
}

/// Past-record completeness probe
#[derive(Serialize, ToSchema)]
pub struct UnfilledResponse {
    /// True when a past day is missing a clock-in or clock-out
    pub has_unfilled_past: bool,
}

/// Get the attendance grid for the current student
#[utoipa::path(
    get,
    path = "/attendance",
    tag = "attendance",
    responses(
        (status = 200, description = "Attendance listing", body = AttendanceListResponse),
        (status = 401, description = "Missing gateway identity", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_attendance(
    State(state): State<crate::AppState>,
    GatewayUser(user): GatewayUser,
) -> AppResult<Json<AttendanceListResponse>> {
    let days = state
        .services
        .attendance
        .list_attendance(user.course_id, user.lms_user_id)
        .await?;

    Ok(Json(AttendanceListResponse {
        days,
        break_time_options: state.services.attendance.break_time_options(),
    }))
}

/// Check whether past days are missing entries
#[utoipa::path(
    get,
    path = "/attendance/unfilled",
    tag = "attendance",
    responses(
        (status = 200, description = "Probe result", body = UnfilledResponse),
        (status = 401, description = "Missing gateway identity", body = crate::error::ErrorResponse)
    )
)]
pub async fn unfilled_past(
    State(state): State<crate::AppState>,
    GatewayUser(user): GatewayUser,
) -> AppResult<Json<UnfilledResponse>> {
    let has_unfilled_past = state
        .services
        .attendance
        .has_unfilled_past(user.lms_user_id)
        .await?;

    Ok(Json(UnfilledResponse { has_unfilled_past }))
}

/// Record a clock-in for today
#[utoipa::path(
    post,
    path = "/attendance/punch-in",
    tag = "attendance",
    responses(
        (status = 200, description = "Clock-in recorded", body = PunchResponse),
        (status = 403, description = "Caller is not a student", body = crate::error::ErrorResponse),
        (status = 409, description = "Already clocked in today", body = crate::error::ErrorResponse),
        (status = 422, description = "Not a training day", body = crate::error::ErrorResponse)
    )
)]
pub async fn punch_in(
    State(state): State<crate::AppState>,
    GatewayUser(user): GatewayUser,
) -> AppResult<Json<PunchResponse>> {
    let message = state.services.attendance.punch_in(&user).await?;
    Ok(Json(PunchResponse { message }))
}

/// Record a clock-out for today
#[utoipa::path(
    post,
    path = "/attendance/punch-out",
    tag = "attendance",
    responses(
        (status = 200, description = "Clock-out recorded", body = PunchResponse),
        (status = 403, description = "Caller is not a student", body = crate::error::ErrorResponse),
        (status = 409, description = "No clock-in, or clock-out already recorded", body = crate::error::ErrorResponse),
        (status = 422, description = "Not a training day, or before clock-in", body = crate::error::ErrorResponse)
    )
)]
pub async fn punch_out(
    State(state): State<crate::AppState>,
    GatewayUser(user): GatewayUser,
) -> AppResult<Json<PunchResponse>> {
    let message = state.services.attendance.punch_out(&user).await?;
    Ok(Json(PunchResponse { message }))
}

/// Submit a multi-day attendance edit (all-or-nothing)
#[utoipa::path(
    put,
    path = "/attendance",
    tag = "attendance",
    request_body = AttendanceForm,
    responses(
        (status = 200, description = "Batch persisted", body = PunchResponse),
        (status = 400, description = "Malformed submission", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed; ordered rule report in details", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_attendance(
    State(state): State<crate::AppState>,
    GatewayUser(user): GatewayUser,
    Json(form): Json<AttendanceForm>,
) -> AppResult<Json<PunchResponse>> {
    let message = state.services.attendance.update_batch(&user, form).await?;
    Ok(Json(PunchResponse { message }))
}
