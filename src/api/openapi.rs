//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{attendance, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LMS Attendance API",
        version = "1.0.0",
        description = "Course Management System attendance REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "LMS Team", email = "dev@lms-school.example")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Attendance
        attendance::list_attendance,
        attendance::unfilled_past,
        attendance::punch_in,
        attendance::punch_out,
        attendance::update_attendance,
    ),
    components(
        schemas(
            // Attendance
            attendance::AttendanceListResponse,
            attendance::PunchResponse,
            attendance::UnfilledResponse,
            crate::models::attendance::AttendanceDetails,
            crate::models::attendance::BreakTimeOption,
            crate::models::attendance::AttendanceForm,
            crate::models::attendance::DailyAttendanceForm,
            crate::models::enums::AttendanceStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::ValidationIssue,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "attendance", description = "Student attendance tracking")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
