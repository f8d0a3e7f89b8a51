//! Shared domain enums with their persistence codes

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// AttendanceStatus
// ---------------------------------------------------------------------------

/// Tardy / leaving-early classification stored on each attendance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[repr(i16)]
pub enum AttendanceStatus {
    /// Present and on time (the default)
    #[default]
    None = 0,
    Tardy = 1,
    LeavingEarly = 2,
    TardyAndLeavingEarly = 3,
    Absent = 4,
}

impl From<i16> for AttendanceStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => AttendanceStatus::Tardy,
            2 => AttendanceStatus::LeavingEarly,
            3 => AttendanceStatus::TardyAndLeavingEarly,
            4 => AttendanceStatus::Absent,
            _ => AttendanceStatus::None,
        }
    }
}

impl From<AttendanceStatus> for i16 {
    fn from(s: AttendanceStatus) -> Self {
        s as i16
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AttendanceStatus::None => "",
            AttendanceStatus::Tardy => "Tardy",
            AttendanceStatus::LeavingEarly => "Leaving early",
            AttendanceStatus::TardyAndLeavingEarly => "Tardy / leaving early",
            AttendanceStatus::Absent => "Absent",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Caller role as asserted by the session gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Role::Student),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }
}
