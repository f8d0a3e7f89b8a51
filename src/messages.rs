//! Message catalog for user-facing text.
//!
//! The core logic produces rule codes and positions; rendered text comes
//! only from here, keyed the way the original properties file was keyed.
//! Placeholders are positional (`{0}`, `{1}`).

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const ATTENDANCE_UPDATED: &str = "attendance.update.complete";
pub const AUTHORIZATION: &str = "error.authorization";
pub const NOT_WORKDAY: &str = "error.attendance.notworkday";
pub const PUNCH_ALREADY_EXISTS: &str = "error.attendance.punch.exists";
pub const PUNCH_IN_EMPTY: &str = "error.attendance.punchin.empty";
pub const TRAINING_TIME_RANGE: &str = "error.attendance.range";
pub const TRAINING_TIME_RANGE_ROW: &str = "error.attendance.range.row";
pub const INPUT_INCOMPLETE: &str = "error.input.incomplete";
pub const MAX_LENGTH: &str = "error.maxlength";
pub const BREAK_TIME_EXCEEDS: &str = "error.attendance.breaktime";

pub const LABEL_CLOCK_IN: &str = "clock-in time";
pub const LABEL_CLOCK_OUT: &str = "clock-out time";
pub const LABEL_NOTE: &str = "note";

static CATALOG: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (ATTENDANCE_UPDATED, "Attendance records have been updated."),
        (
            AUTHORIZATION,
            "You do not have permission to perform this operation.",
        ),
        (NOT_WORKDAY, "Today is not a training day."),
        (
            PUNCH_ALREADY_EXISTS,
            "Today's attendance has already been entered. Edit it directly instead.",
        ),
        (
            PUNCH_IN_EMPTY,
            "Clock-out cannot be recorded because there is no clock-in entry.",
        ),
        (
            TRAINING_TIME_RANGE,
            "The clock-out time must not be earlier than the clock-in time.",
        ),
        (
            TRAINING_TIME_RANGE_ROW,
            "Row {0}: the clock-out time must not be earlier than the clock-in time.",
        ),
        (
            INPUT_INCOMPLETE,
            "The {0} is incomplete. Enter both hour and minute.",
        ),
        (MAX_LENGTH, "The {0} must be {1} characters or fewer."),
        (
            BREAK_TIME_EXCEEDS,
            "Break time must not exceed the time worked.",
        ),
    ])
});

/// Look up a message by key. Unknown keys echo the key itself so a
/// missing entry is visible instead of silent.
pub fn get(key: &str) -> String {
    CATALOG.get(key).map_or_else(|| key.to_string(), |s| s.to_string())
}

/// Look up a message and substitute positional `{n}` placeholders.
pub fn format(key: &str, args: &[&str]) -> String {
    let mut text = get(key);
    for (i, arg) in args.iter().enumerate() {
        text = text.replace(&format!("{{{}}}", i), arg);
    }
    text
}

/// Render a minute count as a compact duration label ("45m", "2h", "1h15m").
pub fn format_minutes(total: i32) -> String {
    let hour = total / 60;
    let minute = total % 60;
    if hour == 0 {
        format!("{}m", minute)
    } else if minute == 0 {
        format!("{}h", hour)
    } else {
        format!("{}h{}m", hour, minute)
    }
}
