//! Normalization and rule validation of multi-day attendance submissions.
//!
//! Every row is scanned before the batch is accepted or rejected; nothing
//! short-circuits on the first violation. Rules b, c and f report only
//! their first occurrence across the whole submission, and the final
//! report is ordered by rule letter with submission order preserved
//! within a letter.

use chrono::NaiveDate;

use crate::messages;
use crate::models::enums::AttendanceStatus;

use super::classify::{classify, worked_minutes, WorkSchedule};
use super::training_time::TrainingTime;
use super::{TimePart, WorktimeError};

/// Longest accepted note, counted in characters.
pub const MAX_NOTE_CHARS: usize = 100;

/// Raw fields of one submitted day, index-aligned with the batch.
#[derive(Debug, Clone)]
pub struct DayInput {
    pub training_date: NaiveDate,
    pub start_hour: Option<u32>,
    pub start_minute: Option<u32>,
    pub end_hour: Option<u32>,
    pub end_minute: Option<u32>,
    pub break_minutes: Option<i32>,
    /// Status as submitted; kept when the day cannot be reclassified.
    pub status: AttendanceStatus,
    pub note: String,
}

/// A day that passed validation, normalized and reclassified.
#[derive(Debug, Clone)]
pub struct ValidatedDay {
    pub training_date: NaiveDate,
    pub start: TrainingTime,
    pub end: TrainingTime,
    pub break_minutes: Option<i32>,
    pub status: AttendanceStatus,
    pub note: String,
}

/// Structured rule identifier: class letter plus the sub-field marker
/// for the incomplete-time rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCode {
    /// a: note longer than [`MAX_NOTE_CHARS`]
    NoteTooLong,
    /// b: start hour/minute half-filled
    IncompleteStart(TimePart),
    /// c: end hour/minute half-filled
    IncompleteEnd(TimePart),
    /// d: clock-out without clock-in
    EndWithoutStart,
    /// e: end precedes start
    EndBeforeStart,
    /// f: break exceeds the worked span
    BreakExceedsWork,
}

impl RuleCode {
    pub fn letter(&self) -> char {
        match self {
            RuleCode::NoteTooLong => 'a',
            RuleCode::IncompleteStart(_) => 'b',
            RuleCode::IncompleteEnd(_) => 'c',
            RuleCode::EndWithoutStart => 'd',
            RuleCode::EndBeforeStart => 'e',
            RuleCode::BreakExceedsWork => 'f',
        }
    }

    fn marker(&self) -> Option<char> {
        match self {
            RuleCode::IncompleteStart(part) | RuleCode::IncompleteEnd(part) => Some(match part {
                TimePart::Hour => 'h',
                TimePart::Minute => 'm',
            }),
            _ => None,
        }
    }
}

/// One violated rule, positioned at its 0-based row in the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: RuleCode,
    pub row: usize,
    pub message: String,
}

impl ValidationError {
    /// Compact tag rendered to clients: letter, sub-field marker, row
    /// index (e.g. `bh0`, `e2`).
    pub fn tag(&self) -> String {
        let mut tag = String::new();
        tag.push(self.code.letter());
        if let Some(marker) = self.code.marker() {
            tag.push(marker);
        }
        tag.push_str(&self.row.to_string());
        tag
    }
}

/// Parse an hour/minute pair, degrading a rejected pair to blank while
/// remembering which component caused the rejection.
fn normalize_time(hour: Option<u32>, minute: Option<u32>) -> (TrainingTime, Option<TimePart>) {
    match TrainingTime::from_parts(hour, minute) {
        Ok(time) => (time, None),
        Err(WorktimeError::MissingPart(part) | WorktimeError::OutOfRange(part)) => {
            (TrainingTime::Blank, Some(part))
        }
        Err(_) => (TrainingTime::Blank, None),
    }
}

/// Validate a whole submission against the rule set.
///
/// Returns the normalized days when every row is clean, or the ordered
/// error report when any rule was violated; a rejected batch must not be
/// persisted at all.
pub fn validate_batch(
    days: &[DayInput],
    schedule: &WorkSchedule,
) -> Result<Vec<ValidatedDay>, Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = Vec::new();
    let mut validated = Vec::with_capacity(days.len());
    let (mut seen_b, mut seen_c, mut seen_f) = (false, false, false);

    for (row, day) in days.iter().enumerate() {
        let (start, start_missing) = normalize_time(day.start_hour, day.start_minute);
        if let Some(part) = start_missing {
            if !seen_b {
                seen_b = true;
                errors.push(ValidationError {
                    code: RuleCode::IncompleteStart(part),
                    row,
                    message: messages::format(
                        messages::INPUT_INCOMPLETE,
                        &[messages::LABEL_CLOCK_IN],
                    ),
                });
            }
        }

        let (end, end_missing) = normalize_time(day.end_hour, day.end_minute);
        if let Some(part) = end_missing {
            if !seen_c {
                seen_c = true;
                errors.push(ValidationError {
                    code: RuleCode::IncompleteEnd(part),
                    row,
                    message: messages::format(
                        messages::INPUT_INCOMPLETE,
                        &[messages::LABEL_CLOCK_OUT],
                    ),
                });
            }
        }

        if day.note.chars().count() > MAX_NOTE_CHARS {
            errors.push(ValidationError {
                code: RuleCode::NoteTooLong,
                row,
                message: messages::format(messages::MAX_LENGTH, &[messages::LABEL_NOTE, "100"]),
            });
        }

        if start.is_blank() && end.is_set() {
            errors.push(ValidationError {
                code: RuleCode::EndWithoutStart,
                row,
                message: messages::get(messages::PUNCH_IN_EMPTY),
            });
        } else if start.is_set() && end.is_set() {
            match worked_minutes(start, end) {
                Ok(total) => {
                    if day.break_minutes.unwrap_or(0) > total && !seen_f {
                        seen_f = true;
                        errors.push(ValidationError {
                            code: RuleCode::BreakExceedsWork,
                            row,
                            message: messages::get(messages::BREAK_TIME_EXCEEDS),
                        });
                    }
                }
                Err(WorktimeError::NegativeRange) => {
                    errors.push(ValidationError {
                        code: RuleCode::EndBeforeStart,
                        row,
                        message: messages::format(
                            messages::TRAINING_TIME_RANGE_ROW,
                            &[&(row + 1).to_string()],
                        ),
                    });
                }
                Err(_) => {}
            }
        }

        // A day with any recorded time is reclassified against the
        // schedule unless it was marked absent; untouched otherwise.
        let status = if (start.is_set() || end.is_set()) && day.status != AttendanceStatus::Absent {
            classify(start, end, schedule)
        } else {
            day.status
        };

        validated.push(ValidatedDay {
            training_date: day.training_date,
            start,
            end,
            break_minutes: day.break_minutes,
            status,
            note: day.note.clone(),
        });
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        // Stable sort: equal letters keep submission order.
        errors.sort_by_key(|e| e.code.letter());
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn schedule() -> WorkSchedule {
        WorkSchedule {
            work_start: TrainingTime::from_parts(Some(9), Some(0)).unwrap(),
            work_end: TrainingTime::from_parts(Some(18), Some(0)).unwrap(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn day(row: u32) -> DayInput {
        DayInput {
            training_date: date(row + 1),
            start_hour: None,
            start_minute: None,
            end_hour: None,
            end_minute: None,
            break_minutes: None,
            status: AttendanceStatus::None,
            note: String::new(),
        }
    }

    fn with_times(row: u32, start: (u32, u32), end: (u32, u32)) -> DayInput {
        DayInput {
            start_hour: Some(start.0),
            start_minute: Some(start.1),
            end_hour: Some(end.0),
            end_minute: Some(end.1),
            ..day(row)
        }
    }

    fn letters(errors: &[ValidationError]) -> String {
        errors.iter().map(|e| e.code.letter()).collect()
    }

    #[test]
    fn clean_submission_is_accepted_and_reclassified() {
        let days = vec![with_times(0, (9, 10), (17, 50))];
        let validated = validate_batch(&days, &schedule()).unwrap();
        assert_eq!(validated[0].status, AttendanceStatus::TardyAndLeavingEarly);
        assert_eq!(validated[0].start.to_string(), "09:10");
        assert_eq!(validated[0].end.to_string(), "17:50");
    }

    #[test]
    fn end_before_start_is_rejected_with_rule_e() {
        let days = vec![with_times(0, (9, 15), (9, 0))];
        let errors = validate_batch(&days, &schedule()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].tag(), "e0");
        assert!(errors[0].message.contains("Row 1"));
    }

    #[test]
    fn half_filled_start_is_rejected_with_rule_b() {
        let mut input = day(0);
        input.start_hour = Some(9);
        let errors = validate_batch(&[input], &schedule()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].tag(), "bm0");
    }

    #[test]
    fn half_filled_start_with_complete_end_raises_b_and_d() {
        let mut input = with_times(0, (9, 0), (17, 0));
        input.start_minute = None;
        let errors = validate_batch(&[input], &schedule()).unwrap_err();
        assert_eq!(letters(&errors), "bd");
    }

    #[test]
    fn end_without_start_is_rejected_with_rule_d() {
        let mut input = day(0);
        input.end_hour = Some(17);
        input.end_minute = Some(0);
        let errors = validate_batch(&[input], &schedule()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].tag(), "d0");
    }

    #[test]
    fn note_length_boundary() {
        let mut input = with_times(0, (9, 0), (18, 0));
        input.note = "x".repeat(100);
        assert!(validate_batch(&[input.clone()], &schedule()).is_ok());

        input.note = "x".repeat(101);
        let errors = validate_batch(&[input], &schedule()).unwrap_err();
        assert_eq!(errors[0].tag(), "a0");
    }

    #[test]
    fn break_bound_is_inclusive() {
        // 09:00-18:00 is 540 minutes worked.
        let mut input = with_times(0, (9, 0), (18, 0));
        input.break_minutes = Some(480);
        assert!(validate_batch(&[input.clone()], &schedule()).is_ok());

        input.break_minutes = Some(541);
        let errors = validate_batch(&[input], &schedule()).unwrap_err();
        assert_eq!(errors[0].tag(), "f0");
    }

    #[test]
    fn rules_b_and_f_report_only_their_first_occurrence() {
        let mut days = Vec::new();
        for row in 0..3 {
            let mut input = day(row);
            input.start_hour = Some(9);
            days.push(input);
        }
        for row in 3..6 {
            let mut input = with_times(row, (9, 0), (10, 0));
            input.break_minutes = Some(400);
            days.push(input);
        }
        let errors = validate_batch(&days, &schedule()).unwrap_err();
        assert_eq!(letters(&errors), "bf");
        assert_eq!(errors[0].row, 0);
        assert_eq!(errors[1].row, 3);
    }

    #[test]
    fn report_is_sorted_by_letter_with_stable_ties() {
        let mut over_break = with_times(0, (9, 0), (10, 0));
        over_break.break_minutes = Some(120);

        let mut long_note_one = with_times(1, (9, 0), (18, 0));
        long_note_one.note = "x".repeat(101);

        let mut partial = day(2);
        partial.end_minute = Some(30);

        let mut long_note_two = with_times(3, (9, 0), (18, 0));
        long_note_two.note = "y".repeat(150);

        let days = vec![over_break, long_note_one, partial, long_note_two];
        let errors = validate_batch(&days, &schedule()).unwrap_err();

        assert_eq!(letters(&errors), "aacf");
        // Equal-letter ties keep submission order.
        assert_eq!(errors[0].row, 1);
        assert_eq!(errors[1].row, 3);
        assert_eq!(errors[2].tag(), "ch2");
    }

    #[test]
    fn absent_day_keeps_its_submitted_status() {
        let mut input = with_times(0, (10, 0), (17, 0));
        input.status = AttendanceStatus::Absent;
        let validated = validate_batch(&[input], &schedule()).unwrap();
        assert_eq!(validated[0].status, AttendanceStatus::Absent);
    }

    #[test]
    fn day_without_any_time_keeps_its_submitted_status() {
        let mut input = day(0);
        input.status = AttendanceStatus::Tardy;
        let validated = validate_batch(&[input], &schedule()).unwrap();
        assert_eq!(validated[0].status, AttendanceStatus::Tardy);
    }

    #[test]
    fn unenforced_schedule_still_checks_ranges() {
        let unenforced = WorkSchedule {
            work_start: TrainingTime::Blank,
            work_end: TrainingTime::Blank,
        };
        let ok = vec![with_times(0, (10, 30), (15, 0))];
        let validated = validate_batch(&ok, &unenforced).unwrap();
        assert_eq!(validated[0].status, AttendanceStatus::None);

        let bad = vec![with_times(0, (15, 0), (10, 30))];
        let errors = validate_batch(&bad, &unenforced).unwrap_err();
        assert_eq!(errors[0].code, RuleCode::EndBeforeStart);
    }
}
