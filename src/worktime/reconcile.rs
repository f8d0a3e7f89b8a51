//! Merge of validated submission days with previously stored records.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::attendance::StudentAttendance;

use super::validate::ValidatedDay;

/// What the store collaborator should do with a reconciled record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteIntent {
    Insert,
    Update,
}

/// A reconciled record tagged with its persistence intent.
#[derive(Debug, Clone)]
pub struct PendingWrite {
    pub intent: WriteIntent,
    pub record: StudentAttendance,
}

/// Merge validated days with the student's stored records, matching by
/// exact training-date equality.
///
/// A match keeps the stored record's identity and creation audit fields
/// and overwrites the mutable ones; no match builds a fresh record with
/// creation stamps. Pure merge, no I/O.
pub fn reconcile(
    days: Vec<ValidatedDay>,
    existing: &[StudentAttendance],
    lms_user_id: i32,
    account_id: i32,
    actor: i32,
    now: DateTime<Utc>,
) -> Vec<PendingWrite> {
    let by_date: HashMap<NaiveDate, &StudentAttendance> = existing
        .iter()
        .map(|record| (record.training_date, record))
        .collect();

    days.into_iter()
        .map(|day| match by_date.get(&day.training_date) {
            Some(stored) => {
                let mut record = (*stored).clone();
                apply_day(&mut record, &day);
                record.lms_user_id = lms_user_id;
                record.account_id = account_id;
                record.modified_by = Some(actor);
                record.modified_at = Some(now);
                PendingWrite {
                    intent: WriteIntent::Update,
                    record,
                }
            }
            None => {
                let mut record = StudentAttendance {
                    student_attendance_id: None,
                    lms_user_id,
                    account_id,
                    training_date: day.training_date,
                    training_start_time: String::new(),
                    training_end_time: String::new(),
                    status: 0,
                    break_minutes: None,
                    note: String::new(),
                    deleted: false,
                    created_by: Some(actor),
                    created_at: Some(now),
                    modified_by: Some(actor),
                    modified_at: Some(now),
                };
                apply_day(&mut record, &day);
                PendingWrite {
                    intent: WriteIntent::Insert,
                    record,
                }
            }
        })
        .collect()
}

fn apply_day(record: &mut StudentAttendance, day: &ValidatedDay) {
    record.training_start_time = day.start.to_string();
    record.training_end_time = day.end.to_string();
    record.break_minutes = day.break_minutes;
    record.status = day.status.into();
    record.note = day.note.clone();
    record.deleted = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::AttendanceStatus;
    use crate::worktime::training_time::TrainingTime;
    use chrono::TimeZone;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn validated(day: u32) -> ValidatedDay {
        ValidatedDay {
            training_date: date(day),
            start: TrainingTime::from_parts(Some(9), Some(0)).unwrap(),
            end: TrainingTime::from_parts(Some(18), Some(0)).unwrap(),
            break_minutes: Some(60),
            status: AttendanceStatus::None,
            note: "did things".to_string(),
        }
    }

    fn stored(day: u32) -> StudentAttendance {
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        StudentAttendance {
            student_attendance_id: Some(41),
            lms_user_id: 7,
            account_id: 3,
            training_date: date(day),
            training_start_time: "09:30".to_string(),
            training_end_time: String::new(),
            status: 1,
            break_minutes: None,
            note: String::new(),
            deleted: false,
            created_by: Some(7),
            created_at: Some(created),
            modified_by: Some(7),
            modified_at: Some(created),
        }
    }

    #[test]
    fn matching_date_becomes_an_update_keeping_identity() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).unwrap();
        let writes = reconcile(vec![validated(3)], &[stored(3)], 7, 3, 99, now);

        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].intent, WriteIntent::Update);
        let record = &writes[0].record;
        assert_eq!(record.student_attendance_id, Some(41));
        assert_eq!(record.created_by, Some(7));
        assert_eq!(record.training_start_time, "09:00");
        assert_eq!(record.training_end_time, "18:00");
        assert_eq!(record.break_minutes, Some(60));
        assert_eq!(record.modified_by, Some(99));
        assert_eq!(record.modified_at, Some(now));
    }

    #[test]
    fn unknown_date_becomes_an_insert_with_creation_stamps() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).unwrap();
        let writes = reconcile(vec![validated(5)], &[stored(3)], 7, 3, 7, now);

        assert_eq!(writes[0].intent, WriteIntent::Insert);
        let record = &writes[0].record;
        assert_eq!(record.student_attendance_id, None);
        assert_eq!(record.created_by, Some(7));
        assert_eq!(record.created_at, Some(now));
        assert!(!record.deleted);
    }

    #[test]
    fn mixed_batch_tags_each_day_independently() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).unwrap();
        let writes = reconcile(
            vec![validated(3), validated(4)],
            &[stored(3)],
            7,
            3,
            7,
            now,
        );
        assert_eq!(writes[0].intent, WriteIntent::Update);
        assert_eq!(writes[1].intent, WriteIntent::Insert);
    }
}
