//! The canonical hour:minute value used throughout attendance tracking.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveTime, Timelike};

use super::{TimePart, WorktimeError};

/// A time of day within one calendar day (00:00-23:59), or the
/// distinguished blank value meaning "not recorded".
///
/// The canonical serialization is the zero-padded `"HH:MM"` string;
/// blank serializes as the empty string. A value is blank if and only if
/// its canonical form is empty. Subtraction produces a value that is read
/// as an hour/minute *magnitude* rather than a clock position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainingTime {
    #[default]
    Blank,
    At {
        hour: u8,
        minute: u8,
    },
}

impl TrainingTime {
    /// Build from a wall-clock reading; always fully set.
    pub fn from_time(time: NaiveTime) -> Self {
        TrainingTime::At {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// Build from independently submitted hour and minute fields.
    ///
    /// Both absent yields [`TrainingTime::Blank`]. A half-filled pair is
    /// rejected with [`WorktimeError::MissingPart`] naming the absent
    /// component; the caller turns that into a validation error rather
    /// than swallowing it.
    pub fn from_parts(hour: Option<u32>, minute: Option<u32>) -> Result<Self, WorktimeError> {
        match (hour, minute) {
            (None, None) => Ok(TrainingTime::Blank),
            (None, Some(_)) => Err(WorktimeError::MissingPart(TimePart::Hour)),
            (Some(_), None) => Err(WorktimeError::MissingPart(TimePart::Minute)),
            (Some(h), Some(m)) => {
                if h > 23 {
                    return Err(WorktimeError::OutOfRange(TimePart::Hour));
                }
                if m > 59 {
                    return Err(WorktimeError::OutOfRange(TimePart::Minute));
                }
                Ok(TrainingTime::At {
                    hour: h as u8,
                    minute: m as u8,
                })
            }
        }
    }

    /// Parse the canonical `"HH:MM"` form; the empty string is blank.
    pub fn from_formatted(text: &str) -> Result<Self, WorktimeError> {
        if text.is_empty() {
            return Ok(TrainingTime::Blank);
        }
        let malformed = || WorktimeError::Malformed(text.to_string());
        let (h, m) = text.split_once(':').ok_or_else(malformed)?;
        let hour: u32 = h.parse().map_err(|_| malformed())?;
        let minute: u32 = m.parse().map_err(|_| malformed())?;
        Self::from_parts(Some(hour), Some(minute)).map_err(|_| malformed())
    }

    /// Build an hour/minute magnitude from a minute count (0-1439).
    pub fn from_minutes(total: u32) -> Self {
        TrainingTime::At {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, TrainingTime::Blank)
    }

    pub fn is_set(&self) -> bool {
        !self.is_blank()
    }

    /// Minutes since midnight, or `None` when blank.
    pub fn total_minutes(&self) -> Option<i32> {
        match self {
            TrainingTime::Blank => None,
            TrainingTime::At { hour, minute } => Some(*hour as i32 * 60 + *minute as i32),
        }
    }

    /// The magnitude duration `self - earlier`.
    ///
    /// Fails with [`WorktimeError::NegativeRange`] when `self < earlier`
    /// and with [`WorktimeError::BlankOperand`] when either side is blank;
    /// callers check blankness first.
    pub fn subtract(&self, earlier: &TrainingTime) -> Result<TrainingTime, WorktimeError> {
        let end = self.total_minutes().ok_or(WorktimeError::BlankOperand)?;
        let start = earlier.total_minutes().ok_or(WorktimeError::BlankOperand)?;
        if end < start {
            return Err(WorktimeError::NegativeRange);
        }
        Ok(TrainingTime::from_minutes((end - start) as u32))
    }
}

impl fmt::Display for TrainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingTime::Blank => Ok(()),
            TrainingTime::At { hour, minute } => write!(f, "{:02}:{:02}", hour, minute),
        }
    }
}

/// Total order by minutes since midnight; undefined (None) when either
/// operand is blank.
impl PartialOrd for TrainingTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.total_minutes()?.cmp(&other.total_minutes()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_round_trips_every_valid_pair() {
        for hour in 0..24 {
            for minute in 0..60 {
                let t = TrainingTime::from_parts(Some(hour), Some(minute)).unwrap();
                let reparsed = TrainingTime::from_formatted(&t.to_string()).unwrap();
                assert_eq!(t, reparsed);
            }
        }
    }

    #[test]
    fn blank_round_trips_through_empty_string() {
        let blank = TrainingTime::from_formatted("").unwrap();
        assert!(blank.is_blank());
        assert_eq!(blank.to_string(), "");
    }

    #[test]
    fn from_parts_rejects_half_filled_pairs() {
        assert_eq!(
            TrainingTime::from_parts(Some(9), None),
            Err(WorktimeError::MissingPart(TimePart::Minute))
        );
        assert_eq!(
            TrainingTime::from_parts(None, Some(15)),
            Err(WorktimeError::MissingPart(TimePart::Hour))
        );
    }

    #[test]
    fn from_parts_rejects_out_of_range_components() {
        assert_eq!(
            TrainingTime::from_parts(Some(24), Some(0)),
            Err(WorktimeError::OutOfRange(TimePart::Hour))
        );
        assert_eq!(
            TrainingTime::from_parts(Some(0), Some(60)),
            Err(WorktimeError::OutOfRange(TimePart::Minute))
        );
    }

    #[test]
    fn from_formatted_rejects_garbage() {
        assert!(matches!(
            TrainingTime::from_formatted("9 o'clock"),
            Err(WorktimeError::Malformed(_))
        ));
        assert!(matches!(
            TrainingTime::from_formatted("25:00"),
            Err(WorktimeError::Malformed(_))
        ));
    }

    #[test]
    fn subtract_matches_minute_arithmetic() {
        let start = TrainingTime::from_parts(Some(9), Some(10)).unwrap();
        let end = TrainingTime::from_parts(Some(17), Some(50)).unwrap();
        let duration = end.subtract(&start).unwrap();
        assert_eq!(
            duration.total_minutes().unwrap(),
            (17 * 60 + 50) - (9 * 60 + 10)
        );
    }

    #[test]
    fn subtract_fails_on_negative_range() {
        let start = TrainingTime::from_parts(Some(9), Some(15)).unwrap();
        let end = TrainingTime::from_parts(Some(9), Some(0)).unwrap();
        assert_eq!(end.subtract(&start), Err(WorktimeError::NegativeRange));
    }

    #[test]
    fn subtract_fails_on_blank_operand() {
        let set = TrainingTime::from_parts(Some(9), Some(0)).unwrap();
        assert_eq!(
            TrainingTime::Blank.subtract(&set),
            Err(WorktimeError::BlankOperand)
        );
        assert_eq!(
            set.subtract(&TrainingTime::Blank),
            Err(WorktimeError::BlankOperand)
        );
    }

    #[test]
    fn comparison_is_undefined_for_blank_values() {
        let set = TrainingTime::from_parts(Some(12), Some(0)).unwrap();
        assert_eq!(TrainingTime::Blank.partial_cmp(&set), None);
        assert_eq!(set.partial_cmp(&TrainingTime::Blank), None);
    }

    #[test]
    fn comparison_orders_by_minutes_since_midnight() {
        let a = TrainingTime::from_parts(Some(8), Some(59)).unwrap();
        let b = TrainingTime::from_parts(Some(9), Some(0)).unwrap();
        assert!(a < b);
        assert!(b > a);
        assert!(a <= a);
    }
}
