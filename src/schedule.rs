//! Schedule encoding: HHMM integer time codes to minute-of-day spans and
//! human-readable hours text.
//!
//! Codes encode clock time in decimal: `930` is 09:30, `1730` is 17:30.
//! Structured entries are ordered Monday→Sunday. When a schedule carries
//! `hours_known = false`, the structured sequence is empty and the readable
//! text is the fixed sentinel, regardless of any day rows present.

use std::fmt;

use crate::models::{Schedule, ScheduleDay, ScheduleEntry};

/// Readable replacement emitted when a schedule's hours are not known.
pub const HOURS_UNKNOWN_SENTINEL: &str = "Hours: Call to confirm hours.";

/// A malformed time code on one schedule day row. Fails that schedule's
/// service record; the rest of the run proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleViolation {
    pub schedule_id: i64,
    pub day: String,
    pub field: &'static str,
    pub code: i64,
}

impl fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "schedule {}: invalid {} code {} on {}",
            self.schedule_id, self.field, self.code, self.day
        )
    }
}

/// Structured and readable forms of one resolved schedule.
#[derive(Debug, Clone, Default)]
pub struct EncodedSchedule {
    pub entries: Vec<ScheduleEntry>,
    /// Full hours clause for the prose assembler, including the `Hours:`
    /// prefix and trailing period. `None` when there is nothing to say
    /// (hours known but no day rows).
    pub hours_text: Option<String>,
}

/// Encode one resolved schedule. Day rows keep their relative order within
/// a weekday; weekdays sort Monday→Sunday.
pub fn encode(schedule: &Schedule, days: &[&ScheduleDay]) -> Result<EncodedSchedule, ScheduleViolation> {
    if !schedule.hours_known {
        return Ok(EncodedSchedule {
            entries: Vec::new(),
            hours_text: Some(HOURS_UNKNOWN_SENTINEL.to_string()),
        });
    }

    let mut ordered: Vec<&ScheduleDay> = days.to_vec();
    ordered.sort_by_key(|d| day_rank(&d.day));

    let mut entries = Vec::with_capacity(ordered.len());
    let mut readable = Vec::with_capacity(ordered.len());
    for day in ordered {
        validate_code(day, "open", day.opens_at)?;
        validate_code(day, "close", day.closes_at)?;
        entries.push(ScheduleEntry {
            day: day.day.clone(),
            open_minutes: minutes_of(day.opens_at),
            close_minutes: minutes_of(day.closes_at),
        });
        readable.push(format!(
            "{} {} - {}",
            day.day,
            clock12(day.opens_at),
            clock12(day.closes_at)
        ));
    }

    let hours_text = if readable.is_empty() {
        None
    } else {
        Some(format!("Hours: {}.", readable.join(", ")))
    };

    Ok(EncodedSchedule { entries, hours_text })
}

/// Minute of day for a valid HHMM code: `(code / 100) * 60 + code % 100`.
pub fn minutes_of(code: i64) -> i64 {
    (code / 100) * 60 + code % 100
}

fn validate_code(day: &ScheduleDay, field: &'static str, code: i64) -> Result<(), ScheduleViolation> {
    if !(0..=2359).contains(&code) || code % 100 >= 60 {
        return Err(ScheduleViolation {
            schedule_id: day.schedule_id,
            day: day.day.clone(),
            field,
            code,
        });
    }
    Ok(())
}

/// 12-hour clock rendering of a valid HHMM code, zero-padded: `930` →
/// `09:30 AM`, `1730` → `05:30 PM`, `0` → `12:00 AM`, `1200` → `12:00 PM`.
fn clock12(code: i64) -> String {
    let hours = code / 100;
    let minutes = code % 100;
    let meridiem = if hours < 12 { "AM" } else { "PM" };
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02}:{:02} {}", display_hours, minutes, meridiem)
}

fn day_rank(day: &str) -> u8 {
    match day {
        "Monday" => 0,
        "Tuesday" => 1,
        "Wednesday" => 2,
        "Thursday" => 3,
        "Friday" => 4,
        "Saturday" => 5,
        "Sunday" => 6,
        _ => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(schedule_id: i64, name: &str, opens: i64, closes: i64) -> ScheduleDay {
        ScheduleDay {
            id: 0,
            schedule_id,
            day: name.to_string(),
            opens_at: opens,
            closes_at: closes,
        }
    }

    fn known(id: i64) -> Schedule {
        Schedule {
            id,
            service_id: Some(1),
            resource_id: None,
            hours_known: true,
        }
    }

    #[test]
    fn test_minutes_of() {
        assert_eq!(minutes_of(930), 570);
        assert_eq!(minutes_of(1730), 1050);
        assert_eq!(minutes_of(0), 0);
        assert_eq!(minutes_of(2359), 1439);
    }

    #[test]
    fn test_encode_single_day() {
        let d = day(5, "Monday", 930, 1730);
        let encoded = encode(&known(5), &[&d]).unwrap();
        assert_eq!(
            encoded.entries,
            vec![ScheduleEntry {
                day: "Monday".to_string(),
                open_minutes: 570,
                close_minutes: 1050,
            }]
        );
        assert_eq!(
            encoded.hours_text.as_deref(),
            Some("Hours: Monday 09:30 AM - 05:30 PM.")
        );
    }

    #[test]
    fn test_days_order_monday_to_sunday() {
        let sun = day(1, "Sunday", 1000, 1400);
        let wed = day(1, "Wednesday", 900, 1700);
        let mon = day(1, "Monday", 800, 1200);
        let encoded = encode(&known(1), &[&sun, &wed, &mon]).unwrap();
        let days: Vec<&str> = encoded.entries.iter().map(|e| e.day.as_str()).collect();
        assert_eq!(days, vec!["Monday", "Wednesday", "Sunday"]);
        assert_eq!(
            encoded.hours_text.as_deref(),
            Some("Hours: Monday 08:00 AM - 12:00 PM, Wednesday 09:00 AM - 05:00 PM, Sunday 10:00 AM - 02:00 PM.")
        );
    }

    #[test]
    fn test_hours_unknown_sentinel_wins() {
        // Day rows present, but hours_known=false suppresses them entirely.
        let d = day(7, "Monday", 930, 1730);
        let schedule = Schedule {
            id: 7,
            service_id: Some(1),
            resource_id: None,
            hours_known: false,
        };
        let encoded = encode(&schedule, &[&d]).unwrap();
        assert!(encoded.entries.is_empty());
        assert_eq!(encoded.hours_text.as_deref(), Some(HOURS_UNKNOWN_SENTINEL));
    }

    #[test]
    fn test_known_but_empty_has_no_clause() {
        let encoded = encode(&known(2), &[]).unwrap();
        assert!(encoded.entries.is_empty());
        assert_eq!(encoded.hours_text, None);
    }

    #[test]
    fn test_midnight_and_noon() {
        let d = day(3, "Friday", 0, 1200);
        let encoded = encode(&known(3), &[&d]).unwrap();
        assert_eq!(
            encoded.hours_text.as_deref(),
            Some("Hours: Friday 12:00 AM - 12:00 PM.")
        );
        assert_eq!(encoded.entries[0].open_minutes, 0);
        assert_eq!(encoded.entries[0].close_minutes, 720);
    }

    #[test]
    fn test_invalid_codes_are_violations() {
        let too_big = day(9, "Monday", 2430, 1700);
        let err = encode(&known(9), &[&too_big]).unwrap_err();
        assert_eq!(err.schedule_id, 9);
        assert_eq!(err.field, "open");
        assert_eq!(err.code, 2430);

        let bad_minutes = day(10, "Tuesday", 900, 975);
        let err = encode(&known(10), &[&bad_minutes]).unwrap_err();
        assert_eq!(err.field, "close");
        assert_eq!(err.code, 975);

        let negative = day(11, "Wednesday", -30, 1700);
        assert!(encode(&known(11), &[&negative]).is_err());
    }
}
