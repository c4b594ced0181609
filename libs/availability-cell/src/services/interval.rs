use std::sync::LazyLock;

use regex::Regex;

use crate::models::{AppointmentRecord, AvailabilityError};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

// HH:MM, optionally followed by the :SS Postgres appends to `time` columns.
static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)(?::[0-5]\d)?$").expect("clock time pattern is valid")
});

/// Parses a wall-clock `"HH:MM"` into minutes since midnight.
pub fn parse_time(text: &str) -> Result<u32, AvailabilityError> {
    let malformed = || AvailabilityError::MalformedTime(text.to_string());

    let captures = CLOCK_TIME.captures(text.trim()).ok_or_else(malformed)?;
    let hours: u32 = captures[1].parse().map_err(|_| malformed())?;
    let minutes: u32 = captures[2].parse().map_err(|_| malformed())?;

    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as `"HH:MM"`. Values past midnight keep counting hours.
pub fn format_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Half-open `[start, end)` range in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInterval {
    pub start: u32,
    pub end: u32,
}

impl TimeInterval {
    pub fn new(start: u32, duration: i64) -> Result<Self, AvailabilityError> {
        let invalid = AvailabilityError::InvalidInterval { start, duration };

        if start >= MINUTES_PER_DAY {
            return Err(invalid);
        }
        let duration = u32::try_from(duration).ok().filter(|d| *d > 0).ok_or(invalid)?;

        Ok(Self {
            start,
            end: start.saturating_add(duration),
        })
    }

    /// Builds the interval a booked appointment occupies; null durations count as an hour.
    pub fn from_record(record: &AppointmentRecord) -> Result<Self, AvailabilityError> {
        let time = record
            .time
            .as_deref()
            .ok_or_else(|| AvailabilityError::MalformedTime(String::new()))?;

        Self::new(parse_time(time)?, i64::from(record.duration_minutes()))
    }

    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        overlaps(self, other)
    }
}

/// Two half-open intervals intersect iff each starts before the other ends.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_times() {
        assert_eq!(parse_time("00:00"), Ok(0));
        assert_eq!(parse_time("06:30"), Ok(390));
        assert_eq!(parse_time("23:59"), Ok(1439));
        assert_eq!(parse_time("09:15:00"), Ok(555));
    }

    #[test]
    fn rejects_malformed_times() {
        for text in ["24:00", "12:60", "9:00", "ab:cd", "", "12:00x", "12-00"] {
            assert_eq!(
                parse_time(text),
                Err(AvailabilityError::MalformedTime(text.to_string())),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_time(390), "06:30");
        assert_eq!(format_time(1230), "20:30");
        assert_eq!(format_time(0), "00:00");
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let morning = TimeInterval::new(540, 30).unwrap();
        let next = TimeInterval::new(570, 30).unwrap();

        assert!(!overlaps(&morning, &next));
        assert!(!overlaps(&next, &morning));
    }

    #[test]
    fn nested_intervals_overlap() {
        let outer = TimeInterval::new(540, 120).unwrap();
        let inner = TimeInterval::new(600, 15).unwrap();

        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn zero_or_negative_duration_is_rejected() {
        assert!(TimeInterval::new(600, 0).is_err());
        assert!(TimeInterval::new(600, -15).is_err());
        assert!(TimeInterval::new(MINUTES_PER_DAY, 30).is_err());
    }

    #[test]
    fn record_without_duration_lasts_an_hour() {
        let record = AppointmentRecord::new("10:00", None);
        let interval = TimeInterval::from_record(&record).unwrap();

        assert_eq!(interval, TimeInterval { start: 600, end: 660 });
        assert_eq!(interval.duration(), 60);
    }

    #[test]
    fn record_without_time_is_malformed() {
        let record = AppointmentRecord::default();
        assert!(matches!(
            TimeInterval::from_record(&record),
            Err(AvailabilityError::MalformedTime(_))
        ));
    }
}
