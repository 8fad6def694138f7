//! Round schedule
//!
//! Rounds recur every `frequency_weeks` weeks from a start date. The round
//! number for a given day is the count of whole intervals needed to reach
//! or pass it, so the start date itself is round 0.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Frequency must be at least one week")]
    ZeroFrequency,

    #[error("Unrecognized start date: {0}")]
    InvalidStartDate(String),

    #[error("Round date out of range: {weeks} weeks from {start}")]
    OutOfRange { start: NaiveDate, weeks: u32 },
}

/// A recurring meeting schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    start_date: NaiveDate,
    frequency_weeks: u32,
}

/// The round that a given day falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledRound {
    pub number: u32,
    /// First scheduled date on or after the queried day
    pub date: NaiveDate,
}

impl Schedule {
    pub fn new(start_date: NaiveDate, frequency_weeks: u32) -> Result<Self, ScheduleError> {
        if frequency_weeks == 0 {
            return Err(ScheduleError::ZeroFrequency);
        }
        Ok(Self {
            start_date,
            frequency_weeks,
        })
    }

    /// Parse the start date from `YYYY-MM-DD`, RFC 3339, or `YYYY-MM-DDTHH:MM:SS`.
    pub fn parse(start_date: &str, frequency_weeks: u32) -> Result<Self, ScheduleError> {
        let raw = start_date.trim();
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            })
            .ok_or_else(|| ScheduleError::InvalidStartDate(raw.to_string()))?;
        Self::new(date, frequency_weeks)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn interval(&self) -> Duration {
        Duration::weeks(i64::from(self.frequency_weeks))
    }

    /// Round containing `today`
    pub fn round_for(&self, today: NaiveDate) -> Result<ScheduledRound, ScheduleError> {
        if today <= self.start_date {
            return Ok(ScheduledRound {
                number: 0,
                date: self.start_date,
            });
        }

        let elapsed = (today - self.start_date).num_days();
        let step = self.interval().num_days();
        // Ceiling division: whole intervals to reach or pass today
        let intervals = (elapsed + step - 1) / step;

        let out_of_range = || ScheduleError::OutOfRange {
            start: self.start_date,
            weeks: self.frequency_weeks,
        };
        let offset = intervals
            .checked_mul(step)
            .and_then(Duration::try_days)
            .ok_or_else(out_of_range)?;
        let date = self
            .start_date
            .checked_add_signed(offset)
            .ok_or_else(out_of_range)?;

        Ok(ScheduledRound {
            number: u32::try_from(intervals).unwrap_or(u32::MAX),
            date,
        })
    }

    /// Whether `today` is exactly a scheduled date
    pub fn is_due(&self, today: NaiveDate) -> Result<bool, ScheduleError> {
        Ok(self.round_for(today)?.date == today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_zero_frequency_rejected() {
        assert_eq!(
            Schedule::new(date("2024-01-01"), 0).unwrap_err(),
            ScheduleError::ZeroFrequency
        );
    }

    #[test]
    fn test_parse_formats() {
        let plain = Schedule::parse("2024-01-08", 1).unwrap();
        let rfc = Schedule::parse("2024-01-08T09:30:00+02:00", 1).unwrap();
        let naive = Schedule::parse("2024-01-08T09:30:00", 1).unwrap();
        assert_eq!(plain.start_date(), date("2024-01-08"));
        assert_eq!(rfc.start_date(), date("2024-01-08"));
        assert_eq!(naive.start_date(), date("2024-01-08"));
    }

    #[test]
    fn test_parse_garbage_rejected() {
        assert!(matches!(
            Schedule::parse("next tuesday", 1),
            Err(ScheduleError::InvalidStartDate(_))
        ));
    }

    #[test]
    fn test_round_before_and_at_start() {
        let schedule = Schedule::new(date("2024-01-08"), 2).unwrap();
        assert_eq!(schedule.round_for(date("2024-01-01")).unwrap().number, 0);

        let at_start = schedule.round_for(date("2024-01-08")).unwrap();
        assert_eq!(at_start.number, 0);
        assert!(schedule.is_due(date("2024-01-08")).unwrap());
    }

    #[test]
    fn test_round_after_start() {
        let schedule = Schedule::new(date("2024-01-08"), 2).unwrap();

        let between = schedule.round_for(date("2024-01-10")).unwrap();
        assert_eq!(between.number, 1);
        assert_eq!(between.date, date("2024-01-22"));
        assert!(!schedule.is_due(date("2024-01-10")).unwrap());

        let on_date = schedule.round_for(date("2024-02-05")).unwrap();
        assert_eq!(on_date.number, 2);
        assert!(schedule.is_due(date("2024-02-05")).unwrap());
    }

    #[test]
    fn test_huge_frequency_is_an_error_not_a_panic() {
        let schedule = Schedule::parse("2024-01-08", 1_000_000_000).unwrap();
        let err = schedule.round_for(date("2024-01-09")).unwrap_err();
        assert!(matches!(err, ScheduleError::OutOfRange { weeks: 1_000_000_000, .. }));
        assert!(schedule.is_due(date("2024-01-09")).is_err());

        // At or before the start date no arithmetic is needed
        assert_eq!(schedule.round_for(date("2024-01-08")).unwrap().number, 0);
    }
}
