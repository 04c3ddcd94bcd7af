use super::time::{TimeFormat, TimeOfDay};
use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// A possibly half-picked span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Only the start is known.
    pub fn starting(from: NaiveDate) -> Self {
        Self { from, to: None }
    }

    /// Both ends, swapped if given backwards.
    pub fn between(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            from: a.min(b),
            to: Some(a.max(b)),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.to.is_some()
    }

    /// `(from, to)` when complete, earliest first.
    pub fn ends(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.to.map(|to| (self.from.min(to), self.from.max(to)))
    }

    /// Apply a click: a complete range restarts, a half range closes.
    pub fn extend(self, date: NaiveDate) -> Self {
        match self.to {
            Some(_) => Self::starting(date),
            None => Self::between(self.from, date),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.ends() {
            Some((from, to)) => from <= date && date <= to,
            None => date == self.from,
        }
    }
}

/// A span between two date-times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateTimeRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self { from, to }
    }

    /// The calendar days the span covers.
    pub fn dates(&self) -> DateRange {
        DateRange::between(self.from.date(), self.to.date())
    }

    pub fn start_time(&self) -> TimeOfDay {
        TimeOfDay::from_naive(self.from.time())
    }

    pub fn end_time(&self) -> TimeOfDay {
        TimeOfDay::from_naive(self.to.time())
    }
}

/// A day plus a time of day.
pub fn combine(date: NaiveDate, time: TimeOfDay) -> NaiveDateTime {
    date.and_time(time.to_naive())
}

/// Parse manual `yyyy-MM-dd HH:mm[:ss]` entry.  The seconds field must
/// match `format`.
pub fn parse_date_time(text: &str, format: TimeFormat) -> Result<NaiveDateTime> {
    let pattern = match format {
        TimeFormat::HourMinute => "%Y-%m-%d %H:%M",
        TimeFormat::HourMinuteSecond => "%Y-%m-%d %H:%M:%S",
    };
    NaiveDateTime::parse_from_str(text.trim(), pattern)
        .map_err(|_| Error::InvalidDateTime(text.to_string()))
}

/// Inverse of [`parse_date_time`].
pub fn format_date_time(value: NaiveDateTime, format: TimeFormat) -> String {
    format!(
        "{} {}",
        value.format("%Y-%m-%d"),
        TimeOfDay::from_naive(value.time()).format(format)
    )
}
