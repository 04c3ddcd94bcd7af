use crate::error::{Error, Result};
use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Which fields a time value carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    /// `HH:mm`; seconds are always zero.
    #[default]
    HourMinute,
    /// `HH:mm:ss`.
    HourMinuteSecond,
}

impl TimeFormat {
    /// `HourMinuteSecond` when `show_second` is set.
    pub fn from_show_second(show_second: bool) -> Self {
        if show_second {
            TimeFormat::HourMinuteSecond
        } else {
            TimeFormat::HourMinute
        }
    }

    /// Whether the seconds field is meaningful.
    pub fn show_second(self) -> bool {
        self == TimeFormat::HourMinuteSecond
    }

    /// Number of wheel/list columns.
    pub fn columns(self) -> usize {
        if self.show_second() {
            3
        } else {
            2
        }
    }

    /// chrono format string.
    pub fn pattern(self) -> &'static str {
        match self {
            TimeFormat::HourMinute => "%H:%M",
            TimeFormat::HourMinuteSecond => "%H:%M:%S",
        }
    }
}

/// A wall-clock time without date or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    /// 00:00:00
    pub const MIDNIGHT: TimeOfDay = TimeOfDay {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Returns `None` if any field is out of range.
    pub fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(TimeOfDay {
            hour,
            minute,
            second,
        })
    }

    /// Hour and minute, seconds zero.
    pub fn hm(hour: u8, minute: u8) -> Option<Self> {
        Self::new(hour, minute, 0)
    }

    /// Last representable instant of a day in `format`: `23:59` or `23:59:59`.
    pub fn end_of_day(format: TimeFormat) -> Self {
        let second = if format.show_second() { 59 } else { 0 };
        TimeOfDay {
            hour: 23,
            minute: 59,
            second,
        }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn second(self) -> u8 {
        self.second
    }

    /// Drop the seconds when `format` has none.
    pub fn normalized(self, format: TimeFormat) -> Self {
        if format.show_second() {
            self
        } else {
            TimeOfDay { second: 0, ..self }
        }
    }

    /// Parse `H:m` or `H:m:s`.
    ///
    /// A missing seconds field reads as zero; in [`TimeFormat::HourMinute`]
    /// a present one is discarded.
    pub fn parse(text: &str, format: TimeFormat) -> Result<Self> {
        let invalid = || Error::InvalidTime(text.to_string());
        let parts: Vec<&str> = text.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }
        let mut fields = [0u8; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }
        let [hour, minute, second] = fields;
        TimeOfDay::new(hour, minute, second)
            .map(|t| t.normalized(format))
            .ok_or_else(invalid)
    }

    /// Zero-padded text in `format`.
    pub fn format(self, format: TimeFormat) -> String {
        match format {
            TimeFormat::HourMinute => format!("{:02}:{:02}", self.hour, self.minute),
            TimeFormat::HourMinuteSecond => {
                format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
            }
        }
    }

    /// The ordered, zero-padded tuple a compact wheel displays.
    pub fn to_columns(self, format: TimeFormat) -> Vec<String> {
        let mut columns = vec![format!("{:02}", self.hour), format!("{:02}", self.minute)];
        if format.show_second() {
            columns.push(format!("{:02}", self.second));
        }
        columns
    }

    /// Inverse of [`to_columns`](Self::to_columns).  A two-column tuple
    /// reads seconds as zero.
    pub fn from_columns(columns: &[String]) -> Option<Self> {
        let field = |i: usize| columns.get(i).and_then(|s| s.parse::<u8>().ok());
        let second = if columns.len() > 2 { field(2)? } else { 0 };
        TimeOfDay::new(field(0)?, field(1)?, second)
    }

    pub fn to_naive(self) -> NaiveTime {
        // Fields are range-checked on construction.
        NaiveTime::from_hms_opt(self.hour.into(), self.minute.into(), self.second.into())
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        TimeOfDay {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(TimeFormat::HourMinuteSecond))
    }
}

/// Which hours, minutes and seconds a time picker offers.
///
/// Both widget families build their columns from the same constraints, so
/// a value chosen on one is always representable on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeConstraints {
    pub min_hour: u8,
    pub max_hour: u8,
    pub minute_step: u8,
    pub second_step: u8,
    pub show_second: bool,
}

impl Default for TimeConstraints {
    fn default() -> Self {
        Self {
            min_hour: 0,
            max_hour: 23,
            minute_step: 1,
            second_step: 1,
            show_second: false,
        }
    }
}

impl TimeConstraints {
    /// Restrict hours to `min..=max`.
    pub fn with_hours(mut self, min: u8, max: u8) -> Self {
        self.min_hour = min;
        self.max_hour = max;
        self
    }

    pub fn with_minute_step(mut self, step: u8) -> Self {
        self.minute_step = step;
        self
    }

    pub fn with_second_step(mut self, step: u8) -> Self {
        self.second_step = step;
        self
    }

    /// Show a seconds column.
    pub fn with_seconds(mut self, show: bool) -> Self {
        self.show_second = show;
        self
    }

    pub fn format(&self) -> TimeFormat {
        TimeFormat::from_show_second(self.show_second)
    }

    /// `min_hour..=max_hour`, capped at 23.  Empty when `min > max`.
    pub fn hours(&self) -> Vec<u8> {
        (self.min_hour..=self.max_hour.min(23)).collect()
    }

    /// Multiples of the minute step below 60.
    pub fn minutes(&self) -> Vec<u8> {
        steps(self.minute_step, "minute")
    }

    /// Multiples of the second step below 60, or just `0` without a
    /// seconds column.
    pub fn seconds(&self) -> Vec<u8> {
        if self.show_second {
            steps(self.second_step, "second")
        } else {
            vec![0]
        }
    }

    /// Column values in display order: hours, minutes, and seconds when
    /// shown.
    pub fn columns(&self) -> Vec<Vec<u8>> {
        let mut columns = vec![self.hours(), self.minutes()];
        if self.show_second {
            columns.push(self.seconds());
        }
        columns
    }

    /// Whether every field of `time` is one of the offered values.
    pub fn permits(&self, time: TimeOfDay) -> bool {
        self.hours().contains(&time.hour())
            && self.minutes().contains(&time.minute())
            && self.seconds().contains(&time.second())
    }

    /// Move `time` onto the nearest offered value at or below each field,
    /// clamping the hour into range.  With no hours on offer `time` comes
    /// back unchanged.
    pub fn snap(&self, time: TimeOfDay) -> TimeOfDay {
        let (min, max) = (self.min_hour.min(23), self.max_hour.min(23));
        if min > max {
            return time;
        }
        let hour = time.hour().clamp(min, max);
        let floor = |value: u8, options: Vec<u8>| {
            options
                .into_iter()
                .rev()
                .find(|&o| o <= value)
                .unwrap_or(0)
        };
        TimeOfDay {
            hour,
            minute: floor(time.minute(), self.minutes()),
            second: floor(time.second(), self.seconds()),
        }
    }
}

// Steps that do not divide 60 still produce floor(60 / step) values; the
// gap before the hour rolls over is left as is.  Steps past 60 act as 60.
fn steps(step: u8, unit: &str) -> Vec<u8> {
    let step = step.clamp(1, 60);
    if 60 % step != 0 {
        tracing::debug!(step, unit, "step does not divide 60");
    }
    (0..60 / step).map(|i| i * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(h: u8, m: u8, s: u8) -> TimeOfDay {
        TimeOfDay::new(h, m, s).unwrap()
    }

    #[test]
    fn parse_and_format_round_trip() {
        let time = TimeOfDay::parse("14:30", TimeFormat::HourMinute).unwrap();
        assert_eq!(time, t(14, 30, 0));
        assert_eq!(time.format(TimeFormat::HourMinute), "14:30");
    }

    #[test]
    fn missing_seconds_read_as_zero() {
        let time = TimeOfDay::parse("9:05", TimeFormat::HourMinuteSecond).unwrap();
        assert_eq!(time.format(TimeFormat::HourMinuteSecond), "09:05:00");
    }

    #[test]
    fn seconds_dropped_without_seconds_column() {
        let time = TimeOfDay::parse("09:05:42", TimeFormat::HourMinute).unwrap();
        assert_eq!(time.second(), 0);
    }

    #[test]
    fn rejects_garbage() {
        for text in ["", "12", "24:00", "12:60", "ab:cd", "1:2:3:4", "12:-1", "123:00"] {
            assert!(
                TimeOfDay::parse(text, TimeFormat::HourMinute).is_err(),
                "{text:?} should not parse"
            );
        }
        assert_eq!(
            TimeOfDay::parse("x", TimeFormat::HourMinute),
            Err(Error::InvalidTime("x".into()))
        );
    }

    #[test]
    fn columns_round_trip() {
        let time = t(7, 5, 9);
        let cols = time.to_columns(TimeFormat::HourMinuteSecond);
        assert_eq!(cols, vec!["07", "05", "09"]);
        assert_eq!(TimeOfDay::from_columns(&cols), Some(time));

        let cols = time.to_columns(TimeFormat::HourMinute);
        assert_eq!(cols, vec!["07", "05"]);
        assert_eq!(TimeOfDay::from_columns(&cols), Some(t(7, 5, 0)));
    }

    #[test]
    fn end_of_day_depends_on_format() {
        assert_eq!(TimeOfDay::end_of_day(TimeFormat::HourMinute), t(23, 59, 0));
        assert_eq!(
            TimeOfDay::end_of_day(TimeFormat::HourMinuteSecond),
            t(23, 59, 59)
        );
    }

    #[test]
    fn default_constraints() {
        let c = TimeConstraints::default();
        assert_eq!(c.hours().len(), 24);
        assert_eq!(c.minutes().len(), 60);
        assert_eq!(c.seconds(), vec![0]);
        assert_eq!(c.columns().len(), 2);
    }

    #[test]
    fn restricted_hours_and_half_hour_steps() {
        let c = TimeConstraints::default()
            .with_hours(9, 18)
            .with_minute_step(30);
        assert_eq!(c.hours(), (9..=18).collect::<Vec<_>>());
        assert_eq!(c.minutes(), vec![0, 30]);
        assert!(c.permits(t(9, 30, 0)));
        assert!(!c.permits(t(8, 30, 0)));
        assert!(!c.permits(t(10, 15, 0)));
    }

    #[test]
    fn non_divisor_step_floors() {
        let c = TimeConstraints::default().with_minute_step(7);
        assert_eq!(c.minutes(), vec![0, 7, 14, 21, 28, 35, 42, 49]);
    }

    #[test]
    fn second_column() {
        let c = TimeConstraints::default()
            .with_seconds(true)
            .with_second_step(15);
        assert_eq!(c.seconds(), vec![0, 15, 30, 45]);
        assert_eq!(c.columns().len(), 3);
        assert_eq!(c.format(), TimeFormat::HourMinuteSecond);
    }

    #[test]
    fn snap_moves_onto_offered_values() {
        let c = TimeConstraints::default()
            .with_hours(9, 18)
            .with_minute_step(30);
        assert_eq!(c.snap(t(7, 45, 0)), t(9, 30, 0));
        assert_eq!(c.snap(t(20, 10, 0)), t(18, 0, 0));
        assert_eq!(c.snap(t(12, 59, 30)), t(12, 30, 0));
    }

    #[test]
    fn snap_with_inverted_hours_keeps_time() {
        let c = TimeConstraints::default().with_hours(18, 9);
        assert!(c.hours().is_empty());
        assert_eq!(c.snap(t(12, 0, 0)), t(12, 0, 0));
    }

    #[test]
    fn oversized_step_offers_the_hour_only() {
        let c = TimeConstraints::default()
            .with_minute_step(90)
            .with_seconds(true)
            .with_second_step(255);
        assert_eq!(c.minutes(), vec![0]);
        assert_eq!(c.seconds(), vec![0]);
        assert!(c.permits(t(10, 0, 0)));
    }

    #[test]
    fn naive_conversion() {
        let time = t(23, 59, 59);
        assert_eq!(TimeOfDay::from_naive(time.to_naive()), time);
    }
}
