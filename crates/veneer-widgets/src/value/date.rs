use chrono::{Datelike, NaiveDate};

/// Inclusive date limits.  Days outside are never selectable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

impl DateBounds {
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    /// No limits.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn permits(&self, date: NaiveDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }

    /// Pull `date` into range.  With inverted bounds the lower one wins.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        let date = match self.max {
            Some(max) if date > max => max,
            _ => date,
        };
        match self.min {
            Some(min) if date < min => min,
            _ => date,
        }
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub date: NaiveDate,
    pub selectable: bool,
}

/// Every day of `year`/`month`, flagged by `bounds`.  Empty for an invalid
/// month.
pub fn month_days(year: i32, month: u32, bounds: &DateBounds) -> Vec<MonthDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| MonthDay {
            date,
            selectable: bounds.permits(date),
        })
        .collect()
}

/// The days of `year`/`month` a user may pick.
pub fn selectable_days(year: i32, month: u32, bounds: &DateBounds) -> Vec<NaiveDate> {
    month_days(year, month, bounds)
        .into_iter()
        .filter(|d| d.selectable)
        .map(|d| d.date)
        .collect()
}
