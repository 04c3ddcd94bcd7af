//! Display formats and fixed UI strings.
//!
//! Only presentation depends on the locale.  Parsing and the values
//! handed to callers do not.

use crate::value::{TimeFormat, TimeOfDay};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Presentation locale for dates and built-in labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// Simplified Chinese.
    #[default]
    ZhCn,
    /// US English.
    EnUs,
}

/// Built-in strings for dialogs and placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub confirm: &'static str,
    pub cancel: &'static str,
    pub next: &'static str,
    pub loading: &'static str,
    pub pick_date: &'static str,
    pub pick_time: &'static str,
    pub pick_range: &'static str,
    pub pick_datetime_range: &'static str,
    pub pick_option: &'static str,
    pub start_time: &'static str,
    pub end_time: &'static str,
    pub weekdays: [&'static str; 7],
}

const ZH_CN: Labels = Labels {
    confirm: "确定",
    cancel: "取消",
    next: "下一步",
    loading: "加载中...",
    pick_date: "选择日期",
    pick_time: "选择时间",
    pick_range: "选择日期范围",
    pick_datetime_range: "选择日期时间范围",
    pick_option: "请选择",
    start_time: "开始时间",
    end_time: "结束时间",
    weekdays: ["日", "一", "二", "三", "四", "五", "六"],
};

const EN_US: Labels = Labels {
    confirm: "OK",
    cancel: "Cancel",
    next: "Next",
    loading: "Loading...",
    pick_date: "Select date",
    pick_time: "Select time",
    pick_range: "Select date range",
    pick_datetime_range: "Select date-time range",
    pick_option: "Select...",
    start_time: "Start time",
    end_time: "End time",
    weekdays: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
};

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::ZhCn => &ZH_CN,
            Locale::EnUs => &EN_US,
        }
    }

    /// Long form used by the desktop date picker.
    pub fn long_date(self, date: NaiveDate) -> String {
        match self {
            Locale::ZhCn => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
            Locale::EnUs => date.format("%B %-d, %Y").to_string(),
        }
    }

    /// Short numeric form used by compact triggers.
    pub fn numeric_date(self, date: NaiveDate) -> String {
        match self {
            Locale::ZhCn => date.format("%Y/%m/%d").to_string(),
            Locale::EnUs => date.format("%m/%d/%Y").to_string(),
        }
    }

    /// Calendar header for a month.
    pub fn month_title(self, year: i32, month: u32) -> String {
        match self {
            Locale::ZhCn => format!("{year}年{month}月"),
            Locale::EnUs => NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%B %Y").to_string())
                .unwrap_or_default(),
        }
    }

    /// Numeric date plus time, for compact date-time triggers.
    pub fn date_time(self, value: NaiveDateTime, format: TimeFormat) -> String {
        format!(
            "{} {}",
            self.numeric_date(value.date()),
            TimeOfDay::from_naive(value.time()).format(format)
        )
    }
}

/// Locale-independent `yyyy-MM-dd`.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
