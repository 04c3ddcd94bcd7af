//! Month grid shared by both widget families.
//!
//! The grid owns a cursor and a (possibly partial) selection.  Keys only
//! move the cursor; the owning widget decides what "pick" means (select
//! and close, extend a range, or wait for a confirm button).

use crate::control::dimmed;
use crate::locale::Locale;
use crate::value::{month_days, DateBounds, DateRange};
use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Single day or start/end range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarMode {
    Single,
    Range,
}

const CELL: u16 = 3;
const MONTH_WIDTH: u16 = CELL * 7;
const GAP: u16 = 2;

/// Rows a calendar needs: title, weekday header, six weeks.
pub const CALENDAR_HEIGHT: u16 = 8;

#[derive(Debug, Clone)]
pub struct Calendar {
    mode: CalendarMode,
    cursor: NaiveDate,
    bounds: DateBounds,
    selection: Option<DateRange>,
    months: u16,
}

impl Calendar {
    /// A calendar with the cursor on `today`, pulled into bounds later by
    /// [`with_bounds`](Self::with_bounds).
    pub fn new(mode: CalendarMode, today: NaiveDate) -> Self {
        Self {
            mode,
            cursor: today,
            bounds: DateBounds::default(),
            selection: None,
            months: 1,
        }
    }

    pub fn with_bounds(mut self, bounds: DateBounds) -> Self {
        self.bounds = bounds;
        self.cursor = bounds.clamp(self.cursor);
        self
    }

    /// Show `months` side by side (1 or 2).
    pub fn with_months(mut self, months: u16) -> Self {
        self.months = months.clamp(1, 2);
        self
    }

    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn selection(&self) -> Option<DateRange> {
        self.selection
    }

    /// Replace the selection and move the cursor onto its start.
    pub fn set_selection(&mut self, selection: Option<DateRange>) {
        self.selection = selection;
        if let Some(range) = selection {
            self.cursor = self.bounds.clamp(range.from);
        }
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }

    /// Move the cursor.  Returns `false` for keys the grid does not use.
    pub fn navigate(&mut self, key: &KeyEvent) -> bool {
        let moved = match key.code {
            KeyCode::Left => self.cursor.checked_sub_signed(TimeDelta::days(1)),
            KeyCode::Right => self.cursor.checked_add_signed(TimeDelta::days(1)),
            KeyCode::Up => self.cursor.checked_sub_signed(TimeDelta::days(7)),
            KeyCode::Down => self.cursor.checked_add_signed(TimeDelta::days(7)),
            KeyCode::PageUp => self.cursor.checked_sub_months(Months::new(1)),
            KeyCode::PageDown => self.cursor.checked_add_months(Months::new(1)),
            _ => return false,
        };
        if let Some(date) = moved {
            self.cursor = self.bounds.clamp(date);
        }
        true
    }

    /// Select the day under the cursor.  Returns the new selection, or
    /// `None` when the day is blocked.
    pub fn pick(&mut self) -> Option<DateRange> {
        if !self.bounds.permits(self.cursor) {
            return None;
        }
        let picked = match (self.mode, self.selection) {
            (CalendarMode::Range, Some(range)) => range.extend(self.cursor),
            _ => DateRange::starting(self.cursor),
        };
        self.selection = Some(picked);
        Some(picked)
    }

    /// Size needed to draw the configured months.
    pub fn size(&self) -> (u16, u16) {
        let width = MONTH_WIDTH * self.months + GAP * (self.months - 1);
        (width, CALENDAR_HEIGHT)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, locale: Locale) {
        let first = self.cursor.with_day(1).unwrap_or(self.cursor);
        for i in 0..self.months {
            let Some(month) = first.checked_add_months(Months::new(u32::from(i))) else {
                continue;
            };
            let x = area.x + i * (MONTH_WIDTH + GAP);
            if x >= area.right() {
                break;
            }
            let width = MONTH_WIDTH.min(area.right() - x);
            self.render_month(frame, Rect::new(x, area.y, width, area.height), month, locale);
        }
    }

    fn render_month(&self, frame: &mut Frame, area: Rect, first: NaiveDate, locale: Locale) {
        let mut lines = Vec::with_capacity(CALENDAR_HEIGHT as usize);
        lines.push(Line::from(Span::styled(
            locale.month_title(first.year(), first.month()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(
            locale
                .labels()
                .weekdays
                .iter()
                .map(|w| Span::styled(pad_cell(w), dimmed()))
                .collect::<Vec<_>>(),
        ));

        let lead = first.weekday().num_days_from_sunday() as usize;
        let mut week: Vec<Span> = vec![Span::raw("   "); lead];
        for day in month_days(first.year(), first.month(), &self.bounds) {
            week.push(Span::styled(
                format!("{:>2} ", day.date.day()),
                self.day_style(day.date, day.selectable),
            ));
            if week.len() == 7 {
                lines.push(Line::from(std::mem::take(&mut week)));
            }
        }
        if !week.is_empty() {
            lines.push(Line::from(week));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn day_style(&self, date: NaiveDate, selectable: bool) -> Style {
        let mut style = if !selectable {
            dimmed()
        } else if let Some(range) = self.selection {
            let endpoint = date == range.from || Some(date) == range.to;
            if endpoint {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if range.contains(date) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }
        } else {
            Style::default()
        };
        if date == self.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}

fn pad_cell(label: &str) -> String {
    let width = unicode_width::UnicodeWidthStr::width(label);
    format!("{label}{}", " ".repeat((CELL as usize).saturating_sub(width)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::testkit::{key, render};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn june() -> DateBounds {
        DateBounds::new(Some(d(6, 1)), Some(d(6, 30)))
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut cal = Calendar::new(CalendarMode::Single, d(5, 20)).with_bounds(june());
        assert_eq!(cal.cursor(), d(6, 1));
        cal.navigate(&key(KeyCode::Left));
        assert_eq!(cal.cursor(), d(6, 1));
        cal.navigate(&key(KeyCode::PageDown));
        assert_eq!(cal.cursor(), d(6, 30));
    }

    #[test]
    fn single_pick_replaces() {
        let mut cal = Calendar::new(CalendarMode::Single, d(6, 10));
        cal.pick();
        cal.navigate(&key(KeyCode::Right));
        assert_eq!(cal.pick(), Some(DateRange::starting(d(6, 11))));
    }

    #[test]
    fn range_pick_extends_and_swaps() {
        let mut cal = Calendar::new(CalendarMode::Range, d(1, 5));
        assert_eq!(cal.pick(), Some(DateRange::starting(d(1, 5))));
        for _ in 0..4 {
            cal.navigate(&key(KeyCode::Left));
        }
        assert_eq!(cal.pick(), Some(DateRange::between(d(1, 1), d(1, 5))));
        cal.navigate(&key(KeyCode::Down));
        assert_eq!(cal.pick(), Some(DateRange::starting(d(1, 8))));
    }

    #[test]
    fn unknown_keys_are_not_consumed() {
        let mut cal = Calendar::new(CalendarMode::Single, d(6, 10));
        assert!(!cal.navigate(&key(KeyCode::Enter)));
        assert!(cal.navigate(&key(KeyCode::Up)));
        assert_eq!(cal.cursor(), d(6, 3));
    }

    #[test]
    fn renders_month_grid() {
        let cal = Calendar::new(CalendarMode::Single, d(6, 10));
        let out = render(24, CALENDAR_HEIGHT, |f, a| cal.render(f, a, Locale::EnUs));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("June 2024"));
        assert!(lines[1].starts_with("Su Mo Tu"));
        // June 2024 starts on a Saturday.
        assert!(lines[2].trim_end().ends_with(" 1"));
        assert!(out.contains("30"));
    }

    #[test]
    fn two_months_side_by_side() {
        let cal = Calendar::new(CalendarMode::Range, d(6, 10)).with_months(2);
        assert_eq!(cal.size(), (44, CALENDAR_HEIGHT));
        let out = render(44, CALENDAR_HEIGHT, |f, a| cal.render(f, a, Locale::EnUs));
        assert!(out.lines().next().unwrap().contains("July 2024"));
    }
}
