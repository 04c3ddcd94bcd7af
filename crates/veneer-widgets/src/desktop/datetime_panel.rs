//! Desktop date-time range panel.
//!
//! One popover holds a two-month range calendar, start and end time
//! selectors, hand-entry fields for both instants, and cancel / confirm
//! actions.  Nothing is reported until confirm; the confirm action is
//! unavailable until the range and both times are known.

use crate::calendar::{Calendar, CalendarMode, CALENDAR_HEIGHT};
use crate::control::{dimmed, highlight, is_activate, popover_area, Outcome};
use crate::desktop::entry::TextEntry;
use crate::desktop::time_columns::TimeColumns;
use crate::locale::Locale;
use crate::value::range::format_date_time;
use crate::value::{
    combine, parse_date_time, DateRange, DateTimeRange, TimeConstraints, TimeFormat, TimeOfDay,
};
use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Calendar,
    StartEntry,
    StartTime,
    EndEntry,
    EndTime,
    Cancel,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Start,
    Finish,
}

const LABEL_WIDTH: u16 = 8;
const ENTRY_WIDTH: u16 = 20;

pub struct DateTimePanel {
    calendar: Calendar,
    format: TimeFormat,
    range: Option<DateRange>,
    start_time: Option<TimeOfDay>,
    end_time: Option<TimeOfDay>,
    start_entry: TextEntry,
    end_entry: TextEntry,
    start_columns: TimeColumns,
    end_columns: TimeColumns,
    focus: Field,
    open: bool,
}

impl DateTimePanel {
    pub fn new(calendar: Calendar, constraints: TimeConstraints) -> Self {
        let format = constraints.format();
        let hint = match format {
            TimeFormat::HourMinute => "yyyy-MM-dd HH:mm",
            TimeFormat::HourMinuteSecond => "yyyy-MM-dd HH:mm:ss",
        };
        Self {
            calendar: calendar.with_months(2),
            format,
            range: None,
            start_time: None,
            end_time: None,
            start_entry: TextEntry::new(hint),
            end_entry: TextEntry::new(hint),
            start_columns: TimeColumns::new(constraints),
            end_columns: TimeColumns::new(constraints),
            focus: Field::Calendar,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Seed every part from the canonical value and show.
    pub fn open(&mut self, value: Option<&DateTimeRange>) {
        self.range = value.map(DateTimeRange::dates);
        self.start_time = value.map(DateTimeRange::start_time);
        self.end_time = value.map(DateTimeRange::end_time);
        self.calendar.set_selection(self.range);
        self.sync_entries();
        self.focus = Field::Calendar;
        self.start_entry.blur();
        self.end_entry.blur();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.start_columns.close();
        self.end_columns.close();
        self.open = false;
    }

    pub fn can_confirm(&self) -> bool {
        self.value().is_some()
    }

    /// The complete value the panel would confirm.
    pub fn value(&self) -> Option<DateTimeRange> {
        Some(DateTimeRange::new(self.instant(End::Start)?, self.instant(End::Finish)?))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome<DateTimeRange> {
        if let Some((end, columns)) = self.open_columns() {
            if let Outcome::Confirmed(time) = columns.handle_key(key) {
                self.set_time(end, time);
            }
            return Outcome::Pending;
        }

        match key.code {
            KeyCode::Esc => {
                self.close();
                return Outcome::Dismissed;
            }
            KeyCode::Tab => {
                self.cycle(1);
                return Outcome::Pending;
            }
            KeyCode::BackTab => {
                self.cycle(-1);
                return Outcome::Pending;
            }
            _ => {}
        }

        match self.focus {
            Field::Calendar => {
                if !self.calendar.navigate(&key) && is_activate(&key) {
                    if let Some(range) = self.calendar.pick() {
                        self.pick_range(range);
                    }
                }
            }
            Field::StartEntry | Field::EndEntry => {
                let end = if self.focus == Field::StartEntry {
                    End::Start
                } else {
                    End::Finish
                };
                if key.code == KeyCode::Enter {
                    self.commit_entry(end);
                } else {
                    self.entry_mut(end).handle_key(key);
                }
            }
            Field::StartTime | Field::EndTime if is_activate(&key) => {
                let end = if self.focus == Field::StartTime {
                    End::Start
                } else {
                    End::Finish
                };
                let current = self.time(end);
                self.columns_mut(end).open(current);
            }
            Field::Cancel if is_activate(&key) => {
                self.close();
                return Outcome::Dismissed;
            }
            Field::Confirm if is_activate(&key) => {
                if let Some(value) = self.value() {
                    self.close();
                    return Outcome::Confirmed(value);
                }
            }
            _ => {}
        }
        Outcome::Pending
    }

    fn pick_range(&mut self, range: DateRange) {
        self.range = Some(range);
        if self.start_time.is_none() {
            self.start_time = Some(TimeOfDay::MIDNIGHT);
        }
        if range.is_complete() && self.end_time.is_none() {
            self.end_time = Some(TimeOfDay::end_of_day(self.format));
        }
        self.sync_entries();
    }

    fn set_time(&mut self, end: End, time: TimeOfDay) {
        match end {
            End::Start => self.start_time = Some(time),
            End::Finish => self.end_time = Some(time),
        }
        self.sync_entries();
    }

    // Typed text replaces one end of the range as given, even past the
    // other end.  Unparseable text and days outside the bounds revert.
    fn commit_entry(&mut self, end: End) {
        let text = self.entry_mut(end).value();
        match parse_date_time(&text, self.format) {
            Ok(instant) if !self.calendar.bounds().permits(instant.date()) => {
                tracing::debug!(%instant, "typed date outside bounds, reverting");
                self.sync_entries();
            }
            Ok(instant) => {
                let date = instant.date();
                let time = TimeOfDay::from_naive(instant.time());
                let range = match (end, self.range) {
                    (End::Start, Some(r)) => DateRange { from: date, to: r.to },
                    (End::Start, None) => DateRange::starting(date),
                    (End::Finish, Some(r)) => DateRange { from: r.from, to: Some(date) },
                    (End::Finish, None) => DateRange::between(date, date),
                };
                self.range = Some(range);
                self.calendar.set_selection(Some(range));
                self.set_time(end, time);
            }
            Err(err) => {
                tracing::debug!(%err, "reverting date-time entry");
                self.sync_entries();
            }
        }
    }

    fn sync_entries(&mut self) {
        let format = self.format;
        let start = self.instant(End::Start).map(|v| format_date_time(v, format));
        let end = self.instant(End::Finish).map(|v| format_date_time(v, format));
        self.start_entry.set_value(start.as_deref().unwrap_or(""));
        self.end_entry.set_value(end.as_deref().unwrap_or(""));
    }

    fn instant(&self, end: End) -> Option<NaiveDateTime> {
        let range = self.range?;
        match end {
            End::Start => Some(combine(range.from, self.start_time?)),
            End::Finish => Some(combine(range.to?, self.end_time?)),
        }
    }

    fn time(&self, end: End) -> Option<TimeOfDay> {
        match end {
            End::Start => self.start_time,
            End::Finish => self.end_time,
        }
    }

    fn entry_mut(&mut self, end: End) -> &mut TextEntry {
        match end {
            End::Start => &mut self.start_entry,
            End::Finish => &mut self.end_entry,
        }
    }

    fn columns_mut(&mut self, end: End) -> &mut TimeColumns {
        match end {
            End::Start => &mut self.start_columns,
            End::Finish => &mut self.end_columns,
        }
    }

    fn open_columns(&mut self) -> Option<(End, &mut TimeColumns)> {
        if self.start_columns.is_open() {
            Some((End::Start, &mut self.start_columns))
        } else if self.end_columns.is_open() {
            Some((End::Finish, &mut self.end_columns))
        } else {
            None
        }
    }

    fn fields(&self) -> Vec<Field> {
        if self.range.is_some_and(|r| r.is_complete()) {
            vec![
                Field::Calendar,
                Field::StartEntry,
                Field::StartTime,
                Field::EndEntry,
                Field::EndTime,
                Field::Cancel,
                Field::Confirm,
            ]
        } else {
            vec![Field::Calendar, Field::Cancel, Field::Confirm]
        }
    }

    fn cycle(&mut self, step: isize) {
        let fields = self.fields();
        let here = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (here + step).rem_euclid(fields.len() as isize) as usize;
        self.set_focus(fields[next]);
    }

    // Leaving an entry field commits what was typed into it.
    fn set_focus(&mut self, field: Field) {
        match self.focus {
            Field::StartEntry if field != Field::StartEntry => self.commit_entry(End::Start),
            Field::EndEntry if field != Field::EndEntry => self.commit_entry(End::Finish),
            _ => {}
        }
        self.focus = field;
        self.start_entry.blur();
        self.end_entry.blur();
        match field {
            Field::StartEntry => self.start_entry.focus(),
            Field::EndEntry => self.end_entry.focus(),
            _ => {}
        }
    }

    pub fn size(&self) -> (u16, u16) {
        let (width, height) = self.calendar.size();
        (width.max(LABEL_WIDTH + ENTRY_WIDTH + 10) + 2, height + 7)
    }

    pub fn render(&self, frame: &mut Frame, anchor: Rect, locale: Locale) {
        if !self.open {
            return;
        }
        let (width, height) = self.size();
        let area = popover_area(anchor, frame.area(), width, height);
        frame.render_widget(Clear, area);
        let block = Block::bordered();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < CALENDAR_HEIGHT {
            return;
        }

        self.calendar.render(
            frame,
            Rect {
                height: CALENDAR_HEIGHT,
                ..inner
            },
            locale,
        );
        let labels = locale.labels();
        let complete = self.range.is_some_and(|r| r.is_complete());
        let rows = [
            (End::Start, labels.start_time, Field::StartEntry, Field::StartTime),
            (End::Finish, labels.end_time, Field::EndEntry, Field::EndTime),
        ];
        let mut y = inner.y + CALENDAR_HEIGHT + 1;
        if complete {
            for (end, label, entry_field, time_field) in rows {
                if y >= inner.bottom() {
                    break;
                }
                let row = Rect::new(inner.x, y, inner.width, 1);
                self.render_time_row(frame, row, end, label, entry_field, time_field);
                y += 1;
            }
        } else {
            y += 2;
        }

        let y = y + 1;
        if y < inner.bottom() {
            let confirm_style = if !self.can_confirm() {
                dimmed()
            } else {
                self.field_style(Field::Confirm)
            };
            let line = Line::from(vec![
                Span::styled(format!("[{}]", labels.cancel), self.field_style(Field::Cancel)),
                Span::raw("  "),
                Span::styled(format!("[{}]", labels.confirm), confirm_style),
            ]);
            frame.render_widget(Paragraph::new(line), Rect::new(inner.x, y, inner.width, 1));
        }

        if self.start_columns.is_open() || self.end_columns.is_open() {
            let row = if self.start_columns.is_open() { 0 } else { 1 };
            let anchor = Rect::new(
                inner.x + LABEL_WIDTH + ENTRY_WIDTH + 1,
                inner.y + CALENDAR_HEIGHT + 1 + row,
                8,
                1,
            );
            self.start_columns.render(frame, anchor);
            self.end_columns.render(frame, anchor);
        }
    }

    fn render_time_row(
        &self,
        frame: &mut Frame,
        row: Rect,
        end: End,
        label: &str,
        entry_field: Field,
        time_field: Field,
    ) {
        frame.render_widget(
            Paragraph::new(Span::styled(label.to_string(), dimmed())),
            Rect { width: LABEL_WIDTH.min(row.width), ..row },
        );
        let entry_area = Rect::new(row.x + LABEL_WIDTH, row.y, ENTRY_WIDTH, 1).intersection(row);
        let entry = match end {
            End::Start => &self.start_entry,
            End::Finish => &self.end_entry,
        };
        entry.render(frame, entry_area);
        if self.focus == entry_field {
            frame.buffer_mut().set_style(entry_area, Style::default().add_modifier(Modifier::UNDERLINED));
        }

        let time = self
            .time(end)
            .map_or_else(|| "--:--".to_string(), |t| t.format(self.format));
        let time_area = Rect::new(row.x + LABEL_WIDTH + ENTRY_WIDTH + 1, row.y, 10, 1).intersection(row);
        frame.render_widget(
            Paragraph::new(Span::styled(format!("[{time}]"), self.field_style(time_field))),
            time_area,
        );
    }

    fn field_style(&self, field: Field) -> Style {
        if self.focus == field {
            highlight().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        }
    }
}
