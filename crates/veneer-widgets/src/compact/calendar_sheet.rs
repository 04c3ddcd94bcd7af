//! Full-screen calendar for compact date and date-range pickers.

use crate::calendar::{Calendar, CalendarMode};
use crate::compact::sheet::{render_sheet, SheetChrome};
use crate::control::Outcome;
use crate::locale::Locale;
use crate::value::DateRange;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::Frame;

/// Calendar sheet.
///
/// Single mode confirms as soon as a day is picked.  Range mode picks
/// days with Space and reports the selection on Enter, complete or not;
/// the caller decides whether a partial range closes the sheet.
pub struct CalendarSheet {
    calendar: Calendar,
    title: String,
    require_complete: bool,
    open: bool,
}

impl CalendarSheet {
    pub fn new(calendar: Calendar) -> Self {
        Self {
            calendar,
            title: String::new(),
            require_complete: false,
            open: false,
        }
    }

    /// Range mode only: show confirm as unavailable until both ends are
    /// picked, including when nothing is picked yet.
    pub fn with_require_complete(mut self, require: bool) -> Self {
        self.require_complete = require;
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn open(&mut self, selection: Option<DateRange>) {
        self.calendar.set_selection(selection);
        if selection.is_none() {
            self.calendar.clear();
        }
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome<Option<DateRange>> {
        if self.calendar.navigate(&key) {
            return Outcome::Pending;
        }
        let single = self.calendar.mode() == CalendarMode::Single;
        match key.code {
            KeyCode::Esc => {
                self.open = false;
                Outcome::Dismissed
            }
            KeyCode::Enter | KeyCode::Char(' ') if single => match self.calendar.pick() {
                Some(picked) => {
                    self.open = false;
                    Outcome::Confirmed(Some(picked))
                }
                None => Outcome::Pending,
            },
            KeyCode::Char(' ') => match self.calendar.pick() {
                Some(picked) => Outcome::Changed(Some(picked)),
                None => Outcome::Pending,
            },
            KeyCode::Enter => Outcome::Confirmed(self.calendar.selection()),
            _ => Outcome::Pending,
        }
    }

    /// Whether the header shows confirm as available.  `None` in single
    /// mode, which has no confirm state.
    pub fn confirm_enabled(&self) -> Option<bool> {
        if self.calendar.mode() != CalendarMode::Range {
            return None;
        }
        Some(match self.calendar.selection() {
            Some(range) => range.is_complete(),
            None => !self.require_complete,
        })
    }

    pub fn render(&self, frame: &mut Frame, locale: Locale) {
        if !self.open {
            return;
        }
        let labels = locale.labels();
        let body = render_sheet(
            frame,
            SheetChrome {
                title: &self.title,
                cancel: labels.cancel,
                confirm: labels.confirm,
                confirm_enabled: self.confirm_enabled(),
            },
        );
        let (width, _) = self.calendar.size();
        let x = body.x + body.width.saturating_sub(width) / 2;
        let area = Rect {
            x,
            width: width.min(body.width),
            ..body
        };
        self.calendar.render(frame, area, locale);
    }
}
