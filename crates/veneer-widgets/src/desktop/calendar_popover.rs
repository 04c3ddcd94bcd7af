//! Calendar popover for the desktop date and date-range pickers.

use crate::calendar::{Calendar, CalendarMode};
use crate::control::{popover_area, Outcome};
use crate::locale::Locale;
use crate::value::DateRange;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;

/// A calendar dropped below the trigger.
///
/// In single mode a pick commits and closes.  In range mode every pick is
/// reported as a live [`Outcome::Changed`] and the popover stays open
/// until Esc.
pub struct CalendarPopover {
    calendar: Calendar,
    open: bool,
}

impl CalendarPopover {
    pub fn new(calendar: Calendar) -> Self {
        Self {
            calendar,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn open(&mut self, selection: Option<DateRange>) {
        self.calendar.set_selection(selection);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome<DateRange> {
        if self.calendar.navigate(&key) {
            return Outcome::Pending;
        }
        match key.code {
            KeyCode::Esc => {
                self.open = false;
                Outcome::Dismissed
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.calendar.pick() {
                Some(picked) if self.calendar.mode() == CalendarMode::Single => {
                    self.open = false;
                    Outcome::Confirmed(picked)
                }
                Some(picked) => Outcome::Changed(picked),
                None => Outcome::Pending,
            },
            _ => Outcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame, anchor: Rect, locale: Locale) {
        if !self.open {
            return;
        }
        let (width, height) = self.calendar.size();
        let area = popover_area(anchor, frame.area(), width + 2, height + 2);
        frame.render_widget(Clear, area);
        let block = Block::bordered();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.calendar.render(frame, inner, locale);
    }
}
