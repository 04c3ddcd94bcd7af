//! Hour / minute / second list columns for the desktop time picker.
//!
//! Selections are provisional until the popover closes.  Closing commits
//! only if the user touched a column and every column has a value;
//! otherwise the canonical value is left alone.

use crate::control::{dimmed, highlight, popover_area, Outcome};
use crate::selection::SelectionState;
use crate::value::{TimeConstraints, TimeOfDay};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

const VISIBLE_ROWS: usize = 6;
const COLUMN_WIDTH: u16 = 4;

pub struct TimeColumns {
    constraints: TimeConstraints,
    columns: Vec<Vec<u8>>,
    cursors: Vec<SelectionState>,
    temp: Vec<Option<u8>>,
    focus: usize,
    touched: bool,
    open: bool,
}

impl TimeColumns {
    pub fn new(constraints: TimeConstraints) -> Self {
        let columns = constraints.columns();
        let cursors = columns
            .iter()
            .map(|c| SelectionState::new(c.len(), VISIBLE_ROWS))
            .collect();
        let temp = vec![None; columns.len()];
        Self {
            constraints,
            columns,
            cursors,
            temp,
            focus: 0,
            touched: false,
            open: false,
        }
    }

    pub fn constraints(&self) -> &TimeConstraints {
        &self.constraints
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Seed the columns from `current`, snapped onto the offered options,
    /// and show.
    pub fn open(&mut self, current: Option<TimeOfDay>) {
        let current = current.map(|t| self.constraints.snap(t));
        let fields = current.map(|t| [t.hour(), t.minute(), t.second()]);
        for (i, column) in self.columns.iter().enumerate() {
            let value = fields.map(|f| f[i]);
            self.temp[i] = value;
            let index = value
                .and_then(|v| column.iter().position(|&o| o == v))
                .unwrap_or(0);
            self.cursors[i].select(index);
        }
        self.focus = 0;
        self.touched = false;
        self.open = true;
    }

    /// The provisional time, if every column has a value.
    pub fn provisional(&self) -> Option<TimeOfDay> {
        let hour = self.temp.first().copied().flatten()?;
        let minute = self.temp.get(1).copied().flatten()?;
        let second = match self.temp.get(2) {
            Some(value) => (*value)?,
            None => 0,
        };
        TimeOfDay::new(hour, minute, second)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome<TimeOfDay> {
        match key.code {
            KeyCode::Left | KeyCode::BackTab => {
                self.focus = self.focus.saturating_sub(1);
                Outcome::Pending
            }
            KeyCode::Right | KeyCode::Tab => {
                self.focus = (self.focus + 1).min(self.columns.len().saturating_sub(1));
                Outcome::Pending
            }
            KeyCode::Up => {
                self.cursors[self.focus].move_up();
                self.take_cursor();
                Outcome::Pending
            }
            KeyCode::Down => {
                self.cursors[self.focus].move_down();
                self.take_cursor();
                Outcome::Pending
            }
            KeyCode::Char(' ') => {
                self.take_cursor();
                Outcome::Pending
            }
            KeyCode::Enter | KeyCode::Esc => self.close(),
            _ => Outcome::Pending,
        }
    }

    /// Hide, committing the provisional time if it was edited and is
    /// complete.
    pub fn close(&mut self) -> Outcome<TimeOfDay> {
        self.open = false;
        match (self.touched, self.provisional()) {
            (true, Some(time)) => Outcome::Confirmed(time),
            _ => Outcome::Dismissed,
        }
    }

    fn take_cursor(&mut self) {
        let cursor = self.cursors[self.focus].cursor();
        if let Some(&value) = self.columns[self.focus].get(cursor) {
            self.temp[self.focus] = Some(value);
            self.touched = true;
        }
    }

    /// Size of the bordered popover.
    pub fn size(&self) -> (u16, u16) {
        (
            COLUMN_WIDTH * self.columns.len() as u16 + 2,
            VISIBLE_ROWS as u16 + 2,
        )
    }

    /// Draw as a popover under `anchor`.
    pub fn render(&self, frame: &mut Frame, anchor: Rect) {
        if !self.open {
            return;
        }
        let (width, height) = self.size();
        let area = popover_area(anchor, frame.area(), width, height);
        frame.render_widget(Clear, area);
        let block = Block::bordered();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.render_columns(frame, inner, true);
    }

    /// Draw the bare columns into `area`.
    pub fn render_columns(&self, frame: &mut Frame, area: Rect, active: bool) {
        for (i, column) in self.columns.iter().enumerate() {
            let x = area.x + i as u16 * COLUMN_WIDTH;
            if x >= area.right() {
                break;
            }
            let cursor = &self.cursors[i];
            let lines: Vec<Line> = cursor
                .window()
                .filter_map(|index| column.get(index).map(|&v| (index, v)))
                .map(|(index, value)| {
                    let mut style = if self.temp[i] == Some(value) {
                        highlight()
                    } else if active {
                        Style::default()
                    } else {
                        dimmed()
                    };
                    if active && i == self.focus && index == cursor.cursor() {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Line::from(Span::styled(format!(" {value:02} "), style))
                })
                .collect();
            let width = COLUMN_WIDTH.min(area.right() - x);
            frame.render_widget(Paragraph::new(lines), Rect::new(x, area.y, width, area.height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::testkit::{key, render};

    fn hm(h: u8, m: u8) -> TimeOfDay {
        TimeOfDay::hm(h, m).unwrap()
    }

    #[test]
    fn untouched_close_keeps_value() {
        let mut cols = TimeColumns::new(TimeConstraints::default());
        cols.open(Some(hm(9, 15)));
        assert_eq!(cols.handle_key(key(KeyCode::Enter)), Outcome::Dismissed);
        assert!(!cols.is_open());
    }

    #[test]
    fn edit_commits_on_close() {
        let mut cols = TimeColumns::new(TimeConstraints::default());
        cols.open(Some(hm(9, 15)));
        cols.handle_key(key(KeyCode::Down));
        assert_eq!(cols.provisional(), Some(hm(10, 15)));
        assert_eq!(cols.handle_key(key(KeyCode::Esc)), Outcome::Confirmed(hm(10, 15)));
    }

    #[test]
    fn partial_selection_does_not_commit() {
        let mut cols = TimeColumns::new(TimeConstraints::default());
        cols.open(None);
        cols.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(cols.provisional(), None);
        assert_eq!(cols.close(), Outcome::Dismissed);
    }

    #[test]
    fn fresh_selection_commits_when_complete() {
        let c = TimeConstraints::default()
            .with_hours(9, 18)
            .with_minute_step(30);
        let mut cols = TimeColumns::new(c);
        cols.open(None);
        cols.handle_key(key(KeyCode::Char(' ')));
        cols.handle_key(key(KeyCode::Right));
        cols.handle_key(key(KeyCode::Down));
        assert_eq!(cols.close(), Outcome::Confirmed(hm(9, 30)));
    }

    #[test]
    fn out_of_range_value_opens_on_nearest_option() {
        let c = TimeConstraints::default()
            .with_hours(9, 18)
            .with_minute_step(30);
        let mut cols = TimeColumns::new(c);
        cols.open(Some(hm(0, 0)));
        assert_eq!(cols.provisional(), Some(hm(9, 0)));
        cols.handle_key(key(KeyCode::Right));
        cols.handle_key(key(KeyCode::Down));
        assert_eq!(cols.handle_key(key(KeyCode::Enter)), Outcome::Confirmed(hm(9, 30)));
    }

    #[test]
    fn seconds_column_required_when_shown() {
        let mut cols = TimeColumns::new(TimeConstraints::default().with_seconds(true));
        cols.open(None);
        cols.handle_key(key(KeyCode::Char(' ')));
        cols.handle_key(key(KeyCode::Right));
        cols.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(cols.close(), Outcome::Dismissed);
    }

    #[test]
    fn renders_only_offered_minutes() {
        let c = TimeConstraints::default().with_minute_step(30);
        let mut cols = TimeColumns::new(c);
        cols.open(None);
        let out = render(12, 10, |f, _| cols.render(f, Rect::new(0, 0, 12, 1)));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].contains(" 00  00 "));
        assert!(lines[3].contains(" 01  30 "));
        assert!(!lines[4].contains("30"));
        assert_eq!(cols.size(), (10, 8));
    }
}
