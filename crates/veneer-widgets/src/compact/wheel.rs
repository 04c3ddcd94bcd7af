//! Column wheel picker.
//!
//! Each column is a vertical strip of options with the current one in
//! the middle row.  The wheel speaks in ordered tuples of option values
//! (`["09", "30"]` for a time, `["pear"]` for a select) and leaves the
//! conversion to the control.

use crate::compact::sheet::{render_sheet, SheetChrome};
use crate::control::{dimmed, highlight, Outcome};
use crate::value::{SelectOption, TimeConstraints};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub struct Wheel {
    columns: Vec<Vec<SelectOption>>,
    cursors: Vec<usize>,
    focus: usize,
    title: String,
    cancel: String,
    confirm: String,
    open: bool,
}

impl Wheel {
    pub fn new(columns: Vec<Vec<SelectOption>>) -> Self {
        Self {
            cursors: vec![0; columns.len()],
            columns,
            focus: 0,
            title: String::new(),
            cancel: "Cancel".to_string(),
            confirm: "OK".to_string(),
            open: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Header action labels.
    pub fn with_actions(mut self, cancel: impl Into<String>, confirm: impl Into<String>) -> Self {
        self.cancel = cancel.into();
        self.confirm = confirm.into();
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_confirm_label(&mut self, confirm: impl Into<String>) {
        self.confirm = confirm.into();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show with each column on the matching value of `initial`, or on
    /// its first option.
    pub fn open(&mut self, initial: &[String]) {
        for (i, column) in self.columns.iter().enumerate() {
            self.cursors[i] = initial
                .get(i)
                .and_then(|v| column.iter().position(|o| &o.value == v))
                .unwrap_or(0);
        }
        self.focus = 0;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// The tuple under the cursors.
    pub fn current(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(&self.cursors)
            .filter_map(|(column, &i)| column.get(i).map(|o| o.value.clone()))
            .collect()
    }

    /// Left/Right pick a column, Up/Down turn it, Enter confirms, Esc
    /// cancels.  Confirm and cancel both close the wheel.
    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome<Vec<String>> {
        match key.code {
            KeyCode::Left | KeyCode::BackTab => {
                self.focus = self.focus.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Tab => {
                self.focus = (self.focus + 1).min(self.columns.len().saturating_sub(1));
            }
            KeyCode::Up => {
                if let Some(cursor) = self.cursors.get_mut(self.focus) {
                    *cursor = cursor.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                let len = self.columns.get(self.focus).map_or(0, Vec::len);
                if let Some(cursor) = self.cursors.get_mut(self.focus) {
                    *cursor = (*cursor + 1).min(len.saturating_sub(1));
                }
            }
            KeyCode::Enter => {
                let value = self.current();
                // An empty column has nothing to confirm.
                if value.len() == self.columns.len() {
                    self.open = false;
                    return Outcome::Confirmed(value);
                }
            }
            KeyCode::Esc => {
                self.open = false;
                return Outcome::Dismissed;
            }
            _ => {}
        }
        Outcome::Pending
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.open {
            return;
        }
        let body = render_sheet(
            frame,
            SheetChrome {
                title: &self.title,
                cancel: &self.cancel,
                confirm: &self.confirm,
                confirm_enabled: Some(true),
            },
        );
        if self.columns.is_empty() || body.height == 0 {
            return;
        }
        let constraints = vec![Constraint::Fill(1); self.columns.len()];
        let areas = Layout::horizontal(constraints).split(body);
        for (i, area) in areas.iter().enumerate() {
            self.render_column(frame, *area, i);
        }
    }

    fn render_column(&self, frame: &mut Frame, area: Rect, index: usize) {
        let column = &self.columns[index];
        let cursor = self.cursors[index];
        let middle = area.height / 2;
        let mut lines = Vec::with_capacity(area.height as usize);
        for row in 0..area.height {
            let offset = i64::from(row) - i64::from(middle);
            let option = usize::try_from(cursor as i64 + offset)
                .ok()
                .and_then(|i| column.get(i));
            let line = match option {
                Some(option) if offset == 0 => {
                    let mut style = highlight();
                    if index == self.focus {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Line::from(Span::styled(format!(" {} ", option.label), style))
                }
                Some(option) => {
                    let style = if offset.abs() == 1 {
                        Style::default()
                    } else {
                        dimmed()
                    };
                    Line::from(Span::styled(option.label.clone(), style))
                }
                None => Line::default(),
            };
            lines.push(line);
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

/// Wheel columns for a time picker, zero-padded.
pub fn time_wheel_columns(constraints: &TimeConstraints) -> Vec<Vec<SelectOption>> {
    constraints
        .columns()
        .into_iter()
        .map(|column| {
            column
                .into_iter()
                .map(|v| {
                    let text = format!("{v:02}");
                    SelectOption::new(text.clone(), text)
                })
                .collect()
        })
        .collect()
}
