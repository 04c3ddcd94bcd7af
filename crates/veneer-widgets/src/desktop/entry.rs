//! One-line text field for typing a date-time by hand.

use crate::control::dimmed;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Default)]
pub struct TextEntry {
    value: Vec<char>,
    cursor: usize,
    placeholder: String,
    focus: bool,
}

impl TextEntry {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the text and put the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focus
    }

    /// Edit keys.  Returns `false` for keys the field does not use.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.value.drain(..self.cursor);
                self.cursor = 0;
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.value.insert(self.cursor, c);
                self.cursor += 1;
            }
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                }
            }
            (KeyCode::Delete, _) => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            (KeyCode::Left, _) => self.cursor = self.cursor.saturating_sub(1),
            (KeyCode::Right, _) => self.cursor = (self.cursor + 1).min(self.value.len()),
            (KeyCode::Home, _) => self.cursor = 0,
            (KeyCode::End, _) => self.cursor = self.value.len(),
            _ => return false,
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spans = if self.value.is_empty() && !self.focus {
            vec![Span::styled(self.placeholder.clone(), dimmed())]
        } else if self.focus {
            let before: String = self.value[..self.cursor].iter().collect();
            let at = self
                .value
                .get(self.cursor)
                .map_or_else(|| " ".to_string(), char::to_string);
            let after: String = self.value.iter().skip(self.cursor + 1).collect();
            vec![
                Span::raw(before),
                Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
                Span::raw(after),
            ]
        } else {
            vec![Span::raw(self.value())]
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
