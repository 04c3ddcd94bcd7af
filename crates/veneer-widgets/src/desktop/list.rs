//! Option list popover for the desktop select.

use crate::control::{highlight, popover_area, Outcome};
use crate::selection::SelectionState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

/// A bordered list dropped below the trigger.
pub struct OptionPopover {
    labels: Vec<String>,
    selection: SelectionState,
    max_visible: usize,
    open: bool,
}

impl OptionPopover {
    pub fn new(labels: Vec<String>) -> Self {
        let max_visible = 8;
        Self {
            selection: SelectionState::new(labels.len(), max_visible),
            labels,
            max_visible,
            open: false,
        }
    }

    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = max.max(1);
        self.selection.set_visible(self.max_visible);
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show with the cursor on `current`.
    pub fn open(&mut self, current: Option<usize>) {
        self.open = true;
        match current {
            Some(i) => self.selection.select(i),
            None => self.selection.home(),
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn cursor(&self) -> usize {
        self.selection.cursor()
    }

    /// Up/Down move, Enter picks, Esc closes.
    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome<usize> {
        match key.code {
            KeyCode::Esc => {
                self.open = false;
                Outcome::Dismissed
            }
            KeyCode::Up => {
                self.selection.move_up();
                Outcome::Pending
            }
            KeyCode::Down | KeyCode::Tab => {
                self.selection.move_down();
                Outcome::Pending
            }
            KeyCode::Home => {
                self.selection.home();
                Outcome::Pending
            }
            KeyCode::End => {
                self.selection.end();
                Outcome::Pending
            }
            KeyCode::Enter | KeyCode::Char(' ') if !self.labels.is_empty() => {
                self.open = false;
                Outcome::Confirmed(self.selection.cursor())
            }
            _ => Outcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame, anchor: Rect) {
        if !self.open || self.labels.is_empty() {
            return;
        }
        let rows = self.labels.len().min(self.max_visible) as u16;
        let area = popover_area(anchor, frame.area(), anchor.width.max(12), rows + 2);
        if area.height < 3 {
            return;
        }
        frame.render_widget(Clear, area);
        let block = Block::bordered();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        for (row, index) in self.selection.window().enumerate() {
            let Some(label) = self.labels.get(index) else {
                break;
            };
            let selected = index == self.selection.cursor();
            let (prefix, style) = if selected {
                ("▸ ", highlight())
            } else {
                ("  ", Style::default())
            };
            let row_area = Rect {
                y: inner.y + row as u16,
                height: 1,
                ..inner
            };
            if row_area.y >= inner.bottom() {
                break;
            }
            frame.render_widget(
                Paragraph::new(Span::styled(format!("{prefix}{label}"), style)),
                row_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::testkit::{key, render};

    fn fruit() -> OptionPopover {
        OptionPopover::new(vec!["Apple".into(), "Pear".into(), "Plum".into()])
    }

    #[test]
    fn opens_on_current() {
        let mut list = fruit();
        list.open(Some(2));
        assert!(list.is_open());
        assert_eq!(list.cursor(), 2);
    }

    #[test]
    fn enter_picks_and_closes() {
        let mut list = fruit();
        list.open(None);
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.handle_key(key(KeyCode::Enter)), Outcome::Confirmed(1));
        assert!(!list.is_open());
    }

    #[test]
    fn esc_dismisses() {
        let mut list = fruit();
        list.open(None);
        assert_eq!(list.handle_key(key(KeyCode::Esc)), Outcome::Dismissed);
        assert!(!list.is_open());
    }

    #[test]
    fn empty_list_cannot_pick() {
        let mut list = OptionPopover::new(vec![]);
        list.open(None);
        assert_eq!(list.handle_key(key(KeyCode::Enter)), Outcome::Pending);
    }

    #[test]
    fn renders_below_anchor() {
        let mut list = fruit();
        list.open(Some(1));
        let out = render(20, 10, |f, _| list.render(f, Rect::new(0, 0, 20, 3)));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[4].contains("  Apple"));
        assert!(lines[5].contains("▸ Pear"));
    }
}
