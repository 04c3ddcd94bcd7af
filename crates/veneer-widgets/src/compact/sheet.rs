use crate::control::{dimmed, highlight};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Header of a full-screen sheet.
pub(crate) struct SheetChrome<'a> {
    pub title: &'a str,
    pub cancel: &'a str,
    pub confirm: &'a str,
    /// `None` hides the confirm action entirely.
    pub confirm_enabled: Option<bool>,
}

/// Clear the whole frame, draw the header bar, return the body area.
pub(crate) fn render_sheet(frame: &mut Frame, chrome: SheetChrome<'_>) -> Rect {
    let area = frame.area();
    frame.render_widget(Clear, area);
    if area.height < 2 {
        return Rect::default();
    }
    let header = Rect { height: 1, ..area };
    frame.render_widget(
        Paragraph::new(Span::styled(chrome.cancel.to_string(), dimmed())),
        header,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            chrome.title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        header,
    );
    if let Some(enabled) = chrome.confirm_enabled {
        let style = if enabled { highlight() } else { dimmed() };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(chrome.confirm.to_string(), style)))
                .alignment(Alignment::Right),
            header,
        );
    }

    let body = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };
    let block = Block::default().borders(Borders::TOP).border_style(dimmed());
    let inner = block.inner(body);
    frame.render_widget(block, body);
    inner
}
