//! Pieces every adaptive control shares: common properties, the outcome
//! type widget families report with, and trigger rendering.

use crate::locale::Locale;
use crate::resolver::Loader;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

/// Properties accepted by every control.
///
/// ```rust,ignore
/// let props = Props::default()
///     .with_placeholder("Arrival")
///     .with_locale(Locale::EnUs)
///     .with_class("booking-field");
/// let picker = TimePicker::new(TimeConstraints::default()).with_props(props);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Props {
    /// Trigger text when there is no value.  Each control falls back to a
    /// locale default.
    pub placeholder: Option<String>,
    /// Suppresses opening and therefore every change notification.
    pub disabled: bool,
    /// Opaque styling hook carried for the host; never interpreted.
    pub class: Option<String>,
    pub loader: Loader,
    pub locale: Locale,
}

impl Props {
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub(crate) fn placeholder_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.placeholder.as_deref().unwrap_or(fallback)
    }
}

/// What a widget family reports after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Still open, nothing to report.
    Pending,
    /// A live change; the widget stays open.
    Changed(T),
    /// Committed; the widget closed.
    Confirmed(T),
    /// Closed without a value.
    Dismissed,
}

pub(crate) fn is_activate(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

/// Visual state of a trigger line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TriggerState {
    pub has_value: bool,
    pub focused: bool,
    pub disabled: bool,
    pub open: bool,
}

/// Draw the closed form of a control.  Mounted widgets and the loading
/// placeholder both go through here so they occupy the same box.
pub(crate) fn render_trigger(frame: &mut Frame, area: Rect, text: &str, icon: &str, state: TriggerState) {
    let border = if state.disabled {
        Style::default().fg(Color::DarkGray)
    } else if state.focused || state.open {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let text_style = if state.disabled || !state.has_value {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let inner = if area.height >= 3 {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    } else {
        area
    };

    let mut spans = vec![Span::styled(text.to_string(), text_style)];
    if !icon.is_empty() {
        spans.push(Span::styled(format!(" {icon}"), Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Same geometry as [`render_trigger`], drawn while no implementation is
/// mounted.
pub(crate) fn render_placeholder(frame: &mut Frame, area: Rect, text: &str, disabled: bool) {
    render_trigger(
        frame,
        area,
        text,
        "",
        TriggerState {
            disabled,
            ..TriggerState::default()
        },
    );
}

/// Where a desktop popover of `width`×`height` goes: below `anchor` when it
/// fits, above otherwise, clamped to `bounds`.
pub(crate) fn popover_area(anchor: Rect, bounds: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let below = anchor.bottom();
    let y = if below + height <= bounds.bottom() {
        below
    } else if anchor.y >= bounds.y + height {
        anchor.y - height
    } else {
        bounds.bottom().saturating_sub(height)
    };
    let x = anchor.x.min(bounds.right().saturating_sub(width)).max(bounds.x);
    Rect::new(x, y, width, height)
}

pub(crate) fn highlight() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub(crate) fn dimmed() -> Style {
    Style::default().fg(Color::DarkGray)
}
