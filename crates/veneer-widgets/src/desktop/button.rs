//! Desktop button face.

use crate::button::{ButtonSize, ButtonVariant};
use crate::control::dimmed;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

/// Draws a label in the style of a [`ButtonVariant`] and [`ButtonSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonFace {
    variant: ButtonVariant,
    size: ButtonSize,
}

impl ButtonFace {
    pub fn new(variant: ButtonVariant, size: ButtonSize) -> Self {
        Self { variant, size }
    }

    pub fn variant(&self) -> ButtonVariant {
        self.variant
    }

    pub fn size(&self) -> ButtonSize {
        self.size
    }

    fn style(&self) -> Style {
        match self.variant {
            ButtonVariant::Default => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Destructive => Style::default().fg(Color::White).bg(Color::Red),
            ButtonVariant::Outline | ButtonVariant::Ghost => Style::default(),
            ButtonVariant::Secondary => Style::default().fg(Color::Black).bg(Color::Gray),
            ButtonVariant::Link => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        }
    }

    // Horizontal padding either side of the label.
    fn padding(&self) -> usize {
        match self.size {
            ButtonSize::Icon | ButtonSize::IconSm | ButtonSize::IconLg => 0,
            ButtonSize::Sm => 1,
            ButtonSize::Default => 2,
            ButtonSize::Lg => 3,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool, disabled: bool) {
        let mut style = if disabled { dimmed() } else { self.style() };
        if focused && !disabled {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let pad = " ".repeat(self.padding());
        let text = Line::from(Span::styled(format!("{pad}{label}{pad}"), style));

        let inner = if self.variant == ButtonVariant::Outline && area.height >= 3 {
            let block = Block::bordered().border_type(BorderType::Rounded);
            let inner = block.inner(area);
            frame.render_widget(block, area);
            inner
        } else {
            area
        };
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
    }
}
