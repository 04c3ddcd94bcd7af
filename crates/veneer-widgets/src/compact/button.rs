//! Compact button: the variant and size vocabulary collapsed onto a
//! tone, a fill and a three-step scale.

use crate::button::{ButtonSize, ButtonVariant};
use crate::control::dimmed;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Default,
    Primary,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid,
    Outline,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Small,
    Middle,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileButton {
    pub tone: Tone,
    pub fill: Fill,
    pub scale: Scale,
}

impl MobileButton {
    pub fn from_style(variant: ButtonVariant, size: ButtonSize) -> Self {
        let tone = match variant {
            ButtonVariant::Default => Tone::Primary,
            ButtonVariant::Destructive => Tone::Danger,
            _ => Tone::Default,
        };
        let fill = match variant {
            ButtonVariant::Default | ButtonVariant::Destructive | ButtonVariant::Secondary => {
                Fill::Solid
            }
            ButtonVariant::Outline => Fill::Outline,
            ButtonVariant::Ghost | ButtonVariant::Link => Fill::None,
        };
        let scale = match size {
            ButtonSize::Sm | ButtonSize::IconSm => Scale::Small,
            ButtonSize::Default | ButtonSize::Icon => Scale::Middle,
            ButtonSize::Lg | ButtonSize::IconLg => Scale::Large,
        };
        Self { tone, fill, scale }
    }

    fn color(&self) -> Color {
        match self.tone {
            Tone::Default => Color::Gray,
            Tone::Primary => Color::Blue,
            Tone::Danger => Color::Red,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool, disabled: bool) {
        let color = self.color();
        let mut style = match (disabled, self.fill) {
            (true, _) => dimmed(),
            (false, Fill::Solid) => Style::default().fg(Color::White).bg(color),
            (false, Fill::Outline | Fill::None) => Style::default().fg(color),
        };
        if focused && !disabled {
            style = style.add_modifier(Modifier::BOLD);
        }
        let pad = match self.scale {
            Scale::Small => 1,
            Scale::Middle => 2,
            Scale::Large => 4,
        };
        let pad = " ".repeat(pad);
        let text = Line::from(Span::styled(format!("{pad}{label}{pad}"), style));

        let inner = if self.fill == Fill::Outline && area.height >= 3 {
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color));
            let inner = block.inner(area);
            frame.render_widget(block, area);
            inner
        } else {
            area
        };
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn variants_map_to_tone_and_fill() {
        let cases = [
            (ButtonVariant::Default, Tone::Primary, Fill::Solid),
            (ButtonVariant::Destructive, Tone::Danger, Fill::Solid),
            (ButtonVariant::Outline, Tone::Default, Fill::Outline),
            (ButtonVariant::Secondary, Tone::Default, Fill::Solid),
            (ButtonVariant::Ghost, Tone::Default, Fill::None),
            (ButtonVariant::Link, Tone::Default, Fill::None),
        ];
        for (variant, tone, fill) in cases {
            let b = MobileButton::from_style(variant, ButtonSize::Default);
            assert_eq!((b.tone, b.fill), (tone, fill), "{variant:?}");
        }
    }

    #[test]
    fn sizes_map_to_scale() {
        let cases = [
            (ButtonSize::Default, Scale::Middle),
            (ButtonSize::Sm, Scale::Small),
            (ButtonSize::Lg, Scale::Large),
            (ButtonSize::Icon, Scale::Middle),
            (ButtonSize::IconSm, Scale::Small),
            (ButtonSize::IconLg, Scale::Large),
        ];
        for (size, scale) in cases {
            assert_eq!(
                MobileButton::from_style(ButtonVariant::Default, size).scale,
                scale,
                "{size:?}"
            );
        }
    }
}
