//! Adaptive button.

use crate::compact::MobileButton;
use crate::control::{is_activate, render_placeholder, Props};
use crate::desktop::ButtonFace;
use crate::resolver::{Acquired, Resolver};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;
use veneer_core::{Command, Component, ViewportClass};

/// Visual intent of a button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    #[default]
    Default,
    Sm,
    Lg,
    Icon,
    IconSm,
    IconLg,
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Viewport(ViewportClass),
    Acquired(Acquired),
    /// Enter or Space on a focused, enabled button.
    Pressed,
}

enum Variant {
    Desktop(ButtonFace),
    Compact(MobileButton),
}

/// A pressable label.  Stays usable while its implementation loads.
pub struct Button {
    label: String,
    variant: ButtonVariant,
    size: ButtonSize,
    props: Props,
    resolver: Resolver<Variant>,
    focus: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            props: Props::default(),
            resolver: Resolver::new(Default::default()),
            focus: false,
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.resolver = Resolver::new(props.loader.clone());
        self.props = props;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn mounted(&self) -> Option<ViewportClass> {
        self.resolver.mounted_class()
    }

    /// The compact styling this button resolves to.
    pub fn mobile_style(&self) -> MobileButton {
        MobileButton::from_style(self.variant, self.size)
    }
}

impl Component for Button {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Viewport(class) => self.resolver.resolve(class).map(Message::Acquired),
            Message::Acquired(acquired) => {
                let (variant, size) = (self.variant, self.size);
                self.resolver.accept(acquired, |class| match class {
                    ViewportClass::Regular => Variant::Desktop(ButtonFace::new(variant, size)),
                    ViewportClass::Compact => {
                        Variant::Compact(MobileButton::from_style(variant, size))
                    }
                });
                Command::none()
            }
            Message::KeyPress(key) if self.focus && !self.props.disabled && is_activate(&key) => {
                tracing::debug!(label = %self.label, "button pressed");
                Command::message(Message::Pressed)
            }
            Message::KeyPress(_) | Message::Pressed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let disabled = self.props.disabled;
        match self.resolver.widget() {
            Some(Variant::Desktop(face)) => face.render(frame, area, &self.label, self.focus, disabled),
            Some(Variant::Compact(button)) => {
                button.render(frame, area, &self.label, self.focus, disabled)
            }
            None => render_placeholder(frame, area, &self.label, disabled),
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact::{Fill, Scale, Tone};
    use crate::control::testkit::{key, render};
    use crate::resolver::Loader;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    fn pressed(button: &mut Button, code: KeyCode) -> bool {
        button
            .update(Message::KeyPress(key(code)))
            .into_messages()
            .iter()
            .any(|m| matches!(m, Message::Pressed))
    }

    fn mount(button: &mut Button, class: ViewportClass) {
        let acquired = button.update(Message::Viewport(class)).into_message().unwrap();
        button.update(acquired);
    }

    #[test]
    fn enter_and_space_press() {
        let mut button = Button::new("Save");
        mount(&mut button, ViewportClass::Regular);
        button.focus();
        assert!(pressed(&mut button, KeyCode::Enter));
        assert!(pressed(&mut button, KeyCode::Char(' ')));
        assert!(!pressed(&mut button, KeyCode::Char('x')));
    }

    #[test]
    fn unfocused_or_disabled_is_silent() {
        let mut button = Button::new("Save");
        mount(&mut button, ViewportClass::Regular);
        assert!(!pressed(&mut button, KeyCode::Enter));
        button.focus();
        button.set_disabled(true);
        assert!(!pressed(&mut button, KeyCode::Enter));
    }

    #[test]
    fn presses_while_loading() {
        let loader = Loader::deferred(|_| Box::pin(async { Ok(()) }));
        let mut button = Button::new("Book").with_props(Props::default().with_loader(loader));
        let cmd = button.update(Message::Viewport(ViewportClass::Compact));
        assert!(cmd.is_future());
        assert_eq!(button.mounted(), None);
        button.focus();
        assert!(pressed(&mut button, KeyCode::Enter));
        let text = render(12, 3, |frame, area| button.view(frame, area));
        assert!(text.contains("Book"));
    }

    #[test]
    fn compact_style_follows_variant() {
        let mut button = Button::new("Delete")
            .with_variant(ButtonVariant::Destructive)
            .with_size(ButtonSize::Sm);
        mount(&mut button, ViewportClass::Compact);
        assert_eq!(button.mounted(), Some(ViewportClass::Compact));
        assert_eq!(
            button.mobile_style(),
            MobileButton {
                tone: Tone::Danger,
                fill: Fill::Solid,
                scale: Scale::Small,
            }
        );
        let text = render(16, 1, |frame, area| button.view(frame, area));
        assert!(text.contains("Delete"));
    }
}
