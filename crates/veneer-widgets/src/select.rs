//! Adaptive single-choice select.
//!
//! Regular viewports get an option list dropped below the trigger;
//! compact viewports get a one-column wheel sheet.  Both report the chosen
//! option's value through [`Message::Changed`].

use crate::compact::Wheel;
use crate::control::{is_activate, render_placeholder, render_trigger, Outcome, Props, TriggerState};
use crate::desktop::OptionPopover;
use crate::resolver::{Acquired, Resolver};
use crate::store::ValueStore;
use crate::value::OptionList;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;
use veneer_core::{Command, Component, ViewportClass};

/// Messages for [`Select`].
#[derive(Debug, Clone)]
pub enum Message {
    /// Key input, handled while focused.
    KeyPress(KeyEvent),
    /// Open the list or wheel.
    Open,
    /// The viewport class changed.
    Viewport(ViewportClass),
    /// An implementation acquisition finished.
    Acquired(Acquired),
    /// Emitted when the user picks an option.
    Changed(String),
}

enum Variant {
    Desktop(OptionPopover),
    Compact(Wheel),
}

/// A select that picks its widget family from the viewport.
///
/// ```rust,ignore
/// let fruit = OptionList::from_pairs([("Apple", "apple"), ("Pear", "pear")])?;
/// let select = Select::new(fruit)
///     .with_default_value("pear")
///     .with_props(Props::default().with_placeholder("Fruit"));
/// ```
pub struct Select {
    options: OptionList,
    store: ValueStore<String>,
    props: Props,
    resolver: Resolver<Variant>,
    focus: bool,
}

impl Select {
    pub fn new(options: OptionList) -> Self {
        Self {
            options,
            store: ValueStore::default(),
            props: Props::default(),
            resolver: Resolver::new(Default::default()),
            focus: false,
        }
    }

    /// Controlled: the display follows `value` and
    /// [`set_value`](Self::set_value) only.
    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.store = ValueStore::controlled(value);
        self
    }

    /// Uncontrolled, starting from `value`.
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.store = ValueStore::uncontrolled(Some(value.into()));
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.resolver = Resolver::new(props.loader.clone());
        self.props = props;
        self
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn value(&self) -> Option<&str> {
        self.store.current().map(String::as_str)
    }

    /// Update a controlled value.
    pub fn set_value(&mut self, value: Option<String>) {
        self.store.set_external(value);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
        self.close();
    }

    pub fn is_open(&self) -> bool {
        match self.resolver.widget() {
            Some(Variant::Desktop(list)) => list.is_open(),
            Some(Variant::Compact(wheel)) => wheel.is_open(),
            None => false,
        }
    }

    /// Which family is mounted, if any.
    pub fn mounted(&self) -> Option<ViewportClass> {
        self.resolver.mounted_class()
    }

    /// Trigger text: the option's label, or the placeholder when the value
    /// matches no option.
    pub fn display_text(&self) -> &str {
        let placeholder = self.props.placeholder_or(self.props.locale.labels().pick_option);
        self.options.display(self.value(), placeholder)
    }

    fn open(&mut self) {
        if self.props.disabled {
            return;
        }
        let current = self.store.current().cloned();
        let position = current.as_deref().and_then(|v| self.options.position(v));
        match self.resolver.widget_mut() {
            Some(Variant::Desktop(list)) => list.open(position),
            Some(Variant::Compact(wheel)) => wheel.open(&current.into_iter().collect::<Vec<_>>()),
            None => {}
        }
    }

    fn close(&mut self) {
        match self.resolver.widget_mut() {
            Some(Variant::Desktop(list)) => list.close(),
            Some(Variant::Compact(wheel)) => wheel.close(),
            None => {}
        }
    }

    fn route(&mut self, key: KeyEvent) -> Command<Message> {
        let picked = match self.resolver.widget_mut() {
            Some(Variant::Desktop(list)) => match list.handle_key(key) {
                Outcome::Confirmed(index) => self.options.get(index).map(|o| o.value.clone()),
                _ => None,
            },
            Some(Variant::Compact(wheel)) => match wheel.handle_key(key) {
                Outcome::Confirmed(values) => values.into_iter().next(),
                _ => None,
            },
            None => None,
        };
        match picked {
            Some(value) => {
                tracing::debug!(%value, "select changed");
                let value = self.store.commit(Some(value));
                value.map_or_else(Command::none, |v| Command::message(Message::Changed(v)))
            }
            None => Command::none(),
        }
    }
}

fn build(class: ViewportClass, options: &OptionList, props: &Props) -> Variant {
    match class {
        ViewportClass::Regular => Variant::Desktop(OptionPopover::new(options.labels())),
        ViewportClass::Compact => {
            let column = options.iter().cloned().collect();
            let labels = props.locale.labels();
            Variant::Compact(
                Wheel::new(vec![column])
                    .with_title(props.placeholder_or(labels.pick_option))
                    .with_actions(labels.cancel, labels.confirm),
            )
        }
    }
}

impl Component for Select {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Viewport(class) => self.resolver.resolve(class).map(Message::Acquired),
            Message::Acquired(acquired) => {
                self.resolver
                    .accept(acquired, |class| build(class, &self.options, &self.props));
                Command::none()
            }
            Message::Open => {
                self.open();
                Command::none()
            }
            Message::KeyPress(key) if self.focus => {
                if self.is_open() {
                    self.route(key)
                } else {
                    if is_activate(&key) {
                        self.open();
                    }
                    Command::none()
                }
            }
            Message::KeyPress(_) | Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let labels = self.props.locale.labels();
        let Some(variant) = self.resolver.widget() else {
            let text = self.props.placeholder_or(labels.loading);
            render_placeholder(frame, area, text, self.props.disabled);
            return;
        };
        let state = TriggerState {
            has_value: self.value().and_then(|v| self.options.find(v)).is_some(),
            focused: self.focus,
            disabled: self.props.disabled,
            open: self.is_open(),
        };
        match variant {
            Variant::Desktop(list) => {
                render_trigger(frame, area, self.display_text(), "▾", state);
                list.render(frame, area);
            }
            Variant::Compact(wheel) => {
                render_trigger(frame, area, self.display_text(), "›", state);
                wheel.render(frame);
            }
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::testkit::{key, render};
    use crate::error::AcquireError;
    use crate::locale::Locale;
    use crate::resolver::Loader;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;
    use ViewportClass::{Compact, Regular};

    fn fruit() -> OptionList {
        OptionList::from_pairs([("Apple", "apple"), ("Pear", "pear"), ("Plum", "plum")]).unwrap()
    }

    fn mounted(mut select: Select, class: ViewportClass) -> Select {
        let acquired = select.update(Message::Viewport(class)).into_message().unwrap();
        select.update(acquired);
        select.focus();
        select
    }

    fn press(select: &mut Select, code: KeyCode) -> Vec<Message> {
        select.update(Message::KeyPress(key(code))).into_messages()
    }

    fn changed(messages: Vec<Message>) -> Vec<String> {
        messages
            .into_iter()
            .filter_map(|m| match m {
                Message::Changed(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn desktop_pick_notifies_and_stores() {
        let mut select = mounted(Select::new(fruit()), Regular);
        press(&mut select, KeyCode::Enter);
        assert!(select.is_open());
        press(&mut select, KeyCode::Down);
        let out = changed(press(&mut select, KeyCode::Enter));
        assert_eq!(out, vec!["pear".to_string()]);
        assert_eq!(select.value(), Some("pear"));
        assert_eq!(select.display_text(), "Pear");
        assert!(!select.is_open());
    }

    #[test]
    fn compact_pick_through_wheel() {
        let mut select = mounted(Select::new(fruit()).with_default_value("pear"), Compact);
        select.update(Message::Open);
        press(&mut select, KeyCode::Down);
        let out = changed(press(&mut select, KeyCode::Enter));
        assert_eq!(out, vec!["plum".to_string()]);
        assert_eq!(select.display_text(), "Plum");
    }

    #[test]
    fn controlled_display_ignores_picks() {
        let mut select = mounted(Select::new(fruit()).with_value(Some("apple".into())), Regular);
        select.update(Message::Open);
        press(&mut select, KeyCode::Down);
        let out = changed(press(&mut select, KeyCode::Enter));
        assert_eq!(out, vec!["pear".to_string()]);
        assert_eq!(select.display_text(), "Apple");

        select.set_value(Some("pear".into()));
        assert_eq!(select.display_text(), "Pear");
    }

    #[test]
    fn unknown_value_shows_placeholder() {
        let select = Select::new(fruit())
            .with_value(Some("banana".into()))
            .with_props(Props::default().with_placeholder("Pick a fruit"));
        assert_eq!(select.display_text(), "Pick a fruit");
    }

    #[test]
    fn disabled_never_opens() {
        let mut select = mounted(
            Select::new(fruit()).with_props(Props::default().with_disabled(true)),
            Regular,
        );
        select.update(Message::Open);
        assert!(!select.is_open());
        assert!(press(&mut select, KeyCode::Enter).is_empty());
    }

    #[test]
    fn placeholder_while_acquiring() {
        let mut select =
            Select::new(fruit()).with_props(Props::default().with_locale(Locale::EnUs));
        let _pending = select.update(Message::Viewport(Regular));
        let out = render(30, 3, |f, a| select.view(f, a));
        assert!(out.contains("Loading..."));
        select.update(Message::Open);
        assert!(!select.is_open());
    }

    #[test]
    fn flip_during_acquisition_mounts_latest() {
        let mut select = Select::new(fruit());
        let stale = select.update(Message::Viewport(Regular)).into_message().unwrap();
        let fresh = select.update(Message::Viewport(Compact)).into_message().unwrap();
        select.update(stale);
        assert_eq!(select.mounted(), None);
        select.update(fresh);
        assert_eq!(select.mounted(), Some(Compact));
    }

    #[tokio::test]
    async fn failed_acquisition_keeps_placeholder() {
        let loader = Loader::deferred(|class| {
            Box::pin(async move { Err(AcquireError::unavailable(class, "no wheel")) })
        });
        let mut select = Select::new(fruit())
            .with_props(Props::default().with_loader(loader).with_placeholder("Fruit"));
        let fut = select.update(Message::Viewport(Compact)).into_future().unwrap();
        select.update(fut.await);
        assert_eq!(select.mounted(), None);
        let out = render(30, 3, |f, a| select.view(f, a));
        assert!(out.contains("Fruit"));
    }

    #[test]
    fn renders_label_when_mounted() {
        let select = mounted(Select::new(fruit()).with_default_value("plum"), Regular);
        let out = render(30, 3, |f, a| select.view(f, a));
        assert!(out.contains("Plum ▾"));
    }
}
