//! Adaptive time-of-day picker.

use crate::compact::{time_wheel_columns, Wheel};
use crate::control::{is_activate, render_placeholder, render_trigger, Outcome, Props, TriggerState};
use crate::desktop::TimeColumns;
use crate::resolver::{Acquired, Resolver};
use crate::store::ValueStore;
use crate::value::{TimeConstraints, TimeOfDay};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;
use veneer_core::{Command, Component, ViewportClass};

/// Messages for [`TimePicker`].
#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Open,
    Viewport(ViewportClass),
    Acquired(Acquired),
    /// Emitted with the committed time.
    Changed(TimeOfDay),
}

enum Variant {
    Desktop(TimeColumns),
    Compact(Wheel),
}

/// Picks a time within [`TimeConstraints`].
///
/// On regular viewports the hour, minute and second lists sit in a
/// popover and commit when it closes, if they were edited.  On compact
/// viewports a wheel sheet commits on confirm.  Values are
/// `HH:mm` or `HH:mm:ss` depending on
/// [`show_second`](TimeConstraints::show_second).
pub struct TimePicker {
    constraints: TimeConstraints,
    store: ValueStore<TimeOfDay>,
    props: Props,
    resolver: Resolver<Variant>,
    focus: bool,
}

impl TimePicker {
    pub fn new(constraints: TimeConstraints) -> Self {
        Self {
            constraints,
            store: ValueStore::default(),
            props: Props::default(),
            resolver: Resolver::new(Default::default()),
            focus: false,
        }
    }

    pub fn with_value(mut self, value: Option<TimeOfDay>) -> Self {
        self.store = ValueStore::controlled(value);
        self
    }

    pub fn with_default_value(mut self, value: TimeOfDay) -> Self {
        self.store = ValueStore::uncontrolled(Some(value));
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

    pub fn constraints(&self) -> &TimeConstraints {
        &self.constraints
    }

    pub fn value(&self) -> Option<TimeOfDay> {
        self.store.current().copied()
    }

    pub fn set_value(&mut self, value: Option<TimeOfDay>) {
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
            Some(Variant::Desktop(columns)) => columns.is_open(),
            Some(Variant::Compact(wheel)) => wheel.is_open(),
            None => false,
        }
    }

    pub fn mounted(&self) -> Option<ViewportClass> {
        self.resolver.mounted_class()
    }

    pub fn display_text(&self) -> String {
        match self.value() {
            Some(time) => time.format(self.constraints.format()),
            None => self
                .props
                .placeholder_or(self.props.locale.labels().pick_time)
                .to_string(),
        }
    }

    fn open(&mut self) {
        if self.props.disabled {
            return;
        }
        let format = self.constraints.format();
        // An out-of-constraint value opens on the nearest permitted option.
        let current = self
            .value()
            .map(|t| self.constraints.snap(t.normalized(format)));
        match self.resolver.widget_mut() {
            Some(Variant::Desktop(columns)) => columns.open(current),
            Some(Variant::Compact(wheel)) => {
                wheel.open(&current.map(|t| t.to_columns(format)).unwrap_or_default())
            }
            None => {}
        }
    }

    fn close(&mut self) {
        match self.resolver.widget_mut() {
            // Losing the popover without Enter/Esc never commits.
            Some(Variant::Desktop(columns)) => {
                let _ = columns.close();
            }
            Some(Variant::Compact(wheel)) => wheel.close(),
            None => {}
        }
    }

    fn route(&mut self, key: KeyEvent) -> Command<Message> {
        let picked = match self.resolver.widget_mut() {
            Some(Variant::Desktop(columns)) => match columns.handle_key(key) {
                Outcome::Confirmed(time) => Some(time),
                _ => None,
            },
            Some(Variant::Compact(wheel)) => match wheel.handle_key(key) {
                Outcome::Confirmed(values) => TimeOfDay::from_columns(&values),
                _ => None,
            },
            None => None,
        };
        match picked {
            Some(time) => {
                let time = time.normalized(self.constraints.format());
                tracing::debug!(%time, "time changed");
                self.store.commit(Some(time));
                Command::message(Message::Changed(time))
            }
            None => Command::none(),
        }
    }
}

fn build(class: ViewportClass, constraints: &TimeConstraints, props: &Props) -> Variant {
    match class {
        ViewportClass::Regular => Variant::Desktop(TimeColumns::new(*constraints)),
        ViewportClass::Compact => {
            let labels = props.locale.labels();
            Variant::Compact(
                Wheel::new(time_wheel_columns(constraints))
                    .with_title(props.placeholder_or(labels.pick_time))
                    .with_actions(labels.cancel, labels.confirm),
            )
        }
    }
}

impl Component for TimePicker {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Viewport(class) => self.resolver.resolve(class).map(Message::Acquired),
            Message::Acquired(acquired) => {
                self.resolver
                    .accept(acquired, |class| build(class, &self.constraints, &self.props));
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
        let Some(variant) = self.resolver.widget() else {
            let text = self
                .props
                .placeholder_or(self.props.locale.labels().loading);
            render_placeholder(frame, area, text, self.props.disabled);
            return;
        };
        let state = TriggerState {
            has_value: self.value().is_some(),
            focused: self.focus,
            disabled: self.props.disabled,
            open: self.is_open(),
        };
        render_trigger(frame, area, &self.display_text(), "◷", state);
        match variant {
            Variant::Desktop(columns) => columns.render(frame, area),
            Variant::Compact(wheel) => wheel.render(frame),
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
    use crate::locale::Locale;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;
    use ViewportClass::{Compact, Regular};

    fn hm(h: u8, m: u8) -> TimeOfDay {
        TimeOfDay::hm(h, m).unwrap()
    }

    fn mounted(mut picker: TimePicker, class: ViewportClass) -> TimePicker {
        let acquired = picker.update(Message::Viewport(class)).into_message().unwrap();
        picker.update(acquired);
        picker.focus();
        picker
    }

    fn press(picker: &mut TimePicker, code: KeyCode) -> Vec<TimeOfDay> {
        picker
            .update(Message::KeyPress(key(code)))
            .into_messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Changed(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn office_hours() -> TimeConstraints {
        TimeConstraints::default()
            .with_hours(9, 18)
            .with_minute_step(30)
    }

    #[test]
    fn compact_wheel_commits_on_confirm() {
        let mut picker = mounted(TimePicker::new(office_hours()), Compact);
        press(&mut picker, KeyCode::Enter);
        assert!(picker.is_open());
        press(&mut picker, KeyCode::Down);
        press(&mut picker, KeyCode::Right);
        press(&mut picker, KeyCode::Down);
        assert_eq!(press(&mut picker, KeyCode::Enter), vec![hm(10, 30)]);
        assert_eq!(picker.display_text(), "10:30");
    }

    #[test]
    fn compact_cancel_emits_nothing() {
        let mut picker = mounted(TimePicker::new(office_hours()), Compact);
        picker.update(Message::Open);
        press(&mut picker, KeyCode::Down);
        assert!(press(&mut picker, KeyCode::Esc).is_empty());
        assert_eq!(picker.value(), None);
    }

    #[test]
    fn desktop_commits_edits_on_close() {
        let mut picker = mounted(
            TimePicker::new(TimeConstraints::default()).with_default_value(hm(9, 15)),
            Regular,
        );
        picker.update(Message::Open);
        press(&mut picker, KeyCode::Down);
        assert_eq!(press(&mut picker, KeyCode::Esc), vec![hm(10, 15)]);
        assert_eq!(picker.value(), Some(hm(10, 15)));
    }

    #[test]
    fn desktop_untouched_close_is_silent() {
        let mut picker = mounted(
            TimePicker::new(TimeConstraints::default()).with_default_value(hm(9, 15)),
            Regular,
        );
        picker.update(Message::Open);
        assert!(press(&mut picker, KeyCode::Enter).is_empty());
    }

    #[test]
    fn seconds_shown_and_formatted() {
        let c = TimeConstraints::default().with_seconds(true);
        let picker = TimePicker::new(c).with_value(TimeOfDay::new(8, 5, 7));
        assert_eq!(picker.display_text(), "08:05:07");
    }

    #[test]
    fn seconds_dropped_without_seconds_column() {
        let picker = TimePicker::new(TimeConstraints::default()).with_value(TimeOfDay::new(8, 5, 7));
        assert_eq!(picker.display_text(), "08:05");
    }

    #[test]
    fn wheel_seeded_from_value() {
        let mut picker = mounted(
            TimePicker::new(office_hours()).with_value(Some(hm(14, 30))),
            Compact,
        );
        picker.update(Message::Open);
        assert_eq!(press(&mut picker, KeyCode::Enter), vec![hm(14, 30)]);
        // Controlled: display unchanged until the owner updates it.
        assert_eq!(picker.value(), Some(hm(14, 30)));
    }

    #[test]
    fn renders_placeholder_text() {
        let picker = mounted(
            TimePicker::new(office_hours())
                .with_props(Props::default().with_locale(Locale::EnUs)),
            Regular,
        );
        let out = render(30, 3, |f, a| picker.view(f, a));
        assert!(out.contains("Select time"));
    }

    #[test]
    fn disabled_never_opens() {
        for class in [Compact, Regular] {
            let mut picker = mounted(
                TimePicker::new(office_hours()).with_props(Props::default().with_disabled(true)),
                class,
            );
            picker.update(Message::Open);
            assert!(!picker.is_open());
            assert!(press(&mut picker, KeyCode::Enter).is_empty());
            assert!(!picker.is_open());
        }
    }

    #[test]
    fn disabling_closes_without_committing() {
        for class in [Compact, Regular] {
            let mut picker = mounted(TimePicker::new(office_hours()), class);
            press(&mut picker, KeyCode::Enter);
            press(&mut picker, KeyCode::Down);
            picker.set_disabled(true);
            assert!(!picker.is_open());
            assert!(press(&mut picker, KeyCode::Enter).is_empty());
            assert_eq!(picker.value(), None);
        }
    }
}
