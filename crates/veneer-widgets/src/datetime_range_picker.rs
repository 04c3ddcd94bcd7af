//! Adaptive date-time range picker.
//!
//! Regular viewports get a single [`DateTimePanel`].  Compact viewports run
//! the three-dialog flow sequenced by a [`Coordinator`]: a calendar sheet
//! for the dates, then a wheel for the start time, then the same wheel
//! for the end time.  Either way the caller hears one
//! [`Message::Changed`] per completed range and nothing on cancel.

use crate::calendar::{Calendar, CalendarMode};
use crate::compact::{time_wheel_columns, CalendarSheet, Wheel};
use crate::control::{is_activate, render_placeholder, render_trigger, Outcome, Props, TriggerState};
use crate::coordinator::{Coordinator, Step, Transition};
use crate::desktop::DateTimePanel;
use crate::resolver::{Acquired, Resolver};
use crate::store::ValueStore;
use crate::value::{format_date_time, DateBounds, DateTimeRange, TimeConstraints, TimeOfDay};
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;
use veneer_core::{Command, Component, ViewportClass};

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Open,
    Viewport(ViewportClass),
    Acquired(Acquired),
    /// Emitted once per completed range.
    Changed(DateTimeRange),
}

struct CompactFlow {
    coordinator: Coordinator,
    sheet: CalendarSheet,
    wheel: Wheel,
}

impl CompactFlow {
    fn is_open(&self) -> bool {
        !self.coordinator.is_idle()
    }

    fn close(&mut self) {
        self.coordinator.cancel();
        self.sheet.close();
        self.wheel.close();
    }

    fn open(&mut self, value: Option<&DateTimeRange>) {
        if let Transition::Advanced(_) = self.coordinator.open() {
            self.sheet.open(value.map(DateTimeRange::dates));
        }
    }

    // Show the wheel for whichever time the coordinator now wants.
    fn show_wheel(&mut self, seed: Option<TimeOfDay>, props: &Props, constraints: &TimeConstraints) {
        let locale = props.locale;
        self.wheel.set_title(self.coordinator.title(locale));
        self.wheel
            .set_confirm_label(self.coordinator.confirm_label(locale));
        let seed = seed.map(|t| t.to_columns(constraints.format()));
        self.wheel.open(&seed.unwrap_or_default());
    }

    fn handle_key(
        &mut self,
        key: KeyEvent,
        value: Option<&DateTimeRange>,
        props: &Props,
        constraints: &TimeConstraints,
    ) -> Option<DateTimeRange> {
        let transition = match self.coordinator.step() {
            Step::Idle => return None,
            Step::AwaitingDateRange => match self.sheet.handle_key(key) {
                Outcome::Dismissed => self.coordinator.cancel(),
                Outcome::Confirmed(Some(range)) => self.coordinator.confirm_range(range),
                _ => Transition::Ignored,
            },
            Step::AwaitingStartTime | Step::AwaitingEndTime => match self.wheel.handle_key(key) {
                Outcome::Dismissed => self.coordinator.cancel(),
                Outcome::Confirmed(columns) => match TimeOfDay::from_columns(&columns) {
                    Some(time) => self.coordinator.confirm_time(time),
                    None => Transition::Ignored,
                },
                _ => Transition::Ignored,
            },
        };
        match transition {
            Transition::Advanced(Step::AwaitingStartTime) => {
                self.sheet.close();
                self.show_wheel(value.map(DateTimeRange::start_time), props, constraints);
                None
            }
            Transition::Advanced(Step::AwaitingEndTime) => {
                self.show_wheel(value.map(DateTimeRange::end_time), props, constraints);
                None
            }
            Transition::Completed(range) => {
                self.wheel.close();
                Some(range)
            }
            Transition::Reset => {
                self.sheet.close();
                self.wheel.close();
                None
            }
            Transition::Advanced(_) | Transition::Ignored => None,
        }
    }

    fn render(&self, frame: &mut Frame, props: &Props) {
        match self.coordinator.step() {
            Step::AwaitingDateRange => self.sheet.render(frame, props.locale),
            Step::AwaitingStartTime | Step::AwaitingEndTime => self.wheel.render(frame),
            Step::Idle => {}
        }
    }
}

enum Variant {
    Desktop(DateTimePanel),
    Compact(CompactFlow),
}

/// Picks a start and end instant.
pub struct DateTimeRangePicker {
    constraints: TimeConstraints,
    bounds: DateBounds,
    today: NaiveDate,
    store: ValueStore<DateTimeRange>,
    props: Props,
    resolver: Resolver<Variant>,
    focus: bool,
}

impl Default for DateTimeRangePicker {
    fn default() -> Self {
        Self::new(TimeConstraints::default())
    }
}

impl DateTimeRangePicker {
    pub fn new(constraints: TimeConstraints) -> Self {
        Self {
            constraints,
            bounds: DateBounds::default(),
            today: chrono::Local::now().date_naive(),
            store: ValueStore::default(),
            props: Props::default(),
            resolver: Resolver::new(Default::default()),
            focus: false,
        }
    }

    pub fn with_bounds(mut self, bounds: DateBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_value(mut self, value: Option<DateTimeRange>) -> Self {
        self.store = ValueStore::controlled(value);
        self
    }

    pub fn with_default_value(mut self, value: DateTimeRange) -> Self {
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

    pub fn value(&self) -> Option<DateTimeRange> {
        self.store.current().copied()
    }

    pub fn set_value(&mut self, value: Option<DateTimeRange>) {
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
            Some(Variant::Desktop(panel)) => panel.is_open(),
            Some(Variant::Compact(flow)) => flow.is_open(),
            None => false,
        }
    }

    /// Step of the compact flow, `None` on regular viewports.
    pub fn step(&self) -> Option<Step> {
        match self.resolver.widget() {
            Some(Variant::Compact(flow)) => Some(flow.coordinator.step()),
            _ => None,
        }
    }

    pub fn mounted(&self) -> Option<ViewportClass> {
        self.resolver.mounted_class()
    }

    pub fn display_text(&self) -> String {
        let locale = self.props.locale;
        let format = self.constraints.format();
        let Some(range) = self.value() else {
            return self
                .props
                .placeholder_or(locale.labels().pick_datetime_range)
                .to_string();
        };
        let (from, to) = match self.mounted() {
            Some(ViewportClass::Compact) => (
                locale.date_time(range.from, format),
                locale.date_time(range.to, format),
            ),
            _ => (
                format_date_time(range.from, format),
                format_date_time(range.to, format),
            ),
        };
        format!("{from} - {to}")
    }

    fn open(&mut self) {
        if self.props.disabled {
            return;
        }
        let value = self.value();
        match self.resolver.widget_mut() {
            Some(Variant::Desktop(panel)) => panel.open(value.as_ref()),
            Some(Variant::Compact(flow)) => flow.open(value.as_ref()),
            None => {}
        }
    }

    fn close(&mut self) {
        match self.resolver.widget_mut() {
            Some(Variant::Desktop(panel)) => panel.close(),
            Some(Variant::Compact(flow)) => flow.close(),
            None => {}
        }
    }

    fn route(&mut self, key: KeyEvent) -> Command<Message> {
        let value = self.value();
        let completed = match self.resolver.widget_mut() {
            Some(Variant::Desktop(panel)) => match panel.handle_key(key) {
                Outcome::Confirmed(range) => Some(range),
                _ => None,
            },
            Some(Variant::Compact(flow)) => {
                flow.handle_key(key, value.as_ref(), &self.props, &self.constraints)
            }
            None => None,
        };
        let Some(range) = completed else {
            return Command::none();
        };
        tracing::debug!(from = %range.from, to = %range.to, "date-time range changed");
        self.store.commit(Some(range));
        Command::message(Message::Changed(range))
    }
}

fn build(
    class: ViewportClass,
    constraints: &TimeConstraints,
    bounds: DateBounds,
    today: NaiveDate,
    props: &Props,
) -> Variant {
    let calendar = Calendar::new(CalendarMode::Range, today).with_bounds(bounds);
    match class {
        ViewportClass::Regular => Variant::Desktop(DateTimePanel::new(calendar, *constraints)),
        ViewportClass::Compact => {
            let labels = props.locale.labels();
            let mut sheet = CalendarSheet::new(calendar).with_require_complete(true);
            sheet.set_title(props.placeholder_or(labels.pick_range));
            Variant::Compact(CompactFlow {
                coordinator: Coordinator::new(),
                sheet,
                wheel: Wheel::new(time_wheel_columns(constraints))
                    .with_actions(labels.cancel, labels.next),
            })
        }
    }
}

impl Component for DateTimeRangePicker {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Viewport(class) => self.resolver.resolve(class).map(Message::Acquired),
            Message::Acquired(acquired) => {
                let (bounds, today) = (self.bounds, self.today);
                self.resolver.accept(acquired, |class| {
                    build(class, &self.constraints, bounds, today, &self.props)
                });
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
            let text = self.props.placeholder_or(self.props.locale.labels().loading);
            render_placeholder(frame, area, text, self.props.disabled);
            return;
        };
        let state = TriggerState {
            has_value: self.value().is_some(),
            focused: self.focus,
            disabled: self.props.disabled,
            open: self.is_open(),
        };
        render_trigger(frame, area, &self.display_text(), "▦", state);
        match variant {
            Variant::Desktop(panel) => panel.render(frame, area, self.props.locale),
            Variant::Compact(flow) => flow.render(frame, &self.props),
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
    use crate::value::combine;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;
    use ViewportClass::{Compact, Regular};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn hm(h: u8, m: u8) -> TimeOfDay {
        TimeOfDay::hm(h, m).unwrap()
    }

    fn office() -> TimeConstraints {
        TimeConstraints::default()
            .with_hours(9, 18)
            .with_minute_step(30)
    }

    fn mounted(mut picker: DateTimeRangePicker, class: ViewportClass) -> DateTimeRangePicker {
        let acquired = picker.update(Message::Viewport(class)).into_message().unwrap();
        picker.update(acquired);
        picker.focus();
        picker
    }

    fn press(picker: &mut DateTimeRangePicker, code: KeyCode) -> Vec<DateTimeRange> {
        picker
            .update(Message::KeyPress(key(code)))
            .into_messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Changed(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    fn presses(picker: &mut DateTimeRangePicker, codes: &[KeyCode]) -> Vec<DateTimeRange> {
        codes.iter().flat_map(|&c| press(picker, c)).collect()
    }

    #[test]
    fn compact_flow_walks_three_dialogs() {
        let mut picker = mounted(DateTimeRangePicker::new(office()).with_today(d(1)), Compact);
        assert_eq!(picker.step(), Some(Step::Idle));
        press(&mut picker, KeyCode::Enter);
        assert_eq!(picker.step(), Some(Step::AwaitingDateRange));

        // 1st through 5th.
        let emitted = presses(
            &mut picker,
            &[
                KeyCode::Char(' '),
                KeyCode::Right,
                KeyCode::Right,
                KeyCode::Right,
                KeyCode::Right,
                KeyCode::Char(' '),
                KeyCode::Enter,
            ],
        );
        assert!(emitted.is_empty());
        assert_eq!(picker.step(), Some(Step::AwaitingStartTime));

        // 09:00 is the first option.
        assert!(press(&mut picker, KeyCode::Enter).is_empty());
        assert_eq!(picker.step(), Some(Step::AwaitingEndTime));

        // 18:30: last hour, second minute.
        let mut keys = vec![KeyCode::Down; 9];
        keys.extend([KeyCode::Right, KeyCode::Down, KeyCode::Enter]);
        let emitted = presses(&mut picker, &keys);
        let expected = DateTimeRange::new(combine(d(1), hm(9, 0)), combine(d(5), hm(18, 30)));
        assert_eq!(emitted, vec![expected]);
        assert_eq!(picker.value(), Some(expected));
        assert!(!picker.is_open());
        assert_eq!(picker.step(), Some(Step::Idle));
    }

    #[test]
    fn compact_half_range_stays_on_dates() {
        let mut picker = mounted(DateTimeRangePicker::new(office()).with_today(d(1)), Compact);
        press(&mut picker, KeyCode::Enter);
        presses(&mut picker, &[KeyCode::Char(' '), KeyCode::Enter]);
        assert_eq!(picker.step(), Some(Step::AwaitingDateRange));
    }

    #[test]
    fn compact_confirm_unavailable_until_range_complete() {
        let mut picker = mounted(DateTimeRangePicker::new(office()).with_today(d(1)), Compact);
        let confirm = |p: &DateTimeRangePicker| match p.resolver.widget() {
            Some(Variant::Compact(flow)) => flow.sheet.confirm_enabled(),
            _ => None,
        };
        press(&mut picker, KeyCode::Enter);
        assert_eq!(confirm(&picker), Some(false));
        presses(&mut picker, &[KeyCode::Char(' '), KeyCode::Right, KeyCode::Char(' ')]);
        assert_eq!(confirm(&picker), Some(true));
    }

    #[test]
    fn compact_cancel_on_any_dialog_resets() {
        let mut picker = mounted(DateTimeRangePicker::new(office()).with_today(d(1)), Compact);
        press(&mut picker, KeyCode::Enter);
        presses(
            &mut picker,
            &[KeyCode::Char(' '), KeyCode::Right, KeyCode::Char(' '), KeyCode::Enter],
        );
        assert!(press(&mut picker, KeyCode::Enter).is_empty());
        assert_eq!(picker.step(), Some(Step::AwaitingEndTime));
        assert!(press(&mut picker, KeyCode::Esc).is_empty());
        assert_eq!(picker.step(), Some(Step::Idle));
        assert_eq!(picker.value(), None);

        // Reopening starts from the dates again.
        press(&mut picker, KeyCode::Enter);
        assert_eq!(picker.step(), Some(Step::AwaitingDateRange));
    }

    #[test]
    fn compact_wheel_seeded_from_value() {
        let value = DateTimeRange::new(combine(d(2), hm(10, 30)), combine(d(3), hm(17, 0)));
        let mut picker = mounted(
            DateTimeRangePicker::new(office())
                .with_today(d(1))
                .with_default_value(value),
            Compact,
        );
        press(&mut picker, KeyCode::Enter);
        // The sheet reopens on the current range; confirm it untouched.
        let emitted = presses(&mut picker, &[KeyCode::Enter, KeyCode::Enter, KeyCode::Enter]);
        assert_eq!(emitted, vec![value]);
    }

    #[test]
    fn compact_display_uses_locale() {
        let value = DateTimeRange::new(combine(d(2), hm(10, 30)), combine(d(3), hm(17, 0)));
        let picker = mounted(
            DateTimeRangePicker::new(office()).with_value(Some(value)),
            Compact,
        );
        assert_eq!(
            picker.display_text(),
            Locale::ZhCn.date_time(value.from, office().format())
                + " - "
                + &Locale::ZhCn.date_time(value.to, office().format())
        );
    }

    #[test]
    fn desktop_panel_confirms() {
        let mut picker = mounted(DateTimeRangePicker::default().with_today(d(3)), Regular);
        press(&mut picker, KeyCode::Enter);
        assert!(picker.is_open());
        let emitted = presses(
            &mut picker,
            &[
                KeyCode::Enter,
                KeyCode::Down,
                KeyCode::Enter,
                KeyCode::BackTab,
                KeyCode::Enter,
            ],
        );
        let expected = DateTimeRange::new(
            combine(d(3), TimeOfDay::MIDNIGHT),
            combine(d(10), hm(23, 59)),
        );
        assert_eq!(emitted, vec![expected]);
        assert!(!picker.is_open());
        assert_eq!(picker.display_text(), "2024-01-03 00:00 - 2024-01-10 23:59");
    }

    #[test]
    fn desktop_escape_emits_nothing() {
        let mut picker = mounted(DateTimeRangePicker::default().with_today(d(3)), Regular);
        press(&mut picker, KeyCode::Enter);
        assert!(presses(&mut picker, &[KeyCode::Enter, KeyCode::Esc]).is_empty());
        assert!(!picker.is_open());
        assert_eq!(picker.value(), None);
    }

    #[test]
    fn placeholder_until_mounted() {
        let picker = DateTimeRangePicker::default()
            .with_props(Props::default().with_locale(Locale::EnUs));
        let text = render(30, 3, |frame, area| picker.view(frame, area));
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn disabled_never_opens() {
        for class in [Compact, Regular] {
            let mut picker = mounted(
                DateTimeRangePicker::new(office())
                    .with_today(d(1))
                    .with_props(Props::default().with_disabled(true)),
                class,
            );
            picker.update(Message::Open);
            assert!(!picker.is_open());
            assert!(press(&mut picker, KeyCode::Enter).is_empty());
            assert!(!picker.is_open());
        }
    }

    #[test]
    fn disabling_mid_flow_resets_without_emitting() {
        let mut picker = mounted(DateTimeRangePicker::new(office()).with_today(d(1)), Compact);
        press(&mut picker, KeyCode::Enter);
        presses(
            &mut picker,
            &[KeyCode::Char(' '), KeyCode::Right, KeyCode::Char(' '), KeyCode::Enter],
        );
        assert_eq!(picker.step(), Some(Step::AwaitingStartTime));

        picker.set_disabled(true);
        assert_eq!(picker.step(), Some(Step::Idle));
        assert!(!picker.is_open());
        assert!(presses(&mut picker, &[KeyCode::Enter, KeyCode::Enter]).is_empty());
        assert_eq!(picker.value(), None);
    }

    #[test]
    fn disabling_closes_desktop_panel() {
        let mut picker = mounted(DateTimeRangePicker::default().with_today(d(3)), Regular);
        presses(&mut picker, &[KeyCode::Enter, KeyCode::Enter]);
        assert!(picker.is_open());
        picker.set_disabled(true);
        assert!(!picker.is_open());
        assert!(press(&mut picker, KeyCode::Enter).is_empty());
        assert_eq!(picker.value(), None);
    }
}
