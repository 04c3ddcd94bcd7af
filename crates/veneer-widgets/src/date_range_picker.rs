//! Adaptive date-range picker.

use crate::calendar::{Calendar, CalendarMode};
use crate::compact::CalendarSheet;
use crate::control::{is_activate, render_placeholder, render_trigger, Outcome, Props, TriggerState};
use crate::desktop::CalendarPopover;
use crate::locale::iso_date;
use crate::resolver::{Acquired, Resolver};
use crate::store::ValueStore;
use crate::value::{DateBounds, DateRange};
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
    /// Regular: every pick, partial ranges included.  Compact: on confirm,
    /// `None` when confirmed empty.
    Changed(Option<DateRange>),
}

enum Variant {
    Desktop(CalendarPopover),
    Compact(CalendarSheet),
}

/// Picks a start and end day.
///
/// The regular popover shows two months and reports each pick as it
/// happens, staying open until Esc.  The compact sheet collects both days
/// and reports once on confirm.
pub struct DateRangePicker {
    bounds: DateBounds,
    today: NaiveDate,
    store: ValueStore<DateRange>,
    props: Props,
    resolver: Resolver<Variant>,
    focus: bool,
}

impl Default for DateRangePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl DateRangePicker {
    pub fn new() -> Self {
        Self {
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

    pub fn with_value(mut self, value: Option<DateRange>) -> Self {
        self.store = ValueStore::controlled(value);
        self
    }

    pub fn with_default_value(mut self, value: DateRange) -> Self {
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

    pub fn value(&self) -> Option<DateRange> {
        self.store.current().copied()
    }

    pub fn set_value(&mut self, value: Option<DateRange>) {
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
            Some(Variant::Desktop(popover)) => popover.is_open(),
            Some(Variant::Compact(sheet)) => sheet.is_open(),
            None => false,
        }
    }

    pub fn mounted(&self) -> Option<ViewportClass> {
        self.resolver.mounted_class()
    }

    /// `start - end`, or just `start` for a half-picked range.
    pub fn display_text(&self) -> String {
        let locale = self.props.locale;
        let Some(range) = self.value() else {
            return self
                .props
                .placeholder_or(locale.labels().pick_range)
                .to_string();
        };
        let fmt = |date: NaiveDate| match self.mounted() {
            Some(ViewportClass::Compact) => locale.numeric_date(date),
            _ => iso_date(date),
        };
        match range.to {
            Some(to) => format!("{} - {}", fmt(range.from), fmt(to)),
            None => fmt(range.from),
        }
    }

    fn open(&mut self) {
        if self.props.disabled {
            return;
        }
        let selection = self.value();
        match self.resolver.widget_mut() {
            Some(Variant::Desktop(popover)) => popover.open(selection),
            Some(Variant::Compact(sheet)) => sheet.open(selection),
            None => {}
        }
    }

    fn close(&mut self) {
        match self.resolver.widget_mut() {
            Some(Variant::Desktop(popover)) => popover.close(),
            Some(Variant::Compact(sheet)) => sheet.close(),
            None => {}
        }
    }

    fn route(&mut self, key: KeyEvent) -> Command<Message> {
        let picked = match self.resolver.widget_mut() {
            Some(Variant::Desktop(popover)) => match popover.handle_key(key) {
                Outcome::Changed(range) | Outcome::Confirmed(range) => Some(Some(range)),
                _ => None,
            },
            Some(Variant::Compact(sheet)) => match sheet.handle_key(key) {
                // A half-picked range keeps the sheet open.
                Outcome::Confirmed(Some(range)) if !range.is_complete() => None,
                Outcome::Confirmed(range) => {
                    sheet.close();
                    Some(range)
                }
                _ => None,
            },
            None => None,
        };
        match picked {
            Some(range) => {
                tracing::debug!(?range, "date range changed");
                let value = self.store.commit(range);
                Command::message(Message::Changed(value))
            }
            None => Command::none(),
        }
    }
}

fn build(class: ViewportClass, bounds: DateBounds, today: NaiveDate, props: &Props) -> Variant {
    let calendar = Calendar::new(CalendarMode::Range, today).with_bounds(bounds);
    match class {
        ViewportClass::Regular => Variant::Desktop(CalendarPopover::new(calendar.with_months(2))),
        ViewportClass::Compact => {
            let mut sheet = CalendarSheet::new(calendar);
            sheet.set_title(props.placeholder_or(props.locale.labels().pick_range));
            Variant::Compact(sheet)
        }
    }
}

impl Component for DateRangePicker {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Viewport(class) => self.resolver.resolve(class).map(Message::Acquired),
            Message::Acquired(acquired) => {
                let (bounds, today) = (self.bounds, self.today);
                self.resolver
                    .accept(acquired, |class| build(class, bounds, today, &self.props));
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
        let locale = self.props.locale;
        let Some(variant) = self.resolver.widget() else {
            let text = self.props.placeholder_or(locale.labels().loading);
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
            Variant::Desktop(popover) => popover.render(frame, area, locale),
            Variant::Compact(sheet) => sheet.render(frame, locale),
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::testkit::key;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;
    use ViewportClass::{Compact, Regular};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn mounted(mut picker: DateRangePicker, class: ViewportClass) -> DateRangePicker {
        let acquired = picker.update(Message::Viewport(class)).into_message().unwrap();
        picker.update(acquired);
        picker.focus();
        picker
    }

    fn press(picker: &mut DateRangePicker, code: KeyCode) -> Vec<Option<DateRange>> {
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

    #[test]
    fn desktop_emits_every_pick() {
        let mut picker = mounted(DateRangePicker::new().with_today(d(3)), Regular);
        picker.update(Message::Open);
        assert_eq!(
            press(&mut picker, KeyCode::Enter),
            vec![Some(DateRange::starting(d(3)))]
        );
        assert_eq!(picker.display_text(), "2024-06-03");
        press(&mut picker, KeyCode::Right);
        assert_eq!(
            press(&mut picker, KeyCode::Enter),
            vec![Some(DateRange::between(d(3), d(4)))]
        );
        assert!(picker.is_open());
        assert_eq!(picker.display_text(), "2024-06-03 - 2024-06-04");
        assert!(press(&mut picker, KeyCode::Esc).is_empty());
        assert!(!picker.is_open());
    }

    #[test]
    fn compact_emits_once_on_confirm() {
        let mut picker = mounted(DateRangePicker::new().with_today(d(3)), Compact);
        picker.update(Message::Open);
        assert!(press(&mut picker, KeyCode::Char(' ')).is_empty());
        // Half a range: confirm is refused.
        assert!(press(&mut picker, KeyCode::Enter).is_empty());
        assert!(picker.is_open());
        press(&mut picker, KeyCode::Down);
        assert!(press(&mut picker, KeyCode::Char(' ')).is_empty());
        assert_eq!(
            press(&mut picker, KeyCode::Enter),
            vec![Some(DateRange::between(d(3), d(10)))]
        );
        assert!(!picker.is_open());
        assert_eq!(picker.display_text(), "2024/06/03 - 2024/06/10");
    }

    #[test]
    fn compact_empty_confirm_clears() {
        let mut picker = mounted(DateRangePicker::new().with_today(d(3)), Compact);
        picker.update(Message::Open);
        assert_eq!(press(&mut picker, KeyCode::Enter), vec![None]);
        assert!(!picker.is_open());
        assert_eq!(picker.display_text(), "选择日期范围");
    }

    #[test]
    fn compact_escape_keeps_value() {
        let mut picker = mounted(
            DateRangePicker::new()
                .with_today(d(3))
                .with_default_value(DateRange::between(d(1), d(2))),
            Compact,
        );
        picker.update(Message::Open);
        press(&mut picker, KeyCode::Right);
        assert!(press(&mut picker, KeyCode::Char(' ')).is_empty());
        assert!(press(&mut picker, KeyCode::Esc).is_empty());
        assert!(!picker.is_open());
        assert_eq!(picker.value(), Some(DateRange::between(d(1), d(2))));
    }

    #[test]
    fn disabled_emits_nothing() {
        let mut picker = mounted(
            DateRangePicker::new().with_props(Props::default().with_disabled(true)),
            Regular,
        );
        assert!(press(&mut picker, KeyCode::Enter).is_empty());
        assert!(press(&mut picker, KeyCode::Enter).is_empty());
        assert!(!picker.is_open());
    }
}
