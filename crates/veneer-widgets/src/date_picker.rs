//! Adaptive single-date picker.

use crate::calendar::{Calendar, CalendarMode};
use crate::compact::CalendarSheet;
use crate::control::{is_activate, render_placeholder, render_trigger, Outcome, Props, TriggerState};
use crate::desktop::CalendarPopover;
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
    /// Emitted when a day is picked.
    Changed(Option<NaiveDate>),
}

enum Variant {
    Desktop(CalendarPopover),
    Compact(CalendarSheet),
}

/// Picks one day within optional [`DateBounds`].  Picking closes the
/// calendar on both families.
pub struct DatePicker {
    bounds: DateBounds,
    today: NaiveDate,
    store: ValueStore<NaiveDate>,
    props: Props,
    resolver: Resolver<Variant>,
    focus: bool,
}

impl Default for DatePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl DatePicker {
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

    /// Day the calendar opens on when there is no value.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_value(mut self, value: Option<NaiveDate>) -> Self {
        self.store = ValueStore::controlled(value);
        self
    }

    pub fn with_default_value(mut self, value: NaiveDate) -> Self {
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

    pub fn value(&self) -> Option<NaiveDate> {
        self.store.current().copied()
    }

    pub fn set_value(&mut self, value: Option<NaiveDate>) {
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

    /// Long form on regular viewports, numeric on compact ones.
    pub fn display_text(&self) -> String {
        let locale = self.props.locale;
        match (self.value(), self.mounted()) {
            (Some(date), Some(ViewportClass::Compact)) => locale.numeric_date(date),
            (Some(date), _) => locale.long_date(date),
            (None, _) => self
                .props
                .placeholder_or(locale.labels().pick_date)
                .to_string(),
        }
    }

    fn open(&mut self) {
        if self.props.disabled {
            return;
        }
        let selection = self.value().map(DateRange::starting);
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
                Outcome::Confirmed(range) => Some(range.from),
                _ => None,
            },
            Some(Variant::Compact(sheet)) => match sheet.handle_key(key) {
                Outcome::Confirmed(range) => range.map(|r| r.from),
                _ => None,
            },
            None => None,
        };
        match picked {
            Some(date) => {
                tracing::debug!(%date, "date changed");
                let value = self.store.commit(Some(date));
                Command::message(Message::Changed(value))
            }
            None => Command::none(),
        }
    }
}

fn build(class: ViewportClass, bounds: DateBounds, today: NaiveDate, props: &Props) -> Variant {
    let calendar = Calendar::new(CalendarMode::Single, today).with_bounds(bounds);
    match class {
        ViewportClass::Regular => Variant::Desktop(CalendarPopover::new(calendar)),
        ViewportClass::Compact => {
            let mut sheet = CalendarSheet::new(calendar);
            sheet.set_title(props.placeholder_or(props.locale.labels().pick_date));
            Variant::Compact(sheet)
        }
    }
}

impl Component for DatePicker {
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
