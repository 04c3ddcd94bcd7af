//! # Booking Form Demo
//!
//! Six adaptive controls in one form.  Narrow the terminal below 100
//! columns and every control swaps to its compact family; widen it and
//! the desktop popovers come back.  Values survive the swap.
//!
//! - `Viewport` fans the classification out to each control
//! - Keys go to the focused control while it is open
//! - Tab / Shift+Tab move focus, Esc or `q` quits when nothing is open
//!
//! Run with: `cargo run --example booking_form`

use veneer::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use veneer::ratatui::layout::{Constraint, Layout, Rect};
use veneer::ratatui::style::{Color, Modifier, Style};
use veneer::ratatui::text::{Line, Span};
use veneer::ratatui::widgets::Paragraph;
use veneer::ratatui::Frame;
use veneer::widgets::{
    button, date_picker, date_range_picker, datetime_range_picker, select, time_picker, Button,
    ButtonVariant, DatePicker, DateRangePicker, DateTimeRangePicker, Locale, OptionList, Props,
    Select, TimeConstraints, TimePicker,
};
use veneer::{
    terminal_events, viewport_changes, Breakpoint, Command, Component, Model, ProgramOptions,
    Subscription, TerminalEvent, Viewport, ViewportClass,
};

const FIELDS: usize = 6;

struct Booking {
    viewport: Viewport,
    room: Select,
    arrival: DatePicker,
    check_in: TimePicker,
    stay: DateRangePicker,
    meeting: DateTimeRangePicker,
    book: Button,
    focus: usize,
    status: String,
}

#[derive(Debug)]
enum Msg {
    Viewport(ViewportClass),
    Key(KeyEvent),
    Room(select::Message),
    Arrival(date_picker::Message),
    CheckIn(time_picker::Message),
    Stay(date_range_picker::Message),
    Meeting(datetime_range_picker::Message),
    Book(button::Message),
}

impl Booking {
    fn props(placeholder: &str) -> Props {
        Props::default()
            .with_placeholder(placeholder)
            .with_locale(Locale::EnUs)
    }

    fn focused_is_open(&self) -> bool {
        match self.focus {
            0 => self.room.is_open(),
            1 => self.arrival.is_open(),
            2 => self.check_in.is_open(),
            3 => self.stay.is_open(),
            4 => self.meeting.is_open(),
            _ => false,
        }
    }

    fn move_focus(&mut self, forward: bool) {
        self.focus = if forward {
            (self.focus + 1) % FIELDS
        } else {
            (self.focus + FIELDS - 1) % FIELDS
        };
        self.room.blur();
        self.arrival.blur();
        self.check_in.blur();
        self.stay.blur();
        self.meeting.blur();
        self.book.blur();
        match self.focus {
            0 => self.room.focus(),
            1 => self.arrival.focus(),
            2 => self.check_in.focus(),
            3 => self.stay.focus(),
            4 => self.meeting.focus(),
            _ => self.book.focus(),
        }
    }

    fn route_key(&mut self, key: KeyEvent) -> Command<Msg> {
        match self.focus {
            0 => Command::message(Msg::Room(select::Message::KeyPress(key))),
            1 => Command::message(Msg::Arrival(date_picker::Message::KeyPress(key))),
            2 => Command::message(Msg::CheckIn(time_picker::Message::KeyPress(key))),
            3 => Command::message(Msg::Stay(date_range_picker::Message::KeyPress(key))),
            4 => Command::message(Msg::Meeting(datetime_range_picker::Message::KeyPress(key))),
            _ => Command::message(Msg::Book(button::Message::KeyPress(key))),
        }
    }

    fn draw_field(&self, index: usize, frame: &mut Frame, area: Rect) {
        match index {
            0 => self.room.view(frame, area),
            1 => self.arrival.view(frame, area),
            2 => self.check_in.view(frame, area),
            3 => self.stay.view(frame, area),
            4 => self.meeting.view(frame, area),
            _ => self.book.view(frame, area),
        }
    }

    fn summary(&self) -> String {
        format!(
            "{} | {} {} | {} | {}",
            self.room.display_text(),
            self.arrival.display_text(),
            self.check_in.display_text(),
            self.stay.display_text(),
            self.meeting.display_text(),
        )
    }
}

impl Model for Booking {
    type Message = Msg;
    type Flags = Viewport;

    fn init(viewport: Viewport) -> (Self, Command<Msg>) {
        let rooms = OptionList::from_pairs([
            ("Single", "single"),
            ("Double", "double"),
            ("Suite", "suite"),
        ])
        .unwrap_or_default();
        let hours = TimeConstraints::default()
            .with_hours(14, 22)
            .with_minute_step(15);
        let mut room = Select::new(rooms).with_props(Self::props("Room type"));
        room.focus();
        (
            Booking {
                viewport,
                room,
                arrival: DatePicker::new().with_props(Self::props("Arrival day")),
                check_in: TimePicker::new(hours).with_props(Self::props("Check-in time")),
                stay: DateRangePicker::new().with_props(Self::props("Stay")),
                meeting: DateTimeRangePicker::default().with_props(Self::props("Meeting room")),
                book: Button::new("Book").with_variant(ButtonVariant::Default),
                focus: 0,
                status: String::new(),
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Viewport(class) => Command::batch([
                self.room.update(select::Message::Viewport(class)).map(Msg::Room),
                self.arrival
                    .update(date_picker::Message::Viewport(class))
                    .map(Msg::Arrival),
                self.check_in
                    .update(time_picker::Message::Viewport(class))
                    .map(Msg::CheckIn),
                self.stay
                    .update(date_range_picker::Message::Viewport(class))
                    .map(Msg::Stay),
                self.meeting
                    .update(datetime_range_picker::Message::Viewport(class))
                    .map(Msg::Meeting),
                self.book.update(button::Message::Viewport(class)).map(Msg::Book),
            ]),
            Msg::Key(key) => {
                if self.focused_is_open() {
                    return self.route_key(key);
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Command::quit(),
                    (KeyCode::Esc | KeyCode::Char('q'), _) => Command::quit(),
                    (KeyCode::Tab, _) => {
                        self.move_focus(true);
                        Command::none()
                    }
                    (KeyCode::BackTab, _) => {
                        self.move_focus(false);
                        Command::none()
                    }
                    _ => self.route_key(key),
                }
            }
            Msg::Room(select::Message::Changed(value)) => {
                self.status = format!("room: {value}");
                Command::none()
            }
            Msg::Arrival(date_picker::Message::Changed(date)) => {
                self.status = format!("arrival: {date:?}");
                Command::none()
            }
            Msg::CheckIn(time_picker::Message::Changed(time)) => {
                self.status = format!("check-in: {time}");
                Command::none()
            }
            Msg::Stay(date_range_picker::Message::Changed(range)) => {
                self.status = format!("stay: {range:?}");
                Command::none()
            }
            Msg::Meeting(datetime_range_picker::Message::Changed(range)) => {
                self.status = format!("meeting: {} to {}", range.from, range.to);
                Command::none()
            }
            Msg::Book(button::Message::Pressed) => {
                self.status = format!("booked: {}", self.summary());
                Command::none()
            }
            Msg::Room(m) => self.room.update(m).map(Msg::Room),
            Msg::Arrival(m) => self.arrival.update(m).map(Msg::Arrival),
            Msg::CheckIn(m) => self.check_in.update(m).map(Msg::CheckIn),
            Msg::Stay(m) => self.stay.update(m).map(Msg::Stay),
            Msg::Meeting(m) => self.meeting.update(m).map(Msg::Meeting),
            Msg::Book(m) => self.book.update(m).map(Msg::Book),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        let mut rows = vec![Constraint::Length(1)];
        rows.extend([Constraint::Length(3); FIELDS]);
        rows.extend([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)]);
        let areas = Layout::vertical(rows).split(area);

        let title = format!("Booking ({})", self.viewport.class());
        frame.render_widget(
            Paragraph::new(Span::styled(
                title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            areas[0],
        );

        // The focused control draws last so its popover or sheet sits on top.
        for i in (0..FIELDS).filter(|&i| i != self.focus) {
            self.draw_field(i, frame, areas[i + 1]);
        }
        let status = Paragraph::new(self.status.as_str()).style(Style::default().fg(Color::Green));
        frame.render_widget(status, areas[FIELDS + 1]);
        let help = Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" next  "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" open / confirm  "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(" close / quit"),
        ]);
        frame.render_widget(Paragraph::new(help), areas[FIELDS + 3]);
        self.draw_field(self.focus, frame, areas[self.focus + 1]);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        vec![
            viewport_changes(&self.viewport, Msg::Viewport),
            terminal_events(|event| match event {
                TerminalEvent::Key(key) => Some(Msg::Key(key)),
                _ => None,
            }),
        ]
    }
}

#[veneer::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let viewport = Viewport::new(Breakpoint::new(100), 80);
    let options = ProgramOptions::default()
        .with_viewport(viewport.clone())
        .with_title("veneer booking")
        .with_log_file("booking_form.log");
    veneer::run_with::<Booking>(viewport, options).await?;
    Ok(())
}
