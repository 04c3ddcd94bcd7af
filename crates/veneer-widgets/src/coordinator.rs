//! The compact date-time range flow.
//!
//! A compact surface has no room for a calendar and two time pickers at
//! once, so the date-time range is collected as three dialogs in a row:
//! the date range, then the start time, then the end time.  The
//! [`Coordinator`] owns the partial value between dialogs and guarantees
//! the caller hears about exactly one complete range, or nothing.
//!
//! ```text
//!   Idle ──open──▶ AwaitingDateRange ──confirm_range──▶ AwaitingStartTime
//!    ▲                                                        │
//!    │                                                   confirm_time
//!    │                                                        ▼
//!    └──────── confirm_time (emits) ─────────────────── AwaitingEndTime
//!
//!   cancel from any non-idle step returns to Idle and forgets everything
//! ```

use crate::locale::Locale;
use crate::value::{combine, DateRange, DateTimeRange, TimeOfDay};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Which dialog is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    AwaitingDateRange,
    AwaitingStartTime,
    AwaitingEndTime,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Idle => "idle",
            Step::AwaitingDateRange => "date range",
            Step::AwaitingStartTime => "start time",
            Step::AwaitingEndTime => "end time",
        })
    }
}

/// Result of feeding an event to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Moved to the given step.
    Advanced(Step),
    /// The flow finished; notify the caller with this range.
    Completed(DateTimeRange),
    /// Cancelled; all partial state dropped.
    Reset,
    /// The event does not apply in the current step.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    AwaitingDateRange,
    AwaitingStartTime {
        from: NaiveDate,
        to: NaiveDate,
    },
    AwaitingEndTime {
        to: NaiveDate,
        start: NaiveDateTime,
    },
}

/// Sequencer for the three-dialog date-time range flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinator {
    state: State,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    pub fn step(&self) -> Step {
        match self.state {
            State::Idle => Step::Idle,
            State::AwaitingDateRange => Step::AwaitingDateRange,
            State::AwaitingStartTime { .. } => Step::AwaitingStartTime,
            State::AwaitingEndTime { .. } => Step::AwaitingEndTime,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    /// Show the date range dialog.
    pub fn open(&mut self) -> Transition {
        match self.state {
            State::Idle => self.advance(State::AwaitingDateRange),
            _ => Transition::Ignored,
        }
    }

    /// Accept the date range.  A half-picked range keeps the dialog open.
    pub fn confirm_range(&mut self, range: DateRange) -> Transition {
        match (&self.state, range.ends()) {
            (State::AwaitingDateRange, Some((from, to))) => {
                self.advance(State::AwaitingStartTime { from, to })
            }
            _ => Transition::Ignored,
        }
    }

    /// Accept the start or end time, depending on the step.
    pub fn confirm_time(&mut self, time: TimeOfDay) -> Transition {
        match self.state {
            State::AwaitingStartTime { from, to } => self.advance(State::AwaitingEndTime {
                to,
                start: combine(from, time),
            }),
            State::AwaitingEndTime { to, start } => {
                self.state = State::Idle;
                let range = DateTimeRange::new(start, combine(to, time));
                tracing::debug!(from = %range.from, to = %range.to, "date-time range complete");
                Transition::Completed(range)
            }
            _ => Transition::Ignored,
        }
    }

    /// Close whichever dialog is showing and forget the partial value.
    pub fn cancel(&mut self) -> Transition {
        if self.is_idle() {
            return Transition::Ignored;
        }
        tracing::debug!(step = %self.step(), "date-time range cancelled");
        self.state = State::Idle;
        Transition::Reset
    }

    /// The date range confirmed so far.
    pub fn pending_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.state {
            State::AwaitingStartTime { from, to } => Some((from, to)),
            State::AwaitingEndTime { to, start } => Some((start.date(), to)),
            _ => None,
        }
    }

    /// Dialog title for the current step.
    pub fn title(&self, locale: Locale) -> &'static str {
        let labels = locale.labels();
        match self.step() {
            Step::Idle | Step::AwaitingDateRange => labels.pick_range,
            Step::AwaitingStartTime => labels.start_time,
            Step::AwaitingEndTime => labels.end_time,
        }
    }

    /// Confirm-button label: "next" until the last dialog.
    pub fn confirm_label(&self, locale: Locale) -> &'static str {
        let labels = locale.labels();
        match self.step() {
            Step::AwaitingEndTime => labels.confirm,
            _ => labels.next,
        }
    }

    fn advance(&mut self, state: State) -> Transition {
        self.state = state;
        tracing::debug!(step = %self.step(), "date-time range advanced");
        Transition::Advanced(self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn hm(h: u8, m: u8) -> TimeOfDay {
        TimeOfDay::hm(h, m).unwrap()
    }

    #[test]
    fn full_flow_emits_once() {
        let mut c = Coordinator::new();
        assert_eq!(c.open(), Transition::Advanced(Step::AwaitingDateRange));
        assert_eq!(
            c.confirm_range(DateRange::between(d(1), d(5))),
            Transition::Advanced(Step::AwaitingStartTime)
        );
        assert_eq!(
            c.confirm_time(hm(9, 0)),
            Transition::Advanced(Step::AwaitingEndTime)
        );
        let done = c.confirm_time(hm(18, 30));
        assert_eq!(
            done,
            Transition::Completed(DateTimeRange::new(
                d(1).and_hms_opt(9, 0, 0).unwrap(),
                d(5).and_hms_opt(18, 30, 0).unwrap(),
            ))
        );
        assert!(c.is_idle());
        assert_eq!(c.confirm_time(hm(10, 0)), Transition::Ignored);
    }

    #[test]
    fn cancel_at_start_time_forgets_range() {
        let mut c = Coordinator::new();
        c.open();
        c.confirm_range(DateRange::between(d(1), d(5)));
        assert_eq!(c.cancel(), Transition::Reset);
        assert!(c.is_idle());
        assert_eq!(c.pending_range(), None);

        // Reopening starts from scratch.
        c.open();
        assert_eq!(c.step(), Step::AwaitingDateRange);
        assert_eq!(c.confirm_time(hm(9, 0)), Transition::Ignored);
    }

    #[test]
    fn cancel_at_end_time_resets() {
        let mut c = Coordinator::new();
        c.open();
        c.confirm_range(DateRange::between(d(1), d(5)));
        c.confirm_time(hm(9, 0));
        assert_eq!(c.pending_range(), Some((d(1), d(5))));
        assert_eq!(c.cancel(), Transition::Reset);
        assert_eq!(c.step(), Step::Idle);
    }

    #[test]
    fn half_range_keeps_dialog_open() {
        let mut c = Coordinator::new();
        c.open();
        assert_eq!(
            c.confirm_range(DateRange::starting(d(3))),
            Transition::Ignored
        );
        assert_eq!(c.step(), Step::AwaitingDateRange);
    }

    #[test]
    fn events_out_of_order_are_ignored() {
        let mut c = Coordinator::new();
        assert_eq!(c.cancel(), Transition::Ignored);
        assert_eq!(
            c.confirm_range(DateRange::between(d(1), d(2))),
            Transition::Ignored
        );
        c.open();
        assert_eq!(c.open(), Transition::Ignored);
    }

    #[test]
    fn labels_follow_step() {
        let mut c = Coordinator::new();
        c.open();
        assert_eq!(c.title(Locale::EnUs), "Select date range");
        assert_eq!(c.confirm_label(Locale::EnUs), "Next");
        c.confirm_range(DateRange::between(d(1), d(2)));
        assert_eq!(c.title(Locale::EnUs), "Start time");
        assert_eq!(c.confirm_label(Locale::EnUs), "Next");
        c.confirm_time(hm(9, 0));
        assert_eq!(c.title(Locale::EnUs), "End time");
        assert_eq!(c.confirm_label(Locale::EnUs), "OK");
    }
}
