use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`].
///
/// Every adaptive control is a `Component`.  A parent model owns the
/// control, wraps its message type in one of its own variants, forwards
/// input to it, and watches the returned [`Command`] for the control's
/// outgoing notifications:
///
/// ```rust,ignore
/// enum Msg { Arrival(time_picker::Message) }
///
/// fn update(&mut self, msg: Msg) -> Command<Msg> {
///     match msg {
///         Msg::Arrival(time_picker::Message::Changed(time)) => {
///             self.arrival = time;
///             Command::none()
///         }
///         Msg::Arrival(m) => self.arrival_picker.update(m).map(Msg::Arrival),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`].
    ///
    /// The parent lifts the returned command with
    /// [`Command::map`].
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`.  Overlays (popovers, dialogs) may draw outside
    /// `area` but never outside the frame.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Subscriptions this component needs.  The parent collects and maps
    /// them.  Defaults to none.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has keyboard focus.
    fn focused(&self) -> bool {
        false
    }
}
