//! Adaptive form controls for **veneer**.
//!
//! Every control here implements [`veneer_core::Component`] and presents one
//! API while rendering one of two widget families underneath: popovers
//! anchored to the trigger on regular viewports, full-screen sheets and
//! wheels on compact ones.  Which family is mounted follows the
//! [`ViewportClass`](veneer_core::ViewportClass) the host forwards with each
//! control's `Viewport` message.
//!
//! # Controls
//!
//! | Module | Control | Emits |
//! |--------|---------|-------|
//! | [`button`] | [`Button`] | `Pressed` |
//! | [`select`] | [`Select`] | `Changed(String)` |
//! | [`date_picker`] | [`DatePicker`] | `Changed(Option<NaiveDate>)` |
//! | [`time_picker`] | [`TimePicker`] | `Changed(TimeOfDay)` |
//! | [`date_range_picker`] | [`DateRangePicker`] | `Changed(Option<DateRange>)` |
//! | [`datetime_range_picker`] | [`DateTimeRangePicker`] | `Changed(DateTimeRange)` |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`resolver`] | Placeholder, acquisition and stale-result handling per control |
//! | [`store`] | Controlled and uncontrolled values |
//! | [`coordinator`] | The compact three-dialog date-time range flow |
//! | [`value`] | Time, date, range and option value types |
//! | [`locale`] | Labels and display patterns |
//! | [`desktop`] / [`compact`] | The two widget families |
//!
//! # Wiring a control
//!
//! ```rust,ignore
//! enum Msg {
//!     Viewport(ViewportClass),
//!     Fruit(select::Message),
//! }
//!
//! fn update(&mut self, msg: Msg) -> Command<Msg> {
//!     match msg {
//!         Msg::Viewport(class) => self
//!             .fruit
//!             .update(select::Message::Viewport(class))
//!             .map(Msg::Fruit),
//!         Msg::Fruit(select::Message::Changed(value)) => { /* ... */ }
//!         Msg::Fruit(m) => self.fruit.update(m).map(Msg::Fruit),
//!     }
//! }
//! ```

pub mod button;
pub mod calendar;
pub mod compact;
pub mod control;
pub mod coordinator;
pub mod date_picker;
pub mod date_range_picker;
pub mod datetime_range_picker;
pub mod desktop;
pub mod error;
pub mod locale;
pub mod resolver;
pub mod select;
pub mod selection;
pub mod store;
pub mod time_picker;
pub mod value;

pub use button::{Button, ButtonSize, ButtonVariant};
pub use control::{Outcome, Props};
pub use coordinator::{Coordinator, Step, Transition};
pub use date_picker::DatePicker;
pub use date_range_picker::DateRangePicker;
pub use datetime_range_picker::DateTimeRangePicker;
pub use error::{AcquireError, Error, Result};
pub use locale::{Labels, Locale};
pub use resolver::{Acquired, Loader, Resolution, Resolver};
pub use select::Select;
pub use store::ValueStore;
pub use time_picker::TimePicker;
pub use value::{
    DateBounds, DateRange, DateTimeRange, OptionList, SelectOption, TimeConstraints, TimeFormat,
    TimeOfDay,
};
