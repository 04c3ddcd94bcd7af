//! Compact widget family: full-screen sheets driven by arrows and Enter.

pub mod button;
pub mod calendar_sheet;
pub mod sheet;
pub mod wheel;

pub use button::{Fill, MobileButton, Scale, Tone};
pub use calendar_sheet::CalendarSheet;
pub use wheel::{time_wheel_columns, Wheel};
