//! Value adapters.
//!
//! Both widget families speak their own dialects: the compact wheels want
//! ordered tuples of zero-padded strings, the desktop panels want typed
//! calendar values, and the trigger line wants a display string.  Every
//! control keeps a single canonical value and converts through the types
//! here.

pub mod date;
pub mod option;
pub mod range;
pub mod time;

pub use date::{month_days, selectable_days, DateBounds, MonthDay};
pub use option::{OptionList, SelectOption};
pub use range::{combine, format_date_time, parse_date_time, DateRange, DateTimeRange};
pub use time::{TimeConstraints, TimeFormat, TimeOfDay};
