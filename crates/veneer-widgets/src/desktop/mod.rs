//! Desktop widget family: popovers anchored to the trigger.

pub mod button;
pub mod calendar_popover;
pub mod datetime_panel;
pub mod entry;
pub mod list;
pub mod time_columns;

pub use button::ButtonFace;
pub use calendar_popover::CalendarPopover;
pub use datetime_panel::DateTimePanel;
pub use entry::TextEntry;
pub use list::OptionPopover;
pub use time_columns::TimeColumns;
