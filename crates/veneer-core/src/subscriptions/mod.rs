//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`], [`TerminalEvents`]) -- keyboard,
//!   mouse, resize, and paste events from the terminal.
//! - **Viewport changes** ([`viewport_changes`], [`ViewportChanges`]) -- the
//!   compact/regular classification published by a
//!   [`Viewport`](crate::viewport::Viewport).

mod terminal;
mod viewport;

pub use terminal::*;
pub use viewport::*;
