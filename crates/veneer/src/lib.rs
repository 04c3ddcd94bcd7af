//! **veneer** -- responsive form controls for [`ratatui`].
//!
//! One control API, two widget families: popovers on regular terminals,
//! full-screen sheets and wheels on compact ones.  This umbrella crate
//! re-exports everything needed from a single dependency:
//!
//! ```toml
//! [dependencies]
//! veneer = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`veneer_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Viewport`],
//!   [`viewport_changes`], [`Program`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports [`veneer_widgets`] (the six adaptive
//!   controls and their value types).
//! * [`ratatui`], [`crossterm`], [`tokio`] and [`chrono`] are re-exported so
//!   downstream crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use veneer::widgets::{select, OptionList, Select};
//! use veneer::{viewport_changes, Breakpoint, Command, Component, Model, Subscription, Viewport, ViewportClass};
//!
//! struct App {
//!     viewport: Viewport,
//!     fruit: Select,
//! }
//!
//! enum Msg {
//!     Viewport(ViewportClass),
//!     Fruit(select::Message),
//! }
//!
//! impl Model for App {
//!     type Message = Msg;
//!     type Flags = Viewport;
//!
//!     fn init(viewport: Viewport) -> (Self, Command<Msg>) {
//!         let options = OptionList::from_pairs([("Apple", "apple"), ("Pear", "pear")]).unwrap();
//!         (App { viewport, fruit: Select::new(options) }, Command::none())
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Viewport(class) => self.fruit.update(select::Message::Viewport(class)).map(Msg::Fruit),
//!             Msg::Fruit(m) => self.fruit.update(m).map(Msg::Fruit),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut ratatui::Frame) {
//!         self.fruit.view(frame, frame.area());
//!     }
//!
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         vec![viewport_changes(&self.viewport, Msg::Viewport)]
//!     }
//! }
//! ```

pub use veneer_core::*;
pub mod widgets {
    pub use veneer_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use chrono;
pub use crossterm;
pub use ratatui;
pub use tokio;
