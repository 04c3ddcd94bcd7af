//! Core runtime for **veneer** adaptive TUI controls.
//!
//! `veneer-core` carries the Elm-style runtime the controls are built on and
//! the one piece of shared state every adaptive control reads: the viewport
//! classification.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model rendering into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect: a message, a future, or a terminal action |
//! | [`Subscription`] | Long-lived event source diffed on every update |
//! | [`Viewport`] | Broadcasts whether the surface is compact or regular |
//! | [`Program`] | Drives a [`Model`] on a real terminal |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for tests |
//!
//! # Viewport flow
//!
//! 1. The host creates a [`Viewport`] with a [`Breakpoint`] and hands a clone
//!    to [`ProgramOptions::with_viewport`], which feeds it the terminal width.
//! 2. The model declares [`viewport_changes`] and forwards each
//!    [`ViewportClass`] to its controls.
//! 3. Each control re-resolves its implementation when the class flips.

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;
pub mod viewport;

pub use command::{Command, TerminalCommand};
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{log_to_file, OutputTarget, Program, ProgramError, ProgramHandle, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, viewport_changes, ViewportChanges};
pub use viewport::{classify, Breakpoint, Viewport, ViewportClass, ViewportWatch, DEFAULT_BREAKPOINT};

/// Run a model with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run a model with custom options.
pub async fn run_with<M: Model>(flags: M::Flags, options: ProgramOptions) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
