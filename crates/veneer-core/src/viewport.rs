//! Viewport classification: is the host surface compact or regular?
//!
//! A [`Viewport`] turns raw width observations into a single
//! [`ViewportClass`] and broadcasts changes to every control that watches
//! it.  Only the viewport itself ever writes the classification; controls
//! hold read-only [`ViewportWatch`] receivers.
//!
//! ```rust,ignore
//! use veneer_core::viewport::{Breakpoint, Viewport, ViewportClass};
//!
//! let viewport = Viewport::new(Breakpoint::new(100), 80);
//! assert_eq!(viewport.class(), ViewportClass::Compact);
//!
//! viewport.observe(120);
//! assert_eq!(viewport.class(), ViewportClass::Regular);
//! ```

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Default breakpoint, in host width units.
///
/// Matches the common `md` layout breakpoint: widths strictly below 768 are
/// compact.
pub const DEFAULT_BREAKPOINT: u16 = 768;

/// Which widget family a control should mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    /// Narrow, touch-style surface: wheel pickers and full-screen dialogs.
    Compact,
    /// Wide, pointer-style surface: dropdowns, popovers, and inline panels.
    Regular,
}

impl ViewportClass {
    /// Returns `true` for [`ViewportClass::Compact`].
    pub fn is_compact(self) -> bool {
        matches!(self, ViewportClass::Compact)
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewportClass::Compact => f.write_str("compact"),
            ViewportClass::Regular => f.write_str("regular"),
        }
    }
}

/// A fixed width threshold separating compact from regular surfaces.
///
/// Widths strictly below the threshold are compact; a width exactly at the
/// threshold is regular.  There is no hysteresis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint(u16);

impl Breakpoint {
    /// Create a breakpoint at the given width.
    pub const fn new(width: u16) -> Self {
        Self(width)
    }

    /// The threshold width.
    pub const fn width(self) -> u16 {
        self.0
    }

    /// Classify a width against this breakpoint.
    pub const fn classify(self, width: u16) -> ViewportClass {
        if width < self.0 {
            ViewportClass::Compact
        } else {
            ViewportClass::Regular
        }
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self(DEFAULT_BREAKPOINT)
    }
}

/// Classify `width` against `breakpoint`.  Pure and deterministic.
pub const fn classify(width: u16, breakpoint: Breakpoint) -> ViewportClass {
    breakpoint.classify(width)
}

/// Broadcast source for the current [`ViewportClass`].
///
/// Cloning a `Viewport` yields another handle to the same classification;
/// any handle may feed width observations.  Watchers are notified only when
/// the class actually flips.
#[derive(Clone)]
pub struct Viewport {
    breakpoint: Breakpoint,
    tx: Arc<watch::Sender<ViewportClass>>,
}

impl Viewport {
    /// Create a viewport classified from an initial width.
    pub fn new(breakpoint: Breakpoint, initial_width: u16) -> Self {
        let (tx, _rx) = watch::channel(breakpoint.classify(initial_width));
        Self {
            breakpoint,
            tx: Arc::new(tx),
        }
    }

    /// Create a viewport pinned to a class until the first observation.
    pub fn with_class(breakpoint: Breakpoint, class: ViewportClass) -> Self {
        let (tx, _rx) = watch::channel(class);
        Self {
            breakpoint,
            tx: Arc::new(tx),
        }
    }

    /// The breakpoint this viewport classifies against.
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// The current classification.
    pub fn class(&self) -> ViewportClass {
        *self.tx.borrow()
    }

    /// Record a new width.  Returns `true` when the classification flipped.
    pub fn observe(&self, width: u16) -> bool {
        let next = self.breakpoint.classify(width);
        let changed = self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            tracing::debug!(width, class = %next, "viewport classification changed");
        }
        changed
    }

    /// Start watching the classification.  Dropping the watch unsubscribes.
    pub fn subscribe(&self) -> ViewportWatch {
        ViewportWatch {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live watchers.
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("breakpoint", &self.breakpoint)
            .field("class", &self.class())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Read-only subscription to a [`Viewport`].
pub struct ViewportWatch {
    rx: watch::Receiver<ViewportClass>,
}

impl ViewportWatch {
    /// The classification as last published.
    pub fn current(&self) -> ViewportClass {
        *self.rx.borrow()
    }

    /// Wait for the next classification change.
    ///
    /// Returns `None` once every [`Viewport`] handle has been dropped.
    pub async fn changed(&mut self) -> Option<ViewportClass> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    pub(crate) fn into_receiver(self) -> watch::Receiver<ViewportClass> {
        self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_deterministic() {
        let bp = Breakpoint::new(768);
        for width in [0, 1, 500, 767, 768, 769, 1920, u16::MAX] {
            assert_eq!(classify(width, bp), classify(width, bp));
        }
    }

    #[test]
    fn below_breakpoint_is_compact() {
        let bp = Breakpoint::default();
        assert_eq!(bp.classify(0), ViewportClass::Compact);
        assert_eq!(bp.classify(767), ViewportClass::Compact);
    }

    #[test]
    fn boundary_is_regular() {
        let bp = Breakpoint::default();
        assert_eq!(bp.classify(768), ViewportClass::Regular);
        assert_eq!(bp.classify(1024), ViewportClass::Regular);
    }

    #[test]
    fn flips_on_every_crossing() {
        let viewport = Viewport::new(Breakpoint::new(100), 120);
        assert_eq!(viewport.class(), ViewportClass::Regular);

        assert!(viewport.observe(99));
        assert_eq!(viewport.class(), ViewportClass::Compact);
        assert!(viewport.observe(100));
        assert_eq!(viewport.class(), ViewportClass::Regular);
        assert!(viewport.observe(50));
        assert_eq!(viewport.class(), ViewportClass::Compact);
    }

    #[test]
    fn observe_without_flip_reports_unchanged() {
        let viewport = Viewport::new(Breakpoint::new(100), 120);
        assert!(!viewport.observe(130));
        assert!(!viewport.observe(100));
    }

    #[test]
    fn observe_works_without_watchers() {
        let viewport = Viewport::new(Breakpoint::new(100), 120);
        assert_eq!(viewport.observer_count(), 0);
        assert!(viewport.observe(10));
        assert_eq!(viewport.class(), ViewportClass::Compact);
    }

    #[test]
    fn dropping_watch_unsubscribes() {
        let viewport = Viewport::new(Breakpoint::new(100), 120);
        let a = viewport.subscribe();
        let b = viewport.subscribe();
        assert_eq!(viewport.observer_count(), 2);
        drop(a);
        assert_eq!(viewport.observer_count(), 1);
        drop(b);
        assert_eq!(viewport.observer_count(), 0);
    }

    #[test]
    fn clones_share_classification() {
        let viewport = Viewport::new(Breakpoint::new(100), 120);
        let other = viewport.clone();
        other.observe(20);
        assert_eq!(viewport.class(), ViewportClass::Compact);
    }

    #[tokio::test]
    async fn watch_sees_changes() {
        let viewport = Viewport::new(Breakpoint::new(100), 120);
        let mut watch = viewport.subscribe();
        assert_eq!(watch.current(), ViewportClass::Regular);

        viewport.observe(40);
        assert_eq!(watch.changed().await, Some(ViewportClass::Compact));
    }

    #[tokio::test]
    async fn watch_ends_when_viewport_dropped() {
        let viewport = Viewport::new(Breakpoint::new(100), 120);
        let mut watch = viewport.subscribe();
        drop(viewport);
        assert_eq!(watch.changed().await, None);
    }
}
