//! Per-control implementation resolution.
//!
//! A control does not know which widget family it renders until the
//! viewport class is known, and the family may need asynchronous setup.
//! [`Resolver`] tracks the class the control wants, the acquisition in
//! flight for it, and the mounted widget once acquisition succeeds.
//!
//! Each call to [`Resolver::resolve`] with a new class bumps a generation
//! counter; an [`Acquired`] result is only honoured if it carries the
//! current generation, so a slow acquisition for a class the viewport has
//! since left can never mount over a newer one.

use crate::error::AcquireError;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use veneer_core::{Command, ViewportClass};

/// Future returned by a deferred loader.
pub type LoadFuture = BoxFuture<'static, Result<(), AcquireError>>;

/// How a control obtains the implementation for a class.
#[derive(Clone, Default)]
pub enum Loader {
    /// Ready at once.  Still goes through one update cycle so the first
    /// frame shows the placeholder.
    #[default]
    Immediate,
    /// Run a future before mounting.
    Deferred(Arc<dyn Fn(ViewportClass) -> LoadFuture + Send + Sync>),
}

impl Loader {
    pub fn deferred<F>(load: F) -> Self
    where
        F: Fn(ViewportClass) -> LoadFuture + Send + Sync + 'static,
    {
        Loader::Deferred(Arc::new(load))
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loader::Immediate => f.write_str("Immediate"),
            Loader::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Outcome of one acquisition, routed back through the control's update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquired {
    generation: u64,
    class: ViewportClass,
    result: Result<(), AcquireError>,
}

impl Acquired {
    pub fn class(&self) -> ViewportClass {
        self.class
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// What the control renders right now.
pub enum Resolution<V> {
    /// Acquisition pending (or not started).
    Placeholder,
    /// The widget for `class` is live.
    Mounted { class: ViewportClass, widget: V },
    /// Acquisition failed; the placeholder stays.
    Failed(AcquireError),
}

/// Tracks acquisition and mounting for one control.
pub struct Resolver<V> {
    loader: Loader,
    target: Option<ViewportClass>,
    generation: u64,
    resolution: Resolution<V>,
}

impl<V> Resolver<V> {
    pub fn new(loader: Loader) -> Self {
        Self {
            loader,
            target: None,
            generation: 0,
            resolution: Resolution::Placeholder,
        }
    }

    /// The class most recently requested.
    pub fn target(&self) -> Option<ViewportClass> {
        self.target
    }

    /// Request the implementation for `class`.
    ///
    /// A repeat request for the current target does nothing; this is also
    /// what keeps a failed class from being retried until the viewport
    /// moves away and back.  A new class unmounts the current widget.
    pub fn resolve(&mut self, class: ViewportClass) -> Command<Acquired> {
        if self.target == Some(class) {
            return Command::none();
        }
        self.target = Some(class);
        self.generation += 1;
        self.resolution = Resolution::Placeholder;
        tracing::debug!(%class, generation = self.generation, "acquiring implementation");

        let generation = self.generation;
        match &self.loader {
            Loader::Immediate => Command::message(Acquired {
                generation,
                class,
                result: Ok(()),
            }),
            Loader::Deferred(load) => Command::perform(load(class), move |result| Acquired {
                generation,
                class,
                result,
            }),
        }
    }

    /// Apply an acquisition result.  Returns `true` if a widget was
    /// mounted.  Stale results are dropped.
    pub fn accept(&mut self, acquired: Acquired, build: impl FnOnce(ViewportClass) -> V) -> bool {
        if acquired.generation != self.generation || self.target != Some(acquired.class) {
            tracing::debug!(
                class = %acquired.class,
                generation = acquired.generation,
                current = self.generation,
                "discarding stale acquisition"
            );
            return false;
        }
        match acquired.result {
            Ok(()) => {
                self.resolution = Resolution::Mounted {
                    class: acquired.class,
                    widget: build(acquired.class),
                };
                true
            }
            Err(err) => {
                tracing::warn!(%err, "implementation unavailable, keeping placeholder");
                self.resolution = Resolution::Failed(err);
                false
            }
        }
    }

    pub fn resolution(&self) -> &Resolution<V> {
        &self.resolution
    }

    pub fn widget(&self) -> Option<&V> {
        match &self.resolution {
            Resolution::Mounted { widget, .. } => Some(widget),
            _ => None,
        }
    }

    pub fn widget_mut(&mut self) -> Option<&mut V> {
        match &mut self.resolution {
            Resolution::Mounted { widget, .. } => Some(widget),
            _ => None,
        }
    }

    pub fn mounted_class(&self) -> Option<ViewportClass> {
        match &self.resolution {
            Resolution::Mounted { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// True while nothing is mounted.
    pub fn is_placeholder(&self) -> bool {
        !matches!(self.resolution, Resolution::Mounted { .. })
    }

    pub fn failure(&self) -> Option<&AcquireError> {
        match &self.resolution {
            Resolution::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ViewportClass::{Compact, Regular};

    fn immediate() -> Resolver<&'static str> {
        Resolver::new(Loader::Immediate)
    }

    fn name(class: ViewportClass) -> &'static str {
        match class {
            Compact => "wheel",
            Regular => "list",
        }
    }

    #[test]
    fn placeholder_until_accepted() {
        let mut resolver = immediate();
        assert!(resolver.is_placeholder());

        let acquired = resolver.resolve(Compact).into_message().unwrap();
        assert!(resolver.is_placeholder());
        assert!(resolver.accept(acquired, name));
        assert_eq!(resolver.widget(), Some(&"wheel"));
        assert_eq!(resolver.mounted_class(), Some(Compact));
    }

    #[test]
    fn same_class_does_not_remount() {
        let mut resolver = immediate();
        let acquired = resolver.resolve(Regular).into_message().unwrap();
        resolver.accept(acquired, name);
        assert!(resolver.resolve(Regular).is_none());
        assert_eq!(resolver.widget(), Some(&"list"));
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut resolver = immediate();
        let for_compact = resolver.resolve(Compact).into_message().unwrap();
        let for_regular = resolver.resolve(Regular).into_message().unwrap();

        assert!(!resolver.accept(for_compact, name));
        assert!(resolver.is_placeholder());

        assert!(resolver.accept(for_regular, name));
        assert_eq!(resolver.widget(), Some(&"list"));
    }

    #[test]
    fn flip_back_discards_both_earlier_generations() {
        let mut resolver = immediate();
        let first = resolver.resolve(Compact).into_message().unwrap();
        let second = resolver.resolve(Regular).into_message().unwrap();
        let third = resolver.resolve(Compact).into_message().unwrap();

        assert!(!resolver.accept(first, name));
        assert!(!resolver.accept(second, name));
        assert!(resolver.accept(third, name));
        assert_eq!(resolver.mounted_class(), Some(Compact));
    }

    #[test]
    fn flip_unmounts() {
        let mut resolver = immediate();
        let acquired = resolver.resolve(Compact).into_message().unwrap();
        resolver.accept(acquired, name);
        let _pending = resolver.resolve(Regular);
        assert!(resolver.widget().is_none());
    }

    #[tokio::test]
    async fn failure_keeps_placeholder_and_is_not_retried() {
        let mut resolver: Resolver<&str> = Resolver::new(Loader::deferred(|class| {
            Box::pin(async move { Err(AcquireError::unavailable(class, "offline")) })
        }));
        let fut = resolver.resolve(Compact).into_future().unwrap();
        let acquired = fut.await;
        assert!(!acquired.is_ok());
        assert!(!resolver.accept(acquired, name));
        assert!(resolver.is_placeholder());
        assert_eq!(
            resolver.failure(),
            Some(&AcquireError::unavailable(Compact, "offline"))
        );

        assert!(resolver.resolve(Compact).is_none());
        assert!(resolver.resolve(Regular).is_future());
    }

    #[tokio::test]
    async fn deferred_success_mounts() {
        let mut resolver: Resolver<&str> =
            Resolver::new(Loader::deferred(|_| Box::pin(async { Ok(()) })));
        let acquired = resolver.resolve(Regular).into_future().unwrap().await;
        assert_eq!(acquired.class(), Regular);
        assert!(resolver.accept(acquired, name));
        assert_eq!(resolver.widget(), Some(&"list"));
    }
}
