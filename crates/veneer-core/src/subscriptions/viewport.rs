use crate::subscription::{Subscription, SubscriptionId, SubscriptionSource};
use crate::viewport::{Viewport, ViewportClass};
use futures::stream::BoxStream;
use tokio_stream::wrappers::WatchStream;

/// Subscription source yielding the current [`ViewportClass`] and then every
/// change to it.
///
/// The underlying watch receiver is created when the source is constructed
/// and released when the runtime drops the subscription, so a model that
/// stops declaring it stops observing the viewport.
pub struct ViewportChanges {
    watch: crate::viewport::ViewportWatch,
}

impl ViewportChanges {
    /// Watch the given viewport.
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            watch: viewport.subscribe(),
        }
    }
}

impl SubscriptionSource for ViewportChanges {
    type Output = ViewportClass;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::of::<Self>()
    }

    fn stream(self) -> BoxStream<'static, ViewportClass> {
        Box::pin(WatchStream::new(self.watch.into_receiver()))
    }
}

/// Subscribe a model to viewport classification changes.
///
/// Declare this once per model and fan the class out to each adaptive
/// control; every `viewport_changes` subscription shares one identity.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![viewport_changes(&self.viewport, Msg::Viewport)]
/// }
/// ```
pub fn viewport_changes<Msg: Send + 'static>(
    viewport: &Viewport,
    map: impl Fn(ViewportClass) -> Msg + Send + Sync + 'static,
) -> Subscription<Msg> {
    crate::subscription::subscribe(ViewportChanges::new(viewport)).map(map)
}
