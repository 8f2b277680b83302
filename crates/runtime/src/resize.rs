use crate::{Host, ResizeSubscription};

/// Owns the application's single viewport-size-change subscription.
#[derive(Debug, Default)]
pub struct ResizeReactor {
    subscription: Option<ResizeSubscription>,
}

impl ResizeReactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `host` unless already subscribed. Returns true if it subscribed now.
    pub fn ensure_subscribed<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.subscription.is_some() {
            return false;
        }
        let subscription = host.subscribe_resize();
        tracing::debug!(id = subscription.0, "subscribed to viewport resize");
        self.subscription = Some(subscription);
        true
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn subscription(&self) -> Option<ResizeSubscription> {
        self.subscription
    }
}
