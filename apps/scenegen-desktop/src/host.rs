use scenegen_common::Viewport;
use scenegen_runtime::{Host, ResizeSubscription};
use std::sync::Arc;
use winit::window::Window;

/// Host backed by a winit window.
///
/// winit always reports resizes; they are forwarded to the application only
/// once it has subscribed.
pub struct WindowHost {
    window: Arc<Window>,
    subscription: Option<ResizeSubscription>,
    next_subscription: u64,
}

impl WindowHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            subscription: None,
            next_subscription: 1,
        }
    }

    pub fn delivers_resize(&self) -> bool {
        self.subscription.is_some()
    }
}

impl Host for WindowHost {
    fn viewport(&self) -> Viewport {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        Viewport::new(size.width.round() as u32, size.height.round() as u32)
    }

    fn pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    fn physical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width.max(1), size.height.max(1))
    }

    fn subscribe_resize(&mut self) -> ResizeSubscription {
        let subscription = ResizeSubscription(self.next_subscription);
        self.next_subscription += 1;
        if let Some(previous) = self.subscription.replace(subscription) {
            tracing::warn!(previous = previous.0, "resize subscription replaced");
        }
        subscription
    }
}

/// Host with a fixed size, for running without a window.
pub struct FixedHost {
    viewport: Viewport,
    subscriptions: u64,
}

impl FixedHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            subscriptions: 0,
        }
    }
}

impl Host for FixedHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn pixel_ratio(&self) -> f64 {
        1.0
    }

    fn subscribe_resize(&mut self) -> ResizeSubscription {
        self.subscriptions += 1;
        ResizeSubscription(self.subscriptions)
    }
}
