use scenegen_common::Viewport;

/// Handle for a registered viewport-size-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeSubscription(pub u64);

/// The environment an application runs in: a window and its notifications.
pub trait Host {
    /// Current drawable size in logical pixels.
    fn viewport(&self) -> Viewport;

    /// Physical pixels per logical pixel of the display showing the window.
    fn pixel_ratio(&self) -> f64;

    /// Exact drawable size in physical pixels.
    ///
    /// Hosts that know it should report it; rounding through the logical
    /// size can be a pixel off at fractional pixel ratios.
    fn physical_size(&self) -> (u32, u32) {
        self.viewport().physical(self.pixel_ratio())
    }

    /// Start delivering viewport-size-change notifications to the application.
    fn subscribe_resize(&mut self) -> ResizeSubscription;
}
