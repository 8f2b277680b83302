use crate::{Host, LightingStatus, ResizeReactor};
use scenegen_camera::{CameraRig, ChangeListener, PerspectiveCamera};
use scenegen_common::Viewport;
use scenegen_input::InputEvent;
use scenegen_render::{RenderError, Renderer};
use scenegen_scene::Scene;

/// Everything a running application owns, created by `Bootstrap::initialize`.
pub struct AppContext<R> {
    pub(crate) viewport: Viewport,
    pub(crate) renderer: R,
    pub(crate) scene: Scene,
    pub(crate) rig: CameraRig,
    pub(crate) resize: ResizeReactor,
    pub(crate) lighting: LightingStatus,
    pub(crate) frames: u64,
}

impl<R: Renderer> AppContext<R> {
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.rig.camera
    }

    pub fn resize_reactor(&self) -> &ResizeReactor {
        &self.resize
    }

    pub fn lighting_status(&self) -> LightingStatus {
        self.lighting
    }

    /// Number of successful draws since bootstrap.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Whether held keys will move the camera on the next `update`.
    pub fn is_camera_moving(&self) -> bool {
        self.rig.controls.is_moving()
    }

    /// Draw one frame, then check the resize subscription.
    pub fn render_frame<H: Host + ?Sized>(&mut self, host: &mut H) {
        let (mut trigger, rig) = self.split(host);
        trigger.draw(&rig.camera);
    }

    /// Route one input event to the camera controller. Returns true if it redrew.
    pub fn handle_input<H: Host + ?Sized>(&mut self, host: &mut H, event: &InputEvent) -> bool {
        let (mut trigger, rig) = self.split(host);
        rig.handle_input(event, &mut trigger)
    }

    /// Advance held-key camera movement by `dt` seconds. Returns true if it redrew.
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H, dt: f32) -> bool {
        let (mut trigger, rig) = self.split(host);
        rig.update(dt, &mut trigger)
    }

    /// React to a viewport-size-change notification from `host`.
    ///
    /// Ignored (returns false) when no subscription exists.
    pub fn handle_resize<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.resize.is_subscribed() {
            tracing::warn!("resize notification without a subscription, ignoring");
            return false;
        }

        self.viewport = host.viewport();
        self.renderer.set_size(self.viewport);
        let ratio = host.pixel_ratio();
        if ratio != self.renderer.pixel_ratio() {
            self.renderer.set_pixel_ratio(ratio);
        }
        self.renderer.set_physical_size(host.physical_size());
        self.rig.set_aspect(self.viewport.aspect());
        tracing::debug!(viewport = %self.viewport, pixel_ratio = ratio, "viewport resized");

        self.render_frame(host);
        true
    }

    fn split<'a, H: Host + ?Sized>(
        &'a mut self,
        host: &'a mut H,
    ) -> (RenderTrigger<'a, R, H>, &'a mut CameraRig) {
        let trigger = RenderTrigger {
            renderer: &mut self.renderer,
            scene: &self.scene,
            resize: &mut self.resize,
            frames: &mut self.frames,
            host,
        };
        (trigger, &mut self.rig)
    }
}

/// Borrowed view of the context that can draw; doubles as the camera change listener.
struct RenderTrigger<'a, R, H: ?Sized> {
    renderer: &'a mut R,
    scene: &'a Scene,
    resize: &'a mut ResizeReactor,
    frames: &'a mut u64,
    host: &'a mut H,
}

impl<R: Renderer, H: Host + ?Sized> RenderTrigger<'_, R, H> {
    fn draw(&mut self, camera: &PerspectiveCamera) {
        match self.renderer.render(self.scene, camera) {
            Ok(()) => {
                *self.frames += 1;
                tracing::debug!(frame = *self.frames, "frame rendered");
            }
            Err(e @ RenderError::AcquireFrame(_)) => tracing::warn!("frame skipped: {e}"),
            Err(e) => tracing::error!("render failed: {e}"),
        }
        self.resize.ensure_subscribed(&mut *self.host);
    }
}

impl<R: Renderer, H: Host + ?Sized> ChangeListener for RenderTrigger<'_, R, H> {
    fn on_change(&mut self, camera: &mut PerspectiveCamera) {
        camera.update_projection_matrix();
        self.draw(camera);
    }
}
