use crate::{RenderError, Renderer, RendererSettings};
use glam::{Mat4, Vec3};
use scenegen_camera::PerspectiveCamera;
use scenegen_common::{Color, Viewport};
use scenegen_scene::Scene;
use std::fmt::Write;

/// What one draw call saw.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub viewport: Viewport,
    /// Backing-store size in physical pixels.
    pub physical: (u32, u32),
    pub view_projection: Mat4,
    pub camera_position: Vec3,
    pub aspect: f32,
    pub meshes: usize,
    pub lights: usize,
    pub clear_color: Color,
}

/// Renderer that records draws instead of rasterizing.
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    settings: RendererSettings,
    viewport: Viewport,
    physical: (u32, u32),
    frames: Vec<FrameRecord>,
    fail_next: bool,
}

impl HeadlessRenderer {
    pub fn new(settings: RendererSettings, viewport: Viewport) -> Self {
        Self {
            settings,
            viewport,
            physical: viewport.physical(settings.pixel_ratio),
            frames: Vec::new(),
            fail_next: false,
        }
    }

    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.frames.last()
    }

    /// Make the next `render` call fail with a lost-frame error.
    pub fn fail_next_frame(&mut self) {
        self.fail_next = true;
    }

    /// Human-readable summary of the most recent frame.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Headless frames: {} ===", self.frames.len());
        let Some(frame) = self.frames.last() else {
            return out;
        };
        let p = frame.camera_position;
        let _ = writeln!(
            out,
            "Viewport: {} ({}x{} physical)",
            frame.viewport, frame.physical.0, frame.physical.1
        );
        let _ = writeln!(
            out,
            "Camera: pos=({:.1}, {:.1}, {:.1}) aspect={:.3}",
            p.x, p.y, p.z, frame.aspect
        );
        let _ = writeln!(out, "Meshes: {}  Lights: {}", frame.meshes, frame.lights);
        let _ = writeln!(out, "Clear: #{:06x}", frame.clear_color.to_hex());
        out
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        if std::mem::take(&mut self.fail_next) {
            tracing::debug!("dropping frame on request");
            return Err(RenderError::AcquireFrame("simulated surface loss".into()));
        }
        self.frames.push(FrameRecord {
            viewport: self.viewport,
            physical: self.physical,
            view_projection: camera.view_projection(),
            camera_position: camera.position,
            aspect: camera.aspect,
            meshes: scene.mesh_count(),
            lights: scene.light_count(),
            clear_color: self.settings.clear_color,
        });
        Ok(())
    }

    fn size(&self) -> Viewport {
        self.viewport
    }

    fn set_size(&mut self, viewport: Viewport) {
        tracing::debug!(%viewport, "headless surface resized");
        self.viewport = viewport;
        self.physical = viewport.physical(self.settings.pixel_ratio);
    }

    fn pixel_ratio(&self) -> f64 {
        self.settings.pixel_ratio
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.settings.pixel_ratio = ratio;
        self.physical = self.viewport.physical(ratio);
    }

    fn physical_size(&self) -> (u32, u32) {
        self.physical
    }

    fn set_physical_size(&mut self, physical: (u32, u32)) {
        self.physical = (physical.0.max(1), physical.1.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegen_scene::{BasicMaterial, Mesh, SphereGeometry};

    fn scene_with_sphere() -> Scene {
        let mut scene = Scene::new();
        scene.add_mesh(Mesh::new(
            SphereGeometry::new(2.0, 16, 16).build(),
            BasicMaterial::default(),
        ));
        scene
    }

    #[test]
    fn records_each_draw() {
        let mut r = HeadlessRenderer::new(RendererSettings::default(), Viewport::new(800, 600));
        let scene = scene_with_sphere();
        let cam = PerspectiveCamera::default();
        r.render(&scene, &cam).unwrap();
        r.render(&scene, &cam).unwrap();

        assert_eq!(r.frame_count(), 2);
        let frame = r.last_frame().unwrap();
        assert_eq!(frame.meshes, 1);
        assert_eq!(frame.lights, 0);
        assert_eq!(frame.view_projection, cam.view_projection());
    }

    #[test]
    fn physical_size_tracks_pixel_ratio() {
        let mut r = HeadlessRenderer::new(RendererSettings::default(), Viewport::new(400, 300));
        r.set_pixel_ratio(2.0);
        r.render(&Scene::new(), &PerspectiveCamera::default()).unwrap();
        assert_eq!(r.last_frame().unwrap().physical, (800, 600));
    }

    #[test]
    fn exact_physical_size_overrides_rounding() {
        let mut r = HeadlessRenderer::new(RendererSettings::default(), Viewport::new(333, 777));
        r.set_pixel_ratio(1.5);
        assert_eq!(r.physical_size(), (500, 1166));
        r.set_physical_size((499, 1165));
        r.render(&Scene::new(), &PerspectiveCamera::default()).unwrap();
        assert_eq!(r.last_frame().unwrap().physical, (499, 1165));

        r.set_size(Viewport::new(100, 100));
        assert_eq!(r.physical_size(), (150, 150));
    }

    #[test]
    fn simulated_failure_is_one_shot() {
        let mut r = HeadlessRenderer::new(RendererSettings::default(), Viewport::default());
        r.fail_next_frame();
        let cam = PerspectiveCamera::default();
        assert!(r.render(&Scene::new(), &cam).is_err());
        assert!(r.render(&Scene::new(), &cam).is_ok());
        assert_eq!(r.frame_count(), 1);
    }

    #[test]
    fn describe_mentions_counts() {
        let mut r = HeadlessRenderer::new(RendererSettings::default(), Viewport::new(640, 480));
        assert!(r.describe().contains("frames: 0"));
        r.render(&scene_with_sphere(), &PerspectiveCamera::default()).unwrap();
        let text = r.describe();
        assert!(text.contains("Meshes: 1"));
        assert!(text.contains("640x480"));
        assert!(text.contains("#ffffff"));
    }
}
