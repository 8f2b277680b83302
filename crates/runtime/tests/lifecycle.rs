use glam::Vec2;
use scenegen_common::{Color, Viewport};
use scenegen_input::{InputEvent, Key, PointerButton};
use scenegen_render::{HeadlessRenderer, RenderError, Renderer};
use scenegen_runtime::{
    AppContext, Bootstrap, BootstrapError, Host, LightingStatus, ResizeSubscription, SceneConfig,
};
use scenegen_scene::{Light, Scene};

/// Host whose window size is set by the test.
struct ScriptedHost {
    width: u32,
    height: u32,
    pixel_ratio: f64,
    /// Exact physical size, when the test wants one that differs from rounding.
    physical: Option<(u32, u32)>,
    subscriptions: u64,
}

impl ScriptedHost {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
            physical: None,
            subscriptions: 0,
        }
    }
}

impl Host for ScriptedHost {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn physical_size(&self) -> (u32, u32) {
        self.physical.unwrap_or_else(|| self.viewport().physical(self.pixel_ratio))
    }

    fn subscribe_resize(&mut self) -> ResizeSubscription {
        self.subscriptions += 1;
        ResizeSubscription(self.subscriptions)
    }
}

fn boot(host: &mut ScriptedHost) -> AppContext<HeadlessRenderer> {
    Bootstrap::default()
        .initialize(host, |settings, viewport| {
            Ok(HeadlessRenderer::new(settings, viewport))
        })
        .expect("bootstrap")
}

#[test]
fn bootstrap_sizes_everything_from_the_host() {
    for (w, h) in [(1280, 720), (800, 600), (1, 1), (3840, 2160), (600, 900)] {
        let mut host = ScriptedHost::new(w, h);
        let ctx = boot(&mut host);

        assert_eq!(ctx.viewport(), Viewport::new(w, h));
        assert_eq!(ctx.renderer().size(), Viewport::new(w, h));
        assert_eq!(ctx.camera().aspect, w as f32 / h as f32);
        assert_eq!(ctx.scene().mesh_count(), 1);
        assert_eq!(ctx.scene().light_count(), 0);
    }
}

#[test]
fn bootstrap_applies_fixed_parameters() {
    let mut host = ScriptedHost::new(1024, 768);
    host.pixel_ratio = 2.0;
    let ctx = boot(&mut host);

    let cam = ctx.camera();
    assert_eq!(cam.fov, 90.0);
    assert_eq!((cam.near, cam.far), (1.0, 1000.0));
    assert_eq!(cam.position, glam::Vec3::new(0.0, 10.0, 0.0));
    assert!(cam.forward().abs_diff_eq(glam::Vec3::NEG_Y, 1e-5));

    let settings = ctx.renderer().settings();
    assert!(settings.antialias && settings.alpha && settings.depth);
    assert_eq!(settings.clear_color, Color::from_hex(0xffffff));
    assert_eq!(settings.pixel_ratio, 2.0);

    let (_, mesh) = ctx.scene().meshes().iter().next().unwrap();
    assert!(mesh.material.wireframe);
    assert_eq!(mesh.material.color.to_hex(), 0x222324);
    assert!((mesh.geometry.bounding_radius() - 2.0).abs() < 1e-4);
    assert_eq!(mesh.geometry.vertex_count(), 17 * 17);

    assert_eq!(ctx.lighting_status(), LightingStatus::NotYetImplemented);
    assert_eq!(ctx.frames_rendered(), 0);
}

#[test]
fn lighting_hook_populates_the_scene() {
    let mut host = ScriptedHost::new(640, 480);
    let ctx = Bootstrap::default()
        .with_lighting(|scene: &mut Scene| {
            scene.add_light(Light::ambient(Color::WHITE, 0.3));
            scene.add_light(Light::directional(
                Color::WHITE,
                0.8,
                glam::Vec3::new(-1.0, -1.0, 0.0),
            ));
            LightingStatus::Applied { lights: 2 }
        })
        .initialize(&mut host, |s, v| Ok(HeadlessRenderer::new(s, v)))
        .unwrap();

    assert_eq!(ctx.scene().light_count(), 2);
    assert_eq!(ctx.lighting_status(), LightingStatus::Applied { lights: 2 });
}

#[test]
fn renderer_failure_is_fatal_to_bootstrap() {
    let mut host = ScriptedHost::new(640, 480);
    let result = Bootstrap::default()
        .initialize(&mut host, |_, _| Err::<HeadlessRenderer, _>(RenderError::NoAdapter));
    assert!(matches!(
        result,
        Err(BootstrapError::Renderer(RenderError::NoAdapter))
    ));
    assert_eq!(host.subscriptions, 0);
}

#[test]
fn invalid_camera_is_fatal_before_renderer_creation() {
    let mut host = ScriptedHost::new(640, 480);
    let mut created = false;
    let config = SceneConfig {
        near: 0.0,
        ..SceneConfig::default()
    };
    let result = Bootstrap::new(config).initialize(&mut host, |s, v| {
        created = true;
        Ok(HeadlessRenderer::new(s, v))
    });
    assert!(matches!(result, Err(BootstrapError::InvalidCamera(_))));
    assert!(!created);
}

#[test]
fn resize_keeps_viewport_renderer_and_aspect_consistent() {
    let mut host = ScriptedHost::new(1280, 720);
    let mut ctx = boot(&mut host);

    for (w, h) in [(800, 600), (1920, 1080), (333, 777), (1, 5000)] {
        host.width = w;
        host.height = h;
        assert!(ctx.handle_resize(&mut host));

        assert_eq!(ctx.viewport(), Viewport::new(w, h));
        assert_eq!(ctx.renderer().size(), Viewport::new(w, h));
        assert_eq!(ctx.camera().aspect, w as f32 / h as f32);

        let frame = ctx.renderer().last_frame().unwrap();
        assert_eq!(frame.viewport, Viewport::new(w, h));
        assert_eq!(frame.view_projection, ctx.camera().view_projection());
    }
    assert_eq!(ctx.frames_rendered(), 4);
}

#[test]
fn resize_to_zero_height_clamps() {
    let mut host = ScriptedHost::new(1280, 720);
    let mut ctx = boot(&mut host);

    host.width = 800;
    host.height = 0;
    ctx.handle_resize(&mut host);

    assert_eq!(ctx.viewport(), Viewport::new(800, 1));
    assert_eq!(ctx.camera().aspect, 800.0);
    assert!(ctx.camera().aspect.is_finite());
    assert!(!ctx.camera().view_projection().is_nan());
}

#[test]
fn resize_picks_up_pixel_ratio_changes() {
    let mut host = ScriptedHost::new(500, 400);
    let mut ctx = boot(&mut host);

    host.pixel_ratio = 1.5;
    ctx.handle_resize(&mut host);

    assert_eq!(ctx.renderer().pixel_ratio(), 1.5);
    assert_eq!(ctx.renderer().last_frame().unwrap().physical, (750, 600));
}

#[test]
fn host_physical_size_is_used_exactly() {
    let mut host = ScriptedHost::new(333, 777);
    host.pixel_ratio = 1.5;
    host.physical = Some((499, 1165));
    let mut ctx = boot(&mut host);
    assert_eq!(ctx.renderer().physical_size(), (499, 1165));

    host.width = 667;
    host.physical = Some((1001, 1165));
    ctx.handle_resize(&mut host);
    assert_eq!(ctx.renderer().last_frame().unwrap().physical, (1001, 1165));
    assert_eq!(ctx.viewport(), Viewport::new(667, 777));
}

#[test]
fn repeated_renders_are_identical() {
    let mut host = ScriptedHost::new(1280, 720);
    let mut ctx = boot(&mut host);
    let camera = ctx.camera().clone();

    for _ in 0..25 {
        ctx.render_frame(&mut host);
    }

    let frames = ctx.renderer().frames();
    assert_eq!(frames.len(), 25);
    assert!(frames.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(ctx.camera(), &camera);
    assert_eq!(ctx.scene().mesh_count(), 1);
}

#[test]
fn camera_change_triggers_exactly_one_render() {
    let mut host = ScriptedHost::new(1280, 720);
    let mut ctx = boot(&mut host);
    ctx.render_frame(&mut host);
    let before = ctx.renderer().last_frame().unwrap().view_projection;

    assert!(!ctx.handle_input(&mut host, &InputEvent::PointerDown(PointerButton::Primary)));
    assert_eq!(ctx.renderer().frame_count(), 1);

    let drag = InputEvent::PointerMoved {
        delta: Vec2::new(120.0, 30.0),
    };
    assert!(ctx.handle_input(&mut host, &drag));
    assert_eq!(ctx.renderer().frame_count(), 2);

    let frame = ctx.renderer().last_frame().unwrap();
    let mut expected = ctx.camera().clone();
    expected.update_projection_matrix();
    assert_eq!(frame.view_projection, expected.view_projection());
    assert_ne!(frame.view_projection, before);
}

#[test]
fn horizontal_drag_from_bootstrap_pose_keeps_pitch() {
    let mut host = ScriptedHost::new(1280, 720);
    let mut ctx = boot(&mut host);
    let pitch = ctx.camera().pitch;

    ctx.handle_input(&mut host, &InputEvent::PointerDown(PointerButton::Primary));
    let drag = InputEvent::PointerMoved {
        delta: Vec2::new(1.0, 0.0),
    };
    assert!(ctx.handle_input(&mut host, &drag));

    assert_eq!(ctx.camera().pitch, pitch);
    assert!(ctx.camera().forward().y < -0.999);
    assert!(!ctx.rig().controls.is_frozen());
}

#[test]
fn held_keys_move_the_camera_on_update() {
    let mut host = ScriptedHost::new(1280, 720);
    let mut ctx = boot(&mut host);

    assert!(!ctx.update(&mut host, 0.016));
    ctx.handle_input(&mut host, &InputEvent::KeyDown(Key::Up));
    assert!(ctx.is_camera_moving());
    assert!(ctx.update(&mut host, 0.5));

    assert!((ctx.camera().position.y - 15.0).abs() < 1e-4);
    let frame = ctx.renderer().last_frame().unwrap();
    assert_eq!(frame.camera_position, ctx.camera().position);
    assert_eq!(frame.view_projection, ctx.camera().view_projection());

    ctx.handle_input(&mut host, &InputEvent::KeyUp(Key::Up));
    assert!(!ctx.is_camera_moving());
    assert_eq!(ctx.renderer().frame_count(), 1);
}

#[test]
fn resize_subscription_is_made_once() {
    let mut host = ScriptedHost::new(1280, 720);
    let mut ctx = boot(&mut host);
    assert_eq!(host.subscriptions, 1);

    for _ in 0..100 {
        ctx.render_frame(&mut host);
    }
    host.width = 640;
    ctx.handle_resize(&mut host);
    ctx.handle_input(&mut host, &InputEvent::PointerDown(PointerButton::Primary));
    ctx.handle_input(
        &mut host,
        &InputEvent::PointerMoved {
            delta: Vec2::new(5.0, 5.0),
        },
    );

    assert_eq!(host.subscriptions, 1);
    assert_eq!(
        ctx.resize_reactor().subscription(),
        Some(ResizeSubscription(1))
    );
    assert_eq!(ctx.frames_rendered(), 102);
}

#[test]
fn failed_frame_is_not_fatal() {
    let mut host = ScriptedHost::new(1280, 720);
    let mut ctx = Bootstrap::default()
        .initialize(&mut host, |s, v| {
            let mut renderer = HeadlessRenderer::new(s, v);
            renderer.fail_next_frame();
            Ok(renderer)
        })
        .unwrap();

    ctx.render_frame(&mut host);
    assert_eq!(ctx.frames_rendered(), 0);
    ctx.render_frame(&mut host);
    assert_eq!(ctx.frames_rendered(), 1);
}
