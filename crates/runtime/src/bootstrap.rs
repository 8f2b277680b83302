use crate::{
    AppContext, BootstrapError, Host, LightingSetup, LightingStatus, PendingLighting,
    ResizeReactor, SceneConfig,
};
use scenegen_camera::{CameraRig, PerspectiveCamera};
use scenegen_common::Viewport;
use scenegen_render::{RenderError, Renderer, RendererSettings};
use scenegen_scene::{BasicMaterial, Mesh, Scene, SphereGeometry};

/// One-shot initialization sequence.
///
/// Order: scene, renderer binding, camera rig, lighting, placeholder mesh,
/// resize subscription. `initialize` consumes the sequencer.
pub struct Bootstrap {
    config: SceneConfig,
    lighting: Box<dyn LightingSetup>,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Bootstrap {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            lighting: Box::new(PendingLighting),
        }
    }

    /// Replace the lighting stage.
    pub fn with_lighting(mut self, lighting: impl LightingSetup + 'static) -> Self {
        self.lighting = Box::new(lighting);
        self
    }

    /// Run the sequence against `host`, building the renderer with `create_renderer`.
    ///
    /// Any failure aborts startup.
    pub fn initialize<R, H, F>(
        self,
        host: &mut H,
        create_renderer: F,
    ) -> Result<AppContext<R>, BootstrapError>
    where
        R: Renderer,
        H: Host + ?Sized,
        F: FnOnce(RendererSettings, Viewport) -> Result<R, RenderError>,
    {
        let _span = tracing::info_span!("bootstrap").entered();
        tracing::info!("initializing");
        self.config.validate()?;

        let mut scene = Scene::new();

        let viewport = host.viewport();
        let settings = RendererSettings {
            clear_color: self.config.clear_color,
            pixel_ratio: host.pixel_ratio(),
            ..RendererSettings::default()
        };
        tracing::info!(%viewport, pixel_ratio = settings.pixel_ratio, "creating renderer");
        let mut renderer = create_renderer(settings, viewport)?;
        renderer.set_physical_size(host.physical_size());

        tracing::info!("creating camera");
        let camera = PerspectiveCamera::new(
            self.config.fov_degrees,
            viewport.aspect(),
            self.config.near,
            self.config.far,
        );
        let rig = CameraRig::new(camera, self.config.camera_position, scene.position());

        tracing::info!("creating lighting");
        let lighting = self.lighting.setup(&mut scene);
        match lighting {
            LightingStatus::Applied { lights } => tracing::info!(lights, "lighting applied"),
            LightingStatus::NotYetImplemented => {
                tracing::warn!("lighting not yet implemented, scene has no lights")
            }
        }

        tracing::info!("adding placeholder mesh");
        let placeholder = self.config.placeholder;
        let geometry = SphereGeometry::new(
            placeholder.radius,
            placeholder.width_segments,
            placeholder.height_segments,
        )
        .build();
        let material = BasicMaterial {
            color: placeholder.color,
            wireframe: placeholder.wireframe,
        };
        scene.add_mesh(Mesh::new(geometry, material));

        let mut resize = ResizeReactor::new();
        resize.ensure_subscribed(host);

        tracing::info!(
            meshes = scene.mesh_count(),
            lights = scene.light_count(),
            "initialized"
        );

        Ok(AppContext {
            viewport,
            renderer,
            scene,
            rig,
            resize,
            lighting,
            frames: 0,
        })
    }
}
