mod clock;
mod host;
mod keymap;

use anyhow::Result;
use clap::Parser;
use clock::MoveClock;
use glam::Vec2;
use host::{FixedHost, WindowHost};
use scenegen_common::Viewport;
use scenegen_input::InputEvent;
use scenegen_render::HeadlessRenderer;
use scenegen_render_wgpu::WgpuRenderer;
use scenegen_runtime::{AppContext, Bootstrap, SceneConfig};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "scenegen-desktop", about = "Scene bootstrap with a wireframe placeholder")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Window title
    #[arg(long, default_value = "scenegen")]
    title: String,

    /// Bootstrap without a window, draw one recorded frame, and print it
    #[arg(long)]
    headless: bool,
}

struct DesktopApp {
    cli: Cli,
    host: Option<WindowHost>,
    ctx: Option<AppContext<WgpuRenderer>>,
    clock: MoveClock,
    error: Option<anyhow::Error>,
}

impl DesktopApp {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            host: None,
            ctx: None,
            clock: MoveClock::new(Instant::now()),
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.cli.title.clone())
            .with_transparent(true)
            .with_inner_size(LogicalSize::new(self.cli.width, self.cli.height));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let mut host = WindowHost::new(window.clone());

        let mut ctx = Bootstrap::new(SceneConfig::default()).initialize(
            &mut host,
            |settings, viewport| WgpuRenderer::new(window.clone(), settings, viewport),
        )?;
        ctx.render_frame(&mut host);
        tracing::info!(
            format = ?ctx.renderer().surface_format(),
            samples = ctx.renderer().sample_count(),
            "window ready"
        );

        self.host = Some(host);
        self.ctx = Some(ctx);
        Ok(())
    }

    fn dispatch_input(&mut self, event: InputEvent) {
        if let (Some(host), Some(ctx)) = (&mut self.host, &mut self.ctx) {
            let was_moving = ctx.is_camera_moving();
            ctx.handle_input(host, &event);
            self.clock.observe(was_moving, ctx.is_camera_moving(), Instant::now());
        }
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(input) = keymap::translate(&event) {
            self.dispatch_input(input);
        }

        let (Some(host), Some(ctx)) = (&mut self.host, &mut self.ctx) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if host.delivers_resize() {
                    ctx.handle_resize(host);
                }
            }
            WindowEvent::RedrawRequested => {
                ctx.render_frame(host);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.dispatch_input(InputEvent::PointerMoved {
                delta: Vec2::new(delta.0 as f32, delta.1 as f32),
            });
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(host), Some(ctx)) = (&mut self.host, &mut self.ctx) else {
            return;
        };
        if ctx.is_camera_moving() {
            let dt = self.clock.tick(Instant::now());
            ctx.update(host, dt);
            event_loop.set_control_flow(ControlFlow::Poll);
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}

fn run_headless(cli: &Cli) -> Result<()> {
    let mut host = FixedHost::new(Viewport::new(cli.width, cli.height));
    let mut ctx = Bootstrap::new(SceneConfig::default())
        .initialize(&mut host, |settings, viewport| {
            Ok(HeadlessRenderer::new(settings, viewport))
        })?;
    ctx.render_frame(&mut host);
    print!("{}", ctx.renderer().describe());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    tracing::info!("scenegen-desktop starting");

    if cli.headless {
        return run_headless(&cli);
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = DesktopApp::new(cli);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
