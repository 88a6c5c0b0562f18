//! retrodesk - walk up to a desk, scroll into the monitor, land on a retro
//! desktop.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use retrodesk::camera::ViewCamera;
use retrodesk::cli::Args;
use retrodesk::desktop::{Desktop, DesktopCommand, LoginOutcome, NUDGE_PX};
use retrodesk::error::AppError;
use retrodesk::events::{resize_event, translate_window_event, DeviceEvent, EventHub};
use retrodesk::params::{ChoreographyParams, RenderConfig};
use retrodesk::rendering::{RenderSystem, Uniforms};
use retrodesk::room::RoomMesh;
use retrodesk::scene::Scene;
use retrodesk::tour::{self, Tour};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    room: RoomMesh,

    // Choreography
    hub: EventHub,
    scene: Scene,
    camera: ViewCamera,
    desktop: Desktop,

    // Configuration
    render_config: RenderConfig,

    // Time tracking
    last_frame: Instant,
    fatal: Option<AppError>,
}

impl App {
    fn new(params: ChoreographyParams, render_config: RenderConfig) -> Self {
        let hub = EventHub::new();
        let mut scene = Scene::new(params, render_config.mobile_breakpoint_px);
        scene.attach(&hub);
        let camera = ViewCamera::new(scene.driver().pose());

        Self {
            window: None,
            render_system: None,
            room: RoomMesh::new(),
            hub,
            scene,
            camera,
            desktop: Desktop::new(),
            render_config,
            last_frame: Instant::now(),
            fatal: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attributes = Window::default_attributes()
            .with_title("retrodesk")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.room))?;

        // Establish the initial layout before the first frame
        let resize = resize_event(window.inner_size(), window.scale_factor());
        if let DeviceEvent::Resize { width, height } = resize {
            self.render_config.window_width = width;
            self.render_config.window_height = height;
            info!("window ready ({}x{} logical), press ESC to quit", width, height);
        }
        self.hub.dispatch(&resize);

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |w| w.scale_factor())
    }

    /// Keys typed while the login prompt is up go to the passcode field;
    /// once unlocked they drive the desktop shortcuts
    fn handle_desktop_key(&mut self, key: &Key) {
        let layers = self.scene.layers();
        if layers.desktop_visible && !layers.login_visible {
            self.handle_shortcut(key);
            return;
        }
        if !layers.login_visible {
            return;
        }
        let store = self.scene.store();
        match key {
            Key::Named(NamedKey::Enter) => {
                if self.desktop.login.submit_buffer(&mut store.borrow_mut()) == LoginOutcome::Unlocked {
                    let (width, height) = (
                        self.render_config.window_width as f32,
                        self.render_config.window_height as f32,
                    );
                    if let Err(err) = self.desktop.on_unlocked(width, height) {
                        warn!("{}", err);
                    }
                }
            }
            Key::Named(NamedKey::Backspace) | Key::Named(NamedKey::Escape) => {
                self.desktop.login.clear()
            }
            Key::Character(text) => text.chars().for_each(|c| self.desktop.login.push_char(c)),
            _ => {}
        }
    }

    fn handle_shortcut(&mut self, key: &Key) {
        let command = match key {
            Key::Character(text) => text.chars().next().and_then(DesktopCommand::from_char),
            Key::Named(NamedKey::ArrowLeft) => Some(DesktopCommand::NudgeTop { dx: -NUDGE_PX, dy: 0.0 }),
            Key::Named(NamedKey::ArrowRight) => Some(DesktopCommand::NudgeTop { dx: NUDGE_PX, dy: 0.0 }),
            Key::Named(NamedKey::ArrowUp) => Some(DesktopCommand::NudgeTop { dx: 0.0, dy: -NUDGE_PX }),
            Key::Named(NamedKey::ArrowDown) => Some(DesktopCommand::NudgeTop { dx: 0.0, dy: NUDGE_PX }),
            _ => None,
        };
        if let Some(command) = command {
            if let Err(err) = self.desktop.apply(command) {
                warn!("{}", err);
            }
        }
    }

    /// Advance the choreography and render a single frame
    fn render_frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.scene.frame(dt, &mut self.camera);
        self.desktop.tick(dt);

        let Some(ref render_system) = self.render_system else {
            return;
        };

        let (view_proj, _camera_pos) = self.camera.view_proj(&self.render_config);
        render_system.update_uniforms(&Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
        });

        if let Err(e) = render_system.render(self.scene.layers(), &self.render_config) {
            warn!("render error: {:?}", e);
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }
        if let Err(err) = self.init_window(event_loop) {
            self.fatal = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(device_event) = translate_window_event(&event, self.scale_factor()) {
            self.hub.dispatch(&device_event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        logical_key: Key::Named(NamedKey::Escape),
                        ..
                    },
                ..
            } if !self.scene.layers().login_visible => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        ref logical_key,
                        ..
                    },
                ..
            } => self.handle_desktop_key(logical_key),
            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<u32>(self.scale_factor());
                self.render_config.window_width = logical.width;
                self.render_config.window_height = logical.height;
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(),
            _ => {}
        }
    }
}

fn run_headless(params: ChoreographyParams, render_config: &RenderConfig, args: &Args, seconds: f32) {
    let hub = EventHub::new();
    let mut scene = Scene::new(params, render_config.mobile_breakpoint_px);
    scene.attach(&hub);
    hub.dispatch(&DeviceEvent::Resize {
        width: render_config.window_width,
        height: render_config.window_height,
    });

    let report = tour::run(&mut scene, &hub, &Tour::guided(), seconds, args.fps);
    for (t, phase) in &report.phase_changes {
        info!("t={:.2}s phase -> {:?}", t, phase);
    }
    info!(
        "final pose: position {:?}, look-at {:?}",
        report.final_pose.position, report.final_pose.look_at
    );
}

fn run(args: Args) -> Result<(), AppError> {
    let params = args.build_params()?;
    let render_config = args.render_config();

    if let Some(seconds) = args.headless {
        run_headless(params, &render_config, &args, seconds);
        return Ok(());
    }

    let mut app = App::new(params, render_config);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
