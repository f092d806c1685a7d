//! Starfield - flying through an endless field of stars and planets
//!
//! Opens a window, streams recycled stars and planets past a fixed ship and
//! shows a small panel for switching the camera projection.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use starfield::config::AppConfig;
use starfield::input::{InputAction, InputMapper};
use starfield::systems::{RenderSystem, SimulationSystem, WindowSystem};
use starfield_core::Starfield;
use starfield_render::RenderError;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    simulation: SimulationSystem,
    field: Starfield,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let field = match config.scene.seed {
            Some(seed) => {
                log::info!("Seeding starfield with {}", seed);
                Starfield::with_seed(seed)
            }
            None => Starfield::new(),
        };

        Self {
            config,
            window_system: None,
            render_system: None,
            simulation: SimulationSystem::new(),
            field,
        }
    }

    /// Release GPU resources before the window goes away
    fn shutdown(&mut self) {
        if let Some(mut render_system) = self.render_system.take() {
            render_system.shutdown();
        }
        self.window_system = None;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_some() {
            return;
        }

        let window_system = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window_system) => window_system,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match RenderSystem::new(window_system.window().clone(), &self.config) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        window_system.request_redraw();
        self.simulation.reset();
        self.window_system = Some(window_system);
        self.render_system = Some(render_system);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let (Some(window_system), Some(render_system)) =
            (&self.window_system, &mut self.render_system)
        else {
            return;
        };

        let consumed = render_system.handle_ui_event(window_system.window(), &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                render_system.resize(physical_size.width, physical_size.height);
            }

            WindowEvent::KeyboardInput { event, .. } if !consumed => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                match InputMapper::map_keyboard(key, event.state, event.repeat) {
                    Some(InputAction::Exit) => event_loop.exit(),
                    Some(InputAction::ToggleFullscreen) => window_system.toggle_fullscreen(),
                    Some(InputAction::ToggleProjection) => render_system.toggle_projection(),
                    None => {}
                }
            }

            WindowEvent::RedrawRequested => {
                self.simulation.update(&mut self.field);

                match render_system.render_frame(window_system.window(), &self.field) {
                    Ok(()) => {}
                    Err(RenderError::SurfaceLost) => render_system.reconfigure(),
                    Err(RenderError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                        event_loop.exit();
                        return;
                    }
                    Err(e) => log::warn!("{}", e),
                }

                // Request next frame
                window_system.request_redraw();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
        log::info!("Shutting down");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG takes precedence over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting Starfield");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
