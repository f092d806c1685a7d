//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene pipeline and mesh buffers
//! - The projection panel overlay
//! - Frame rendering

use std::sync::Arc;
use winit::{event::WindowEvent, window::Window};
use starfield_core::{view_matrix, Instance, ProjectionSettings, Starfield};
use starfield_render::{
    context::RenderContext,
    mesh::MeshLibrary,
    pipeline::ScenePipeline,
    ui::{projection_panel, UiOverlay},
    RenderError,
};
use crate::config::AppConfig;

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ScenePipeline,
    meshes: MeshLibrary,
    ui: UiOverlay,
    projection: ProjectionSettings,
    instances: Vec<Instance>,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    ///
    /// Fails when no GPU is usable or a mesh cannot be loaded.
    pub fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(
            window.clone(),
            config.window.vsync,
        ))?;

        let meshes = MeshLibrary::load(&context.device, &config.assets.path)?;

        let mut pipeline = ScenePipeline::new(
            &context.device,
            context.config.format,
            starfield_core::STAR_COUNT + 1 + starfield_core::PLANET_COUNT,
        );
        pipeline.ensure_depth_texture(
            &context.device,
            context.size.width,
            context.size.height,
        );

        let ui = UiOverlay::new(&context.device, context.config.format, &window);

        Ok(Self {
            context,
            pipeline,
            meshes,
            ui,
            projection: config.camera.to_projection_settings(),
            instances: Vec::new(),
            clear_color: config.rendering.clear_color(),
        })
    }

    /// Pass a window event to the overlay
    ///
    /// Returns true when the overlay consumed it.
    pub fn handle_ui_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.ui.handle_window_event(window, event)
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline
            .ensure_depth_texture(&self.context.device, width, height);
        log::info!("Resized to {}x{}", width, height);
    }

    /// Configure the surface again after it was lost
    pub fn reconfigure(&self) {
        self.context.reconfigure();
    }

    /// Switch between perspective and orthographic projection
    pub fn toggle_projection(&mut self) {
        self.projection.mode = self.projection.mode.toggled();
        log::info!("Projection: {}", self.projection.mode);
    }

    /// Render a single frame: scene first, then the panel on top
    pub fn render_frame(&mut self, window: &Window, field: &Starfield) -> Result<(), RenderError> {
        // Acquire first so a lost surface does not consume a UI frame
        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // The panel may change the projection used below
        let projection = &mut self.projection;
        let mut changed = false;
        let ui_frame = self.ui.run(window, |ctx| {
            changed |= projection_panel(ctx, projection);
        });
        if changed {
            log::info!(
                "Projection: {} (fov {:.0})",
                self.projection.mode,
                self.projection.fov_degrees
            );
        }

        let aspect = self.context.aspect_ratio();
        self.pipeline.update_frame(
            &self.context.queue,
            view_matrix(),
            self.projection.matrix(aspect),
        );

        field.collect_instances(&mut self.instances);
        self.pipeline
            .ensure_capacity(&self.context.device, self.instances.len());
        self.pipeline
            .upload_instances(&self.context.queue, &self.instances);

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        if let Err(e) = self.pipeline.render(
            &mut encoder,
            &view,
            self.clear_color,
            &self.meshes,
            &self.instances,
        ) {
            self.ui.defer(ui_frame);
            return Err(e);
        }

        let size = [self.context.size.width, self.context.size.height];
        let ui_buffers = self.ui.paint(
            &self.context.device,
            &self.context.queue,
            &mut encoder,
            &view,
            size,
            ui_frame,
        );

        self.context
            .queue
            .submit(ui_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        Ok(())
    }

    /// Release mesh buffers and pipeline resources
    pub fn shutdown(&mut self) {
        self.meshes.release();
        self.pipeline.destroy();
        log::info!("Released GPU resources");
    }
}
