//! Immediate-mode overlay drawn on top of the scene
//!
//! [`UiOverlay`] owns the egui context, its winit integration and its wgpu
//! renderer. [`projection_panel`] is the one widget window the demo shows.

use starfield_core::{ProjectionMode, ProjectionSettings, FOV_RANGE};
use winit::event::WindowEvent;
use winit::window::Window;

/// Size of the projection panel in points
pub const PANEL_SIZE: egui::Vec2 = egui::vec2(218.0, 62.0);

/// Gap between the panel and the top-right corner
pub const PANEL_MARGIN: f32 = 5.0;

const COMBO_WIDTH: f32 = 120.0;
const SLIDER_WIDTH: f32 = 170.0;

/// Top-left corner of the panel for a screen `screen_width` points wide
pub fn panel_position(screen_width: f32) -> egui::Pos2 {
    egui::pos2(screen_width - PANEL_SIZE.x - PANEL_MARGIN, PANEL_MARGIN)
}

/// Draw the projection panel, returning whether `settings` changed
///
/// The FOV slider is only shown in perspective mode.
pub fn projection_panel(ctx: &egui::Context, settings: &mut ProjectionSettings) -> bool {
    let before = *settings;

    egui::Window::new("Widget window")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .movable(false)
        .fixed_pos(panel_position(ctx.screen_rect().width()))
        .fixed_size(PANEL_SIZE)
        .show(ctx, |ui| {
            egui::ComboBox::from_label("Projection")
                .width(COMBO_WIDTH)
                .selected_text(settings.mode.label())
                .show_ui(ui, |ui| {
                    for mode in ProjectionMode::ALL {
                        ui.selectable_value(&mut settings.mode, mode, mode.label());
                    }
                });

            if settings.mode == ProjectionMode::Perspective {
                ui.spacing_mut().slider_width = SLIDER_WIDTH;
                ui.add(
                    egui::Slider::new(&mut settings.fov_degrees, FOV_RANGE)
                        .text("FOV")
                        .suffix(" degrees")
                        .fixed_decimals(0),
                );
            }
        });

    *settings != before
}

/// Combine texture updates that were never painted with the newest ones
///
/// egui only sends the font atlas once, so updates from a frame that failed
/// to reach the GPU must be replayed before the next frame's.
pub fn merge_pending(
    pending: &mut egui::TexturesDelta,
    fresh: egui::TexturesDelta,
) -> egui::TexturesDelta {
    let mut delta = std::mem::take(pending);
    delta.append(fresh);
    delta
}

/// Tessellated UI output waiting to be painted
pub struct UiFrame {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    pixels_per_point: f32,
}

/// egui state bound to one window and surface format
pub struct UiOverlay {
    context: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    /// Texture updates from frames that were never painted
    pending_textures: egui::TexturesDelta,
}

impl UiOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let context = egui::Context::default();
        let state = egui_winit::State::new(
            context.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            context,
            state,
            renderer,
            pending_textures: egui::TexturesDelta::default(),
        }
    }

    /// Feed a window event to egui
    ///
    /// Returns true when the UI consumed the event and the application
    /// should not act on it.
    pub fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run one UI pass and tessellate the result
    pub fn run(&mut self, window: &Window, build: impl FnMut(&egui::Context)) -> UiFrame {
        let raw_input = self.state.take_egui_input(window);
        let output = self.context.run(raw_input, build);
        self.state
            .handle_platform_output(window, output.platform_output);

        let paint_jobs = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);

        UiFrame {
            paint_jobs,
            textures_delta: merge_pending(&mut self.pending_textures, output.textures_delta),
            pixels_per_point: output.pixels_per_point,
        }
    }

    /// Keep the texture updates of a frame that will not be painted
    pub fn defer(&mut self, frame: UiFrame) {
        self.pending_textures.append(frame.textures_delta);
    }

    /// Record the UI pass on top of `view`
    ///
    /// Returns command buffers egui prepared that must be submitted before
    /// `encoder`.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        frame: UiFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };
        let user_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &frame.paint_jobs, &screen);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("UI Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut render_pass = render_pass.forget_lifetime();
            self.renderer
                .render(&mut render_pass, &frame.paint_jobs, &screen);
        }

        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }

        user_buffers
    }
}
