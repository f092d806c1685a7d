//! Render pipeline for the starfield scene
//!
//! Every instance gets its own 256-byte aligned slot in one uniform buffer.
//! The slot is selected with a dynamic offset, so a frame needs a single
//! buffer write and one bind group switch per draw.

use std::num::NonZeroU64;

use starfield_core::{Instance, Mat4};
use wgpu::util::DeviceExt;

use super::types::{FrameUniforms, ObjectUniforms, Vertex};
use crate::mesh::MeshLibrary;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Round `value` up to the next multiple of `alignment`
///
/// `alignment` must be a power of two.
#[inline]
pub const fn align_up(value: u64, alignment: u64) -> u64 {
    (value + alignment - 1) & !(alignment - 1)
}

/// Depth-tested pipeline drawing one mesh per instance
pub struct ScenePipeline {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    /// Bytes between consecutive instance slots
    object_stride: u64,
    /// Number of instance slots in `object_buffer`
    capacity: usize,
    /// Number of slots written by the last upload
    uploaded: usize,
    staging: Vec<u8>,
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
}

impl ScenePipeline {
    /// Create the pipeline with room for `initial_capacity` instances
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        initial_capacity: usize,
    ) -> Self {
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: object_binding_size(),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Depth Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/depth.wgsl").into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Back faces are shaded, not discarded
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::bytes_of(&FrameUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let object_stride = align_up(
            std::mem::size_of::<ObjectUniforms>() as u64,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let capacity = initial_capacity.max(1);
        let (object_buffer, object_bind_group) =
            create_object_slots(device, &object_layout, object_stride, capacity);

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            object_layout,
            object_buffer,
            object_bind_group,
            object_stride,
            capacity,
            uploaded: 0,
            staging: Vec::new(),
            depth_texture: None,
            depth_size: (0, 0),
        }
    }

    /// Ensure depth texture exists and is the right size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            self.depth_texture =
                Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Grow the instance buffer so it holds at least `count` slots
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, count: usize) {
        if count <= self.capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        let (buffer, bind_group) =
            create_object_slots(device, &self.object_layout, self.object_stride, capacity);
        self.object_buffer.destroy();
        self.object_buffer = buffer;
        self.object_bind_group = bind_group;
        self.capacity = capacity;
        log::debug!("Grew instance buffer to {} slots", capacity);
    }

    /// Upload view and projection matrices
    pub fn update_frame(&self, queue: &wgpu::Queue, view: Mat4, projection: Mat4) {
        let uniforms = FrameUniforms::new(view, projection);
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Write one uniform slot per instance
    ///
    /// Call [`ScenePipeline::ensure_capacity`] first; instances beyond the
    /// capacity are not uploaded and will not be drawn.
    pub fn upload_instances(&mut self, queue: &wgpu::Queue, instances: &[Instance]) {
        let count = instances.len().min(self.capacity);
        if count < instances.len() {
            log::warn!(
                "Dropping {} instances over capacity {}",
                instances.len() - count,
                self.capacity
            );
        }

        let stride = self.object_stride as usize;
        self.staging.clear();
        self.staging.resize(count * stride, 0);
        for (slot, instance) in instances[..count].iter().enumerate() {
            let uniforms = ObjectUniforms::new(instance.model, instance.color);
            let start = slot * stride;
            self.staging[start..start + std::mem::size_of::<ObjectUniforms>()]
                .copy_from_slice(bytemuck::bytes_of(&uniforms));
        }

        if !self.staging.is_empty() {
            queue.write_buffer(&self.object_buffer, 0, &self.staging);
        }
        self.uploaded = count;
    }

    /// Clear the frame and draw the uploaded instances
    ///
    /// `instances` must be the slice passed to the last upload.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: wgpu::Color,
        meshes: &MeshLibrary,
        instances: &[Instance],
    ) -> Result<(), crate::RenderError> {
        let depth_view = self.depth_texture.as_ref().ok_or_else(|| {
            crate::RenderError::Other("depth texture not created".to_string())
        })?;

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

        for (slot, instance) in instances.iter().take(self.uploaded).enumerate() {
            let Some(mesh) = meshes.get(instance.mesh) else {
                continue;
            };
            let offset = (slot as u64 * self.object_stride) as wgpu::DynamicOffset;
            render_pass.set_bind_group(1, &self.object_bind_group, &[offset]);
            mesh.draw(&mut render_pass);
        }

        Ok(())
    }

    /// Release GPU buffers ahead of drop
    pub fn destroy(&self) {
        self.frame_buffer.destroy();
        self.object_buffer.destroy();
    }
}

fn object_binding_size() -> Option<NonZeroU64> {
    NonZeroU64::new(std::mem::size_of::<ObjectUniforms>() as u64)
}

fn create_object_slots(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Object Uniform Buffer"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Object Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: object_binding_size(),
            }),
        }],
    });

    (buffer, bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(80, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
        assert_eq!(align_up(80, 16), 80);
        assert_eq!(align_up(0, 64), 0);
    }

    #[test]
    fn test_object_binding_size() {
        assert_eq!(object_binding_size().map(NonZeroU64::get), Some(80));
    }
}
