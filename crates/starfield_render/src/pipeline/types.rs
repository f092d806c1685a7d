//! GPU-compatible data types for the scene pipeline
//!
//! These types match the layouts in `depth.wgsl`. All derive Pod and
//! Zeroable for direct buffer uploads.

use bytemuck::{Pod, Zeroable};
use starfield_core::{Color, Mat4};

/// A mesh vertex; only positions are needed by the depth shader
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    /// Buffer layout for `@location(0) position: vec3<f32>`
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Per-frame camera uniforms
/// Layout: 128 bytes (must match depth.wgsl FrameUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection_matrix: [[f32; 4]; 4],
}

impl FrameUniforms {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view.to_cols_array_2d(),
            projection_matrix: projection.to_cols_array_2d(),
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// Per-instance uniforms
/// Layout: 80 bytes (must match depth.wgsl ObjectUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Model matrix (64 bytes)
    pub model_matrix: [[f32; 4]; 4],
    /// RGBA color (16 bytes)
    pub color: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model: Mat4, color: Color) -> Self {
        Self {
            model_matrix: model.to_cols_array_2d(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex_size() {
        assert_eq!(size_of::<Vertex>(), 12);
        assert_eq!(Vertex::buffer_layout().array_stride, 12);
    }

    #[test]
    fn test_frame_uniforms_size() {
        // Two 4x4 matrices
        assert_eq!(size_of::<FrameUniforms>(), 128);
    }

    #[test]
    fn test_object_uniforms_size() {
        // One 4x4 matrix and a vec4
        assert_eq!(size_of::<ObjectUniforms>(), 80);
    }

    #[test]
    fn test_matrices_are_column_major() {
        let model = Mat4::from_translation(starfield_core::Vec3::new(1.0, 2.0, 3.0));
        let uniforms = ObjectUniforms::new(model, [1.0; 4]);
        assert_eq!(uniforms.model_matrix[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<FrameUniforms>(), 4);
        assert_eq!(std::mem::align_of::<ObjectUniforms>(), 4);
    }
}
