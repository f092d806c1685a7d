//! GPU buffers for the scene meshes

use std::collections::BTreeMap;
use std::path::Path;

use starfield_core::{AssetError, MeshData, MeshKind};
use wgpu::util::DeviceExt;

use crate::pipeline::Vertex;

/// Vertex and index buffers for one mesh
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Upload a mesh to the GPU
    pub fn new(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .map(|&position| Vertex { position })
            .collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Bind the buffers and issue an indexed draw
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Free the GPU buffers
    pub fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

/// Every mesh a scene instance can reference
#[derive(Default)]
pub struct MeshLibrary {
    meshes: BTreeMap<MeshKind, GpuMesh>,
}

impl MeshLibrary {
    /// Load all [`MeshKind`] OBJ files from `assets_dir`
    pub fn load(device: &wgpu::Device, assets_dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let assets_dir = assets_dir.as_ref();
        let mut meshes = BTreeMap::new();

        for kind in MeshKind::ALL {
            let data = MeshData::load_obj(assets_dir.join(kind.file_name()))?;
            meshes.insert(kind, GpuMesh::new(device, kind.file_name(), &data));
        }

        log::info!(
            "Loaded {} meshes from {}",
            meshes.len(),
            assets_dir.display()
        );
        Ok(Self { meshes })
    }

    /// Mesh for `kind`, if loaded
    pub fn get(&self, kind: MeshKind) -> Option<&GpuMesh> {
        self.meshes.get(&kind)
    }

    /// Destroy every mesh and empty the library
    pub fn release(&mut self) {
        for mesh in self.meshes.values() {
            mesh.destroy();
        }
        self.meshes.clear();
    }
}
