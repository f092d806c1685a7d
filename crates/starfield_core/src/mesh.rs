//! CPU-side mesh data loaded from OBJ files
//!
//! Meshes are triangulated, indexed by position and standardized so that
//! every model fits the same unit volume regardless of authoring scale.

use std::fs;
use std::io::{BufRead, Cursor};
use std::path::Path;

use glam::Vec3;

use crate::asset_error::AssetError;

/// Triangle mesh with positions and indices
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Triangle list indices into `positions`
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Load and standardize a mesh from an OBJ file
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }

        let source = fs::read_to_string(path)?;
        let mesh = Self::parse(&mut Cursor::new(source), &path.display().to_string())?;

        log::debug!(
            "Loaded {}: {} vertices, {} triangles",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parse and standardize a mesh from OBJ text
    ///
    /// Material libraries referenced by the source are ignored.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, AssetError> {
        Self::parse(reader, "<reader>")
    }

    /// Parse, validate and standardize; errors name `source`
    fn parse<R: BufRead>(reader: &mut R, source: &str) -> Result<Self, AssetError> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &load_options(), |_| Ok((Vec::new(), Default::default())))
                .map_err(|e| AssetError::Parse(format!("{}: {}", source, e)))?;
        let mut mesh = Self::from_models(models);
        if mesh.is_empty() {
            return Err(AssetError::Empty(source.to_string()));
        }
        mesh.standardize();
        Ok(mesh)
    }

    /// Merge every model into one index space
    fn from_models(models: Vec<tobj::Model>) -> Self {
        let mut mesh = Self::default();
        for model in models {
            let offset = mesh.positions.len() as u32;
            mesh.positions.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| [p[0], p[1], p[2]]),
            );
            mesh.indices
                .extend(model.mesh.indices.iter().map(|index| index + offset));
        }
        mesh
    }

    /// Center on the bounding box and scale by the inverse half diagonal
    pub fn standardize(&mut self) {
        let Some((min, max)) = self.bounds() else {
            return;
        };

        let center = (min + max) / 2.0;
        let diagonal = (max - min).length();
        let scaling = if diagonal > 0.0 { 2.0 / diagonal } else { 1.0 };

        for position in &mut self.positions {
            let p = (Vec3::from_array(*position) - center) * scaling;
            *position = p.to_array();
        }
    }

    /// Axis-aligned bounds, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.len() < 3
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
v 0 0 0
v 4 0 0
v 4 2 0
v 0 2 0
f 1 2 3 4
";

    const TWO_OBJECTS: &str = "\
o a
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o b
v 0 0 1
v 1 0 1
v 0 1 1
f 4 5 6
";

    #[test]
    fn test_quad_is_triangulated() {
        let mesh = MeshData::from_obj_reader(&mut Cursor::new(QUAD)).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_standardize_centers_and_scales() {
        let mesh = MeshData::from_obj_reader(&mut Cursor::new(QUAD)).unwrap();
        let (min, max) = mesh.bounds().unwrap();
        let center = (min + max) / 2.0;
        assert!(center.length() < 1e-5);
        // Diagonal is scaled to length 2
        assert!(((max - min).length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_models_share_index_space() {
        let mesh = MeshData::from_obj_reader(&mut Cursor::new(TWO_OBJECTS)).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.indices[3..].iter().all(|&i| i >= 3));
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_empty_source_is_error() {
        let result = MeshData::from_obj_reader(&mut Cursor::new("# nothing here\n"));
        assert!(matches!(result, Err(AssetError::Empty(_))));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = MeshData::load_obj("does/not/exist.obj");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_malformed_source_names_origin() {
        let result = MeshData::from_obj_reader(&mut Cursor::new("v 1 x 2\nf 1 1 1\n"));
        match result {
            Err(AssetError::Parse(msg)) => assert!(msg.starts_with("<reader>: ")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_file_names_its_path() {
        let path = std::env::temp_dir().join(format!("starfield_bad_{}.obj", std::process::id()));
        std::fs::write(&path, "v 1 x 2\nf 1 1 1\n").unwrap();
        let result = MeshData::load_obj(&path);
        std::fs::remove_file(&path).unwrap();
        match result {
            Err(AssetError::Parse(msg)) => assert!(msg.contains(&*path.display().to_string())),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        // A directory exists but cannot be read as text
        let result = MeshData::load_obj(std::env::temp_dir());
        assert!(matches!(result, Err(AssetError::Io(_))));
    }

    #[test]
    fn test_standardize_single_point() {
        let mut mesh = MeshData {
            positions: vec![[3.0, 3.0, 3.0]],
            indices: Vec::new(),
        };
        mesh.standardize();
        assert_eq!(mesh.positions[0], [0.0, 0.0, 0.0]);
    }
}
