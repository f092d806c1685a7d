//! Integration tests for the OBJ files shipped in `assets/`

use std::path::PathBuf;

use starfield_core::{AssetError, MeshData, MeshKind};

fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

#[test]
fn test_every_mesh_kind_loads() {
    for kind in MeshKind::ALL {
        let mesh = MeshData::load_obj(assets_dir().join(kind.file_name()))
            .unwrap_or_else(|e| panic!("{:?}: {}", kind, e));
        assert!(mesh.triangle_count() > 0, "{:?} has no triangles", kind);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertex_count()));
    }
}

#[test]
fn test_bundled_meshes_are_standardized() {
    for kind in MeshKind::ALL {
        let mesh = MeshData::load_obj(assets_dir().join(kind.file_name())).unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert!(((min + max) / 2.0).length() < 1e-4, "{:?} is not centered", kind);
        assert!(((max - min).length() - 2.0).abs() < 1e-4, "{:?} is not unit scaled", kind);
    }
}

#[test]
fn test_missing_asset_reports_path() {
    let err = MeshData::load_obj(assets_dir().join("comet.obj")).unwrap_err();
    assert!(matches!(err, AssetError::NotFound(_)));
    assert!(err.to_string().contains("comet.obj"));
}
