use std::io::Write;
use std::path::Path;

use glam::Vec3;
use viewer_core::{FileImporter, ImportError, ImportedMesh, MeshData, load_mesh};

const CUBE_OBJ: &str = "\
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
f 5 6 7 8
f 2 1 4 3
f 6 2 3 7
f 1 5 8 4
f 8 7 3 4
f 1 2 6 5
";

fn write_temp(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).expect("create");
    f.write_all(body.as_bytes()).expect("write");
    path
}

#[test]
fn obj_cube_imports_with_expected_bounds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_temp(&dir, "cube.obj", CUBE_OBJ);
    let mesh = load_mesh(&FileImporter, &path).expect("load cube");
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.bounds().min, Vec3::splat(-1.0));
    assert_eq!(mesh.bounds().max, Vec3::splat(1.0));
    // No normals in the file: generated ones point outward at the corners.
    for (p, n) in mesh.positions().iter().zip(mesh.normals()) {
        assert!(Vec3::from(*p).dot(Vec3::from(*n)) > 0.0);
    }
}

#[test]
fn every_vertex_lies_in_bounds() {
    let positions: Vec<[f32; 3]> = (0..64)
        .map(|i| {
            let t = i as f32 * 0.37;
            [t.sin() * 3.0, t.cos() * 0.5 - 2.0, (t * 1.7).sin() * 10.0]
        })
        .collect();
    let indices: Vec<u32> = (0..62).flat_map(|i| [i, i + 1, i + 2]).collect();
    let mesh = MeshData::from_import(ImportedMesh {
        positions,
        normals: Vec::new(),
        indices,
    })
    .expect("strip");
    let b = mesh.bounds();
    for axis in 0..3 {
        assert!(b.min[axis] <= b.max[axis]);
    }
    for p in mesh.positions() {
        assert!(b.contains(Vec3::from(*p)));
    }
}

#[test]
fn zero_triangles_is_rejected() {
    let err = MeshData::from_import(ImportedMesh {
        positions: vec![[0.0; 3]; 3],
        normals: vec![],
        indices: vec![],
    })
    .unwrap_err();
    assert!(matches!(err, ImportError::NoTriangles));
}

#[test]
fn points_only_obj_has_no_triangles() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_temp(&dir, "points.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\n");
    assert!(load_mesh(&FileImporter, &path).is_err());
}

#[test]
fn out_of_range_index_is_rejected() {
    let err = MeshData::from_import(ImportedMesh {
        positions: vec![[0.0; 3]; 3],
        normals: vec![],
        indices: vec![0, 1, 3],
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ImportError::IndexOutOfRange {
            index: 3,
            vertex_count: 3
        }
    ));
}

#[test]
fn ragged_indices_and_normals_are_malformed() {
    let ragged = MeshData::from_import(ImportedMesh {
        positions: vec![[0.0; 3]; 3],
        normals: vec![],
        indices: vec![0, 1],
    });
    assert!(matches!(ragged, Err(ImportError::Malformed(_))));
    let short_normals = MeshData::from_import(ImportedMesh {
        positions: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]],
        indices: vec![0, 1, 2],
    });
    assert!(matches!(short_normals, Err(ImportError::Malformed(_))));
}

#[test]
fn non_mesh_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let txt = write_temp(&dir, "notes.txt", "hello");
    assert!(matches!(
        load_mesh(&FileImporter, &txt),
        Err(ImportError::UnsupportedFormat(_))
    ));
    let garbage = write_temp(&dir, "broken.gltf", "{ not json");
    assert!(matches!(
        load_mesh(&FileImporter, &garbage),
        Err(ImportError::Parse { .. })
    ));
}

#[test]
fn missing_file_is_unreadable() {
    let err = load_mesh(&FileImporter, Path::new("/nope/missing.obj")).unwrap_err();
    assert!(matches!(err, ImportError::Unreadable { .. }));
}

#[test]
fn closures_work_as_importers() {
    let importer = |_: &Path| -> Result<ImportedMesh, ImportError> {
        Ok(ImportedMesh {
            positions: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
        })
    };
    let mesh = load_mesh(&importer, Path::new("virtual")).expect("closure import");
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.normals()[0], [0.0, 0.0, 1.0]);
}
