//! Wavefront OBJ via `tobj`: positions + normals, materials ignored.

use std::path::Path;

use super::MeshBuilder;
use crate::error::ImportError;
use crate::mesh::ImportedMesh;

pub(super) fn import_obj(path: &Path) -> Result<ImportedMesh, ImportError> {
    let input = std::fs::read(path).map_err(|source| ImportError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let load_opts = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj_buf(&mut input.as_slice(), &load_opts, |_| {
        Ok((Vec::new(), Default::default()))
    })
    .map_err(|e| ImportError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut builder = MeshBuilder::default();
    for model in models {
        let mesh = model.mesh;
        let positions = triples(&mesh.positions);
        let normals = (!mesh.normals.is_empty()).then(|| triples(&mesh.normals));
        let indices = if mesh.indices.is_empty() {
            (0..positions.len() as u32).collect()
        } else {
            mesh.indices
        };
        log::debug!(
            "obj model `{}`: {} verts, {} indices",
            model.name,
            positions.len(),
            indices.len()
        );
        builder.append(positions, normals, indices)?;
    }
    Ok(builder.finish())
}

fn triples(flat: &[f32]) -> Vec<[f32; 3]> {
    flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}
