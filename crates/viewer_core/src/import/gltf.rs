//! glTF / GLB via the `gltf` crate: triangle primitives of the default scene merged
//! into one mesh with node transforms baked in.

use std::path::Path;

use ::gltf::mesh::Mode;
use ::gltf::mesh::util::ReadIndices;
use glam::{Mat3, Mat4, Vec3};

use super::MeshBuilder;
use crate::error::ImportError;
use crate::mesh::ImportedMesh;

pub(super) fn import_gltf(path: &Path) -> Result<ImportedMesh, ImportError> {
    let (doc, buffers, _images) = ::gltf::import(path).map_err(|e| match e {
        ::gltf::Error::Io(source) => ImportError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
        other => ImportError::Parse {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    let mut builder = MeshBuilder::default();
    match doc.default_scene().or_else(|| doc.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                visit(&node, Mat4::IDENTITY, &buffers, &mut builder)?;
            }
        }
        // Scene-less files: take the meshes as authored.
        None => {
            for mesh in doc.meshes() {
                append_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut builder)?;
            }
        }
    }
    Ok(builder.finish())
}

fn visit(
    node: &::gltf::Node,
    parent: Mat4,
    buffers: &[::gltf::buffer::Data],
    out: &mut MeshBuilder,
) -> Result<(), ImportError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        append_mesh(&mesh, world, buffers, out)?;
    }
    for child in node.children() {
        visit(&child, world, buffers, out)?;
    }
    Ok(())
}

fn append_mesh(
    mesh: &::gltf::Mesh,
    world: Mat4,
    buffers: &[::gltf::buffer::Data],
    out: &mut MeshBuilder,
) -> Result<(), ImportError> {
    let normal_m = Mat3::from_mat4(world).inverse().transpose();
    for prim in mesh.primitives() {
        if prim.mode() != Mode::Triangles {
            log::debug!("skipping non-triangle primitive ({:?})", prim.mode());
            continue;
        }
        let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
        let Some(pos) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<[f32; 3]> = pos
            .map(|p| world.transform_point3(Vec3::from(p)).to_array())
            .collect();
        let normals = reader.read_normals().map(|it| {
            it.map(|n| (normal_m * Vec3::from(n)).normalize_or_zero().to_array())
                .collect()
        });
        let indices: Vec<u32> = match reader.read_indices() {
            Some(ReadIndices::U8(it)) => it.map(u32::from).collect(),
            Some(ReadIndices::U16(it)) => it.map(u32::from).collect(),
            Some(ReadIndices::U32(it)) => it.collect(),
            None => (0..positions.len() as u32).collect(),
        };
        out.append(positions, normals, indices)?;
    }
    Ok(())
}
