//! Mesh import boundary.
//!
//! The viewer never parses files itself; it asks a `MeshImporter` for flat
//! position/normal/index arrays and validates them into a `MeshData`.

mod gltf;
mod obj;

use std::path::Path;

use crate::error::ImportError;
use crate::mesh::{ImportedMesh, MeshData};

/// Anything that can turn a path into a flat triangle mesh.
pub trait MeshImporter {
    fn import(&self, path: &Path) -> Result<ImportedMesh, ImportError>;
}

impl<F> MeshImporter for F
where
    F: Fn(&Path) -> Result<ImportedMesh, ImportError>,
{
    fn import(&self, path: &Path) -> Result<ImportedMesh, ImportError> {
        self(path)
    }
}

/// Importer for the on-disk formats the viewer accepts, dispatched by extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImporter;

impl FileImporter {
    pub const EXTENSIONS: [&'static str; 3] = ["obj", "gltf", "glb"];

    pub fn supports(path: &Path) -> bool {
        extension(path).is_some_and(|e| Self::EXTENSIONS.contains(&e.as_str()))
    }
}

impl MeshImporter for FileImporter {
    fn import(&self, path: &Path) -> Result<ImportedMesh, ImportError> {
        if !path.is_file() {
            return Err(ImportError::Unreadable {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }
        match extension(path).as_deref() {
            Some("obj") => obj::import_obj(path),
            Some("gltf" | "glb") => gltf::import_gltf(path),
            _ => Err(ImportError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Import and validate in one step. On error nothing is returned, so the caller's
/// current mesh stays as it was.
pub fn load_mesh(importer: &dyn MeshImporter, path: &Path) -> Result<MeshData, ImportError> {
    let raw = importer.import(path)?;
    let mesh = MeshData::from_import(raw)?;
    log::info!(
        "loaded {}: verts={}, tris={}",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Concatenates sub-meshes into one indexed mesh.
///
/// Normals are kept only if every part supplied them; otherwise they are dropped
/// so `MeshData::from_import` regenerates them for the whole mesh.
#[derive(Debug, Default)]
struct MeshBuilder {
    mesh: ImportedMesh,
    normals_complete: bool,
    parts: usize,
}

impl MeshBuilder {
    /// Indices are checked against this part's own vertices before rebasing.
    fn append(
        &mut self,
        positions: Vec<[f32; 3]>,
        normals: Option<Vec<[f32; 3]>>,
        indices: Vec<u32>,
    ) -> Result<(), ImportError> {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(ImportError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }
        let base = self.mesh.positions.len() as u32;
        let has_normals = normals.as_ref().is_some_and(|n| n.len() == positions.len());
        self.normals_complete = has_normals && (self.parts == 0 || self.normals_complete);
        match normals {
            Some(n) if self.normals_complete => self.mesh.normals.extend(n),
            _ => self.mesh.normals.clear(),
        }
        self.mesh.positions.extend(positions);
        self.mesh.indices.extend(indices.into_iter().map(|i| i + base));
        self.parts += 1;
        Ok(())
    }

    fn finish(mut self) -> ImportedMesh {
        if !self.normals_complete {
            self.mesh.normals.clear();
        }
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rebases_indices() {
        let mut b = MeshBuilder::default();
        b.append(vec![[0.0; 3]; 3], Some(vec![[0.0, 1.0, 0.0]; 3]), vec![0, 1, 2])
            .expect("part 1");
        b.append(vec![[1.0; 3]; 3], Some(vec![[0.0, 1.0, 0.0]; 3]), vec![0, 2, 1])
            .expect("part 2");
        let m = b.finish();
        assert_eq!(m.indices, vec![0, 1, 2, 3, 5, 4]);
        assert_eq!(m.normals.len(), 6);
    }

    #[test]
    fn builder_drops_normals_when_any_part_lacks_them() {
        let mut b = MeshBuilder::default();
        b.append(vec![[0.0; 3]; 3], Some(vec![[0.0, 1.0, 0.0]; 3]), vec![0, 1, 2])
            .expect("part 1");
        b.append(vec![[1.0; 3]; 3], None, vec![0, 1, 2]).expect("part 2");
        b.append(vec![[2.0; 3]; 3], Some(vec![[0.0, 1.0, 0.0]; 3]), vec![0, 1, 2])
            .expect("part 3");
        let m = b.finish();
        assert!(m.normals.is_empty());
        assert_eq!(m.positions.len(), 9);
    }

    #[test]
    fn index_past_its_own_part_is_rejected() {
        let mut b = MeshBuilder::default();
        let err = b
            .append(vec![[0.0; 3]; 3], None, vec![0, 1, 4])
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::IndexOutOfRange {
                index: 4,
                vertex_count: 3
            }
        ));
        // The rejected part leaves nothing behind for later parts to rebase onto.
        b.append(vec![[1.0; 3]; 3], None, vec![0, 1, 2]).expect("part 2");
        let m = b.finish();
        assert_eq!(m.indices, vec![0, 1, 2]);
        assert!(MeshData::from_import(m).is_ok());
    }

    #[test]
    fn extension_dispatch_is_case_insensitive() {
        assert!(FileImporter::supports(Path::new("bunny.OBJ")));
        assert!(FileImporter::supports(Path::new("scene.glb")));
        assert!(!FileImporter::supports(Path::new("notes.txt")));
        assert!(!FileImporter::supports(Path::new("README")));
    }
}
