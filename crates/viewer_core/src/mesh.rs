//! Triangle mesh data model.
//!
//! `MeshData` is built once per load from an `ImportedMesh` and never mutated
//! afterwards; a new load replaces it wholesale.

use glam::Vec3;

use crate::error::ImportError;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Per-axis min/max over `points`. `None` when there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        0.5 * (self.max - self.min) + self.min
    }

    /// Length of the min→max diagonal.
    pub fn diagonal(&self) -> f32 {
        (self.max - self.min).length()
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Raw result handed over by an importer: flat, not yet validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedMesh {
    pub positions: Vec<[f32; 3]>,
    /// May be empty; smooth normals are generated in that case.
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Validated triangle mesh with cached bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
    bounds: Aabb,
}

impl MeshData {
    /// Validate an import result. Nothing partial is ever returned.
    pub fn from_import(mesh: ImportedMesh) -> Result<Self, ImportError> {
        let ImportedMesh {
            positions,
            normals,
            indices,
        } = mesh;
        if indices.len() % 3 != 0 {
            return Err(ImportError::Malformed(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if indices.is_empty() {
            return Err(ImportError::NoTriangles);
        }
        let vertex_count = positions.len();
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(ImportError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        if positions.iter().flatten().any(|c| !c.is_finite()) {
            return Err(ImportError::Malformed("non-finite vertex position".into()));
        }
        let normals = if normals.is_empty() {
            smooth_normals(&positions, &indices)
        } else if normals.len() != vertex_count {
            return Err(ImportError::Malformed(format!(
                "{} normals for {} vertices",
                normals.len(),
                vertex_count
            )));
        } else {
            normals
        };
        let bounds = Aabb::from_points(positions.iter().map(|p| Vec3::from(*p)))
            .ok_or(ImportError::NoTriangles)?;
        Ok(Self {
            positions,
            normals,
            indices,
            bounds,
        })
    }

    /// Cube centered at the origin with extents ±1: 8 shared corners, 12 CCW triangles.
    pub fn cube() -> Self {
        let positions: Vec<[f32; 3]> = vec![
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ];
        let normals = positions
            .iter()
            .map(|p| Vec3::from(*p).normalize().to_array())
            .collect();
        #[rustfmt::skip]
        let indices = vec![
            4, 5, 6, 4, 6, 7, // +Z
            1, 0, 3, 1, 3, 2, // -Z
            5, 1, 2, 5, 2, 6, // +X
            0, 4, 7, 0, 7, 3, // -X
            7, 6, 2, 7, 2, 3, // +Y
            0, 1, 5, 0, 5, 4, // -Y
        ];
        Self {
            positions,
            normals,
            indices,
            bounds: Aabb {
                min: Vec3::splat(-1.0),
                max: Vec3::splat(1.0),
            },
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Area-weighted vertex normals; isolated or degenerate vertices get +Y.
fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(positions[i as usize]));
        // Unnormalized cross product weights by twice the triangle area.
        let n = (b - a).cross(c - a);
        for &i in tri {
            acc[i as usize] += n;
        }
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_bounds_and_counts() {
        let cube = MeshData::cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.bounds().min, Vec3::splat(-1.0));
        assert_eq!(cube.bounds().max, Vec3::splat(1.0));
        assert!((cube.bounds().diagonal() - 12f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn cube_triangles_face_outward() {
        let cube = MeshData::cube();
        for tri in cube.indices().chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(cube.positions()[i as usize]));
            let n = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(n.dot(centroid) > 0.0, "triangle {tri:?} winds inward");
        }
    }

    #[test]
    fn generated_normals_point_away_from_quad() {
        let mesh = MeshData::from_import(ImportedMesh {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![],
            indices: vec![0, 1, 2, 0, 2, 3],
        })
        .expect("quad");
        for n in mesh.normals() {
            assert!((Vec3::from(*n) - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn unreferenced_vertex_gets_fallback_normal() {
        let mesh = MeshData::from_import(ImportedMesh {
            positions: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [5.0, 5.0, 5.0]],
            normals: vec![],
            indices: vec![0, 1, 2],
        })
        .expect("tri");
        assert_eq!(mesh.normals()[3], [0.0, 1.0, 0.0]);
        // Unreferenced vertices still count toward the bounds.
        assert_eq!(mesh.bounds().max, Vec3::splat(5.0));
    }

    #[test]
    fn aabb_of_nothing_is_none() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }
}
