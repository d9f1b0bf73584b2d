//! Indexed triangle mesh used as pipeline input.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tracing::warn;

use crate::{Aabb, MeshBounds, MeshTopology};

/// An indexed triangle mesh, as produced by a file reader or a generator.
///
/// Faces wind counter-clockwise when viewed from outside. `normals` is
/// either empty or holds one normal per position. Nothing is validated
/// here; the polygon importer checks indices and degeneracy.
///
/// # Example
///
/// ```
/// use polymesh_types::{TriMesh, MeshTopology};
///
/// let mesh = TriMesh::from_raw(
///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     &[0, 1, 2],
/// )
/// .unwrap();
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
///
/// // A coordinate buffer cut short is not a mesh
/// assert!(TriMesh::from_raw(&[0.0, 0.0], &[0, 1, 2]).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Optional per-vertex normals (empty when absent).
    pub normals: Vec<Vector3<f64>>,
    /// Triangles as vertex index triples.
    pub faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Build from positions and faces, without normals.
    #[must_use]
    pub const fn from_parts(positions: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            normals: Vec::new(),
            faces,
        }
    }

    /// Build from flat coordinate and index buffers.
    ///
    /// Returns `None` if either buffer length is not a multiple of 3.
    #[must_use]
    pub fn from_raw(coords: &[f64], indices: &[u32]) -> Option<Self> {
        if coords.len() % 3 != 0 || indices.len() % 3 != 0 {
            warn!(
                coords = coords.len(),
                indices = indices.len(),
                "Triangle buffers are not multiples of 3"
            );
            return None;
        }
        let positions = coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let faces = indices.chunks_exact(3).map(|f| [f[0], f[1], f[2]]).collect();
        Some(Self::from_parts(positions, faces))
    }

    /// Attach per-vertex normals.
    #[must_use]
    pub fn with_normals(mut self, normals: Vec<Vector3<f64>>) -> Self {
        self.normals = normals;
        self
    }

    /// Whether per-vertex normals are attached.
    #[inline]
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Flip the winding of every triangle.
    pub fn flip_faces(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }
}

impl MeshTopology for TriMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }
}

impl MeshBounds for TriMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }
}
