//! Traits shared by the triangle and polygon mesh types.

use crate::Aabb;
use nalgebra::Point3;

/// Element counts of a mesh.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of faces.
    fn face_count(&self) -> usize;

    /// Whether the mesh has no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }
}

/// Types that can compute a bounding box.
pub trait MeshBounds {
    /// Axis-aligned bounding box; empty if the mesh has no vertices.
    fn bounds(&self) -> Aabb;

    /// The bounding box, or `None` if empty.
    fn bounds_opt(&self) -> Option<Aabb> {
        let b = self.bounds();
        if b.is_empty() { None } else { Some(b) }
    }

    /// Center of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
