//! Polygon mesh vertex.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::VertexFlags;

/// A vertex of a [`PolyMesh`](crate::PolyMesh).
///
/// Faces reference vertices by index into the owning mesh, never by
/// pointer, so cloning a mesh yields a fully independent copy.
///
/// # Example
///
/// ```
/// use polymesh_types::{PolyVertex, Point3};
///
/// let v = PolyVertex::new(Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(v.position.y, 2.0);
/// assert_eq!(v.normal.norm(), 0.0);
/// assert!(v.flags.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyVertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Unit normal, or zero when not yet computed.
    pub normal: Vector3<f64>,

    /// Visitation mark compared against the mesh's current mark.
    ///
    /// See [`PolyMesh::unmark_all`](crate::PolyMesh::unmark_all).
    pub mark: u32,

    /// State bits.
    pub flags: VertexFlags,
}

impl PolyVertex {
    /// Create a vertex at `position` with a zero normal.
    #[inline]
    #[must_use]
    pub fn new(position: Point3<f64>) -> Self {
        Self::with_normal(position, Vector3::zeros())
    }

    /// Create a vertex with position and normal.
    #[inline]
    #[must_use]
    pub const fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            normal,
            mark: 0,
            flags: VertexFlags::empty(),
        }
    }

    /// Whether the vertex lies on a boundary edge.
    ///
    /// Only meaningful after
    /// [`PolyMesh::update_face_face_adjacency`](crate::PolyMesh::update_face_face_adjacency).
    #[inline]
    #[must_use]
    pub const fn is_border(&self) -> bool {
        self.flags.contains(VertexFlags::BORDER)
    }
}
