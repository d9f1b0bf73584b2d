//! Polygon mesh container.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Aabb, FaceFlags, MeshBounds, MeshTopology, PolyFace, PolyVertex, TopologyError, TopologyResult};

/// A polygon mesh with variable-arity faces and face-face adjacency.
///
/// Vertices and faces live in insertion-ordered containers; the index
/// returned by [`add_vertex`](Self::add_vertex) and
/// [`add_face`](Self::add_face) stays valid for the life of the mesh
/// (nothing is ever removed). `Clone` is a deep copy: the clone owns its
/// own containers and adjacency, nothing is shared with the source.
///
/// # Winding
///
/// Faces are expected to wind **counter-clockwise when viewed from
/// outside**, as in [`TriMesh`](crate::TriMesh).
///
/// # Example
///
/// ```
/// use polymesh_types::{PolyMesh, Point3, MeshTopology};
///
/// let mut mesh = PolyMesh::new();
/// let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
/// let d = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// let quad = mesh.add_face(&[a, b, c, d])?;
///
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.faces()[quad as usize].arity(), 4);
/// # Ok::<(), polymesh_types::TopologyError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    pub(crate) vertices: Vec<PolyVertex>,
    pub(crate) faces: Vec<PolyFace>,
    pub(crate) imark: u32,
}

impl Default for PolyMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl PolyMesh {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            imark: 1,
        }
    }

    /// Create an empty mesh with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            imark: 1,
        }
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        self.push_vertex(PolyVertex::new(position))
    }

    /// Append a vertex with a normal and return its index.
    pub fn add_vertex_with_normal(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        self.push_vertex(PolyVertex::with_normal(position, normal))
    }

    // Truncation: indices are u32, meshes beyond 4B vertices are unsupported
    #[allow(clippy::cast_possible_truncation)]
    fn push_vertex(&mut self, vertex: PolyVertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Append a face from an ordered vertex list and return its index.
    ///
    /// Adjacency of the new face is empty until
    /// [`update_face_face_adjacency`](Self::update_face_face_adjacency) runs.
    ///
    /// # Errors
    ///
    /// - [`TopologyError::FaceArityTooLow`] for fewer than three vertices
    /// - [`TopologyError::InvalidVertexIndex`] for an out-of-range index
    /// - [`TopologyError::RepeatedVertex`] if a vertex appears twice
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_face(&mut self, vertices: &[u32]) -> TopologyResult<u32> {
        let face = self.faces.len() as u32;

        if vertices.len() < 3 {
            return Err(TopologyError::FaceArityTooLow {
                face,
                arity: vertices.len(),
            });
        }

        let mut seen = HashSet::with_capacity(vertices.len());
        for &v in vertices {
            if v as usize >= self.vertices.len() {
                return Err(TopologyError::InvalidVertexIndex {
                    face,
                    index: v,
                    vertex_count: self.vertices.len(),
                });
            }
            if !seen.insert(v) {
                return Err(TopologyError::RepeatedVertex { face, vertex: v });
            }
        }

        self.faces.push(PolyFace::new(vertices.to_vec()));
        Ok(face)
    }

    /// All vertices in insertion order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[PolyVertex] {
        &self.vertices
    }

    /// Mutable access to vertex data. The container itself cannot grow or
    /// shrink through this slice, so face indices stay valid.
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [PolyVertex] {
        &mut self.vertices
    }

    /// All faces in insertion order.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[PolyFace] {
        &self.faces
    }

    /// Mutable access to face attributes (normal, flags, quality).
    #[inline]
    pub fn faces_mut(&mut self) -> &mut [PolyFace] {
        &mut self.faces
    }

    /// Snapshot of every vertex position.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Positions of a face's vertices in winding order.
    #[must_use]
    pub fn face_positions(&self, face: usize) -> Vec<Point3<f64>> {
        self.faces[face]
            .vertices()
            .iter()
            .map(|&v| self.vertices[v as usize].position)
            .collect()
    }

    /// Arithmetic mean of a face's vertex positions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn face_centroid(&self, face: usize) -> Point3<f64> {
        let f = &self.faces[face];
        let sum: Vector3<f64> = f
            .vertices()
            .iter()
            .map(|&v| self.vertices[v as usize].position.coords)
            .sum();
        Point3::from(sum / f.arity() as f64)
    }

    /// Newell normal of a face: direction follows the winding, magnitude
    /// is twice the (vector) area. Valid for non-planar polygons.
    #[must_use]
    pub fn face_area_vector(&self, face: usize) -> Vector3<f64> {
        newell_normal(&self.face_positions(face))
    }

    // =========================================================================
    // Visitation marks
    // =========================================================================

    /// Invalidate every vertex mark in O(1) by advancing the mesh mark.
    pub fn unmark_all(&mut self) {
        self.imark = self.imark.wrapping_add(1);
        if self.imark == 0 {
            // Wrapped: stale marks could collide, reset them explicitly.
            for v in &mut self.vertices {
                v.mark = 0;
            }
            self.imark = 1;
        }
    }

    /// Mark a vertex as visited for the current traversal.
    #[inline]
    pub fn mark_vertex(&mut self, vertex: u32) {
        self.vertices[vertex as usize].mark = self.imark;
    }

    /// Whether a vertex was marked since the last [`unmark_all`](Self::unmark_all).
    #[inline]
    #[must_use]
    pub fn is_vertex_marked(&self, vertex: u32) -> bool {
        self.vertices[vertex as usize].mark == self.imark
    }

    // =========================================================================
    // Normals
    // =========================================================================

    /// Recompute every face normal with Newell's method.
    ///
    /// Degenerate faces get a zero normal.
    pub fn update_face_normals(&mut self) {
        for i in 0..self.faces.len() {
            let n = self.face_area_vector(i);
            self.faces[i].normal = n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
        }
    }

    /// Area-weighted vertex normals from the current positions, one per
    /// vertex. Vertices without faces get a zero normal.
    ///
    /// Leaves the stored normals untouched.
    #[must_use]
    pub fn area_weighted_vertex_normals(&self) -> Vec<Vector3<f64>> {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];
        for i in 0..self.faces.len() {
            let area_vector = self.face_area_vector(i);
            for &v in self.faces[i].vertices() {
                sums[v as usize] += area_vector;
            }
        }
        sums.into_iter()
            .map(|sum| sum.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros))
            .collect()
    }

    /// Store [`area_weighted_vertex_normals`](Self::area_weighted_vertex_normals)
    /// on every vertex.
    pub fn update_vertex_normals(&mut self) {
        let normals = self.area_weighted_vertex_normals();
        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal;
        }
    }

    // =========================================================================
    // Counting
    // =========================================================================

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let mut edges = HashSet::new();
        for face in &self.faces {
            for slot in 0..face.arity() {
                let (a, b) = face.edge(slot);
                edges.insert(if a < b { (a, b) } else { (b, a) });
            }
        }
        edges.len()
    }

    /// Euler characteristic `V - E + F` (2 for a closed genus-0 surface).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edge_count() as i64 + self.faces.len() as i64
    }

    /// Largest face arity, or 0 for a mesh without faces.
    #[must_use]
    pub fn max_arity(&self) -> usize {
        self.faces.iter().map(PolyFace::arity).max().unwrap_or(0)
    }

    /// Clear the given bits on every face.
    pub fn clear_face_flags(&mut self, flags: FaceFlags) {
        for face in &mut self.faces {
            face.flags.remove(flags);
        }
    }
}

/// Newell's polygon normal: robust for non-planar and concave polygons.
#[must_use]
pub fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut n = Vector3::zeros();
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n
}

impl MeshTopology for PolyMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }
}

impl MeshBounds for PolyMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> PolyMesh {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_face(&[0, 1, 2, 3]).unwrap();
        mesh
    }

    #[test]
    fn add_face_rejects_short_faces() {
        let mut mesh = unit_square();
        let err = mesh.add_face(&[0, 1]).unwrap_err();
        assert_eq!(err, TopologyError::FaceArityTooLow { face: 1, arity: 2 });
    }

    #[test]
    fn add_face_rejects_bad_indices() {
        let mut mesh = unit_square();
        let err = mesh.add_face(&[0, 1, 9]).unwrap_err();
        assert!(matches!(err, TopologyError::InvalidVertexIndex { index: 9, .. }));

        let err = mesh.add_face(&[0, 1, 0]).unwrap_err();
        assert_eq!(err, TopologyError::RepeatedVertex { face: 1, vertex: 0 });
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn face_centroid_and_normal() {
        let mut mesh = unit_square();
        let c = mesh.face_centroid(0);
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);

        // Newell magnitude is twice the area
        assert_relative_eq!(mesh.face_area_vector(0).norm(), 2.0, epsilon = 1e-12);

        mesh.update_face_normals();
        assert_relative_eq!(mesh.faces()[0].normal.z, 1.0, epsilon = 1e-12);

        mesh.update_vertex_normals();
        for v in mesh.vertices() {
            assert_relative_eq!(v.normal.z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn area_weighted_normals_point_away_from_center() {
        let tri = crate::octahedron();
        let mut mesh = PolyMesh::new();
        for p in &tri.positions {
            mesh.add_vertex(*p);
        }
        mesh.add_vertex(Point3::new(3.0, 3.0, 3.0));
        for f in &tri.faces {
            mesh.add_face(f).unwrap();
        }

        let normals = mesh.area_weighted_vertex_normals();
        assert_eq!(normals.len(), 7);
        for (n, p) in normals.iter().zip(&tri.positions) {
            assert_relative_eq!(*n, p.coords, epsilon = 1e-12);
        }
        // Loose vertex has no faces to weigh
        assert_relative_eq!(normals[6].norm(), 0.0);
        // Stored normals only change on update
        assert_relative_eq!(mesh.vertices()[0].normal.norm(), 0.0);

        mesh.update_vertex_normals();
        for (v, n) in mesh.vertices().iter().zip(&normals) {
            assert_relative_eq!(v.normal, *n);
        }
    }

    #[test]
    fn marks_reset_on_unmark_all() {
        let mut mesh = unit_square();
        assert!(!mesh.is_vertex_marked(2));
        mesh.mark_vertex(2);
        assert!(mesh.is_vertex_marked(2));
        mesh.unmark_all();
        assert!(!mesh.is_vertex_marked(2));
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let original = unit_square();
        let mut copy = original.clone();
        copy.vertices_mut()[0].position.z = 5.0;
        copy.faces_mut()[0].quality = 3.0;

        assert!(original.vertices()[0].position.z.abs() < f64::EPSILON);
        assert!(original.faces()[0].quality.abs() < f64::EPSILON);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mesh = unit_square();
        let b = mesh.bounds();
        assert_relative_eq!(b.max.x, 1.0);
        assert_relative_eq!(b.diagonal(), 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn single_quad_counts() {
        let mesh = unit_square();
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.euler_characteristic(), 1);
        assert_eq!(mesh.max_arity(), 4);
    }
}
