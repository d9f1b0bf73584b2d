//! Variable-arity polygon face.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::FaceFlags;

/// A polygon face with any number (≥ 3) of vertices.
///
/// The vertex list and the adjacency list always have the same length.
/// Adjacency entry `i` is the face across the edge from vertex `i` to
/// vertex `(i + 1) % arity`, or `None` for a boundary edge. Both lists are
/// private so that only the owning [`PolyMesh`](crate::PolyMesh) can change
/// them; normal, flags and quality are free for algorithms to write.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyFace {
    vertices: Vec<u32>,
    adjacent: Vec<Option<u32>>,

    /// Unit face normal, or zero when not yet computed or degenerate.
    pub normal: Vector3<f64>,

    /// State bits.
    pub flags: FaceFlags,

    /// Scalar quality written by the quality evaluator.
    pub quality: f64,
}

impl PolyFace {
    /// Build a face with no adjacency. Callers validate the vertex list.
    pub(crate) fn new(vertices: Vec<u32>) -> Self {
        let adjacent = vec![None; vertices.len()];
        Self {
            vertices,
            adjacent,
            normal: Vector3::zeros(),
            flags: FaceFlags::empty(),
            quality: 0.0,
        }
    }

    /// Number of vertices (and edges) of the face.
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex indices in winding order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    /// Adjacent face per edge, parallel to [`vertices`](Self::vertices).
    #[inline]
    #[must_use]
    pub fn adjacent(&self) -> &[Option<u32>] {
        &self.adjacent
    }

    /// Vertex at `slot`, wrapping around the face.
    #[inline]
    #[must_use]
    pub fn vertex(&self, slot: usize) -> u32 {
        self.vertices[slot % self.vertices.len()]
    }

    /// Face across edge `slot`, wrapping around the face.
    #[inline]
    #[must_use]
    pub fn adjacent_face(&self, slot: usize) -> Option<u32> {
        self.adjacent[slot % self.adjacent.len()]
    }

    /// Directed edge `slot` as `(vertex(slot), vertex(slot + 1))`.
    #[inline]
    #[must_use]
    pub fn edge(&self, slot: usize) -> (u32, u32) {
        (self.vertex(slot), self.vertex(slot + 1))
    }

    /// Slot following `slot` in winding order.
    #[inline]
    #[must_use]
    pub fn next_slot(&self, slot: usize) -> usize {
        (slot + 1) % self.vertices.len()
    }

    /// Slot preceding `slot` in winding order.
    #[inline]
    #[must_use]
    pub fn prev_slot(&self, slot: usize) -> usize {
        let n = self.vertices.len();
        (slot + n - 1) % n
    }

    /// Slot at which `vertex` appears, if it belongs to this face.
    #[must_use]
    pub fn slot_of(&self, vertex: u32) -> Option<usize> {
        self.vertices.iter().position(|&v| v == vertex)
    }

    /// Whether any edge of the face lacks a neighbor.
    #[must_use]
    pub fn has_boundary_edge(&self) -> bool {
        self.adjacent.iter().any(Option::is_none)
    }

    pub(crate) fn set_adjacent(&mut self, slot: usize, face: Option<u32>) {
        self.adjacent[slot] = face;
    }

    pub(crate) fn clear_adjacency(&mut self) {
        self.adjacent.fill(None);
    }
}
