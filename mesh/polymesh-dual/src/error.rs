//! Error types for polygon import and dual construction.

use polymesh_types::TopologyError;
use thiserror::Error;

/// Errors raised while converting a triangle mesh into a [`PolyMesh`](polymesh_types::PolyMesh).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The input has no vertices or no faces.
    #[error("Mesh is empty ({vertices} vertices, {faces} faces)")]
    EmptyMesh {
        /// Number of input vertices.
        vertices: usize,
        /// Number of input faces.
        faces: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("Triangle {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    InvalidIndex {
        /// Offending triangle.
        face: usize,
        /// The out-of-range index.
        index: u32,
        /// Number of input vertices.
        vertex_count: usize,
    },

    /// A triangle uses the same vertex twice.
    #[error("Triangle {face} is degenerate (repeated vertex)")]
    DegenerateTriangle {
        /// Offending triangle.
        face: usize,
    },

    /// Normals were supplied but not one per vertex.
    #[error("Got {normals} normals for {vertices} vertices")]
    NormalCountMismatch {
        /// Number of supplied normals.
        normals: usize,
        /// Number of input vertices.
        vertices: usize,
    },
}

/// Errors raised by the polygon import and dual builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DualError {
    /// Input validation failed.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// The mesh is not a closed, consistently oriented 2-manifold.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Result type for dual operations.
pub type DualResult<T> = std::result::Result<T, DualError>;
