//! Topology error types.

use thiserror::Error;

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors raised when a polygon mesh violates the closed 2-manifold
/// assumptions the topology layer relies on.
///
/// Every variant carries the indices needed to locate the offending
/// vertex, face or edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A face was given fewer than three vertices.
    #[error("face {face} has arity {arity} (a polygon needs at least 3 vertices)")]
    FaceArityTooLow {
        /// Index the face would have received.
        face: u32,
        /// Number of vertices supplied.
        arity: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    InvalidVertexIndex {
        /// Index the face would have received.
        face: u32,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A face lists the same vertex more than once.
    #[error("face {face} lists vertex {vertex} more than once")]
    RepeatedVertex {
        /// Index the face would have received.
        face: u32,
        /// The repeated vertex.
        vertex: u32,
    },

    /// An undirected edge is shared by more than two faces.
    #[error("edge ({v0}, {v1}) is shared by more than two faces (third occurrence in face {face})")]
    NonManifoldEdge {
        /// Smaller vertex index of the edge.
        v0: u32,
        /// Larger vertex index of the edge.
        v1: u32,
        /// Face in which the third occurrence was found.
        face: u32,
    },

    /// Walking the fan around a vertex hit a boundary edge.
    #[error("open vertex ring: vertex {vertex} reaches a boundary edge in face {face}")]
    OpenVertexRing {
        /// Vertex whose ring does not close.
        vertex: u32,
        /// Face holding the boundary edge.
        face: u32,
    },

    /// Two neighboring faces traverse their shared edge in the same direction.
    #[error("faces {face} and {neighbor} disagree on orientation around vertex {vertex}")]
    InconsistentOrientation {
        /// Vertex being walked around.
        vertex: u32,
        /// Face the walk came from.
        face: u32,
        /// Face the walk stepped into.
        neighbor: u32,
    },

    /// Adjacency links a face to a neighbor that does not contain the pivot vertex.
    #[error("face {face} links to face {neighbor}, which does not contain vertex {vertex}")]
    BrokenAdjacency {
        /// Face holding the adjacency entry.
        face: u32,
        /// Face the entry points to.
        neighbor: u32,
        /// Vertex being walked around.
        vertex: u32,
    },

    /// The fan around a vertex does not reach every incident face.
    #[error(
        "vertex {vertex} is non-manifold: its ring visits {ring_faces} of {incident_faces} incident faces"
    )]
    NonManifoldVertex {
        /// The pinched vertex.
        vertex: u32,
        /// Faces reached by the ring walk.
        ring_faces: usize,
        /// Faces that reference the vertex.
        incident_faces: usize,
    },

    /// A vertex has too few incident faces to become a polygon.
    #[error("vertex {vertex} has degree {degree} (at least 3 required)")]
    VertexDegreeTooLow {
        /// The low-degree vertex.
        vertex: u32,
        /// Number of incident faces.
        degree: usize,
    },

    /// A vertex is not referenced by any face.
    #[error("vertex {vertex} is not referenced by any face")]
    IsolatedVertex {
        /// The unreferenced vertex.
        vertex: u32,
    },
}
