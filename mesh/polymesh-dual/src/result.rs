//! Result type for dual construction.

use polymesh_types::{MeshTopology, PolyMesh};

/// A dual mesh together with the size of the primal it came from.
#[derive(Debug, Clone)]
pub struct DualMesh {
    /// The dual polygon mesh.
    pub mesh: PolyMesh,

    /// Number of vertices in the primal mesh (= dual faces).
    pub primal_vertices: usize,

    /// Number of faces in the primal mesh (= dual vertices).
    pub primal_faces: usize,

    /// Number of edges in the primal mesh (= dual edges).
    pub primal_edges: usize,
}

impl DualMesh {
    /// Whether the element counts are swapped as duality requires.
    #[must_use]
    pub fn counts_swapped(&self) -> bool {
        self.mesh.vertex_count() == self.primal_faces
            && self.mesh.face_count() == self.primal_vertices
            && self.mesh.edge_count() == self.primal_edges
    }
}

impl std::fmt::Display for DualMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dual: {}V/{}E/{}F → {}V/{}E/{}F (max arity {})",
            self.primal_vertices,
            self.primal_edges,
            self.primal_faces,
            self.mesh.vertex_count(),
            self.mesh.edge_count(),
            self.mesh.face_count(),
            self.mesh.max_arity()
        )
    }
}
