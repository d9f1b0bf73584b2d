//! Triangle mesh to polygon mesh conversion.

use polymesh_types::{MeshTopology, PolyMesh, TriMesh};
use tracing::{debug, info};

use crate::error::{DualResult, ImportError};

/// Convert an indexed triangle mesh into a [`PolyMesh`] with adjacency.
///
/// Positions and normals are copied in vertex order and every triangle
/// becomes a face of arity 3. Face-face adjacency and face normals are
/// computed; vertex normals are computed from the faces when the input
/// carries none.
///
/// # Errors
///
/// - [`ImportError::EmptyMesh`] if the input has no vertices or no faces
/// - [`ImportError::NormalCountMismatch`] if normals are present but not
///   one per vertex
/// - [`ImportError::InvalidIndex`] / [`ImportError::DegenerateTriangle`]
///   for malformed triangles
/// - [`TopologyError::NonManifoldEdge`](polymesh_types::TopologyError::NonManifoldEdge)
///   if an edge has more than two triangles
///
/// # Example
///
/// ```
/// use polymesh_dual::import_triangle_mesh;
/// use polymesh_types::{MeshTopology, tetrahedron};
///
/// let mesh = import_triangle_mesh(&tetrahedron())?;
/// assert_eq!(mesh.face_count(), 4);
/// assert!(mesh.faces().iter().all(|f| f.arity() == 3));
/// # Ok::<(), polymesh_dual::DualError>(())
/// ```
pub fn import_triangle_mesh(input: &TriMesh) -> DualResult<PolyMesh> {
    if input.is_empty() {
        return Err(ImportError::EmptyMesh {
            vertices: input.vertex_count(),
            faces: input.face_count(),
        }
        .into());
    }
    if input.has_normals() && input.normals.len() != input.positions.len() {
        return Err(ImportError::NormalCountMismatch {
            normals: input.normals.len(),
            vertices: input.positions.len(),
        }
        .into());
    }
    for (face, tri) in input.faces.iter().enumerate() {
        check_triangle(face, tri, input.positions.len())?;
    }

    info!(
        vertices = input.vertex_count(),
        triangles = input.face_count(),
        "Importing triangle mesh"
    );

    let mut mesh = PolyMesh::with_capacity(input.vertex_count(), input.face_count());
    if input.has_normals() {
        for (p, n) in input.positions.iter().zip(&input.normals) {
            mesh.add_vertex_with_normal(*p, *n);
        }
    } else {
        for p in &input.positions {
            mesh.add_vertex(*p);
        }
    }
    for tri in &input.faces {
        mesh.add_face(tri)?;
    }

    let stats = mesh.update_face_face_adjacency()?;
    debug!(
        edges = stats.edges,
        boundary = stats.boundary_edges,
        "Imported mesh adjacency"
    );

    mesh.update_face_normals();
    if !input.has_normals() {
        mesh.update_vertex_normals();
    }

    Ok(mesh)
}

fn check_triangle(face: usize, tri: &[u32; 3], vertex_count: usize) -> Result<(), ImportError> {
    for &index in tri {
        if index as usize >= vertex_count {
            return Err(ImportError::InvalidIndex {
                face,
                index,
                vertex_count,
            });
        }
    }
    if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
        return Err(ImportError::DegenerateTriangle { face });
    }
    Ok(())
}
