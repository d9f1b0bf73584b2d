//! Dual mesh construction.

// Face and vertex counts fit in u32 by construction of PolyMesh
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use nalgebra::{Point3, Vector3};
use polymesh_types::{MeshTopology, PolyMesh, TopologyError, vertex_rings};
use tracing::{debug, info};

use crate::error::DualResult;
use crate::params::{DualParams, RepresentativePoint};
use crate::result::DualMesh;

/// Build the polygonal dual of a closed, consistently oriented mesh.
///
/// Dual vertex `j` sits at the representative point of primal face `j` and
/// inherits its normal. Dual face `k` connects the dual vertices of the
/// faces around primal vertex `k`, in the counter-clockwise order of the
/// ring walk, so an outward primal yields an outward dual. The dual is a
/// fresh mesh; its adjacency and face normals are computed before return.
///
/// Every ring is computed before anything is emitted, so an error leaves
/// no partial output. The primal's visitation marks and face normals are
/// refreshed as a side effect; positions and connectivity are untouched.
///
/// # Errors
///
/// - [`TopologyError::OpenVertexRing`] if the primal has a boundary
/// - [`TopologyError::InconsistentOrientation`] for mixed winding
/// - [`TopologyError::NonManifoldVertex`] / [`TopologyError::NonManifoldEdge`]
///   for non-manifold input
/// - [`TopologyError::VertexDegreeTooLow`] for a vertex with fewer than
///   three faces
/// - [`TopologyError::IsolatedVertex`] for a vertex with no faces
///
/// # Example
///
/// ```
/// use polymesh_dual::{build_dual, import_triangle_mesh, DualParams};
/// use polymesh_types::{MeshTopology, icosahedron};
///
/// let mut primal = import_triangle_mesh(&icosahedron())?;
/// let dual = build_dual(&mut primal, &DualParams::default())?;
///
/// // The dual of an icosahedron is a dodecahedron
/// assert_eq!(dual.mesh.vertex_count(), 20);
/// assert_eq!(dual.mesh.face_count(), 12);
/// assert!(dual.mesh.faces().iter().all(|f| f.arity() == 5));
/// # Ok::<(), polymesh_dual::DualError>(())
/// ```
pub fn build_dual(primal: &mut PolyMesh, params: &DualParams) -> DualResult<DualMesh> {
    info!(
        vertices = primal.vertex_count(),
        faces = primal.face_count(),
        point = ?params.representative_point,
        "Building dual mesh"
    );

    let primal_stats = primal.update_face_face_adjacency()?;
    let rings = vertex_rings(primal)?;
    if let Some(ring) = rings.iter().find(|r| r.degree() < 3) {
        return Err(TopologyError::VertexDegreeTooLow {
            vertex: ring.vertex,
            degree: ring.degree(),
        }
        .into());
    }
    primal.update_face_normals();

    let mut dual = PolyMesh::with_capacity(primal.face_count(), primal.vertex_count());
    for j in 0..primal.face_count() {
        let point = representative_point(primal, j, params.representative_point);
        dual.add_vertex_with_normal(point, primal.faces()[j].normal);
    }
    for ring in &rings {
        dual.add_face(&ring.faces)?;
    }

    let dual_stats = dual.update_face_face_adjacency()?;
    dual.update_face_normals();
    debug!(
        primal_edges = primal_stats.edges,
        dual_edges = dual_stats.edges,
        dual_boundary = dual_stats.boundary_edges,
        "Dual adjacency rebuilt"
    );

    let result = DualMesh {
        mesh: dual,
        primal_vertices: primal.vertex_count(),
        primal_faces: primal.face_count(),
        primal_edges: primal_stats.edges,
    };
    info!(
        vertices = result.mesh.vertex_count(),
        faces = result.mesh.face_count(),
        max_arity = result.mesh.max_arity(),
        "Dual mesh complete"
    );
    Ok(result)
}

/// Representative point of a primal face under the given placement rule.
#[must_use]
pub fn representative_point(mesh: &PolyMesh, face: usize, kind: RepresentativePoint) -> Point3<f64> {
    let centroid = mesh.face_centroid(face);
    match kind {
        RepresentativePoint::Centroid => centroid,
        RepresentativePoint::AreaCentroid => area_centroid(&mesh.face_positions(face), centroid),
        RepresentativePoint::Circumcenter => match mesh.face_positions(face).as_slice() {
            [a, b, c] => circumcenter(a, b, c).unwrap_or(centroid),
            _ => centroid,
        },
    }
}

/// Area-weighted centroid of the fan of triangles around the vertex mean.
fn area_centroid(points: &[Point3<f64>], mean: Point3<f64>) -> Point3<f64> {
    let mut weighted = Vector3::zeros();
    let mut total = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        let area = (a - mean).cross(&(b - mean)).norm();
        weighted += area * (mean.coords + a.coords + b.coords) / 3.0;
        total += area;
    }
    if total > f64::EPSILON {
        Point3::from(weighted / total)
    } else {
        mean
    }
}

/// Circumcenter of a triangle, `None` when the vertices are colinear.
fn circumcenter(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<Point3<f64>> {
    let ab = b - a;
    let ac = c - a;
    let n = ab.cross(&ac);
    let n2 = n.norm_squared();
    if n2 <= 1e-24 * ab.norm_squared() * ac.norm_squared() {
        return None;
    }
    let offset = (n.cross(&ab) * ac.norm_squared() + ac.cross(&n) * ab.norm_squared()) / (2.0 * n2);
    Some(a + offset)
}
