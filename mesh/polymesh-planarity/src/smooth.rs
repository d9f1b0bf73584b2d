//! Planarity-driven vertex smoothing.

#![allow(clippy::cast_precision_loss)]

use nalgebra::{Point3, Vector3};
use polymesh_types::{MeshTopology, PolyMesh, vertex_rings};
use tracing::{debug, info, warn};

use crate::error::PlanarityResult;
use crate::params::SmoothParams;
use crate::plane::fit_plane;
use crate::result::SmoothReport;

/// Smooth vertex positions while pulling each one-ring towards a plane.
///
/// Each pass is a Jacobi update over a snapshot of the positions. For every
/// vertex `p` with ring neighbors `q_i`:
///
/// 1. `candidate = damping * p + (1 - damping) * mean(q_i)`
/// 2. `candidate` is projected onto the least-squares plane of the `q_i`.
///    A degenerate ring (coincident or colinear neighbors) skips this step
///    and is counted in the report.
/// 3. With `reproject` set, `candidate` is projected onto the tangent plane
///    of the input surface at the vertex (input position, area-weighted
///    input normal). This keeps closed meshes from shrinking.
///
/// All new positions are committed together at the end of the pass, so the
/// result does not depend on vertex order. Face normals are refreshed
/// afterwards; counts and adjacency are untouched.
///
/// # Errors
///
/// Returns a topology error if any vertex ring cannot be walked (open,
/// non-manifold or inconsistently oriented mesh). No vertex is moved in
/// that case.
///
/// # Example
///
/// ```
/// use polymesh_dual::{build_dual, import_triangle_mesh, DualParams};
/// use polymesh_planarity::{smooth_reproject_pca, SmoothParams};
/// use polymesh_types::icosphere;
///
/// let mut primal = import_triangle_mesh(&icosphere(1))?;
/// let mut dual = build_dual(&mut primal, &DualParams::default())?.mesh;
///
/// let report = smooth_reproject_pca(&mut dual, &SmoothParams::new().with_iterations(10))?;
/// assert_eq!(report.iterations, 10);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn smooth_reproject_pca(mesh: &mut PolyMesh, params: &SmoothParams) -> PlanarityResult<SmoothReport> {
    info!(
        vertices = mesh.vertex_count(),
        iterations = params.iterations,
        damping = params.damping,
        reproject = params.reproject,
        "Smoothing with ring-plane projection"
    );

    mesh.update_face_face_adjacency()?;
    let rings = vertex_rings(mesh)?;
    let neighbors: Vec<Vec<u32>> = rings.into_iter().map(|r| r.neighbors).collect();

    let damping = params.damping.clamp(0.0, 1.0);
    let anchors = if params.reproject {
        Some((mesh.positions(), mesh.area_weighted_vertex_normals()))
    } else {
        None
    };

    let mut report = SmoothReport::default();
    let mut updated = Vec::with_capacity(mesh.vertex_count());
    let mut ring_points: Vec<Point3<f64>> = Vec::new();

    for iteration in 0..params.iterations {
        let snapshot = mesh.positions();
        updated.clear();
        let mut degenerate = 0;

        for (v, ring) in neighbors.iter().enumerate() {
            ring_points.clear();
            ring_points.extend(ring.iter().map(|&n| snapshot[n as usize]));

            let mean = ring_points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / ring_points.len() as f64;
            let mut candidate = Point3::from(damping * snapshot[v].coords + (1.0 - damping) * mean);

            match fit_plane(&ring_points) {
                Ok(plane) => candidate = plane.project(&candidate),
                Err(_) => degenerate += 1,
            }

            if let Some((origins, normals)) = &anchors {
                let n = normals[v];
                candidate -= n * n.dot(&(candidate - origins[v]));
            }

            updated.push(candidate);
        }

        let mut max_move: f64 = 0.0;
        for (vertex, &p) in mesh.vertices_mut().iter_mut().zip(&updated) {
            max_move = max_move.max((p - vertex.position).norm());
            vertex.position = p;
        }

        debug!(iteration, max_move, degenerate, "Smoothing pass");
        report.iterations = iteration + 1;
        report.degenerate_rings += degenerate;
        report.max_displacement = max_move;
    }

    mesh.update_face_normals();

    if report.degenerate_rings > 0 {
        warn!(
            degenerate_rings = report.degenerate_rings,
            "Skipped plane projection for degenerate rings"
        );
    }
    info!(
        iterations = report.iterations,
        max_displacement = report.max_displacement,
        "Smoothing complete"
    );
    Ok(report)
}
