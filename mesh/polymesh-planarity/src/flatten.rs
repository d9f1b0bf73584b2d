//! Per-face plane projection.

#![allow(clippy::cast_precision_loss)]

use nalgebra::{Point3, Vector3};
use polymesh_types::{FaceFlags, MeshTopology, PolyMesh};
use tracing::{debug, info, warn};

use crate::params::{FlattenParams, FlattenStrategy};
use crate::plane::fit_plane;
use crate::result::FlattenReport;

/// Project the vertices of every face onto that face's best-fit plane.
///
/// Faces whose vertices are coincident or colinear are skipped and get
/// [`FaceFlags::DEGENERATE`]; the flag is cleared on faces that fit.
///
/// A vertex shared by several faces cannot in general lie on all of their
/// planes, so [`FlattenStrategy`] decides where it ends up:
///
/// - `LastWriteWins` visits faces in container order and fits each face to
///   the *current* positions. The last face visited is exactly planar.
/// - `Averaged` fits every face to the same snapshot and moves each vertex
///   to the mean of its projections; repeated passes drive all faces
///   towards planarity together.
///
/// Face normals are refreshed afterwards; counts and adjacency are
/// untouched.
///
/// # Example
///
/// ```
/// use polymesh_planarity::{flatten_faces, FlattenParams};
/// use polymesh_types::{PolyMesh, Point3};
///
/// let mut mesh = PolyMesh::new();
/// mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(1.0, 1.0, 0.4));
/// mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// mesh.add_face(&[0, 1, 2, 3])?;
///
/// let report = flatten_faces(&mut mesh, &FlattenParams::default());
/// assert!(report.all_faces_fitted());
/// assert!(report.max_displacement > 0.0);
/// # Ok::<(), polymesh_types::TopologyError>(())
/// ```
pub fn flatten_faces(mesh: &mut PolyMesh, params: &FlattenParams) -> FlattenReport {
    let iterations = params.effective_iterations();
    info!(
        faces = mesh.face_count(),
        strategy = ?params.strategy,
        iterations,
        "Flattening faces"
    );

    let mut report = FlattenReport::default();
    for iteration in 0..iterations {
        let (degenerate, max_move) = match params.strategy {
            FlattenStrategy::LastWriteWins => last_write_wins_pass(mesh),
            FlattenStrategy::Averaged => averaged_pass(mesh),
        };
        debug!(iteration, max_move, degenerate, "Flattening pass");
        report = FlattenReport {
            iterations: iteration + 1,
            degenerate_faces: degenerate,
            max_displacement: max_move,
        };
    }

    mesh.update_face_normals();

    if report.degenerate_faces > 0 {
        warn!(
            degenerate_faces = report.degenerate_faces,
            "Skipped faces without a well-defined plane"
        );
    }
    info!(
        iterations = report.iterations,
        max_displacement = report.max_displacement,
        "Flattening complete"
    );
    report
}

/// One in-place pass; returns (degenerate faces, max displacement).
fn last_write_wins_pass(mesh: &mut PolyMesh) -> (usize, f64) {
    let mut degenerate = 0;
    let mut max_move: f64 = 0.0;

    for f in 0..mesh.face_count() {
        let Ok(plane) = fit_plane(&mesh.face_positions(f)) else {
            mesh.faces_mut()[f].flags.insert(FaceFlags::DEGENERATE);
            degenerate += 1;
            continue;
        };
        mesh.faces_mut()[f].flags.remove(FaceFlags::DEGENERATE);

        let face_vertices = mesh.faces()[f].vertices().to_vec();
        let vertices = mesh.vertices_mut();
        for v in face_vertices {
            let vertex = &mut vertices[v as usize];
            let projected = plane.project(&vertex.position);
            max_move = max_move.max((projected - vertex.position).norm());
            vertex.position = projected;
        }
    }

    (degenerate, max_move)
}

/// One Jacobi pass; returns (degenerate faces, max displacement).
fn averaged_pass(mesh: &mut PolyMesh) -> (usize, f64) {
    let snapshot = mesh.positions();
    let mut sums = vec![Vector3::zeros(); snapshot.len()];
    let mut counts = vec![0_usize; snapshot.len()];
    let mut degenerate = 0;

    for f in 0..mesh.face_count() {
        let Ok(plane) = fit_plane(&mesh.face_positions(f)) else {
            mesh.faces_mut()[f].flags.insert(FaceFlags::DEGENERATE);
            degenerate += 1;
            continue;
        };
        mesh.faces_mut()[f].flags.remove(FaceFlags::DEGENERATE);

        for &v in mesh.faces()[f].vertices() {
            sums[v as usize] += plane.project(&snapshot[v as usize]).coords;
            counts[v as usize] += 1;
        }
    }

    let mut max_move: f64 = 0.0;
    for ((vertex, sum), count) in mesh.vertices_mut().iter_mut().zip(sums).zip(counts) {
        if count == 0 {
            continue;
        }
        let target = Point3::from(sum / count as f64);
        max_move = max_move.max((target - vertex.position).norm());
        vertex.position = target;
    }

    (degenerate, max_move)
}
