//! Per-face quality metrics.
//!
//! Both metrics are dimensionless and non-negative; lower is better and
//! `0.0` is ideal.

// Face arities are tiny
#![allow(clippy::cast_precision_loss)]

use std::f64::consts::TAU;

use nalgebra::{Complex, Point3, Vector3};
use polymesh_planarity::fit_plane;
use polymesh_types::{Aabb, MeshTopology, PolyMesh, newell_normal};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which quality metric to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QualityMode {
    /// Distance from the best-matching regular polygon of the same arity.
    ///
    /// The face is expressed in its own frame (origin at the centroid,
    /// normal along the Newell normal) and the closest rotated, uniformly
    /// scaled unit regular n-gon with the same vertex order is found in
    /// closed form. The score is `sqrt(residual / spread)`, where both
    /// sums include the out-of-plane offsets, so it lies in `[0, 1]`.
    /// Degenerate faces score `1.0`.
    Template,

    /// Largest vertex distance from the face's least-squares plane,
    /// divided by the face's bounding-box diagonal. Colinear or zero-size
    /// faces score `0.0`.
    Planarity,
}

impl QualityMode {
    /// Both modes, in report order.
    pub const ALL: [Self; 2] = [Self::Template, Self::Planarity];

    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Planarity => "planarity",
        }
    }
}

impl std::fmt::Display for QualityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Quality of one face.
///
/// # Example
///
/// ```
/// use polymesh_quality::{face_quality, QualityMode};
/// use polymesh_types::{PolyMesh, Point3};
///
/// let mut mesh = PolyMesh::new();
/// mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
/// mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// mesh.add_face(&[0, 1, 2, 3])?;
///
/// // A planar square is ideal under both metrics
/// assert!(face_quality(&mesh, 0, QualityMode::Template) < 1e-12);
/// assert!(face_quality(&mesh, 0, QualityMode::Planarity) < 1e-12);
/// # Ok::<(), polymesh_types::TopologyError>(())
/// ```
#[must_use]
pub fn face_quality(mesh: &PolyMesh, face: usize, mode: QualityMode) -> f64 {
    let points = mesh.face_positions(face);
    match mode {
        QualityMode::Template => template_quality(&points),
        QualityMode::Planarity => planarity_quality(&points),
    }
}

/// Evaluate `mode` on every face and store it in [`PolyFace::quality`](polymesh_types::PolyFace::quality).
pub fn update_quality(mesh: &mut PolyMesh, mode: QualityMode) {
    for f in 0..mesh.face_count() {
        let q = face_quality(mesh, f, mode);
        mesh.faces_mut()[f].quality = q;
    }
    debug!(faces = mesh.face_count(), %mode, "Face quality updated");
}

/// Template metric on a face outline.
#[must_use]
pub fn template_quality(points: &[Point3<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 1.0;
    }
    let Some(normal) = face_normal(points) else {
        return 1.0;
    };

    let centroid = Point3::from(points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / n as f64);
    let reference = if normal.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    let u = normal.cross(&reference).normalize();
    let w = normal.cross(&u);

    let mut zs = Vec::with_capacity(n);
    let mut height_sq = 0.0;
    for p in points {
        let d = p - centroid;
        zs.push(Complex::new(d.dot(&u), d.dot(&w)));
        let h = d.dot(&normal);
        height_sq += h * h;
    }

    let spread = zs.iter().map(Complex::norm_sqr).sum::<f64>() + height_sq;
    if spread <= f64::MIN_POSITIVE {
        return 1.0;
    }

    let template: Vec<Complex<f64>> = (0..n)
        .map(|k| Complex::from_polar(1.0, TAU * k as f64 / n as f64))
        .collect();
    // Least-squares similarity: the template has zero mean and |u_k| = 1
    let scale = zs
        .iter()
        .zip(&template)
        .map(|(z, t)| z * t.conj())
        .sum::<Complex<f64>>()
        / n as f64;

    let residual = zs
        .iter()
        .zip(&template)
        .map(|(z, t)| (z - scale * t).norm_sqr())
        .sum::<f64>()
        + height_sq;

    (residual.max(0.0) / spread).sqrt()
}

/// Planarity metric on a face outline.
#[must_use]
pub fn planarity_quality(points: &[Point3<f64>]) -> f64 {
    let Ok(plane) = fit_plane(points) else {
        return 0.0;
    };
    let diagonal = Aabb::from_points(points.iter()).diagonal();
    if diagonal <= 0.0 {
        return 0.0;
    }
    points.iter().map(|p| plane.distance(p)).fold(0.0, f64::max) / diagonal
}

/// Unit Newell normal, falling back to the least-squares plane normal for
/// self-cancelling outlines.
fn face_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    newell_normal(points)
        .try_normalize(f64::MIN_POSITIVE)
        .or_else(|| fit_plane(points).ok().map(|plane| plane.normal))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(coords: &[[f64; 3]]) -> Vec<Point3<f64>> {
        coords.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect()
    }

    #[test]
    fn regular_polygons_are_ideal() {
        let square = pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!(template_quality(&square) < 1e-12);

        let h = 3.0_f64.sqrt() / 2.0;
        let triangle = pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, h, 0.0]]);
        assert!(template_quality(&triangle) < 1e-12);

        // Winding does not matter, the frame follows the normal
        let reversed: Vec<_> = square.iter().rev().copied().collect();
        assert!(template_quality(&reversed) < 1e-12);

        let hexagon: Vec<_> = (0..6)
            .map(|k| {
                let a = TAU * f64::from(k) / 6.0 + 0.3;
                Point3::new(2.0 * a.cos() + 5.0, 2.0 * a.sin(), 1.0)
            })
            .collect();
        assert!(template_quality(&hexagon) < 1e-12);
    }

    #[test]
    fn known_template_scores() {
        let rect = pts(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_relative_eq!(template_quality(&rect), 0.316_227_766, epsilon = 1e-6);

        let right = pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_relative_eq!(template_quality(&right), 0.258_819, epsilon = 1e-5);
    }

    #[test]
    fn non_planar_quad_scores() {
        let quad = pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.5], [0.0, 1.0, 0.0]]);
        assert_relative_eq!(template_quality(&quad), 0.1715, epsilon = 1e-3);
        assert_relative_eq!(planarity_quality(&quad), 0.0872, epsilon = 1e-3);
    }

    #[test]
    fn degenerate_faces() {
        let line = pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        assert_relative_eq!(template_quality(&line), 1.0);
        assert_relative_eq!(planarity_quality(&line), 0.0);

        let point = pts(&[[1.0, 1.0, 1.0]; 3]);
        assert_relative_eq!(template_quality(&point), 1.0);
        assert_relative_eq!(planarity_quality(&point), 0.0);
    }

    #[test]
    fn template_is_scale_and_rotation_invariant() {
        let quad = pts(&[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [3.5, 1.0, 0.2], [0.0, 2.0, 0.0]]);
        let q = template_quality(&quad);

        let rotation = nalgebra::Rotation3::from_euler_angles(0.4, -1.1, 2.0);
        let moved: Vec<_> = quad
            .iter()
            .map(|p| rotation * Point3::from(p.coords * 7.5) + Vector3::new(1.0, -2.0, 3.0))
            .collect();
        assert_relative_eq!(template_quality(&moved), q, epsilon = 1e-10);
        assert!(q > 0.0 && q < 1.0);
    }

    #[test]
    fn update_quality_writes_every_face() {
        let mut mesh = PolyMesh::new();
        for p in pts(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [0.0, 1.0, 0.0]]) {
            mesh.add_vertex(p);
        }
        mesh.add_face(&[0, 1, 2, 3]).unwrap();
        mesh.add_face(&[0, 2, 3]).unwrap();

        update_quality(&mut mesh, QualityMode::Template);
        assert_relative_eq!(mesh.faces()[0].quality, 0.316_227_766, epsilon = 1e-6);
        assert!(mesh.faces()[1].quality > 0.0);

        update_quality(&mut mesh, QualityMode::Planarity);
        assert!(mesh.faces().iter().all(|f| f.quality.abs() < 1e-12));
    }

    #[test]
    fn mode_names() {
        assert_eq!(QualityMode::Template.to_string(), "template");
        assert_eq!(QualityMode::ALL.len(), 2);
    }
}
