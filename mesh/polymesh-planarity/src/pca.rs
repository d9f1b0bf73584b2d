//! Principal Component Analysis of small point sets.
//!
//! Used on vertex rings and face outlines, which have a handful of points,
//! so the covariance is built directly and decomposed with
//! [`SymmetricEigen`].

use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};

/// Principal frame of a point set.
///
/// `axes` are unit vectors ordered by variance, largest first, so
/// `axes[2]` is the normal of the least-squares plane through `centroid`.
#[derive(Debug, Clone)]
pub struct PcaResult {
    /// Mean of the points.
    pub centroid: Point3<f64>,
    /// Unit principal directions, largest variance first.
    pub axes: [Vector3<f64>; 3],
    /// Variance along each of `axes`.
    pub eigenvalues: [f64; 3],
}

impl PcaResult {
    /// Direction the points spread the most along.
    #[must_use]
    pub const fn primary_axis(&self) -> Vector3<f64> {
        self.axes[0]
    }

    /// Least-squares plane normal.
    #[must_use]
    pub const fn normal(&self) -> Vector3<f64> {
        self.axes[2]
    }

    /// Smallest variance below `threshold` times the largest.
    #[must_use]
    pub fn is_flat(&self, threshold: f64) -> bool {
        self.relative_variance(2) < threshold
    }

    /// Middle variance below `threshold` times the largest.
    #[must_use]
    pub fn is_linear(&self, threshold: f64) -> bool {
        self.relative_variance(1) < threshold
    }

    /// Variance along `axes[axis]` over the largest; zero for a single point.
    fn relative_variance(&self, axis: usize) -> f64 {
        let largest = self.eigenvalues[0];
        if largest <= f64::EPSILON {
            0.0
        } else {
            self.eigenvalues[axis] / largest
        }
    }
}

/// Mean-centred covariance PCA of `points`.
///
/// Returns `None` for fewer than three points.
///
/// # Example
///
/// ```
/// use polymesh_planarity::pca_from_points;
/// use polymesh_types::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(10.0, 1.0, 0.0),
/// ];
/// let pca = pca_from_points(&points).unwrap();
/// assert!(pca.primary_axis().x.abs() > 0.9);
/// assert!(pca.normal().z.abs() > 0.99);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pca_from_points(points: &[Point3<f64>]) -> Option<PcaResult> {
    if points.len() < 3 {
        return None;
    }

    let n = points.len() as f64;
    let centroid = Point3::from(points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / n);
    let covariance = points
        .iter()
        .map(|p| {
            let d = p - centroid;
            d * d.transpose()
        })
        .fold(Matrix3::zeros(), |acc, m| acc + m)
        / n;

    let SymmetricEigen {
        eigenvalues,
        eigenvectors,
    } = SymmetricEigen::new(covariance);

    let mut order = [0_usize, 1, 2];
    order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    Some(PcaResult {
        centroid,
        axes: order.map(|i| eigenvectors.column(i).into_owned()),
        eigenvalues: order.map(|i| eigenvalues[i]),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    /// Six points on a circle of radius 2 in the plane x + y + z = 3.
    fn tilted_ring() -> Vec<Point3<f64>> {
        let n = Vector3::new(1.0, 1.0, 1.0).normalize();
        let u = Vector3::new(1.0, -1.0, 0.0).normalize();
        let w = n.cross(&u);
        let center = Point3::new(1.0, 1.0, 1.0);
        (0..6)
            .map(|k| {
                let a = TAU * f64::from(k) / 6.0;
                center + 2.0 * (a.cos() * u + a.sin() * w)
            })
            .collect()
    }

    #[test]
    fn ring_normal_and_centroid() {
        let pca = pca_from_points(&tilted_ring()).unwrap();

        assert_relative_eq!(pca.centroid, Point3::new(1.0, 1.0, 1.0), epsilon = 1e-12);
        let expected = Vector3::new(1.0, 1.0, 1.0).normalize();
        assert_relative_eq!(pca.normal().dot(&expected).abs(), 1.0, epsilon = 1e-10);
        // A regular ring spreads equally in-plane
        assert_relative_eq!(pca.eigenvalues[0], pca.eigenvalues[1], epsilon = 1e-10);
        assert!(pca.is_flat(1e-12));
        assert!(!pca.is_linear(0.5));
    }

    #[test]
    fn axes_form_an_ordered_orthonormal_frame() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(8.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(8.0, 2.0, 0.3),
            Point3::new(4.0, 1.0, -0.2),
        ];
        let pca = pca_from_points(&points).unwrap();

        assert!(pca.primary_axis().x.abs() > 0.9);
        assert!(pca.eigenvalues[0] >= pca.eigenvalues[1] && pca.eigenvalues[1] >= pca.eigenvalues[2]);
        for i in 0..3 {
            assert_relative_eq!(pca.axes[i].norm(), 1.0, epsilon = 1e-12);
            for j in (i + 1)..3 {
                assert_relative_eq!(pca.axes[i].dot(&pca.axes[j]), 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn colinear_and_coincident_inputs() {
        let line = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(3.0, 6.0, 9.0),
        ];
        assert!(pca_from_points(&line).unwrap().is_linear(1e-10));

        let same = [Point3::new(4.0, 4.0, 4.0); 3];
        let pca = pca_from_points(&same).unwrap();
        assert!(pca.is_flat(1e-10) && pca.is_linear(1e-10));
    }

    #[test]
    fn needs_three_points() {
        assert!(pca_from_points(&[]).is_none());
        assert!(pca_from_points(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).is_none());
    }
}
