//! Planes and least-squares plane fitting.

use nalgebra::{Point3, Vector3};

use crate::error::NumericDegeneracy;
use crate::pca::pca_from_points;

/// Largest variance treated as "all points coincide".
const COINCIDENT_VARIANCE: f64 = 1e-300;

/// Ratio of middle to largest variance below which points are colinear.
const COLINEAR_RATIO: f64 = 1e-10;

/// A plane in 3D space defined by a point and normal.
///
/// The plane equation is: `normal · (p - origin) = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point on the plane.
    pub origin: Point3<f64>,
    /// The plane normal (unit vector).
    pub normal: Vector3<f64>,
}

impl Plane {
    /// Create a plane from a point and a normal, which is normalized.
    ///
    /// Returns `None` for a zero normal.
    #[must_use]
    pub fn new(origin: Point3<f64>, normal: Vector3<f64>) -> Option<Self> {
        let norm = normal.norm();
        if norm < f64::EPSILON {
            return None;
        }
        Some(Self {
            origin,
            normal: normal / norm,
        })
    }

    /// Signed distance; positive on the side the normal points to.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    /// Absolute distance from a point to the plane.
    #[must_use]
    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Orthogonal projection of a point onto the plane.
    #[must_use]
    pub fn project(&self, point: &Point3<f64>) -> Point3<f64> {
        point - self.signed_distance(point) * self.normal
    }
}

/// Fit the least-squares plane through a point set.
///
/// The plane passes through the centroid; its normal is the direction of
/// least variance. The normal's sign is arbitrary.
///
/// # Errors
///
/// - [`NumericDegeneracy::InsufficientPoints`] for fewer than three points
/// - [`NumericDegeneracy::Coincident`] if all points coincide
/// - [`NumericDegeneracy::Colinear`] if the points span only a line, where
///   the normal would be undefined
///
/// # Example
///
/// ```
/// use polymesh_planarity::{fit_plane, NumericDegeneracy};
/// use polymesh_types::Point3;
///
/// let quad = [
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(1.0, 0.0, 1.0),
///     Point3::new(1.0, 1.0, 1.0),
///     Point3::new(0.0, 1.0, 1.0),
/// ];
/// let plane = fit_plane(&quad)?;
/// assert!((plane.origin.z - 1.0).abs() < 1e-12);
/// assert!(plane.normal.z.abs() > 0.999);
/// # Ok::<(), NumericDegeneracy>(())
/// ```
pub fn fit_plane(points: &[Point3<f64>]) -> Result<Plane, NumericDegeneracy> {
    let pca = pca_from_points(points).ok_or(NumericDegeneracy::InsufficientPoints {
        actual: points.len(),
    })?;

    if pca.eigenvalues[0] <= COINCIDENT_VARIANCE {
        return Err(NumericDegeneracy::Coincident);
    }
    if pca.eigenvalues[1] <= COLINEAR_RATIO * pca.eigenvalues[0] {
        return Err(NumericDegeneracy::Colinear);
    }

    Plane::new(pca.centroid, pca.normal()).ok_or(NumericDegeneracy::Colinear)
}

/// Create a default plane (Z=0) for testing fallback scenarios.
#[cfg(test)]
fn default_plane() -> Plane {
    Plane {
        origin: Point3::origin(),
        normal: Vector3::z(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plane_normalizes_normal() {
        let plane = Plane::new(Point3::origin(), Vector3::new(0.0, 0.0, 2.0)).unwrap_or_else(default_plane);
        assert_relative_eq!(plane.normal.norm(), 1.0, epsilon = 1e-10);
        assert!(Plane::new(Point3::origin(), Vector3::zeros()).is_none());
    }

    #[test]
    fn signed_distance_and_projection() {
        let plane = default_plane();

        assert_relative_eq!(plane.signed_distance(&Point3::new(0.0, 0.0, 5.0)), 5.0);
        assert_relative_eq!(plane.signed_distance(&Point3::new(1.0, 2.0, -3.0)), -3.0);
        assert_relative_eq!(plane.distance(&Point3::new(1.0, 2.0, -3.0)), 3.0);

        let projected = plane.project(&Point3::new(3.0, 4.0, 7.0));
        assert_relative_eq!(projected, Point3::new(3.0, 4.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn fit_tilted_plane() {
        let normal = Vector3::new(1.0, 2.0, 3.0).normalize();
        let origin = Point3::new(0.5, -1.0, 2.0);
        let u = normal.cross(&Vector3::x()).normalize();
        let v = normal.cross(&u);
        let points: Vec<_> = [(0.0, 0.0), (2.0, 0.0), (1.0, 3.0), (-1.0, 1.0)]
            .iter()
            .map(|&(a, b)| origin + a * u + b * v)
            .collect();

        let plane = fit_plane(&points).unwrap_or_else(|_| default_plane());
        assert_relative_eq!(plane.normal.dot(&normal).abs(), 1.0, epsilon = 1e-10);
        for p in &points {
            assert!(plane.distance(p) < 1e-12);
        }
    }

    #[test]
    fn fit_reports_degeneracies() {
        assert_eq!(
            fit_plane(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0)]),
            Err(NumericDegeneracy::InsufficientPoints { actual: 2 })
        );

        let same = [Point3::new(1.0, 1.0, 1.0); 4];
        assert_eq!(fit_plane(&same), Err(NumericDegeneracy::Coincident));

        let line = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(3.0, 6.0, 9.0),
        ];
        assert_eq!(fit_plane(&line), Err(NumericDegeneracy::Colinear));
    }
}
