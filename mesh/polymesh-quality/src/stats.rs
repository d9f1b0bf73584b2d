//! Aggregate statistics over stored face qualities.

// Face counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use polymesh_types::PolyMesh;

/// Summary of [`PolyFace::quality`](polymesh_types::PolyFace::quality)
/// over a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityStats {
    /// Smallest face quality.
    pub min: f64,
    /// Largest face quality.
    pub max: f64,
    /// Mean face quality.
    pub average: f64,
    /// Number of faces summarized.
    pub count: usize,
}

impl std::fmt::Display for QualityStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min {:.6}  max {:.6}  avg {:.6}  ({} faces)",
            self.min, self.max, self.average, self.count
        )
    }
}

/// Smallest and largest stored face quality, `None` for a mesh without faces.
///
/// # Preconditions
///
/// Call [`update_quality`](crate::update_quality) after the last geometry
/// change. Faces never evaluated read 0, and faces moved since the last
/// evaluation keep their old value.
#[must_use]
pub fn quality_min_max(mesh: &PolyMesh) -> Option<(f64, f64)> {
    quality_stats(mesh).map(|s| (s.min, s.max))
}

/// Mean stored face quality, `None` for a mesh without faces.
///
/// # Preconditions
///
/// Call [`update_quality`](crate::update_quality) after the last geometry
/// change. Faces never evaluated read 0, and faces moved since the last
/// evaluation keep their old value.
#[must_use]
pub fn quality_average(mesh: &PolyMesh) -> Option<f64> {
    quality_stats(mesh).map(|s| s.average)
}

/// Min, max and mean of the stored face qualities in one pass.
///
/// Reads the values written by [`update_quality`](crate::update_quality);
/// it does not evaluate anything itself.
///
/// # Preconditions
///
/// Call [`update_quality`](crate::update_quality) after the last geometry
/// change. Faces never evaluated read 0, and faces moved since the last
/// evaluation keep their old value.
///
/// # Example
///
/// ```
/// use polymesh_quality::{quality_stats, update_quality, QualityMode};
/// use polymesh_types::{PolyMesh, Point3};
///
/// let mut mesh = PolyMesh::new();
/// assert!(quality_stats(&mesh).is_none());
///
/// mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(2.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(2.0, 1.0, 0.0));
/// mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// mesh.add_face(&[0, 1, 2, 3])?;
/// update_quality(&mut mesh, QualityMode::Template);
///
/// let stats = quality_stats(&mesh).unwrap();
/// assert_eq!(stats.count, 1);
/// assert!(stats.min <= stats.average && stats.average <= stats.max);
/// # Ok::<(), polymesh_types::TopologyError>(())
/// ```
#[must_use]
pub fn quality_stats(mesh: &PolyMesh) -> Option<QualityStats> {
    let faces = mesh.faces();
    if faces.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for face in faces {
        min = min.min(face.quality);
        max = max.max(face.quality);
        sum += face.quality;
    }

    Some(QualityStats {
        min,
        max,
        average: sum / faces.len() as f64,
        count: faces.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QualityMode, face_quality, update_quality};
    use approx::assert_relative_eq;
    use polymesh_types::Point3;

    fn mesh_with_qualities(values: &[f64]) -> PolyMesh {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        for _ in values {
            let _ = mesh.add_face(&[0, 1, 2]);
        }
        for (face, &q) in mesh.faces_mut().iter_mut().zip(values) {
            face.quality = q;
        }
        mesh
    }

    #[test]
    fn empty_mesh_has_no_stats() {
        let mesh = PolyMesh::new();
        assert!(quality_stats(&mesh).is_none());
        assert!(quality_min_max(&mesh).is_none());
        assert!(quality_average(&mesh).is_none());
    }

    #[test]
    fn stats_bracket_the_average() {
        let mesh = mesh_with_qualities(&[0.2, 0.05, 0.8, 0.35]);
        let stats = quality_stats(&mesh).unwrap_or(QualityStats {
            min: 0.0,
            max: 0.0,
            average: 0.0,
            count: 0,
        });

        assert_eq!(stats.count, 4);
        assert_relative_eq!(stats.min, 0.05);
        assert_relative_eq!(stats.max, 0.8);
        assert_relative_eq!(stats.average, 0.35);
        assert!(stats.min <= stats.average && stats.average <= stats.max);
        assert_eq!(quality_min_max(&mesh), Some((0.05, 0.8)));
    }

    #[test]
    fn stats_read_stored_values_only() {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(2.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(2.0, 1.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let _ = mesh.add_face(&[0, 1, 2, 3]);

        // Never evaluated
        assert_eq!(quality_min_max(&mesh), Some((0.0, 0.0)));
        assert_eq!(quality_average(&mesh), Some(0.0));

        update_quality(&mut mesh, QualityMode::Planarity);
        let flat = quality_average(&mesh).unwrap_or(f64::NAN);
        assert_relative_eq!(flat, 0.0, epsilon = 1e-12);

        // Lift a corner: the stored value is stale until re-evaluated
        mesh.vertices_mut()[2].position.z = 0.5;
        assert_eq!(quality_average(&mesh), Some(flat));

        update_quality(&mut mesh, QualityMode::Planarity);
        let fresh = face_quality(&mesh, 0, QualityMode::Planarity);
        assert!(fresh > 0.0);
        assert_eq!(quality_average(&mesh), Some(fresh));
    }

    #[test]
    fn display_lists_all_fields() {
        let mesh = mesh_with_qualities(&[0.5]);
        let text = quality_stats(&mesh).map(|s| s.to_string()).unwrap_or_default();
        assert!(text.contains("min 0.500000"));
        assert!(text.contains("(1 faces)"));
    }
}
