//! Reports returned by the planarity operations.

/// Outcome of [`smooth_reproject_pca`](crate::smooth_reproject_pca).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothReport {
    /// Passes performed.
    pub iterations: u32,

    /// Ring plane fits skipped as degenerate, summed over all passes.
    pub degenerate_rings: usize,

    /// Largest single-vertex move in the last pass.
    pub max_displacement: f64,
}

impl std::fmt::Display for SmoothReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Smoothing: {} iterations, {} degenerate rings, last max move {:.3e}",
            self.iterations, self.degenerate_rings, self.max_displacement
        )
    }
}

/// Outcome of [`flatten_faces`](crate::flatten_faces).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlattenReport {
    /// Passes performed.
    pub iterations: u32,

    /// Faces skipped as degenerate in the last pass.
    pub degenerate_faces: usize,

    /// Largest single-vertex move in the last pass.
    pub max_displacement: f64,
}

impl FlattenReport {
    /// Whether every face could be fitted.
    #[must_use]
    pub const fn all_faces_fitted(&self) -> bool {
        self.degenerate_faces == 0
    }
}

impl std::fmt::Display for FlattenReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flattening: {} iterations, {} degenerate faces, last max move {:.3e}",
            self.iterations, self.degenerate_faces, self.max_displacement
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let report = SmoothReport {
            iterations: 100,
            degenerate_rings: 2,
            max_displacement: 0.001,
        };
        let display = format!("{report}");
        assert!(display.contains("100 iterations"));
        assert!(display.contains("2 degenerate"));

        let report = FlattenReport::default();
        assert!(report.all_faces_fitted());
        assert!(format!("{report}").starts_with("Flattening"));
    }
}
