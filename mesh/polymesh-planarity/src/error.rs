//! Error types for planarity optimization.

use polymesh_types::TopologyError;
use thiserror::Error;

/// Result type for planarity operations.
pub type PlanarityResult<T> = Result<T, PlanarityError>;

/// Why a point set has no well-defined best-fit plane.
///
/// Plane fits hit these routinely on thin rings and sliver faces, so the
/// optimizer counts and skips them instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumericDegeneracy {
    /// Fewer than three points.
    #[error("insufficient points: need at least 3, got {actual}")]
    InsufficientPoints {
        /// Number of points provided.
        actual: usize,
    },

    /// All points coincide.
    #[error("points are coincident")]
    Coincident,

    /// All points lie on a line.
    #[error("points are colinear")]
    Colinear,
}

/// Errors that abort a planarity operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanarityError {
    /// Ring walking failed; no vertex was moved.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NumericDegeneracy::InsufficientPoints { actual: 2 };
        assert!(format!("{err}").contains("got 2"));

        let err: PlanarityError = TopologyError::IsolatedVertex { vertex: 7 }.into();
        assert!(format!("{err}").contains("vertex 7"));
    }
}
