//! Smoothing and flattening parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`smooth_reproject_pca`](crate::smooth_reproject_pca).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmoothParams {
    /// Number of Jacobi passes.
    pub iterations: u32,

    /// Weight kept on the current position, in `[0, 1]`.
    /// `0.0` moves each vertex straight to its ring average.
    pub damping: f64,

    /// Pull each result back onto the tangent plane of the input surface.
    /// Without it repeated averaging shrinks closed meshes.
    pub reproject: bool,
}

impl Default for SmoothParams {
    fn default() -> Self {
        Self {
            iterations: 100,
            damping: 0.5,
            reproject: true,
        }
    }
}

impl SmoothParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain Laplacian averaging followed by ring-plane projection, with no
    /// damping and no tangent reprojection.
    #[must_use]
    pub const fn laplacian() -> Self {
        Self {
            iterations: 1,
            damping: 0.0,
            reproject: false,
        }
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the damping factor (clamped to `[0, 1]` when used).
    #[must_use]
    pub const fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set whether to reproject onto the input tangent planes.
    #[must_use]
    pub const fn with_reproject(mut self, reproject: bool) -> Self {
        self.reproject = reproject;
        self
    }
}

/// How [`flatten_faces`](crate::flatten_faces) resolves vertices shared by
/// several faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlattenStrategy {
    /// Faces are visited in container order and project the current
    /// positions; a shared vertex ends where its last face put it.
    #[default]
    LastWriteWins,

    /// Every face projects from the same snapshot and each vertex moves to
    /// the mean of its projections. Converges over several iterations.
    Averaged,
}

/// Parameters for [`flatten_faces`](crate::flatten_faces).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlattenParams {
    /// Conflict resolution for shared vertices.
    pub strategy: FlattenStrategy,

    /// Number of passes. `0` is treated as `1`.
    pub iterations: u32,
}

impl Default for FlattenParams {
    fn default() -> Self {
        Self::new()
    }
}

impl FlattenParams {
    /// Create new parameters with default values (one last-write-wins pass).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: FlattenStrategy::LastWriteWins,
            iterations: 1,
        }
    }

    /// Averaged flattening with the given number of passes.
    #[must_use]
    pub const fn averaged(iterations: u32) -> Self {
        Self {
            strategy: FlattenStrategy::Averaged,
            iterations,
        }
    }

    /// Set the strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: FlattenStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Passes actually performed.
    #[must_use]
    pub const fn effective_iterations(&self) -> u32 {
        if self.iterations == 0 { 1 } else { self.iterations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SmoothParams::default();
        assert_eq!(params.iterations, 100);
        assert!((params.damping - 0.5).abs() < f64::EPSILON);
        assert!(params.reproject);

        let params = FlattenParams::new();
        assert_eq!(params.strategy, FlattenStrategy::LastWriteWins);
        assert_eq!(params.effective_iterations(), 1);
    }

    #[test]
    fn test_builder() {
        let params = SmoothParams::new()
            .with_iterations(3)
            .with_damping(0.25)
            .with_reproject(false);
        assert_eq!(params.iterations, 3);
        assert!(!params.reproject);

        let params = FlattenParams::averaged(20).with_iterations(0);
        assert_eq!(params.strategy, FlattenStrategy::Averaged);
        assert_eq!(params.effective_iterations(), 1);
    }
}
