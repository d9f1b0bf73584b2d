//! Pipeline configuration.

use polymesh_dual::DualParams;
use polymesh_planarity::{FlattenParams, SmoothParams};
use polymesh_quality::QualityMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for every stage of a [`DualPipeline`](crate::DualPipeline).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineConfig {
    /// Dual construction.
    pub dual: DualParams,

    /// Smoothing applied to the first copy of the dual.
    pub smooth: SmoothParams,

    /// Flattening applied to the second copy of the dual.
    pub flatten: FlattenParams,

    /// Metrics evaluated on every variant, in report order.
    pub quality_modes: Vec<QualityMode>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dual: DualParams::default(),
            smooth: SmoothParams::default(),
            flatten: FlattenParams::default(),
            quality_modes: QualityMode::ALL.to_vec(),
        }
    }
}

impl PipelineConfig {
    /// Centroid dual, 100 smoothing passes, one last-write-wins flattening
    /// pass, both quality metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ten smoothing passes instead of a hundred.
    #[must_use]
    pub fn fast() -> Self {
        Self::default().with_smooth(SmoothParams::new().with_iterations(10))
    }

    /// Set the dual construction parameters.
    #[must_use]
    pub fn with_dual(mut self, dual: DualParams) -> Self {
        self.dual = dual;
        self
    }

    /// Set the smoothing parameters.
    #[must_use]
    pub fn with_smooth(mut self, smooth: SmoothParams) -> Self {
        self.smooth = smooth;
        self
    }

    /// Set the flattening parameters.
    #[must_use]
    pub fn with_flatten(mut self, flatten: FlattenParams) -> Self {
        self.flatten = flatten;
        self
    }

    /// Set the evaluated metrics. Duplicates are evaluated once.
    #[must_use]
    pub fn with_quality_modes(mut self, modes: impl IntoIterator<Item = QualityMode>) -> Self {
        self.quality_modes.clear();
        for mode in modes {
            if !self.quality_modes.contains(&mode) {
                self.quality_modes.push(mode);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polymesh_dual::RepresentativePoint;
    use polymesh_planarity::FlattenStrategy;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.dual.representative_point, RepresentativePoint::Centroid);
        assert_eq!(config.smooth.iterations, 100);
        assert_eq!(config.flatten.strategy, FlattenStrategy::LastWriteWins);
        assert_eq!(config.quality_modes, vec![QualityMode::Template, QualityMode::Planarity]);
    }

    #[test]
    fn test_builders() {
        let config = PipelineConfig::fast()
            .with_dual(DualParams::circumcenter())
            .with_flatten(FlattenParams::averaged(20))
            .with_quality_modes([QualityMode::Planarity, QualityMode::Planarity]);

        assert_eq!(config.smooth.iterations, 10);
        assert_eq!(config.dual.representative_point, RepresentativePoint::Circumcenter);
        assert_eq!(config.flatten.iterations, 20);
        assert_eq!(config.quality_modes, vec![QualityMode::Planarity]);
    }
}
