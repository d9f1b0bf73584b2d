//! Dual construction parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a primal face's dual vertex is placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RepresentativePoint {
    /// Arithmetic mean of the face vertices.
    #[default]
    Centroid,

    /// Area-weighted centroid of the face's triangle fan.
    /// Equals the vertex mean for triangles.
    AreaCentroid,

    /// Circumcenter of a triangular face. Falls back to the centroid for
    /// other arities and for degenerate triangles.
    Circumcenter,
}

/// Parameters for [`build_dual`](crate::build_dual).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DualParams {
    /// Placement of dual vertices.
    pub representative_point: RepresentativePoint,
}

impl DualParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters placing dual vertices at triangle circumcenters.
    #[must_use]
    pub const fn circumcenter() -> Self {
        Self {
            representative_point: RepresentativePoint::Circumcenter,
        }
    }

    /// Set the dual vertex placement.
    #[must_use]
    pub const fn with_representative_point(mut self, point: RepresentativePoint) -> Self {
        self.representative_point = point;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = DualParams::default();
        assert_eq!(params.representative_point, RepresentativePoint::Centroid);
    }

    #[test]
    fn test_builder() {
        let params = DualParams::new().with_representative_point(RepresentativePoint::AreaCentroid);
        assert_eq!(params.representative_point, RepresentativePoint::AreaCentroid);
        assert_eq!(
            DualParams::circumcenter().representative_point,
            RepresentativePoint::Circumcenter
        );
    }
}
