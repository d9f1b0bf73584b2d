//! Polygonal dual meshing and planarity optimization.
//!
//! This umbrella crate re-exports the `polymesh-*` crates and adds the
//! pieces that tie them together: a [`DualPipeline`] that runs the whole
//! import → dual → optimize → evaluate sequence, and an export seam for
//! writing polygon meshes.
//!
//! # Quick Start
//!
//! ```
//! use polymesh::prelude::*;
//!
//! // A closed, consistently oriented triangle mesh
//! let input = polymesh::types::icosphere(1);
//!
//! let output = DualPipeline::new(PipelineConfig::fast()).run(&input)?;
//! println!("{}", output.dual);
//! println!("{}", output.report);
//!
//! // Write the flattened dual as polygons
//! let mut writer = ObjWriter::new(Vec::new());
//! export_polygon_mesh(&output.flattened, &mut writer)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `PolyMesh`, faces, vertices, adjacency, vertex rings, `TriMesh`, primitives
//! - [`dual`] - Triangle import and dual construction
//! - [`planarity`] - PCA plane fitting, ring smoothing, face flattening
//! - [`quality`] - Template and planarity face metrics with statistics
//!
//! # Feature Flags
//!
//! - `serde` - Serialize meshes, parameters and [`PipelineConfig`]

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/polymesh/0.7.0")]

mod config;
mod error;
mod export;
mod pipeline;

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `PolyMesh`, `PolyFace`, `PolyVertex`, `TriMesh`, `Aabb`.
pub use polymesh_types as types;

/// Triangle import and dual construction.
pub use polymesh_dual as dual;

/// PCA plane fitting, ring smoothing, face flattening.
pub use polymesh_planarity as planarity;

/// Face quality metrics and statistics.
pub use polymesh_quality as quality;

pub use config::PipelineConfig;
pub use error::{ExportError, ExportResult, PipelineError, PipelineResult};
pub use export::{ExportCapabilities, ObjWriter, PolygonExport, export_polygon_mesh};
pub use pipeline::{DualPipeline, PipelineOutput, QualityReport, Variant};

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for dual meshing.
///
/// # Usage
///
/// ```
/// use polymesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use polymesh_types::{Aabb, MeshBounds, MeshTopology, PolyFace, PolyMesh, PolyVertex, TriMesh};

    // Stages
    pub use polymesh_dual::{DualParams, build_dual, import_triangle_mesh};
    pub use polymesh_planarity::{FlattenParams, SmoothParams, flatten_faces, smooth_reproject_pca};
    pub use polymesh_quality::{QualityMode, quality_stats, update_quality};

    // Pipeline and export
    pub use crate::{DualPipeline, ObjWriter, PipelineConfig, Variant, export_polygon_mesh};
}

// =============================================================================
// Tests
// =============================================================================
