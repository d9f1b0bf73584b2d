//! Face quality metrics for polygon meshes.
//!
//! Two metrics are provided, selected with [`QualityMode`]:
//!
//! - **Template** - how far a face is from a regular polygon of the same
//!   arity, after the best rotation and uniform scale
//! - **Planarity** - how far the vertices stray from the face's
//!   least-squares plane, relative to the face size
//!
//! Both are non-negative and dimensionless, and **lower is better**: `0.0`
//! means a perfect regular polygon or a perfectly planar face.
//!
//! [`update_quality`] stores one value per face in
//! [`PolyFace::quality`](polymesh_types::PolyFace::quality); the
//! [`quality_stats`] family summarizes those stored values.
//!
//! # Example
//!
//! ```
//! use polymesh_dual::{build_dual, import_triangle_mesh, DualParams};
//! use polymesh_quality::{quality_stats, update_quality, QualityMode};
//! use polymesh_types::icosahedron;
//!
//! let mut primal = import_triangle_mesh(&icosahedron())?;
//! let mut dual = build_dual(&mut primal, &DualParams::default())?.mesh;
//!
//! // A dodecahedron: regular, planar pentagons
//! update_quality(&mut dual, QualityMode::Template);
//! let stats = quality_stats(&dual).unwrap();
//! assert!(stats.max < 1e-9);
//! # Ok::<(), polymesh_dual::DualError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod quality;
mod stats;

pub use quality::{QualityMode, face_quality, planarity_quality, template_quality, update_quality};
pub use stats::{QualityStats, quality_average, quality_min_max, quality_stats};
