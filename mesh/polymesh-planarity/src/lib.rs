//! Planarity optimization for polygon meshes.
//!
//! Dual meshes come out with non-planar faces. This crate offers two ways
//! to improve them, both working in place on a [`PolyMesh`](polymesh_types::PolyMesh):
//!
//! - [`smooth_reproject_pca`] - Jacobi smoothing where each vertex moves
//!   towards its ring average and onto the ring's least-squares plane,
//!   optionally held on the input surface's tangent plane
//! - [`flatten_faces`] - direct projection of each face onto its own
//!   least-squares plane
//!
//! Both are built on [`pca_from_points`] and [`fit_plane`], which are also
//! useful on their own.
//!
//! # Example
//!
//! ```
//! use polymesh_dual::{build_dual, import_triangle_mesh, DualParams};
//! use polymesh_planarity::{flatten_faces, smooth_reproject_pca, FlattenParams, SmoothParams};
//! use polymesh_types::icosahedron;
//!
//! let mut primal = import_triangle_mesh(&icosahedron())?;
//! let dual = build_dual(&mut primal, &DualParams::default())?;
//!
//! let mut smoothed = dual.mesh.clone();
//! smooth_reproject_pca(&mut smoothed, &SmoothParams::default())?;
//!
//! let mut flattened = dual.mesh.clone();
//! let report = flatten_faces(&mut flattened, &FlattenParams::averaged(10));
//! assert_eq!(report.iterations, 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod flatten;
mod params;
mod pca;
mod plane;
mod result;
mod smooth;

pub use error::{NumericDegeneracy, PlanarityError, PlanarityResult};
pub use flatten::flatten_faces;
pub use params::{FlattenParams, FlattenStrategy, SmoothParams};
pub use pca::{PcaResult, pca_from_points};
pub use plane::{Plane, fit_plane};
pub use result::{FlattenReport, SmoothReport};
pub use smooth::smooth_reproject_pca;
