//! Polygonal dual meshes.
//!
//! This crate turns a closed triangle mesh into its polygonal dual:
//!
//! - [`import_triangle_mesh`] - validates a [`TriMesh`](polymesh_types::TriMesh)
//!   and converts it to a [`PolyMesh`](polymesh_types::PolyMesh) with adjacency
//! - [`build_dual`] - one dual vertex per primal face, one dual face per
//!   primal vertex, wound so the dual faces outward like the primal
//!
//! For a closed genus-0 input the dual swaps vertex and face counts and
//! preserves the edge count; the dual of a triangle mesh is generally a
//! mix of pentagons, hexagons and other polygons.
//!
//! # Example
//!
//! ```
//! use polymesh_dual::{build_dual, import_triangle_mesh, DualParams, RepresentativePoint};
//! use polymesh_types::{MeshTopology, unit_cube};
//!
//! let mut primal = import_triangle_mesh(&unit_cube())?;
//! let params = DualParams::new().with_representative_point(RepresentativePoint::AreaCentroid);
//! let dual = build_dual(&mut primal, &params)?;
//!
//! assert_eq!(dual.mesh.vertex_count(), primal.face_count());
//! assert_eq!(dual.mesh.face_count(), primal.vertex_count());
//! assert!(dual.counts_swapped());
//! # Ok::<(), polymesh_dual::DualError>(())
//! ```

#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod dual;
mod error;
mod import;
mod params;
mod result;

pub use dual::{build_dual, representative_point};
pub use error::{DualError, DualResult, ImportError};
pub use import::import_triangle_mesh;
pub use params::{DualParams, RepresentativePoint};
pub use result::DualMesh;
