//! Polygon mesh topology for dual meshing.
//!
//! This crate provides the data model the rest of the workspace builds on:
//!
//! - [`PolyMesh`] - vertices plus variable-arity faces with face-face adjacency
//! - [`PolyVertex`] / [`PolyFace`] - elements with normals, flags and marks
//! - [`TriMesh`] - indexed triangle input
//! - [`VertexRing`] - ordered fan of faces around a vertex
//! - [`Aabb`] - axis-aligned bounding box
//!
//! # Topology
//!
//! Face `f`'s adjacency entry `i` names the face across the edge from
//! vertex `i` to vertex `i + 1`, or `None` on a boundary. After
//! [`PolyMesh::update_face_face_adjacency`] the links are symmetric: if `f`
//! lists `g` across edge `{a, b}`, then `g` lists `f` across the same edge.
//! Edges shared by three or more faces are rejected.
//!
//! # Winding
//!
//! Faces wind **counter-clockwise when viewed from outside**. Ring walks
//! ([`vertex_rings`]) then visit each fan counter-clockwise, which is the
//! order a dual face needs to stay outward-facing.
//!
//! # Example
//!
//! ```
//! use polymesh_types::{PolyMesh, octahedron, vertex_rings};
//!
//! let tri = octahedron();
//! let mut mesh = PolyMesh::new();
//! for p in &tri.positions {
//!     mesh.add_vertex(*p);
//! }
//! for f in &tri.faces {
//!     mesh.add_face(f)?;
//! }
//! let stats = mesh.update_face_face_adjacency()?;
//! assert!(stats.is_closed());
//!
//! let rings = vertex_rings(&mut mesh)?;
//! assert!(rings.iter().all(|r| r.degree() == 4));
//! # Ok::<(), polymesh_types::TopologyError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod bounds;
mod error;
mod face;
mod flags;
mod mesh;
mod primitives;
mod ring;
mod traits;
mod trimesh;
mod vertex;

pub use adjacency::AdjacencyStats;
pub use bounds::Aabb;
pub use error::{TopologyError, TopologyResult};
pub use face::PolyFace;
pub use flags::{FaceFlags, VertexFlags};
pub use mesh::{PolyMesh, newell_normal};
pub use primitives::{icosahedron, icosphere, octahedron, tetrahedron, unit_cube};
pub use ring::{VertexRing, vertex_ring, vertex_rings};
pub use traits::{MeshBounds, MeshTopology};
pub use trimesh::TriMesh;
pub use vertex::PolyVertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
