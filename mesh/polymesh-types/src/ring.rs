//! Ordered one-rings around vertices.
//!
//! A ring is found by walking the fan of faces around a vertex through
//! face-face adjacency. From a face holding the vertex at slot `s`, the walk
//! crosses the edge entering the vertex (`prev(s) -> s`) into the neighbor.
//! With faces wound counter-clockwise from outside, this visits the fan
//! counter-clockwise around the vertex, which is the winding a dual face
//! needs.

use crate::{PolyMesh, TopologyError, TopologyResult};

/// The ordered fan of faces around one vertex.
///
/// `faces[i]` holds the vertex at slot `slots[i]`, and `neighbors[i]` is the
/// vertex following it in that face. All three lists have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRing {
    /// The center vertex.
    pub vertex: u32,
    /// Incident faces in counter-clockwise order.
    pub faces: Vec<u32>,
    /// Slot of the center vertex inside each face.
    pub slots: Vec<usize>,
    /// One-ring neighbor vertices in counter-clockwise order.
    pub neighbors: Vec<u32>,
}

impl VertexRing {
    /// Number of incident faces.
    #[inline]
    #[must_use]
    pub fn degree(&self) -> usize {
        self.faces.len()
    }
}

/// Walk the ring of `vertex`, starting at `face` where the vertex sits at
/// `slot`.
///
/// Requires up-to-date adjacency.
///
/// # Errors
///
/// - [`TopologyError::BrokenAdjacency`] if `face` is out of range or does
///   not hold `vertex` at `slot`, or a neighbor is missing or does not
///   contain the vertex
/// - [`TopologyError::OpenVertexRing`] on a boundary edge
/// - [`TopologyError::InconsistentOrientation`] if a neighbor winds the
///   shared edge the same way
/// - [`TopologyError::NonManifoldVertex`] if the fan does not reach every
///   face incident to the vertex
pub fn vertex_ring(mesh: &PolyMesh, vertex: u32, face: u32, slot: usize) -> TopologyResult<VertexRing> {
    let ring = walk_ring(mesh, vertex, face, slot)?;
    let incident = mesh
        .faces
        .iter()
        .filter(|f| f.vertices().contains(&vertex))
        .count();
    check_fan_covers(ring, incident)
}

/// Rings of every vertex, in vertex order.
///
/// Each vertex is seeded from the first face that references it, using the
/// mesh visitation marks. The marks are reset first.
///
/// # Errors
///
/// Any error of [`vertex_ring`], or [`TopologyError::IsolatedVertex`] for a
/// vertex referenced by no face.
#[allow(clippy::cast_possible_truncation)]
pub fn vertex_rings(mesh: &mut PolyMesh) -> TopologyResult<Vec<VertexRing>> {
    let mut incident = vec![0_usize; mesh.vertices.len()];
    for face in &mesh.faces {
        for &v in face.vertices() {
            incident[v as usize] += 1;
        }
    }

    mesh.unmark_all();
    let mut rings: Vec<Option<VertexRing>> = vec![None; mesh.vertices.len()];
    for fi in 0..mesh.faces.len() {
        for slot in 0..mesh.faces[fi].arity() {
            let v = mesh.faces[fi].vertex(slot);
            if mesh.is_vertex_marked(v) {
                continue;
            }
            mesh.mark_vertex(v);
            let ring = walk_ring(mesh, v, fi as u32, slot)?;
            rings[v as usize] = Some(check_fan_covers(ring, incident[v as usize])?);
        }
    }

    rings
        .into_iter()
        .enumerate()
        .map(|(v, ring)| ring.ok_or(TopologyError::IsolatedVertex { vertex: v as u32 }))
        .collect()
}

fn check_fan_covers(ring: VertexRing, incident: usize) -> TopologyResult<VertexRing> {
    if ring.degree() == incident {
        Ok(ring)
    } else {
        Err(TopologyError::NonManifoldVertex {
            vertex: ring.vertex,
            ring_faces: ring.degree(),
            incident_faces: incident,
        })
    }
}

fn walk_ring(mesh: &PolyMesh, vertex: u32, start: u32, start_slot: usize) -> TopologyResult<VertexRing> {
    let broken = |face| TopologyError::BrokenAdjacency {
        face,
        neighbor: face,
        vertex,
    };
    let Some(first) = mesh.faces.get(start as usize) else {
        return Err(broken(start));
    };
    if first.vertex(start_slot) != vertex {
        return Err(broken(start));
    }

    let mut ring = VertexRing {
        vertex,
        faces: vec![start],
        slots: vec![start_slot],
        neighbors: vec![first.vertex(start_slot + 1)],
    };

    let (mut face, mut slot) = (start, start_slot);
    loop {
        let current = &mesh.faces[face as usize];
        let entering = current.prev_slot(slot);
        let prev = current.vertex(entering);
        let Some(next_face) = current.adjacent_face(entering) else {
            return Err(TopologyError::OpenVertexRing { vertex, face });
        };
        if next_face == start {
            break;
        }

        let Some(neighbor) = mesh.faces.get(next_face as usize) else {
            return Err(broken(next_face));
        };
        let Some(next_slot) = neighbor.slot_of(vertex) else {
            return Err(TopologyError::BrokenAdjacency {
                face,
                neighbor: next_face,
                vertex,
            });
        };
        if neighbor.vertex(next_slot + 1) != prev {
            return Err(TopologyError::InconsistentOrientation {
                vertex,
                face,
                neighbor: next_face,
            });
        }
        // A fan that loops without returning to the start is pinched.
        if ring.faces.contains(&next_face) {
            return Err(TopologyError::NonManifoldVertex {
                vertex,
                ring_faces: ring.degree(),
                incident_faces: ring.degree() + 1,
            });
        }

        ring.faces.push(next_face);
        ring.slots.push(next_slot);
        ring.neighbors.push(prev);
        face = next_face;
        slot = next_slot;
    }

    Ok(ring)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Point3, octahedron};

    fn poly_from(tri: &crate::TriMesh) -> PolyMesh {
        let mut mesh = PolyMesh::new();
        for p in &tri.positions {
            mesh.add_vertex(*p);
        }
        for f in &tri.faces {
            mesh.add_face(f).unwrap();
        }
        mesh.update_face_face_adjacency().unwrap();
        mesh
    }

    #[test]
    fn octahedron_rings_are_closed_and_ordered() {
        let mut mesh = poly_from(&octahedron());
        let rings = vertex_rings(&mut mesh).unwrap();
        assert_eq!(rings.len(), 6);

        for ring in &rings {
            assert_eq!(ring.degree(), 4);
            // Consecutive faces share the edge to the neighbor between them
            for i in 0..ring.degree() {
                let f = &mesh.faces()[ring.faces[i] as usize];
                assert_eq!(f.vertex(ring.slots[i]), ring.vertex);
                assert_eq!(f.vertex(ring.slots[i] + 1), ring.neighbors[i]);
            }
        }

        // +z apex sees +x, +y, -x, -y counter-clockwise from above
        let top = &rings[4];
        let start = top.neighbors.iter().position(|&n| n == 0).unwrap();
        let ordered: Vec<u32> = (0..4).map(|i| top.neighbors[(start + i) % 4]).collect();
        assert_eq!(ordered, vec![0, 2, 1, 3]);
    }

    #[test]
    fn single_ring_matches_batch() {
        let mut mesh = poly_from(&octahedron());
        let rings = vertex_rings(&mut mesh).unwrap();
        let ring = &rings[1];
        let single = vertex_ring(&mesh, 1, ring.faces[0], ring.slots[0]).unwrap();
        assert_eq!(&single, ring);
    }

    #[test]
    fn bad_start_face_is_an_error() {
        let mesh = poly_from(&octahedron());
        assert_eq!(
            vertex_ring(&mesh, 0, 999, 0),
            Err(TopologyError::BrokenAdjacency {
                face: 999,
                neighbor: 999,
                vertex: 0,
            })
        );
        // Face 0 exists but does not hold vertex 5 at slot 0
        assert!(matches!(
            vertex_ring(&mesh, 5, 0, 0),
            Err(TopologyError::BrokenAdjacency { face: 0, .. })
        ));
    }

    #[test]
    fn open_fan_is_reported() {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_face(&[0, 1, 2]).unwrap();
        mesh.update_face_face_adjacency().unwrap();

        let err = vertex_rings(&mut mesh).unwrap_err();
        assert_eq!(err, TopologyError::OpenVertexRing { vertex: 0, face: 0 });
        assert!(format!("{err}").starts_with("open vertex ring"));
    }

    #[test]
    fn flipped_face_is_reported() {
        let tri = octahedron();
        let mut mesh = PolyMesh::new();
        for p in &tri.positions {
            mesh.add_vertex(*p);
        }
        for (i, f) in tri.faces.iter().enumerate() {
            if i == 0 {
                mesh.add_face(&[f[0], f[2], f[1]]).unwrap();
            } else {
                mesh.add_face(f).unwrap();
            }
        }
        mesh.update_face_face_adjacency().unwrap();
        assert!(matches!(
            vertex_rings(&mut mesh),
            Err(TopologyError::InconsistentOrientation { .. })
        ));
    }

    #[test]
    fn unreferenced_vertex_is_isolated() {
        let mut mesh = poly_from(&octahedron());
        mesh.add_vertex(Point3::new(5.0, 5.0, 5.0));
        assert_eq!(
            vertex_rings(&mut mesh).unwrap_err(),
            TopologyError::IsolatedVertex { vertex: 6 }
        );
    }

    #[test]
    fn pinched_vertex_is_non_manifold() {
        // Two octahedra glued at a single vertex
        let tri = octahedron();
        let mut mesh = PolyMesh::new();
        for p in &tri.positions {
            mesh.add_vertex(*p);
        }
        // Second copy shifted up by 2 so its -z apex lands on the first +z apex
        let mut remap = [0_u32; 6];
        for (i, p) in tri.positions.iter().enumerate() {
            remap[i] = if i == 5 {
                4
            } else {
                mesh.add_vertex(Point3::new(p.x, p.y, p.z + 2.0))
            };
        }
        for f in &tri.faces {
            mesh.add_face(f).unwrap();
        }
        for f in &tri.faces {
            mesh.add_face(&[remap[f[0] as usize], remap[f[1] as usize], remap[f[2] as usize]])
                .unwrap();
        }
        mesh.update_face_face_adjacency().unwrap();

        assert_eq!(
            vertex_rings(&mut mesh).unwrap_err(),
            TopologyError::NonManifoldVertex {
                vertex: 4,
                ring_faces: 4,
                incident_faces: 8,
            }
        );
    }
}
