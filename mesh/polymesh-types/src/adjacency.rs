//! Face-face adjacency.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use tracing::debug;

use crate::{FaceFlags, PolyMesh, TopologyError, TopologyResult, VertexFlags};

/// Edge counts gathered while rebuilding adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdjacencyStats {
    /// Distinct undirected edges.
    pub edges: usize,
    /// Edges shared by two faces.
    pub interior_edges: usize,
    /// Edges used by a single face.
    pub boundary_edges: usize,
}

impl AdjacencyStats {
    /// Whether every edge has two faces.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.boundary_edges == 0
    }
}

/// State of an undirected edge while scanning faces.
#[derive(Clone, Copy)]
enum EdgeUse {
    Once { face: u32, slot: usize },
    Twice,
}

#[inline]
const fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

impl PolyMesh {
    /// Rebuild face-face adjacency from the face vertex lists.
    ///
    /// Every undirected edge is hashed once. The second face using an edge
    /// is cross-linked with the first; edges seen once stay `None` and
    /// their faces and vertices get the `BORDER` flag. Existing links are
    /// replaced, so calling this twice yields identical adjacency.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NonManifoldEdge`] if an edge is used by a
    /// third face. The mesh is left untouched in that case.
    #[allow(clippy::cast_possible_truncation)]
    pub fn update_face_face_adjacency(&mut self) -> TopologyResult<AdjacencyStats> {
        let mut edges: HashMap<(u32, u32), EdgeUse> = HashMap::new();
        let mut links: Vec<(u32, usize, u32, usize)> = Vec::new();

        for (fi, face) in self.faces.iter().enumerate() {
            let fi = fi as u32;
            for slot in 0..face.arity() {
                let (a, b) = face.edge(slot);
                let key = edge_key(a, b);
                match edges.entry(key) {
                    Entry::Vacant(entry) => {
                        entry.insert(EdgeUse::Once { face: fi, slot });
                    }
                    Entry::Occupied(mut entry) => match *entry.get() {
                        EdgeUse::Once {
                            face: other,
                            slot: other_slot,
                        } => {
                            links.push((fi, slot, other, other_slot));
                            entry.insert(EdgeUse::Twice);
                        }
                        EdgeUse::Twice => {
                            return Err(TopologyError::NonManifoldEdge {
                                v0: key.0,
                                v1: key.1,
                                face: fi,
                            });
                        }
                    },
                }
            }
        }

        for face in &mut self.faces {
            face.clear_adjacency();
            face.flags.remove(FaceFlags::BORDER);
        }
        for vertex in &mut self.vertices {
            vertex.flags.remove(VertexFlags::BORDER);
        }

        for &(f, fs, g, gs) in &links {
            self.faces[f as usize].set_adjacent(fs, Some(g));
            self.faces[g as usize].set_adjacent(gs, Some(f));
        }

        let mut boundary_edges = 0;
        for use_ in edges.values() {
            if let EdgeUse::Once { face, slot } = *use_ {
                boundary_edges += 1;
                let (a, b) = self.faces[face as usize].edge(slot);
                self.faces[face as usize].flags.insert(FaceFlags::BORDER);
                self.vertices[a as usize].flags.insert(VertexFlags::BORDER);
                self.vertices[b as usize].flags.insert(VertexFlags::BORDER);
            }
        }

        let stats = AdjacencyStats {
            edges: edges.len(),
            interior_edges: links.len(),
            boundary_edges,
        };
        debug!(
            edges = stats.edges,
            interior = stats.interior_edges,
            boundary = stats.boundary_edges,
            "Face-face adjacency rebuilt"
        );
        Ok(stats)
    }

    /// Verify that adjacency is symmetric.
    ///
    /// For every link `f -> g` across edge `(a, b)`, face `g` must hold
    /// exactly one edge `{a, b}` and that edge must link back to `f`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::BrokenAdjacency`] naming the first face
    /// whose link is not mirrored.
    #[allow(clippy::cast_possible_truncation)]
    pub fn check_adjacency_symmetry(&self) -> TopologyResult<()> {
        for (fi, face) in self.faces.iter().enumerate() {
            let fi = fi as u32;
            for slot in 0..face.arity() {
                let Some(g) = face.adjacent_face(slot) else {
                    continue;
                };
                let (a, b) = face.edge(slot);
                let broken = TopologyError::BrokenAdjacency {
                    face: fi,
                    neighbor: g,
                    vertex: a,
                };

                let Some(neighbor) = self.faces.get(g as usize) else {
                    return Err(broken);
                };
                let key = edge_key(a, b);
                let mut back_links = 0;
                for gs in 0..neighbor.arity() {
                    let (c, d) = neighbor.edge(gs);
                    if edge_key(c, d) == key {
                        if neighbor.adjacent_face(gs) != Some(fi) {
                            return Err(broken);
                        }
                        back_links += 1;
                    }
                }
                if back_links != 1 {
                    return Err(broken);
                }
            }
        }
        Ok(())
    }
}
