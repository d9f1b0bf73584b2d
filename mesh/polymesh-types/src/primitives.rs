//! Closed, outward-wound triangle meshes for tests, benches and demos.

use hashbrown::HashMap;
use nalgebra::Point3;

use crate::TriMesh;

fn build(vertices: &[[f64; 3]], faces: &[[u32; 3]]) -> TriMesh {
    TriMesh::from_parts(
        vertices.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect(),
        faces.to_vec(),
    )
}

/// Regular tetrahedron inscribed in the cube `[-1, 1]^3`.
#[must_use]
pub fn tetrahedron() -> TriMesh {
    build(
        &[[1.0, 1.0, 1.0], [1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, 1.0]],
        &[[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
    )
}

/// Octahedron with vertices on the unit axes, ordered `+x, -x, +y, -y, +z, -z`.
#[must_use]
pub fn octahedron() -> TriMesh {
    build(
        &[
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ],
        &[
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
    )
}

/// Unit cube `[0, 1]^3` split into 12 triangles.
///
/// Its dual is not a regular solid: corners where three diagonals meet
/// become hexagons and the others quads.
#[must_use]
pub fn unit_cube() -> TriMesh {
    build(
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
        &[
            // Bottom (z=0)
            [0, 2, 1],
            [0, 3, 2],
            // Top (z=1)
            [4, 5, 6],
            [4, 6, 7],
            // Front (y=0)
            [0, 1, 5],
            [0, 5, 4],
            // Back (y=1)
            [3, 7, 6],
            [3, 6, 2],
            // Left (x=0)
            [0, 4, 7],
            [0, 7, 3],
            // Right (x=1)
            [1, 2, 6],
            [1, 6, 5],
        ],
    )
}

/// Regular icosahedron on the unit sphere. Its dual is a dodecahedron.
#[must_use]
pub fn icosahedron() -> TriMesh {
    let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
    let a: f64 = 1.0;
    let b = 1.0 / phi;
    let len = a.hypot(b);
    let (a, b) = (a / len, b / len);

    build(
        &[
            [0.0, b, -a],
            [b, a, 0.0],
            [-b, a, 0.0],
            [0.0, b, a],
            [0.0, -b, a],
            [-a, 0.0, b],
            [0.0, -b, -a],
            [a, 0.0, -b],
            [a, 0.0, b],
            [-a, 0.0, -b],
            [b, -a, 0.0],
            [-b, -a, 0.0],
        ],
        &[
            [0, 2, 1],
            [3, 1, 2],
            [3, 5, 4],
            [3, 4, 8],
            [0, 7, 6],
            [0, 6, 9],
            [4, 11, 10],
            [6, 10, 11],
            [2, 9, 5],
            [11, 5, 9],
            [1, 8, 7],
            [10, 7, 8],
            [3, 2, 5],
            [3, 8, 1],
            [0, 9, 2],
            [0, 1, 7],
            [6, 11, 9],
            [6, 7, 10],
            [4, 5, 11],
            [4, 10, 8],
        ],
    )
}

/// Icosahedron subdivided `level` times, with new vertices pushed onto the
/// unit sphere. Level `n` has `20 * 4^n` triangles.
#[must_use]
pub fn icosphere(level: u32) -> TriMesh {
    let mut mesh = icosahedron();
    for _ in 0..level {
        mesh = subdivide_sphere(&mesh);
    }
    mesh
}

#[allow(clippy::cast_possible_truncation)]
fn subdivide_sphere(mesh: &TriMesh) -> TriMesh {
    let mut positions = mesh.positions.clone();
    let mut faces = Vec::with_capacity(mesh.faces.len() * 4);
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();

    let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Point3<f64>>| -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        *midpoints.entry(key).or_insert_with(|| {
            let m = nalgebra::center(&positions[a as usize], &positions[b as usize]);
            let idx = positions.len() as u32;
            positions.push(Point3::from(m.coords.normalize()));
            idx
        })
    };

    for &[a, b, c] in &mesh.faces {
        let ab = midpoint(a, b, &mut positions);
        let bc = midpoint(b, c, &mut positions);
        let ca = midpoint(c, a, &mut positions);
        faces.push([a, ab, ca]);
        faces.push([b, bc, ab]);
        faces.push([c, ca, bc]);
        faces.push([ab, bc, ca]);
    }

    TriMesh::from_parts(positions, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeshTopology;
    use approx::assert_relative_eq;

    /// Signed volume by the divergence theorem; positive for outward winding.
    fn signed_volume(mesh: &TriMesh) -> f64 {
        mesh.faces
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (
                    mesh.positions[a as usize].coords,
                    mesh.positions[b as usize].coords,
                    mesh.positions[c as usize].coords,
                );
                a.dot(&b.cross(&c)) / 6.0
            })
            .sum()
    }

    #[test]
    fn primitives_wind_outward() {
        for mesh in [tetrahedron(), octahedron(), unit_cube(), icosahedron(), icosphere(1)] {
            assert!(signed_volume(&mesh) > 0.0);
        }
        assert_relative_eq!(signed_volume(&unit_cube()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn icosahedron_is_regular_on_unit_sphere() {
        let mesh = icosahedron();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 20);
        for p in &mesh.positions {
            assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-12);
        }
        let edge = |a: u32, b: u32| (mesh.positions[a as usize] - mesh.positions[b as usize]).norm();
        let first = edge(mesh.faces[0][0], mesh.faces[0][1]);
        for &[a, b, c] in &mesh.faces {
            assert_relative_eq!(edge(a, b), first, epsilon = 1e-12);
            assert_relative_eq!(edge(b, c), first, epsilon = 1e-12);
            assert_relative_eq!(edge(c, a), first, epsilon = 1e-12);
        }
    }

    #[test]
    fn icosphere_counts() {
        let mesh = icosphere(1);
        assert_eq!(mesh.vertex_count(), 42);
        assert_eq!(mesh.face_count(), 80);
        for p in &mesh.positions {
            assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-12);
        }
    }
}
