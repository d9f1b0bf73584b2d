//! Polygon export seam.
//!
//! Writers implement [`PolygonExport`] and declare what they can store via
//! [`ExportCapabilities`]. [`export_polygon_mesh`] drives a writer over a
//! mesh and refuses polygons a triangle-only writer cannot represent
//! instead of triangulating them.

use std::io::Write;

use polymesh_types::{MeshTopology, PolyMesh, PolyVertex};
use tracing::debug;

use crate::error::{ExportError, ExportResult};

/// What a polygon writer can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportCapabilities {
    /// Whether faces with more than three vertices are accepted.
    pub polygonal: bool,
}

/// A sink for polygon meshes.
///
/// [`export_polygon_mesh`] calls `begin` once, `write_vertex` for every
/// vertex in index order, `write_face` for every face in index order and
/// `finish` once.
pub trait PolygonExport {
    /// What this writer accepts.
    fn capabilities(&self) -> ExportCapabilities;

    /// Start a mesh with the given element counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying sink fails.
    fn begin(&mut self, vertex_count: usize, face_count: usize) -> ExportResult<()>;

    /// Write one vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying sink fails.
    fn write_vertex(&mut self, vertex: &PolyVertex) -> ExportResult<()>;

    /// Write one face as zero-based vertex indices.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying sink fails.
    fn write_face(&mut self, vertices: &[u32]) -> ExportResult<()>;

    /// Complete the mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying sink fails.
    fn finish(&mut self) -> ExportResult<()>;
}

/// Write `mesh` to `exporter`.
///
/// # Errors
///
/// Returns [`ExportError::PolygonalUnsupported`] for the first face with
/// more than three vertices when the exporter is not polygonal; nothing is
/// written in that case. Writer failures are passed through.
///
/// # Example
///
/// ```
/// use polymesh::{export_polygon_mesh, ObjWriter};
/// use polymesh::dual::{build_dual, import_triangle_mesh, DualParams};
/// use polymesh::types::octahedron;
///
/// let mut primal = import_triangle_mesh(&octahedron())?;
/// let cube = build_dual(&mut primal, &DualParams::default())?.mesh;
///
/// let mut writer = ObjWriter::new(Vec::new());
/// export_polygon_mesh(&cube, &mut writer)?;
/// let obj = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn export_polygon_mesh<E: PolygonExport + ?Sized>(mesh: &PolyMesh, exporter: &mut E) -> ExportResult<()> {
    if !exporter.capabilities().polygonal {
        if let Some((face, f)) = mesh.faces().iter().enumerate().find(|(_, f)| f.arity() > 3) {
            return Err(ExportError::PolygonalUnsupported {
                face,
                arity: f.arity(),
            });
        }
    }

    exporter.begin(mesh.vertex_count(), mesh.face_count())?;
    for vertex in mesh.vertices() {
        exporter.write_vertex(vertex)?;
    }
    for face in mesh.faces() {
        exporter.write_face(face.vertices())?;
    }
    exporter.finish()?;

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Polygon mesh exported"
    );
    Ok(())
}

/// Wavefront OBJ writer over any [`Write`].
///
/// Writes `v` lines, optional `vn` lines and one `f` line per polygon. It
/// never touches the file system; wrap a `BufWriter<File>` to save to disk.
#[derive(Debug)]
pub struct ObjWriter<W: Write> {
    writer: W,
    normals: bool,
    polygonal: bool,
}

impl<W: Write> ObjWriter<W> {
    /// Polygonal writer without normals.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            normals: false,
            polygonal: true,
        }
    }

    /// Also write vertex normals.
    #[must_use]
    pub fn with_normals(mut self, normals: bool) -> Self {
        self.normals = normals;
        self
    }

    /// Only accept triangles, for consumers that cannot read polygons.
    #[must_use]
    pub fn triangles_only(mut self) -> Self {
        self.polygonal = false;
        self
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PolygonExport for ObjWriter<W> {
    fn capabilities(&self) -> ExportCapabilities {
        ExportCapabilities {
            polygonal: self.polygonal,
        }
    }

    fn begin(&mut self, vertex_count: usize, face_count: usize) -> ExportResult<()> {
        writeln!(self.writer, "# polymesh")?;
        writeln!(self.writer, "# vertices {vertex_count}")?;
        writeln!(self.writer, "# faces {face_count}")?;
        Ok(())
    }

    fn write_vertex(&mut self, vertex: &PolyVertex) -> ExportResult<()> {
        let p = vertex.position;
        writeln!(self.writer, "v {} {} {}", p.x, p.y, p.z)?;
        if self.normals {
            let n = vertex.normal;
            writeln!(self.writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        Ok(())
    }

    fn write_face(&mut self, vertices: &[u32]) -> ExportResult<()> {
        write!(self.writer, "f")?;
        for &v in vertices {
            // OBJ indices are one-based
            let index = u64::from(v) + 1;
            if self.normals {
                write!(self.writer, " {index}//{index}")?;
            } else {
                write!(self.writer, " {index}")?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> ExportResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use polymesh_dual::{DualParams, build_dual, import_triangle_mesh};
    use polymesh_types::{Point3, tetrahedron};

    fn quad() -> PolyMesh {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_face(&[0, 1, 2]).unwrap();
        mesh.add_face(&[0, 1, 2, 3]).unwrap();
        mesh
    }

    fn export_to_string(mesh: &PolyMesh, mut writer: ObjWriter<Vec<u8>>) -> (ExportResult<()>, String) {
        let result = export_polygon_mesh(mesh, &mut writer);
        (result, String::from_utf8(writer.into_inner()).unwrap())
    }

    #[test]
    fn test_obj_layout() {
        let (result, obj) = export_to_string(&quad(), ObjWriter::new(Vec::new()));
        result.unwrap();

        let lines: Vec<&str> = obj.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "v 0 0 0");
        assert_eq!(lines[4], "f 1 2 3");
        assert_eq!(lines[5], "f 1 2 3 4");
    }

    #[test]
    fn test_obj_with_normals() {
        let mut primal = import_triangle_mesh(&tetrahedron()).unwrap();
        let dual = build_dual(&mut primal, &DualParams::default()).unwrap().mesh;

        let (result, obj) = export_to_string(&dual, ObjWriter::new(Vec::new()).with_normals(true));
        result.unwrap();
        assert_eq!(obj.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert!(obj.lines().filter(|l| l.starts_with("f ")).all(|l| l.contains("//")));
    }

    #[test]
    fn test_triangle_only_writer_rejects_polygons() {
        let (result, obj) = export_to_string(&quad(), ObjWriter::new(Vec::new()).triangles_only());

        assert!(matches!(
            result,
            Err(ExportError::PolygonalUnsupported { face: 1, arity: 4 })
        ));
        assert!(obj.is_empty());
    }

    #[test]
    fn test_triangle_only_writer_accepts_triangles() {
        let primal = import_triangle_mesh(&tetrahedron()).unwrap();
        let (result, obj) = export_to_string(&primal, ObjWriter::new(Vec::new()).triangles_only());
        result.unwrap();
        assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 4);
    }
}
