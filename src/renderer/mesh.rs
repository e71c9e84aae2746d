//! Triangle meshes and the plain-text mesh loader
//!
//! Accepted line forms (anything else is skipped):
//! - `v x y z`: a vertex position
//! - `f a b c` or `f a/t/n b/t/n c/t/n`: a triangle with 1-based vertex
//!   indices; attribute indices after the first `/` are ignored

use std::fmt;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use glam::Mat3;

use crate::math::Vector3;

/// A triangle face (indices into the vertex array)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 3],
}

impl Face {
    pub fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self { indices: [v0, v1, v2] }
    }
}

/// Error type for mesh construction and loading
#[derive(Debug)]
pub enum MeshError {
    IoError(io::Error),
    /// A face referenced a vertex that does not exist
    IndexOutOfRange { face: usize, index: usize, vertex_count: usize },
}

impl From<io::Error> for MeshError {
    fn from(e: io::Error) -> Self {
        MeshError::IoError(e)
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::IoError(e) => write!(f, "IO error: {}", e),
            MeshError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {} references vertex {} but mesh has {} vertices",
                face, index, vertex_count
            ),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::IoError(e) => Some(e),
            MeshError::IndexOutOfRange { .. } => None,
        }
    }
}

/// Vertex positions plus triangle faces
///
/// Every face index is guaranteed to be in range, so rendering never needs
/// to check.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vector3<f32>>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, validating every face index
    pub fn new(vertices: Vec<Vector3<f32>>, faces: Vec<Face>) -> Result<Self, MeshError> {
        for (face_idx, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vector3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Parse mesh text, best effort
    ///
    /// Malformed lines and faces pointing past the vertices read so far are
    /// skipped.
    pub fn parse(text: &str) -> Self {
        let mut builder = MeshBuilder::default();
        for line in text.lines() {
            builder.push_line(line);
        }
        builder.finish()
    }

    /// Stream mesh text from any reader, line by line
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, MeshError> {
        let mut builder = MeshBuilder::default();
        for line in reader.lines() {
            builder.push_line(&line?);
        }
        Ok(builder.finish())
    }

    /// Load a mesh file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let file = fs::File::open(path.as_ref())?;
        let mesh = Self::from_reader(io::BufReader::new(file))?;
        log::info!(
            "Loaded mesh {}: {} vertices, {} faces",
            path.as_ref().display(),
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Copy with every vertex multiplied by `m` (rotation/scale for viewers)
    pub fn transformed(&self, m: Mat3) -> Self {
        let vertices = self
            .vertices
            .iter()
            .map(|&v| Vector3::from(m * glam::Vec3::from(v)))
            .collect();
        Self {
            vertices,
            faces: self.faces.clone(),
        }
    }
}

/// Line-at-a-time mesh accumulator
#[derive(Default)]
struct MeshBuilder {
    vertices: Vec<Vector3<f32>>,
    faces: Vec<Face>,
    skipped: usize,
}

impl MeshBuilder {
    fn push_line(&mut self, line: &str) {
        let mut parts = line.split_whitespace();
        let ok = match parts.next() {
            Some("v") => match parse_vertex(parts) {
                Some(v) => {
                    self.vertices.push(v);
                    true
                }
                None => false,
            },
            Some("f") => match parse_face(parts, self.vertices.len()) {
                Some(face) => {
                    self.faces.push(face);
                    true
                }
                None => false,
            },
            // Blank lines, comments and other records (vt, vn, ...)
            _ => true,
        };
        if !ok {
            self.skipped += 1;
        }
    }

    fn finish(self) -> Mesh {
        if self.skipped > 0 {
            log::debug!("Mesh parse skipped {} malformed lines", self.skipped);
        }
        Mesh {
            vertices: self.vertices,
            faces: self.faces,
        }
    }
}

fn parse_vertex<'a>(mut parts: impl Iterator<Item = &'a str>) -> Option<Vector3<f32>> {
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    let z = parts.next()?.parse().ok()?;
    Some(Vector3::new(x, y, z))
}

fn parse_face<'a>(parts: impl Iterator<Item = &'a str>, vertex_count: usize) -> Option<Face> {
    let mut indices = [0usize; 3];
    let mut count = 0;
    for part in parts {
        if count == 3 {
            // Triangles only
            return None;
        }
        let index: usize = part.split('/').next()?.parse().ok()?;
        if index == 0 || index > vertex_count {
            return None;
        }
        indices[count] = index - 1;
        count += 1;
    }
    (count == 3).then_some(Face { indices })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
# one triangle
v -1 -1 0
v 1 -1 0
v 0 1 0
vt 0 0
f 1/1/1 2/1/1 3/1/1
";

    #[test]
    fn test_parse_triangle() {
        let mesh = Mesh::parse(TRIANGLE);
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
        assert_eq!(mesh.vertices()[2], Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_plain_indices() {
        let mesh = Mesh::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 3 2 1\n");
        assert_eq!(mesh.faces(), &[Face::new(2, 1, 0)]);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let text = "\
v 0 0 0
v 1 nope 0
v 1 0 0
v 0 1 0
f 1 2
f 1 2 3 1
f 1 2 9
f 0 1 2
f a b c
f 1 2 3
";
        let mesh = Mesh::parse(text);
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_empty_input_is_empty_mesh() {
        let mesh = Mesh::parse("");
        assert!(mesh.is_empty());
        assert!(mesh.vertices().is_empty());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let err = Mesh::new(vec![Vector3::ZERO; 2], vec![Face::new(0, 1, 2)]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                face: 0,
                index: 2,
                vertex_count: 2
            }
        ));
    }

    #[test]
    fn test_from_reader_streams() {
        let mesh = Mesh::from_reader(io::Cursor::new(TRIANGLE)).unwrap();
        assert_eq!(mesh.faces().len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Mesh::load("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, MeshError::IoError(_)));
    }

    #[test]
    fn test_transformed_rotates_vertices() {
        let mesh = Mesh::parse(TRIANGLE);
        let rotated = mesh.transformed(Mat3::from_rotation_z(std::f32::consts::PI));
        let v = rotated.vertices()[2];
        assert!((v.x - 0.0).abs() < 1e-5);
        assert!((v.y + 1.0).abs() < 1e-5);
        assert_eq!(rotated.faces(), mesh.faces());
    }
}
