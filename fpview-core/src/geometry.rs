/// Indexed triangle mesh
use nalgebra::Point3;

use crate::error::{LoadError, LoadResult};

/// A vertex position in object/world space
pub type Vertex = Point3<f32>;

/// A triangle face given as three 0-based vertex indices, in winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 3],
}

impl Face {
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self {
            indices: [v1, v2, v3],
        }
    }
}

/// A mesh of vertices and triangular faces.
///
/// Every face index is checked against the vertex count on construction, so
/// the mesh's own faces always resolve through [`Mesh::triangle`]. The mesh
/// has no mutating API once built.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> LoadResult<Self> {
        let vertex_count = vertices.len();
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.indices.iter().find(|&&i| i >= vertex_count) {
                return Err(LoadError::FaceIndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Object-space corners of a face, or `None` if it indexes past the vertices
    pub fn triangle(&self, face: &Face) -> Option<[Vertex; 3]> {
        let [a, b, c] = face.indices;
        Some([
            *self.vertices.get(a)?,
            *self.vertices.get(b)?,
            *self.vertices.get(c)?,
        ])
    }

    /// Create a simple cube mesh, wound counter-clockwise seen from outside
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];

        let faces = vec![
            // Front (+z)
            Face::new(4, 5, 6),
            Face::new(4, 6, 7),
            // Back (-z)
            Face::new(0, 3, 2),
            Face::new(0, 2, 1),
            // Top (+y)
            Face::new(3, 7, 6),
            Face::new(3, 6, 2),
            // Bottom (-y)
            Face::new(0, 1, 5),
            Face::new(0, 5, 4),
            // Right (+x)
            Face::new(1, 2, 6),
            Face::new(1, 6, 5),
            // Left (-x)
            Face::new(0, 4, 7),
            Face::new(0, 7, 3),
        ];

        Self { vertices, faces }
    }
}
