//! Triangle and mesh data structures

use crate::error::{Error, Result};
use crate::point::*;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A single triangle, vertices in winding order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub x: Point3f,
    pub y: Point3f,
    pub z: Point3f,
}

impl Triangle {
    pub fn new(x: Point3f, y: Point3f, z: Point3f) -> Self {
        Self { x, y, z }
    }

    pub fn vertices(&self) -> [Point3f; 3] {
        [self.x, self.y, self.z]
    }

    /// Unit face normal following the winding order, `None` when degenerate
    pub fn normal(&self) -> Option<Vector3f> {
        let edge1 = self.y - self.x;
        let edge2 = self.z - self.x;
        edge1.cross(&edge2).try_normalize(f32::EPSILON)
    }

    pub fn area(&self) -> f32 {
        let edge1 = self.y - self.x;
        let edge2 = self.z - self.x;
        edge1.cross(&edge2).magnitude() * 0.5
    }
}

/// Interleaved position/normal vertex, laid out for direct buffer upload
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
        }
    }

    /// Flat-shaded mesh from loose triangles
    ///
    /// Every triangle gets three vertices of its own, each carrying the
    /// triangle's face normal. Degenerate triangles get `+Z`.
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut vertices = Vec::with_capacity(triangles.len() * 3);
        let mut normals = Vec::with_capacity(triangles.len() * 3);
        let mut faces = Vec::with_capacity(triangles.len());

        for triangle in triangles {
            let normal = triangle.normal().unwrap_or_else(Vector3f::z);
            let base = vertices.len();

            vertices.extend_from_slice(&triangle.vertices());
            normals.extend_from_slice(&[normal; 3]);
            faces.push([base, base + 1, base + 2]);
        }

        Self {
            vertices,
            faces,
            normals: Some(normals),
        }
    }

    /// Flat-shaded axis-aligned cube of edge length `size` centered at the origin
    ///
    /// Four vertices per face so each face keeps its own normal.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let quads: [([[f32; 3]; 4], [f32; 3]); 6] = [
            // +z
            ([[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]], [0.0, 0.0, 1.0]),
            // -z
            ([[-h, -h, -h], [-h, h, -h], [h, h, -h], [h, -h, -h]], [0.0, 0.0, -1.0]),
            // +y
            ([[-h, h, -h], [-h, h, h], [h, h, h], [h, h, -h]], [0.0, 1.0, 0.0]),
            // -y
            ([[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]], [0.0, -1.0, 0.0]),
            // +x
            ([[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]], [1.0, 0.0, 0.0]),
            // -x
            ([[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]], [-1.0, 0.0, 0.0]),
        ];

        let mut mesh = Self::new();
        let mut normals = Vec::with_capacity(24);

        for (corners, normal) in quads {
            let base = mesh.vertices.len();
            for [x, y, z] in corners {
                mesh.add_vertex(Point3f::new(x, y, z));
                normals.push(Vector3f::from(normal));
            }
            mesh.add_face([base, base + 1, base + 2]);
            mesh.add_face([base, base + 2, base + 3]);
        }

        mesh.set_normals(normals);
        mesh
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Calculate face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                Triangle::new(
                    self.vertices[face[0]],
                    self.vertices[face[1]],
                    self.vertices[face[2]],
                )
                .normal()
                .unwrap_or_else(Vector3f::z)
            })
            .collect()
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Interleaved vertex buffer; vertices without a normal get `+Z`
    pub fn interleaved_vertices(&self) -> Vec<MeshVertex> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let n = self
                    .normals
                    .as_ref()
                    .and_then(|normals| normals.get(i).copied())
                    .unwrap_or_else(Vector3f::z);
                MeshVertex {
                    position: [v.x, v.y, v.z],
                    normal: [n.x, n.y, n.z],
                }
            })
            .collect()
    }

    /// Face indices flattened into a single `u32` index buffer
    ///
    /// Fails with [`Error::InvalidData`] if an index does not fit in `u32`.
    pub fn index_buffer(&self) -> Result<Vec<u32>> {
        self.faces
            .iter()
            .flatten()
            .map(|&i| {
                u32::try_from(i).map_err(|_| {
                    Error::InvalidData(format!("Vertex index {} does not fit a u32 index buffer", i))
                })
            })
            .collect()
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
