//! Mesh buffers produced for a visual chunk.
//!
//! A chunk mesh is a single vertex/index buffer pair split into one sub-mesh
//! per material, so the renderer can bind a different surface for each range
//! of indices.

use cgmath::{InnerSpace, Point3};

use crate::error::{Result, TerrainError};

use super::vertex::MeshVertex;

/// Index range of one material inside a [`ChunkMesh`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubMesh {
    /// Material id the range was generated for.
    pub material_id: u32,
    /// First index of the range.
    pub index_start: usize,
    /// Number of indices in the range.
    pub index_count: usize,
}

/// Triangle soup for one chunk.
///
/// Every triangle owns its three vertices (no sharing), which is what flat
/// shading requires.
#[derive(Clone, Debug, Default)]
pub struct ChunkMesh {
    /// Vertex buffer.
    pub vertices: Vec<MeshVertex>,
    /// Index buffer; three consecutive entries form a triangle.
    pub indices: Vec<u32>,
    /// One entry per material, in material id order.
    pub sub_meshes: Vec<SubMesh>,
}

impl ChunkMesh {
    /// Number of triangles across all sub-meshes.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when no material produced any geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// The triangles of one sub-mesh, as vertex triples.
    pub fn triangles(&self, sub_mesh: &SubMesh) -> impl Iterator<Item = [MeshVertex; 3]> + '_ {
        self.indices[sub_mesh.index_start..sub_mesh.index_start + sub_mesh.index_count]
            .chunks_exact(3)
            .map(move |t| {
                [
                    self.vertices[t[0] as usize],
                    self.vertices[t[1] as usize],
                    self.vertices[t[2] as usize],
                ]
            })
    }
}

/// Bounded accumulator for a [`ChunkMesh`].
///
/// Limits are checked before anything is appended, so a failed push leaves
/// the buffers untouched.
pub(crate) struct MeshBuilder {
    mesh: ChunkMesh,
    max_vertices: usize,
    max_indices: usize,
    open_sub_mesh: Option<SubMesh>,
}

impl MeshBuilder {
    pub fn new(max_vertices: usize, max_indices: usize) -> Self {
        MeshBuilder {
            mesh: ChunkMesh::default(),
            max_vertices,
            max_indices,
            open_sub_mesh: None,
        }
    }

    /// Starts the index range of a material, closing the previous one.
    pub fn begin_sub_mesh(&mut self, material_id: u32) {
        self.end_sub_mesh();
        self.open_sub_mesh = Some(SubMesh {
            material_id,
            index_start: self.mesh.indices.len(),
            index_count: 0,
        });
    }

    fn end_sub_mesh(&mut self) {
        if let Some(mut sub_mesh) = self.open_sub_mesh.take() {
            sub_mesh.index_count = self.mesh.indices.len() - sub_mesh.index_start;
            self.mesh.sub_meshes.push(sub_mesh);
        }
    }

    /// Appends a flat-shaded triangle with its own three vertices.
    pub fn push_triangle(&mut self, p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>) -> Result<()> {
        if self.mesh.vertices.len() + 3 > self.max_vertices {
            return Err(TerrainError::MeshCapacityExceeded {
                kind: "vertex",
                limit: self.max_vertices,
            });
        }
        if self.mesh.indices.len() + 3 > self.max_indices {
            return Err(TerrainError::MeshCapacityExceeded {
                kind: "index",
                limit: self.max_indices,
            });
        }

        let normal = (p1 - p0).cross(p2 - p0).normalize();
        for p in [p0, p1, p2] {
            self.mesh.indices.push(self.mesh.vertices.len() as u32);
            self.mesh.vertices.push(MeshVertex::new(p, normal));
        }
        Ok(())
    }

    pub fn finish(mut self) -> ChunkMesh {
        self.end_sub_mesh();
        self.mesh
    }
}
