//! Vertex format of chunk meshes.
//!
//! Vertices are laid out for direct upload into a GPU vertex buffer by the
//! rendering backend.

use cgmath::{Point3, Vector3};

/// A flat-shaded terrain vertex.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes), chunk-local
/// - Normal: 3x f32 (12 bytes), unit length
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position relative to the chunk's min corner.
    pub position: [f32; 3],
    /// Face normal of the triangle this vertex belongs to.
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Creates a vertex from cgmath values.
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        MeshVertex {
            position: position.into(),
            normal: normal.into(),
        }
    }

    /// Position as a cgmath point.
    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }

    /// Normal as a cgmath vector.
    pub fn normal(&self) -> Vector3<f32> {
        Vector3::from(self.normal)
    }
}
