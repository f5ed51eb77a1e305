//! GPU mesh buffers and spatial transforms.
//!
//! - [`Vertex3d`] — the vertex format used by all meshes (position, normal, uv)
//! - [`Mesh`] — GPU-resident geometry with vertex and index buffers
//! - [`Transform`] — position, rotation, and scale for placing meshes in the scene

use crate::gpu::GpuContext;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// A vertex for 3D mesh rendering with position, normal, and texture coordinates.
///
/// `#[repr(C)]` with Pod/Zeroable so vertex data can be cast straight into a
/// GPU buffer. Each vertex occupies 32 bytes: position at offset 0, normal at
/// 12, uv at 24.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// The 3D position of this vertex in model space.
    pub position: [f32; 3],
    /// The surface normal vector (should be normalized for correct lighting).
    pub normal: [f32; 3],
    /// Texture coordinates, typically in the range [0, 1].
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// The wgpu vertex buffer layout descriptor for this vertex type.
    ///
    /// Attributes: position (location 0), normal (location 1), uv (location 2).
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    /// Creates a new vertex with the given position, normal, and UV coordinates.
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// GPU-resident 3D mesh geometry with vertex and index buffers.
///
/// Once created, the mesh data lives on the GPU and is immutable. The desk
/// scene uploads each primitive shape once at startup and reuses the meshes
/// across every draw that needs them.
#[derive(Debug)]
pub struct Mesh {
    /// The GPU buffer containing vertex data.
    pub(crate) vertex_buffer: wgpu::Buffer,
    /// The GPU buffer containing index data (u32 indices).
    pub(crate) index_buffer: wgpu::Buffer,
    /// The number of indices in the mesh (determines draw call size).
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Creates a mesh from raw vertex and index data.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex3d], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// A 3D transformation representing position, rotation, and scale.
///
/// Converted to a matrix via [`Transform::matrix()`], transformations apply
/// in SRT order: scale around the local origin, then rotate, then translate.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    /// World-space position (translation).
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Scale factors for each axis.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates a new identity transform (origin, no rotation, unit scale).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position (translation) component.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the rotation component using a quaternion.
    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the rotation from per-axis Euler angles in degrees.
    ///
    /// The X rotation is applied to the vertex first, then Y, then Z
    /// (matrix composition Rz · Ry · Rx), which is how the scene data
    /// specifies object orientation.
    pub fn rotation_degrees(mut self, degrees: Vec3) -> Self {
        self.rotation = Quat::from_euler(
            EulerRot::ZYX,
            degrees.z.to_radians(),
            degrees.y.to_radians(),
            degrees.x.to_radians(),
        );
        self
    }

    /// Sets non-uniform scale factors for each axis.
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Converts this transform to a 4×4 transformation matrix (SRT order).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::new();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn transform_applies_scale_before_translation() {
        let t = Transform::new()
            .position(Vec3::new(10.0, 0.0, 0.0))
            .scale(Vec3::splat(2.0));

        let p = t.matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(p, Vec4::new(12.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn rotation_degrees_matches_quaternion_composition() {
        let t = Transform::new().rotation_degrees(Vec3::new(90.0, 50.0, 0.0));
        let expected = Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            50.0_f32.to_radians(),
            90.0_f32.to_radians(),
        );
        assert!(t.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn rotation_degrees_x90_maps_up_to_forward() {
        // A plane rotated 90 degrees around X turns its +Y normal toward +Z.
        let t = Transform::new().rotation_degrees(Vec3::new(90.0, 0.0, 0.0));
        let n = t.rotation * Vec3::Y;
        assert!(n.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn rotation_degrees_applies_x_rotation_first() {
        // The paper-tag planes use (90, 90, 0): the X rotation tips the +Y
        // normal to +Z, then the Y rotation swings it to +X so the tag
        // stands edge-on beside its kiss.
        let t = Transform::new().rotation_degrees(Vec3::new(90.0, 90.0, 0.0));
        let n = t.rotation * Vec3::Y;
        assert!(n.abs_diff_eq(Vec3::X, 1e-6));
    }
}
