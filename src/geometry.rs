//! Procedural generation of the primitive shapes the scene is built from.
//!
//! All generators produce [`ShapeGeometry`] — plain CPU-side vertex and index
//! data — which is uploaded to the GPU separately via [`ShapeGeometry::upload`].
//! Keeping generation pure makes the geometry testable without a device.
//!
//! Conventions:
//!
//! - [`plane`] — 2×2 square on the XZ plane, centered at the origin, normal +Y.
//! - [`cube`] — unit cube centered at the origin, 24 vertices for flat shading.
//! - [`cylinder`] / [`tapered_cylinder`] / [`cone`] — base radius 1 at y=0,
//!   extending to y=1. The base sits *at* the origin rather than being
//!   centered on it, so scale-Y is the object's height and objects rest on
//!   the floor when placed at y≈0.
//! - [`torus`] — ring of radius 0.5 in the XY plane, tube radius 0.125. Reads
//!   as a handle when viewed from the side.
//! - [`sphere`] — UV sphere of radius 0.5 centered at the origin.

use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex3d};
use glam::Vec3;
use std::f32::consts::TAU;

/// Raw shape data before GPU upload.
#[derive(Clone, Debug)]
pub struct ShapeGeometry {
    /// Vertex positions, normals, and UVs.
    pub vertices: Vec<Vertex3d>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

impl ShapeGeometry {
    /// Creates shape geometry from vertices and indices.
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns `(min, max)` corners of the bounding box.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for v in &self.vertices {
            let p = Vec3::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }

        (min, max)
    }

    /// Number of triangles in the shape.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Uploads this geometry to the GPU as a [`Mesh`].
    pub fn upload(&self, gpu: &GpuContext) -> Mesh {
        Mesh::new(gpu, &self.vertices, &self.indices)
    }
}

/// A 2×2 square on the XZ plane with its normal pointing up (+Y).
pub fn plane() -> ShapeGeometry {
    let vertices = vec![
        Vertex3d::new([-1.0, 0.0, -1.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
        Vertex3d::new([-1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
        Vertex3d::new([1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
        Vertex3d::new([1.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
    ];

    let indices = vec![0, 1, 2, 2, 3, 0];

    ShapeGeometry::new(vertices, indices)
}

/// A unit cube centered at the origin.
///
/// Each face has its own four vertices so normals stay flat, with the full
/// [0,1] UV range per face.
pub fn cube() -> ShapeGeometry {
    #[rustfmt::skip]
    let vertices = vec![
        // Front face (Z+)
        Vertex3d::new([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
        Vertex3d::new([ 0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 0.0]),
        Vertex3d::new([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
        Vertex3d::new([-0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 1.0]),
        // Back face (Z-)
        Vertex3d::new([ 0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
        Vertex3d::new([-0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 0.0]),
        Vertex3d::new([-0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
        Vertex3d::new([ 0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
        // Top face (Y+)
        Vertex3d::new([-0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([ 0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
        // Bottom face (Y-)
        Vertex3d::new([-0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([ 0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([ 0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([-0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
        // Right face (X+)
        Vertex3d::new([ 0.5, -0.5,  0.5], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([ 0.5,  0.5, -0.5], [ 1.0,  0.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
        // Left face (X-)
        Vertex3d::new([-0.5, -0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([-0.5, -0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([-0.5,  0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([-0.5,  0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 1.0]),
    ];

    #[rustfmt::skip]
    let indices: Vec<u32> = vec![
        0,  1,  2,  2,  3,  0,  // front
        4,  5,  6,  6,  7,  4,  // back
        8,  9,  10, 10, 11, 8,  // top
        12, 13, 14, 14, 15, 12, // bottom
        16, 17, 18, 18, 19, 16, // right
        20, 21, 22, 22, 23, 20, // left
    ];

    ShapeGeometry::new(vertices, indices)
}

/// A cylinder of radius 1 spanning y=0 to y=1, with side wall and both caps.
pub fn cylinder(segments: u32) -> ShapeGeometry {
    tapered_cylinder(segments, 1.0)
}

/// A cone with base radius 1 at y=0 and its apex at y=1.
pub fn cone(segments: u32) -> ShapeGeometry {
    tapered_cylinder(segments, 0.0)
}

/// A cylinder whose top ring has an independent radius.
///
/// Base radius is 1 at y=0; the top ring at y=1 uses `top_radius`. A
/// `top_radius` of 0 degenerates the top ring into an apex, producing a cone
/// (the top cap is skipped in that case).
pub fn tapered_cylinder(segments: u32, top_radius: f32) -> ShapeGeometry {
    let segs = segments.max(3);
    let mut vertices = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // Side wall. The seam vertex is duplicated so UVs wrap cleanly.
    // For a tapered wall the normal tilts upward by the radius falloff.
    let slope = 1.0 - top_radius;
    for i in 0..=segs {
        let theta = i as f32 * TAU / segs as f32;
        let (sin, cos) = theta.sin_cos();
        let u = i as f32 / segs as f32;
        let normal = Vec3::new(cos, slope, sin).normalize();

        vertices.push(Vertex3d::new([cos, 0.0, sin], normal.to_array(), [u, 1.0]));
        vertices.push(Vertex3d::new(
            [cos * top_radius, 1.0, sin * top_radius],
            normal.to_array(),
            [u, 0.0],
        ));
    }
    for i in 0..segs {
        let b = i * 2;
        indices.extend_from_slice(&[b, b + 1, b + 2, b + 1, b + 3, b + 2]);
    }

    // Bottom cap, facing down.
    let base = vertices.len() as u32;
    vertices.push(Vertex3d::new([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.5, 0.5]));
    for i in 0..=segs {
        let theta = i as f32 * TAU / segs as f32;
        let (sin, cos) = theta.sin_cos();
        vertices.push(Vertex3d::new(
            [cos, 0.0, sin],
            [0.0, -1.0, 0.0],
            [0.5 + cos * 0.5, 0.5 + sin * 0.5],
        ));
    }
    for i in 0..segs {
        indices.extend_from_slice(&[base, base + 1 + i, base + 2 + i]);
    }

    // Top cap, facing up. Skipped when the top ring collapses to a point.
    if top_radius > 0.0 {
        let top = vertices.len() as u32;
        vertices.push(Vertex3d::new([0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.5, 0.5]));
        for i in 0..=segs {
            let theta = i as f32 * TAU / segs as f32;
            let (sin, cos) = theta.sin_cos();
            vertices.push(Vertex3d::new(
                [cos * top_radius, 1.0, sin * top_radius],
                [0.0, 1.0, 0.0],
                [0.5 + cos * 0.5, 0.5 + sin * 0.5],
            ));
        }
        for i in 0..segs {
            indices.extend_from_slice(&[top, top + 1 + i, top + 2 + i]);
        }
    }

    ShapeGeometry::new(vertices, indices)
}

/// A torus lying in the XY plane: ring radius 0.5, tube radius 0.125.
pub fn torus(ring_segments: u32, tube_segments: u32) -> ShapeGeometry {
    const RING_RADIUS: f32 = 0.5;
    const TUBE_RADIUS: f32 = 0.125;

    let rings = ring_segments.max(3);
    let tubes = tube_segments.max(3);

    let mut vertices = Vec::with_capacity(((rings + 1) * (tubes + 1)) as usize);
    let mut indices: Vec<u32> = Vec::with_capacity((rings * tubes * 6) as usize);

    for i in 0..=rings {
        let theta = i as f32 * TAU / rings as f32;
        let (ring_sin, ring_cos) = theta.sin_cos();

        for j in 0..=tubes {
            let phi = j as f32 * TAU / tubes as f32;
            let (tube_sin, tube_cos) = phi.sin_cos();

            let radial = RING_RADIUS + TUBE_RADIUS * tube_cos;
            let position = [radial * ring_cos, radial * ring_sin, TUBE_RADIUS * tube_sin];
            let normal = [tube_cos * ring_cos, tube_cos * ring_sin, tube_sin];
            let uv = [i as f32 / rings as f32, j as f32 / tubes as f32];

            vertices.push(Vertex3d::new(position, normal, uv));
        }
    }

    for i in 0..rings {
        for j in 0..tubes {
            let current = i * (tubes + 1) + j;
            let next = current + tubes + 1;

            indices.extend_from_slice(&[current, next, current + 1, current + 1, next, next + 1]);
        }
    }

    ShapeGeometry::new(vertices, indices)
}

/// A UV sphere of radius 0.5 centered at the origin.
pub fn sphere(segments: u32, rings: u32) -> ShapeGeometry {
    let segs = segments.max(3);
    let rings = rings.max(2);

    let mut vertices = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for seg in 0..=segs {
            let theta = TAU * seg as f32 / segs as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();

            let position = [x * 0.5, y * 0.5, z * 0.5];
            let normal = [x, y, z];
            let uv = [seg as f32 / segs as f32, ring as f32 / rings as f32];

            vertices.push(Vertex3d::new(position, normal, uv));
        }
    }

    for ring in 0..rings {
        for seg in 0..segs {
            let current = ring * (segs + 1) + seg;
            let next = current + segs + 1;

            indices.extend_from_slice(&[
                current,
                next,
                current + 1,
                current + 1,
                next,
                next + 1,
            ]);
        }
    }

    ShapeGeometry::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(geom: &ShapeGeometry) {
        assert!(!geom.vertices.is_empty());
        assert_eq!(geom.indices.len() % 3, 0, "index count must form whole triangles");

        let len = geom.vertices.len() as u32;
        for &i in &geom.indices {
            assert!(i < len, "index {} out of range ({} vertices)", i, len);
        }

        for v in &geom.vertices {
            let n = Vec3::from(v.normal);
            assert!(
                (n.length() - 1.0).abs() < 1e-4,
                "normal {:?} is not unit length",
                v.normal
            );
        }
    }

    #[test]
    fn plane_is_flat_and_faces_up() {
        let geom = plane();
        assert_well_formed(&geom);
        assert_eq!(geom.vertices.len(), 4);
        assert_eq!(geom.triangle_count(), 2);

        for v in &geom.vertices {
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }

        let (min, max) = geom.bounds();
        assert_eq!(min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(max, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn cube_has_flat_shaded_faces() {
        let geom = cube();
        assert_well_formed(&geom);
        assert_eq!(geom.vertices.len(), 24);
        assert_eq!(geom.triangle_count(), 12);

        let (min, max) = geom.bounds();
        assert_eq!(min, Vec3::splat(-0.5));
        assert_eq!(max, Vec3::splat(0.5));
    }

    #[test]
    fn cylinder_spans_unit_height_from_origin() {
        let geom = cylinder(24);
        assert_well_formed(&geom);

        let (min, max) = geom.bounds();
        assert_eq!(min.y, 0.0);
        assert_eq!(max.y, 1.0);
        assert!((max.x - 1.0).abs() < 1e-5);
        assert!((min.x + 1.0).abs() < 1e-5);
    }

    #[test]
    fn cylinder_clamps_degenerate_segment_counts() {
        let geom = cylinder(1);
        assert_well_formed(&geom);
        assert!(geom.triangle_count() >= 3 * 4); // 3 segments, wall quads + caps
    }

    #[test]
    fn cone_tapers_to_an_apex() {
        let geom = cone(24);
        assert_well_formed(&geom);

        let (min, max) = geom.bounds();
        assert_eq!(min.y, 0.0);
        assert_eq!(max.y, 1.0);

        // Every vertex at the top must sit on the axis.
        for v in &geom.vertices {
            if v.position[1] == 1.0 {
                assert_eq!(v.position[0], 0.0);
                assert_eq!(v.position[2], 0.0);
            }
        }
    }

    #[test]
    fn cone_wall_normals_tilt_upward() {
        let geom = cone(24);
        let wall_normals: Vec<_> = geom
            .vertices
            .iter()
            .filter(|v| v.normal[1] > 0.0 && v.normal[1] < 1.0)
            .collect();
        assert!(!wall_normals.is_empty());
    }

    #[test]
    fn tapered_cylinder_top_ring_uses_top_radius() {
        let geom = tapered_cylinder(24, 0.5);
        assert_well_formed(&geom);

        for v in &geom.vertices {
            if v.position[1] == 1.0 {
                let r = (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt();
                assert!(r <= 0.5 + 1e-5);
            }
        }
    }

    #[test]
    fn torus_ring_lies_in_xy_plane() {
        let geom = torus(32, 16);
        assert_well_formed(&geom);

        let (min, max) = geom.bounds();
        // Ring radius 0.5 plus tube radius 0.125 in X and Y.
        assert!((max.x - 0.625).abs() < 1e-3);
        assert!((min.x + 0.625).abs() < 1e-3);
        assert!((max.y - 0.625).abs() < 1e-3);
        // Tube radius only in Z.
        assert!((max.z - 0.125).abs() < 1e-3);
        assert!((min.z + 0.125).abs() < 1e-3);
    }

    #[test]
    fn sphere_fits_unit_diameter() {
        let geom = sphere(32, 16);
        assert_well_formed(&geom);

        let (min, max) = geom.bounds();
        assert!((max.x - 0.5).abs() < 1e-3);
        assert!((min.y + 0.5).abs() < 1e-5);
        assert!((max.y - 0.5).abs() < 1e-5);

        for v in &geom.vertices {
            let r = Vec3::from(v.position).length();
            assert!((r - 0.5).abs() < 1e-4);
        }
    }
}
