//! Scene lighting: one directional light plus a small set of point lights.
//!
//! Lights are defined once at scene preparation and packed into a single
//! uniform block ([`LightsUniform`]) that the fragment shader reads. Every
//! field is vec4-aligned so the Rust struct and the WGSL struct agree on
//! layout.

use glam::Vec3;

/// Maximum number of point lights the shader iterates over.
pub const MAX_POINT_LIGHTS: usize = 4;

/// A light shining uniformly from one direction, like distant room lighting.
#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    /// Direction the light travels (not the direction toward the light).
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// A light radiating from a point in the scene.
#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// The full lighting setup for a scene.
#[derive(Clone, Debug)]
pub struct SceneLights {
    pub directional: DirectionalLight,
    pub points: Vec<PointLight>,
}

impl SceneLights {
    /// Pack the lights into the GPU uniform layout.
    ///
    /// At most [`MAX_POINT_LIGHTS`] point lights are packed; extras are
    /// dropped.
    pub fn to_uniform(&self) -> LightsUniform {
        let dir = self.directional.direction.normalize_or_zero();

        let mut uniform = LightsUniform {
            directional: [dir.x, dir.y, dir.z, self.directional.intensity],
            directional_color: [
                self.directional.color.x,
                self.directional.color.y,
                self.directional.color.z,
                0.0,
            ],
            point_positions: [[0.0; 4]; MAX_POINT_LIGHTS],
            point_colors: [[0.0; 4]; MAX_POINT_LIGHTS],
            point_count: [0; 4],
        };

        let count = self.points.len().min(MAX_POINT_LIGHTS);
        for (i, light) in self.points.iter().take(count).enumerate() {
            uniform.point_positions[i] = [
                light.position.x,
                light.position.y,
                light.position.z,
                light.intensity,
            ];
            uniform.point_colors[i] = [light.color.x, light.color.y, light.color.z, 0.0];
        }
        uniform.point_count[0] = count as u32;

        uniform
    }
}

/// GPU-side lighting block. Matches the `Lights` struct in `scene.wgsl`.
///
/// Positions and directions carry their light's intensity in the w component.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub directional: [f32; 4],
    pub directional_color: [f32; 4],
    pub point_positions: [[f32; 4]; MAX_POINT_LIGHTS],
    pub point_colors: [[f32; 4]; MAX_POINT_LIGHTS],
    pub point_count: [u32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lights_with(points: Vec<PointLight>) -> SceneLights {
        SceneLights {
            directional: DirectionalLight {
                direction: Vec3::new(0.0, -2.0, 0.0),
                color: Vec3::ONE,
                intensity: 0.5,
            },
            points,
        }
    }

    #[test]
    fn uniform_normalizes_direction() {
        let u = lights_with(vec![]).to_uniform();
        assert_eq!(u.directional, [0.0, -1.0, 0.0, 0.5]);
        assert_eq!(u.point_count[0], 0);
    }

    #[test]
    fn uniform_packs_intensity_into_w() {
        let u = lights_with(vec![PointLight {
            position: Vec3::new(0.0, 14.0, 0.0),
            color: Vec3::new(1.0, 0.9, 0.75),
            intensity: 0.9,
        }])
        .to_uniform();

        assert_eq!(u.point_count[0], 1);
        assert_eq!(u.point_positions[0], [0.0, 14.0, 0.0, 0.9]);
        assert_eq!(u.point_colors[0][1], 0.9);
    }

    #[test]
    fn uniform_drops_excess_point_lights() {
        let light = PointLight {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            intensity: 1.0,
        };
        let u = lights_with(vec![light; 6]).to_uniform();
        assert_eq!(u.point_count[0], MAX_POINT_LIGHTS as u32);
    }
}
