//! Phong material records and the tag lookup table.

use glam::Vec3;

/// Shading parameters for one surface type.
///
/// Ambient color is scaled by `ambient_strength` in the shader; diffuse and
/// specular colors modulate the per-light terms, with `shininess` as the
/// specular exponent.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    /// Tag the scene uses to reference this material.
    pub tag: &'static str,
    /// Multiplier applied to the ambient color.
    pub ambient_strength: f32,
    /// Ambient reflectance.
    pub ambient: Vec3,
    /// Diffuse reflectance.
    pub diffuse: Vec3,
    /// Specular reflectance.
    pub specular: Vec3,
    /// Specular exponent; higher values give tighter highlights.
    pub shininess: f32,
}

impl Default for Material {
    /// A neutral matte surface for draws that name no material.
    fn default() -> Self {
        Self {
            tag: "",
            ambient_strength: 0.25,
            ambient: Vec3::new(0.2, 0.2, 0.2),
            diffuse: Vec3::new(0.8, 0.8, 0.8),
            specular: Vec3::new(0.2, 0.2, 0.2),
            shininess: 16.0,
        }
    }
}

/// Materials defined for the scene, looked up by tag.
#[derive(Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material definition.
    pub fn define(&mut self, material: Material) {
        self.materials.push(material);
    }

    /// Find a material by tag. Returns a copy, since materials are small
    /// value records that end up packed into per-draw uniforms anyway.
    pub fn find(&self, tag: &str) -> Option<Material> {
        self.materials.iter().find(|m| m.tag == tag).copied()
    }

    /// Number of defined materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_defined_material() {
        let mut lib = MaterialLibrary::new();
        lib.define(Material {
            tag: "glass",
            shininess: 85.0,
            ..Default::default()
        });

        let m = lib.find("glass").unwrap();
        assert_eq!(m.tag, "glass");
        assert_eq!(m.shininess, 85.0);
    }

    #[test]
    fn find_unknown_tag_is_none() {
        let lib = MaterialLibrary::new();
        assert!(lib.find("chrome").is_none());
    }

    #[test]
    fn default_material_is_matte() {
        let m = Material::default();
        assert!(m.shininess < 32.0);
        assert!(m.specular.x < m.diffuse.x);
    }
}
