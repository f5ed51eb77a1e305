//! The desk scene itself: a fixed list of objects and the resources that
//! back them.
//!
//! [`desk_scene`] describes every object as plain data — shape, texture tag,
//! material tag, transform, UV tiling. [`SceneManager::prepare`] loads the
//! textures (falling back to generated pixels when the files are absent),
//! defines the materials and lights, and uploads one GPU mesh per primitive
//! shape. Each frame, [`SceneManager::draw_calls`] resolves the object list
//! against those resources.

use crate::geometry;
use crate::gpu::GpuContext;
use crate::lights::{DirectionalLight, PointLight, SceneLights};
use crate::material::{Material, MaterialLibrary};
use crate::mesh::{Mesh, Transform};
use crate::scene_pass::DrawCall;
use crate::texture::{Texture, TextureRegistry};
use glam::{Vec2, Vec3};

/// The primitive shapes objects can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Plane,
    Box,
    Cylinder,
    TaperedCylinder,
    Cone,
    Torus,
    Sphere,
}

/// One object in the scene, as pure data.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub shape: Shape,
    /// Texture tag resolved through the registry at draw time.
    pub texture: &'static str,
    /// Material tag; `None` uses the neutral default material.
    pub material: Option<&'static str>,
    pub scale: Vec3,
    /// XYZ Euler rotation in degrees, applied X then Y then Z.
    pub rotation_deg: Vec3,
    pub position: Vec3,
    /// UV tiling applied before sampling the texture.
    pub uv_scale: Vec2,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            shape: Shape::Plane,
            texture: "",
            material: None,
            scale: Vec3::ONE,
            rotation_deg: Vec3::ZERO,
            position: Vec3::ZERO,
            uv_scale: Vec2::ONE,
        }
    }
}

/// Texture tags and the image files that back them.
pub const TEXTURE_MANIFEST: &[(&str, &str)] = &[
    ("silver", "textures/silver.jpg"),
    ("tinfoil", "textures/tinfoil.jpg"),
    ("pinkkiss", "textures/pinkkiss.jpg"),
    ("winnie", "textures/Winnie.jpg"),
    ("floor", "textures/floor.jpg"),
    ("green", "textures/green.jpg"),
    ("lemonlime", "textures/lemonlime.jpg"),
    ("kisstag", "textures/kisstag.jpg"),
    ("wick", "textures/wick.jpg"),
    ("tea", "textures/tea.jpg"),
    ("wax", "textures/wax.jpg"),
];

/// A foil-wrapped kiss: a squat cone plus the little paper tag sticking out
/// of its point.
fn kiss(position: Vec3, foil: &'static str) -> [SceneObject; 2] {
    [
        SceneObject {
            shape: Shape::Cone,
            texture: foil,
            material: Some("sunkiss"),
            scale: Vec3::new(0.7, 1.0, 1.0),
            position,
            uv_scale: Vec2::new(2.0, 2.0),
            ..Default::default()
        },
        SceneObject {
            shape: Shape::Plane,
            texture: "kisstag",
            scale: Vec3::new(0.75, 1.0, 0.1),
            rotation_deg: Vec3::new(90.0, 90.0, 0.0),
            position: Vec3::new(position.x, 0.9, position.z),
            uv_scale: Vec2::new(0.1, 0.1),
            ..Default::default()
        },
    ]
}

/// The full object list, in draw order.
///
/// Positions, scales, and rotations place everything on a 20×10 desk
/// surface: a tea mug with its handle on the right, a closed laptop on the
/// left, three kisses scattered between them, and a lemon-lime candle.
pub fn desk_scene() -> Vec<SceneObject> {
    let mut objects = vec![
        // Desk surface.
        SceneObject {
            shape: Shape::Plane,
            texture: "floor",
            material: Some("wood"),
            scale: Vec3::new(20.0, 2.0, 10.0),
            uv_scale: Vec2::new(2.0, 2.0),
            ..Default::default()
        },
        // Backdrop standing behind the desk.
        SceneObject {
            shape: Shape::Plane,
            texture: "green",
            scale: Vec3::new(20.0, 2.0, 10.0),
            rotation_deg: Vec3::new(90.0, 0.0, 0.0),
            position: Vec3::new(0.0, 10.0, -7.0),
            ..Default::default()
        },
        // Tea mug body.
        SceneObject {
            shape: Shape::Cylinder,
            texture: "winnie",
            material: Some("glass"),
            scale: Vec3::new(2.0, 7.0, 2.0),
            rotation_deg: Vec3::new(0.0, 50.0, 0.0),
            position: Vec3::new(7.0, 0.01, 1.0),
            ..Default::default()
        },
        // Tea surface, a hair inside and above the mug wall.
        SceneObject {
            shape: Shape::Cylinder,
            texture: "tea",
            material: Some("glass"),
            scale: Vec3::new(1.9, 7.01, 2.0),
            rotation_deg: Vec3::new(0.0, 50.0, 0.0),
            position: Vec3::new(7.0, 0.01, 1.0),
            ..Default::default()
        },
        // Mug handle.
        SceneObject {
            shape: Shape::Torus,
            texture: "silver",
            material: Some("glass"),
            scale: Vec3::new(2.0, 2.5, 2.0),
            position: Vec3::new(8.0, 3.8, 2.0),
            ..Default::default()
        },
        // Closed laptop.
        SceneObject {
            shape: Shape::Box,
            texture: "silver",
            scale: Vec3::new(6.5, 0.5, 14.5),
            rotation_deg: Vec3::new(0.0, 45.0, 0.0),
            position: Vec3::new(-9.0, 0.3, 2.6),
            ..Default::default()
        },
    ];

    objects.extend(kiss(Vec3::new(3.0, 0.01, 4.0), "tinfoil"));
    objects.extend(kiss(Vec3::new(3.0, 0.01, 2.0), "pinkkiss"));
    objects.extend(kiss(Vec3::new(9.0, 0.01, 3.5), "pinkkiss"));

    objects.extend([
        // Candle exterior.
        SceneObject {
            shape: Shape::Cylinder,
            texture: "wax",
            material: Some("glass"),
            scale: Vec3::new(2.0, 3.5, 2.0),
            position: Vec3::new(-3.0, 0.01, 4.0),
            ..Default::default()
        },
        // Candle interior, slightly narrower and taller so the wax surface
        // shows above the rim.
        SceneObject {
            shape: Shape::Cylinder,
            texture: "lemonlime",
            material: Some("glass"),
            scale: Vec3::new(1.9, 3.51, 1.9),
            position: Vec3::new(-3.0, 0.01, 4.0),
            ..Default::default()
        },
        // Wick.
        SceneObject {
            shape: Shape::Cylinder,
            texture: "wick",
            scale: Vec3::new(0.1, 0.5, 0.1),
            position: Vec3::new(-3.0, 4.0, 4.0),
            ..Default::default()
        },
    ]);

    objects
}

/// GPU meshes for every primitive shape, uploaded once.
pub struct ShapeSet {
    plane: Mesh,
    cube: Mesh,
    cylinder: Mesh,
    tapered_cylinder: Mesh,
    cone: Mesh,
    torus: Mesh,
    sphere: Mesh,
}

impl ShapeSet {
    pub fn load(gpu: &GpuContext) -> Self {
        Self {
            plane: geometry::plane().upload(gpu),
            cube: geometry::cube().upload(gpu),
            cylinder: geometry::cylinder(36).upload(gpu),
            tapered_cylinder: geometry::tapered_cylinder(36, 0.5).upload(gpu),
            cone: geometry::cone(36).upload(gpu),
            torus: geometry::torus(48, 24).upload(gpu),
            sphere: geometry::sphere(32, 16).upload(gpu),
        }
    }

    pub fn get(&self, shape: Shape) -> &Mesh {
        match shape {
            Shape::Plane => &self.plane,
            Shape::Box => &self.cube,
            Shape::Cylinder => &self.cylinder,
            Shape::TaperedCylinder => &self.tapered_cylinder,
            Shape::Cone => &self.cone,
            Shape::Torus => &self.torus,
            Shape::Sphere => &self.sphere,
        }
    }
}

/// Materials used by the scene.
pub fn define_materials() -> MaterialLibrary {
    let mut library = MaterialLibrary::new();

    library.define(Material {
        tag: "wood",
        ambient_strength: 0.2,
        ambient: Vec3::new(0.4, 0.3, 0.2),
        diffuse: Vec3::new(0.4, 0.3, 0.2),
        specular: Vec3::new(0.1, 0.1, 0.1),
        shininess: 8.0,
    });
    library.define(Material {
        tag: "glass",
        ambient_strength: 0.3,
        ambient: Vec3::new(0.3, 0.3, 0.3),
        diffuse: Vec3::new(0.5, 0.5, 0.5),
        specular: Vec3::new(0.9, 0.9, 0.9),
        shininess: 85.0,
    });
    library.define(Material {
        tag: "sunkiss",
        ambient_strength: 0.4,
        ambient: Vec3::new(0.5, 0.4, 0.3),
        diffuse: Vec3::new(0.6, 0.5, 0.4),
        specular: Vec3::new(0.8, 0.8, 0.7),
        shininess: 32.0,
    });

    library
}

/// Lighting: a warm key light overhead, a cool fill from the camera side,
/// and a dim directional wash so nothing goes fully black.
pub fn define_lights() -> SceneLights {
    SceneLights {
        directional: DirectionalLight {
            direction: Vec3::new(-0.3, -1.0, -0.4),
            color: Vec3::ONE,
            intensity: 0.2,
        },
        points: vec![
            PointLight {
                position: Vec3::new(0.0, 14.0, 0.0),
                color: Vec3::new(1.0, 0.9, 0.75),
                intensity: 0.9,
            },
            PointLight {
                position: Vec3::new(0.0, 5.0, 10.0),
                color: Vec3::new(0.6, 0.7, 1.0),
                intensity: 0.35,
            },
        ],
    }
}

/// Owns every resource the scene needs and turns the object list into draw
/// calls.
pub struct SceneManager {
    shapes: ShapeSet,
    textures: TextureRegistry,
    materials: MaterialLibrary,
    lights: SceneLights,
    objects: Vec<SceneObject>,
}

impl SceneManager {
    /// Load textures, define materials and lights, and upload all meshes.
    pub fn prepare(gpu: &GpuContext) -> Self {
        let textures = load_textures(gpu);
        log::info!("{} textures ready", textures.len());

        Self {
            shapes: ShapeSet::load(gpu),
            textures,
            materials: define_materials(),
            lights: define_lights(),
            objects: desk_scene(),
        }
    }

    pub fn lights(&self) -> &SceneLights {
        &self.lights
    }

    /// Resolve the object list into draw calls, in declaration order.
    ///
    /// An unknown texture tag logs a warning and draws with the pass's
    /// white fallback; an unknown material tag uses the default material.
    pub fn draw_calls(&self) -> Vec<DrawCall<'_>> {
        self.objects
            .iter()
            .map(|obj| {
                let texture = self.textures.get(obj.texture);
                if texture.is_none() {
                    log::warn!("no texture registered for tag '{}'", obj.texture);
                }

                let material = obj
                    .material
                    .and_then(|tag| self.materials.find(tag))
                    .unwrap_or_default();

                DrawCall {
                    mesh: self.shapes.get(obj.shape),
                    transform: Transform::new()
                        .position(obj.position)
                        .rotation_degrees(obj.rotation_deg)
                        .scale(obj.scale),
                    material,
                    texture,
                    uv_scale: obj.uv_scale,
                }
            })
            .collect()
    }
}

/// Load every manifest texture, substituting generated pixels for files
/// that cannot be read.
fn load_textures(gpu: &GpuContext) -> TextureRegistry {
    let mut registry = TextureRegistry::new();

    for (i, (tag, path)) in TEXTURE_MANIFEST.iter().enumerate() {
        let texture = match Texture::from_file(gpu, path) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("{err}; using a generated stand-in for '{tag}'");
                fallback_texture(gpu, tag, i as u32)
            }
        };
        registry.insert(tag, texture);
    }

    registry
}

/// A plausible generated stand-in for each texture tag.
fn fallback_texture(gpu: &GpuContext, tag: &str, seed: u32) -> Texture {
    match tag {
        "floor" => Texture::noise(
            gpu,
            64,
            seed,
            &[[139, 90, 43], [160, 120, 60], [120, 80, 40], [150, 105, 55]],
            tag,
        ),
        "tinfoil" | "silver" => Texture::noise(
            gpu,
            32,
            seed,
            &[[190, 190, 195], [160, 160, 168], [210, 210, 215]],
            tag,
        ),
        "winnie" => Texture::noise(
            gpu,
            32,
            seed,
            &[[235, 180, 70], [220, 160, 55], [245, 195, 90]],
            tag,
        ),
        "green" => Texture::solid(gpu, [70, 120, 60, 255], tag),
        "pinkkiss" => Texture::solid(gpu, [232, 150, 180, 255], tag),
        "kisstag" => Texture::solid(gpu, [240, 238, 230, 255], tag),
        "wick" => Texture::solid(gpu, [40, 35, 30, 255], tag),
        "tea" => Texture::solid(gpu, [170, 110, 45, 255], tag),
        "wax" => Texture::solid(gpu, [240, 230, 200, 255], tag),
        "lemonlime" => Texture::solid(gpu, [190, 220, 90, 255], tag),
        _ => Texture::solid(gpu, [255, 255, 255, 255], tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_has_fifteen_draws_in_order() {
        let objects = desk_scene();
        assert_eq!(objects.len(), 15);

        // Floor first, wick last.
        assert_eq!(objects[0].texture, "floor");
        assert_eq!(objects[0].shape, Shape::Plane);
        assert_eq!(objects[14].texture, "wick");
    }

    #[test]
    fn every_texture_tag_is_in_the_manifest() {
        let objects = desk_scene();
        for obj in &objects {
            assert!(
                TEXTURE_MANIFEST.iter().any(|(tag, _)| *tag == obj.texture),
                "tag '{}' has no manifest entry",
                obj.texture
            );
        }
    }

    #[test]
    fn every_material_tag_is_defined() {
        let library = define_materials();
        for obj in &desk_scene() {
            if let Some(tag) = obj.material {
                assert!(library.find(tag).is_some(), "material '{}' undefined", tag);
            }
        }
    }

    #[test]
    fn kisses_pair_cones_with_tags() {
        let objects = desk_scene();
        let cones: Vec<_> = objects.iter().filter(|o| o.shape == Shape::Cone).collect();
        let tags: Vec<_> = objects.iter().filter(|o| o.texture == "kisstag").collect();

        assert_eq!(cones.len(), 3);
        assert_eq!(tags.len(), 3);

        for (cone, tag) in cones.iter().zip(&tags) {
            assert_eq!(cone.position.x, tag.position.x);
            assert_eq!(cone.position.z, tag.position.z);
            assert_eq!(tag.position.y, 0.9);
        }
    }

    #[test]
    fn tea_sits_just_inside_the_mug() {
        let objects = desk_scene();
        let mug = objects.iter().find(|o| o.texture == "winnie").unwrap();
        let tea = objects.iter().find(|o| o.texture == "tea").unwrap();

        assert_eq!(mug.position, tea.position);
        assert!(tea.scale.x < mug.scale.x);
        assert!(tea.scale.y > mug.scale.y);
    }

    #[test]
    fn objects_rest_on_the_desk_surface() {
        for obj in desk_scene() {
            match obj.shape {
                // Cylinders and cones have their base at local y=0, so a
                // resting object sits at (or just above) the floor.
                Shape::Cylinder | Shape::Cone if obj.texture != "wick" => {
                    assert!((obj.position.y - 0.01).abs() < 1e-6);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn lights_fit_the_uniform_block() {
        let lights = define_lights();
        assert!(lights.points.len() <= crate::lights::MAX_POINT_LIGHTS);

        let u = lights.to_uniform();
        assert_eq!(u.point_count[0], 2);
    }

    #[test]
    fn manifest_covers_eleven_tags() {
        assert_eq!(TEXTURE_MANIFEST.len(), 11);
        // Tags are unique.
        for (i, (tag, _)) in TEXTURE_MANIFEST.iter().enumerate() {
            assert!(
                TEXTURE_MANIFEST.iter().skip(i + 1).all(|(t, _)| t != tag),
                "duplicate tag '{}'",
                tag
            );
        }
    }
}
