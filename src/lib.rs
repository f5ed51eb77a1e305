//! # deskscene
//!
//! A fixed 3D desk scene — a tea mug, a candle, a few foil-wrapped kisses,
//! and a closed laptop — rendered with wgpu and explored with a first-person
//! camera.
//!
//! The scene is compiled in as data ([`scene::desk_scene`]); there is no
//! asset pipeline or scene loading. Geometry is generated procedurally
//! ([`geometry`]), textures come from a `textures/` directory next to the
//! binary with generated stand-ins when the files are absent, and a single
//! render pass ([`ScenePass`]) draws everything with Phong lighting.
//!
//! Controls: mouse to look, W/A/S/D to move, Q/E for up/down, O/P for
//! preset viewpoints, Escape to quit.

pub mod app;
pub mod camera;
pub mod freelook;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod lights;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod scene_pass;
pub mod texture;

pub use app::{AppConfig, run};
pub use camera::Camera;
pub use freelook::FreelookCamera;
pub use gpu::GpuContext;
pub use input::Input;
pub use lights::{DirectionalLight, PointLight, SceneLights};
pub use material::{Material, MaterialLibrary};
pub use mesh::{Mesh, Transform, Vertex3d};
pub use scene::{SceneManager, SceneObject, Shape};
pub use scene_pass::{DrawCall, ScenePass};
pub use texture::{AssetError, Texture, TextureRegistry};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
