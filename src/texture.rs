//! Texture loading, procedural fallbacks, and the tag registry.
//!
//! Scene textures are looked up by tag (`"floor"`, `"wax"`, ...) through
//! [`TextureRegistry`]. Each texture normally comes from an image file, but
//! every tag also has a procedural stand-in ([`Texture::solid`] /
//! [`Texture::noise`]) so the scene still renders when the asset directory
//! is missing.

use crate::gpu::GpuContext;
use std::collections::HashMap;

/// Errors raised while loading texture assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The image file could not be read or decoded.
    #[error("could not load texture '{path}': {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// A GPU texture that can be bound to shaders.
///
/// Samplers use repeat addressing so per-object UV scaling can tile the
/// image, and linear filtering.
#[derive(Debug)]
pub struct Texture {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
}

impl Texture {
    /// Create a texture from raw RGBA data.
    pub fn from_rgba(gpu: &GpuContext, data: &[u8], width: u32, height: u32, label: &str) -> Self {
        use wgpu::util::DeviceExt;

        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Load a texture from an image file.
    pub fn from_file(gpu: &GpuContext, path: &str) -> Result<Self, AssetError> {
        let img = image::open(path)
            .map_err(|source| AssetError::Image {
                path: path.to_string(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba(gpu, &img, width, height, path))
    }

    /// Load a texture from embedded bytes.
    pub fn from_bytes(gpu: &GpuContext, bytes: &[u8], label: &str) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|source| AssetError::Image {
                path: label.to_string(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba(gpu, &img, width, height, label))
    }

    /// A 1×1 texture of a single color.
    pub fn solid(gpu: &GpuContext, color: [u8; 4], label: &str) -> Self {
        Self::from_rgba(gpu, &color, 1, 1, label)
    }

    /// A hash-based palette noise texture.
    ///
    /// Picks each pixel's base color from `palette` and adds a small
    /// per-pixel brightness variation, giving a speckled look that stands in
    /// for wood grain, foil, and similar surfaces.
    pub fn noise(gpu: &GpuContext, size: u32, seed: u32, palette: &[[u8; 3]], label: &str) -> Self {
        let data = noise_pixels(size, seed, palette);
        Self::from_rgba(gpu, &data, size, size, label)
    }
}

/// Generate RGBA pixel data for a palette noise texture.
pub fn noise_pixels(size: u32, seed: u32, palette: &[[u8; 3]]) -> Vec<u8> {
    let mut data = vec![0u8; (size * size * 4) as usize];

    for y in 0..size {
        for x in 0..size {
            let idx = ((y * size + x) * 4) as usize;

            let base = palette[(hash(x, y, seed) % palette.len() as u32) as usize];
            let variation = ((hash(x + 1000, y + 1000, seed) % 30) as i32) - 15;

            data[idx] = (base[0] as i32 + variation).clamp(0, 255) as u8;
            data[idx + 1] = (base[1] as i32 + variation).clamp(0, 255) as u8;
            data[idx + 2] = (base[2] as i32 + variation).clamp(0, 255) as u8;
            data[idx + 3] = 255;
        }
    }

    data
}

/// Simple hash function for procedural generation.
fn hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_add(x.wrapping_mul(374761393));
    h = h.wrapping_add(y.wrapping_mul(668265263));
    h ^= h >> 13;
    h = h.wrapping_mul(1274126177);
    h ^= h >> 16;
    h
}

/// Maps texture tags to loaded GPU textures.
#[derive(Default)]
pub struct TextureRegistry {
    textures: HashMap<String, Texture>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture under a tag, replacing any previous entry.
    pub fn insert(&mut self, tag: &str, texture: Texture) {
        self.textures.insert(tag.to_string(), texture);
    }

    /// Look up a texture by tag.
    pub fn get(&self, tag: &str) -> Option<&Texture> {
        self.textures.get(tag)
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_pixels_are_opaque_rgba() {
        let palette = [[139, 90, 43], [100, 70, 40]];
        let data = noise_pixels(8, 42, &palette);

        assert_eq!(data.len(), 8 * 8 * 4);
        for px in data.chunks(4) {
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn noise_pixels_stay_near_palette() {
        let palette = [[128, 128, 128]];
        let data = noise_pixels(16, 7, &palette);

        for px in data.chunks(4) {
            for c in &px[..3] {
                assert!((*c as i32 - 128).abs() <= 15);
            }
        }
    }

    #[test]
    fn noise_is_deterministic_per_seed() {
        let palette = [[10, 20, 30], [200, 150, 100]];
        assert_eq!(noise_pixels(8, 1, &palette), noise_pixels(8, 1, &palette));
        assert_ne!(noise_pixels(8, 1, &palette), noise_pixels(8, 2, &palette));
    }
}
