//! Errors reported by the voxelizer.

use bevy::render::render_resource::TextureFormat;
use thiserror::Error;

/// Errors that can occur when preparing input for, or running, the voxelizer.
///
/// An empty sprite (zero width or height) is not an error; it produces an
/// empty mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoxelizeError {
    #[error("Pixel buffer holds {len} samples, expected {width}x{height}")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("Pixel data is {len} bytes, not a whole number of RGBA8 samples")]
    PartialSample { len: usize },

    #[error("Voxel scale must be finite and greater than zero, got {0}")]
    InvalidScale(f32),

    #[error("Image has no CPU-side pixel data; keep it in the main world to voxelize it")]
    MissingPixelData,

    #[error("Image format {0:?} cannot be converted to RGBA8")]
    UnsupportedFormat(TextureFormat),

    #[error("Sprite has {count} distinct colors, palette atlas holds at most {max}")]
    TooManyColors { count: usize, max: usize },

    #[error("Sprite has {count} visible voxels, more than a 32-bit index buffer can address")]
    TooManyVoxels { count: usize },
}
