//! RGBA8 pixel storage consumed by the voxelizer.

use bevy::image::Image;
use bevy::log::warn;
use bevy::render::render_resource::TextureFormat;

use crate::error::VoxelizeError;

/// One RGBA sample, 8 bits per channel.
pub type Rgba8 = [u8; 4];

/// Index of the alpha channel within an [`Rgba8`] sample.
pub const ALPHA: usize = 3;

/// An immutable `width × height` grid of RGBA8 samples.
///
/// # Coordinate System
///
/// Samples are stored row-major with row `0` at the **bottom** of the sprite.
/// Increasing row index moves up the +Y axis of the generated mesh, so a
/// buffer read bottom-to-top produces an upright model. [`PixelBuffer::from_image`]
/// flips Bevy's top-to-bottom image rows into this order.
///
/// # Example
///
/// ```
/// use bevy_voxelizer::pixels::PixelBuffer;
///
/// let buffer = PixelBuffer::new(2, 1, vec![[255, 0, 0, 255], [0, 0, 0, 0]]).unwrap();
/// assert!(buffer.is_visible(0));
/// assert!(!buffer.is_visible(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl PixelBuffer {
    /// Wrap `pixels` as a `width × height` buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba8>) -> Result<Self, VoxelizeError> {
        if pixels.len() != width as usize * height as usize {
            return Err(VoxelizeError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a buffer by sampling `f(row, col)` for every cell.
    pub fn from_fn<F: FnMut(u32, u32) -> Rgba8>(width: u32, height: u32, mut f: F) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Reinterpret tightly packed RGBA8 bytes, bottom row first.
    pub fn from_rgba8_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, VoxelizeError> {
        let pixels: &[Rgba8] =
            bytemuck::try_cast_slice(bytes).map_err(|_| VoxelizeError::PartialSample {
                len: bytes.len(),
            })?;

        Self::new(width, height, pixels.to_vec())
    }

    /// Read the first layer of a Bevy [`Image`].
    ///
    /// Images that are not RGBA8 are converted, with a warning, since lossy or
    /// compressed sources rarely voxelize cleanly.
    pub fn from_image(image: &Image) -> Result<Self, VoxelizeError> {
        if image.data.is_none() {
            return Err(VoxelizeError::MissingPixelData);
        }

        let format = image.texture_descriptor.format;
        let converted;
        let image = if is_rgba8(format) {
            image
        } else {
            warn!(
                "Sprite texture format is {:?}; for best results use an RGBA8 texture",
                format
            );
            converted = image
                .convert(TextureFormat::Rgba8UnormSrgb)
                .ok_or(VoxelizeError::UnsupportedFormat(format))?;
            &converted
        };

        let width = image.width();
        let height = image.height();
        if width == 0 || height == 0 {
            return Ok(Self {
                width,
                height,
                pixels: Vec::new(),
            });
        }

        let data = image
            .data
            .as_deref()
            .ok_or(VoxelizeError::MissingPixelData)?;
        let layer_len = width as usize * height as usize * 4;
        let layer = data
            .get(..layer_len)
            .ok_or(VoxelizeError::InvalidDimensions {
                width,
                height,
                len: data.len() / 4,
            })?;

        let samples: &[Rgba8] = bytemuck::cast_slice(layer);
        let mut pixels = Vec::with_capacity(samples.len());
        for image_row in samples.chunks_exact(width as usize).rev() {
            pixels.extend_from_slice(image_row);
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the buffer has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Linear index of the cell at `(row, col)`.
    ///
    /// Not bounds checked; use [`PixelBuffer::get`] for untrusted coordinates.
    #[inline]
    pub fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Sample at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: u32, col: u32) -> Option<Rgba8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.pixels[self.index(row, col)])
    }

    /// Samples of a single row.
    ///
    /// # Panics
    /// Panics if `row >= height`.
    pub fn row(&self, row: u32) -> &[Rgba8] {
        assert!(
            row < self.height,
            "Row {row} out of range for {} rows",
            self.height
        );
        let start = self.index(row, 0);
        &self.pixels[start..start + self.width as usize]
    }

    /// Whether the sample at `index` produces a voxel.
    ///
    /// This is the only visibility rule: any non-zero alpha is visible.
    #[inline]
    pub fn is_visible(&self, index: usize) -> bool {
        is_visible(self.pixels[index])
    }
}

/// Whether a sample produces a voxel.
#[inline]
pub const fn is_visible(color: Rgba8) -> bool {
    color[ALPHA] != 0
}

fn is_rgba8(format: TextureFormat) -> bool {
    matches!(
        format,
        TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm
    )
}
