//! One-pixel-wide color atlas sampled through UVs.

use bevy::asset::RenderAssetUsages;
use bevy::image::{Image, ImageSampler};
use bevy::platform::collections::HashMap;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::pixels::Rgba8;

/// Maximum number of colors in a palette atlas.
pub const MAX_PALETTE_COLORS: usize = 65536;

/// A deduplicated `1 × K` palette of the colors in a sprite.
///
/// Row `k` of the atlas holds color `k`. A voxel with palette slot `k` samples
/// the center of that row at `uv = (0, (k + 0.5) / K)`.
///
/// Build one with [`PaletteBuilder`](super::PaletteBuilder).
#[derive(Clone, Debug, Default)]
pub struct PaletteAtlas {
    colors: Vec<Rgba8>,
    slots: HashMap<Rgba8, u32>,
}

impl PartialEq for PaletteAtlas {
    fn eq(&self, other: &Self) -> bool {
        // `slots` is derived from `colors`.
        self.colors == other.colors
    }
}

impl Eq for PaletteAtlas {}

impl PaletteAtlas {
    pub(super) fn from_parts(colors: Vec<Rgba8>, slots: HashMap<Rgba8, u32>) -> Self {
        debug_assert_eq!(colors.len(), slots.len());
        Self { colors, slots }
    }

    /// Atlas width in pixels. Always 1.
    #[inline]
    pub const fn width(&self) -> u32 {
        1
    }

    /// Atlas height in pixels, one row per color.
    #[inline]
    pub fn height(&self) -> u32 {
        self.colors.len() as u32
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True for the atlas of a fully transparent sprite.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette colors, row 0 first.
    #[inline]
    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    pub fn index_of(&self, color: Rgba8) -> Option<u32> {
        self.slots.get(&color).copied()
    }

    /// UV at the center of row `index`.
    ///
    /// # Panics
    /// Panics if `index` is not a row of this atlas.
    pub fn uv_for(&self, index: u32) -> [f32; 2] {
        let rows = self.colors.len();
        assert!(
            (index as usize) < rows,
            "Palette index {index} out of range for {rows} rows"
        );

        let v = (2 * index as u64 + 1) as f32 / (2 * rows as u64) as f32;
        [0.0, v]
    }

    /// UV of a color's row, or `None` for a color not in the palette.
    pub fn uv_of(&self, color: Rgba8) -> Option<[f32; 2]> {
        self.index_of(color).map(|index| self.uv_for(index))
    }

    /// Build a nearest-sampled sRGB texture of the palette.
    ///
    /// Returns `None` for an empty palette.
    pub fn into_image(self) -> Option<Image> {
        if self.colors.is_empty() {
            return None;
        }

        let mut image = Image::new(
            Extent3d {
                width: self.width(),
                height: self.height(),
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            bytemuck::cast_slice(&self.colors).to_vec(),
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        );
        // Sampling between rows would blend neighbouring palette colors.
        image.sampler = ImageSampler::nearest();

        Some(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteBuilder;

    fn atlas(count: u8) -> PaletteAtlas {
        (0..count)
            .fold(PaletteBuilder::new(), |builder, i| builder.with_color([i, 0, 0, 255]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_uv_centers_rows() {
        let atlas = atlas(4);
        assert_eq!(atlas.uv_for(0), [0.0, 0.125]);
        assert_eq!(atlas.uv_for(3), [0.0, 0.875]);
    }

    #[test]
    fn test_uv_strictly_inside_row() {
        for count in [1u8, 3, 7, 200] {
            let atlas = atlas(count);
            let rows = count as f32;
            for k in 0..count as u32 {
                let [u, v] = atlas.uv_for(k);
                assert_eq!(u, 0.0);
                assert!(v > k as f32 / rows && v < (k + 1) as f32 / rows);
                // Same as k / K + 1 / 2K.
                let expected = k as f32 / rows + 1.0 / (2.0 * rows);
                assert!((v - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_uv_for_missing_row() {
        atlas(2).uv_for(2);
    }

    #[test]
    fn test_uv_of() {
        let atlas = atlas(2);
        assert_eq!(atlas.uv_of([1, 0, 0, 255]), Some([0.0, 0.75]));
        assert_eq!(atlas.uv_of([9, 9, 9, 255]), None);
    }

    #[test]
    fn test_into_image_layout() {
        let image = atlas(3).into_image().unwrap();
        assert_eq!(image.width(), 1);
        assert_eq!(image.height(), 3);
        assert_eq!(image.texture_descriptor.format, TextureFormat::Rgba8UnormSrgb);

        let data = image.data.as_deref().unwrap();
        assert_eq!(&data[4..8], &[1, 0, 0, 255]);
        assert_eq!(&data[8..12], &[2, 0, 0, 255]);
    }

    #[test]
    fn test_empty_atlas_has_no_image() {
        let empty = PaletteBuilder::new().build().unwrap();
        assert_eq!(empty.width(), 1);
        assert_eq!(empty.height(), 0);
        assert!(empty.into_image().is_none());
    }
}
