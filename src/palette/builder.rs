//! Ordered color set used to build palette atlases.

use bevy::platform::collections::HashMap;

use super::atlas::{MAX_PALETTE_COLORS, PaletteAtlas};
use crate::error::VoxelizeError;
use crate::pixels::{PixelBuffer, Rgba8, is_visible};

/// Collects distinct colors in first-seen order.
///
/// Each new color gets the next slot, starting at 0. Colors are compared on
/// all four channels, so the same RGB with a different alpha is a new slot.
///
/// # Example
///
/// ```
/// use bevy_voxelizer::palette::PaletteBuilder;
///
/// let atlas = PaletteBuilder::new()
///     .with_color([255, 0, 0, 255])
///     .with_color([0, 255, 0, 255])
///     .with_color([255, 0, 0, 255])
///     .build()
///     .unwrap();
///
/// assert_eq!(atlas.len(), 2);
/// assert_eq!(atlas.index_of([0, 255, 0, 255]), Some(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PaletteBuilder {
    colors: Vec<Rgba8>,
    slots: HashMap<Rgba8, u32>,
}

impl PaletteBuilder {
    /// Create an empty palette builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every visible color of `buffer` in scan order.
    pub fn scan(buffer: &PixelBuffer) -> Self {
        let mut builder = Self::new();
        for &color in buffer.pixels() {
            if is_visible(color) {
                builder.insert(color);
            }
        }
        builder
    }

    /// Add a color, returning its slot.
    pub fn insert(&mut self, color: Rgba8) -> u32 {
        if let Some(&slot) = self.slots.get(&color) {
            return slot;
        }

        let slot = self.colors.len() as u32;
        self.colors.push(color);
        self.slots.insert(color, slot);
        slot
    }

    /// Add a color (builder version).
    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.insert(color);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Slot of a color already inserted.
    pub fn index_of(&self, color: Rgba8) -> Option<u32> {
        self.slots.get(&color).copied()
    }

    /// Freeze the collected colors into an atlas.
    ///
    /// Fails when more colors were collected than an atlas holds.
    pub fn build(self) -> Result<PaletteAtlas, VoxelizeError> {
        if self.colors.len() > MAX_PALETTE_COLORS {
            return Err(VoxelizeError::TooManyColors {
                count: self.colors.len(),
                max: MAX_PALETTE_COLORS,
            });
        }
        Ok(PaletteAtlas::from_parts(self.colors, self.slots))
    }
}
