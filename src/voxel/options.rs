//! Voxelizer configuration.

use crate::error::VoxelizeError;

/// How the generated mesh carries voxel color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Geometry only. No colors and no UVs.
    None,
    /// Every vertex carries its voxel's RGBA color.
    #[default]
    PerVertex,
    /// Colors are deduplicated into a 1-pixel-wide palette image and every
    /// vertex carries a UV pointing at its voxel's palette row.
    Atlas,
}

impl ColorMode {
    #[inline]
    pub const fn applies_vertex_colors(self) -> bool {
        matches!(self, Self::PerVertex)
    }

    #[inline]
    pub const fn builds_atlas(self) -> bool {
        matches!(self, Self::Atlas)
    }
}

/// Where the voxel grid sits relative to the mesh's local origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridAnchor {
    /// Cell `(0, 0)` starts at the origin; columns grow along +X, rows along +Y.
    Origin,
    /// The sprite is centered on the origin in X and Y.
    #[default]
    Centered,
}

/// Options for a single voxelization.
///
/// # Example
/// ```
/// use bevy_voxelizer::voxel::{ColorMode, GridAnchor, VoxelOptions};
///
/// let options = VoxelOptions::new()
///     .with_scale(0.5)
///     .with_color_mode(ColorMode::Atlas)
///     .with_anchor(GridAnchor::Origin);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelOptions {
    /// Edge length of a voxel along X and Y. Each voxel spans `-scale..scale` in Z.
    ///
    /// Default: 1.0
    pub scale: f32,

    /// Default: [`ColorMode::PerVertex`]
    pub color_mode: ColorMode,

    /// Default: [`GridAnchor::Centered`]
    pub anchor: GridAnchor,
}

impl Default for VoxelOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            color_mode: ColorMode::default(),
            anchor: GridAnchor::default(),
        }
    }
}

impl VoxelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn with_anchor(mut self, anchor: GridAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Check that the options describe a buildable mesh.
    pub fn validate(&self) -> Result<(), VoxelizeError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(VoxelizeError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// World-space XY position of cell `(0, 0)`'s anchor corner for a
    /// `width × height` sprite.
    pub fn origin(&self, width: u32, height: u32) -> [f32; 2] {
        match self.anchor {
            GridAnchor::Origin => [0.0, 0.0],
            GridAnchor::Centered => [
                -(width as f32) * self.scale / 2.0,
                -(height as f32) * self.scale / 2.0,
            ],
        }
    }
}
