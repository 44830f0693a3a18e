//! Sprite to voxel mesh pipeline.
//!
//! ```text
//! PixelBuffer ──► VoxelGrid::row_offsets ──► per-row segments ──► MeshDescription
//!      │                                         ▲
//!      └──► PaletteBuilder::scan ──► PaletteAtlas┘ (Atlas mode only)
//! ```
//!
//! The palette scan always finishes before any UV is computed, since a
//! voxel's UV depends on the final palette size.

use bevy::image::Image;
use bevy::log::debug;
use bevy::mesh::Mesh;
use bevy::platform::time::Instant;

use crate::error::VoxelizeError;
use crate::mesh::{MeshDescription, VoxelMeshBuilder, VoxelPaint};
use crate::palette::{PaletteAtlas, PaletteBuilder};
use crate::pixels::{PixelBuffer, Rgba8};
use crate::voxel::{ColorMode, Cube, VERTICES_PER_VOXEL, VoxelGrid, VoxelOptions};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of voxelizing a sprite.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Voxelized {
    pub mesh: MeshDescription,
    /// Present only for [`ColorMode::Atlas`]. Empty when the sprite has no
    /// visible pixels, in which case the mesh has no UVs either.
    pub atlas: Option<PaletteAtlas>,
}

impl Voxelized {
    /// Convert into Bevy assets: the mesh and, in atlas mode, its palette texture.
    pub fn into_assets(self) -> (Option<Mesh>, Option<Image>) {
        (
            self.mesh.into_mesh(),
            self.atlas.and_then(PaletteAtlas::into_image),
        )
    }
}

/// Build the voxel mesh of a sprite.
///
/// Every visible pixel becomes a cube of 24 vertices and 36 indices. The
/// output is fully determined by the inputs.
///
/// # Example
/// ```
/// use bevy_voxelizer::prelude::*;
///
/// let sprite = PixelBuffer::new(2, 1, vec![[255, 0, 0, 255], [0, 0, 0, 0]]).unwrap();
/// let voxelized = voxelize(&sprite, &VoxelOptions::default()).unwrap();
///
/// assert_eq!(voxelized.mesh.vertex_count(), 24);
/// assert_eq!(voxelized.mesh.indices.len(), 36);
/// ```
pub fn voxelize(buffer: &PixelBuffer, options: &VoxelOptions) -> Result<Voxelized, VoxelizeError> {
    options.validate()?;
    let start = Instant::now();

    let grid = VoxelGrid::new(buffer);
    let row_offsets = grid.row_offsets();
    let voxel_count = row_offsets.last().copied().unwrap_or(0);
    check_voxel_count(voxel_count)?;

    let atlas = match options.color_mode {
        ColorMode::Atlas => Some(PaletteBuilder::scan(buffer).build()?),
        ColorMode::None | ColorMode::PerVertex => None,
    };
    let color_mode = match &atlas {
        Some(atlas) if atlas.is_empty() => ColorMode::None,
        _ => options.color_mode,
    };

    let origin = options.origin(buffer.width(), buffer.height());
    let segments = map_rows(buffer.height(), |row| {
        let first = row_offsets[row as usize];
        let count = row_offsets[row as usize + 1] - first;
        let mut segment = VoxelMeshBuilder::starting_at(first, count, color_mode);
        for cell in grid.walk_row(row, first) {
            let cube = Cube::for_cell(&cell, origin, options.scale);
            let paint = paint_for(buffer.pixels()[cell.pixel_index], color_mode, atlas.as_ref());
            segment.push_voxel(&cell, &cube, paint);
        }
        segment
    });

    let mut builder = VoxelMeshBuilder::starting_at(0, voxel_count, color_mode);
    for segment in segments {
        builder.append(segment);
    }
    let mesh = builder.build();
    debug_assert_eq!(mesh.check_invariants(), Ok(()));

    debug!(
        "Voxelized {}x{} sprite: {} voxels, {} vertices, {:?} indices, {} palette colors in {:.2} ms",
        buffer.width(),
        buffer.height(),
        voxel_count,
        mesh.vertex_count(),
        mesh.index_width,
        atlas.as_ref().map_or(0, PaletteAtlas::len),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(Voxelized { mesh, atlas })
}

/// Voxelize the first layer of a Bevy [`Image`].
///
/// See [`PixelBuffer::from_image`] for how the image is read.
pub fn voxelize_image(image: &Image, options: &VoxelOptions) -> Result<Voxelized, VoxelizeError> {
    let buffer = PixelBuffer::from_image(image)?;
    voxelize(&buffer, options)
}

/// Every vertex of `voxel_count` cubes must be addressable by a `u32` index.
fn check_voxel_count(voxel_count: usize) -> Result<(), VoxelizeError> {
    if voxel_count
        .checked_mul(VERTICES_PER_VOXEL)
        .is_none_or(|vertices| vertices > u32::MAX as usize)
    {
        return Err(VoxelizeError::TooManyVoxels { count: voxel_count });
    }
    Ok(())
}

fn paint_for(color: Rgba8, color_mode: ColorMode, atlas: Option<&PaletteAtlas>) -> VoxelPaint {
    match color_mode {
        ColorMode::None => VoxelPaint::Uncolored,
        ColorMode::PerVertex => VoxelPaint::Color(color),
        ColorMode::Atlas => match atlas.and_then(|atlas| atlas.uv_of(color)) {
            Some(uv) => VoxelPaint::Uv(uv),
            // The palette was scanned from the same buffer.
            None => unreachable!("Color {color:?} missing from palette"),
        },
    }
}

#[cfg(feature = "parallel")]
fn map_rows<T, F>(height: u32, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(u32) -> T + Sync + Send,
{
    (0..height).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_rows<T, F>(height: u32, f: F) -> Vec<T>
where
    F: Fn(u32) -> T,
{
    (0..height).map(f).collect()
}
