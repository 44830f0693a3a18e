//! # bevy_voxelizer
//!
//! Turns 2D sprites into blocky 3D meshes: every non-transparent pixel
//! becomes a cube.
//!
//! ## Features
//!
//! - 24 vertices and 36 indices per visible pixel, with flat per-face normals
//! - Per-vertex colors, or a deduplicated 1-pixel-wide palette atlas plus UVs
//! - 16-bit indices when they fit, 32-bit otherwise
//! - Plain-data output ([`MeshDescription`](mesh::MeshDescription)) with
//!   conversions to Bevy [`Mesh`](bevy::mesh::Mesh) and [`Image`](bevy::image::Image)
//! - Optional row-parallel generation (`parallel` feature)
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_voxelizer::prelude::*;
//!
//! fn spawn_voxel_sprite(
//!     mut commands: Commands,
//!     mut meshes: ResMut<Assets<Mesh>>,
//!     mut images: ResMut<Assets<Image>>,
//!     mut materials: ResMut<Assets<StandardMaterial>>,
//!     sprite: Res<SpriteHandle>,
//! ) {
//!     let options = VoxelOptions::new().with_scale(0.1).with_color_mode(ColorMode::Atlas);
//!     let voxelized = voxelize_image(images.get(&sprite.0).unwrap(), &options).unwrap();
//!     let (Some(mesh), Some(palette)) = voxelized.into_assets() else { return };
//!
//!     commands.spawn((
//!         Mesh3d(meshes.add(mesh)),
//!         MeshMaterial3d(materials.add(StandardMaterial {
//!             base_color_texture: Some(images.add(palette)),
//!             ..default()
//!         })),
//!     ));
//! }
//! ```

pub mod error;
pub mod mesh;
pub mod palette;
pub mod pixels;
pub mod voxel;
mod voxelize;

pub use voxelize::{Voxelized, voxelize, voxelize_image};

pub mod prelude {
    pub use crate::error::VoxelizeError;
    pub use crate::mesh::MeshDescription;
    pub use crate::palette::{PaletteAtlas, PaletteBuilder};
    pub use crate::pixels::PixelBuffer;
    pub use crate::voxel::{ColorMode, GridAnchor, IndexWidth, VoxelOptions};
    pub use crate::{Voxelized, voxelize, voxelize_image};
}
