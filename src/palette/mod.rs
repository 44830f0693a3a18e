//! Palette atlases for lookup-based voxel coloring.
//!
//! Instead of storing a color on all 24 vertices of every voxel, the distinct
//! colors of a sprite are packed into a `1 × K` image and each vertex carries
//! a UV into it.

mod atlas;
mod builder;

pub use atlas::{MAX_PALETTE_COLORS, PaletteAtlas};
pub use builder::PaletteBuilder;
