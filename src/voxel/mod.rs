//! Voxel grid traversal, cube geometry and topology.
//!
//! Each visible pixel becomes an independent closed cube of 24 vertices and
//! 36 indices. Neighbouring cubes share nothing, so hidden interior faces are
//! still emitted.

mod geometry;
mod grid;
mod options;
mod topology;

pub use geometry::{Cube, Face, VERTICES_PER_VOXEL, VOXEL_NORMALS};
pub use grid::{GridCell, VoxelGrid};
pub use options::{ColorMode, GridAnchor, VoxelOptions};
pub use topology::{FACE_TRIANGLES, INDICES_PER_VOXEL, IndexWidth, U16_VERTEX_LIMIT, voxel_indices};
