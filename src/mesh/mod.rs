//! Voxel mesh output.
//!
//! [`MeshDescription`] is plain data: positions, flat normals, triangle
//! indices and either vertex colors or atlas UVs. Any renderer can consume it
//! directly; [`MeshDescription::into_mesh`] turns it into a Bevy [`Mesh`](bevy::mesh::Mesh).

mod builder;
mod description;
mod validation;

pub use builder::{VoxelMeshBuilder, VoxelPaint};
pub use description::MeshDescription;
pub use validation::MeshInvariantError;
