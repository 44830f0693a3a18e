//! Structural checks for generated voxel meshes.

use thiserror::Error;

use super::description::MeshDescription;
use crate::voxel::{INDICES_PER_VOXEL, IndexWidth, VERTICES_PER_VOXEL};

/// A broken mesh law. These indicate a bug in mesh generation, not bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshInvariantError {
    #[error("Vertex count {vertices} is not a multiple of {}", VERTICES_PER_VOXEL)]
    PartialVoxel { vertices: usize },

    #[error("Stream '{name}' has {len} entries, expected one per vertex ({vertices})")]
    StreamLength {
        name: &'static str,
        len: usize,
        vertices: usize,
    },

    #[error("Index count {indices} does not match {voxels} voxels")]
    IndexCount { indices: usize, voxels: usize },

    #[error("Index {index} at position {position} is out of bounds for {vertices} vertices")]
    IndexOutOfBounds {
        index: u32,
        position: usize,
        vertices: usize,
    },

    #[error("Index {index} at position {position} refers outside its own voxel")]
    CrossVoxelIndex { index: u32, position: usize },

    #[error("Mesh carries both vertex colors and atlas UVs")]
    ConflictingColors,

    #[error("Index width is {found:?} but {vertices} vertices need {expected:?}")]
    IndexWidth {
        found: IndexWidth,
        expected: IndexWidth,
        vertices: usize,
    },
}

impl MeshDescription {
    /// Check every structural law of a voxel mesh.
    pub fn check_invariants(&self) -> Result<(), MeshInvariantError> {
        let vertices = self.positions.len();
        if vertices % VERTICES_PER_VOXEL != 0 {
            return Err(MeshInvariantError::PartialVoxel { vertices });
        }

        check_stream("normals", self.normals.len(), vertices)?;
        if let Some(colors) = &self.colors {
            check_stream("colors", colors.len(), vertices)?;
        }
        if let Some(uvs) = &self.uvs {
            check_stream("uvs", uvs.len(), vertices)?;
        }
        if self.colors.is_some() && self.uvs.is_some() {
            return Err(MeshInvariantError::ConflictingColors);
        }

        let voxels = vertices / VERTICES_PER_VOXEL;
        if self.indices.len() != voxels * INDICES_PER_VOXEL {
            return Err(MeshInvariantError::IndexCount {
                indices: self.indices.len(),
                voxels,
            });
        }

        for (position, &index) in self.indices.iter().enumerate() {
            if index as usize >= vertices {
                return Err(MeshInvariantError::IndexOutOfBounds {
                    index,
                    position,
                    vertices,
                });
            }
            if index as usize / VERTICES_PER_VOXEL != position / INDICES_PER_VOXEL {
                return Err(MeshInvariantError::CrossVoxelIndex { index, position });
            }
        }

        let expected = IndexWidth::for_vertex_count(vertices);
        if self.index_width != expected {
            return Err(MeshInvariantError::IndexWidth {
                found: self.index_width,
                expected,
                vertices,
            });
        }

        Ok(())
    }
}

fn check_stream(name: &'static str, len: usize, vertices: usize) -> Result<(), MeshInvariantError> {
    if len != vertices {
        return Err(MeshInvariantError::StreamLength {
            name,
            len,
            vertices,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{VoxelMeshBuilder, VoxelPaint};
    use crate::voxel::{ColorMode, Cube, GridCell};

    fn two_voxels(color_mode: ColorMode, paint: VoxelPaint) -> MeshDescription {
        let mut builder = VoxelMeshBuilder::new(color_mode);
        for ordinal in 0..2 {
            let cell = GridCell {
                row: 0,
                col: ordinal as u32,
                pixel_index: ordinal,
                ordinal,
            };
            builder.push_voxel(&cell, &Cube::new(ordinal as f32, 0.0, 1.0), paint);
        }
        builder.build()
    }

    #[test]
    fn test_valid_meshes_pass() {
        assert_eq!(MeshDescription::default().check_invariants(), Ok(()));
        assert_eq!(
            two_voxels(ColorMode::PerVertex, VoxelPaint::Color([1, 2, 3, 4])).check_invariants(),
            Ok(())
        );
        assert_eq!(
            two_voxels(ColorMode::Atlas, VoxelPaint::Uv([0.0, 0.5])).check_invariants(),
            Ok(())
        );
    }

    #[test]
    fn test_detects_out_of_bounds_index() {
        let mut mesh = two_voxels(ColorMode::None, VoxelPaint::Uncolored);
        mesh.indices[40] = 48;
        assert!(matches!(
            mesh.check_invariants(),
            Err(MeshInvariantError::IndexOutOfBounds { index: 48, .. })
        ));
    }

    #[test]
    fn test_detects_cross_voxel_index() {
        let mut mesh = two_voxels(ColorMode::None, VoxelPaint::Uncolored);
        mesh.indices[0] = 30;
        assert_eq!(
            mesh.check_invariants(),
            Err(MeshInvariantError::CrossVoxelIndex {
                index: 30,
                position: 0
            })
        );
    }

    #[test]
    fn test_detects_conflicting_colors() {
        let mut mesh = two_voxels(ColorMode::PerVertex, VoxelPaint::Color([1, 2, 3, 4]));
        mesh.uvs = Some(vec![[0.0, 0.0]; 48]);
        assert_eq!(
            mesh.check_invariants(),
            Err(MeshInvariantError::ConflictingColors)
        );
    }

    #[test]
    fn test_detects_short_stream() {
        let mut mesh = two_voxels(ColorMode::None, VoxelPaint::Uncolored);
        mesh.normals.pop();
        assert!(matches!(
            mesh.check_invariants(),
            Err(MeshInvariantError::StreamLength { name: "normals", .. })
        ));
    }

    #[test]
    fn test_detects_wrong_index_width() {
        let mut mesh = two_voxels(ColorMode::None, VoxelPaint::Uncolored);
        mesh.index_width = IndexWidth::U32;
        assert!(matches!(
            mesh.check_invariants(),
            Err(MeshInvariantError::IndexWidth { .. })
        ));
    }
}
