//! Triangle indices for voxel cubes.

use super::geometry::{Face, VERTICES_PER_VOXEL};

/// Number of indices emitted per voxel (6 faces × 2 triangles × 3).
pub const INDICES_PER_VOXEL: usize = 36;

/// Two triangles over a face's four vertices, relative to the face's first vertex.
pub const FACE_TRIANGLES: [u32; 6] = [3, 1, 0, 3, 2, 1];

/// Vertex count at which 16-bit indices are no longer used.
pub const U16_VERTEX_LIMIT: usize = u16::MAX as usize;

/// Storage width of a mesh's index buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IndexWidth {
    #[default]
    U16,
    U32,
}

impl IndexWidth {
    /// Narrowest width that can address `vertex_count` vertices.
    pub const fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count >= U16_VERTEX_LIMIT {
            Self::U32
        } else {
            Self::U16
        }
    }
}

/// Indices for the voxel with the given ordinal.
///
/// The voxel's vertices start at `ordinal * 24`, so transparent cells, which
/// have no ordinal, never leave holes in the vertex buffer.
pub fn voxel_indices(ordinal: u32) -> [u32; INDICES_PER_VOXEL] {
    let base = ordinal * VERTICES_PER_VOXEL as u32;
    let mut indices = [0; INDICES_PER_VOXEL];
    for (face_index, face) in Face::ALL.iter().enumerate() {
        let first = base + face.first_vertex() as u32;
        for (k, offset) in FACE_TRIANGLES.iter().enumerate() {
            indices[face_index * 6 + k] = first + offset;
        }
    }
    indices
}
