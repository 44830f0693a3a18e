//! Plain-data voxel mesh and its conversion to a Bevy [`Mesh`].

use bevy::asset::RenderAssetUsages;
use bevy::color::{ColorToComponents, LinearRgba, Srgba};
use bevy::mesh::{Indices, Mesh, PrimitiveTopology};

use crate::pixels::Rgba8;
use crate::voxel::{IndexWidth, VERTICES_PER_VOXEL};

/// Vertex and index streams of a voxelized sprite.
///
/// All per-vertex streams have the same length. At most one of `colors` and
/// `uvs` is present. Indices are kept as `u32`; `index_width` tells how they
/// must be stored on upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshDescription {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    /// sRGB vertex colors, when colored per vertex.
    pub colors: Option<Vec<Rgba8>>,
    /// Palette atlas coordinates, when colored through an atlas.
    pub uvs: Option<Vec<[f32; 2]>>,
    pub index_width: IndexWidth,
}

impl MeshDescription {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of cubes in the mesh.
    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_VOXEL
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Indices narrowed to 16 bits, or `None` if this mesh needs 32-bit indices.
    pub fn indices_u16(&self) -> Option<Vec<u16>> {
        match self.index_width {
            IndexWidth::U16 => self
                .indices
                .iter()
                .map(|&index| u16::try_from(index).ok())
                .collect(),
            IndexWidth::U32 => None,
        }
    }

    /// Index buffer in the representation chosen by `index_width`.
    pub fn bevy_indices(&self) -> Indices {
        match self.indices_u16() {
            Some(indices) => Indices::U16(indices),
            None => Indices::U32(self.indices.clone()),
        }
    }

    /// Build a triangle-list Bevy [`Mesh`].
    ///
    /// Vertex colors are converted from sRGB bytes to linear floats, as
    /// [`Mesh::ATTRIBUTE_COLOR`] expects. Atlas UVs go into
    /// [`Mesh::ATTRIBUTE_UV_0`].
    ///
    /// Returns `None` if the mesh has no vertices.
    pub fn into_mesh(self) -> Option<Mesh> {
        if self.positions.is_empty() || self.indices.is_empty() {
            return None;
        }

        let indices = self.bevy_indices();
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        );

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals);
        if let Some(colors) = self.colors {
            let linear: Vec<[f32; 4]> = colors.into_iter().map(srgb_to_linear).collect();
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, linear);
        }
        if let Some(uvs) = self.uvs {
            mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
        }
        mesh.insert_indices(indices);

        Some(mesh)
    }
}

fn srgb_to_linear([r, g, b, a]: Rgba8) -> [f32; 4] {
    LinearRgba::from(Srgba::rgba_u8(r, g, b, a)).to_f32_array()
}
