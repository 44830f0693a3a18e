//! Incremental builder for voxel meshes.

use super::description::MeshDescription;
use crate::pixels::Rgba8;
use crate::voxel::{
    ColorMode, Cube, GridCell, INDICES_PER_VOXEL, IndexWidth, VERTICES_PER_VOXEL, VOXEL_NORMALS,
    voxel_indices,
};

/// Color data attached to one voxel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VoxelPaint {
    Uncolored,
    Color(Rgba8),
    Uv([f32; 2]),
}

/// Collects voxel cubes into a [`MeshDescription`].
///
/// A builder covers a contiguous run of voxel ordinals starting at
/// `first_ordinal`, so several builders can produce row segments
/// independently and be joined with [`VoxelMeshBuilder::append`].
///
/// # Example
/// ```
/// use bevy_voxelizer::mesh::{VoxelMeshBuilder, VoxelPaint};
/// use bevy_voxelizer::voxel::{ColorMode, Cube, GridCell};
///
/// let cell = GridCell { row: 0, col: 0, pixel_index: 0, ordinal: 0 };
/// let mut builder = VoxelMeshBuilder::new(ColorMode::PerVertex);
/// builder.push_voxel(&cell, &Cube::new(0.0, 0.0, 1.0), VoxelPaint::Color([255, 0, 0, 255]));
///
/// let mesh = builder.build();
/// assert_eq!(mesh.vertex_count(), 24);
/// assert_eq!(mesh.indices.len(), 36);
/// ```
#[derive(Clone, Debug)]
pub struct VoxelMeshBuilder {
    first_ordinal: usize,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
    colors: Option<Vec<Rgba8>>,
    uvs: Option<Vec<[f32; 2]>>,
}

impl VoxelMeshBuilder {
    /// Create an empty builder starting at ordinal 0.
    pub fn new(color_mode: ColorMode) -> Self {
        Self::starting_at(0, 0, color_mode)
    }

    /// Create a builder for `voxel_count` voxels, the first of which has
    /// ordinal `first_ordinal`.
    pub fn starting_at(first_ordinal: usize, voxel_count: usize, color_mode: ColorMode) -> Self {
        let vertex_count = voxel_count * VERTICES_PER_VOXEL;
        Self {
            first_ordinal,
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(voxel_count * INDICES_PER_VOXEL),
            colors: color_mode
                .applies_vertex_colors()
                .then(|| Vec::with_capacity(vertex_count)),
            uvs: color_mode
                .builds_atlas()
                .then(|| Vec::with_capacity(vertex_count)),
        }
    }

    /// Ordinal the next pushed voxel must carry.
    #[inline]
    pub fn next_ordinal(&self) -> usize {
        self.first_ordinal + self.voxel_count()
    }

    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_VOXEL
    }

    /// Add one voxel cube.
    ///
    /// Voxels must be pushed in ordinal order, and `paint` must match the
    /// builder's color mode; both are checked in debug builds.
    pub fn push_voxel(&mut self, cell: &GridCell, cube: &Cube, paint: VoxelPaint) {
        debug_assert_eq!(
            cell.ordinal,
            self.next_ordinal(),
            "Voxel at ({}, {}) pushed out of order",
            cell.row,
            cell.col
        );

        self.positions.extend_from_slice(&cube.vertices());
        self.normals.extend_from_slice(&VOXEL_NORMALS);
        self.indices
            .extend_from_slice(&voxel_indices(cell.ordinal as u32));

        debug_assert!(
            matches!(
                (paint, self.colors.is_some(), self.uvs.is_some()),
                (VoxelPaint::Color(_), true, false)
                    | (VoxelPaint::Uv(_), false, true)
                    | (VoxelPaint::Uncolored, false, false)
            ),
            "{paint:?} does not match builder (colors: {}, uvs: {})",
            self.colors.is_some(),
            self.uvs.is_some()
        );

        match (paint, &mut self.colors, &mut self.uvs) {
            (VoxelPaint::Color(color), Some(colors), _) => {
                colors.extend_from_slice(&[color; VERTICES_PER_VOXEL]);
            }
            (VoxelPaint::Uv(uv), _, Some(uvs)) => {
                uvs.extend_from_slice(&[uv; VERTICES_PER_VOXEL]);
            }
            _ => {}
        }
    }

    /// Append the voxels of a builder that continues this one's ordinals.
    pub fn append(&mut self, mut other: VoxelMeshBuilder) {
        debug_assert_eq!(
            other.first_ordinal,
            self.next_ordinal(),
            "Appended segment does not continue the ordinal sequence"
        );

        self.positions.append(&mut other.positions);
        self.normals.append(&mut other.normals);
        self.indices.append(&mut other.indices);
        if let (Some(colors), Some(more)) = (&mut self.colors, &mut other.colors) {
            colors.append(more);
        }
        if let (Some(uvs), Some(more)) = (&mut self.uvs, &mut other.uvs) {
            uvs.append(more);
        }
    }

    /// Finish the mesh, choosing the index width from the vertex count.
    pub fn build(self) -> MeshDescription {
        MeshDescription {
            index_width: IndexWidth::for_vertex_count(self.positions.len()),
            positions: self.positions,
            normals: self.normals,
            indices: self.indices,
            colors: self.colors,
            uvs: self.uvs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = [255, 0, 0, 255];

    fn cell(ordinal: usize) -> GridCell {
        GridCell {
            row: 0,
            col: ordinal as u32,
            pixel_index: ordinal,
            ordinal,
        }
    }

    #[test]
    fn test_push_voxel_streams() {
        let mut builder = VoxelMeshBuilder::new(ColorMode::PerVertex);
        builder.push_voxel(&cell(0), &Cube::new(0.0, 0.0, 1.0), VoxelPaint::Color(RED));
        builder.push_voxel(&cell(1), &Cube::new(1.0, 0.0, 1.0), VoxelPaint::Color(RED));

        let mesh = builder.build();
        assert_eq!(mesh.positions.len(), 48);
        assert_eq!(mesh.normals.len(), 48);
        assert_eq!(mesh.indices.len(), 72);
        assert_eq!(mesh.colors.as_ref().map(Vec::len), Some(48));
        assert!(mesh.uvs.is_none());
        assert_eq!(mesh.indices.iter().max(), Some(&47));
    }

    #[test]
    fn test_uncolored_builder_has_no_color_streams() {
        let mut builder = VoxelMeshBuilder::new(ColorMode::None);
        builder.push_voxel(&cell(0), &Cube::new(0.0, 0.0, 1.0), VoxelPaint::Uncolored);
        let mesh = builder.build();
        assert!(mesh.colors.is_none());
        assert!(mesh.uvs.is_none());
    }

    #[test]
    fn test_append_segments() {
        let mut first = VoxelMeshBuilder::starting_at(0, 1, ColorMode::Atlas);
        first.push_voxel(&cell(0), &Cube::new(0.0, 0.0, 1.0), VoxelPaint::Uv([0.0, 0.25]));

        let mut second = VoxelMeshBuilder::starting_at(1, 1, ColorMode::Atlas);
        second.push_voxel(&cell(1), &Cube::new(1.0, 0.0, 1.0), VoxelPaint::Uv([0.0, 0.75]));

        first.append(second);
        let mesh = first.build();

        assert_eq!(mesh.voxel_count(), 2);
        let uvs = mesh.uvs.unwrap();
        assert_eq!(uvs[0], [0.0, 0.25]);
        assert_eq!(uvs[24], [0.0, 0.75]);
        assert_eq!(mesh.indices[36], 24 + 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "pushed out of order")]
    fn test_out_of_order_push_panics() {
        let mut builder = VoxelMeshBuilder::new(ColorMode::None);
        builder.push_voxel(&cell(1), &Cube::new(0.0, 0.0, 1.0), VoxelPaint::Uncolored);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not match builder")]
    fn test_mismatched_paint_panics() {
        let mut builder = VoxelMeshBuilder::new(ColorMode::None);
        builder.push_voxel(&cell(0), &Cube::new(0.0, 0.0, 1.0), VoxelPaint::Color(RED));
    }
}
