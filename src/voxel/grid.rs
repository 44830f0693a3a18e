//! Canonical traversal of a sprite's cells.
//!
//! Every stream the voxelizer emits (positions, normals, indices, colors,
//! UVs) is produced by walking the grid in this order, which keeps them
//! aligned without sharing intermediate state.

use crate::pixels::{PixelBuffer, is_visible};

/// A visible cell of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    /// Linear index into [`PixelBuffer::pixels`].
    pub pixel_index: usize,
    /// Number of visible cells before this one in scan order.
    ///
    /// The ordinal, not `(row, col)`, decides where this voxel's vertices and
    /// indices live in the output buffers.
    pub ordinal: usize,
}

/// Row-major, bottom-row-first walker over the visible cells of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug)]
pub struct VoxelGrid<'a> {
    buffer: &'a PixelBuffer,
}

impl<'a> VoxelGrid<'a> {
    pub fn new(buffer: &'a PixelBuffer) -> Self {
        Self { buffer }
    }

    /// Visible cells of the whole grid, in scan order.
    pub fn walk(self) -> impl Iterator<Item = GridCell> + 'a {
        let width = self.buffer.width() as usize;
        self.buffer
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, color)| is_visible(**color))
            .enumerate()
            .map(move |(ordinal, (pixel_index, _))| GridCell {
                row: (pixel_index / width) as u32,
                col: (pixel_index % width) as u32,
                pixel_index,
                ordinal,
            })
    }

    /// Visible cells of one row, numbered from `base_ordinal`.
    ///
    /// With `base_ordinal` taken from [`VoxelGrid::row_offsets`], the cells
    /// match those [`VoxelGrid::walk`] yields for the same row.
    pub fn walk_row(self, row: u32, base_ordinal: usize) -> impl Iterator<Item = GridCell> + 'a {
        let start = self.buffer.index(row, 0);
        self.buffer
            .row(row)
            .iter()
            .enumerate()
            .filter(|(_, color)| is_visible(**color))
            .enumerate()
            .map(move |(k, (col, _))| GridCell {
                row,
                col: col as u32,
                pixel_index: start + col,
                ordinal: base_ordinal + k,
            })
    }

    /// Number of cells that produce a voxel.
    pub fn visible_count(self) -> usize {
        self.buffer
            .pixels()
            .iter()
            .filter(|color| is_visible(**color))
            .count()
    }

    /// Exclusive prefix sum of visible cells per row.
    ///
    /// Entry `r` is the ordinal of the first visible cell at or after row `r`;
    /// the final entry is the total visible count. Length is `height + 1`.
    pub fn row_offsets(self) -> Vec<usize> {
        let height = self.buffer.height();
        let mut offsets = Vec::with_capacity(height as usize + 1);
        let mut total = 0;
        offsets.push(total);

        if self.buffer.is_empty() {
            offsets.resize(height as usize + 1, 0);
            return offsets;
        }

        for row in 0..height {
            total += self
                .buffer
                .row(row)
                .iter()
                .filter(|color| is_visible(**color))
                .count();
            offsets.push(total);
        }
        offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: [u8; 4] = [0, 0, 0, 0];
    const SOLID: [u8; 4] = [10, 20, 30, 255];

    fn checker(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |row, col| {
            if (row + col) % 2 == 0 { SOLID } else { CLEAR }
        })
    }

    #[test]
    fn test_walk_skips_transparent_and_keeps_ordinals_dense() {
        let buffer = checker(3, 2);
        let cells: Vec<_> = VoxelGrid::new(&buffer).walk().collect();

        let coords: Vec<_> = cells.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 2), (1, 1)]);

        let ordinals: Vec<_> = cells.iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);

        for cell in &cells {
            assert_eq!(cell.pixel_index, buffer.index(cell.row, cell.col));
        }
    }

    #[test]
    fn test_empty_and_transparent_buffers() {
        let empty = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        assert_eq!(VoxelGrid::new(&empty).walk().count(), 0);
        assert_eq!(VoxelGrid::new(&empty).row_offsets(), vec![0]);

        let zero_width = PixelBuffer::new(0, 3, Vec::new()).unwrap();
        assert_eq!(VoxelGrid::new(&zero_width).row_offsets(), vec![0; 4]);

        let clear = PixelBuffer::from_fn(4, 4, |_, _| CLEAR);
        assert_eq!(VoxelGrid::new(&clear).walk().count(), 0);
        assert_eq!(VoxelGrid::new(&clear).visible_count(), 0);
    }

    #[test]
    fn test_row_offsets_prefix_sum() {
        let buffer = checker(3, 3);
        let offsets = VoxelGrid::new(&buffer).row_offsets();
        assert_eq!(offsets, vec![0, 2, 3, 5]);
        assert_eq!(*offsets.last().unwrap(), VoxelGrid::new(&buffer).visible_count());
    }

    #[test]
    fn test_walk_row_matches_walk() {
        let buffer = checker(5, 4);
        let grid = VoxelGrid::new(&buffer);
        let offsets = grid.row_offsets();

        let by_rows: Vec<_> = (0..buffer.height())
            .flat_map(|row| grid.walk_row(row, offsets[row as usize]))
            .collect();
        let whole: Vec<_> = grid.walk().collect();
        assert_eq!(by_rows, whole);
    }
}
