//! Cube geometry for a single voxel.
//!
//! ```text
//!        7--------6
//!       /|       /|        +Y
//!      4--------5 |         |
//!      | 3------|-2         o-- +X
//!      |/       |/         /
//!      0--------1        +Z
//! ```
//!
//! Corners 0-3 lie on the bottom (`y`) plane and 4-7 on the top (`y + scale`)
//! plane. Even corners 0, 1, 4, 5 sit at `z = +scale`; 2, 3, 6, 7 at `z = -scale`.

use super::grid::GridCell;

/// Number of vertices emitted per voxel (4 per face, no sharing between faces).
pub const VERTICES_PER_VOXEL: usize = 24;

/// One face of a voxel cube, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Bottom,
    Left,
    Front,
    Back,
    Right,
    Top,
}

impl Face {
    /// All faces in the order their vertices are emitted.
    pub const ALL: [Face; 6] = [
        Face::Bottom,
        Face::Left,
        Face::Front,
        Face::Back,
        Face::Right,
        Face::Top,
    ];

    /// Outward unit normal, in a right-handed Y-up frame.
    pub const fn normal(self) -> [f32; 3] {
        match self {
            Face::Bottom => [0.0, -1.0, 0.0],
            Face::Left => [-1.0, 0.0, 0.0],
            Face::Front => [0.0, 0.0, 1.0],
            Face::Back => [0.0, 0.0, -1.0],
            Face::Right => [1.0, 0.0, 0.0],
            Face::Top => [0.0, 1.0, 0.0],
        }
    }

    /// The four cube corners forming this face.
    ///
    /// Ordered so that triangles `(3, 1, 0)` and `(3, 2, 1)` over these
    /// corners wind counter-clockwise when seen from outside.
    pub const fn corners(self) -> [usize; 4] {
        match self {
            Face::Bottom => [0, 1, 2, 3],
            Face::Left => [7, 4, 0, 3],
            Face::Front => [4, 5, 1, 0],
            Face::Back => [6, 7, 3, 2],
            Face::Right => [5, 6, 2, 1],
            Face::Top => [7, 6, 5, 4],
        }
    }

    /// Offset of this face's first vertex within a voxel's 24.
    #[inline]
    pub const fn first_vertex(self) -> usize {
        self as usize * 4
    }
}

/// The eight corners of one voxel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
    corners: [[f32; 3]; 8],
}

impl Cube {
    /// Cube whose bottom-left corner sits at `(x, y)`, spanning `scale` in X
    /// and Y and `-scale..scale` in Z.
    pub fn new(x: f32, y: f32, scale: f32) -> Self {
        let (x1, y1) = (x + scale, y + scale);
        Self {
            corners: [
                [x, y, scale],
                [x1, y, scale],
                [x1, y, -scale],
                [x, y, -scale],
                [x, y1, scale],
                [x1, y1, scale],
                [x1, y1, -scale],
                [x, y1, -scale],
            ],
        }
    }

    /// Cube for a grid cell, given the grid origin from
    /// [`VoxelOptions::origin`](super::VoxelOptions::origin).
    pub fn for_cell(cell: &GridCell, origin: [f32; 2], scale: f32) -> Self {
        Self::new(
            origin[0] + cell.col as f32 * scale,
            origin[1] + cell.row as f32 * scale,
            scale,
        )
    }

    #[inline]
    pub fn corners(&self) -> &[[f32; 3]; 8] {
        &self.corners
    }

    pub fn face_vertices(&self, face: Face) -> [[f32; 3]; 4] {
        face.corners().map(|corner| self.corners[corner])
    }

    /// The 24 face-duplicated vertices, grouped by [`Face::ALL`].
    pub fn vertices(&self) -> [[f32; 3]; VERTICES_PER_VOXEL] {
        let mut vertices = [[0.0; 3]; VERTICES_PER_VOXEL];
        for face in Face::ALL {
            let start = face.first_vertex();
            vertices[start..start + 4].copy_from_slice(&self.face_vertices(face));
        }
        vertices
    }
}

/// Per-vertex normals matching [`Cube::vertices`]. Identical for every voxel.
pub const VOXEL_NORMALS: [[f32; 3]; VERTICES_PER_VOXEL] = voxel_normals();

const fn voxel_normals() -> [[f32; 3]; VERTICES_PER_VOXEL] {
    let mut normals = [[0.0; 3]; VERTICES_PER_VOXEL];
    let mut i = 0;
    while i < VERTICES_PER_VOXEL {
        normals[i] = Face::ALL[i / 4].normal();
        i += 1;
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_bounds() {
        let cube = Cube::new(1.0, 2.0, 0.5);
        for corner in cube.corners() {
            assert!(corner[0] == 1.0 || corner[0] == 1.5);
            assert!(corner[1] == 2.0 || corner[1] == 2.5);
            assert!(corner[2] == 0.5 || corner[2] == -0.5);
        }
    }

    #[test]
    fn test_corners_are_distinct() {
        let cube = Cube::new(0.0, 0.0, 1.0);
        let corners = cube.corners();
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(corners[i], corners[j], "corners {i} and {j} coincide");
            }
        }
    }

    #[test]
    fn test_face_vertices_lie_on_face_plane() {
        let cube = Cube::new(-3.0, 4.0, 2.0);
        let center = [-2.0, 5.0, 0.0];

        for face in Face::ALL {
            let normal = face.normal();
            let axis = normal.iter().position(|n| *n != 0.0).unwrap();
            let vertices = cube.face_vertices(face);
            let plane = vertices[0][axis];
            for v in vertices {
                assert_eq!(v[axis], plane, "{face:?} is not planar");
            }
            // The plane lies on the normal's side of the cube center.
            assert!((plane - center[axis]) * normal[axis] > 0.0, "{face:?} faces inward");
        }
    }

    #[test]
    fn test_every_face_uses_distinct_corners() {
        let mut uses = [0; 8];
        for face in Face::ALL {
            let corners = face.corners();
            for (i, c) in corners.iter().enumerate() {
                assert!(!corners[i + 1..].contains(c), "{face:?} repeats corner {c}");
                uses[*c] += 1;
            }
        }
        // Each corner of a cube touches exactly three faces.
        assert_eq!(uses, [3; 8]);
    }

    #[test]
    fn test_normals_grouped_by_face() {
        for (i, normal) in VOXEL_NORMALS.iter().enumerate() {
            assert_eq!(*normal, Face::ALL[i / 4].normal());
        }
        let length_sq: f32 = VOXEL_NORMALS[0].iter().map(|n| n * n).sum();
        assert_eq!(length_sq, 1.0);
    }

    #[test]
    fn test_vertices_follow_face_order() {
        let cube = Cube::new(0.0, 0.0, 1.0);
        let vertices = cube.vertices();
        assert_eq!(&vertices[8..12], &cube.face_vertices(Face::Front));
        assert_eq!(&vertices[20..24], &cube.face_vertices(Face::Top));
    }

    #[test]
    fn test_for_cell_maps_row_to_y() {
        let cell = GridCell {
            row: 3,
            col: 2,
            pixel_index: 0,
            ordinal: 0,
        };
        let cube = Cube::for_cell(&cell, [-1.0, -2.0], 0.5);
        assert_eq!(cube.corners()[0], [0.0, -0.5, 0.5]);
    }
}
