//! # Coordinates Module
//!
//! Grid coordinates and chunk positions.
//!
//! Cells are addressed by unbounded integer triples. Chunks are columns keyed
//! by the world-space x/z of their min corner, so a chunk position is always a
//! multiple of the chunk size and chunk positions of neighbouring chunks differ
//! by exactly one chunk size.

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Integer address of a single cell.
pub type GridCoordinate = Point3<i32>;

/// One cell straight down.
pub const DOWN: Vector3<i32> = Vector3 { x: 0, y: -1, z: 0 };
/// One cell straight up.
pub const UP: Vector3<i32> = Vector3 { x: 0, y: 1, z: 0 };

/// Key of a chunk column: the x/z of its min corner in cell units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPosition {
    /// Min-corner x, a multiple of the chunk size.
    pub x: i32,
    /// Min-corner z, a multiple of the chunk size.
    pub z: i32,
}

impl ChunkPosition {
    /// Creates a chunk position from an already aligned x/z pair.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkPosition { x, z }
    }

    /// Position of the chunk covering a world-space point.
    ///
    /// # Arguments
    /// * `p` - A point in world space; only x and z matter
    /// * `chunk_size` - Horizontal chunk edge length in cells
    pub fn from_world(p: Point3<f32>, chunk_size: i32) -> Self {
        let size = chunk_size as f32;
        ChunkPosition {
            x: (p.x / size).floor() as i32 * chunk_size,
            z: (p.z / size).floor() as i32 * chunk_size,
        }
    }

    /// Position of the chunk containing a cell.
    pub fn containing(p: GridCoordinate, chunk_size: i32) -> Self {
        ChunkPosition {
            x: p.x.div_euclid(chunk_size) * chunk_size,
            z: p.z.div_euclid(chunk_size) * chunk_size,
        }
    }

    /// The chunk's min-corner cell; chunks start at y = 0.
    pub fn min_corner(self) -> GridCoordinate {
        Point3::new(self.x, 0, self.z)
    }

    /// Every chunk position covering the x/z rectangle spanned by `min` and `max`.
    ///
    /// Both ends are inclusive. Positions are produced row by row along z,
    /// x varying fastest. An inverted range yields nothing.
    pub fn covering(
        min: Point3<f32>,
        max: Point3<f32>,
        chunk_size: i32,
    ) -> impl Iterator<Item = ChunkPosition> {
        let lo = ChunkPosition::from_world(min, chunk_size);
        let hi = ChunkPosition::from_world(max, chunk_size);
        let step = chunk_size as usize;
        (lo.z..=hi.z)
            .step_by(step)
            .flat_map(move |z| (lo.x..=hi.x).step_by(step).map(move |x| ChunkPosition { x, z }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 0, 0, 0)]
    #[test_case(7, 7, 0, 0)]
    #[test_case(8, 0, 8, 0)]
    #[test_case(-1, -1, -8, -8)]
    #[test_case(-8, 9, -8, 8)]
    #[test_case(-9, 17, -16, 16)]
    fn containing_floors_towards_negative(x: i32, z: i32, cx: i32, cz: i32) {
        let position = ChunkPosition::containing(Point3::new(x, 5, z), 8);
        assert_eq!(position, ChunkPosition::new(cx, cz));
    }

    #[test]
    fn world_points_agree_with_cells() {
        for x in -20..20 {
            let from_cell = ChunkPosition::containing(Point3::new(x, 0, 0), 8);
            let from_world = ChunkPosition::from_world(Point3::new(x as f32 + 0.5, 0.0, 0.5), 8);
            assert_eq!(from_cell, from_world);
        }
    }

    #[test]
    fn covering_is_inclusive() {
        let positions: Vec<_> = ChunkPosition::covering(
            Point3::new(-0.5, 0.0, 0.0),
            Point3::new(8.0, 0.0, 3.0),
            8,
        )
        .collect();
        assert_eq!(
            positions,
            vec![
                ChunkPosition::new(-8, 0),
                ChunkPosition::new(0, 0),
                ChunkPosition::new(8, 0),
            ]
        );
    }

    #[test]
    fn inverted_range_is_empty() {
        let count = ChunkPosition::covering(
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(-10.0, 0.0, -10.0),
            8,
        )
        .count();
        assert_eq!(count, 0);
    }
}
