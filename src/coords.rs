use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
    NorthEast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CubeCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        debug_assert!(x + y + z == 0, "cube coordinates must sum to zero");
        Self { x, y, z }
    }

    pub fn add(self, other: CubeCoord) -> Self {
        CubeCoord::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn neighbors(self) -> impl Iterator<Item = CubeCoord> {
        UNIT_VECTORS.iter().map(move |(_, vec)| self.add(*vec))
    }

    pub fn from_offset(x: i32, y: i32) -> Self {
        offset_to_cube((x, y))
    }
}

impl Default for CubeCoord {
    fn default() -> Self {
        CubeCoord::new(0, 0, 0)
    }
}

pub static UNIT_VECTORS: Lazy<HashMap<Direction, CubeCoord>> = Lazy::new(|| {
    use Direction::*;
    HashMap::from([
        (NorthEast, CubeCoord::new(1, 0, -1)),
        (SouthWest, CubeCoord::new(-1, 0, 1)),
        (NorthWest, CubeCoord::new(0, 1, -1)),
        (SouthEast, CubeCoord::new(0, -1, 1)),
        (East, CubeCoord::new(1, -1, 0)),
        (West, CubeCoord::new(-1, 1, 0)),
    ])
});

pub fn cube_to_offset(cube: CubeCoord) -> (i32, i32) {
    let col = cube.x + (cube.z - (cube.z & 1)) / 2;
    (col, cube.z)
}

pub fn offset_to_cube(offset: (i32, i32)) -> CubeCoord {
    let x = offset.0 - (offset.1 - (offset.1 & 1)) / 2;
    let z = offset.1;
    let y = -x - z;
    CubeCoord::new(x, y, z)
}

/// A hex-corner position in a doubled integer unit space.
///
/// One horizontal unit is half a hex width, one vertical unit a quarter of a
/// hex height, so every corner of every hex lands on integer coordinates and
/// corners shared between adjacent hexes compare equal exactly. This is what
/// lets the topology dedup corners with a plain `HashMap` instead of any
/// floating-point proximity matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CornerPoint {
    pub x: i32,
    pub y: i32,
}

impl CornerPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Corner offsets from a hex center, clockwise from the north corner.
/// Pointy-top orientation, screen coordinates (y grows downward).
pub const CORNER_OFFSETS: [(i32, i32); 6] = [(0, -2), (1, -1), (1, 1), (0, 2), (-1, 1), (-1, -1)];

/// Center of a hex in the doubled corner space.
pub fn hex_center(coord: CubeCoord) -> CornerPoint {
    // Axial (q, r) = (x, z); pointy-top center is (sqrt(3)(q + r/2), 3r/2)
    // in pixels, which scales to integers as below.
    CornerPoint::new(2 * coord.x + coord.z, 3 * coord.z)
}

/// The six corners of a hex, clockwise from north.
pub fn hex_corners(coord: CubeCoord) -> [CornerPoint; 6] {
    let center = hex_center(coord);
    CORNER_OFFSETS.map(|(dx, dy)| CornerPoint::new(center.x + dx, center.y + dy))
}
