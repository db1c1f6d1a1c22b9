//! Occlusion search patterns for hazard spread.
//!
//! Spreading from a tile into a neighbour has to get past whatever geometry
//! sits between them. For each neighbour direction the table lists which
//! tiles (relative to the source) to inspect and which occupant slots in
//! them count as obstacles. Walls are owned by the tile on their far side:
//! a left wall separates a tile from its west neighbour, a right wall from
//! its north neighbour, and a ground separates a tile from the one below.

use glam::IVec3;

use cinder_core::enums::TileObjectType;

/// One obstacle check: occupants of `types` in the tile at `offset` from the
/// spreading hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occluder {
    pub offset: IVec3,
    pub types: &'static [TileObjectType],
}

/// Neighbour directions hazards can spread in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadDirection {
    Up,
    Down,
    North,
    South,
    West,
    East,
    NorthWest,
    SouthEast,
    NorthEast,
    SouthWest,
}

const GROUND: &[TileObjectType] = &[TileObjectType::Ground];
const FEATURE: &[TileObjectType] = &[TileObjectType::Feature];
const LEFT_WALL: &[TileObjectType] = &[TileObjectType::LeftWall];
const RIGHT_WALL: &[TileObjectType] = &[TileObjectType::RightWall];

const fn occluder(x: i32, y: i32, z: i32, types: &'static [TileObjectType]) -> Occluder {
    Occluder {
        offset: IVec3::new(x, y, z),
        types,
    }
}

const UP: &[Occluder] = &[occluder(0, 0, 1, GROUND)];
const DOWN: &[Occluder] = &[occluder(0, 0, 0, GROUND)];
const NORTH: &[Occluder] = &[occluder(0, 0, 0, RIGHT_WALL)];
const SOUTH: &[Occluder] = &[occluder(0, 1, 0, RIGHT_WALL)];
const WEST: &[Occluder] = &[occluder(0, 0, 0, LEFT_WALL)];
const EAST: &[Occluder] = &[occluder(1, 0, 0, LEFT_WALL)];
const NORTH_WEST: &[Occluder] = &[
    occluder(-1, 0, 0, FEATURE),
    occluder(0, -1, 0, FEATURE),
    occluder(-1, 0, 0, RIGHT_WALL),
    occluder(0, -1, 0, LEFT_WALL),
    occluder(0, 0, 0, RIGHT_WALL),
    occluder(0, 0, 0, LEFT_WALL),
];
const SOUTH_EAST: &[Occluder] = &[
    occluder(0, 1, 0, FEATURE),
    occluder(1, 0, 0, FEATURE),
    occluder(0, 1, 0, RIGHT_WALL),
    occluder(1, 0, 0, LEFT_WALL),
    occluder(1, 1, 0, RIGHT_WALL),
    occluder(1, 1, 0, LEFT_WALL),
];
const NORTH_EAST: &[Occluder] = &[
    occluder(1, 0, 0, FEATURE),
    occluder(0, -1, 0, FEATURE),
    occluder(0, 0, 0, RIGHT_WALL),
    occluder(1, -1, 0, LEFT_WALL),
    occluder(1, 0, 0, RIGHT_WALL),
    occluder(1, 0, 0, LEFT_WALL),
];
const SOUTH_WEST: &[Occluder] = &[
    occluder(-1, 0, 0, FEATURE),
    occluder(0, 1, 0, FEATURE),
    occluder(-1, 1, 0, RIGHT_WALL),
    occluder(0, 0, 0, LEFT_WALL),
    occluder(0, 1, 0, RIGHT_WALL),
    occluder(0, 1, 0, LEFT_WALL),
];

impl SpreadDirection {
    pub const ALL: [SpreadDirection; 10] = [
        SpreadDirection::Up,
        SpreadDirection::Down,
        SpreadDirection::North,
        SpreadDirection::South,
        SpreadDirection::West,
        SpreadDirection::East,
        SpreadDirection::NorthWest,
        SpreadDirection::SouthEast,
        SpreadDirection::NorthEast,
        SpreadDirection::SouthWest,
    ];

    /// Direction of a unit neighbour offset. None for the zero offset,
    /// vertical diagonals and anything further than one tile.
    pub fn from_offset(offset: IVec3) -> Option<Self> {
        let direction = match (offset.x, offset.y, offset.z) {
            (0, 0, 1) => SpreadDirection::Up,
            (0, 0, -1) => SpreadDirection::Down,
            (0, -1, 0) => SpreadDirection::North,
            (0, 1, 0) => SpreadDirection::South,
            (-1, 0, 0) => SpreadDirection::West,
            (1, 0, 0) => SpreadDirection::East,
            (-1, -1, 0) => SpreadDirection::NorthWest,
            (1, 1, 0) => SpreadDirection::SouthEast,
            (1, -1, 0) => SpreadDirection::NorthEast,
            (-1, 1, 0) => SpreadDirection::SouthWest,
            _ => return None,
        };
        Some(direction)
    }

    pub fn offset(self) -> IVec3 {
        match self {
            SpreadDirection::Up => IVec3::new(0, 0, 1),
            SpreadDirection::Down => IVec3::new(0, 0, -1),
            SpreadDirection::North => IVec3::new(0, -1, 0),
            SpreadDirection::South => IVec3::new(0, 1, 0),
            SpreadDirection::West => IVec3::new(-1, 0, 0),
            SpreadDirection::East => IVec3::new(1, 0, 0),
            SpreadDirection::NorthWest => IVec3::new(-1, -1, 0),
            SpreadDirection::SouthEast => IVec3::new(1, 1, 0),
            SpreadDirection::NorthEast => IVec3::new(1, -1, 0),
            SpreadDirection::SouthWest => IVec3::new(-1, 1, 0),
        }
    }

    /// Obstacles between the source tile and its neighbour in this direction.
    pub fn occluders(self) -> &'static [Occluder] {
        match self {
            SpreadDirection::Up => UP,
            SpreadDirection::Down => DOWN,
            SpreadDirection::North => NORTH,
            SpreadDirection::South => SOUTH,
            SpreadDirection::West => WEST,
            SpreadDirection::East => EAST,
            SpreadDirection::NorthWest => NORTH_WEST,
            SpreadDirection::SouthEast => SOUTH_EAST,
            SpreadDirection::NorthEast => NORTH_EAST,
            SpreadDirection::SouthWest => SOUTH_WEST,
        }
    }
}
