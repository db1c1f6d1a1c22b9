//! Battlefield tile map for CINDER.
//!
//! The voxel grid, its typed occupant sets, and the directional
//! occlusion table hazard spread reads.

pub use cinder_core as core;

pub mod grid;
pub mod search;

// Re-export key types for convenience.
pub use grid::{Tile, TileMap, TileObject};
pub use search::{Occluder, SpreadDirection};
