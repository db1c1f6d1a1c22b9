//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems, not
//! components.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::catalog::{DamageTypeId, HazardTypeId, MapPartTypeId};
use crate::enums::*;
use crate::types::HazardPower;

/// A transient area effect occupying one tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub damage_type: DamageTypeId,
    /// Cached from the damage type at placement.
    pub hazard_type: HazardTypeId,
    /// Tile the hazard occupies. Never changes after placement.
    pub position: IVec3,
    pub power: HazardPower,
    /// Logic steps lived (fire: distance from ignition, see `HazardPower`).
    pub age: i32,
    /// Logic steps until a non-fire hazard expires.
    pub lifetime: i32,
    /// Current animation frame.
    pub frame: u32,
    pub ticks_until_next_frame_change: i32,
    pub ticks_until_next_update: i32,
    /// Remaining ticks before the hazard is drawn.
    pub ticks_until_visible: u32,
}

/// Battlefield geometry: ground, wall or feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPart {
    pub part_type: MapPartTypeId,
    /// Cached from the part type at spawn.
    pub kind: MapPartKind,
    pub position: IVec3,
    pub health: i32,
    pub burning: bool,
    /// Logic steps of fuel left.
    pub fuel: i32,
}

/// A soldier or creature standing on the battlefield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Feet position in tile units.
    pub position: Vec3,
    /// Current height in voxels (crouching units are shorter).
    pub current_height: i32,
    /// Health per body part, indexed by `BodyPart::index`.
    pub health: [i32; 3],
    pub stun: i32,
    /// Armour per body part, indexed by `BodyPart::index`.
    pub armour: [i32; 3],
}
