//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What a damage type does when applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    /// Plain damage.
    #[default]
    Generic,
    /// Burns map parts instead of damaging them.
    Fire,
    /// Obscures vision.
    Smoke,
    /// Accumulates stun on units instead of wounding them.
    Stun,
}

/// Kind of occupant a tile can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileObjectType {
    Ground,
    Feature,
    LeftWall,
    RightWall,
    Unit,
    Hazard,
}

/// Slot a map part occupies inside its tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapPartKind {
    Ground,
    Feature,
    LeftWall,
    RightWall,
}

impl MapPartKind {
    /// Tile object type of a map part in this slot.
    pub fn object_type(self) -> TileObjectType {
        match self {
            MapPartKind::Ground => TileObjectType::Ground,
            MapPartKind::Feature => TileObjectType::Feature,
            MapPartKind::LeftWall => TileObjectType::LeftWall,
            MapPartKind::RightWall => TileObjectType::RightWall,
        }
    }
}

/// Body location a unit is hit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    Body,
    Legs,
}

impl BodyPart {
    pub fn index(self) -> usize {
        match self {
            BodyPart::Head => 0,
            BodyPart::Body => 1,
            BodyPart::Legs => 2,
        }
    }
}

/// Origin of damage dealt to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Hazard,
}

/// Lifecycle state of a hazard instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardState {
    /// Placed with a visibility delay that has not run out yet.
    Invisible,
    /// Visible and simulating.
    #[default]
    Active,
    /// Expired during the current logic step, detach pending.
    Dying,
    /// Detached from the map and despawned.
    Removed,
}
