//! Battle state snapshot: the visible hazard state handed out after each tick.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::catalog::DamageTypeId;
use crate::enums::HazardState;
use crate::events::HazardEvent;
use crate::types::SimTime;

/// Complete hazard state after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub time: SimTime,
    pub hazards: Vec<HazardView>,
    /// Tiles whose vision blockage changed and need line-of-sight refresh.
    pub vision_refresh: Vec<IVec3>,
    pub events: Vec<HazardEvent>,
    pub units_alive: u32,
    pub map_parts_intact: u32,
}

/// A hazard as presented to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardView {
    pub position: IVec3,
    pub damage_type: DamageTypeId,
    /// Signed power (negative for waning fire).
    pub power: i32,
    pub age: i32,
    pub lifetime: i32,
    pub frame: u32,
    pub state: HazardState,
}
