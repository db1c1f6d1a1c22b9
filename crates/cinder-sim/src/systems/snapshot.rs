//! Snapshot system: builds a BattleSnapshot from the battle state.
//!
//! This system is read-only. The caller drains the vision-refresh queue and
//! the event log and hands them in.

use glam::IVec3;

use cinder_core::components::{MapPart, Unit};
use cinder_core::events::HazardEvent;
use cinder_core::state::{BattleSnapshot, HazardView};
use cinder_core::types::SimTime;

use crate::battle::Battle;
use crate::systems::hazard;

/// Build a complete BattleSnapshot of the current battle.
pub fn build_snapshot(
    battle: &Battle,
    time: &SimTime,
    vision_refresh: Vec<IVec3>,
    events: Vec<HazardEvent>,
) -> BattleSnapshot {
    BattleSnapshot {
        time: *time,
        hazards: build_hazards(battle),
        vision_refresh,
        events,
        units_alive: battle.world.query::<&Unit>().iter().count() as u32,
        map_parts_intact: battle.world.query::<&MapPart>().iter().count() as u32,
    }
}

/// HazardView list in placement order.
fn build_hazards(battle: &Battle) -> Vec<HazardView> {
    let catalog = battle.catalog();
    battle
        .hazards()
        .iter()
        .filter_map(|entity| battle.hazard(*entity))
        .map(|h| {
            let fire = catalog.hazard_type(h.hazard_type).fire;
            HazardView {
                position: h.position,
                damage_type: h.damage_type,
                power: h.power.signed(),
                age: h.age,
                lifetime: h.lifetime,
                frame: h.frame,
                state: hazard::state_of(&h, fire),
            }
        })
        .collect()
}
