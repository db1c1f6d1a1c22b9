//! Vision blockage contributed by hazards.

use cinder_core::components::Hazard;
use cinder_core::constants::SMOKE_VISION_DIVISOR;
use cinder_core::enums::EffectType;

use crate::battle::Battle;

/// Line-of-sight reduction a hazard causes in its tile. Only smoke blocks
/// vision, thinning out as it ages.
pub fn vision_block_of(battle: &Battle, hazard: &Hazard) -> i32 {
    match battle.catalog().damage_type(hazard.damage_type).effect {
        EffectType::Smoke => ((hazard.lifetime - hazard.age) / SMOKE_VISION_DIVISOR).max(0),
        EffectType::Generic | EffectType::Fire | EffectType::Stun => 0,
    }
}

/// Store the hazard's vision blockage in its tile, queueing a line-of-sight
/// refresh if it changed.
pub fn update_tile_vision_block(battle: &mut Battle, hazard: &Hazard) {
    let value = vision_block_of(battle, hazard);
    if battle.map.update_vision_block(hazard.position, value) {
        log::trace!("vision block at {} is now {value}", hazard.position);
        battle.queue_vision_refresh(hazard.position);
    }
}
