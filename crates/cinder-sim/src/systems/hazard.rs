//! Hazard lifecycle: per-tick timers, the logic step state machine, and death.
//!
//! Fire and non-fire hazards share the timer handling but run different
//! logic steps. Non-fire hazards age by one per step and expire at their
//! lifetime. Fire walks its age down while growing and up while waning,
//! burning out at `FIRE_MAX_AGE`; fuel from burning map parts can rekindle a
//! waning fire and keep it alive.

use std::sync::Arc;

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cinder_core::catalog::{Catalog, HazardType};
use cinder_core::components::Hazard;
use cinder_core::constants::*;
use cinder_core::enums::{EffectType, HazardState};
use cinder_core::events::HazardEvent;

use crate::battle::Battle;
use crate::systems::{effects, spread, vision};

/// Roll a lifetime for a new hazard of this type.
pub fn roll_lifetime(hazard_type: &HazardType, rng: &mut ChaCha8Rng) -> i32 {
    rng.gen_range(hazard_type.min_lifetime..=hazard_type.max_lifetime)
}

/// Roll the lifetime of fire smoke.
pub fn smoke_lifetime(catalog: &Catalog, rng: &mut ChaCha8Rng) -> i32 {
    catalog
        .hazard_type_of(catalog.smoke())
        .map_or(0, |hazard_type| roll_lifetime(hazard_type, rng))
}

/// Lifecycle state of a live hazard.
pub fn state_of(hazard: &Hazard, fire: bool) -> HazardState {
    let expired = if fire {
        hazard.age >= FIRE_MAX_AGE
    } else {
        hazard.age >= hazard.lifetime
    };
    if expired {
        HazardState::Dying
    } else if hazard.ticks_until_visible > 0 {
        HazardState::Invisible
    } else {
        HazardState::Active
    }
}

/// Update every live hazard by `ticks`, in placement order.
///
/// Hazards placed during this pass start updating on the next one.
pub fn run(battle: &mut Battle, rng: &mut ChaCha8Rng, ticks: u32) {
    let live: Vec<Entity> = battle.hazards().to_vec();
    for entity in live {
        update(battle, rng, entity, ticks);
    }
}

/// Advance one hazard by `ticks`. Returns its state afterwards.
pub fn update(
    battle: &mut Battle,
    rng: &mut ChaCha8Rng,
    entity: Entity,
    ticks: u32,
) -> HazardState {
    // Destroyed earlier in this pass.
    let Some(mut hazard) = battle.hazard(entity) else {
        return HazardState::Removed;
    };
    let catalog = Arc::clone(battle.catalog());
    let fire = catalog.hazard_type(hazard.hazard_type).fire;

    hazard.ticks_until_visible = hazard.ticks_until_visible.saturating_sub(ticks);
    advance_frame(&mut hazard, fire, ticks);

    let mut expired = false;
    hazard.ticks_until_next_update -= ticks as i32;
    if hazard.ticks_until_next_update <= 0 {
        hazard.ticks_until_next_update += TICKS_PER_HAZARD_UPDATE;
        expired = if fire {
            fire_step(battle, rng, &mut hazard)
        } else {
            steady_step(battle, rng, &mut hazard)
        };
    }

    if let Ok(mut stored) = battle.world.get::<&mut Hazard>(entity) {
        *stored = hazard.clone();
    }

    if expired {
        die(battle, rng, entity, false);
        return HazardState::Removed;
    }
    state_of(&hazard, fire)
}

fn advance_frame(hazard: &mut Hazard, fire: bool, ticks: u32) {
    hazard.ticks_until_next_frame_change -= ticks as i32;
    if hazard.ticks_until_next_frame_change > 0 {
        return;
    }
    hazard.ticks_until_next_frame_change += TICKS_PER_HAZARD_UPDATE;
    hazard.frame = (hazard.frame + 1) % HAZARD_FRAME_COUNT;
    // No dying flames while a mature fire is still growing.
    if fire && hazard.power.is_growing() && hazard.age > FIRE_DYING_FRAME_AGE && hazard.frame > 1
    {
        hazard.frame = 0;
    }
}

/// One fire logic step. Returns whether the fire burnt out.
pub fn fire_step(battle: &mut Battle, rng: &mut ChaCha8Rng, hazard: &mut Hazard) -> bool {
    if hazard.power.is_growing() {
        hazard.age -= FIRE_GROWTH_AGE_STEP;
        if hazard.age <= FIRE_PHASE_FLIP_AGE {
            hazard.power = hazard.power.wane();
        }
    } else {
        hazard.age += FIRE_WANING_AGE_STEP;
    }
    hazard.power = hazard.power.drift();

    if hazard.power.is_odd() {
        effects::apply_effect(battle, hazard);
        if hazard.age < FIRE_MAX_AGE {
            spread::grow(battle, rng, hazard);
        }
    }
    hazard.age >= FIRE_MAX_AGE
}

/// One non-fire logic step. Returns whether the hazard expired.
pub fn steady_step(battle: &mut Battle, rng: &mut ChaCha8Rng, hazard: &mut Hazard) -> bool {
    hazard.age += 1;
    if hazard.age % 2 != 0 {
        effects::apply_effect(battle, hazard);
        vision::update_tile_vision_block(battle, hazard);
        if hazard.age < hazard.lifetime {
            spread::grow(battle, rng, hazard);
        }
    }
    hazard.age >= hazard.lifetime
}

/// Remove a hazard from the battle.
///
/// A fire that dies violently (put out, blown apart) leaves smoke behind.
/// Returns false if the hazard was not live.
pub fn die(battle: &mut Battle, rng: &mut ChaCha8Rng, entity: Entity, violently: bool) -> bool {
    let Some(hazard) = battle.remove_hazard(entity) else {
        return false;
    };
    let catalog = Arc::clone(battle.catalog());
    let damage_type = catalog.damage_type(hazard.damage_type);
    log::debug!(
        "{} at {} died{}",
        damage_type.name,
        hazard.position,
        if violently { " violently" } else { "" }
    );
    battle.push_event(HazardEvent::Died {
        position: hazard.position,
        damage_type: hazard.damage_type,
        violently,
    });

    if damage_type.effect == EffectType::Smoke
        && battle.map.update_vision_block(hazard.position, 0)
    {
        battle.queue_vision_refresh(hazard.position);
    }

    if violently && damage_type.effect == EffectType::Fire {
        let lifetime = smoke_lifetime(&catalog, rng);
        battle.place_hazard(
            rng,
            catalog.smoke(),
            hazard.position,
            lifetime,
            SMOKE_EXHAUST_POWER,
            SMOKE_EXHAUST_DIVISOR,
            false,
        );
    }
    true
}

#[cfg(test)]
mod tests {
    use glam::IVec3;
    use rand::SeedableRng;

    use cinder_core::types::HazardPower;

    use super::*;

    fn battle() -> (Battle, ChaCha8Rng) {
        let battle = Battle::new(IVec3::new(5, 5, 2), Arc::new(Catalog::standard()), 64);
        (battle, ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn test_frame_wraps_and_stays_in_range() {
        let (mut battle, mut rng) = battle();
        let gas = battle.catalog().damage_type_id("DAMAGETYPE_STUN_GAS").unwrap();
        let entity = battle
            .place_hazard(&mut rng, gas, IVec3::new(2, 2, 0), 1000, 0, 1, false)
            .unwrap();
        for _ in 0..40 {
            update(&mut battle, &mut rng, entity, 1);
            let hazard = battle.hazard(entity).unwrap();
            assert!(hazard.frame < HAZARD_FRAME_COUNT);
            assert!(hazard.ticks_until_next_frame_change > 0);
            assert!(hazard.ticks_until_next_update > 0);
        }
    }

    #[test]
    fn test_visibility_delay_counts_down_without_underflow() {
        let (mut battle, mut rng) = battle();
        let smoke = battle.catalog().smoke();
        let entity = battle
            .place_hazard(&mut rng, smoke, IVec3::new(1, 1, 0), 1000, 0, 1, true)
            .unwrap();
        let delay = battle.hazard(entity).unwrap().ticks_until_visible;
        assert_eq!(delay, (12 - HAZARD_VISIBILITY_LEAD_FRAMES) * TICKS_MULTIPLIER);

        assert_eq!(update(&mut battle, &mut rng, entity, 1), HazardState::Invisible);
        update(&mut battle, &mut rng, entity, delay * 2);
        assert_eq!(battle.hazard(entity).unwrap().ticks_until_visible, 0);
        assert_eq!(update(&mut battle, &mut rng, entity, 1), HazardState::Active);
    }

    #[test]
    fn test_mature_growing_fire_hides_dying_frames() {
        let mut hazard = Hazard {
            damage_type: cinder_core::catalog::DamageTypeId(0),
            hazard_type: cinder_core::catalog::HazardTypeId(0),
            position: IVec3::ZERO,
            power: HazardPower::Growing(3),
            age: 100,
            lifetime: 1,
            frame: 1,
            ticks_until_next_frame_change: 1,
            ticks_until_next_update: 100,
            ticks_until_visible: 0,
        };
        advance_frame(&mut hazard, true, 1);
        assert_eq!(hazard.frame, 0);

        hazard.power = HazardPower::Waning(3);
        hazard.frame = 1;
        hazard.ticks_until_next_frame_change = 1;
        advance_frame(&mut hazard, true, 1);
        assert_eq!(hazard.frame, 2);
    }

    #[test]
    fn test_state_of_reports_dying_once_expired() {
        let mut hazard = Hazard {
            damage_type: cinder_core::catalog::DamageTypeId(1),
            hazard_type: cinder_core::catalog::HazardTypeId(1),
            position: IVec3::ZERO,
            power: HazardPower::Steady(1),
            age: 9,
            lifetime: 10,
            frame: 0,
            ticks_until_next_frame_change: 1,
            ticks_until_next_update: 1,
            ticks_until_visible: 0,
        };
        assert_eq!(state_of(&hazard, false), HazardState::Active);
        hazard.age = 10;
        assert_eq!(state_of(&hazard, false), HazardState::Dying);
        // Fire ignores its lifetime.
        assert_eq!(state_of(&hazard, true), HazardState::Active);
        hazard.age = FIRE_MAX_AGE;
        assert_eq!(state_of(&hazard, true), HazardState::Dying);
    }

    #[test]
    fn test_die_twice_is_harmless() {
        let (mut battle, mut rng) = battle();
        let smoke = battle.catalog().smoke();
        let entity = battle
            .place_hazard(&mut rng, smoke, IVec3::new(1, 1, 1), 30, 1, 1, false)
            .unwrap();
        assert!(die(&mut battle, &mut rng, entity, false));
        assert!(!die(&mut battle, &mut rng, entity, true));
        assert!(battle.hazards().is_empty());
        assert_eq!(update(&mut battle, &mut rng, entity, 16), HazardState::Removed);
    }
}
