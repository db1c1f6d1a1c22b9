//! Damage resolution against map parts and units.

use std::sync::Arc;

use glam::Vec3;
use hecs::Entity;

use cinder_core::catalog::{DamageTypeId, MapPartType};
use cinder_core::components::{MapPart, Unit};
use cinder_core::constants::*;
use cinder_core::enums::{BodyPart, DamageSource, EffectType};
use cinder_core::events::HazardEvent;
use cinder_core::types::tile_of;
use cinder_map::TileObject;

use crate::battle::Battle;

/// Whether a part still has fuel to feed a fire.
pub fn can_burn(part: &MapPart, part_type: &MapPartType) -> bool {
    part_type.burn_time > 0 && part.fuel > 0
}

/// Burn one step of a map part's fuel. The part is destroyed when the fuel
/// runs out. Returns whether fuel was provided.
pub fn apply_burning(battle: &mut Battle, entity: Entity) -> bool {
    let catalog = Arc::clone(battle.catalog());
    let (position, kind, exhausted) = {
        let Ok(mut part) = battle.world.get::<&mut MapPart>(entity) else {
            return false;
        };
        if !can_burn(&part, catalog.map_part_type(part.part_type)) {
            return false;
        }
        part.burning = true;
        part.fuel -= 1;
        (part.position, part.kind, part.fuel <= 0)
    };

    battle.push_event(HazardEvent::MapPartBurned { position, kind });
    if exhausted {
        destroy_map_part(battle, entity);
    }
    true
}

/// Apply hazard damage to a map part. Smoke and stun leave geometry alone.
/// Returns whether the part was destroyed.
pub fn apply_map_part_damage(
    battle: &mut Battle,
    entity: Entity,
    power: i32,
    damage_type: DamageTypeId,
) -> bool {
    let catalog = Arc::clone(battle.catalog());
    match catalog.damage_type(damage_type).effect {
        EffectType::Smoke | EffectType::Stun => return false,
        EffectType::Generic | EffectType::Fire => {}
    }
    let destroyed = {
        let Ok(mut part) = battle.world.get::<&mut MapPart>(entity) else {
            return false;
        };
        let constitution = catalog.map_part_type(part.part_type).constitution;
        part.health -= (power - constitution).max(0);
        part.health <= 0
    };
    if destroyed {
        destroy_map_part(battle, entity);
    }
    destroyed
}

/// Detach a map part from its tile and despawn it. Returns its final state.
pub fn destroy_map_part(battle: &mut Battle, entity: Entity) -> Option<MapPart> {
    let part = battle.world.remove_one::<MapPart>(entity).ok()?;
    battle
        .map
        .remove_object(part.position, TileObject::map_part(part.kind, entity));
    let _ = battle.world.despawn(entity);
    log::debug!("{:?} at {} destroyed", part.kind, part.position);
    battle.push_event(HazardEvent::MapPartDestroyed {
        position: part.position,
        kind: part.kind,
    });
    Some(part)
}

/// Body part hit by an impact at `impact`, judged by its height above the
/// unit's feet relative to the unit's current height.
pub fn determine_body_part_hit(unit: &Unit, impact: Vec3) -> BodyPart {
    let height = unit.current_height.max(1) as f32 / VOXELS_PER_TILE_Z;
    let fraction = (impact.z - unit.position.z) / height;
    if fraction >= HEAD_HIT_FRACTION {
        BodyPart::Head
    } else if fraction >= BODY_HIT_FRACTION {
        BodyPart::Body
    } else {
        BodyPart::Legs
    }
}

/// Apply damage to one body part of a unit. Stun accumulates instead of
/// wounding. A unit dies once any body part runs out of health. Returns the
/// health lost.
pub fn apply_unit_damage(
    battle: &mut Battle,
    entity: Entity,
    power: i32,
    damage_type: DamageTypeId,
    part: BodyPart,
    source: DamageSource,
) -> i32 {
    let effect = battle.catalog().damage_type(damage_type).effect;
    let (position, dealt, killed) = {
        let Ok(mut unit) = battle.world.get::<&mut Unit>(entity) else {
            return 0;
        };
        let dealt = match effect {
            EffectType::Stun => {
                unit.stun += power.max(0);
                0
            }
            EffectType::Generic | EffectType::Fire | EffectType::Smoke => {
                let dealt = (power - unit.armour[part.index()]).max(0);
                unit.health[part.index()] -= dealt;
                dealt
            }
        };
        let killed = unit.health.iter().any(|health| *health <= 0);
        (tile_of(unit.position), dealt, killed)
    };

    battle.push_event(HazardEvent::UnitHit {
        position,
        part,
        damage: dealt,
        source,
    });
    if killed {
        kill_unit(battle, entity);
    }
    dealt
}

/// Detach a unit from the map and despawn it. Returns its final state.
pub fn kill_unit(battle: &mut Battle, entity: Entity) -> Option<Unit> {
    let unit = battle.world.remove_one::<Unit>(entity).ok()?;
    let position = tile_of(unit.position);
    battle.map.remove_object(position, TileObject::Unit(entity));
    let _ = battle.world.despawn(entity);
    log::debug!("unit at {position} killed");
    battle.push_event(HazardEvent::UnitKilled { position });
    Some(unit)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::IVec3;

    use cinder_core::catalog::Catalog;

    use super::*;

    fn battle() -> Battle {
        Battle::new(IVec3::new(3, 3, 2), Arc::new(Catalog::standard()), 16)
    }

    fn unit_at(position: Vec3, height: i32) -> Unit {
        Unit {
            position,
            current_height: height,
            health: [10; 3],
            stun: 0,
            armour: [0; 3],
        }
    }

    #[test]
    fn test_body_part_by_impact_height() {
        let unit = unit_at(Vec3::new(1.5, 1.5, 0.0), 40);
        assert_eq!(determine_body_part_hit(&unit, Vec3::new(1.5, 1.5, 1.0)), BodyPart::Head);
        assert_eq!(determine_body_part_hit(&unit, Vec3::new(1.5, 1.5, 0.5)), BodyPart::Body);
        assert_eq!(determine_body_part_hit(&unit, Vec3::new(1.5, 1.5, 0.0)), BodyPart::Legs);

        let crouching = unit_at(Vec3::new(0.5, 0.5, 1.0), 20);
        assert_eq!(
            determine_body_part_hit(&crouching, Vec3::new(0.5, 0.5, 1.5)),
            BodyPart::Head
        );
    }

    #[test]
    fn test_burning_consumes_fuel_then_destroys() {
        let mut battle = battle();
        let crate_part = battle.catalog().map_part_type_id("FEATURE_CRATE").unwrap();
        let pos = IVec3::new(1, 1, 0);
        let entity = battle.spawn_map_part(crate_part, pos).unwrap();

        for _ in 0..7 {
            assert!(apply_burning(&mut battle, entity));
        }
        let part = (*battle.world.get::<&MapPart>(entity).unwrap()).clone();
        assert!(part.burning);
        assert_eq!(part.fuel, 1);

        assert!(apply_burning(&mut battle, entity));
        assert!(battle.world.get::<&MapPart>(entity).is_err());
        assert!(battle.map.tile(pos).unwrap().owned_objects().is_empty());
        assert!(!apply_burning(&mut battle, entity));
    }

    #[test]
    fn test_incombustible_part_provides_no_fuel() {
        let mut battle = battle();
        let concrete = battle.catalog().map_part_type_id("GROUND_CONCRETE").unwrap();
        let entity = battle.spawn_map_part(concrete, IVec3::ZERO).unwrap();
        assert!(!apply_burning(&mut battle, entity));
        assert!(!battle.world.get::<&MapPart>(entity).unwrap().burning);
    }

    #[test]
    fn test_map_part_damage_absorbs_constitution() {
        let mut battle = battle();
        let catalog = Arc::clone(battle.catalog());
        let grass = catalog.map_part_type_id("GROUND_GRASS").unwrap();
        let gas = catalog.damage_type_id("DAMAGETYPE_ALIEN_GAS").unwrap();
        let stun = catalog.damage_type_id("DAMAGETYPE_STUN_GAS").unwrap();
        let entity = battle.spawn_map_part(grass, IVec3::ZERO).unwrap();

        assert!(!apply_map_part_damage(&mut battle, entity, 15, gas));
        assert_eq!(battle.world.get::<&MapPart>(entity).unwrap().health, 20);
        assert!(!apply_map_part_damage(&mut battle, entity, 500, stun));
        assert!(!apply_map_part_damage(&mut battle, entity, 30, gas));
        assert_eq!(battle.world.get::<&MapPart>(entity).unwrap().health, 10);
        assert!(apply_map_part_damage(&mut battle, entity, 30, gas));
        assert!(battle.world.get::<&MapPart>(entity).is_err());
    }

    #[test]
    fn test_unit_damage_stun_and_death() {
        let mut battle = battle();
        let catalog = Arc::clone(battle.catalog());
        let gas = catalog.damage_type_id("DAMAGETYPE_ALIEN_GAS").unwrap();
        let stun = catalog.damage_type_id("DAMAGETYPE_STUN_GAS").unwrap();
        let entity = battle
            .spawn_unit(Vec3::new(1.5, 1.5, 0.0), 40, 10, [2, 4, 6])
            .unwrap();

        let dealt = apply_unit_damage(&mut battle, entity, 7, stun, BodyPart::Head, DamageSource::Hazard);
        assert_eq!(dealt, 0);
        assert_eq!(battle.world.get::<&Unit>(entity).unwrap().stun, 7);

        let dealt = apply_unit_damage(&mut battle, entity, 5, gas, BodyPart::Legs, DamageSource::Hazard);
        assert_eq!(dealt, 0);
        let dealt = apply_unit_damage(&mut battle, entity, 8, gas, BodyPart::Body, DamageSource::Hazard);
        assert_eq!(dealt, 4);
        assert_eq!(battle.world.get::<&Unit>(entity).unwrap().health, [10, 6, 10]);

        apply_unit_damage(&mut battle, entity, 20, gas, BodyPart::Head, DamageSource::Hazard);
        assert!(battle.world.get::<&Unit>(entity).is_err());
        assert!(battle
            .map
            .tile(IVec3::new(1, 1, 0))
            .unwrap()
            .owned_objects()
            .is_empty());
        let events = battle.take_events();
        assert!(matches!(events.last(), Some(HazardEvent::UnitKilled { .. })));
    }
}
