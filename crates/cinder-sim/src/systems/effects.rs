//! Effect application: a hazard acting on everything sharing its tile.

use std::sync::Arc;

use glam::{IVec3, Vec3};

use cinder_core::components::{Hazard, Unit};
use cinder_core::constants::*;
use cinder_core::enums::{DamageSource, EffectType};
use cinder_core::types::tile_centre;
use cinder_map::TileObject;

use crate::battle::Battle;
use crate::systems::damage;

/// Where a hazard in `hazard_tile` strikes a unit standing at `unit_position`.
///
/// A unit beside the hazard's centre is hit in the torso, one above it in
/// the legs, one below it in the head.
pub fn impact_point(hazard_tile: IVec3, unit_position: Vec3, current_height: i32) -> Vec3 {
    let mut direction = unit_position - tile_centre(hazard_tile);
    if direction.x == 0.0 && direction.y == 0.0 {
        direction.z = 1.0;
    }
    let height = current_height as f32 / VOXELS_PER_TILE_Z;
    let mut impact = unit_position;
    if direction.truncate().length() > direction.z.abs() {
        impact.z += height / 2.0;
    } else if direction.z < 0.0 {
        impact.z += height;
    }
    impact
}

/// Apply one step of the hazard's effect to its tile's occupants.
///
/// Occupants destroyed or moved out earlier in the pass are skipped. A
/// waning fire fed by burning geometry flares up again.
pub fn apply_effect(battle: &mut Battle, hazard: &mut Hazard) {
    let catalog = Arc::clone(battle.catalog());
    let effect = catalog.damage_type(hazard.damage_type).effect;
    let power = hazard.power.magnitude();

    for object in battle.map.snapshot_objects(hazard.position) {
        if !battle.map.contains_object(hazard.position, &object) {
            continue;
        }
        match object {
            TileObject::Ground(e)
            | TileObject::Feature(e)
            | TileObject::LeftWall(e)
            | TileObject::RightWall(e) => match effect {
                EffectType::Fire => {
                    if damage::apply_burning(battle, e)
                        && hazard.power.is_waning()
                        && hazard.age > FIRE_PHASE_FLIP_AGE
                    {
                        log::trace!("fire at {} fed by burning geometry", hazard.position);
                        hazard.power = hazard.power.rekindle();
                    }
                }
                EffectType::Generic | EffectType::Smoke | EffectType::Stun => {
                    damage::apply_map_part_damage(battle, e, power, hazard.damage_type);
                }
            },
            TileObject::Unit(e) => {
                let Some(unit) = battle.world.get::<&Unit>(e).ok().map(|u| (*u).clone()) else {
                    continue;
                };
                let impact = impact_point(hazard.position, unit.position, unit.current_height);
                let part = damage::determine_body_part_hit(&unit, impact);
                damage::apply_unit_damage(
                    battle,
                    e,
                    power,
                    hazard.damage_type,
                    part,
                    DamageSource::Hazard,
                );
            }
            TileObject::Hazard(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use cinder_core::catalog::Catalog;
    use cinder_core::enums::BodyPart;
    use cinder_core::types::HazardPower;

    use super::*;

    fn fire_at(battle: &Battle, position: IVec3, power: HazardPower, age: i32) -> Hazard {
        let incendiary = battle.catalog().damage_type_id("DAMAGETYPE_INCENDIARY").unwrap();
        Hazard {
            damage_type: incendiary,
            hazard_type: battle.catalog().damage_type(incendiary).hazard_type.unwrap(),
            position,
            power,
            age,
            lifetime: 1,
            frame: 0,
            ticks_until_next_frame_change: 1,
            ticks_until_next_update: 1,
            ticks_until_visible: 0,
        }
    }

    #[test]
    fn test_impact_point_by_relative_position() {
        let tile = IVec3::new(2, 2, 0);
        // Standing in the tile centre: treated as hit from below.
        let centre = Vec3::new(2.5, 2.5, 0.0);
        assert_eq!(impact_point(tile, centre, 40), centre);

        // Off to the side: torso.
        let beside = Vec3::new(2.9, 2.5, 0.3);
        assert!((impact_point(tile, beside, 40).z - 0.8).abs() < 1e-6);

        // Directly under the hazard's centre: head.
        let below = Vec3::new(2.5, 2.6, 0.0);
        assert_eq!(impact_point(tile, below, 40).z, 1.0);
    }

    #[test]
    fn test_fire_burns_geometry_and_rekindles() {
        let mut battle = Battle::new(IVec3::splat(3), Arc::new(Catalog::standard()), 16);
        let grass = battle.catalog().map_part_type_id("GROUND_GRASS").unwrap();
        let pos = IVec3::new(1, 1, 0);
        let ground = battle.spawn_map_part(grass, pos).unwrap();

        let mut fire = fire_at(&battle, pos, HazardPower::Waning(5), 40);
        apply_effect(&mut battle, &mut fire);
        assert_eq!(fire.power, HazardPower::Growing(5));
        let part = battle.world.get::<&cinder_core::components::MapPart>(ground).unwrap();
        assert!(part.burning);
        assert_eq!(part.fuel, 5);
    }

    #[test]
    fn test_young_waning_fire_is_not_rekindled() {
        let mut battle = Battle::new(IVec3::splat(3), Arc::new(Catalog::standard()), 16);
        let grass = battle.catalog().map_part_type_id("GROUND_GRASS").unwrap();
        let pos = IVec3::new(1, 1, 0);
        battle.spawn_map_part(grass, pos).unwrap();

        let mut fire = fire_at(&battle, pos, HazardPower::Waning(5), FIRE_PHASE_FLIP_AGE);
        apply_effect(&mut battle, &mut fire);
        assert_eq!(fire.power, HazardPower::Waning(5));
    }

    #[test]
    fn test_fire_wounds_unit_sharing_tile() {
        let mut battle = Battle::new(IVec3::splat(3), Arc::new(Catalog::standard()), 16);
        let pos = IVec3::new(1, 1, 0);
        let unit = battle
            .spawn_unit(Vec3::new(1.9, 1.5, 0.4), 40, 50, [1, 2, 3])
            .unwrap();

        let mut fire = fire_at(&battle, pos, HazardPower::Waning(9), 50);
        apply_effect(&mut battle, &mut fire);
        assert_eq!(battle.world.get::<&Unit>(unit).unwrap().health, [50, 43, 50]);
        let hit = battle.take_events().into_iter().find_map(|event| match event {
            cinder_core::events::HazardEvent::UnitHit { part, damage, .. } => Some((part, damage)),
            _ => None,
        });
        assert_eq!(hit, Some((BodyPart::Body, 7)));
    }
}
