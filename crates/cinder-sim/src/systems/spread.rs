//! Hazard spread into neighbouring tiles.
//!
//! A spread attempt goes from the hazard's tile into one neighbour. Geometry
//! between the two tiles resists the attempt with the block value of the
//! spreading damage type's category; the hazard gets through only with more
//! power than the strongest obstacle. Fire does not spread itself directly:
//! it ignites burnable ground or features it can penetrate, and it exhales
//! smoke.

use std::sync::Arc;

use glam::IVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cinder_core::components::{Hazard, MapPart};
use cinder_core::constants::*;
use cinder_core::events::HazardEvent;
use cinder_map::{SpreadDirection, TileObject};

use crate::battle::Battle;
use crate::systems::{damage, hazard};

/// Fire resist a fire of this age can burn through.
pub fn penetrative_power(age: i32) -> i32 {
    let power = PENETRATION_BASE * 2.0f32.powf(PENETRATION_EXPONENT - age as f32 / 10.0);
    power.min(MAX_PENETRATIVE_POWER as f32) as i32
}

/// Strongest resistance of the geometry between the source tile and its
/// neighbour in `direction`, for the given block category.
pub fn occlusion(battle: &Battle, source: IVec3, direction: SpreadDirection, block_type: usize) -> i32 {
    let catalog = battle.catalog();
    let mut block = 0;
    for occluder in direction.occluders() {
        let Some(tile) = battle.map.tile(source + occluder.offset) else {
            continue;
        };
        for object in tile.owned_objects() {
            if !occluder.types.contains(&object.object_type()) {
                continue;
            }
            let Some(entity) = object.map_part_entity() else {
                continue;
            };
            if let Ok(part) = battle.world.get::<&MapPart>(entity) {
                block = block.max(catalog.map_part_type(part.part_type).block[block_type]);
            }
        }
    }
    block
}

/// Whether a fire of `penetration` can ignite the tile at `position`.
///
/// Only the first ground or feature occupant is considered.
fn ignitable(battle: &Battle, position: IVec3, penetration: i32) -> bool {
    let Some(tile) = battle.map.tile(position) else {
        return false;
    };
    let first = tile.owned_objects().iter().find_map(|object| match object {
        TileObject::Ground(e) | TileObject::Feature(e) => Some(*e),
        TileObject::LeftWall(_)
        | TileObject::RightWall(_)
        | TileObject::Unit(_)
        | TileObject::Hazard(_) => None,
    });
    let Some(entity) = first else {
        return false;
    };
    let Ok(part) = battle.world.get::<&MapPart>(entity) else {
        return false;
    };
    let part_type = battle.catalog().map_part_type(part.part_type);
    penetration > part_type.fire_resist && damage::can_burn(&part, part_type)
}

/// Try to spread `source` into the tile at `to`.
///
/// `fire_smoke` makes a fire exhale smoke instead of spreading flames.
/// Returns whether the spread was accepted: a new hazard placed, an ignition
/// attempted, or a weaker hazard of the same type rejuvenated.
pub fn expand(
    battle: &mut Battle,
    rng: &mut ChaCha8Rng,
    source: &Hazard,
    to: IVec3,
    ttl: i32,
    fire_smoke: bool,
) -> bool {
    if !battle.map.in_bounds(to) {
        return false;
    }
    let catalog = Arc::clone(battle.catalog());
    let fire = catalog.hazard_type(source.hazard_type).fire;

    let (spread_type, ttl) = if fire_smoke {
        let smoke = catalog.smoke();
        (smoke, hazard::smoke_lifetime(&catalog, rng))
    } else {
        (source.damage_type, ttl)
    };

    let mut replace_weaker = None;
    if let Some(existing) = battle.hazard_at(to) {
        let weaker = battle.world.get::<&Hazard>(existing).is_ok_and(|incumbent| {
            incumbent.damage_type == spread_type
                && !fire
                && incumbent.lifetime - incumbent.age < ttl
        });
        if !weaker {
            return false;
        }
        replace_weaker = Some(existing);
    }

    let Some(direction) = SpreadDirection::from_offset(to - source.position) else {
        return false;
    };
    let block_type = catalog.damage_type(spread_type).block_type;
    let block = occlusion(battle, source.position, direction, block_type);
    if (fire && !fire_smoke && block == FULL_BLOCK) || source.power.magnitude() <= block {
        log::trace!(
            "spread from {} to {to} blocked ({} vs {block})",
            source.position,
            source.power.magnitude()
        );
        return false;
    }

    if let Some(existing) = replace_weaker {
        if let Ok(mut incumbent) = battle.world.get::<&mut Hazard>(existing) {
            incumbent.lifetime = source.lifetime;
            incumbent.age = source.age;
            incumbent.ticks_until_visible = 0;
        }
        log::debug!("rejuvenated {} at {to}", catalog.damage_type(spread_type).name);
        battle.push_event(HazardEvent::Rejuvenated {
            position: to,
            damage_type: spread_type,
        });
        return true;
    }

    if fire && !fire_smoke {
        let penetration = penetrative_power(source.age);
        if ignitable(battle, to, penetration) {
            let lifetime = catalog
                .hazard_type_of(spread_type)
                .map_or(1, |hazard_type| hazard::roll_lifetime(hazard_type, rng));
            log::debug!("fire at {} ignites {to}", source.position);
            battle.place_hazard(rng, spread_type, to, lifetime, 0, 1, false);
        }
    } else if fire_smoke {
        battle.place_hazard(
            rng,
            spread_type,
            to,
            ttl,
            SMOKE_EXHAUST_POWER,
            SMOKE_EXHAUST_DIVISOR,
            false,
        );
    } else if let Some(placed) = battle.place_hazard(
        rng,
        spread_type,
        to,
        source.lifetime,
        source.power.signed(),
        1,
        false,
    ) {
        if let Ok(mut spawned) = battle.world.get::<&mut Hazard>(placed) {
            spawned.age = source.age;
        }
    }
    true
}

/// Lateral 3x3 neighbourhood (x outer, y inner), then the vertical column.
fn neighbourhood(position: IVec3) -> impl Iterator<Item = IVec3> {
    let lateral = (-1..=1).flat_map(move |dx| {
        (-1..=1).map(move |dy| IVec3::new(position.x + dx, position.y + dy, position.z))
    });
    let column = (-1..=1).map(move |dz| IVec3::new(position.x, position.y, position.z + dz));
    lateral.chain(column)
}

/// Spread `source` into its neighbourhood for one logic step.
///
/// Fire tries every neighbour, then sometimes exhales smoke into the first
/// neighbour that accepts it. Other hazards sometimes spread, into the first
/// neighbour that accepts them.
pub fn grow(battle: &mut Battle, rng: &mut ChaCha8Rng, source: &Hazard) {
    let fire = battle.catalog().hazard_type(source.hazard_type).fire;
    if fire {
        for to in neighbourhood(source.position) {
            expand(battle, rng, source, to, 0, false);
        }
        if rng.gen_range(0..100) >= HAZARD_SPREAD_CHANCE {
            return;
        }
        for to in neighbourhood(source.position) {
            if expand(battle, rng, source, to, 0, true) {
                return;
            }
        }
    } else {
        if source.power.magnitude() == 0 {
            return;
        }
        if rng.gen_range(0..100) >= HAZARD_SPREAD_CHANCE {
            return;
        }
        let ttl = source.lifetime - source.age;
        for to in neighbourhood(source.position) {
            if expand(battle, rng, source, to, ttl, false) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use cinder_core::catalog::Catalog;

    use super::*;

    fn battle() -> (Battle, ChaCha8Rng) {
        let battle = Battle::new(IVec3::new(4, 4, 3), Arc::new(Catalog::standard()), 64);
        (battle, ChaCha8Rng::seed_from_u64(11))
    }

    #[test]
    fn test_penetrative_power_curve() {
        assert_eq!(penetrative_power(0), 255);
        assert_eq!(penetrative_power(-30), 255);
        assert_eq!(penetrative_power(30), 192);
        assert_eq!(penetrative_power(60), 24);
        assert_eq!(penetrative_power(90), 3);
        assert!(penetrative_power(110) < penetrative_power(100));
    }

    #[test]
    fn test_neighbourhood_order() {
        let cells: Vec<IVec3> = neighbourhood(IVec3::new(1, 1, 1)).collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], IVec3::new(0, 0, 1));
        assert_eq!(cells[1], IVec3::new(0, 1, 1));
        assert_eq!(cells[8], IVec3::new(2, 2, 1));
        assert_eq!(cells[9], IVec3::new(1, 1, 0));
        assert_eq!(cells[11], IVec3::new(1, 1, 2));
    }

    #[test]
    fn test_occlusion_takes_strongest_matching_part() {
        let (mut battle, _) = battle();
        let catalog = Arc::clone(battle.catalog());
        let brick = catalog.map_part_type_id("WALL_BRICK_LEFT").unwrap();
        let crate_part = catalog.map_part_type_id("FEATURE_CRATE").unwrap();
        battle.spawn_map_part(brick, IVec3::new(2, 1, 0)).unwrap();
        battle.spawn_map_part(crate_part, IVec3::new(2, 1, 0)).unwrap();

        let source = IVec3::new(1, 1, 0);
        // The feature does not count for direct east spread.
        assert_eq!(occlusion(&battle, source, SpreadDirection::East, BLOCK_EXPLOSIVE), 100);
        assert_eq!(occlusion(&battle, source, SpreadDirection::West, BLOCK_EXPLOSIVE), 0);
        // Diagonals see features next to the path.
        assert_eq!(occlusion(&battle, source, SpreadDirection::SouthEast, BLOCK_SMOKE), 255);
        assert_eq!(occlusion(&battle, source, SpreadDirection::NorthEast, BLOCK_FIRE), 255);
    }

    #[test]
    fn test_occlusion_ignores_destroyed_parts() {
        let (mut battle, _) = battle();
        let crate_part = battle.catalog().map_part_type_id("FEATURE_CRATE").unwrap();
        let entity = battle.spawn_map_part(crate_part, IVec3::new(0, 1, 0)).unwrap();
        let source = IVec3::new(1, 1, 0);
        assert_eq!(occlusion(&battle, source, SpreadDirection::NorthWest, BLOCK_GAS), 8);
        damage::destroy_map_part(&mut battle, entity);
        assert_eq!(occlusion(&battle, source, SpreadDirection::NorthWest, BLOCK_GAS), 0);
    }
}
