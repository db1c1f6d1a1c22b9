//! Battlefield builders: floors, walls, scattered features and soldiers.
//!
//! Part types are looked up by catalog name; an unknown name spawns nothing.

use glam::{IVec3, Vec3};
use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cinder_core::constants::*;
use cinder_core::types::tile_centre;

use crate::battle::Battle;

/// Cover a whole level with ground of the named type. Returns parts spawned.
pub fn lay_floor(battle: &mut Battle, part_name: &str, z: i32) -> usize {
    let Some(part_type) = battle.catalog().map_part_type_id(part_name) else {
        log::warn!("unknown map part type {part_name}");
        return 0;
    };
    let size = battle.map.size();
    let mut spawned = 0;
    for y in 0..size.y {
        for x in 0..size.x {
            if battle
                .spawn_map_part(part_type, IVec3::new(x, y, z))
                .is_some()
            {
                spawned += 1;
            }
        }
    }
    spawned
}

/// Build a straight wall of the named type from `start`, `length` tiles long.
///
/// Left walls run along y (they face west), right walls along x (they face
/// north). Returns parts spawned.
pub fn build_wall(battle: &mut Battle, part_name: &str, start: IVec3, length: i32) -> usize {
    let Some(part_type) = battle.catalog().map_part_type_id(part_name) else {
        log::warn!("unknown map part type {part_name}");
        return 0;
    };
    let step = match battle.catalog().map_part_type(part_type).kind {
        cinder_core::enums::MapPartKind::LeftWall => IVec3::Y,
        cinder_core::enums::MapPartKind::RightWall => IVec3::X,
        kind => {
            log::warn!("{part_name} is a {kind:?}, not a wall");
            return 0;
        }
    };
    (0..length)
        .filter(|i| battle.spawn_map_part(part_type, start + step * *i).is_some())
        .count()
}

/// Place up to `count` features of the named type on random free tiles of
/// level `z`. Returns parts spawned.
pub fn scatter_features(
    battle: &mut Battle,
    rng: &mut ChaCha8Rng,
    part_name: &str,
    z: i32,
    count: usize,
) -> usize {
    let Some(part_type) = battle.catalog().map_part_type_id(part_name) else {
        log::warn!("unknown map part type {part_name}");
        return 0;
    };
    let size = battle.map.size();
    let mut spawned = 0;
    for _ in 0..count {
        let position = IVec3::new(rng.gen_range(0..size.x), rng.gen_range(0..size.y), z);
        if battle.spawn_map_part(part_type, position).is_some() {
            spawned += 1;
        }
    }
    spawned
}

/// Spawn a standing soldier in the centre of a tile.
pub fn spawn_soldier(battle: &mut Battle, tile: IVec3) -> Option<Entity> {
    let feet = Vec3::new(tile_centre(tile).x, tile_centre(tile).y, tile.z as f32);
    battle.spawn_unit(
        feet,
        UNIT_STANDING_HEIGHT,
        UNIT_DEFAULT_HEALTH,
        UNIT_DEFAULT_ARMOUR,
    )
}
