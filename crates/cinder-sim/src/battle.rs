//! Battle container: owns the hazard arena, the tile map and the
//! vision-refresh queue.
//!
//! Hazards, map parts and units are hecs entities. Tiles hold their ids; a
//! removed entity's id is simply no longer live, so stale references are
//! detected rather than followed.

use std::sync::Arc;

use glam::{IVec3, Vec3};
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cinder_core::catalog::{Catalog, DamageTypeId, MapPartTypeId};
use cinder_core::components::{Hazard, MapPart, Unit};
use cinder_core::constants::*;
use cinder_core::events::HazardEvent;
use cinder_core::types::{tile_of, HazardPower};
use cinder_map::{TileMap, TileObject};

/// Live battle state touched by the hazard systems.
pub struct Battle {
    pub world: World,
    pub map: TileMap,
    catalog: Arc<Catalog>,
    /// Live hazards in placement order.
    hazards: Vec<Entity>,
    max_hazards: usize,
    vision_refresh: Vec<IVec3>,
    events: Vec<HazardEvent>,
}

impl Battle {
    pub fn new(map_size: IVec3, catalog: Arc<Catalog>, max_hazards: usize) -> Self {
        Self {
            world: World::new(),
            map: TileMap::new(map_size),
            catalog,
            hazards: Vec::new(),
            max_hazards,
            vision_refresh: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Live hazards in placement order.
    pub fn hazards(&self) -> &[Entity] {
        &self.hazards
    }

    /// Copy of a live hazard's state.
    pub fn hazard(&self, entity: Entity) -> Option<Hazard> {
        self.world
            .get::<&Hazard>(entity)
            .ok()
            .map(|hazard| (*hazard).clone())
    }

    /// First hazard occupying a tile.
    pub fn hazard_at(&self, position: IVec3) -> Option<Entity> {
        self.map.tile(position).and_then(|tile| tile.hazard())
    }

    /// Place a new hazard instance.
    ///
    /// Returns None when the damage type leaves no hazard, the position is
    /// off the map, the battle is at hazard capacity, or the tile already
    /// holds a hazard of the same damage type. `divisor` sets the initial
    /// age so that `ttl / divisor` of the lifetime remains.
    #[allow(clippy::too_many_arguments)]
    pub fn place_hazard(
        &mut self,
        rng: &mut ChaCha8Rng,
        damage_type: DamageTypeId,
        position: IVec3,
        ttl: i32,
        power: i32,
        divisor: i32,
        delay_visibility: bool,
    ) -> Option<Entity> {
        let catalog = Arc::clone(&self.catalog);
        let Some(hazard_type_id) = catalog.damage_type(damage_type).hazard_type else {
            log::warn!(
                "damage type {} leaves no hazard, placement at {position} refused",
                catalog.damage_type(damage_type).name
            );
            return None;
        };
        let hazard_type = catalog.hazard_type(hazard_type_id);

        if !self.map.in_bounds(position) {
            log::debug!("hazard placement at {position} is off the map");
            return None;
        }
        if self.hazards.len() >= self.max_hazards {
            log::warn!(
                "hazard capacity {} reached, placement at {position} refused",
                self.max_hazards
            );
            return None;
        }
        let duplicate = self.map.tile(position).is_some_and(|tile| {
            tile.owned_objects().iter().any(|obj| match obj {
                TileObject::Hazard(e) => self
                    .world
                    .get::<&Hazard>(*e)
                    .is_ok_and(|h| h.damage_type == damage_type),
                TileObject::Ground(_)
                | TileObject::Feature(_)
                | TileObject::LeftWall(_)
                | TileObject::RightWall(_)
                | TileObject::Unit(_) => false,
            })
        });
        if duplicate {
            log::trace!("{} already present at {position}", hazard_type.name);
            return None;
        }

        let divisor = divisor.max(1);
        let frame = rng.gen_range(0..HAZARD_FRAME_COUNT);
        let ticks_until_visible = if delay_visibility {
            hazard_type
                .doodad_lifetime
                .saturating_sub(HAZARD_VISIBILITY_LEAD_FRAMES)
                * TICKS_MULTIPLIER
        } else {
            0
        };
        let hazard = Hazard {
            damage_type,
            hazard_type: hazard_type_id,
            position,
            power: HazardPower::for_placement(hazard_type.fire, power),
            age: ttl - ttl / divisor,
            lifetime: ttl,
            frame,
            ticks_until_next_frame_change: rng.gen_range(0..=TICKS_PER_HAZARD_UPDATE),
            ticks_until_next_update: TICKS_PER_HAZARD_UPDATE,
            ticks_until_visible,
        };

        let entity = self.world.spawn((hazard,));
        self.map.add_object(position, TileObject::Hazard(entity));
        self.hazards.push(entity);
        log::debug!(
            "placed {} at {position} (ttl {ttl}, power {power}, divisor {divisor})",
            hazard_type.name
        );
        self.events.push(HazardEvent::Placed {
            position,
            damage_type,
            power,
            lifetime: ttl,
        });
        Some(entity)
    }

    /// Detach a hazard from its tile and the live set, and despawn it.
    /// Returns its final state, or None if it was not live.
    pub fn remove_hazard(&mut self, entity: Entity) -> Option<Hazard> {
        let hazard = self.world.remove_one::<Hazard>(entity).ok()?;
        self.map
            .remove_object(hazard.position, TileObject::Hazard(entity));
        self.hazards.retain(|e| *e != entity);
        let _ = self.world.despawn(entity);
        Some(hazard)
    }

    /// Ask line-of-sight to be recomputed around a tile.
    pub fn queue_vision_refresh(&mut self, position: IVec3) {
        if !self.vision_refresh.contains(&position) {
            self.vision_refresh.push(position);
        }
    }

    pub fn drain_vision_refresh(&mut self) -> Vec<IVec3> {
        std::mem::take(&mut self.vision_refresh)
    }

    pub fn push_event(&mut self, event: HazardEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<HazardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a piece of geometry. Each tile holds at most one part per slot.
    pub fn spawn_map_part(&mut self, part_type: MapPartTypeId, position: IVec3) -> Option<Entity> {
        let part_def = self.catalog.map_part_type(part_type);
        let kind = part_def.kind;
        let slot = kind.object_type();
        let occupied = self.map.tile(position).map(|tile| {
            tile.owned_objects()
                .iter()
                .any(|obj| obj.object_type() == slot)
        })?;
        if occupied {
            return None;
        }

        let part = MapPart {
            part_type,
            kind,
            position,
            health: part_def.constitution,
            burning: false,
            fuel: part_def.burn_time,
        };
        let entity = self.world.spawn((part,));
        self.map
            .add_object(position, TileObject::map_part(kind, entity));
        Some(entity)
    }

    /// Spawn a unit standing at `position` (tile units) with `health` in
    /// every body part.
    pub fn spawn_unit(
        &mut self,
        position: Vec3,
        current_height: i32,
        health: i32,
        armour: [i32; 3],
    ) -> Option<Entity> {
        let tile = tile_of(position);
        if !self.map.in_bounds(tile) {
            return None;
        }
        let unit = Unit {
            position,
            current_height,
            health: [health; 3],
            stun: 0,
            armour,
        };
        let entity = self.world.spawn((unit,));
        self.map.add_object(tile, TileObject::Unit(entity));
        Some(entity)
    }
}
