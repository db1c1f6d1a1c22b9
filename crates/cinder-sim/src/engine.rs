//! Simulation engine: the headless driver of a hazard battle.
//!
//! `SimulationEngine` owns the battle and the RNG, runs the hazard systems,
//! and produces `BattleSnapshot`s. Every random decision draws from the one
//! seeded RNG, so equal seeds replay identically.

use std::sync::Arc;

use glam::IVec3;
use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use cinder_core::catalog::{Catalog, DamageTypeId};
use cinder_core::constants::{DEFAULT_MAX_HAZARDS, MAX_MAP_TILES};
use cinder_core::state::BattleSnapshot;
use cinder_core::types::SimTime;
use cinder_map::TileMap;

use crate::battle::Battle;
use crate::error::{ConfigError, ConfigResult};
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Battlefield extent in tiles.
    pub map_size: IVec3,
    /// Cap on simultaneously live hazards.
    pub max_hazards: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            map_size: IVec3::new(32, 32, 8),
            max_hazards: DEFAULT_MAX_HAZARDS,
        }
    }
}

impl SimConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.map_size.cmple(IVec3::ZERO).any() {
            return Err(ConfigError::EmptyMap {
                size: self.map_size,
            });
        }
        if TileMap::tile_count(self.map_size).map_or(true, |count| count > MAX_MAP_TILES) {
            return Err(ConfigError::MapTooLarge {
                size: self.map_size,
                max: MAX_MAP_TILES,
            });
        }
        if self.max_hazards == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// The simulation engine. Owns the battle and all sim state.
pub struct SimulationEngine {
    battle: Battle,
    time: SimTime,
    rng: ChaCha8Rng,
}

impl SimulationEngine {
    /// Create an engine over an empty battlefield.
    pub fn new(config: SimConfig, catalog: Catalog) -> ConfigResult<Self> {
        config.validate()?;
        log::info!(
            "starting battle: map {}, seed {}, capacity {}",
            config.map_size,
            config.seed,
            config.max_hazards
        );
        Ok(Self {
            battle: Battle::new(config.map_size, Arc::new(catalog), config.max_hazards),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        })
    }

    /// Advance the simulation by `ticks` and return the resulting snapshot.
    ///
    /// Hazards placed during the update start simulating on the next call.
    pub fn tick(&mut self, ticks: u32) -> BattleSnapshot {
        systems::hazard::run(&mut self.battle, &mut self.rng, ticks);
        self.time.advance(ticks);

        let vision_refresh = self.battle.drain_vision_refresh();
        let events = self.battle.take_events();
        systems::snapshot::build_snapshot(&self.battle, &self.time, vision_refresh, events)
    }

    /// Place a hazard with explicit lifetime, power and initial-age divisor.
    pub fn place_hazard(
        &mut self,
        damage_type: DamageTypeId,
        position: IVec3,
        ttl: i32,
        power: i32,
        divisor: i32,
        delay_visibility: bool,
    ) -> Option<Entity> {
        self.battle.place_hazard(
            &mut self.rng,
            damage_type,
            position,
            ttl,
            power,
            divisor,
            delay_visibility,
        )
    }

    /// Place a fresh hazard whose lifetime is rolled from its hazard type,
    /// as a weapon impact would.
    pub fn release_hazard(
        &mut self,
        damage_type: DamageTypeId,
        position: IVec3,
        power: i32,
    ) -> Option<Entity> {
        let catalog = Arc::clone(self.battle.catalog());
        let hazard_type = catalog.hazard_type_of(damage_type)?;
        let ttl = systems::hazard::roll_lifetime(hazard_type, &mut self.rng);
        self.place_hazard(damage_type, position, ttl, power, 1, true)
    }

    /// Kill a hazard from outside the simulation (extinguished, blown apart).
    pub fn destroy_hazard(&mut self, entity: Entity, violently: bool) -> bool {
        systems::hazard::die(&mut self.battle, &mut self.rng, entity, violently)
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    /// Mutable battle access, for building the battlefield.
    pub fn battle_mut(&mut self) -> &mut Battle {
        &mut self.battle
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }
}
