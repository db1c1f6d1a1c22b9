//! Damage, hazard and map-part type catalog.
//!
//! The catalog is read-only rules data. It is either built in
//! (`Catalog::standard`) or loaded from a JSON definition in which types
//! reference each other by name. Names are resolved to dense ids once, at
//! load time, so the simulation never does string lookups per tick.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EffectType, MapPartKind};
use crate::error::{CatalogError, CatalogResult};

/// Index of a hazard type in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HazardTypeId(pub u16);

/// Index of a damage type in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DamageTypeId(pub u16);

/// Index of a map-part type in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapPartTypeId(pub u16);

/// Behaviour of the hazard left behind by a damage type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardType {
    pub name: String,
    /// Fire hazards use the growing/waning power model and burn out at a
    /// fixed age instead of at their lifetime.
    pub fire: bool,
    /// Shortest rolled lifetime (logic steps).
    pub min_lifetime: i32,
    /// Longest rolled lifetime (logic steps).
    pub max_lifetime: i32,
    /// Frames of the hazard's doodad animation.
    pub doodad_lifetime: u32,
}

/// A damage type as the simulation sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageType {
    pub name: String,
    pub effect: EffectType,
    pub hazard_type: Option<HazardTypeId>,
    /// Block category map parts resist this damage type's spread with.
    pub block_type: usize,
}

/// Static definition of a piece of battlefield geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPartType {
    pub name: String,
    pub kind: MapPartKind,
    /// Resistance to hazard spread per block category (0..=255).
    pub block: [i32; BLOCK_TYPE_COUNT],
    /// Fire penetrative power needed to ignite this part.
    pub fire_resist: i32,
    /// Logic steps of fuel; 0 means the part cannot burn.
    pub burn_time: i32,
    /// Damage absorbed from every hit; also the starting health.
    pub constitution: i32,
}

/// Damage type as written in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageTypeDef {
    pub name: String,
    #[serde(default)]
    pub effect: EffectType,
    #[serde(default)]
    pub hazard_type: Option<String>,
    #[serde(default)]
    pub block_type: usize,
}

/// A catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDef {
    #[serde(default)]
    pub hazard_types: Vec<HazardType>,
    #[serde(default)]
    pub damage_types: Vec<DamageTypeDef>,
    #[serde(default)]
    pub map_part_types: Vec<MapPartType>,
}

/// Resolved, validated rules data.
#[derive(Debug, Clone)]
pub struct Catalog {
    hazard_types: Vec<HazardType>,
    damage_types: Vec<DamageType>,
    map_part_types: Vec<MapPartType>,
    damage_type_ids: HashMap<String, DamageTypeId>,
    map_part_type_ids: HashMap<String, MapPartTypeId>,
    smoke: DamageTypeId,
}

impl Catalog {
    /// Parse and validate a JSON catalog definition.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let def: CatalogDef = serde_json::from_str(json)?;
        Self::from_def(def)
    }

    /// Resolve name references of a definition and validate the result.
    pub fn from_def(def: CatalogDef) -> CatalogResult<Self> {
        let mut hazard_ids = HashMap::new();
        for (index, hazard) in def.hazard_types.iter().enumerate() {
            if hazard_ids
                .insert(hazard.name.clone(), HazardTypeId(index as u16))
                .is_some()
            {
                return Err(CatalogError::DuplicateName {
                    kind: "hazard type",
                    name: hazard.name.clone(),
                });
            }
        }

        let mut damage_types = Vec::with_capacity(def.damage_types.len());
        for damage in def.damage_types {
            let hazard_type = match damage.hazard_type {
                Some(name) => match hazard_ids.get(&name) {
                    Some(id) => Some(*id),
                    None => {
                        return Err(CatalogError::UnknownHazardType {
                            damage_type: damage.name,
                            hazard_type: name,
                        })
                    }
                },
                None => None,
            };
            damage_types.push(DamageType {
                name: damage.name,
                effect: damage.effect,
                hazard_type,
                block_type: damage.block_type,
            });
        }

        Self::assemble(def.hazard_types, damage_types, def.map_part_types)
    }

    /// Build the name indexes, locate the smoke type and validate.
    fn assemble(
        hazard_types: Vec<HazardType>,
        damage_types: Vec<DamageType>,
        map_part_types: Vec<MapPartType>,
    ) -> CatalogResult<Self> {
        let mut damage_type_ids = HashMap::new();
        for (index, damage) in damage_types.iter().enumerate() {
            if damage_type_ids
                .insert(damage.name.clone(), DamageTypeId(index as u16))
                .is_some()
            {
                return Err(CatalogError::DuplicateName {
                    kind: "damage type",
                    name: damage.name.clone(),
                });
            }
        }
        let mut map_part_type_ids = HashMap::new();
        for (index, part) in map_part_types.iter().enumerate() {
            if map_part_type_ids
                .insert(part.name.clone(), MapPartTypeId(index as u16))
                .is_some()
            {
                return Err(CatalogError::DuplicateName {
                    kind: "map part type",
                    name: part.name.clone(),
                });
            }
        }

        let smoke = *damage_type_ids
            .get(SMOKE_DAMAGE_TYPE)
            .ok_or_else(|| CatalogError::MissingSmoke(SMOKE_DAMAGE_TYPE.to_string()))?;

        let catalog = Self {
            hazard_types,
            damage_types,
            map_part_types,
            damage_type_ids,
            map_part_type_ids,
            smoke,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check cross-type invariants the simulation relies on.
    pub fn validate(&self) -> CatalogResult<()> {
        for hazard in &self.hazard_types {
            if hazard.min_lifetime > hazard.max_lifetime {
                return Err(CatalogError::InvertedLifetime {
                    name: hazard.name.clone(),
                    min: hazard.min_lifetime,
                    max: hazard.max_lifetime,
                });
            }
        }
        for damage in &self.damage_types {
            if damage.block_type >= BLOCK_TYPE_COUNT {
                return Err(CatalogError::BlockTypeOutOfRange {
                    name: damage.name.clone(),
                    block_type: damage.block_type,
                    count: BLOCK_TYPE_COUNT,
                });
            }
        }
        if self.damage_type(self.smoke).hazard_type.is_none() {
            return Err(CatalogError::SmokeWithoutHazard);
        }
        Ok(())
    }

    pub fn hazard_type(&self, id: HazardTypeId) -> &HazardType {
        &self.hazard_types[id.0 as usize]
    }

    pub fn damage_type(&self, id: DamageTypeId) -> &DamageType {
        &self.damage_types[id.0 as usize]
    }

    pub fn map_part_type(&self, id: MapPartTypeId) -> &MapPartType {
        &self.map_part_types[id.0 as usize]
    }

    /// Hazard type left behind by a damage type, if any.
    pub fn hazard_type_of(&self, id: DamageTypeId) -> Option<&HazardType> {
        self.damage_type(id)
            .hazard_type
            .map(|hazard| self.hazard_type(hazard))
    }

    /// Whether a damage type leaves fire behind.
    pub fn is_fire(&self, id: DamageTypeId) -> bool {
        self.hazard_type_of(id).is_some_and(|hazard| hazard.fire)
    }

    pub fn damage_type_id(&self, name: &str) -> Option<DamageTypeId> {
        self.damage_type_ids.get(name).copied()
    }

    pub fn map_part_type_id(&self, name: &str) -> Option<MapPartTypeId> {
        self.map_part_type_ids.get(name).copied()
    }

    /// The smoke damage type fires exhale.
    pub fn smoke(&self) -> DamageTypeId {
        self.smoke
    }

    /// Built-in battle rules.
    pub fn standard() -> Self {
        let hazard = |name: &str, fire: bool, min: i32, max: i32, doodad: u32| HazardType {
            name: name.to_string(),
            fire,
            min_lifetime: min,
            max_lifetime: max,
            doodad_lifetime: doodad,
        };
        let hazard_types = vec![
            hazard("HAZARD_FIRE", true, 1, 1, 8),
            hazard("HAZARD_SMOKE", false, 40, 60, 12),
            hazard("HAZARD_STUN_GAS", false, 30, 45, 12),
            hazard("HAZARD_ALIEN_GAS", false, 30, 45, 12),
        ];

        let damage = |name: &str, effect: EffectType, hazard: Option<u16>, block_type: usize| {
            DamageType {
                name: name.to_string(),
                effect,
                hazard_type: hazard.map(HazardTypeId),
                block_type,
            }
        };
        let damage_types = vec![
            damage("DAMAGETYPE_INCENDIARY", EffectType::Fire, Some(0), BLOCK_FIRE),
            damage(SMOKE_DAMAGE_TYPE, EffectType::Smoke, Some(1), BLOCK_SMOKE),
            damage("DAMAGETYPE_STUN_GAS", EffectType::Stun, Some(2), BLOCK_GAS),
            damage("DAMAGETYPE_ALIEN_GAS", EffectType::Generic, Some(3), BLOCK_GAS),
            damage("DAMAGETYPE_HIGH_EXPLOSIVE", EffectType::Generic, None, BLOCK_EXPLOSIVE),
        ];

        let part = |name: &str,
                    kind: MapPartKind,
                    block: [i32; BLOCK_TYPE_COUNT],
                    fire_resist: i32,
                    burn_time: i32,
                    constitution: i32| MapPartType {
            name: name.to_string(),
            kind,
            block,
            fire_resist,
            burn_time,
            constitution,
        };
        let map_part_types = vec![
            part("GROUND_GRASS", MapPartKind::Ground, [40, 255, 255, 255], 10, 6, 20),
            part("GROUND_CONCRETE", MapPartKind::Ground, [80, 255, 255, 255], 255, 0, 60),
            part("WALL_BRICK_LEFT", MapPartKind::LeftWall, [100, 255, 255, 255], 255, 0, 80),
            part("WALL_BRICK_RIGHT", MapPartKind::RightWall, [100, 255, 255, 255], 255, 0, 80),
            part("WALL_WOOD_LEFT", MapPartKind::LeftWall, [30, 200, 200, 200], 40, 10, 30),
            part("WALL_WOOD_RIGHT", MapPartKind::RightWall, [30, 200, 200, 200], 40, 10, 30),
            part("FEATURE_CRATE", MapPartKind::Feature, [10, 8, 0, 8], 20, 8, 15),
            part("FEATURE_TREE", MapPartKind::Feature, [20, 20, 0, 20], 30, 12, 40),
        ];

        let mut damage_type_ids = HashMap::new();
        for (index, damage) in damage_types.iter().enumerate() {
            damage_type_ids.insert(damage.name.clone(), DamageTypeId(index as u16));
        }
        let mut map_part_type_ids = HashMap::new();
        for (index, part) in map_part_types.iter().enumerate() {
            map_part_type_ids.insert(part.name.clone(), MapPartTypeId(index as u16));
        }

        Self {
            hazard_types,
            damage_types,
            map_part_types,
            damage_type_ids,
            map_part_type_ids,
            smoke: DamageTypeId(1),
        }
    }
}
