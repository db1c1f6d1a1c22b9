//! Events emitted by the simulation for UI and replay feedback.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::catalog::DamageTypeId;
use crate::enums::*;

/// Something observable happened to a hazard or its occupants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HazardEvent {
    /// A new hazard instance was placed.
    Placed {
        position: IVec3,
        damage_type: DamageTypeId,
        power: i32,
        lifetime: i32,
    },
    /// A weaker hazard was rejuvenated by a spread instead of duplicated.
    Rejuvenated {
        position: IVec3,
        damage_type: DamageTypeId,
    },
    /// A hazard expired or was destroyed.
    Died {
        position: IVec3,
        damage_type: DamageTypeId,
        violently: bool,
    },
    /// A map part consumed fuel for a fire.
    MapPartBurned { position: IVec3, kind: MapPartKind },
    /// A map part was destroyed by damage or burnt out.
    MapPartDestroyed { position: IVec3, kind: MapPartKind },
    /// A unit took hazard damage.
    UnitHit {
        position: IVec3,
        part: BodyPart,
        damage: i32,
        source: DamageSource,
    },
    /// A unit died.
    UnitKilled { position: IVec3 },
}
