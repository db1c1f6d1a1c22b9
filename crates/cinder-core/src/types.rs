//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

pub use glam::{IVec3, Vec3};

use crate::constants::TICKS_PER_SECOND;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Ticks simulated so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by `ticks` simulation ticks.
    pub fn advance(&mut self, ticks: u32) {
        self.tick += ticks as u64;
        self.elapsed_secs = self.tick as f64 / TICKS_PER_SECOND as f64;
    }
}

/// Tile containing a continuous battlefield position (tile units).
pub fn tile_of(position: Vec3) -> IVec3 {
    position.floor().as_ivec3()
}

/// Centre of a tile in continuous coordinates.
pub fn tile_centre(tile: IVec3) -> Vec3 {
    tile.as_vec3() + Vec3::splat(0.5)
}

/// Strength of a hazard.
///
/// Non-fire hazards carry a plain non-negative potency. Fire carries a
/// magnitude tagged with its phase: a growing fire drives its age down toward
/// ignition, a waning fire drives it up toward burn-out. The signed view
/// (`+magnitude` growing, `-magnitude` waning) is what spread and damage see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardPower {
    Steady(i32),
    Growing(i32),
    Waning(i32),
}

impl HazardPower {
    /// Initial power of a freshly placed hazard.
    ///
    /// Fire placed with a non-negative power starts growing, with a negative
    /// one waning. Non-fire potency must not be negative.
    pub fn for_placement(fire: bool, power: i32) -> Self {
        if fire {
            if power < 0 {
                HazardPower::Waning(-power)
            } else {
                HazardPower::Growing(power)
            }
        } else {
            assert!(power >= 0, "non-fire hazard placed with negative power {power}");
            HazardPower::Steady(power)
        }
    }

    /// Signed power.
    pub fn signed(self) -> i32 {
        match self {
            HazardPower::Steady(p) | HazardPower::Growing(p) => p,
            HazardPower::Waning(m) => -m,
        }
    }

    /// Unsigned strength: potency, or fire magnitude.
    pub fn magnitude(self) -> i32 {
        match self {
            HazardPower::Steady(p) | HazardPower::Growing(p) | HazardPower::Waning(p) => p,
        }
    }

    pub fn is_fire(self) -> bool {
        !matches!(self, HazardPower::Steady(_))
    }

    pub fn is_growing(self) -> bool {
        matches!(self, HazardPower::Growing(_))
    }

    pub fn is_waning(self) -> bool {
        matches!(self, HazardPower::Waning(_))
    }

    pub fn is_odd(self) -> bool {
        self.magnitude() % 2 != 0
    }

    /// Turn a growing fire into a waning one of the same magnitude.
    pub fn wane(self) -> Self {
        match self {
            HazardPower::Growing(m) => HazardPower::Waning(m),
            other => other,
        }
    }

    /// Turn a waning fire back into a growing one of the same magnitude.
    pub fn rekindle(self) -> Self {
        match self {
            HazardPower::Waning(m) => HazardPower::Growing(m),
            other => other,
        }
    }

    /// One step of fire drift: the magnitude moves one further away from zero
    /// in the direction of the phase (`power += power / |power|`).
    pub fn drift(self) -> Self {
        let drifted = match self {
            HazardPower::Growing(m) => HazardPower::Growing(m + 1),
            HazardPower::Waning(m) => HazardPower::Waning(m + 1),
            steady => steady,
        };
        assert!(
            !drifted.is_fire() || drifted.signed() != 0,
            "fire power drifted to zero"
        );
        drifted
    }
}
