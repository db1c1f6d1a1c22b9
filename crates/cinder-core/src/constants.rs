//! Simulation constants and tuning parameters.
//!
//! Fire and spread numbers must match the reference battle rules exactly.

/// Simulation ticks per real-time second.
pub const TICKS_PER_SECOND: u32 = 144;

/// Scale factor between the legacy 36 Hz animation clock and simulation ticks.
pub const TICKS_MULTIPLIER: u32 = TICKS_PER_SECOND / 36;

// --- Hazard cadence ---

/// Ticks between two hazard logic steps (and two animation frames).
pub const TICKS_PER_HAZARD_UPDATE: i32 = 4 * TICKS_MULTIPLIER as i32;

/// Number of animation frames in a hazard doodad.
pub const HAZARD_FRAME_COUNT: u32 = 4;

/// Percent chance per growth attempt that a hazard (or fire smoke) spreads.
pub const HAZARD_SPREAD_CHANCE: u32 = 10;

/// Doodad frames trimmed off the visibility delay of a delayed hazard.
pub const HAZARD_VISIBILITY_LEAD_FRAMES: u32 = 4;

/// Default cap on simultaneously live hazards in one battle.
pub const DEFAULT_MAX_HAZARDS: usize = 4096;

/// Largest battlefield accepted by config validation, in tiles.
pub const MAX_MAP_TILES: usize = 1 << 22;

// --- Fire ---

/// Age at which a fire hazard burns out, regardless of its lifetime.
pub const FIRE_MAX_AGE: i32 = 120;

/// Age removed per logic step while a fire is growing.
pub const FIRE_GROWTH_AGE_STEP: i32 = 6;

/// Age added per logic step while a fire is waning.
pub const FIRE_WANING_AGE_STEP: i32 = 10;

/// A growing fire at or below this age turns to waning; a waning fire fed
/// fuel above this age turns back to growing.
pub const FIRE_PHASE_FLIP_AGE: i32 = 10;

/// Growing fires older than this never show the "dying flames" frames.
pub const FIRE_DYING_FRAME_AGE: i32 = 90;

/// Upper bound of fire penetrative power (and of block values).
pub const MAX_PENETRATIVE_POWER: i32 = 255;

/// Base multiplier of the fire penetrative power curve.
pub const PENETRATION_BASE: f32 = 3.0;

/// Exponent offset of the fire penetrative power curve.
pub const PENETRATION_EXPONENT: f32 = 9.0;

/// Occlusion value that stops direct fire spread outright.
pub const FULL_BLOCK: i32 = 255;

// --- Smoke ---

/// Name of the catalog damage type used for fire exhaust and burnt-out fires.
pub const SMOKE_DAMAGE_TYPE: &str = "DAMAGETYPE_SMOKE";

/// Power of smoke produced by a fire.
pub const SMOKE_EXHAUST_POWER: i32 = 1;

/// Initial-age divisor of smoke produced by a fire.
pub const SMOKE_EXHAUST_DIVISOR: i32 = 6;

/// Remaining smoke life per point of vision blockage.
pub const SMOKE_VISION_DIVISOR: i32 = 3;

// --- Blocking ---

/// Number of block categories a map part declares resistance for.
pub const BLOCK_TYPE_COUNT: usize = 4;

pub const BLOCK_EXPLOSIVE: usize = 0;
pub const BLOCK_SMOKE: usize = 1;
pub const BLOCK_FIRE: usize = 2;
pub const BLOCK_GAS: usize = 3;

// --- Units ---

/// Voxels per tile along the vertical axis (unit heights are in voxels).
pub const VOXELS_PER_TILE_Z: f32 = 40.0;

/// Impact height fraction at or above which the head is hit.
pub const HEAD_HIT_FRACTION: f32 = 0.75;

/// Impact height fraction at or above which the body is hit.
pub const BODY_HIT_FRACTION: f32 = 0.25;

/// Height in voxels of a standing soldier.
pub const UNIT_STANDING_HEIGHT: i32 = 40;

/// Starting health of every body part of a soldier.
pub const UNIT_DEFAULT_HEALTH: i32 = 30;

/// Default soldier armour per body part (head, body, legs).
pub const UNIT_DEFAULT_ARMOUR: [i32; 3] = [4, 8, 2];
