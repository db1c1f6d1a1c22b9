//! Hazard simulation for CINDER.
//!
//! Owns the battle (hecs world, tile map, live hazard list), runs the hazard
//! systems at a fixed tick rate, and produces BattleSnapshots.

pub mod battle;
pub mod engine;
pub mod error;
pub mod systems;
pub mod world_setup;

pub use cinder_core as core;
pub use engine::SimulationEngine;
