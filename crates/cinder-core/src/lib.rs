//! Core types and definitions for the CINDER hazard simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, the damage/hazard catalog, events, snapshots, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod catalog;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
