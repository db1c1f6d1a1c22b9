//! Systems that operate on the battle each tick.
//!
//! Systems are free functions over `&mut Battle` (or `&Battle` for read-only
//! passes). They do not own state; all state lives in components and the
//! battle container.

pub mod damage;
pub mod effects;
pub mod hazard;
pub mod snapshot;
pub mod spread;
pub mod vision;
