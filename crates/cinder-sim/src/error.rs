//! Error types for simulation setup.

use glam::IVec3;

/// Errors raised while loading or validating a simulation config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Every map extent must be at least one tile.
    #[error("map size {size} has an empty extent")]
    EmptyMap { size: IVec3 },

    /// The map holds more tiles than a battle supports.
    #[error("map size {size} exceeds {max} tiles")]
    MapTooLarge { size: IVec3, max: usize },

    #[error("hazard capacity must be at least 1")]
    ZeroCapacity,
}

/// Convenience result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
