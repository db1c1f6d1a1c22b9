//! Error types for rules data.

/// Errors raised while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file is not valid JSON for a catalog definition.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two types of the same kind share a name.
    #[error("duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    /// A damage type references a hazard type that does not exist.
    #[error("damage type '{damage_type}' references unknown hazard type '{hazard_type}'")]
    UnknownHazardType {
        damage_type: String,
        hazard_type: String,
    },

    /// The smoke damage type fires exhale is missing.
    #[error("catalog has no '{0}' damage type")]
    MissingSmoke(String),

    /// The smoke damage type exists but leaves no hazard behind.
    #[error("smoke damage type has no hazard type")]
    SmokeWithoutHazard,

    /// A hazard type's lifetime range is inverted.
    #[error("hazard type '{name}' has min lifetime {min} above max lifetime {max}")]
    InvertedLifetime { name: String, min: i32, max: i32 },

    /// A damage type names a block category map parts do not declare.
    #[error("damage type '{name}' uses block category {block_type}, only {count} exist")]
    BlockTypeOutOfRange {
        name: String,
        block_type: usize,
        count: usize,
    },
}

/// Convenience result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
