//! Planet pipeline and catalog error types.

use planetforge_cubesphere::MeshError;
use planetforge_terrain::TerrainError;

/// Errors raised while building or querying a planet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanetError {
    /// No shape settings were supplied.
    #[error("planet has no shape settings")]
    MissingShapeSettings,

    /// No colour settings were supplied.
    #[error("planet has no colour settings")]
    MissingColourSettings,

    /// A surface query was made before the first `generate` call.
    #[error("planet mesh has not been generated yet")]
    NotGenerated,

    /// Mesh parameters were rejected.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Shape, colour or placement settings were rejected.
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

/// Errors that can occur when loading, saving, or editing a planet catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read catalog: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the catalog file to disk.
    #[error("failed to write catalog: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse catalog: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize the catalog to RON.
    #[error("failed to serialize catalog: {0}")]
    SerializeError(#[source] ron::Error),

    /// Requested slot does not exist.
    #[error("catalog slot {index} out of range (catalog has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    /// Randomizing a slot failed.
    #[error("failed to randomize catalog slot: {0}")]
    Randomize(#[from] TerrainError),
}
