//! Terrain error types.

use crate::NoiseKind;

/// Errors raised while validating settings or running a generation pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// Planet radius is not a positive finite number.
    #[error("planet radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// Orientation quaternion is not finite or has zero length.
    #[error("planet orientation must be a finite non-zero quaternion")]
    InvalidOrientation,

    /// A noise layer has parameters that cannot be evaluated.
    #[error("noise layer {index} is invalid: {reason}")]
    InvalidNoiseLayer {
        /// Position of the layer in the shape settings.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The colour gradient cannot be baked.
    #[error("invalid colour gradient: {0}")]
    InvalidGradient(&'static str),

    /// The lookup table resolution is too small to interpolate.
    #[error("colour table resolution must be at least 2, got {0}")]
    InvalidColourResolution(u32),

    /// An elevation range was requested before any elevation was recorded.
    #[error("no elevation samples were recorded in this pass")]
    NoElevationSamples,

    /// A spawn rule cannot be satisfied as written.
    #[error("spawn rule {index} ({name}) is invalid: {reason}")]
    InvalidSpawnRule {
        /// Position of the rule in the rule list.
        index: usize,
        /// Rule name, for diagnostics.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Spawner-wide settings are out of range.
    #[error("invalid spawner settings: {0}")]
    InvalidSpawnerSettings(&'static str),

    /// Randomizer bounds are inconsistent.
    #[error("invalid randomizer settings: {0}")]
    InvalidRandomizer(&'static str),

    /// The inspiration shape has no layer of a kind the randomizer must emit.
    #[error("inspiration shape has no {0:?} noise layer")]
    InspirationMissingKind(NoiseKind),
}
