//! Mesh construction errors.

/// Errors raised when a sphere mesh is requested with unsupported parameters.
///
/// These are always reported before any vertex or index buffer is allocated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// Cube-sphere resolution (quads per face edge) is outside the supported range.
    #[error("cube-sphere resolution {resolution} is outside the supported range {min}..={max}")]
    ResolutionOutOfRange {
        /// The rejected resolution.
        resolution: u32,
        /// Smallest accepted resolution.
        min: u32,
        /// Largest accepted resolution.
        max: u32,
    },

    /// Icosphere subdivision depth exceeds the supported maximum.
    #[error("icosphere subdivision depth {subdivisions} exceeds the supported maximum {max}")]
    SubdivisionsOutOfRange {
        /// The rejected depth.
        subdivisions: u32,
        /// Largest accepted depth.
        max: u32,
    },
}
