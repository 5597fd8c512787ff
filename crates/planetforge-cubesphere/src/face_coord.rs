//! Grid coordinates on a single cube face.

use crate::CubeFace;

/// A point on a cube face, `u` and `v` in \[0, 1\].
///
/// `(0, 0)` sits at `normal - tangent - bitangent`, `(1, 1)` at
/// `normal + tangent + bitangent`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceCoord {
    /// Which cube face this coordinate lies on.
    pub face: CubeFace,
    /// Position along the face tangent, in \[0, 1\].
    pub u: f64,
    /// Position along the face bitangent, in \[0, 1\].
    pub v: f64,
}

impl FaceCoord {
    /// Construct a `FaceCoord`, clamping `u` and `v` to \[0, 1\].
    #[must_use]
    pub fn new(face: CubeFace, u: f64, v: f64) -> Self {
        Self {
            face,
            u: u.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
        }
    }

    /// Coordinate of grid vertex `(x, y)` on a face split into `resolution`
    /// quads per edge. `x` and `y` range over `0..=resolution`.
    #[must_use]
    pub fn from_grid(face: CubeFace, x: u32, y: u32, resolution: u32) -> Self {
        debug_assert!(x <= resolution && y <= resolution, "grid index out of range");
        let step = f64::from(resolution);
        Self {
            face,
            u: f64::from(x) / step,
            v: f64::from(y) / step,
        }
    }
}
