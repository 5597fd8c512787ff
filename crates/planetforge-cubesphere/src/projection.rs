//! Cube-to-sphere projection methods.
//!
//! - **Normalize**: the grid point on the `[-1, 1]` cube is divided by its length.
//! - **Tangent warp**: `tan(x * π/4)` remapping before normalising, for more even cells.
//! - **Everitt**: analytic mapping with the best area uniformity of the three.

use std::f64::consts::FRAC_PI_4;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::FaceCoord;

/// Selects how cube-face grid points are moved onto the unit sphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectionMethod {
    /// Plain normalisation of the cube point.
    #[default]
    Normalize,
    /// Tangent-warp projection: slightly more uniform than plain normalisation.
    TangentWarp,
    /// Everitt/Mathworld analytic projection.
    Everitt,
}

/// Convert a [`FaceCoord`] to a point on the surface of the `[-1, 1]` cube.
///
/// The face center `(u=0.5, v=0.5)` maps to the face normal vector.
#[inline]
#[must_use]
pub fn face_coord_to_cube_point(fc: &FaceCoord) -> DVec3 {
    let s = 2.0 * fc.u - 1.0;
    let t = 2.0 * fc.v - 1.0;
    fc.face.normal() + s * fc.face.tangent() + t * fc.face.bitangent()
}

/// Project a [`FaceCoord`] onto the unit sphere by normalising its cube point.
#[inline]
#[must_use]
pub fn face_coord_to_sphere_normalized(fc: &FaceCoord) -> DVec3 {
    face_coord_to_cube_point(fc).normalize()
}

/// Project a [`FaceCoord`] onto the unit sphere using the tangent-warp method.
#[inline]
#[must_use]
pub fn face_coord_to_sphere(fc: &FaceCoord) -> DVec3 {
    let s = 2.0 * fc.u - 1.0;
    let t = 2.0 * fc.v - 1.0;

    // tan(π/4) = 1, so the face boundary is unchanged and only the interior warps.
    let ws = (s * FRAC_PI_4).tan();
    let wt = (t * FRAC_PI_4).tan();

    (fc.face.normal() + ws * fc.face.tangent() + wt * fc.face.bitangent()).normalize()
}

/// Analytic cube-to-sphere using the Everitt/Mathworld mapping.
///
/// ```text
/// sx = x * sqrt(1 - y²/2 - z²/2 + y²z²/3)
/// sy = y * sqrt(1 - x²/2 - z²/2 + x²z²/3)
/// sz = z * sqrt(1 - x²/2 - y²/2 + x²y²/3)
/// ```
#[inline]
#[must_use]
pub fn cube_to_sphere_everitt(cube_point: DVec3) -> DVec3 {
    let x2 = cube_point.x * cube_point.x;
    let y2 = cube_point.y * cube_point.y;
    let z2 = cube_point.z * cube_point.z;

    DVec3::new(
        cube_point.x * (1.0 - y2 / 2.0 - z2 / 2.0 + y2 * z2 / 3.0).sqrt(),
        cube_point.y * (1.0 - x2 / 2.0 - z2 / 2.0 + x2 * z2 / 3.0).sqrt(),
        cube_point.z * (1.0 - x2 / 2.0 - y2 / 2.0 + x2 * y2 / 3.0).sqrt(),
    )
}

/// [`FaceCoord`] → unit sphere using the Everitt mapping.
#[inline]
#[must_use]
pub fn face_coord_to_sphere_everitt(fc: &FaceCoord) -> DVec3 {
    cube_to_sphere_everitt(face_coord_to_cube_point(fc))
}

/// Project a [`FaceCoord`] onto the unit sphere using the specified method.
#[inline]
#[must_use]
pub fn project(fc: &FaceCoord, method: ProjectionMethod) -> DVec3 {
    match method {
        ProjectionMethod::Normalize => face_coord_to_sphere_normalized(fc),
        ProjectionMethod::TangentWarp => face_coord_to_sphere(fc),
        ProjectionMethod::Everitt => face_coord_to_sphere_everitt(fc),
    }
}
