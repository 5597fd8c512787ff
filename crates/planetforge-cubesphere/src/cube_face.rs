//! The six faces of the cube that is projected onto the planet sphere.

use glam::DVec3;

/// One face of the cube-sphere, named by the axis its outward normal points along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    /// +X face (right).
    PosX = 0,
    /// −X face (left).
    NegX = 1,
    /// +Y face (top).
    PosY = 2,
    /// −Y face (bottom).
    NegY = 3,
    /// +Z face (front).
    PosZ = 4,
    /// −Z face (back).
    NegZ = 5,
}

impl CubeFace {
    /// All six faces in canonical order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Outward-pointing unit normal for this face.
    #[must_use]
    pub fn normal(self) -> DVec3 {
        match self {
            CubeFace::PosX => DVec3::X,
            CubeFace::NegX => DVec3::NEG_X,
            CubeFace::PosY => DVec3::Y,
            CubeFace::NegY => DVec3::NEG_Y,
            CubeFace::PosZ => DVec3::Z,
            CubeFace::NegZ => DVec3::NEG_Z,
        }
    }

    /// First grid axis: direction of increasing `u` on this face.
    #[must_use]
    pub fn tangent(self) -> DVec3 {
        match self {
            CubeFace::PosX => DVec3::NEG_Z,
            CubeFace::NegX => DVec3::Z,
            CubeFace::PosY => DVec3::X,
            CubeFace::NegY => DVec3::X,
            CubeFace::PosZ => DVec3::X,
            CubeFace::NegZ => DVec3::NEG_X,
        }
    }

    /// Second grid axis: direction of increasing `v` on this face.
    ///
    /// `tangent × bitangent == normal` for every face, so a grid quad walked
    /// `u` first then `v` is counter-clockwise seen from outside.
    #[must_use]
    pub fn bitangent(self) -> DVec3 {
        match self {
            CubeFace::PosX => DVec3::Y,
            CubeFace::NegX => DVec3::Y,
            CubeFace::PosY => DVec3::NEG_Z,
            CubeFace::NegY => DVec3::Z,
            CubeFace::PosZ => DVec3::Y,
            CubeFace::NegZ => DVec3::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_form_right_handed_orthonormal_basis() {
        for face in CubeFace::ALL {
            let (n, t, b) = (face.normal(), face.tangent(), face.bitangent());
            assert!((n.length() - 1.0).abs() < 1e-12);
            assert!((t.length() - 1.0).abs() < 1e-12);
            assert!((b.length() - 1.0).abs() < 1e-12);
            assert!(t.dot(n).abs() < 1e-12, "tangent not perpendicular on {face:?}");
            assert!(b.dot(n).abs() < 1e-12, "bitangent not perpendicular on {face:?}");
            assert!(
                (t.cross(b) - n).length() < 1e-12,
                "tangent x bitangent != normal for {face:?}"
            );
        }
    }

    #[test]
    fn test_normals_cover_all_axis_directions() {
        let sum: DVec3 = CubeFace::ALL.iter().map(|f| f.normal()).sum();
        assert!(sum.length() < 1e-12, "opposite normals should cancel, got {sum:?}");
        let abs_sum: DVec3 = CubeFace::ALL.iter().map(|f| f.normal().abs()).sum();
        assert_eq!(abs_sum, DVec3::splat(2.0));
    }
}
