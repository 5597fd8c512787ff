//! Selection of which cube faces get built.

use serde::{Deserialize, Serialize};

use crate::CubeFace;

/// Restricts cube-sphere generation to one face, or builds all six.
///
/// Useful for inspecting a single face of a large planet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FaceRenderMask {
    /// Build every face.
    #[default]
    All,
    /// +Y only.
    Top,
    /// −Y only.
    Bottom,
    /// −X only.
    Left,
    /// +X only.
    Right,
    /// +Z only.
    Front,
    /// −Z only.
    Back,
}

impl FaceRenderMask {
    /// Whether `face` is built under this mask.
    #[must_use]
    pub fn includes(self, face: CubeFace) -> bool {
        match self {
            FaceRenderMask::All => true,
            FaceRenderMask::Top => face == CubeFace::PosY,
            FaceRenderMask::Bottom => face == CubeFace::NegY,
            FaceRenderMask::Left => face == CubeFace::NegX,
            FaceRenderMask::Right => face == CubeFace::PosX,
            FaceRenderMask::Front => face == CubeFace::PosZ,
            FaceRenderMask::Back => face == CubeFace::NegZ,
        }
    }

    /// The selected faces in canonical order.
    pub fn faces(self) -> impl Iterator<Item = CubeFace> {
        CubeFace::ALL.into_iter().filter(move |&f| self.includes(f))
    }
}
