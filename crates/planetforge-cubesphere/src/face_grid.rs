//! Six-face cube-sphere builder.
//!
//! Each selected face is split into `resolution × resolution` quads. Grid
//! vertices are laid out from the face normal and its two perpendicular
//! axes, then projected onto the unit sphere. Vertices on shared cube edges
//! are duplicated per face.

use crate::face_coord::FaceCoord;
use crate::projection::project;
use crate::winding::generate_grid_triangles;
use crate::{FaceRenderMask, MeshError, ProjectionMethod, SphereMesh};

/// Smallest supported cube-sphere resolution.
pub const MIN_RESOLUTION: u32 = 2;
/// Largest supported cube-sphere resolution.
pub const MAX_RESOLUTION: u32 = 256;

/// Reject resolutions outside [`MIN_RESOLUTION`]`..=`[`MAX_RESOLUTION`].
pub fn validate_resolution(resolution: u32) -> Result<(), MeshError> {
    if (MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
        Ok(())
    } else {
        Err(MeshError::ResolutionOutOfRange {
            resolution,
            min: MIN_RESOLUTION,
            max: MAX_RESOLUTION,
        })
    }
}

/// Build a cube-sphere with `resolution` quads per face edge.
///
/// Produces `(resolution + 1)²` vertices and `2 · resolution²` triangles per
/// selected face.
pub fn build_cube_sphere(
    resolution: u32,
    projection: ProjectionMethod,
    mask: FaceRenderMask,
) -> Result<SphereMesh, MeshError> {
    validate_resolution(resolution)?;

    let face_count = mask.faces().count();
    let grid_size = resolution + 1;
    let verts_per_face = (grid_size * grid_size) as usize;
    let tris_per_face = (resolution * resolution * 2) as usize;

    let mut mesh = SphereMesh::with_capacity(verts_per_face * face_count, tris_per_face * face_count);

    for face in mask.faces() {
        debug_assert!(
            face.tangent().cross(face.bitangent()).dot(face.normal()) > 0.0,
            "{face:?} frame is left-handed"
        );
        let base = mesh.directions.len() as u32;
        for y in 0..grid_size {
            for x in 0..grid_size {
                let fc = FaceCoord::from_grid(face, x, y, resolution);
                mesh.directions.push(project(&fc, projection));
            }
        }
        mesh.triangles.extend(
            generate_grid_triangles(grid_size)
                .into_iter()
                .map(|tri| tri.map(|i| i + base)),
        );
    }

    Ok(mesh)
}
