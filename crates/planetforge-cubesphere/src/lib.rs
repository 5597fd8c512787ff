//! Unit-sphere geometry for planets: cube faces, cube-to-sphere projection,
//! six-face grid meshes, subdivided icosahedra, and winding validation.

mod cube_face;
mod error;
mod face_coord;
mod face_grid;
mod face_mask;
mod icosphere;
mod projection;
mod sphere_mesh;
mod winding;

pub use cube_face::CubeFace;
pub use error::MeshError;
pub use face_coord::FaceCoord;
pub use face_grid::{MAX_RESOLUTION, MIN_RESOLUTION, build_cube_sphere, validate_resolution};
pub use face_mask::FaceRenderMask;
pub use icosphere::{MAX_SUBDIVISIONS, build_icosphere, subdivide};
pub use projection::{
    ProjectionMethod, cube_to_sphere_everitt, face_coord_to_cube_point, face_coord_to_sphere,
    face_coord_to_sphere_everitt, face_coord_to_sphere_normalized, project,
};
pub use sphere_mesh::{SphereMesh, SphereMeshParams, SphereTopology};
pub use winding::triangle_winds_outward;
