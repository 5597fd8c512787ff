//! Winding order helpers for sphere meshes.
//!
//! Every emitted triangle must be counter-clockwise when viewed from outside
//! the planet, i.e. its face normal points away from the centre.

use glam::DVec3;

/// `true` if the triangle's normal (`(v1 - v0) × (v2 - v0)`) has a positive
/// dot product with its centroid, measured from the planet centre at the origin.
pub fn triangle_winds_outward(v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0;
    face_normal.dot(centroid) > 0.0
}

/// Triangles for a row-major grid of `grid_size × grid_size` vertices,
/// two per quad, indices local to the grid.
///
/// Triangles are emitted `+u` then `+v`, which winds outward on every face
/// because each face frame satisfies `tangent × bitangent = normal`. A grid
/// with fewer than two vertices per side has no quads.
pub(crate) fn generate_grid_triangles(grid_size: u32) -> Vec<[u32; 3]> {
    if grid_size < 2 {
        return Vec::new();
    }
    let quads = (grid_size - 1) * (grid_size - 1);
    let mut triangles = Vec::with_capacity((quads * 2) as usize);

    for y in 0..(grid_size - 1) {
        for x in 0..(grid_size - 1) {
            let i00 = y * grid_size + x;
            let i10 = y * grid_size + (x + 1);
            let i01 = (y + 1) * grid_size + x;
            let i11 = (y + 1) * grid_size + (x + 1);

            triangles.push([i00, i10, i01]);
            triangles.push([i10, i11, i01]);
        }
    }

    triangles
}
