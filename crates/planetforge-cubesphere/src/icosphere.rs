//! Icosahedron refined by recursive edge-midpoint subdivision.
//!
//! Each pass splits every triangle into four. Midpoints are cached by the
//! unordered vertex pair of their edge so that the two triangles sharing an
//! edge reuse one vertex instead of opening a seam.

use glam::DVec3;
use hashbrown::HashMap;

use crate::{MeshError, SphereMesh};

/// Deepest supported subdivision pass count.
pub const MAX_SUBDIVISIONS: u32 = 3;

/// Golden ratio, used for the icosahedron's corner coordinates.
const PHI: f64 = 1.618_033_988_749_895;

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Reject depths above [`MAX_SUBDIVISIONS`].
pub(crate) fn validate_subdivisions(subdivisions: u32) -> Result<(), MeshError> {
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(MeshError::SubdivisionsOutOfRange {
            subdivisions,
            max: MAX_SUBDIVISIONS,
        });
    }
    Ok(())
}

fn icosahedron() -> SphereMesh {
    let corners = [
        DVec3::new(-1.0, PHI, 0.0),
        DVec3::new(1.0, PHI, 0.0),
        DVec3::new(-1.0, -PHI, 0.0),
        DVec3::new(1.0, -PHI, 0.0),
        DVec3::new(0.0, -1.0, PHI),
        DVec3::new(0.0, 1.0, PHI),
        DVec3::new(0.0, -1.0, -PHI),
        DVec3::new(0.0, 1.0, -PHI),
        DVec3::new(PHI, 0.0, -1.0),
        DVec3::new(PHI, 0.0, 1.0),
        DVec3::new(-PHI, 0.0, -1.0),
        DVec3::new(-PHI, 0.0, 1.0),
    ];
    SphereMesh {
        directions: corners.iter().map(|c| c.normalize()).collect(),
        triangles: ICOSAHEDRON_FACES.to_vec(),
    }
}

/// Build an icosphere with `subdivisions` midpoint passes.
///
/// Depth `d` yields `10·4^d + 2` vertices and `20·4^d` triangles.
pub fn build_icosphere(subdivisions: u32) -> Result<SphereMesh, MeshError> {
    validate_subdivisions(subdivisions)?;

    let mut mesh = icosahedron();
    for _ in 0..subdivisions {
        subdivide(&mut mesh);
    }
    Ok(mesh)
}

/// Order-independent key for the edge between `a` and `b`.
#[inline]
fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

fn midpoint(
    directions: &mut Vec<DVec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    *cache.entry(edge_key(a, b)).or_insert_with(|| {
        let mid = (directions[a as usize] + directions[b as usize]).normalize();
        directions.push(mid);
        (directions.len() - 1) as u32
    })
}

/// Split every triangle of `mesh` into four, projecting new vertices onto
/// the unit sphere. Returns the number of midpoint vertices created.
///
/// Winding is preserved: each child triangle keeps its parent's orientation.
pub fn subdivide(mesh: &mut SphereMesh) -> usize {
    let before = mesh.directions.len();
    let mut cache = HashMap::with_capacity(mesh.triangles.len() * 3 / 2);
    let mut triangles = Vec::with_capacity(mesh.triangles.len() * 4);

    for &[v1, v2, v3] in &mesh.triangles {
        let a = midpoint(&mut mesh.directions, &mut cache, v1, v2);
        let b = midpoint(&mut mesh.directions, &mut cache, v2, v3);
        let c = midpoint(&mut mesh.directions, &mut cache, v3, v1);

        triangles.push([v1, a, c]);
        triangles.push([v2, b, a]);
        triangles.push([v3, c, b]);
        triangles.push([a, b, c]);
    }

    mesh.triangles = triangles;
    mesh.directions.len() - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle_winds_outward;
    use std::collections::HashMap as StdHashMap;

    fn undirected_edge_counts(mesh: &SphereMesh) -> StdHashMap<(u32, u32), u32> {
        let mut counts = StdHashMap::new();
        for &[a, b, c] in &mesh.triangles {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                *counts.entry(edge_key(p, q)).or_insert(0) += 1;
            }
        }
        counts
    }

    #[test]
    fn test_depth_above_max_rejected() {
        assert_eq!(
            build_icosphere(4),
            Err(MeshError::SubdivisionsOutOfRange {
                subdivisions: 4,
                max: 3
            })
        );
    }

    #[test]
    fn test_vertex_and_triangle_counts_per_depth() {
        for depth in 0..=MAX_SUBDIVISIONS {
            let mesh = build_icosphere(depth).unwrap();
            let scale = 4usize.pow(depth);
            assert_eq!(mesh.vertex_count(), 10 * scale + 2, "depth {depth}");
            assert_eq!(mesh.triangle_count(), 20 * scale, "depth {depth}");
        }
    }

    #[test]
    fn test_each_shared_edge_gets_exactly_one_midpoint() {
        let mut mesh = build_icosphere(0).unwrap();
        for depth in 0..MAX_SUBDIVISIONS {
            let edges = undirected_edge_counts(&mesh);
            let created = subdivide(&mut mesh);
            assert_eq!(created, edges.len(), "pass {depth} duplicated midpoints");
        }
    }

    #[test]
    fn test_closed_manifold_at_every_depth() {
        for depth in 0..=MAX_SUBDIVISIONS {
            let mesh = build_icosphere(depth).unwrap();
            for (edge, count) in undirected_edge_counts(&mesh) {
                assert_eq!(count, 2, "depth {depth}: edge {edge:?} used {count} times");
            }

            // Consistent orientation: each directed edge appears once.
            let mut directed = hashbrown::HashSet::new();
            for &[a, b, c] in &mesh.triangles {
                for e in [(a, b), (b, c), (c, a)] {
                    assert!(directed.insert(e), "depth {depth}: directed edge {e:?} repeated");
                }
            }
        }
    }

    #[test]
    fn test_no_coincident_vertices() {
        let mesh = build_icosphere(MAX_SUBDIVISIONS).unwrap();
        for (i, a) in mesh.directions.iter().enumerate() {
            for b in &mesh.directions[i + 1..] {
                assert!((*a - *b).length() > 1e-6, "coincident vertices at {a:?}");
            }
        }
    }

    #[test]
    fn test_every_triangle_winds_outward() {
        for depth in 0..=MAX_SUBDIVISIONS {
            let mesh = build_icosphere(depth).unwrap();
            for tri in &mesh.triangles {
                let [a, b, c] = tri.map(|i| mesh.directions[i as usize]);
                assert!(triangle_winds_outward(a, b, c), "depth {depth}: {tri:?}");
            }
        }
    }

    #[test]
    fn test_vertices_unit_length() {
        let mesh = build_icosphere(2).unwrap();
        assert!(mesh.directions.iter().all(|d| (d.length() - 1.0).abs() < 1e-12));
    }
}
