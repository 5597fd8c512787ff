//! Undisplaced unit-sphere meshes and the parameters that select how they are built.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::face_grid::{build_cube_sphere, validate_resolution};
use crate::icosphere::{build_icosphere, validate_subdivisions};
use crate::{FaceRenderMask, MeshError, ProjectionMethod};

/// Which base solid is refined into the sphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SphereTopology {
    /// Six subdivided cube faces projected onto the sphere.
    #[default]
    CubeSphere,
    /// Icosahedron refined by recursive edge-midpoint subdivision.
    Icosphere,
}

/// A triangle mesh whose vertices are unit directions from the planet centre.
///
/// Triangles are counter-clockwise seen from outside.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SphereMesh {
    /// Unit-length vertex directions.
    pub directions: Vec<DVec3>,
    /// Index triples into `directions`.
    pub triangles: Vec<[u32; 3]>,
}

impl SphereMesh {
    /// Empty mesh with room for the given number of vertices and triangles.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            directions: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.directions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Everything needed to build a [`SphereMesh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereMeshParams {
    /// Cube-sphere or icosphere.
    pub topology: SphereTopology,
    /// Quads per cube face edge (cube-sphere only).
    pub resolution: u32,
    /// Midpoint subdivision depth (icosphere only).
    pub subdivisions: u32,
    /// Cube-to-sphere projection (cube-sphere only).
    pub projection: ProjectionMethod,
    /// Faces to build (cube-sphere only).
    pub face_mask: FaceRenderMask,
}

impl Default for SphereMeshParams {
    fn default() -> Self {
        Self {
            topology: SphereTopology::CubeSphere,
            resolution: 10,
            subdivisions: 3,
            projection: ProjectionMethod::Normalize,
            face_mask: FaceRenderMask::All,
        }
    }
}

impl SphereMeshParams {
    /// Check the parameters used by the selected topology.
    pub fn validate(&self) -> Result<(), MeshError> {
        match self.topology {
            SphereTopology::CubeSphere => validate_resolution(self.resolution),
            SphereTopology::Icosphere => validate_subdivisions(self.subdivisions),
        }
    }

    /// Build the unit-sphere mesh.
    pub fn build(&self) -> Result<SphereMesh, MeshError> {
        match self.topology {
            SphereTopology::CubeSphere => {
                build_cube_sphere(self.resolution, self.projection, self.face_mask)
            }
            SphereTopology::Icosphere => build_icosphere(self.subdivisions),
        }
    }
}
