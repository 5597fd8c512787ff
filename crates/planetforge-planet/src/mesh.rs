//! Displaced, coloured planet geometry.

use glam::DVec3;
use planetforge_cubesphere::SphereMesh;
use planetforge_terrain::{
    ColourField, ElevationRange, ElevationTracker, Rgba, ShapeGenerator, TerrainError,
};

/// Output of one generation pass. Buffers are parallel: vertex `i` has
/// colour `colours[i]` and elevation `elevations[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetMesh {
    /// Displaced positions relative to the planet centre.
    pub vertices: Vec<DVec3>,
    /// Outward-wound index triples.
    pub triangles: Vec<[u32; 3]>,
    /// Per-vertex colour.
    pub colours: Vec<Rgba>,
    /// Per-vertex elevation above the base radius.
    pub elevations: Vec<f64>,
    /// Extent of `elevations`, used to normalise colour lookups.
    pub elevation_range: ElevationRange,
}

impl PlanetMesh {
    /// Displace `unit` through `shape` and colour it from `colours`.
    ///
    /// The elevation range is measured over exactly the vertices being
    /// coloured.
    pub fn build(
        unit: SphereMesh,
        shape: &ShapeGenerator,
        colours: &ColourField,
    ) -> Result<Self, TerrainError> {
        let mut tracker = ElevationTracker::new();
        let mut vertices = Vec::with_capacity(unit.vertex_count());
        let mut elevations = Vec::with_capacity(unit.vertex_count());

        for &direction in &unit.directions {
            let sample = shape.sample(direction);
            tracker.add(sample.elevation);
            vertices.push(sample.point);
            elevations.push(sample.elevation);
        }
        let elevation_range = tracker.finish()?;

        let mut mesh = Self {
            vertices,
            triangles: unit.triangles,
            colours: Vec::new(),
            elevations,
            elevation_range,
        };
        mesh.recolour(colours);
        Ok(mesh)
    }

    /// Recompute vertex colours without touching geometry.
    pub fn recolour(&mut self, colours: &ColourField) {
        let range = self.elevation_range;
        self.colours = self
            .elevations
            .iter()
            .map(|&e| colours.sample_elevation(e, &range))
            .collect();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Smallest and largest distance of any vertex from the centre.
    pub fn radial_extent(&self) -> (f64, f64) {
        self.vertices
            .iter()
            .map(|v| v.length())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r), hi.max(r))
            })
    }

}
