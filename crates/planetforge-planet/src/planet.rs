//! The generation pipeline: settings in, displaced and coloured mesh out.

use std::time::Instant;

use glam::DVec3;
use planetforge_cubesphere::SphereMeshParams;
use planetforge_terrain::{
    BiomeSpawner, ColourField, ColourSettings, PlanetSurface, Rgba, ShapeGenerator, ShapeSettings,
    SpawnReport, SpawnRule, SurfaceQuery,
};
use rand::Rng;
use tracing::{debug, info};

use crate::{PlanetError, PlanetMesh};

/// A configured planet and its most recently generated mesh.
pub struct Planet {
    shape_settings: ShapeSettings,
    colour_settings: ColourSettings,
    mesh_params: SphereMeshParams,
    shape: ShapeGenerator,
    colours: ColourField,
    mesh: Option<PlanetMesh>,
}

impl Planet {
    /// Validate every input and prepare the generators. No mesh is built
    /// until [`generate`](Self::generate) is called.
    ///
    /// Missing settings fail here rather than producing a degenerate planet.
    pub fn new(
        shape_settings: Option<ShapeSettings>,
        colour_settings: Option<ColourSettings>,
        mesh_params: SphereMeshParams,
    ) -> Result<Self, PlanetError> {
        let shape_settings = shape_settings.ok_or(PlanetError::MissingShapeSettings)?;
        let colour_settings = colour_settings.ok_or(PlanetError::MissingColourSettings)?;
        mesh_params.validate()?;

        let shape = ShapeGenerator::new(&shape_settings)?;
        let colours = ColourField::new(&colour_settings)?;
        Ok(Self {
            shape_settings,
            colour_settings,
            mesh_params,
            shape,
            colours,
            mesh: None,
        })
    }

    /// Rebuild the mesh from scratch, replacing any previous one.
    pub fn generate(&mut self) -> Result<&PlanetMesh, PlanetError> {
        let start = Instant::now();
        let unit = self.mesh_params.build()?;
        debug!(
            "Built {:?} unit mesh: {} vertices, {} triangles",
            self.mesh_params.topology,
            unit.vertex_count(),
            unit.triangle_count()
        );

        let mesh = PlanetMesh::build(unit, &self.shape, &self.colours)?;
        info!(
            "Planet generated: {} vertices, {} triangles, elevation [{:.4}, {:.4}] in {:.2?}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.elevation_range.min,
            mesh.elevation_range.max,
            start.elapsed()
        );
        Ok(self.mesh.insert(mesh))
    }

    /// Adopt new shape settings and regenerate.
    ///
    /// On error the previous settings and mesh are kept.
    pub fn update_shape(&mut self, settings: ShapeSettings) -> Result<&PlanetMesh, PlanetError> {
        self.shape = ShapeGenerator::new(&settings)?;
        self.shape_settings = settings;
        self.generate()
    }

    /// Adopt new colour settings, recolouring the existing mesh if the table
    /// was rebaked. Geometry is left untouched.
    ///
    /// Returns whether a rebake happened.
    pub fn update_colours(&mut self, settings: ColourSettings) -> Result<bool, PlanetError> {
        let rebaked = self.colours.update(&settings)?;
        self.colour_settings = settings;
        if rebaked && let Some(mesh) = self.mesh.as_mut() {
            mesh.recolour(&self.colours);
            debug!("Recoloured {} vertices", mesh.vertex_count());
        }
        Ok(rebaked)
    }

    /// Adopt new mesh parameters and regenerate.
    pub fn update_mesh_params(
        &mut self,
        params: SphereMeshParams,
    ) -> Result<&PlanetMesh, PlanetError> {
        params.validate()?;
        self.mesh_params = params;
        self.generate()
    }

    /// The last generated mesh, if any.
    pub fn mesh(&self) -> Option<&PlanetMesh> {
        self.mesh.as_ref()
    }

    pub fn shape_settings(&self) -> &ShapeSettings {
        &self.shape_settings
    }

    pub fn colour_settings(&self) -> &ColourSettings {
        &self.colour_settings
    }

    pub fn mesh_params(&self) -> &SphereMeshParams {
        &self.mesh_params
    }

    pub fn shape_generator(&self) -> &ShapeGenerator {
        &self.shape
    }

    pub fn colour_field(&self) -> &ColourField {
        &self.colours
    }

    /// Surface queries bound to the last generated mesh's elevation range.
    pub fn surface(&self) -> Result<PlanetSurface<'_>, PlanetError> {
        let mesh = self.mesh.as_ref().ok_or(PlanetError::NotGenerated)?;
        Ok(PlanetSurface::new(
            &self.shape,
            &self.colours,
            mesh.elevation_range,
        ))
    }

    /// Displaced surface point along a unit `direction`.
    pub fn point_on_surface(&self, direction: DVec3) -> DVec3 {
        self.shape.calculate_point_on_planet(direction)
    }

    /// Colour of the surface under `point`.
    pub fn sample_surface_colour(&self, point: DVec3) -> Result<Rgba, PlanetError> {
        Ok(self.surface()?.surface_colour(point))
    }

    /// Run a placement pass over the generated surface.
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        spawner: &BiomeSpawner,
        rules: &[SpawnRule],
        rng: &mut R,
    ) -> Result<SpawnReport, PlanetError> {
        let surface = self.surface()?;
        Ok(spawner.place_objects(&surface, rules, rng)?)
    }
}
