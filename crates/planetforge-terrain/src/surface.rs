//! Read-only queries against a generated planet surface.

use glam::DVec3;

use crate::{ColourField, ElevationRange, Rgba, ShapeGenerator};

/// Position and colour lookups on a planet surface.
///
/// Used by the spawner and by placement validity checks in the host.
pub trait SurfaceQuery {
    /// Displaced surface point along a unit `direction`.
    fn point_on_surface(&self, direction: DVec3) -> DVec3;

    /// Colour of the surface at (or radially above/below) `point`.
    fn surface_colour(&self, point: DVec3) -> Rgba;

    /// `true` if the colour at `point` is within `tolerance` of any entry in
    /// `colours` on every channel.
    fn matches_any(&self, point: DVec3, colours: &[Rgba], tolerance: f32) -> bool {
        let colour = self.surface_colour(point);
        colours.iter().any(|c| colour.close_to(*c, tolerance))
    }
}

/// [`SurfaceQuery`] backed by the shape generator and colour table of a
/// generated planet.
///
/// Colours are resolved from the elevation range of the pass that built the
/// mesh, so queries agree with the vertex colours.
#[derive(Clone, Copy, Debug)]
pub struct PlanetSurface<'a> {
    shape: &'a ShapeGenerator,
    colours: &'a ColourField,
    range: ElevationRange,
}

impl<'a> PlanetSurface<'a> {
    pub fn new(shape: &'a ShapeGenerator, colours: &'a ColourField, range: ElevationRange) -> Self {
        Self {
            shape,
            colours,
            range,
        }
    }
}

impl SurfaceQuery for PlanetSurface<'_> {
    fn point_on_surface(&self, direction: DVec3) -> DVec3 {
        self.shape.calculate_point_on_planet(direction)
    }

    fn surface_colour(&self, point: DVec3) -> Rgba {
        let direction = point.normalize_or_zero();
        if direction == DVec3::ZERO {
            return Rgba::NEUTRAL;
        }
        self.colours
            .sample_elevation(self.shape.elevation(direction), &self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColourSettings, Gradient, GradientKey, NoiseLayer, ShapeSettings};

    fn fixture() -> (ShapeGenerator, ColourField) {
        let shape = ShapeGenerator::new(&ShapeSettings {
            planet_radius: 5.0,
            layers: vec![NoiseLayer {
                min_value: -1.0,
                num_layers: 3,
                ..Default::default()
            }],
            ..Default::default()
        })
        .unwrap();
        let colours = ColourField::new(&ColourSettings {
            gradient: Gradient::new(vec![
                GradientKey::new(0.0, Rgba::BLACK),
                GradientKey::new(1.0, Rgba::WHITE),
            ])
            .unwrap(),
            ..Default::default()
        })
        .unwrap();
        (shape, colours)
    }

    #[test]
    fn test_colour_independent_of_point_height() {
        let (shape, colours) = fixture();
        let surface = PlanetSurface::new(&shape, &colours, ElevationRange::new(0.0, 2.0));
        let dir = DVec3::new(0.3, 0.5, -0.8).normalize();
        let on_surface = surface.point_on_surface(dir);
        assert_eq!(surface.surface_colour(on_surface), surface.surface_colour(dir * 100.0));
    }

    #[test]
    fn test_matches_any_uses_tolerance() {
        let (shape, colours) = fixture();
        let surface = PlanetSurface::new(&shape, &colours, ElevationRange::new(0.0, 2.0));
        let point = surface.point_on_surface(DVec3::Y);
        let colour = surface.surface_colour(point);
        assert!(surface.matches_any(point, &[Rgba::rgb(9.0, 9.0, 9.0), colour], 0.01));
        assert!(!surface.matches_any(point, &[], 0.01));
        let shifted = Rgba::rgb(colour.r + 0.2, colour.g, colour.b);
        assert!(!surface.matches_any(point, &[shifted], 0.1));
    }

    #[test]
    fn test_flat_range_gives_neutral() {
        let (shape, colours) = fixture();
        let surface = PlanetSurface::new(&shape, &colours, ElevationRange::new(1.0, 1.0));
        assert_eq!(surface.surface_colour(DVec3::Z), Rgba::NEUTRAL);
        assert_eq!(surface.surface_colour(DVec3::ZERO), Rgba::NEUTRAL);
    }
}
