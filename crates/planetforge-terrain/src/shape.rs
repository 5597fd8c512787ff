//! Planet shape: layered noise displacement of unit-sphere directions.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::{NoiseField, NoiseLayer, TerrainError};

/// Designer-facing shape configuration for one planet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSettings {
    /// Undisplaced radius.
    pub planet_radius: f64,
    /// Rotation applied to directions before noise is sampled.
    pub orientation: DQuat,
    /// Gradient-noise permutation seed shared by all layers.
    pub seed: u32,
    /// Noise layers; layer 0 may mask the others.
    pub layers: Vec<NoiseLayer>,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            planet_radius: 1.0,
            orientation: DQuat::IDENTITY,
            seed: 0,
            layers: vec![NoiseLayer::default()],
        }
    }
}

impl ShapeSettings {
    /// Check radius, orientation and every layer.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(self.planet_radius.is_finite() && self.planet_radius > 0.0) {
            return Err(TerrainError::InvalidRadius(self.planet_radius));
        }
        if !self.orientation.is_finite() || self.orientation.length_squared() == 0.0 {
            return Err(TerrainError::InvalidOrientation);
        }
        for (index, layer) in self.layers.iter().enumerate() {
            layer.validate(index)?;
        }
        Ok(())
    }
}

/// Displaced point and the elevation that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSample {
    /// `direction * (radius + elevation)`.
    pub point: DVec3,
    /// Signed elevation above the base radius.
    pub elevation: f64,
}

/// Evaluates the combined elevation of a [`ShapeSettings`].
#[derive(Clone, Debug)]
pub struct ShapeGenerator {
    radius: f64,
    orientation: DQuat,
    fields: Vec<NoiseField>,
}

impl ShapeGenerator {
    /// Validate `settings` and bind every layer to the shared seed.
    pub fn new(settings: &ShapeSettings) -> Result<Self, TerrainError> {
        settings.validate()?;
        Ok(Self {
            radius: settings.planet_radius,
            orientation: settings.orientation.normalize(),
            fields: settings
                .layers
                .iter()
                .map(|layer| NoiseField::new(layer, settings.seed))
                .collect(),
        })
    }

    /// Base radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Elevation for a unit `direction`.
    ///
    /// Layer 0 gives `first`. Each later enabled layer adds its value, scaled
    /// by `max(first, 0)` when it uses the first layer as a mask.
    pub fn elevation(&self, direction: DVec3) -> f64 {
        let p = self.orientation * direction;
        let mut first = 0.0;
        if let Some(base) = self.fields.first()
            && base.layer().enabled
        {
            first = base.evaluate(p);
        }

        let mask = first.max(0.0);
        let mut elevation = first;
        for field in self.fields.iter().skip(1) {
            let layer = field.layer();
            if !layer.enabled {
                continue;
            }
            let weight = if layer.use_first_layer_as_mask { mask } else { 1.0 };
            elevation += field.evaluate(p) * weight;
        }
        elevation
    }

    /// Displaced position for a unit `direction`.
    pub fn calculate_point_on_planet(&self, direction: DVec3) -> DVec3 {
        self.sample(direction).point
    }

    /// Displaced position together with its elevation.
    pub fn sample(&self, direction: DVec3) -> SurfaceSample {
        let elevation = self.elevation(direction);
        SurfaceSample {
            point: direction * (self.radius + elevation),
            elevation,
        }
    }

    /// Upper bound on `|elevation(d)|` for every direction.
    pub fn max_displacement(&self) -> f64 {
        let Some(base) = self.fields.first() else {
            return 0.0;
        };
        let first_bound = if base.layer().enabled {
            base.max_value()
        } else {
            0.0
        };

        let mut bound = first_bound;
        for field in self.fields.iter().skip(1) {
            let layer = field.layer();
            if !layer.enabled {
                continue;
            }
            let weight = if layer.use_first_layer_as_mask {
                first_bound
            } else {
                1.0
            };
            bound += field.max_value() * weight;
        }
        bound
    }
}

/// Observed elevation extent of one generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevationRange {
    /// Lowest elevation seen.
    pub min: f64,
    /// Highest elevation seen.
    pub max: f64,
}

impl ElevationRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// `true` when the range is too flat to normalise against.
    pub fn is_degenerate(&self) -> bool {
        !(self.span() > f64::EPSILON)
    }

    /// Map `elevation` to `(elevation - min) / span`, or `None` for a
    /// degenerate range. The result is not clamped.
    pub fn normalize(&self, elevation: f64) -> Option<f64> {
        if self.is_degenerate() {
            None
        } else {
            Some((elevation - self.min) / self.span())
        }
    }
}

/// Accumulates the elevation range while a mesh is being displaced.
#[derive(Clone, Copy, Debug)]
pub struct ElevationTracker {
    min: f64,
    max: f64,
    samples: usize,
}

impl Default for ElevationTracker {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            samples: 0,
        }
    }
}

impl ElevationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, elevation: f64) {
        self.min = self.min.min(elevation);
        self.max = self.max.max(elevation);
        self.samples += 1;
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// The range seen so far. Fails if nothing was recorded.
    pub fn finish(&self) -> Result<ElevationRange, TerrainError> {
        if self.samples == 0 {
            return Err(TerrainError::NoElevationSamples);
        }
        Ok(ElevationRange::new(self.min, self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoiseKind;

    fn directions() -> Vec<DVec3> {
        let mut dirs = Vec::new();
        for i in -6..=6 {
            for j in -6..=6 {
                for k in [-1.0, 1.0] {
                    dirs.push(DVec3::new(i as f64 / 6.0, j as f64 / 6.0, k).normalize());
                    dirs.push(DVec3::new(k, i as f64 / 6.0, j as f64 / 6.0).normalize());
                }
            }
        }
        dirs
    }

    fn layered_settings() -> ShapeSettings {
        ShapeSettings {
            planet_radius: 10.0,
            orientation: DQuat::from_rotation_y(0.7),
            seed: 9,
            layers: vec![
                NoiseLayer {
                    strength: 0.4,
                    num_layers: 4,
                    min_value: -0.2,
                    ..Default::default()
                },
                NoiseLayer {
                    kind: NoiseKind::Ridged,
                    use_first_layer_as_mask: true,
                    strength: 1.5,
                    num_layers: 5,
                    ..Default::default()
                },
                NoiseLayer {
                    strength: 0.1,
                    base_roughness: 3.0,
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_points_within_displacement_bound() {
        let generator = ShapeGenerator::new(&layered_settings()).unwrap();
        let bound = generator.max_displacement();
        assert!(bound > 0.0);
        for d in directions() {
            let r = generator.calculate_point_on_planet(d).length();
            assert!(
                r >= 10.0 - bound - 1e-9 && r <= 10.0 + bound + 1e-9,
                "radius {r} outside [{}, {}]",
                10.0 - bound,
                10.0 + bound
            );
        }
    }

    #[test]
    fn test_scenario_single_simple_layer() {
        let settings = ShapeSettings {
            planet_radius: 10.0,
            layers: vec![NoiseLayer {
                num_layers: 4,
                ..Default::default()
            }],
            ..Default::default()
        };
        let generator = ShapeGenerator::new(&settings).unwrap();
        assert!((generator.max_displacement() - 1.0).abs() < 1e-12);
        for d in directions() {
            let r = generator.calculate_point_on_planet(d).length();
            assert!((9.0..=11.0).contains(&r));
        }
    }

    #[test]
    fn test_disabled_layers_contribute_nothing() {
        let mut settings = layered_settings();
        for layer in &mut settings.layers {
            layer.enabled = false;
        }
        let generator = ShapeGenerator::new(&settings).unwrap();
        assert_eq!(generator.max_displacement(), 0.0);
        for d in directions() {
            assert_eq!(generator.elevation(d), 0.0);
        }
    }

    #[test]
    fn test_mask_suppressed_where_first_layer_is_zero() {
        let settings = ShapeSettings {
            layers: vec![
                NoiseLayer {
                    min_value: 1.0,
                    ..Default::default()
                },
                NoiseLayer {
                    use_first_layer_as_mask: true,
                    min_value: -1.0,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let generator = ShapeGenerator::new(&settings).unwrap();
        assert_eq!(generator.max_displacement(), 0.0);
        for d in directions() {
            assert_eq!(generator.elevation(d), 0.0);
        }
    }

    #[test]
    fn test_orientation_rotates_sampling_point() {
        let base = layered_settings();
        let rotated = ShapeSettings {
            orientation: DQuat::from_rotation_x(1.1),
            ..base.clone()
        };
        let a = ShapeGenerator::new(&base).unwrap();
        let b = ShapeGenerator::new(&rotated).unwrap();
        assert!(directions().into_iter().any(|d| a.elevation(d) != b.elevation(d)));
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let settings = ShapeSettings {
            planet_radius: 0.0,
            ..Default::default()
        };
        assert_eq!(
            ShapeGenerator::new(&settings).unwrap_err(),
            TerrainError::InvalidRadius(0.0)
        );
    }

    #[test]
    fn test_empty_layers_give_sphere() {
        let settings = ShapeSettings {
            planet_radius: 3.0,
            layers: Vec::new(),
            ..Default::default()
        };
        let generator = ShapeGenerator::new(&settings).unwrap();
        let p = generator.calculate_point_on_planet(DVec3::X);
        assert_eq!(p, DVec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_tracker_without_samples_fails() {
        let tracker = ElevationTracker::new();
        assert_eq!(tracker.finish(), Err(TerrainError::NoElevationSamples));
    }

    #[test]
    fn test_tracker_records_extent() {
        let mut tracker = ElevationTracker::new();
        for e in [0.3, -0.2, 0.9, 0.1] {
            tracker.add(e);
        }
        assert_eq!(tracker.samples(), 4);
        assert_eq!(tracker.finish().unwrap(), ElevationRange::new(-0.2, 0.9));
    }

    #[test]
    fn test_range_normalize() {
        let range = ElevationRange::new(1.0, 3.0);
        assert_eq!(range.normalize(2.0), Some(0.5));
        assert!(ElevationRange::new(0.5, 0.5).is_degenerate());
        assert_eq!(ElevationRange::new(0.5, 0.5).normalize(0.5), None);
    }
}
