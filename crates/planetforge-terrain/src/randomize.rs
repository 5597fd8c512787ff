//! Random planet generation from an "inspiration" shape.
//!
//! The randomizer perturbs every float parameter of a source layer within a
//! relative band, keeps octave counts, and always emits one Simple layer
//! followed by one Ridged layer before any extra layers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::seed::random_in_unit_sphere;
use crate::{
    ColourSettings, Gradient, GradientKey, NoiseKind, NoiseLayer, Rgba, ShapeSettings, TerrainError,
};

/// Values closer to zero than this are perturbed in an absolute band instead.
const NEAR_ZERO: f64 = 1e-4;

/// Floor for randomized noise frequencies, which must stay positive.
const MIN_ROUGHNESS: f64 = NEAR_ZERO;

/// Number of evenly spaced gradient samples searched for the darkest colour.
const DARKEST_SAMPLES: u32 = 11;

/// Bounds for [`PlanetRandomizer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizerSettings {
    /// Relative perturbation band, in \[0, 1).
    pub random_factor: f64,
    /// Fewest layers in a randomized shape.
    pub min_layers: usize,
    /// Most layers in a randomized shape.
    pub max_layers: usize,
    /// Lower radius bound (inclusive).
    pub min_radius: f64,
    /// Upper radius bound (exclusive).
    pub max_radius: f64,
}

impl Default for RandomizerSettings {
    fn default() -> Self {
        Self {
            random_factor: 0.2,
            min_layers: 2,
            max_layers: 4,
            min_radius: 5.1,
            max_radius: 10.0,
        }
    }
}

impl RandomizerSettings {
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(0.0..1.0).contains(&self.random_factor) {
            return Err(TerrainError::InvalidRandomizer("random factor must lie in [0, 1)"));
        }
        if self.min_layers == 0 || self.min_layers > self.max_layers {
            return Err(TerrainError::InvalidRandomizer(
                "layer count range must be non-empty and start at 1 or more",
            ));
        }
        if !(self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius > 0.0
            && self.min_radius < self.max_radius)
        {
            return Err(TerrainError::InvalidRandomizer(
                "radius range must be positive and non-empty",
            ));
        }
        Ok(())
    }
}

/// Produces randomized shape and colour settings.
#[derive(Clone, Debug, Default)]
pub struct PlanetRandomizer {
    settings: RandomizerSettings,
}

impl PlanetRandomizer {
    pub fn new(settings: RandomizerSettings) -> Result<Self, TerrainError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &RandomizerSettings {
        &self.settings
    }

    /// Randomized shape derived from `inspiration`.
    ///
    /// Radius is drawn from the configured range and orientation and seed are
    /// copied. The inspiration must contain at least one Simple and one
    /// Ridged layer.
    pub fn randomize_shape<R: Rng + ?Sized>(
        &self,
        inspiration: &ShapeSettings,
        rng: &mut R,
    ) -> Result<ShapeSettings, TerrainError> {
        let of_kind = |kind| -> Vec<&NoiseLayer> {
            inspiration.layers.iter().filter(|l| l.kind == kind).collect()
        };
        let simple = of_kind(NoiseKind::Simple);
        let ridged = of_kind(NoiseKind::Ridged);
        if simple.is_empty() {
            return Err(TerrainError::InspirationMissingKind(NoiseKind::Simple));
        }
        if ridged.is_empty() {
            return Err(TerrainError::InspirationMissingKind(NoiseKind::Ridged));
        }

        let s = &self.settings;
        let planet_radius = rng.random_range(s.min_radius..s.max_radius);
        let count = rng.random_range(s.min_layers..=s.max_layers);

        let mut layers = Vec::with_capacity(count);
        for slot in 0..count {
            let source = match slot {
                0 => simple[rng.random_range(0..simple.len())],
                1 => ridged[rng.random_range(0..ridged.len())],
                _ => &inspiration.layers[rng.random_range(0..inspiration.layers.len())],
            };
            layers.push(self.randomize_layer(source, rng));
        }

        let shape = ShapeSettings {
            planet_radius,
            orientation: inspiration.orientation,
            seed: inspiration.seed,
            layers,
        };
        shape.validate()?;
        tracing::debug!(
            "Randomized shape: radius {:.2}, {} layers",
            shape.planet_radius,
            shape.layers.len()
        );
        Ok(shape)
    }

    /// Copy of `source` with every float parameter perturbed and the centre
    /// offset by a random point in a ball of radius `random_factor`.
    ///
    /// Roughness values are floored at [`MIN_ROUGHNESS`] and persistence at
    /// zero, so a valid source always yields a valid layer.
    pub fn randomize_layer<R: Rng + ?Sized>(&self, source: &NoiseLayer, rng: &mut R) -> NoiseLayer {
        let mut layer = source.clone();
        layer.strength = self.randomize_around(source.strength, rng);
        layer.base_roughness = self
            .randomize_around(source.base_roughness, rng)
            .max(MIN_ROUGHNESS);
        layer.roughness = self.randomize_around(source.roughness, rng).max(MIN_ROUGHNESS);
        layer.persistence = self.randomize_around(source.persistence, rng).max(0.0);
        layer.centre = source.centre + random_in_unit_sphere(rng) * self.settings.random_factor;
        layer.min_value = self.randomize_around(source.min_value, rng);
        if source.kind == NoiseKind::Ridged {
            layer.weight_multiplier = self.randomize_around(source.weight_multiplier, rng);
        }
        layer
    }

    /// Uniform value within `±random_factor · |value|` of `value`, or within
    /// `±0.1 · random_factor` of zero when `value` is (almost) zero.
    pub fn randomize_around<R: Rng + ?Sized>(&self, value: f64, rng: &mut R) -> f64 {
        let factor = self.settings.random_factor;
        let (a, b) = if value.abs() < NEAR_ZERO {
            (-0.1 * factor, 0.1 * factor)
        } else {
            (value - value * factor, value + value * factor)
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo == hi {
            return lo;
        }
        rng.random_range(lo..=hi)
    }

    /// Random four-key gradient with a foam colour darkened below it.
    pub fn randomize_colours<R: Rng + ?Sized>(
        &self,
        base: &ColourSettings,
        rng: &mut R,
    ) -> Result<ColourSettings, TerrainError> {
        let positions = [0.0, rng.random_range(0.1..0.4), rng.random_range(0.6..0.9), 1.0];
        let keys = positions
            .into_iter()
            .map(|position| GradientKey::new(position, random_colour(rng)))
            .collect();
        let gradient = Gradient::new(keys)?;
        let foam_colour = ensure_darker_than(base.foam_colour, darkest_colour(&gradient));
        Ok(ColourSettings {
            gradient,
            resolution: base.resolution,
            foam_colour,
        })
    }
}

fn random_colour<R: Rng + ?Sized>(rng: &mut R) -> Rgba {
    Rgba::rgb(rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>())
}

/// Darkest of [`DARKEST_SAMPLES`] evenly spaced gradient samples by mean channel value.
pub fn darkest_colour(gradient: &Gradient) -> Rgba {
    let last = (DARKEST_SAMPLES - 1) as f32;
    (0..DARKEST_SAMPLES)
        .map(|i| gradient.evaluate(i as f32 / last))
        .fold(Rgba::WHITE, |darkest, c| {
            if c.brightness() < darkest.brightness() { c } else { darkest }
        })
}

/// `colour` scaled down until it is no brighter than `reference`.
pub fn ensure_darker_than(colour: Rgba, reference: Rgba) -> Rgba {
    let brightness = colour.brightness();
    let target = reference.brightness();
    if brightness > target {
        colour.scaled(target / brightness)
    } else {
        colour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DQuat, DVec3};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn inspiration() -> ShapeSettings {
        ShapeSettings {
            planet_radius: 1.0,
            orientation: DQuat::from_rotation_z(0.4),
            seed: 17,
            layers: vec![
                NoiseLayer {
                    strength: 0.15,
                    num_layers: 4,
                    min_value: 0.9,
                    ..Default::default()
                },
                NoiseLayer {
                    kind: NoiseKind::Ridged,
                    use_first_layer_as_mask: true,
                    strength: 1.2,
                    num_layers: 5,
                    min_value: -0.5,
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_randomized_shape_layout() {
        let randomizer = PlanetRandomizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let shape = randomizer.randomize_shape(&inspiration(), &mut rng).unwrap();
            assert!((5.1..10.0).contains(&shape.planet_radius));
            assert!((2..=4).contains(&shape.layers.len()));
            assert_eq!(shape.layers[0].kind, NoiseKind::Simple);
            assert_eq!(shape.layers[1].kind, NoiseKind::Ridged);
            assert_eq!(shape.layers[0].num_layers, 4);
            assert_eq!(shape.layers[1].num_layers, 5);
            assert!(shape.layers[1].use_first_layer_as_mask);
            assert_eq!(shape.orientation, inspiration().orientation);
            assert_eq!(shape.seed, 17);
        }
    }

    #[test]
    fn test_randomize_around_stays_in_band() {
        let randomizer = PlanetRandomizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..500 {
            let v = randomizer.randomize_around(2.0, &mut rng);
            assert!((1.6 - 1e-9..=2.4 + 1e-9).contains(&v));
            let n = randomizer.randomize_around(-0.5, &mut rng);
            assert!((-0.6 - 1e-9..=-0.4 + 1e-9).contains(&n));
            let z = randomizer.randomize_around(0.0, &mut rng);
            assert!((-0.02..=0.02).contains(&z));
        }
    }

    #[test]
    fn test_zero_factor_copies_parameters() {
        let randomizer = PlanetRandomizer::new(RandomizerSettings {
            random_factor: 0.0,
            ..Default::default()
        })
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let source = &inspiration().layers[1];
        let layer = randomizer.randomize_layer(source, &mut rng);
        assert_eq!(&layer, source);
    }

    #[test]
    fn test_near_zero_parameters_stay_valid() {
        let randomizer = PlanetRandomizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut source = inspiration();
        for layer in &mut source.layers {
            layer.persistence = 0.0;
            layer.base_roughness = 5e-5;
            layer.roughness = 5e-5;
        }
        source.validate().unwrap();
        for _ in 0..200 {
            let shape = randomizer.randomize_shape(&source, &mut rng).unwrap();
            for layer in &shape.layers {
                assert!(layer.persistence >= 0.0);
                assert!(layer.base_roughness >= MIN_ROUGHNESS);
                assert!(layer.roughness >= MIN_ROUGHNESS);
            }
        }
    }

    #[test]
    fn test_centre_offset_bounded() {
        let randomizer = PlanetRandomizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let source = NoiseLayer {
            centre: DVec3::new(3.0, -1.0, 2.0),
            ..Default::default()
        };
        for _ in 0..100 {
            let layer = randomizer.randomize_layer(&source, &mut rng);
            assert!(layer.centre.distance(source.centre) <= 0.2 + 1e-12);
        }
    }

    #[test]
    fn test_missing_kind_rejected() {
        let randomizer = PlanetRandomizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut only_simple = inspiration();
        only_simple.layers.truncate(1);
        assert_eq!(
            randomizer.randomize_shape(&only_simple, &mut rng).unwrap_err(),
            TerrainError::InspirationMissingKind(NoiseKind::Ridged)
        );
        let empty = ShapeSettings {
            layers: Vec::new(),
            ..Default::default()
        };
        assert_eq!(
            randomizer.randomize_shape(&empty, &mut rng).unwrap_err(),
            TerrainError::InspirationMissingKind(NoiseKind::Simple)
        );
    }

    #[test]
    fn test_settings_validation() {
        let bad_factor = RandomizerSettings {
            random_factor: 1.0,
            ..Default::default()
        };
        assert!(PlanetRandomizer::new(bad_factor).is_err());
        let bad_layers = RandomizerSettings {
            min_layers: 5,
            max_layers: 3,
            ..Default::default()
        };
        assert!(PlanetRandomizer::new(bad_layers).is_err());
        let bad_radius = RandomizerSettings {
            min_radius: 10.0,
            max_radius: 10.0,
            ..Default::default()
        };
        assert!(PlanetRandomizer::new(bad_radius).is_err());
    }

    #[test]
    fn test_random_colours_layout() {
        let randomizer = PlanetRandomizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let base = ColourSettings::default();
        for _ in 0..20 {
            let colours = randomizer.randomize_colours(&base, &mut rng).unwrap();
            let keys = colours.gradient.keys();
            assert_eq!(keys.len(), 4);
            assert_eq!(keys[0].position, 0.0);
            assert!((0.1..0.4).contains(&keys[1].position));
            assert!((0.6..0.9).contains(&keys[2].position));
            assert_eq!(keys[3].position, 1.0);
            assert!(keys.iter().all(|k| k.colour.a == 1.0));

            let darkest = darkest_colour(&colours.gradient);
            assert!(colours.foam_colour.brightness() <= darkest.brightness() + 1e-6);
        }
    }

    #[test]
    fn test_ensure_darker_than() {
        let dark = Rgba::rgb(0.2, 0.2, 0.2);
        let scaled = ensure_darker_than(Rgba::WHITE, dark);
        assert!((scaled.brightness() - 0.2).abs() < 1e-6);
        assert_eq!(ensure_darker_than(Rgba::BLACK, dark), Rgba::BLACK);
    }

    #[test]
    fn test_same_seed_same_planet() {
        let randomizer = PlanetRandomizer::default();
        let a = randomizer
            .randomize_shape(&inspiration(), &mut ChaCha8Rng::seed_from_u64(8))
            .unwrap();
        let b = randomizer
            .randomize_shape(&inspiration(), &mut ChaCha8Rng::seed_from_u64(8))
            .unwrap();
        assert_eq!(a, b);
    }
}
