//! Fractal gradient-noise layers.
//!
//! Each [`NoiseLayer`] describes one octave stack; a [`NoiseField`] binds a
//! layer to a seeded simplex generator and evaluates it at points on (or near)
//! the unit sphere.

use std::fmt;

use glam::DVec3;
use noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

use crate::TerrainError;

/// Upper limit on octaves per layer.
pub const MAX_OCTAVES: u32 = 16;

/// Noise filter applied to each octave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseKind {
    /// Plain fractal Brownian motion.
    #[default]
    Simple,
    /// Ridged multifractal: sharp crests where the raw noise crosses zero,
    /// each octave weighted by the previous one.
    Ridged,
}

/// Parameters of a single noise layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseLayer {
    /// Disabled layers contribute nothing.
    pub enabled: bool,
    /// Scale this layer by the (non-negative) value of layer 0.
    pub use_first_layer_as_mask: bool,
    /// Octave filter.
    pub kind: NoiseKind,
    /// Output multiplier.
    pub strength: f64,
    /// Frequency of the first octave.
    pub base_roughness: f64,
    /// Frequency multiplier between octaves.
    pub roughness: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Offset added to the sampling point.
    pub centre: DVec3,
    /// Normalised values below this floor are cut to zero.
    pub min_value: f64,
    /// Octave count.
    pub num_layers: u32,
    /// Ridge weight feedback. Only used by [`NoiseKind::Ridged`].
    pub weight_multiplier: f64,
}

impl Default for NoiseLayer {
    fn default() -> Self {
        Self {
            enabled: true,
            use_first_layer_as_mask: false,
            kind: NoiseKind::Simple,
            strength: 1.0,
            base_roughness: 1.0,
            roughness: 2.0,
            persistence: 0.5,
            centre: DVec3::ZERO,
            min_value: 0.0,
            num_layers: 1,
            weight_multiplier: 0.8,
        }
    }
}

impl NoiseLayer {
    /// Check parameters for the layer at position `index`.
    pub fn validate(&self, index: usize) -> Result<(), TerrainError> {
        let fail = |reason| Err(TerrainError::InvalidNoiseLayer { index, reason });
        if self.num_layers == 0 || self.num_layers > MAX_OCTAVES {
            return fail("octave count must be between 1 and 16");
        }
        if !self.strength.is_finite() || !self.min_value.is_finite() {
            return fail("strength and min value must be finite");
        }
        if !(self.base_roughness.is_finite() && self.base_roughness > 0.0) {
            return fail("base roughness must be positive");
        }
        if !(self.roughness.is_finite() && self.roughness > 0.0) {
            return fail("roughness must be positive");
        }
        if !(self.persistence.is_finite() && self.persistence >= 0.0) {
            return fail("persistence must be non-negative");
        }
        if !self.centre.is_finite() {
            return fail("centre must be finite");
        }
        if !self.weight_multiplier.is_finite() {
            return fail("weight multiplier must be finite");
        }
        Ok(())
    }
}

/// A noise layer bound to a seeded gradient-noise source.
#[derive(Clone)]
pub struct NoiseField {
    layer: NoiseLayer,
    seed: u32,
    noise: Simplex,
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField")
            .field("layer", &self.layer)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl NoiseField {
    /// Bind `layer` to the simplex permutation selected by `seed`.
    pub fn new(layer: &NoiseLayer, seed: u32) -> Self {
        Self {
            layer: layer.clone(),
            seed,
            noise: Simplex::new(seed),
        }
    }

    /// The layer parameters.
    pub fn layer(&self) -> &NoiseLayer {
        &self.layer
    }

    /// Evaluate the layer at `point`.
    ///
    /// The octave sum is normalised by the total amplitude, so before the
    /// floor and strength are applied it lies in \[-1, 1\] (Simple) or
    /// \[0, 1\] (Ridged).
    pub fn evaluate(&self, point: DVec3) -> f64 {
        let layer = &self.layer;
        let mut sum = 0.0;
        let mut total_amplitude = 0.0;
        let mut frequency = layer.base_roughness;
        let mut amplitude = 1.0;
        let mut weight = 1.0;

        for _ in 0..layer.num_layers {
            let p = point * frequency + layer.centre;
            let n = self.noise.get([p.x, p.y, p.z]).clamp(-1.0, 1.0);
            let v = match layer.kind {
                NoiseKind::Simple => n,
                NoiseKind::Ridged => {
                    let ridge = 1.0 - n.abs();
                    let v = ridge * ridge * weight;
                    weight = (v * layer.weight_multiplier).clamp(0.0, 1.0);
                    v
                }
            };
            sum += v * amplitude;
            total_amplitude += amplitude;
            frequency *= layer.roughness;
            amplitude *= layer.persistence;
        }

        let normalised = sum / total_amplitude;
        (normalised - layer.min_value).max(0.0) * layer.strength
    }

    /// Upper bound on `|evaluate(p)|` over all points.
    pub fn max_value(&self) -> f64 {
        self.layer.strength.abs() * (1.0 - self.layer.min_value).max(0.0)
    }
}
