//! Elevation colouring: RGBA values, gradients, and the baked lookup table.
//!
//! A [`Gradient`] is evaluated once per texel into a fixed-resolution 1D
//! table. Sampling interpolates linearly between texels and clamps at both
//! ends. The table is only rebuilt when the gradient or resolution changes.

use serde::{Deserialize, Serialize};

use crate::{ElevationRange, TerrainError};

/// Default number of texels in the baked colour table.
pub const DEFAULT_RESOLUTION: u32 = 256;

/// Linear RGBA colour with `f32` channels in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    /// Mid grey, returned when elevation cannot be normalised.
    pub const NEUTRAL: Rgba = Rgba::rgb(0.5, 0.5, 0.5);

    /// Construct from all four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Component-wise linear interpolation; `t = 0` gives `self`.
    #[must_use]
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Mean of the colour channels.
    pub fn brightness(self) -> f32 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Colour channels multiplied by `factor`, alpha unchanged.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Rgba {
        Rgba::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// `true` when every colour channel differs from `other` by less than `threshold`.
    /// Alpha is ignored.
    pub fn close_to(self, other: Rgba, threshold: f32) -> bool {
        (self.r - other.r).abs() < threshold
            && (self.g - other.g).abs() < threshold
            && (self.b - other.b).abs() < threshold
    }

    fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

/// One control point of a [`Gradient`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientKey {
    /// Position in \[0, 1\].
    pub position: f32,
    /// Colour at this position.
    pub colour: Rgba,
}

impl GradientKey {
    /// Convenience constructor.
    pub const fn new(position: f32, colour: Rgba) -> Self {
        Self { position, colour }
    }
}

/// Piecewise-linear colour ramp over \[0, 1\].
///
/// Keys are kept sorted by position. Before the first key and after the last
/// the end colours are held.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GradientKey>", into = "Vec<GradientKey>")]
pub struct Gradient {
    keys: Vec<GradientKey>,
}

impl Gradient {
    /// Build a gradient, sorting keys by position.
    pub fn new(mut keys: Vec<GradientKey>) -> Result<Self, TerrainError> {
        if keys.is_empty() {
            return Err(TerrainError::InvalidGradient("gradient has no keys"));
        }
        if keys
            .iter()
            .any(|k| !(0.0..=1.0).contains(&k.position) || !k.colour.is_finite())
        {
            return Err(TerrainError::InvalidGradient(
                "key positions must lie in [0, 1] and colours must be finite",
            ));
        }
        keys.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { keys })
    }

    /// Sorted control points.
    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    /// Colour at `t`, clamped to \[0, 1\].
    pub fn evaluate(&self, t: f32) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if t <= first.position {
            return first.colour;
        }
        if t >= last.position {
            return last.colour;
        }

        let upper = self.keys.partition_point(|k| k.position <= t);
        let lo = self.keys[upper - 1];
        let hi = self.keys[upper];
        let span = hi.position - lo.position;
        if span <= 0.0 {
            return hi.colour;
        }
        lo.colour.lerp(hi.colour, (t - lo.position) / span)
    }
}

impl TryFrom<Vec<GradientKey>> for Gradient {
    type Error = TerrainError;

    fn try_from(keys: Vec<GradientKey>) -> Result<Self, Self::Error> {
        Gradient::new(keys)
    }
}

impl From<Gradient> for Vec<GradientKey> {
    fn from(gradient: Gradient) -> Self {
        gradient.keys
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            keys: vec![
                GradientKey::new(0.0, Rgba::rgb(0.05, 0.2, 0.55)),
                GradientKey::new(0.35, Rgba::rgb(0.85, 0.8, 0.55)),
                GradientKey::new(0.6, Rgba::rgb(0.2, 0.55, 0.2)),
                GradientKey::new(1.0, Rgba::WHITE),
            ],
        }
    }
}

/// Designer-facing colour configuration for one planet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColourSettings {
    /// Elevation → colour ramp.
    pub gradient: Gradient,
    /// Texel count of the baked table.
    pub resolution: u32,
    /// Shoreline foam tint, kept no brighter than the darkest gradient colour
    /// by the randomizer.
    pub foam_colour: Rgba,
}

impl Default for ColourSettings {
    fn default() -> Self {
        Self {
            gradient: Gradient::default(),
            resolution: DEFAULT_RESOLUTION,
            foam_colour: Rgba::WHITE,
        }
    }
}

impl ColourSettings {
    /// Check that the settings can be baked.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.resolution < 2 {
            return Err(TerrainError::InvalidColourResolution(self.resolution));
        }
        Ok(())
    }
}

/// Evaluate `gradient` at `resolution` evenly spaced positions, texel `i`
/// sitting at `i / (resolution - 1)`.
pub fn bake(gradient: &Gradient, resolution: u32) -> Vec<Rgba> {
    let last = (resolution.max(2) - 1) as f32;
    (0..resolution)
        .map(|i| gradient.evaluate(i as f32 / last))
        .collect()
}

/// Baked colour lookup table.
#[derive(Clone, Debug)]
pub struct ColourField {
    gradient: Gradient,
    resolution: u32,
    table: Vec<Rgba>,
    bakes: u32,
}

impl ColourField {
    /// Validate `settings` and bake the table.
    pub fn new(settings: &ColourSettings) -> Result<Self, TerrainError> {
        settings.validate()?;
        Ok(Self {
            gradient: settings.gradient.clone(),
            resolution: settings.resolution,
            table: bake(&settings.gradient, settings.resolution),
            bakes: 1,
        })
    }

    /// Adopt new settings, rebaking only if the gradient or resolution changed.
    ///
    /// Returns whether a rebake happened.
    pub fn update(&mut self, settings: &ColourSettings) -> Result<bool, TerrainError> {
        settings.validate()?;
        if settings.resolution == self.resolution && settings.gradient == self.gradient {
            return Ok(false);
        }
        self.gradient = settings.gradient.clone();
        self.resolution = settings.resolution;
        self.table = bake(&self.gradient, self.resolution);
        self.bakes += 1;
        Ok(true)
    }

    /// Colour at normalised position `t`, clamped to \[0, 1\].
    ///
    /// Texels are interpolated linearly, so the result matches the gradient
    /// exactly at texel positions and at any point whose texel span holds no
    /// gradient key. A key falling strictly inside a span of width
    /// `h = 1 / (resolution - 1)` bends the gradient there; per channel the
    /// error is at most `h / 4` times the sum of the slope changes at the
    /// keys inside that span.
    pub fn sample(&self, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.table.len() - 1;
        let x = t * last as f64;
        let i0 = (x.floor() as usize).min(last);
        let i1 = (i0 + 1).min(last);
        let frac = (x - i0 as f64) as f32;
        self.table[i0].lerp(self.table[i1], frac)
    }

    /// Colour for a raw elevation given the pass's elevation range.
    ///
    /// A flat range cannot be normalised and yields [`Rgba::NEUTRAL`].
    pub fn sample_elevation(&self, elevation: f64, range: &ElevationRange) -> Rgba {
        match range.normalize(elevation) {
            Some(t) => self.sample(t),
            None => Rgba::NEUTRAL,
        }
    }

    /// The baked texels.
    pub fn table(&self) -> &[Rgba] {
        &self.table
    }

    /// Texel count.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The gradient the table was baked from.
    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    /// How many times the table has been baked.
    pub fn bake_count(&self) -> u32 {
        self.bakes
    }
}
