//! Procedural planet terrain: layered noise, surface shape, elevation colouring,
//! and colour-targeted object placement.

mod colour;
mod error;
mod noise_field;
mod randomize;
mod shape;
mod spawner;
mod surface;

pub mod seed;

pub use colour::{ColourField, ColourSettings, DEFAULT_RESOLUTION, Gradient, GradientKey, Rgba, bake};
pub use error::TerrainError;
pub use noise_field::{MAX_OCTAVES, NoiseField, NoiseKind, NoiseLayer};
pub use randomize::{PlanetRandomizer, RandomizerSettings, darkest_colour, ensure_darker_than};
pub use shape::{ElevationRange, ElevationTracker, ShapeGenerator, ShapeSettings, SurfaceSample};
pub use spawner::{BiomeSpawner, Placement, RuleOutcome, SpawnReport, SpawnRule, SpawnerSettings};
pub use surface::{PlanetSurface, SurfaceQuery};
