//! Planet generation pipeline: unit-sphere mesh, noise displacement, elevation
//! colouring, object placement, and the persisted planet catalog.

mod catalog;
mod error;
mod mesh;
mod planet;

pub use catalog::{CatalogSeed, DEFAULT_SLOT_COUNT, PlanetCatalog, PlanetRecord};
pub use error::{CatalogError, PlanetError};
pub use mesh::PlanetMesh;
pub use planet::Planet;
