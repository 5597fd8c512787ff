//! Slot-indexed planet settings persisted as RON.
//!
//! The first time a catalog is requested every slot is randomized from a
//! seeded stream and written to disk; later sessions load the same planets
//! back verbatim.

use std::path::Path;

use planetforge_terrain::seed::slot_rng;
use planetforge_terrain::{ColourSettings, PlanetRandomizer, ShapeSettings};
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Number of slots created when none is configured.
pub const DEFAULT_SLOT_COUNT: usize = 5;

/// Settings for one planet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetRecord {
    pub shape: ShapeSettings,
    pub colours: ColourSettings,
}

/// Inputs used to randomize a fresh catalog.
pub struct CatalogSeed<'a> {
    /// Seed from which every slot's stream is derived.
    pub world_seed: u64,
    /// Number of slots to create.
    pub slot_count: usize,
    pub randomizer: &'a PlanetRandomizer,
    /// Source layers for shape randomization.
    pub inspiration: &'a ShapeSettings,
    /// Supplies the table resolution and foam colour.
    pub base_colours: &'a ColourSettings,
}

/// Persisted planet snapshots keyed by slot index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetCatalog {
    /// Seed the slots were generated from.
    pub world_seed: u64,
    /// One record per slot.
    pub slots: Vec<PlanetRecord>,
}

impl PlanetCatalog {
    /// Randomize every slot. Slot `i` draws from its own stream, so its
    /// planet does not depend on the slot count.
    pub fn generate(seed: &CatalogSeed<'_>) -> Result<Self, CatalogError> {
        let slots = (0..seed.slot_count)
            .map(|index| -> Result<PlanetRecord, CatalogError> {
                let mut rng = slot_rng(seed.world_seed, index);
                let shape = seed.randomizer.randomize_shape(seed.inspiration, &mut rng)?;
                let colours = seed.randomizer.randomize_colours(seed.base_colours, &mut rng)?;
                Ok(PlanetRecord { shape, colours })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            world_seed: seed.world_seed,
            slots,
        })
    }

    /// Load the catalog at `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(CatalogError::ReadError)?;
        ron::from_str(&contents).map_err(CatalogError::ParseError)
    }

    /// Load the catalog at `path`, or generate and save a new one.
    pub fn load_or_generate(path: &Path, seed: &CatalogSeed<'_>) -> Result<Self, CatalogError> {
        if path.exists() {
            let catalog = Self::load(path)?;
            tracing::info!(
                "Loaded planet catalog with {} slots from {}",
                catalog.len(),
                path.display()
            );
            Ok(catalog)
        } else {
            let catalog = Self::generate(seed)?;
            catalog.save(path)?;
            tracing::info!(
                "Generated planet catalog with {} slots at {}",
                catalog.len(),
                path.display()
            );
            Ok(catalog)
        }
    }

    /// Write the catalog to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CatalogError::WriteError)?;
        }
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(5)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(CatalogError::SerializeError)?;
        std::fs::write(path, serialized).map_err(CatalogError::WriteError)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Result<&PlanetRecord, CatalogError> {
        self.slots.get(index).ok_or(CatalogError::SlotOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    /// Replace the record in an existing slot.
    pub fn set_slot(&mut self, index: usize, record: PlanetRecord) -> Result<(), CatalogError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(CatalogError::SlotOutOfRange { index, len })?;
        *slot = record;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetforge_terrain::{NoiseKind, NoiseLayer};

    fn inspiration() -> ShapeSettings {
        ShapeSettings {
            layers: vec![
                NoiseLayer {
                    strength: 0.2,
                    num_layers: 4,
                    ..Default::default()
                },
                NoiseLayer {
                    kind: NoiseKind::Ridged,
                    use_first_layer_as_mask: true,
                    num_layers: 4,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn with_seed<T>(world_seed: u64, slot_count: usize, f: impl FnOnce(&CatalogSeed<'_>) -> T) -> T {
        let randomizer = PlanetRandomizer::default();
        let inspiration = inspiration();
        let base_colours = ColourSettings::default();
        f(&CatalogSeed {
            world_seed,
            slot_count,
            randomizer: &randomizer,
            inspiration: &inspiration,
            base_colours: &base_colours,
        })
    }

    #[test]
    fn test_generate_fills_every_slot() {
        let catalog = with_seed(3, DEFAULT_SLOT_COUNT, |s| PlanetCatalog::generate(s)).unwrap();
        assert_eq!(catalog.len(), DEFAULT_SLOT_COUNT);
        assert_ne!(catalog.slot(0).unwrap(), catalog.slot(1).unwrap());
    }

    #[test]
    fn test_slots_independent_of_count() {
        let small = with_seed(9, 2, |s| PlanetCatalog::generate(s)).unwrap();
        let large = with_seed(9, 5, |s| PlanetCatalog::generate(s)).unwrap();
        assert_eq!(small.slots[..], large.slots[..2]);
    }

    #[test]
    fn test_generate_with_zero_persistence_inspiration() {
        let randomizer = PlanetRandomizer::default();
        let mut inspiration = inspiration();
        for layer in &mut inspiration.layers {
            layer.persistence = 0.0;
        }
        let base_colours = ColourSettings::default();
        let catalog = PlanetCatalog::generate(&CatalogSeed {
            world_seed: 11,
            slot_count: 20,
            randomizer: &randomizer,
            inspiration: &inspiration,
            base_colours: &base_colours,
        })
        .unwrap();
        assert_eq!(catalog.len(), 20);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("planets.ron");
        let catalog = with_seed(1, 3, |s| PlanetCatalog::generate(s)).unwrap();
        catalog.save(&path).unwrap();
        assert_eq!(PlanetCatalog::load(&path).unwrap(), catalog);
    }

    #[test]
    fn test_load_or_generate_is_stable_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planets.ron");
        let first = with_seed(4, 3, |s| PlanetCatalog::load_or_generate(&path, s)).unwrap();
        assert!(path.exists());
        // A different seed must not override what is already on disk.
        let second = with_seed(99, 5, |s| PlanetCatalog::load_or_generate(&path, s)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_slot_out_of_range() {
        let mut catalog = PlanetCatalog::default();
        assert!(matches!(
            catalog.slot(2),
            Err(CatalogError::SlotOutOfRange { index: 2, len: 0 })
        ));
        assert!(catalog.set_slot(0, PlanetRecord::default()).is_err());
    }

    #[test]
    fn test_set_slot_replaces_record() {
        let mut catalog = with_seed(2, 2, |s| PlanetCatalog::generate(s)).unwrap();
        catalog.set_slot(1, PlanetRecord::default()).unwrap();
        assert_eq!(catalog.slot(1).unwrap(), &PlanetRecord::default());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planets.ron");
        std::fs::write(&path, "{{not valid}}").unwrap();
        assert!(matches!(
            PlanetCatalog::load(&path),
            Err(CatalogError::ParseError(_))
        ));
    }

    #[test]
    fn test_inspiration_without_ridged_layer_fails() {
        let randomizer = PlanetRandomizer::default();
        let mut inspiration = inspiration();
        inspiration.layers.truncate(1);
        let base_colours = ColourSettings::default();
        let result = PlanetCatalog::generate(&CatalogSeed {
            world_seed: 0,
            slot_count: 1,
            randomizer: &randomizer,
            inspiration: &inspiration,
            base_colours: &base_colours,
        });
        assert!(matches!(result, Err(CatalogError::Randomize(_))));
    }
}
