//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use planetforge_cubesphere::SphereMeshParams;
use planetforge_terrain::{
    ColourSettings, NoiseKind, NoiseLayer, RandomizerSettings, ShapeSettings, SpawnerSettings,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Mesh and seed selection.
    pub generation: GenerationConfig,
    /// Object placement limits.
    pub spawner: SpawnerSettings,
    /// Random planet bounds.
    pub randomizer: RandomizerSettings,
    /// Persisted planet slots.
    pub catalog: CatalogConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Topology, resolution, subdivisions, projection and face mask.
    pub mesh: SphereMeshParams,
    /// Seed for catalog randomization and object placement.
    pub world_seed: u64,
    /// Catalog slot to generate.
    pub active_slot: usize,
}

/// Planet catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Slots created when the catalog file does not exist yet.
    pub slot_count: usize,
    /// Catalog file name, relative to the config directory.
    pub file_name: String,
    /// Optional spawn rule file, relative to the config directory.
    pub rules_file: Option<String>,
    /// Layers the randomizer draws from. Needs a Simple and a Ridged layer.
    pub inspiration: ShapeSettings,
    /// Table resolution and foam colour for randomized colours.
    pub base_colours: ColourSettings,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mesh: SphereMeshParams::default(),
            world_seed: 0,
            active_slot: 0,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            slot_count: 5,
            file_name: "planets.ron".to_string(),
            rules_file: None,
            inspiration: ShapeSettings {
                layers: vec![
                    NoiseLayer {
                        strength: 0.15,
                        base_roughness: 0.7,
                        roughness: 2.2,
                        persistence: 0.5,
                        num_layers: 4,
                        min_value: 0.95,
                        ..Default::default()
                    },
                    NoiseLayer {
                        kind: NoiseKind::Ridged,
                        use_first_layer_as_mask: true,
                        strength: 1.5,
                        base_roughness: 1.2,
                        roughness: 2.3,
                        persistence: 0.5,
                        num_layers: 5,
                        min_value: 0.4,
                        weight_multiplier: 0.8,
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            base_colours: ColourSettings::default(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Catalog file location inside `config_dir`.
    pub fn path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.file_name)
    }

    /// Spawn rule file location inside `config_dir`, if one is configured.
    pub fn rules_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.rules_file.as_ref().map(|name| config_dir.join(name))
    }
}

/// `<platform config dir>/planetforge`, or `override_dir` when given.
pub fn resolve_config_dir(override_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => dirs::config_dir()
            .map(|dir| dir.join("planetforge"))
            .ok_or(ConfigError::NoConfigDir),
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
