//! Command-line argument parsing for planetforge.

use std::path::PathBuf;

use clap::Parser;
use planetforge_cubesphere::SphereTopology;

use crate::Config;

/// planetforge command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "planetforge", about = "Procedural planet generator")]
pub struct CliArgs {
    /// Quads per cube face edge.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Icosphere subdivision depth (0-3).
    #[arg(long)]
    pub subdivisions: Option<u32>,

    /// Build an icosphere instead of a cube-sphere.
    #[arg(long)]
    pub icosphere: Option<bool>,

    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Catalog slot to generate.
    #[arg(long)]
    pub slot: Option<usize>,

    /// Spawner attempt budget shared by all rules.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Minimum distance between placed objects.
    #[arg(long)]
    pub min_distance: Option<f64>,

    /// Spawn rule file (RON list of rules).
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Discard the saved catalog and randomize a new one.
    #[arg(long)]
    pub regenerate: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let mesh = &mut self.generation.mesh;
        if let Some(r) = args.resolution {
            mesh.resolution = r;
        }
        if let Some(s) = args.subdivisions {
            mesh.subdivisions = s;
        }
        if let Some(ico) = args.icosphere {
            mesh.topology = if ico {
                SphereTopology::Icosphere
            } else {
                SphereTopology::CubeSphere
            };
        }
        if let Some(seed) = args.seed {
            self.generation.world_seed = seed;
        }
        if let Some(slot) = args.slot {
            self.generation.active_slot = slot;
        }
        if let Some(n) = args.max_attempts {
            self.spawner.max_attempts = n;
        }
        if let Some(d) = args.min_distance {
            self.spawner.min_distance = d;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            resolution: Some(32),
            icosphere: Some(true),
            seed: Some(77),
            min_distance: Some(0.5),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.generation.mesh.resolution, 32);
        assert_eq!(config.generation.mesh.topology, SphereTopology::Icosphere);
        assert_eq!(config.generation.world_seed, 77);
        assert_eq!(config.spawner.min_distance, 0.5);
        // Non-overridden fields retain defaults
        assert_eq!(config.generation.mesh.subdivisions, 3);
        assert_eq!(config.spawner.max_attempts, 1000);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "planetforge",
            "--resolution",
            "16",
            "--icosphere",
            "false",
            "--regenerate",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.resolution, Some(16));
        assert_eq!(args.icosphere, Some(false));
        assert!(args.regenerate);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
