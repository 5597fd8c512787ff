//! Generates one planet from the catalog, places objects on it, and logs a
//! summary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p planetforge-demo -- --slot 2 --resolution 64`.

mod rules;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use planetforge_config::{CliArgs, Config, ConfigError, resolve_config_dir};
use planetforge_planet::{CatalogError, CatalogSeed, Planet, PlanetCatalog, PlanetError};
use planetforge_terrain::{BiomeSpawner, PlanetRandomizer, TerrainError, seed::slot_rng};
use tracing::{error, info, warn};

/// Anything that stops the demo.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Planet(#[from] PlanetError),

    #[error(transparent)]
    Terrain(#[from] TerrainError),

    #[error("failed to read spawn rules: {0}")]
    RulesRead(#[source] std::io::Error),

    #[error("failed to parse spawn rules: {0}")]
    RulesParse(#[source] ron::error::SpannedError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match resolve_config_dir(args.config.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    planetforge_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config, &config_dir, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, config_dir: &Path, args: &CliArgs) -> Result<(), DemoError> {
    let randomizer = PlanetRandomizer::new(config.randomizer.clone())?;
    let catalog_path = config.catalog.path(config_dir);
    if args.regenerate && catalog_path.exists() {
        info!("Discarding saved catalog at {}", catalog_path.display());
    }

    let seed = CatalogSeed {
        world_seed: config.generation.world_seed,
        slot_count: config.catalog.slot_count,
        randomizer: &randomizer,
        inspiration: &config.catalog.inspiration,
        base_colours: &config.catalog.base_colours,
    };
    let catalog = if args.regenerate {
        let catalog = PlanetCatalog::generate(&seed)?;
        catalog.save(&catalog_path)?;
        catalog
    } else {
        PlanetCatalog::load_or_generate(&catalog_path, &seed)?
    };

    let slot = config.generation.active_slot;
    let record = catalog.slot(slot)?;
    info!(
        "Slot {slot}: radius {:.2}, {} noise layers, {} gradient keys",
        record.shape.planet_radius,
        record.shape.layers.len(),
        record.colours.gradient.keys().len()
    );

    let mut planet = Planet::new(
        Some(record.shape.clone()),
        Some(record.colours.clone()),
        config.generation.mesh,
    )?;
    let bound = planet.shape_generator().max_displacement();
    let mesh = planet.generate()?;
    let (inner, outer) = mesh.radial_extent();
    info!(
        "Mesh: {} vertices, {} triangles, radius span [{inner:.3}, {outer:.3}], bound ±{bound:.3}",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    let rules_path = args
        .rules
        .clone()
        .or_else(|| config.catalog.rules_path(config_dir));
    let rules = match rules_path {
        Some(path) => rules::load_rules(&path)?,
        None => rules::default_rules(planet.colour_settings()),
    };

    let spawner = BiomeSpawner::new(config.spawner.clone())?;
    let mut rng = slot_rng(config.generation.world_seed, slot);
    let report = planet.spawn(&spawner, &rules, &mut rng)?;
    for outcome in &report.outcomes {
        info!(
            "  {:<12} {:>4}/{:<4} in {} groups",
            outcome.name, outcome.placed, outcome.target, outcome.groups
        );
    }
    if !report.fully_satisfied() {
        warn!(
            "Not every spawn rule was satisfied within {} attempts",
            spawner.settings().max_attempts
        );
    }
    Ok(())
}
