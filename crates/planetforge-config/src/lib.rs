//! Configuration for planetforge.
//!
//! Settings persist to disk as RON and can be overridden from the command
//! line. Missing fields fall back to defaults, unknown fields are ignored.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CatalogConfig, Config, DebugConfig, GenerationConfig, resolve_config_dir};
pub use error::ConfigError;
