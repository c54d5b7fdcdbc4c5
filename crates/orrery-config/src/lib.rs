//! Configuration system for the orrery.
//!
//! Runtime-configurable settings persist to disk as `config.ron`. Command-line
//! flags parsed with clap override the loaded values, and every section falls
//! back to its defaults when missing from the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, CatalogConfig, Config, DebugConfig, SimulationConfig,
    ViewportConfig,
    default_famous_designations,
};
pub use error::ConfigError;
