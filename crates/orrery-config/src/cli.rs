//! Command-line argument parsing for the orrery driver.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Headless solar-system orrery")]
pub struct CliArgs {
    /// Initial speed multiplier (0 = realtime date, clamped to the max speed).
    #[arg(long)]
    pub speed: Option<f64>,

    /// Start with the clock paused.
    #[arg(long)]
    pub paused: bool,

    /// Seed for procedural populations.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many ticks.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Skip the background catalog load.
    #[arg(long)]
    pub offline: bool,

    /// RON catalog file with small-body orbital elements.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Viewport width used for pointer picking.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height used for pointer picking.
    #[arg(long)]
    pub height: Option<u32>,

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
        if let Some(speed) = args.speed {
            if speed.is_nan() {
                log::warn!("Ignoring --speed NaN");
            } else {
                self.simulation.initial_speed = speed.max(0.0).min(self.simulation.max_speed);
            }
        }
        if args.paused {
            self.simulation.start_paused = true;
        }
        if let Some(seed) = args.seed {
            self.simulation.seed = seed;
        }
        if let Some(ticks) = args.ticks {
            self.simulation.tick_limit = Some(ticks);
        }
        if args.offline {
            self.catalog.enabled = false;
        }
        if let Some(ref path) = args.catalog {
            self.catalog.path = Some(path.clone());
        }
        if let Some(w) = args.width {
            self.viewport.width = w;
        }
        if let Some(h) = args.height {
            self.viewport.height = h;
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
            speed: Some(2.5),
            seed: Some(11),
            offline: true,
            width: Some(1920),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.simulation.initial_speed, 2.5);
        assert_eq!(config.simulation.seed, 11);
        assert!(!config.catalog.enabled);
        assert_eq!(config.viewport.width, 1920);
        // Non-overridden fields retain defaults
        assert_eq!(config.viewport.height, 720);
        assert!(!config.simulation.start_paused);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_speed_is_clamped() {
        let mut config = Config::default();
        let args = CliArgs {
            speed: Some(40.0),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.simulation.initial_speed, 10.0);
    }

    #[test]
    fn test_cli_nan_speed_is_ignored() {
        let args = CliArgs::try_parse_from(["orrery", "--speed", "NaN"]).unwrap();
        assert!(args.speed.is_some_and(f64::is_nan));
        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config.simulation.initial_speed, 0.4);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args =
            CliArgs::try_parse_from(["orrery", "--paused", "--ticks", "120", "--catalog", "c.ron"])
                .unwrap();
        assert!(args.paused);
        assert_eq!(args.ticks, Some(120));
        assert_eq!(args.catalog, Some(PathBuf::from("c.ron")));
    }
}
