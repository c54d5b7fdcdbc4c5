//! Configuration structs with orrery defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level orrery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Clock, speed and seeding.
    pub simulation: SimulationConfig,
    /// Camera projection and canonical poses.
    pub camera: CameraConfig,
    /// Size of the surface pointer coordinates are measured against.
    pub viewport: ViewportConfig,
    /// External small-body catalog.
    pub catalog: CatalogConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Simulated clock and population seeding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for every procedural population and placement.
    pub seed: u64,
    /// Speed multiplier at startup.
    pub initial_speed: f64,
    /// Upper clamp for the speed multiplier. The lower clamp is always 0.
    pub max_speed: f64,
    /// Step applied by the speed up / speed down keys.
    pub speed_step: f64,
    /// Simulated milliseconds advanced per second of ticks at speed 1.
    pub base_tick_ms: f64,
    /// Tick cadence the clock assumes the driver runs at.
    pub ticks_per_second: f64,
    /// Angular rate used while the speed multiplier is 0.
    pub realtime_fallback_rate: f64,
    /// Start with the clock paused.
    pub start_paused: bool,
    /// Stop the driver after this many ticks. `None` runs until interrupted.
    pub tick_limit: Option<u64>,
}

/// Camera projection and canonical poses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Near clip plane.
    pub near: f64,
    /// Far clip plane.
    pub far: f64,
    /// Camera position when nothing is followed.
    pub home_position: [f64; 3],
    /// Look-at point when nothing is followed.
    pub home_target: [f64; 3],
    /// Zoom bounds at startup.
    pub initial_min_distance: f64,
    pub initial_max_distance: f64,
    /// Zoom bounds restored by stop-follow.
    pub reset_min_distance: f64,
    pub reset_max_distance: f64,
}

/// Viewport size in physical pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

/// External small-body catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Load the catalog in the background at startup.
    pub enabled: bool,
    /// RON catalog file. Without one the loader delivers empty batches.
    pub path: Option<PathBuf>,
    /// Scene units per astronomical unit.
    pub au_to_scene: f64,
    /// Maximum near-Earth objects placed.
    pub neo_limit: usize,
    /// Maximum impact-monitored objects placed.
    pub sentry_limit: usize,
    /// Maximum comets placed.
    pub comet_limit: usize,
    /// Pause between successive designation lookups.
    pub request_spacing_ms: u64,
    /// Designations looked up one by one for Keplerian placement.
    pub famous: Vec<String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Ticks between heartbeat log lines. 0 disables the heartbeat.
    pub heartbeat_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x0DE5_5A7E,
            initial_speed: 0.4,
            max_speed: 10.0,
            speed_step: 0.5,
            base_tick_ms: 86_400_000.0,
            ticks_per_second: 60.0,
            realtime_fallback_rate: 0.0001,
            start_paused: false,
            tick_limit: None,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            home_position: [0.0, 30.0, 70.0],
            home_target: [0.0, 0.0, 0.0],
            initial_min_distance: 8.0,
            initial_max_distance: 200.0,
            reset_min_distance: 0.1,
            reset_max_distance: 1000.0,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            au_to_scene: 15.0,
            neo_limit: 30,
            sentry_limit: 20,
            comet_limit: 15,
            request_spacing_ms: 50,
            famous: default_famous_designations(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            heartbeat_interval: 60,
        }
    }
}

/// Well-known asteroids looked up by designation at startup.
pub fn default_famous_designations() -> Vec<String> {
    [
        "Apophis", "Bennu", "Ryugu", "Didymos", "Dimorphos", "Itokawa", "Psyche", "Vesta",
        "Ceres", "Pallas", "Hygiea", "Eros", "Gaspra", "Ida", "Mathilde", "Steins", "Lutetia",
        "Dinkinesh", "Toutatis", "Florence", "Icarus", "Geographos", "Castalia", "Toro", "Amor",
        "Apollo", "Anteros", "Ganymed", "Ivar", "Daphne", "Europa", "Davida", "Interamnia",
        "Hebe", "Iris", "Flora", "Metis", "Parthenope", "Eunomia", "Juno", "Astraea", "Thisbe",
        "Cybele", "Herculina", "Sylvia", "Patroclus", "Hektor", "Euphrosyne", "Fortuna",
        "Massalia", "Kleopatra", "Dactyl", "Linus", "Eurybates", "Polymele", "Leucus", "Orus",
        "Donaldjohanson",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// --- Load / Save / Reload ---

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.sanitize();
    Ok(config)
}

fn valid_bounds(min: f64, max: f64) -> bool {
    min.is_finite() && max.is_finite() && min >= 0.0 && min <= max
}

impl Config {
    /// Replace values the simulation cannot run with by their defaults and
    /// warn about each. Returns the names of the fields that were reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut reset = Vec::new();

        let defaults = SimulationConfig::default();
        let sim = &mut self.simulation;
        if !(sim.max_speed.is_finite() && sim.max_speed >= 0.0) {
            sim.max_speed = defaults.max_speed;
            reset.push("simulation.max_speed");
        }
        if !(sim.initial_speed.is_finite() && sim.initial_speed >= 0.0) {
            sim.initial_speed = defaults.initial_speed.min(sim.max_speed);
            reset.push("simulation.initial_speed");
        } else if sim.initial_speed > sim.max_speed {
            sim.initial_speed = sim.max_speed;
            reset.push("simulation.initial_speed");
        }
        if !(sim.speed_step.is_finite() && sim.speed_step > 0.0) {
            sim.speed_step = defaults.speed_step;
            reset.push("simulation.speed_step");
        }
        if !(sim.base_tick_ms.is_finite() && sim.base_tick_ms >= 0.0) {
            sim.base_tick_ms = defaults.base_tick_ms;
            reset.push("simulation.base_tick_ms");
        }
        if !(sim.ticks_per_second.is_finite() && sim.ticks_per_second > 0.0) {
            sim.ticks_per_second = defaults.ticks_per_second;
            reset.push("simulation.ticks_per_second");
        }
        if !sim.realtime_fallback_rate.is_finite() {
            sim.realtime_fallback_rate = defaults.realtime_fallback_rate;
            reset.push("simulation.realtime_fallback_rate");
        }

        let defaults = CameraConfig::default();
        let camera = &mut self.camera;
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            camera.fov_y_degrees = defaults.fov_y_degrees;
            reset.push("camera.fov_y_degrees");
        }
        if !(camera.near > 0.0 && camera.far.is_finite() && camera.far > camera.near) {
            camera.near = defaults.near;
            camera.far = defaults.far;
            reset.push("camera.near/far");
        }
        if !camera
            .home_position
            .iter()
            .chain(&camera.home_target)
            .all(|v| v.is_finite())
        {
            camera.home_position = defaults.home_position;
            camera.home_target = defaults.home_target;
            reset.push("camera.home_position/home_target");
        }
        if !valid_bounds(camera.initial_min_distance, camera.initial_max_distance) {
            camera.initial_min_distance = defaults.initial_min_distance;
            camera.initial_max_distance = defaults.initial_max_distance;
            reset.push("camera.initial_min_distance/initial_max_distance");
        }
        if !valid_bounds(camera.reset_min_distance, camera.reset_max_distance) {
            camera.reset_min_distance = defaults.reset_min_distance;
            camera.reset_max_distance = defaults.reset_max_distance;
            reset.push("camera.reset_min_distance/reset_max_distance");
        }

        if !(self.catalog.au_to_scene.is_finite() && self.catalog.au_to_scene > 0.0) {
            self.catalog.au_to_scene = CatalogConfig::default().au_to_scene;
            reset.push("catalog.au_to_scene");
        }

        for field in &reset {
            log::warn!("Invalid {field} in config, using default");
        }
        reset
    }
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = read_config(&config_path)?;
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
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let write_error = |source| ConfigError::Write {
            path: config_path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::write(&config_path, serialized).map_err(write_error)?;
        Ok(())
    }

    /// Re-read `config.ron`; `Some(new_config)` when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = read_config(&config_dir.join(CONFIG_FILE_NAME))?;
        if &new_config == self {
            return Ok(None);
        }
        log::info!("Config reloaded with changes");
        Ok(Some(new_config))
    }

    /// Width over height of the viewport, never dividing by zero.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.viewport.width.max(1)) / f64::from(self.viewport.height.max(1))
    }
}
