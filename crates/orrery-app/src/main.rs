//! The `orrery` binary: a headless solar-system orrery driven from the
//! terminal.

use clap::Parser;
use orrery_app::keymap::spawn_stdin_reader;
use orrery_app::{AppError, LogSink, Orrery, PlatformDirs, load_catalog};
use orrery_config::{CliArgs, Config};
use tracing::info;

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("orrery: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let mut dirs = PlatformDirs::resolve()?;
    if let Some(config_dir) = &args.config {
        dirs = dirs.with_config_dir(config_dir.clone());
    }
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config directory: {}", dirs.config_dir.display());
    info!(
        "Viewport {}x{}, seed {}",
        config.viewport.width, config.viewport.height, config.simulation.seed
    );

    let heartbeat = config.debug.heartbeat_interval;
    let mut orrery = Orrery::new(config.clone());
    if config.catalog.enabled {
        let provider = load_catalog(config.catalog.path.as_deref(), &dirs.catalog_path());
        orrery.start_catalog(provider);
    } else {
        info!("Catalog disabled; showing built-in bodies only");
    }

    let (sender, receiver) = crossbeam_channel::unbounded();
    spawn_stdin_reader(sender).map_err(AppError::Input)?;
    info!("Keys: space pause, +/- speed, r stop follow, s follow star, o orbits, m moons, a belts, b glow; `click X Y` selects");

    let mut sink = LogSink::new(heartbeat);
    orrery.run(&receiver, &mut sink);
    Ok(())
}
