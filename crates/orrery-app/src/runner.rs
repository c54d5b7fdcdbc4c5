//! The assembled orrery: registry, simulation state, catalog loader and the
//! fixed-rate driver loop.

use std::path::Path;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use orrery_config::Config;
use orrery_sim::{
    BodyId, CatalogFile, CatalogLoader, CatalogProvider, Command, Registry, SimulationState,
    SystemWallClock, WallClock, integrate_batch, placement_rng,
};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::game_loop::GameLoop;
use crate::sink::RenderSink;

pub struct Orrery {
    config: Config,
    registry: Registry,
    state: SimulationState,
    loader: Option<CatalogLoader>,
    placement: ChaCha8Rng,
    wall: Box<dyn WallClock>,
    last_selected: Option<BodyId>,
}

impl Orrery {
    /// Build the built-in system with the system wall clock.
    pub fn new(config: Config) -> Self {
        Self::with_wall_clock(config, Box::new(SystemWallClock))
    }

    pub fn with_wall_clock(config: Config, wall: Box<dyn WallClock>) -> Self {
        let seed = config.simulation.seed;
        let registry = Registry::with_builtin(seed);
        let state = SimulationState::new(&config, wall.now());
        Self {
            config,
            registry,
            state,
            loader: None,
            placement: placement_rng(seed),
            wall,
            last_selected: None,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Start fetching catalog data in the background.
    pub fn start_catalog(&mut self, provider: Arc<dyn CatalogProvider>) {
        info!(
            "Loading catalog: {} famous designations",
            self.config.catalog.famous.len()
        );
        self.loader = Some(CatalogLoader::spawn(provider, &self.config.catalog));
    }

    pub fn catalog_pending(&self) -> bool {
        self.loader.as_ref().is_some_and(|loader| !loader.is_finished())
    }

    /// Whether the configured tick limit has been reached.
    pub fn finished(&self) -> bool {
        self.config
            .simulation
            .tick_limit
            .is_some_and(|limit| self.state.tick_count() >= limit)
    }

    /// One simulation tick: queue input, place arrived catalog bodies,
    /// advance and present the frame.
    pub fn step(&mut self, commands: impl IntoIterator<Item = Command>, sink: &mut dyn RenderSink) {
        for command in commands {
            self.state.push(command);
        }

        if let Some(loader) = self.loader.as_mut() {
            for batch in loader.poll() {
                integrate_batch(
                    &mut self.registry,
                    &batch,
                    &self.config.catalog,
                    &mut self.placement,
                );
            }
            if loader.is_finished() {
                info!("Catalog load complete, {} bodies in system", self.registry.len());
                self.loader = None;
            }
        }

        let frame = self.state.tick(&mut self.registry, self.wall.as_ref());
        if frame.selected != self.last_selected {
            self.last_selected = frame.selected;
            self.log_selection();
        }
        sink.present(&frame);
    }

    fn log_selection(&self) {
        let Some(card) = self.last_selected.and_then(|id| self.registry.info_card(id)) else {
            return;
        };
        info!(
            "{} ({}): distance {:.1}, size {:.2}, period {:.2} years, discovered {}",
            card.name,
            card.kind,
            card.distance,
            card.size,
            card.orbital_period_years,
            card.discovery_year.as_deref().unwrap_or("unknown"),
        );
        for moon in &card.moons {
            match moon.period_days {
                Some(days) => info!("  {} at {:.1}, period {:.1} days", moon.name, moon.distance, days),
                None => info!("  {} at {:.1}", moon.name, moon.distance),
            }
        }
    }

    /// Run at the configured tick rate until the tick limit, draining
    /// `input` before every step.
    pub fn run(&mut self, input: &Receiver<Command>, sink: &mut dyn RenderSink) {
        let mut game_loop = GameLoop::new(self.config.simulation.ticks_per_second);
        info!(
            "Running at {:.0} ticks per second{}",
            self.config.simulation.ticks_per_second,
            match self.config.simulation.tick_limit {
                Some(limit) => format!(" for {limit} ticks"),
                None => String::new(),
            }
        );

        while !self.finished() {
            game_loop.tick(|_| {
                if !self.finished() {
                    let commands: Vec<Command> = input.try_iter().collect();
                    self.step(commands, sink);
                }
            });
            std::thread::sleep(game_loop.until_next_step());
        }

        info!("Stopped after {} ticks", self.state.tick_count());
    }
}

/// Catalog provider for this run: the configured file, else the default
/// data-directory file, else an empty catalog.
pub fn load_catalog(configured: Option<&Path>, default_path: &Path) -> Arc<dyn CatalogProvider> {
    let path = match configured {
        Some(path) => Some(path),
        None => default_path.exists().then_some(default_path),
    };
    let file = match path {
        Some(path) => CatalogFile::load(path).unwrap_or_else(|err| {
            warn!("{err}; continuing without catalog data");
            CatalogFile::default()
        }),
        None => {
            info!("No catalog file found; fetched bodies will be empty");
            CatalogFile::default()
        }
    };
    Arc::new(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use orrery_sim::{BodyKind, FixedWallClock, RenderFrame};

    const DEMO_CATALOG: &str = include_str!("../../../assets/catalog.ron");

    #[derive(Default)]
    struct CollectSink {
        frames: Vec<RenderFrame>,
    }

    impl RenderSink for CollectSink {
        fn present(&mut self, frame: &RenderFrame) {
            self.frames.push(frame.clone());
        }
    }

    fn offline_orrery(ticks: u64) -> Orrery {
        let mut config = Config::default();
        config.simulation.tick_limit = Some(ticks);
        config.catalog.request_spacing_ms = 0;
        let wall = FixedWallClock(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        Orrery::with_wall_clock(config, Box::new(wall))
    }

    #[test]
    fn test_steps_until_tick_limit() {
        let mut orrery = offline_orrery(3);
        let mut sink = CollectSink::default();
        while !orrery.finished() {
            orrery.step([], &mut sink);
        }
        assert_eq!(sink.frames.len(), 3);
        assert_eq!(sink.frames[2].tick, 3);
    }

    #[test]
    fn test_commands_reach_state() {
        let mut orrery = offline_orrery(10);
        let mut sink = CollectSink::default();
        orrery.step([Command::TogglePause], &mut sink);
        assert!(sink.frames[0].paused);
        orrery.step([Command::TogglePause, Command::FollowStar], &mut sink);
        assert!(!sink.frames[1].paused);
        assert_eq!(sink.frames[1].follow, orrery_sim::FollowMode::Star);
    }

    #[test]
    fn test_demo_catalog_bodies_arrive() {
        let mut orrery = offline_orrery(10_000);
        let provider = Arc::new(CatalogFile::parse(DEMO_CATALOG).unwrap());
        let builtin = orrery.registry().len();
        orrery.start_catalog(provider);

        let mut sink = CollectSink::default();
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while orrery.catalog_pending() && std::time::Instant::now() < deadline {
            orrery.step([], &mut sink);
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert!(!orrery.catalog_pending());
        assert!(orrery.registry().len() > builtin);
        assert!(orrery.registry().count_kind(BodyKind::Comet) > 0);
        // built-in bodies keep their ids
        assert_eq!(orrery.registry().find_by_name("Mercury"), Some(BodyId(0)));
    }

    #[test]
    fn test_missing_catalog_falls_back_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = load_catalog(
            Some(&tmp.path().join("nope.ron")),
            &tmp.path().join("default.ron"),
        );
        assert!(provider.comets().unwrap().is_empty());
        let provider = load_catalog(None, &tmp.path().join("default.ron"));
        assert!(provider.near_earth_objects().unwrap().is_empty());
    }
}
