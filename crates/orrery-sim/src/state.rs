//! All mutable simulation flags in one place, and the per-tick step.

use chrono::{DateTime, Utc};
use orrery_config::{CameraConfig, Config};

use crate::body::BodyId;
use crate::camera::{OrbitRig, PerspectiveProjection};
use crate::clock::{SimulationClock, WallClock};
use crate::command::{Command, CommandQueue};
use crate::follow::FollowState;
use crate::frame::{BeltFrame, BodyFrame, CameraPose, GlowControl, RenderFrame};
use crate::picking::pick;
use crate::registry::{PickTarget, Registry};
use crate::visibility::{Visibility, VisibilityGroup};

pub struct SimulationState {
    pub clock: SimulationClock,
    pub follow: FollowState,
    pub rig: OrbitRig,
    pub projection: PerspectiveProjection,
    pub visibility: Visibility,
    pub selected: Option<BodyId>,
    pub glow: GlowControl,
    camera_config: CameraConfig,
    viewport: (u32, u32),
    commands: CommandQueue,
    tick: u64,
}

impl SimulationState {
    pub fn new(config: &Config, start: DateTime<Utc>) -> Self {
        Self {
            clock: SimulationClock::new(&config.simulation, start),
            follow: FollowState::default(),
            rig: OrbitRig::startup(&config.camera),
            projection: PerspectiveProjection::new(&config.camera, config.aspect_ratio()),
            visibility: Visibility::default(),
            selected: None,
            glow: GlowControl::default(),
            camera_config: config.camera.clone(),
            viewport: (config.viewport.width, config.viewport.height),
            commands: CommandQueue::new(),
            tick: 0,
        }
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Queue a command for the next tick.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Apply one command immediately. Commands naming unknown bodies are
    /// ignored.
    pub fn apply(&mut self, command: Command, registry: &Registry) {
        match command {
            Command::TogglePause => {
                let paused = self.clock.toggle_pause();
                log::info!("{}", if paused { "Paused" } else { "Resumed" });
            }
            Command::SetPaused(paused) => self.clock.set_paused(paused),
            Command::SetSpeed(speed) => self.clock.set_speed(speed),
            Command::AdjustSpeed(steps) => {
                self.clock.adjust_speed(steps);
                log::debug!("Speed now {:.1}", self.clock.speed());
            }
            Command::FollowBody(id) => {
                if self.follow.follow_body(registry, id, &mut self.rig) {
                    self.selected = Some(id);
                }
            }
            Command::FollowStar => self.follow.follow_star(registry, &mut self.rig),
            Command::StopFollow => {
                self.follow.stop(&mut self.rig, &self.camera_config);
                self.selected = None;
            }
            Command::Select { x, y } => self.select(x, y, registry),
            Command::ToggleFollowSelected => match self.selected {
                Some(id) if self.follow.mode.body() == Some(id) => {
                    self.follow.stop(&mut self.rig, &self.camera_config);
                    self.selected = None;
                }
                Some(id) => {
                    self.follow.follow_body(registry, id, &mut self.rig);
                }
                None => log::debug!("Nothing selected to follow"),
            },
            Command::ToggleGroup(group) => {
                let visible = self.visibility.toggle(group);
                log::debug!("{group:?} visible: {visible}");
            }
            Command::CycleBeltGroups => self.visibility.cycle_belts(),
            Command::ToggleAllBelts => self.visibility.toggle_all_belts(),
            Command::OrbitCamera { yaw, pitch } => {
                if !(yaw.is_finite() && pitch.is_finite()) {
                    log::debug!("Ignoring orbit by {yaw}, {pitch}");
                    return;
                }
                self.rig.orbit(yaw, pitch);
            }
            Command::ZoomCamera(factor) => self.rig.zoom(factor),
            Command::PanCamera(delta) => {
                if !delta.is_finite() {
                    log::debug!("Ignoring pan by {delta}");
                    return;
                }
                self.rig.pan(delta);
            }
            Command::Resize { width, height } => {
                if width == 0 || height == 0 {
                    log::debug!("Ignoring resize to {width}x{height}");
                    return;
                }
                self.viewport = (width, height);
                self.projection.set_viewport(width, height);
            }
            Command::ToggleGlowMode => {
                let mode = self.glow.toggle_mode();
                log::debug!("Glow mode {mode:?}");
            }
            Command::SetGlowStrength(strength) => self.glow.set_strength(strength),
        }
    }

    fn select(&mut self, x: f64, y: f64, registry: &Registry) {
        let (width, height) = self.viewport;
        let ray = self.projection.ray_from_pixel(
            x,
            y,
            f64::from(width),
            f64::from(height),
            &self.rig,
        );
        match pick(registry, &ray).map(|hit| hit.target) {
            Some(PickTarget::Star) => {
                self.selected = None;
                self.follow.follow_star(registry, &mut self.rig);
            }
            Some(PickTarget::Body(id)) => {
                if let Some(body) = registry.get(id) {
                    log::info!("Selected {}", body.name);
                }
                self.selected = Some(id);
            }
            None => self.selected = None,
        }
    }

    /// Run one tick: drain commands, advance the clock and every body, then
    /// track the camera and snapshot the frame.
    pub fn tick(&mut self, registry: &mut Registry, wall: &dyn WallClock) -> RenderFrame {
        for command in self.commands.drain() {
            self.apply(command, registry);
        }

        if let Some(rate) = self.clock.tick(wall) {
            registry.update(rate);
        }
        registry.update_pulses(wall.seconds());

        self.rig.enforce_bounds();
        self.follow.update(registry, &mut self.rig);
        self.tick += 1;

        self.snapshot(registry)
    }

    pub fn snapshot(&self, registry: &Registry) -> RenderFrame {
        let orbits_visible = self.visibility.is_visible(VisibilityGroup::Orbits);
        let bodies = registry
            .bodies()
            .map(|(id, body)| BodyFrame {
                id,
                name: body.name.clone(),
                kind: body.kind,
                position: body.world_position,
                rotation: body.rotation_angle,
                visible: registry
                    .group_of(id)
                    .is_none_or(|group| self.visibility.is_visible(group)),
                orbit_style: body.current_orbit_style(),
                orbit_visible: orbits_visible,
            })
            .collect();
        let belts = registry
            .belts()
            .iter()
            .map(|member| BeltFrame {
                region: member.region,
                position: member.position(),
                rotation: member.rotation,
                visible: self
                    .visibility
                    .is_visible(VisibilityGroup::for_region(member.region)),
            })
            .collect();

        RenderFrame {
            tick: self.tick,
            simulated_date: self.clock.simulated_date(),
            paused: self.clock.is_paused(),
            speed: self.clock.speed(),
            star_rotation: registry.star().rotation,
            backdrop_rotation: registry.backdrop_rotation(),
            bodies,
            belts,
            visibility: self.visibility,
            camera: CameraPose {
                position: self.rig.position,
                target: self.rig.target,
            },
            glow: self
                .glow
                .hint(self.rig.position.distance(registry.star().position)),
            selected: self.selected,
            follow: self.follow.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedWallClock;
    use crate::follow::FollowMode;
    use chrono::TimeZone;
    use glam::DVec3;

    fn setup() -> (SimulationState, Registry, FixedWallClock) {
        let config = Config::default();
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        (
            SimulationState::new(&config, start),
            Registry::with_builtin(config.simulation.seed),
            FixedWallClock(start),
        )
    }

    #[test]
    fn test_tick_produces_frame() {
        let (mut state, mut registry, wall) = setup();
        let frame = state.tick(&mut registry, &wall);
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.bodies.len(), registry.len());
        assert_eq!(frame.belts.len(), registry.belts().len());
        assert_eq!(frame.camera.position, DVec3::new(0.0, 30.0, 70.0));
        assert!(!frame.paused);
        assert!((frame.star_rotation - 0.002 * 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_paused_tick_freezes_bodies() {
        let (mut state, mut registry, wall) = setup();
        state.push(Command::TogglePause);
        let before: Vec<_> = registry.bodies().map(|(_, b)| b.current_angle).collect();
        let frame = state.tick(&mut registry, &wall);
        let after: Vec<_> = registry.bodies().map(|(_, b)| b.current_angle).collect();
        assert!(frame.paused);
        assert_eq!(before, after);
        assert_eq!(frame.tick, 1);
    }

    #[test]
    fn test_hidden_groups_propagate_to_frame() {
        let (mut state, mut registry, wall) = setup();
        state.push(Command::ToggleGroup(VisibilityGroup::Moons));
        state.push(Command::ToggleAllBelts);
        let frame = state.tick(&mut registry, &wall);
        for body in &frame.bodies {
            let is_moon = body.kind == crate::body::BodyKind::Moon;
            assert_eq!(body.visible, !is_moon, "{}", body.name);
        }
        let oort = frame
            .belts
            .iter()
            .filter(|b| b.visible)
            .all(|b| b.region == orrery_population::RegionKind::OortCloud);
        assert!(oort);
        assert!(frame.visible_belt_count() > 0);
    }

    #[test]
    fn test_follow_then_stop() {
        let (mut state, mut registry, wall) = setup();
        let jupiter = registry.find_by_name("Jupiter").unwrap();
        state.push(Command::FollowBody(jupiter));
        let frame = state.tick(&mut registry, &wall);
        assert_eq!(frame.follow, FollowMode::Planet(jupiter));
        assert_eq!(frame.selected, Some(jupiter));
        let position = registry.get(jupiter).unwrap().world_position;
        assert_eq!(frame.camera.target, position);

        state.push(Command::StopFollow);
        let frame = state.tick(&mut registry, &wall);
        assert_eq!(frame.follow, FollowMode::None);
        assert_eq!(frame.selected, None);
        assert_eq!(frame.camera.position, DVec3::new(0.0, 30.0, 70.0));
        assert_eq!(frame.camera.target, DVec3::ZERO);
        assert_eq!((state.rig.min_distance, state.rig.max_distance), (0.1, 1000.0));
    }

    #[test]
    fn test_follow_unknown_body_is_ignored() {
        let (mut state, mut registry, wall) = setup();
        state.push(Command::FollowBody(BodyId(usize::MAX)));
        let frame = state.tick(&mut registry, &wall);
        assert_eq!(frame.follow, FollowMode::None);
        assert_eq!(frame.selected, None);
    }

    #[test]
    fn test_click_center_follows_star() {
        let (mut state, mut registry, wall) = setup();
        state.push(Command::Select {
            x: 640.0,
            y: 360.0,
        });
        let frame = state.tick(&mut registry, &wall);
        assert_eq!(frame.follow, FollowMode::Star);
        assert_eq!(frame.camera.target, DVec3::ZERO);
    }

    #[test]
    fn test_click_on_empty_sky_clears_selection() {
        let (mut state, mut registry, wall) = setup();
        let earth = registry.find_by_name("Earth").unwrap();
        state.selected = Some(earth);
        // top-left corner looks above the ecliptic
        state.push(Command::Select { x: 0.0, y: 0.0 });
        let frame = state.tick(&mut registry, &wall);
        assert_eq!(frame.selected, None);
        assert_eq!(frame.follow, FollowMode::None);
    }

    #[test]
    fn test_toggle_follow_selected() {
        let (mut state, mut registry, wall) = setup();
        let mars = registry.find_by_name("Mars").unwrap();
        state.selected = Some(mars);
        state.push(Command::ToggleFollowSelected);
        state.tick(&mut registry, &wall);
        assert_eq!(state.follow.mode, FollowMode::Planet(mars));
        state.push(Command::ToggleFollowSelected);
        state.tick(&mut registry, &wall);
        assert_eq!(state.follow.mode, FollowMode::None);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_speed_commands_clamp() {
        let (mut state, registry, _) = setup();
        state.apply(Command::SetSpeed(25.0), &registry);
        assert_eq!(state.clock.speed(), 10.0);
        state.apply(Command::AdjustSpeed(1.0), &registry);
        assert_eq!(state.clock.speed(), 10.0);
        state.apply(Command::AdjustSpeed(-1.0), &registry);
        assert_eq!(state.clock.speed(), 9.5);
    }

    #[test]
    fn test_resize_changes_aspect() {
        let (mut state, registry, _) = setup();
        state.apply(Command::Resize { width: 800, height: 800 }, &registry);
        assert_eq!(state.viewport(), (800, 800));
        assert_eq!(state.projection.aspect, 1.0);
        state.apply(Command::Resize { width: 0, height: 600 }, &registry);
        assert_eq!(state.viewport(), (800, 800));
    }

    #[test]
    fn test_non_finite_camera_input_is_ignored() {
        let (mut state, registry, _) = setup();
        let before = state.rig;
        state.apply(Command::OrbitCamera { yaw: f64::NAN, pitch: 0.1 }, &registry);
        state.apply(Command::OrbitCamera { yaw: 0.1, pitch: f64::INFINITY }, &registry);
        state.apply(Command::PanCamera(DVec3::new(1.0, f64::NAN, 0.0)), &registry);
        assert_eq!(state.rig, before);
        state.apply(Command::PanCamera(DVec3::X), &registry);
        assert_eq!(state.rig.target, before.target + DVec3::X);
    }

    #[test]
    fn test_glow_strength_switches_to_manual() {
        let (mut state, registry, _) = setup();
        state.apply(Command::ToggleGlowMode, &registry);
        assert_eq!(state.glow.mode, crate::frame::GlowMode::Auto);
        state.apply(Command::SetGlowStrength(1.5), &registry);
        assert_eq!(state.glow.mode, crate::frame::GlowMode::Manual);
        assert_eq!(state.glow.manual_strength, 1.5);
    }

    #[test]
    fn test_inverted_limits_still_tick() {
        let mut config = Config::default();
        config.simulation.max_speed = -3.0;
        config.camera.initial_min_distance = 300.0;
        config.camera.initial_max_distance = 20.0;
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut state = SimulationState::new(&config, start);
        let mut registry = Registry::with_builtin(config.simulation.seed);
        let wall = FixedWallClock(start);

        let frame = state.tick(&mut registry, &wall);
        assert_eq!(frame.speed, 0.0);
        assert!(frame.camera.position.is_finite());
        assert!(frame.bodies.iter().all(|body| body.position.is_finite()));
        state.apply(Command::ZoomCamera(0.5), &registry);
        assert!(state.rig.position.is_finite());
    }

    #[test]
    fn test_nan_initial_speed_keeps_bodies_finite() {
        let mut config = Config::default();
        config.simulation.initial_speed = f64::NAN;
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut state = SimulationState::new(&config, start);
        let mut registry = Registry::with_builtin(config.simulation.seed);

        let frame = state.tick(&mut registry, &FixedWallClock(start));
        assert!(frame.speed.is_finite());
        let earth = registry.find_by_name("Earth").unwrap();
        assert!(registry.get(earth).unwrap().world_position.is_finite());
    }
}
