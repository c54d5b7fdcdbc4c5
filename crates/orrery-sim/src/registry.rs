//! Arena of every simulated body and the per-tick updater.
//!
//! Bodies live in one `Vec` indexed by [`BodyId`]. A moon can only be
//! inserted after its parent, so walking the arena in index order always
//! updates a parent before any of its children. Belt members and the
//! backdrop shell are stored alongside and advanced in the same pass.

use glam::DVec3;
use orrery_orbit::orbital_period_years;
use orrery_population::{
    BACKDROP_RADIUS, BACKDROP_STAR_COUNT, BackdropStar, BeltMember, PopulationGenerator,
    default_regions, generate_backdrop,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;

use crate::body::{BodyId, BodyKind, CelestialBody, OrbitStyle, PulseMarker};
use crate::builtin::BUILTIN_BODIES;
use crate::visibility::VisibilityGroup;

/// Render radius of the central star.
pub const STAR_SIZE: f64 = 5.0;
/// Star spin, radians per tick at speed 1.
pub const STAR_SPIN_RATE: f64 = 0.002;
/// Backdrop shell spin about Y, radians per tick at speed 1.
pub const BACKDROP_SPIN_RATE: f64 = 0.0001;
/// Bodies orbiting farther than this get a pulsing orbit ring.
pub const PULSE_DISTANCE: f64 = 40.0;

const PULSE_SALT: u64 = 0x9E15_E000;

/// The central star, fixed at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub position: DVec3,
    pub size: f64,
    pub rotation: f64,
}

/// Opaque id the renderer attaches to a pickable mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// What a render handle resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickTarget {
    Star,
    Body(BodyId),
}

/// Derived summary shown when a body is selected.
#[derive(Clone, Debug, PartialEq)]
pub struct InfoCard {
    pub name: String,
    pub kind: &'static str,
    pub distance: f64,
    pub size: f64,
    pub orbital_period_years: f64,
    pub discovery_year: Option<String>,
    pub description: String,
    pub moons: Vec<MoonInfo>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoonInfo {
    pub name: String,
    pub distance: f64,
    /// `None` for a moon that does not orbit.
    pub period_days: Option<f64>,
}

pub struct Registry {
    star: Star,
    bodies: Vec<CelestialBody>,
    body_groups: Vec<Option<VisibilityGroup>>,
    body_handles: Vec<Option<RenderHandle>>,
    belts: Vec<BeltMember>,
    backdrop: Vec<BackdropStar>,
    backdrop_rotation: f64,
    handles: FxHashMap<RenderHandle, PickTarget>,
    star_handle: RenderHandle,
    next_handle: u64,
    pulse_rng: ChaCha8Rng,
}

impl Registry {
    /// An empty system holding only the star.
    pub fn new(seed: u64) -> Self {
        let star_handle = RenderHandle(0);
        let mut handles = FxHashMap::default();
        handles.insert(star_handle, PickTarget::Star);
        Self {
            star: Star {
                position: DVec3::ZERO,
                size: STAR_SIZE,
                rotation: 0.0,
            },
            bodies: Vec::new(),
            body_groups: Vec::new(),
            body_handles: Vec::new(),
            belts: Vec::new(),
            backdrop: Vec::new(),
            backdrop_rotation: 0.0,
            handles,
            star_handle,
            next_handle: 1,
            pulse_rng: ChaCha8Rng::seed_from_u64(seed ^ PULSE_SALT),
        }
    }

    /// The built-in system: star, planets and minor planets with their
    /// moons, generated belts and the backdrop shell.
    pub fn with_builtin(seed: u64) -> Self {
        let mut registry = Self::new(seed);
        registry.insert_builtin_bodies();
        let belts = PopulationGenerator::new(seed).generate_all(&default_regions());
        registry.insert_belt_members(belts);
        registry.backdrop = generate_backdrop(seed, BACKDROP_STAR_COUNT, BACKDROP_RADIUS);
        log::info!(
            "Built system with {} bodies and {} belt members",
            registry.bodies.len(),
            registry.belts.len()
        );
        registry
    }

    fn insert_builtin_bodies(&mut self) {
        for spec in BUILTIN_BODIES {
            let mut body = spec.to_body();
            body.orbit_style = Some(OrbitStyle::for_ring(body.kind, body.distance()));
            if body.distance() > PULSE_DISTANCE {
                body.pulse = Some(self.next_pulse());
            }
            let parent = self.insert_body(body);
            for moon in spec.moons {
                let inserted = self.insert_moon(parent, moon.to_body());
                debug_assert!(inserted.is_some(), "{} has no parent", moon.name);
            }
        }
    }

    fn next_pulse(&mut self) -> PulseMarker {
        PulseMarker {
            speed: 0.002 + self.pulse_rng.random::<f64>() * 0.003,
            phase: self.pulse_rng.random::<f64>() * std::f64::consts::TAU,
        }
    }

    /// Insert a body orbiting the star, in the visibility group its kind
    /// implies.
    pub fn insert_body(&mut self, body: CelestialBody) -> BodyId {
        let group = VisibilityGroup::for_body(body.kind);
        self.insert_body_in_group(body, group)
    }

    /// Insert a body orbiting the star under an explicit visibility group.
    pub fn insert_body_in_group(
        &mut self,
        mut body: CelestialBody,
        group: Option<VisibilityGroup>,
    ) -> BodyId {
        body.parent = None;
        body.world_position = self.star.position + body.local_offset();
        self.push(body, group)
    }

    /// Insert a moon of `parent`. Returns `None` if the parent does not exist.
    pub fn insert_moon(&mut self, parent: BodyId, mut body: CelestialBody) -> Option<BodyId> {
        let parent_body = self.bodies.get(parent.0)?;
        let (origin, frame_angle) = (parent_body.world_position, parent_body.moon_frame_angle());
        body.parent = Some(parent);
        body.world_position = origin + body.offset_in_frame(frame_angle);
        let group = VisibilityGroup::for_body(body.kind);
        Some(self.push(body, group))
    }

    fn push(&mut self, body: CelestialBody, group: Option<VisibilityGroup>) -> BodyId {
        let id = BodyId(self.bodies.len());
        let handle = body.pickable.then(|| {
            let handle = RenderHandle(self.next_handle);
            self.next_handle += 1;
            self.handles.insert(handle, PickTarget::Body(id));
            handle
        });
        self.bodies.push(body);
        self.body_groups.push(group);
        self.body_handles.push(handle);
        id
    }

    pub fn insert_belt_members(&mut self, members: impl IntoIterator<Item = BeltMember>) {
        self.belts.extend(members);
    }

    pub fn star(&self) -> &Star {
        &self.star
    }

    pub fn star_handle(&self) -> RenderHandle {
        self.star_handle
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.0)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        id.0 < self.bodies.len()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyId(index), body))
    }

    pub fn belts(&self) -> &[BeltMember] {
        &self.belts
    }

    pub fn backdrop(&self) -> &[BackdropStar] {
        &self.backdrop
    }

    pub fn backdrop_rotation(&self) -> f64 {
        self.backdrop_rotation
    }

    pub fn find_by_name(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|body| body.name == name)
            .map(BodyId)
    }

    pub fn moons_of(&self, parent: BodyId) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies()
            .filter(move |(_, body)| body.parent == Some(parent))
    }

    /// Visibility group that hides this body, if any.
    pub fn group_of(&self, id: BodyId) -> Option<VisibilityGroup> {
        self.body_groups.get(id.0).copied().flatten()
    }

    pub fn handle_of(&self, id: BodyId) -> Option<RenderHandle> {
        self.body_handles.get(id.0).copied().flatten()
    }

    /// Resolve a picked render handle back to its owner.
    pub fn resolve(&self, handle: RenderHandle) -> Option<PickTarget> {
        self.handles.get(&handle).copied()
    }

    /// Every pickable sphere as `(handle, center, radius)`.
    pub fn pick_spheres(&self) -> impl Iterator<Item = (RenderHandle, DVec3, f64)> + '_ {
        let star = std::iter::once((self.star_handle, self.star.position, self.star.size));
        let bodies = self
            .bodies
            .iter()
            .zip(&self.body_handles)
            .filter_map(|(body, handle)| handle.map(|h| (h, body.world_position, body.size)));
        star.chain(bodies)
    }

    pub fn world_position(&self, target: PickTarget) -> Option<DVec3> {
        match target {
            PickTarget::Star => Some(self.star.position),
            PickTarget::Body(id) => self.get(id).map(|body| body.world_position),
        }
    }

    /// Advance every body, belt member and the backdrop by one tick.
    pub fn update(&mut self, rate: f64) {
        self.star.rotation += STAR_SPIN_RATE * rate;
        self.backdrop_rotation += BACKDROP_SPIN_RATE * rate;

        // moons orbit in their parent's turning frame, which is already
        // updated because parents precede children
        for index in 0..self.bodies.len() {
            let (origin, frame_angle) = match self.bodies[index].parent {
                Some(parent) => {
                    let parent = &self.bodies[parent.0];
                    (parent.world_position, parent.moon_frame_angle())
                }
                None => (self.star.position, 0.0),
            };
            let body = &mut self.bodies[index];
            body.advance(rate);
            body.world_position = origin + body.offset_in_frame(frame_angle);
        }

        for member in &mut self.belts {
            member.advance(rate);
        }
    }

    /// Refresh orbit-ring pulses from wall-clock time.
    pub fn update_pulses(&mut self, wall_seconds: f64) {
        for body in &mut self.bodies {
            if let Some(pulse) = body.pulse {
                body.pulse_value = pulse.value(wall_seconds);
            }
        }
    }

    pub fn info_card(&self, id: BodyId) -> Option<InfoCard> {
        let body = self.get(id)?;
        let moons = self
            .moons_of(id)
            .map(|(_, moon)| MoonInfo {
                name: moon.name.clone(),
                distance: moon.distance(),
                period_days: (moon.angular_speed > 0.0)
                    .then(|| std::f64::consts::TAU / moon.angular_speed),
            })
            .collect();
        Some(InfoCard {
            name: body.name.clone(),
            kind: body.kind.label(),
            distance: body.distance(),
            size: body.size,
            orbital_period_years: orbital_period_years(body.distance()),
            discovery_year: body.metadata.discovery_year.clone(),
            description: body.metadata.description.clone(),
            moons,
        })
    }

    /// Count of bodies of one kind.
    pub fn count_kind(&self, kind: BodyKind) -> usize {
        self.bodies.iter().filter(|body| body.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_system_shape() {
        let registry = Registry::with_builtin(42);
        assert_eq!(registry.count_kind(BodyKind::Planet), 8);
        assert_eq!(registry.count_kind(BodyKind::Moon), 40);
        assert_eq!(registry.belts().len(), 930);
        assert_eq!(registry.backdrop().len(), BACKDROP_STAR_COUNT);
        let saturn = registry.find_by_name("Saturn").unwrap();
        assert!(registry.get(saturn).unwrap().rings.is_some());
    }

    #[test]
    fn test_parents_precede_children() {
        let registry = Registry::with_builtin(1);
        for (id, body) in registry.bodies() {
            if let Some(parent) = body.parent {
                assert!(parent < id, "{} listed before its parent", body.name);
            }
        }
    }

    #[test]
    fn test_moon_tracks_parent_post_update_position() {
        let mut registry = Registry::new(0);
        let planet = registry.insert_body(CelestialBody::circular(
            "P",
            BodyKind::Planet,
            1.0,
            10.0,
            0.3,
            0.0,
        ));
        let moon = registry
            .insert_moon(
                planet,
                CelestialBody::circular("M", BodyKind::Moon, 0.1, 2.0, 0.5, 0.0),
            )
            .unwrap();

        registry.update(1.0);
        let planet_pos = registry.get(planet).unwrap().world_position;
        let planet_body = registry.get(planet).unwrap();
        let moon_body = registry.get(moon).unwrap();
        let expected = planet_pos + moon_body.offset_in_frame(planet_body.moon_frame_angle());
        assert!((moon_body.world_position - expected).length() < 1e-12);
        // the pre-update parent sat at (10, 0, 0)
        assert!((planet_pos - DVec3::new(10.0, 0.0, 0.0)).length() > 1.0);
    }

    #[test]
    fn test_moon_angle_composes_parent_orbit_and_spin() {
        let mut registry = Registry::new(0);
        let mut planet = CelestialBody::circular("P", BodyKind::Planet, 1.0, 10.0, 0.01, 0.0);
        planet.self_rotation_rate = 0.01;
        let planet = registry.insert_body(planet);
        let moon = registry
            .insert_moon(
                planet,
                CelestialBody::circular("M", BodyKind::Moon, 0.1, 2.0, 0.02, 0.0),
            )
            .unwrap();

        for _ in 0..10 {
            registry.update(1.0);
        }
        let moon_position = registry.get(moon).unwrap().world_position;
        let relative = moon_position - registry.get(planet).unwrap().world_position;
        // orbit 0.1 + spin 0.1 + own 0.2
        assert!((relative.z.atan2(relative.x) - 0.4).abs() < 1e-9);
        assert!((relative.length() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_insert_moon_requires_parent() {
        let mut registry = Registry::new(0);
        let orphan = CelestialBody::circular("M", BodyKind::Moon, 0.1, 2.0, 0.5, 0.0);
        assert!(registry.insert_moon(BodyId(3), orphan).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_update_scales_with_rate() {
        let mut a = Registry::with_builtin(5);
        let mut b = Registry::with_builtin(5);
        for _ in 0..20 {
            a.update(1.0);
            b.update(2.0);
        }
        let fresh = Registry::with_builtin(5);
        for ((id, before), ((_, one), (_, two))) in
            fresh.bodies().zip(a.bodies().zip(b.bodies()))
        {
            let d1 = one.current_angle - before.current_angle;
            let d2 = two.current_angle - before.current_angle;
            assert!((d2 - 2.0 * d1).abs() < 1e-9, "{id:?}");
        }
        assert!((b.star().rotation - 2.0 * a.star().rotation).abs() < 1e-12);
        assert!((b.backdrop_rotation() - 2.0 * a.backdrop_rotation()).abs() < 1e-12);
    }

    #[test]
    fn test_handles_resolve_to_pickable_bodies() {
        let registry = Registry::with_builtin(3);
        assert_eq!(registry.resolve(registry.star_handle()), Some(PickTarget::Star));
        let earth = registry.find_by_name("Earth").unwrap();
        let handle = registry.handle_of(earth).unwrap();
        assert_eq!(registry.resolve(handle), Some(PickTarget::Body(earth)));
        let moon = registry.find_by_name("Moon").unwrap();
        assert_eq!(registry.handle_of(moon), None);
        assert_eq!(registry.resolve(RenderHandle(9_999)), None);
    }

    #[test]
    fn test_only_distant_bodies_pulse() {
        let mut registry = Registry::with_builtin(11);
        registry.update_pulses(1234.5);
        for (_, body) in registry.bodies() {
            if body.kind == BodyKind::Moon {
                assert!(body.pulse.is_none());
                continue;
            }
            assert_eq!(body.pulse.is_some(), body.distance() > PULSE_DISTANCE, "{}", body.name);
            if let Some(marker) = body.pulse {
                assert!((0.002..=0.005).contains(&marker.speed));
                assert!((0.4..=1.0).contains(&body.pulse_value));
            } else {
                assert_eq!(body.pulse_value, 1.0);
            }
        }
    }

    #[test]
    fn test_info_card() {
        let registry = Registry::with_builtin(0);
        let mars = registry.find_by_name("Mars").unwrap();
        let card = registry.info_card(mars).unwrap();
        assert_eq!(card.kind, "Planet");
        assert!((card.orbital_period_years - 19.0_f64.powf(1.5)).abs() < 1e-9);
        assert_eq!(card.moons.len(), 2);
        let phobos = &card.moons[0];
        assert_eq!(phobos.name, "Phobos");
        assert!((phobos.period_days.unwrap() - std::f64::consts::TAU / 0.32).abs() < 1e-9);

        let mut registry = Registry::new(0);
        let planet = registry.insert_body(CelestialBody::circular(
            "P",
            BodyKind::Planet,
            1.0,
            10.0,
            0.01,
            0.0,
        ));
        for speed in [-0.5, 0.0] {
            registry.insert_moon(
                planet,
                CelestialBody::circular("M", BodyKind::Moon, 0.1, 2.0, speed, 0.0),
            );
        }
        let card = registry.info_card(planet).unwrap();
        assert!(card.moons.iter().all(|moon| moon.period_days.is_none()));
        assert!(registry.info_card(BodyId(10_000)).is_none());
    }
}
