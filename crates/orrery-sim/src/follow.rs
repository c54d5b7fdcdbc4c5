//! Camera-follow controller.
//!
//! A follow request records no previous target position. The first update
//! afterwards snaps the camera onto the target; every later update
//! translates camera and look-at point by however far the target moved, so
//! any orbit or zoom the user applied in between is preserved.

use glam::DVec3;
use orrery_config::CameraConfig;

use crate::body::{BodyId, BodyKind};
use crate::camera::OrbitRig;
use crate::registry::Registry;

/// Camera offset from the star when following it.
pub const STAR_FOLLOW_OFFSET: DVec3 = DVec3::new(25.0, 12.0, 25.0);

/// What the camera is following.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FollowMode {
    #[default]
    None,
    Planet(BodyId),
    Moon(BodyId),
    Star,
}

impl FollowMode {
    pub fn body(self) -> Option<BodyId> {
        match self {
            FollowMode::Planet(id) | FollowMode::Moon(id) => Some(id),
            FollowMode::None | FollowMode::Star => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FollowState {
    pub mode: FollowMode,
    /// Camera offset from the target used by the first-update snap.
    pub offset: DVec3,
    /// Target position seen by the previous update. `None` until the snap.
    pub last_target_position: Option<DVec3>,
}

impl FollowState {
    pub fn is_following(&self) -> bool {
        self.mode != FollowMode::None
    }

    /// Start following a body. Moons get a closer framing than planet-level
    /// bodies. Returns `false` and changes nothing for an unknown id.
    pub fn follow_body(&mut self, registry: &Registry, id: BodyId, rig: &mut OrbitRig) -> bool {
        let Some(body) = registry.get(id) else {
            log::debug!("Ignoring follow request for unknown body {id:?}");
            return false;
        };

        let (distance, mode) = if body.kind == BodyKind::Moon {
            let d = (body.size * 12.0).max(8.0);
            rig.set_bounds(d * 0.3, d * 4.0);
            (d, FollowMode::Moon(id))
        } else {
            let d = (body.size * 8.0).max(15.0);
            rig.set_bounds(d * 0.5, d * 3.0);
            (d, FollowMode::Planet(id))
        };

        self.mode = mode;
        self.offset = DVec3::new(distance, distance / 2.0, distance);
        self.last_target_position = None;
        log::info!("Now following {}", body.name);
        true
    }

    /// Frame the star and keep the look-at point on it.
    pub fn follow_star(&mut self, registry: &Registry, rig: &mut OrbitRig) {
        let star = registry.star().position;
        rig.position = star + STAR_FOLLOW_OFFSET;
        rig.target = star;
        rig.set_bounds(10.0, 100.0);
        self.mode = FollowMode::Star;
        self.offset = STAR_FOLLOW_OFFSET;
        self.last_target_position = None;
        log::info!("Now following the star");
    }

    /// Clear follow state and return the camera to its home pose.
    pub fn stop(&mut self, rig: &mut OrbitRig, config: &CameraConfig) {
        if self.is_following() {
            log::info!("Stopped following");
        }
        *self = Self::default();
        *rig = OrbitRig::home(config);
    }

    /// Per-tick camera tracking.
    pub fn update(&mut self, registry: &Registry, rig: &mut OrbitRig) {
        match self.mode {
            FollowMode::None => {}
            FollowMode::Star => {
                rig.target = registry.star().position;
            }
            FollowMode::Planet(id) | FollowMode::Moon(id) => {
                let Some(position) = registry.get(id).map(|body| body.world_position) else {
                    return;
                };
                match self.last_target_position {
                    None => {
                        rig.position = position + self.offset;
                        rig.target = position;
                    }
                    Some(last) => {
                        let delta = position - last;
                        rig.position += delta;
                        rig.target += delta;
                    }
                }
                self.last_target_position = Some(position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::CelestialBody;

    fn system() -> (Registry, BodyId, BodyId) {
        let mut registry = Registry::new(0);
        let planet = registry.insert_body(CelestialBody::circular(
            "P",
            BodyKind::Planet,
            1.0,
            20.0,
            0.01,
            0.0,
        ));
        let moon = registry
            .insert_moon(
                planet,
                CelestialBody::circular("M", BodyKind::Moon, 0.2, 2.0, 0.05, 0.0),
            )
            .unwrap();
        (registry, planet, moon)
    }

    #[test]
    fn test_first_update_snaps_to_offset() {
        let (registry, planet, _) = system();
        let mut rig = OrbitRig::startup(&CameraConfig::default());
        let mut follow = FollowState::default();
        assert!(follow.follow_body(&registry, planet, &mut rig));
        assert_eq!(follow.last_target_position, None);
        assert_eq!((rig.min_distance, rig.max_distance), (7.5, 45.0));

        follow.update(&registry, &mut rig);
        let target = registry.get(planet).unwrap().world_position;
        assert_eq!(rig.target, target);
        assert_eq!(rig.position, target + DVec3::new(15.0, 7.5, 15.0));
        assert_eq!(follow.last_target_position, Some(target));
    }

    #[test]
    fn test_delta_law_preserves_user_orbit() {
        let (mut registry, planet, _) = system();
        let mut rig = OrbitRig::startup(&CameraConfig::default());
        let mut follow = FollowState::default();
        follow.follow_body(&registry, planet, &mut rig);
        follow.update(&registry, &mut rig);

        rig.orbit(0.4, 0.2);
        rig.zoom(0.8);
        let distance = rig.distance();
        let camera_before = rig.position;
        let target_before = rig.target;
        let body_before = registry.get(planet).unwrap().world_position;

        registry.update(3.0);
        follow.update(&registry, &mut rig);
        let delta = registry.get(planet).unwrap().world_position - body_before;
        assert!(delta.length() > 0.0);
        assert!((rig.position - (camera_before + delta)).length() < 1e-12);
        assert!((rig.target - (target_before + delta)).length() < 1e-12);
        assert!((rig.distance() - distance).abs() < 1e-9);
    }

    #[test]
    fn test_moon_framing() {
        let (registry, _, moon) = system();
        let mut rig = OrbitRig::startup(&CameraConfig::default());
        let mut follow = FollowState::default();
        follow.follow_body(&registry, moon, &mut rig);
        assert_eq!(follow.mode, FollowMode::Moon(moon));
        assert_eq!(follow.offset, DVec3::new(8.0, 4.0, 8.0));
        assert!((rig.min_distance - 2.4).abs() < 1e-12);
        assert_eq!(rig.max_distance, 32.0);
    }

    #[test]
    fn test_unknown_body_is_a_no_op() {
        let (registry, planet, _) = system();
        let mut rig = OrbitRig::startup(&CameraConfig::default());
        let mut follow = FollowState::default();
        follow.follow_body(&registry, planet, &mut rig);
        let before = (follow, rig);
        assert!(!follow.follow_body(&registry, BodyId(77), &mut rig));
        assert_eq!((follow, rig), before);
    }

    #[test]
    fn test_star_recenters_without_translating() {
        let (registry, _, _) = system();
        let mut rig = OrbitRig::startup(&CameraConfig::default());
        let mut follow = FollowState::default();
        follow.follow_star(&registry, &mut rig);
        assert_eq!(rig.position, STAR_FOLLOW_OFFSET);
        assert_eq!((rig.min_distance, rig.max_distance), (10.0, 100.0));

        rig.orbit(1.0, 0.0);
        let orbited = rig.position;
        rig.target = DVec3::new(3.0, 0.0, 0.0);
        follow.update(&registry, &mut rig);
        assert_eq!(rig.target, DVec3::ZERO);
        assert_eq!(rig.position, orbited);
    }

    #[test]
    fn test_stop_resets_everything() {
        let (registry, planet, _) = system();
        let config = CameraConfig::default();
        let mut rig = OrbitRig::startup(&config);
        let mut follow = FollowState::default();
        follow.follow_body(&registry, planet, &mut rig);
        follow.update(&registry, &mut rig);

        follow.stop(&mut rig, &config);
        assert_eq!(follow, FollowState::default());
        assert_eq!(follow.mode, FollowMode::None);
        assert_eq!(follow.last_target_position, None);
        assert_eq!(rig, OrbitRig::home(&config));
    }
}
