//! Orbit-style camera rig and perspective projection.

use glam::DVec3;
use orrery_config::CameraConfig;

use crate::picking::Ray;

/// Polar angle kept this far from the poles when orbiting.
const POLE_MARGIN: f64 = 1e-3;

/// A camera orbiting a look-at point with zoom bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitRig {
    pub position: DVec3,
    pub target: DVec3,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl OrbitRig {
    /// Home pose with startup zoom bounds.
    pub fn startup(config: &CameraConfig) -> Self {
        Self {
            position: DVec3::from_array(config.home_position),
            target: DVec3::from_array(config.home_target),
            min_distance: config.initial_min_distance,
            max_distance: config.initial_max_distance,
        }
    }

    /// Home pose with the wide bounds restored by stop-follow.
    pub fn home(config: &CameraConfig) -> Self {
        Self {
            min_distance: config.reset_min_distance,
            max_distance: config.reset_max_distance,
            ..Self::startup(config)
        }
    }

    pub fn distance(&self) -> f64 {
        self.position.distance(self.target)
    }

    pub fn set_bounds(&mut self, min_distance: f64, max_distance: f64) {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
    }

    /// Unit vector from the camera toward the target.
    pub fn forward(&self) -> DVec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(DVec3::NEG_Z)
    }

    /// Rotate the camera about the target. `yaw` turns about +Y, `pitch`
    /// tilts toward the poles.
    pub fn orbit(&mut self, yaw: f64, pitch: f64) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius == 0.0 {
            return;
        }
        let theta = offset.x.atan2(offset.z) + yaw;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + pitch)
            .clamp(POLE_MARGIN, std::f64::consts::PI - POLE_MARGIN);
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        self.position = self.target
            + DVec3::new(
                radius * sin_phi * sin_theta,
                radius * cos_phi,
                radius * sin_phi * cos_theta,
            );
    }

    /// Scale the camera distance by `factor`, clamped to the zoom bounds.
    pub fn zoom(&mut self, factor: f64) {
        if factor.is_nan() || factor <= 0.0 {
            return;
        }
        let distance = self.bounded(self.distance() * factor);
        self.position = self.target - self.forward() * distance;
    }

    /// Move camera and target together.
    pub fn pan(&mut self, delta: DVec3) {
        self.position += delta;
        self.target += delta;
    }

    /// `distance` limited to the zoom bounds. Inverted bounds resolve to
    /// `max_distance` instead of panicking.
    fn bounded(&self, distance: f64) -> f64 {
        distance.max(self.min_distance).min(self.max_distance)
    }

    /// Pull the camera back inside the zoom bounds along its view axis.
    pub fn enforce_bounds(&mut self) {
        let distance = self.distance();
        let clamped = self.bounded(distance);
        if clamped != distance {
            self.position = self.target - self.forward() * clamped;
        }
    }
}

/// Perspective projection used to build picking rays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveProjection {
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Width / height.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveProjection {
    pub fn new(config: &CameraConfig, aspect: f64) -> Self {
        Self {
            fov_y: config.fov_y_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = f64::from(width) / f64::from(height);
        }
    }

    /// Ray through a pixel of a `width` × `height` viewport, origin at the
    /// camera.
    pub fn ray_from_pixel(&self, x: f64, y: f64, width: f64, height: f64, rig: &OrbitRig) -> Ray {
        let ndc_x = x / width * 2.0 - 1.0;
        let ndc_y = -(y / height * 2.0 - 1.0);

        let forward = rig.forward();
        let right = forward.cross(DVec3::Y).try_normalize().unwrap_or(DVec3::X);
        let up = right.cross(forward);
        let half_height = (self.fov_y * 0.5).tan();

        let direction =
            forward + right * (ndc_x * half_height * self.aspect) + up * (ndc_y * half_height);
        Ray {
            origin: rig.position,
            direction: direction.try_normalize().unwrap_or(forward),
        }
    }
}
