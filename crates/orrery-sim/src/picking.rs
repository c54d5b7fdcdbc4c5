//! Ray picking against the star and the major bodies.

use glam::DVec3;

use crate::registry::{PickTarget, Registry, RenderHandle};

/// A ray with a unit-length direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// The nearest pick result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub handle: RenderHandle,
    pub target: PickTarget,
    /// Distance along the ray to the entry point.
    pub distance: f64,
}

/// Distance along `ray` to the first intersection with a sphere, if any.
/// A ray starting inside the sphere hits at distance 0.
pub fn ray_sphere_distance(ray: &Ray, center: DVec3, radius: f64) -> Option<f64> {
    let to_center = center - ray.origin;
    let along = to_center.dot(ray.direction);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if far < 0.0 {
        None
    } else {
        Some(near.max(0.0))
    }
}

/// Cast `ray` against every pickable sphere and resolve the nearest hit
/// through the registry's handle map.
pub fn pick(registry: &Registry, ray: &Ray) -> Option<PickHit> {
    let (handle, distance) = registry
        .pick_spheres()
        .filter_map(|(handle, center, radius)| {
            ray_sphere_distance(ray, center, radius).map(|d| (handle, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    let target = registry.resolve(handle)?;
    Some(PickHit {
        handle,
        target,
        distance,
    })
}
