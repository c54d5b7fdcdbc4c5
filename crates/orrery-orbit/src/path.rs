//! Orbit rings, frame conversion and period helpers.

use glam::DVec3;

use crate::OrbitalElements;

/// Angular rate of the 1 AU reference body, radians per tick at speed 1.
pub const EARTH_RATE_PER_TICK: f64 = 0.001;

/// Sample a closed ring of `samples + 1` points by sweeping the mean anomaly
/// from 0° to 360°. Points are in the solver's ecliptic frame.
pub fn orbit_path(elements: &OrbitalElements, samples: usize) -> Vec<DVec3> {
    let samples = samples.max(1);
    (0..=samples)
        .map(|i| {
            let ma = i as f64 / samples as f64 * 360.0;
            elements.with_mean_anomaly(ma).position()
        })
        .collect()
}

/// Ecliptic frame (orbital plane XY, +Z north) to scene frame (orbital plane
/// XZ, +Y up). Prograde motion runs from +X toward +Z in both.
pub fn ecliptic_to_scene(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, v.y)
}

/// Kepler's third law with the period in years and the distance in AU.
pub fn orbital_period_years(distance_au: f64) -> f64 {
    distance_au.powi(3).sqrt()
}

/// Mean motion for a semi-major axis, scaled so a body at 1 AU advances at
/// `reference_rate` radians per tick.
pub fn mean_motion_per_tick(semi_major_axis_au: f64, reference_rate: f64) -> f64 {
    if semi_major_axis_au <= 0.0 {
        return 0.0;
    }
    reference_rate / semi_major_axis_au.powf(1.5)
}
