//! Classical orbital elements and the position solve.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Successive-substitution steps taken when solving Kepler's equation.
pub const KEPLER_ITERATIONS: usize = 10;

/// Orbital elements at a reference epoch. Angles are in degrees.
///
/// Field aliases accept the short element names used by small-body
/// databases (`a`, `e`, `i`, `om`, `w`, `ma`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis in length units (AU for catalog bodies).
    #[serde(alias = "a")]
    pub semi_major_axis: f64,
    /// Eccentricity in `[0, 1)`. 0 = circular orbit.
    #[serde(alias = "e")]
    pub eccentricity: f64,
    /// Inclination relative to the ecliptic plane.
    #[serde(alias = "i")]
    pub inclination: f64,
    /// Longitude of the ascending node.
    #[serde(alias = "om")]
    pub longitude_ascending: f64,
    /// Argument of periapsis.
    #[serde(alias = "w")]
    pub argument_periapsis: f64,
    /// Mean anomaly. Treated as the current value by [`position`](Self::position).
    #[serde(alias = "ma")]
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    /// Copy of these elements with the mean anomaly replaced.
    pub fn with_mean_anomaly(&self, mean_anomaly_deg: f64) -> Self {
        Self {
            mean_anomaly: mean_anomaly_deg,
            ..*self
        }
    }

    /// Eccentric anomaly in radians for the current mean anomaly.
    pub fn eccentric_anomaly(&self) -> f64 {
        eccentric_anomaly(self.mean_anomaly.to_radians(), self.eccentricity)
    }

    /// Distance from the focus, `a(1 - e cos E)`.
    pub fn radius(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentric_anomaly().cos())
    }

    /// Position relative to the focus in the ecliptic reference frame.
    ///
    /// Eccentricities near 1 are outside the supported range: the fixed
    /// iteration count no longer converges there and no guard is applied.
    pub fn position(&self) -> DVec3 {
        let e = self.eccentricity;
        let e_anom = self.eccentric_anomaly();

        let true_anomaly = 2.0
            * ((1.0 + e).sqrt() * (e_anom / 2.0).sin())
                .atan2((1.0 - e).sqrt() * (e_anom / 2.0).cos());
        let r = self.semi_major_axis * (1.0 - e * e_anom.cos());

        // Perifocal plane.
        let x_orb = r * true_anomaly.cos();
        let y_orb = r * true_anomaly.sin();

        let (sin_o, cos_o) = self.longitude_ascending.to_radians().sin_cos();
        let (sin_i, cos_i) = self.inclination.to_radians().sin_cos();
        let (sin_w, cos_w) = self.argument_periapsis.to_radians().sin_cos();

        let x = x_orb * (cos_w * cos_o - sin_w * sin_o * cos_i)
            - y_orb * (sin_w * cos_o + cos_w * sin_o * cos_i);
        let y = x_orb * (cos_w * sin_o + sin_w * cos_o * cos_i)
            + y_orb * (cos_w * cos_o * cos_i - sin_w * sin_o);
        let z = x_orb * sin_w * sin_i + y_orb * cos_w * sin_i;

        DVec3::new(x, y, z)
    }
}

/// Solve `M = E - e sin E` by successive substitution from `E = M`.
///
/// Exactly [`KEPLER_ITERATIONS`] steps, no convergence test.
pub fn eccentric_anomaly(mean_anomaly_rad: f64, eccentricity: f64) -> f64 {
    let mut e_anom = mean_anomaly_rad;
    for _ in 0..KEPLER_ITERATIONS {
        e_anom = mean_anomaly_rad + eccentricity * e_anom.sin();
    }
    e_anom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circular(a: f64, ma: f64) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis: a,
            eccentricity: 0.0,
            inclination: 0.0,
            longitude_ascending: 0.0,
            argument_periapsis: 0.0,
            mean_anomaly: ma,
        }
    }

    #[test]
    fn test_reference_position_on_x_axis() {
        let pos = circular(10.0, 0.0).position();
        assert!((pos - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-12, "{pos}");
    }

    #[test]
    fn test_circular_orbit_is_constant_radius_in_plane() {
        for step in 0..36 {
            let ma = step as f64 * 10.0;
            let pos = circular(7.5, ma).position();
            assert!((pos.length() - 7.5).abs() < 1e-9, "ma={ma} r={}", pos.length());
            assert!(pos.z.abs() < 1e-12);
            let expected = DVec3::new(ma.to_radians().cos(), ma.to_radians().sin(), 0.0) * 7.5;
            assert!((pos - expected).length() < 1e-9, "ma={ma}");
        }
    }

    #[test]
    fn test_distance_matches_radius_formula() {
        for &e in &[0.0, 0.1, 0.3, 0.5, 0.7, 0.89] {
            for step in 0..24 {
                let elements = OrbitalElements {
                    semi_major_axis: 2.77,
                    eccentricity: e,
                    inclination: 10.6,
                    longitude_ascending: 80.3,
                    argument_periapsis: 73.6,
                    mean_anomaly: step as f64 * 15.0,
                };
                let e_anom = elements.eccentric_anomaly();
                let expected = 2.77 * (1.0 - e * e_anom.cos());
                let got = elements.position().length();
                assert!((got - expected).abs() < 1e-9, "e={e} step={step}");
                assert!((elements.radius() - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_kepler_solution_low_eccentricity() {
        let m = 1.2_f64;
        let e = 0.05;
        let e_anom = eccentric_anomaly(m, e);
        assert!((e_anom - e * e_anom.sin() - m).abs() < 1e-10);
    }

    #[test]
    fn test_zero_mean_anomaly_is_periapsis() {
        let elements = OrbitalElements {
            eccentricity: 0.4,
            ..circular(5.0, 0.0)
        };
        assert!((elements.radius() - 3.0).abs() < 1e-12);
        let pos = elements.position();
        assert!((pos - DVec3::new(3.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_inclination_lifts_out_of_plane() {
        let elements = OrbitalElements {
            inclination: 90.0,
            ..circular(4.0, 90.0)
        };
        let pos = elements.position();
        assert!((pos.z - 4.0).abs() < 1e-9, "{pos}");
    }

    #[test]
    fn test_ascending_node_rotates_about_pole() {
        let elements = OrbitalElements {
            longitude_ascending: 90.0,
            ..circular(4.0, 0.0)
        };
        let pos = elements.position();
        assert!((pos - DVec3::new(0.0, 4.0, 0.0)).length() < 1e-9, "{pos}");
    }

    #[test]
    fn test_with_mean_anomaly_keeps_shape() {
        let base = OrbitalElements {
            eccentricity: 0.2,
            inclination: 3.0,
            ..circular(1.1, 10.0)
        };
        let moved = base.with_mean_anomaly(200.0);
        assert_eq!(moved.mean_anomaly, 200.0);
        assert_eq!(moved.eccentricity, base.eccentricity);
        assert_eq!(moved.semi_major_axis, base.semi_major_axis);
    }

    #[test]
    fn test_deserialize_short_names() {
        let elements: OrbitalElements =
            ron::from_str("(a: 2.36, e: 0.089, i: 7.14, om: 103.8, w: 151.7, ma: 169.4)")
                .unwrap();
        assert_eq!(elements.semi_major_axis, 2.36);
        assert_eq!(elements.mean_anomaly, 169.4);
    }
}
