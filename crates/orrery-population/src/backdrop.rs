//! Distant backdrop star shell surrounding the whole system.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::region::ValueRange;

/// Stars in the default backdrop shell.
pub const BACKDROP_STAR_COUNT: usize = 1500;

/// Radius band of the default backdrop shell.
pub const BACKDROP_RADIUS: ValueRange = ValueRange::new(150.0, 250.0);

const BACKDROP_SALT: u64 = 0xB4C0_D807;

/// A single backdrop point in the shell's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropStar {
    pub position: DVec3,
}

/// Scatter `count` points through a spherical shell. Deterministic for a
/// given seed.
pub fn generate_backdrop(seed: u64, count: usize, radius: ValueRange) -> Vec<BackdropStar> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ BACKDROP_SALT);
    (0..count)
        .map(|_| {
            let r = radius.lerp(rng.random());
            let theta = rng.random::<f64>() * std::f64::consts::TAU;
            let phi = rng.random::<f64>() * std::f64::consts::PI;
            let direction =
                DVec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
            BackdropStar {
                position: direction * r,
            }
        })
        .collect()
}
