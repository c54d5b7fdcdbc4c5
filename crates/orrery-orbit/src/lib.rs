//! Two-body Keplerian orbits for the orrery.
//!
//! [`OrbitalElements`] turns six classical elements into a position with a
//! fixed-iteration Kepler solve. [`path`] samples closed orbit rings and maps
//! the ecliptic frame into scene space.

mod elements;
pub mod path;

pub use elements::{KEPLER_ITERATIONS, OrbitalElements, eccentric_anomaly};
pub use path::{
    EARTH_RATE_PER_TICK, ecliptic_to_scene, mean_motion_per_tick, orbit_path,
    orbital_period_years,
};
