//! Procedural minor-body populations.
//!
//! Belts, co-orbital clusters and distant clouds are synthesized once from a
//! static region table. Every draw goes through a seeded ChaCha8 stream, so a
//! seed reproduces the same populations on every run.

pub mod backdrop;
mod generator;
mod region;

pub use backdrop::{BACKDROP_RADIUS, BACKDROP_STAR_COUNT, BackdropStar, generate_backdrop};
pub use generator::{BeltMember, PopulationGenerator};
pub use region::{
    AngularLayout, ClassWeight, MaterialClass, OrbitRate, RegionConfig, RegionKind, ValueRange,
    default_regions,
};
