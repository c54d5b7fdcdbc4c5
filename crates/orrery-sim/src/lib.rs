//! Simulation core of the orrery.
//!
//! A [`Registry`] owns every body in an index arena together with the
//! generated belts. [`SimulationState`] holds the clock, camera rig, follow
//! controller, visibility flags and selection, and turns queued
//! [`Command`]s plus one clock tick into a [`RenderFrame`]. External catalog
//! data arrives in the background through [`CatalogLoader`] and is appended
//! to the registry between ticks.

pub mod body;
pub mod builtin;
pub mod camera;
pub mod catalog;
pub mod clock;
pub mod command;
pub mod follow;
pub mod frame;
pub mod picking;
pub mod registry;
pub mod state;
pub mod visibility;

pub use body::{BodyId, BodyKind, CelestialBody, Motion, OrbitStyle};
pub use camera::{OrbitRig, PerspectiveProjection};
pub use catalog::{
    CatalogBatch, CatalogError, CatalogFile, CatalogGroup, CatalogLoader, CatalogProvider,
    CatalogRecord, integrate_batch, placement_rng,
};
pub use clock::{FixedWallClock, SimulationClock, SystemWallClock, WallClock};
pub use command::{Command, CommandQueue};
pub use follow::{FollowMode, FollowState};
pub use frame::{GlowControl, GlowHint, GlowMode, RenderFrame};
pub use picking::{Ray, pick};
pub use registry::{InfoCard, PickTarget, Registry, RenderHandle};
pub use state::SimulationState;
pub use visibility::{Visibility, VisibilityGroup};
