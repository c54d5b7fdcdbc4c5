//! Per-tick snapshot handed to the renderer.

use chrono::{DateTime, Utc};
use glam::DVec3;
use orrery_population::RegionKind;

use crate::body::{BodyId, BodyKind, OrbitStyle};
use crate::follow::FollowMode;
use crate::visibility::Visibility;

/// Camera distance to the star at which the glow starts fading.
const GLOW_NEAR: f64 = 10.0;
/// Camera distance to the star beyond which the glow is at its weakest.
const GLOW_FAR: f64 = 100.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlowMode {
    /// Strength follows camera distance.
    Auto,
    /// Strength is user-set.
    #[default]
    Manual,
}

/// User-facing glow settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowControl {
    pub mode: GlowMode,
    /// Strength used in manual mode.
    pub manual_strength: f64,
}

impl Default for GlowControl {
    fn default() -> Self {
        Self {
            mode: GlowMode::Manual,
            manual_strength: 0.5,
        }
    }
}

impl GlowControl {
    /// Set the manual strength, switching to manual mode.
    pub fn set_strength(&mut self, strength: f64) {
        if strength.is_nan() {
            log::debug!("Ignoring NaN glow strength");
            return;
        }
        self.manual_strength = strength.max(0.0);
        self.mode = GlowMode::Manual;
    }

    pub fn toggle_mode(&mut self) -> GlowMode {
        self.mode = match self.mode {
            GlowMode::Auto => GlowMode::Manual,
            GlowMode::Manual => GlowMode::Auto,
        };
        self.mode
    }

    /// Star glow for a camera `distance` from the star.
    pub fn hint(&self, distance: f64) -> GlowHint {
        let closeness = 1.0 - ((distance - GLOW_NEAR) / (GLOW_FAR - GLOW_NEAR)).clamp(0.0, 1.0);
        match self.mode {
            GlowMode::Auto => GlowHint {
                strength: 0.5 + closeness,
                radius: 0.6 + 0.4 * closeness,
            },
            GlowMode::Manual => GlowHint {
                strength: self.manual_strength,
                radius: 0.6 + 0.2 * closeness,
            },
        }
    }
}

/// Bloom parameters for the star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowHint {
    pub strength: f64,
    pub radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub target: DVec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BodyFrame {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub position: DVec3,
    /// Spin about the body's own axis, radians.
    pub rotation: f64,
    pub visible: bool,
    /// Pulsed ring style, if the body draws an orbit.
    pub orbit_style: Option<OrbitStyle>,
    pub orbit_visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeltFrame {
    pub region: RegionKind,
    pub position: DVec3,
    pub rotation: DVec3,
    pub visible: bool,
}

/// Everything the renderer needs for one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub tick: u64,
    pub simulated_date: DateTime<Utc>,
    pub paused: bool,
    pub speed: f64,
    pub star_rotation: f64,
    pub backdrop_rotation: f64,
    pub bodies: Vec<BodyFrame>,
    pub belts: Vec<BeltFrame>,
    pub visibility: Visibility,
    pub camera: CameraPose,
    pub glow: GlowHint,
    pub selected: Option<BodyId>,
    pub follow: FollowMode,
}

impl RenderFrame {
    pub fn visible_bodies(&self) -> impl Iterator<Item = &BodyFrame> {
        self.bodies.iter().filter(|body| body.visible)
    }

    pub fn visible_belt_count(&self) -> usize {
        self.belts.iter().filter(|member| member.visible).count()
    }
}
