//! Orbiting bodies held in the registry arena.

use glam::DVec3;
use orrery_orbit::{OrbitalElements, ecliptic_to_scene};

/// Stable index of a body in the registry arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Classification of an orbiting body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Planet,
    Dwarf,
    Asteroid,
    /// Trans-Neptunian object.
    Tno,
    Moon,
    Comet,
    /// Near-Earth object.
    Neo,
    /// Object on the impact-monitoring list.
    Sentry,
}

impl BodyKind {
    pub fn label(self) -> &'static str {
        match self {
            BodyKind::Planet => "Planet",
            BodyKind::Dwarf => "Dwarf Planet",
            BodyKind::Asteroid => "Asteroid",
            BodyKind::Tno => "Trans-Neptunian Object",
            BodyKind::Moon => "Moon",
            BodyKind::Comet => "Comet",
            BodyKind::Neo => "Near-Earth Object",
            BodyKind::Sentry => "Sentry Object",
        }
    }
}

/// Flat ring system around a body, radii in scene units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingConfig {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Display data carried for the renderer and info card. Never read by the
/// simulation itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyMetadata {
    pub color: [f32; 3],
    pub texture: Option<String>,
    pub discovery_year: Option<String>,
    pub description: String,
}

/// How a body's offset from its parent is computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Circle of radius `distance` in the parent's XZ plane.
    Circular { distance: f64, vertical_offset: f64 },
    /// Two-body ellipse. The current angle is added to the epoch mean anomaly
    /// and the solver output is multiplied by `scale`.
    Kepler {
        elements: OrbitalElements,
        scale: f64,
    },
}

/// Wall-clock oscillation applied to a body's orbit ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseMarker {
    /// Radians per wall-clock second.
    pub speed: f64,
    pub phase: f64,
}

impl PulseMarker {
    /// Oscillates in `[0.4, 1.0]`.
    pub fn value(&self, wall_seconds: f64) -> f64 {
        (wall_seconds * self.speed + self.phase).sin() * 0.3 + 0.7
    }
}

/// Appearance of the orbit ring drawn for a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitStyle {
    pub color: [f32; 3],
    pub glow: f64,
    pub opacity: f64,
}

impl OrbitStyle {
    /// Ring style for a top-level circular body, by kind and distance band.
    pub fn for_ring(kind: BodyKind, distance: f64) -> Self {
        let (color, glow, opacity) = match kind {
            BodyKind::Dwarf => ([0.8, 0.6, 0.0], 0.08, 0.04),
            BodyKind::Asteroid => ([0.6, 0.3, 0.15], 0.06, 0.03),
            BodyKind::Tno => ([0.4, 0.15, 0.5], 0.1, 0.05),
            _ if distance < 20.0 => ([0.3, 0.5, 0.7], 0.03, 0.02),
            _ if distance < 35.0 => ([0.5, 0.4, 0.7], 0.05, 0.03),
            _ => ([0.7, 0.3, 0.4], 0.07, 0.04),
        };
        let mut style = Self {
            color,
            glow,
            opacity,
        };
        if distance > 45.0 {
            style.glow *= 1.2;
            style.opacity *= 1.3;
        }
        style
    }

    /// Style of a sampled Keplerian orbit line.
    pub fn for_path() -> Self {
        Self {
            color: [0.0, 1.0, 0.0],
            glow: 0.0,
            opacity: 0.3,
        }
    }

    /// This style modulated by a pulse value.
    pub fn pulsed(&self, pulse: f64) -> Self {
        Self {
            glow: self.glow * pulse,
            opacity: self.opacity * (0.8 + pulse * 0.2),
            ..*self
        }
    }
}

/// One orbiting body.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    pub kind: BodyKind,
    /// Body this one orbits. `None` orbits the star.
    pub parent: Option<BodyId>,
    /// Render radius.
    pub size: f64,
    /// Nominal orbital rate, radians per tick at speed 1.
    pub angular_speed: f64,
    /// Factor applied to `angular_speed` when advancing; moons run slower
    /// than their nominal rate.
    pub time_scale: f64,
    /// Orbital angle, radians. Grows without wrapping.
    pub current_angle: f64,
    /// Spin about the body's own axis, radians.
    pub rotation_angle: f64,
    /// Spin rate, radians per tick at speed 1.
    pub self_rotation_rate: f64,
    pub motion: Motion,
    pub rings: Option<RingConfig>,
    pub orbit_style: Option<OrbitStyle>,
    pub pulse: Option<PulseMarker>,
    /// Latest pulse value, 1.0 for bodies without a marker.
    pub pulse_value: f64,
    /// Closed orbit line in the parent frame, empty for circular bodies.
    pub orbit_path: Vec<DVec3>,
    pub metadata: BodyMetadata,
    /// World position as of the last update.
    pub world_position: DVec3,
    /// Whether pointer picking may select this body.
    pub pickable: bool,
}

impl CelestialBody {
    /// A body on a circular orbit starting at `initial_angle`.
    pub fn circular(
        name: impl Into<String>,
        kind: BodyKind,
        size: f64,
        distance: f64,
        angular_speed: f64,
        initial_angle: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            size,
            angular_speed,
            time_scale: 1.0,
            current_angle: initial_angle,
            rotation_angle: 0.0,
            self_rotation_rate: 0.0,
            motion: Motion::Circular {
                distance,
                vertical_offset: 0.0,
            },
            rings: None,
            orbit_style: None,
            pulse: None,
            pulse_value: 1.0,
            orbit_path: Vec::new(),
            metadata: BodyMetadata::default(),
            world_position: DVec3::ZERO,
            pickable: false,
        }
    }

    /// A body on a Keplerian ellipse. The angle starts at 0, i.e. at the
    /// epoch mean anomaly.
    pub fn kepler(
        name: impl Into<String>,
        kind: BodyKind,
        size: f64,
        elements: OrbitalElements,
        scale: f64,
        angular_speed: f64,
    ) -> Self {
        Self {
            motion: Motion::Kepler { elements, scale },
            ..Self::circular(name, kind, size, 0.0, angular_speed, 0.0)
        }
    }

    /// Orbit radius, or the scaled semi-major axis for Keplerian bodies.
    pub fn distance(&self) -> f64 {
        match self.motion {
            Motion::Circular { distance, .. } => distance,
            Motion::Kepler { elements, scale } => elements.semi_major_axis * scale,
        }
    }

    /// Mean anomaly in degrees after the accumulated angular advance.
    pub fn current_mean_anomaly(&self) -> Option<f64> {
        match self.motion {
            Motion::Kepler { elements, .. } => {
                Some(elements.mean_anomaly + self.current_angle.to_degrees())
            }
            Motion::Circular { .. } => None,
        }
    }

    /// Offset from the parent (or the star) for the current angle.
    pub fn local_offset(&self) -> DVec3 {
        match self.motion {
            Motion::Circular {
                distance,
                vertical_offset,
            } => {
                let (sin, cos) = self.current_angle.sin_cos();
                DVec3::new(cos * distance, vertical_offset, sin * distance)
            }
            Motion::Kepler { elements, scale } => {
                let ma = elements.mean_anomaly + self.current_angle.to_degrees();
                ecliptic_to_scene(elements.with_mean_anomaly(ma).position()) * scale
            }
        }
    }

    /// Angle of the frame this body's moons orbit in: the body's orbital
    /// angle plus its spin.
    pub fn moon_frame_angle(&self) -> f64 {
        self.current_angle + self.rotation_angle
    }

    /// [`local_offset`](Self::local_offset) carried around by a parent
    /// frame turned `frame_angle` about +Y.
    pub fn offset_in_frame(&self, frame_angle: f64) -> DVec3 {
        let offset = self.local_offset();
        let (sin, cos) = frame_angle.sin_cos();
        DVec3::new(
            offset.x * cos - offset.z * sin,
            offset.y,
            offset.x * sin + offset.z * cos,
        )
    }

    /// Advance orbital angle and spin by one tick at `rate`.
    pub fn advance(&mut self, rate: f64) {
        self.current_angle += self.angular_speed * self.time_scale * rate;
        self.rotation_angle += self.self_rotation_rate * rate;
    }

    /// Orbit ring style with the current pulse applied.
    pub fn current_orbit_style(&self) -> Option<OrbitStyle> {
        self.orbit_style.map(|style| style.pulsed(self.pulse_value))
    }
}
