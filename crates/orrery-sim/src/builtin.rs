//! Built-in table of planets, dwarf planets, minor planets and their moons.

use crate::body::{BodyKind, BodyMetadata, CelestialBody, RingConfig};

/// Spin rate of top-level bodies, radians per tick.
pub const BODY_SPIN_RATE: f64 = 0.01;
/// Spin rate of moons, radians per tick.
pub const MOON_SPIN_RATE: f64 = 0.02;
/// Moons advance at this fraction of their nominal rate.
pub const MOON_TIME_SCALE: f64 = 0.1;

/// A top-level body in the built-in table.
#[derive(Debug)]
pub struct BodySpec {
    pub name: &'static str,
    pub kind: BodyKind,
    pub size: f64,
    pub distance: f64,
    pub speed: f64,
    pub initial_angle: Option<f64>,
    pub color: [f32; 3],
    pub texture: Option<&'static str>,
    pub discovery_year: &'static str,
    pub description: &'static str,
    pub has_rings: bool,
    pub moons: &'static [MoonSpec],
}

/// A moon in the built-in table. Distances are in parent radii.
#[derive(Debug)]
pub struct MoonSpec {
    pub name: &'static str,
    pub size: f64,
    pub distance: f64,
    pub speed: f64,
    pub initial_angle: f64,
    pub color: [f32; 3],
    pub description: &'static str,
}

impl BodySpec {
    /// Arena record for this body; parent and pulse are assigned on insert.
    pub fn to_body(&self) -> CelestialBody {
        let mut body = CelestialBody::circular(
            self.name,
            self.kind,
            self.size,
            self.distance,
            self.speed,
            self.initial_angle.unwrap_or(0.0),
        );
        body.self_rotation_rate = BODY_SPIN_RATE;
        body.pickable = true;
        body.rings = self.has_rings.then(|| RingConfig {
            inner_radius: self.size + 0.5,
            outer_radius: self.size + 1.2,
        });
        body.metadata = BodyMetadata {
            color: self.color,
            texture: self.texture.map(str::to_string),
            discovery_year: Some(self.discovery_year.to_string()),
            description: self.description.to_string(),
        };
        body
    }
}

impl MoonSpec {
    pub fn to_body(&self) -> CelestialBody {
        let mut body = CelestialBody::circular(
            self.name,
            BodyKind::Moon,
            self.size,
            self.distance,
            self.speed,
            self.initial_angle,
        );
        body.time_scale = MOON_TIME_SCALE;
        body.self_rotation_rate = MOON_SPIN_RATE;
        body.metadata = BodyMetadata {
            color: self.color,
            description: self.description.to_string(),
            ..BodyMetadata::default()
        };
        body
    }
}

const fn moon(
    name: &'static str,
    size: f64,
    distance: f64,
    speed: f64,
    initial_angle: f64,
    color: [f32; 3],
    description: &'static str,
) -> MoonSpec {
    MoonSpec {
        name,
        size,
        distance,
        speed,
        initial_angle,
        color,
        description,
    }
}

/// The built-in system, in insertion order.
pub static BUILTIN_BODIES: &[BodySpec] = &[
    BodySpec {
        name: "Mercury",
        kind: BodyKind::Planet,
        size: 0.5,
        distance: 8.0,
        speed: 0.0041,
        initial_angle: Some(2.1),
        color: [0.55, 0.53, 0.5],
        texture: Some("Mercury.jpg"),
        discovery_year: "Ancient",
        description: "Closest planet to the Sun. No atmosphere and no moons.",
        has_rings: false,
        moons: &[],
    },
    BodySpec {
        name: "Venus",
        kind: BodyKind::Planet,
        size: 0.9,
        distance: 11.0,
        speed: 0.0016,
        initial_angle: Some(4.8),
        color: [0.9, 0.8, 0.55],
        texture: Some("Venus.jpg"),
        discovery_year: "Ancient",
        description: "Hottest planet, wrapped in a thick carbon dioxide atmosphere.",
        has_rings: false,
        moons: &[],
    },
    BodySpec {
        name: "Earth",
        kind: BodyKind::Planet,
        size: 1.0,
        distance: 15.0,
        speed: 0.001,
        initial_angle: Some(3.45),
        color: [0.2, 0.4, 0.8],
        texture: Some("Earth.jpg"),
        discovery_year: "N/A",
        description: "The only known planet with life. 71% of its surface is water.",
        has_rings: false,
        moons: &[moon(
            "Moon",
            0.27,
            2.5,
            0.037,
            1.2,
            [0.53, 0.53, 0.53],
            "Earth's only natural satellite.",
        )],
    },
    BodySpec {
        name: "Mars",
        kind: BodyKind::Planet,
        size: 0.8,
        distance: 19.0,
        speed: 0.00053,
        initial_angle: Some(0.9),
        color: [0.75, 0.35, 0.2],
        texture: Some("Mars.jpg"),
        discovery_year: "Ancient",
        description: "The red planet, home of Olympus Mons and Valles Marineris.",
        has_rings: false,
        moons: &[
            moon("Phobos", 0.05, 1.5, 0.32, 0.5, [0.4, 0.26, 0.13], "Larger, inner moon of Mars."),
            moon("Deimos", 0.03, 2.2, 0.08, 2.1, [0.4, 0.26, 0.13], "Smaller, outer moon of Mars."),
        ],
    },
    BodySpec {
        name: "Vesta",
        kind: BodyKind::Asteroid,
        size: 0.15,
        distance: 20.5,
        speed: 0.00029,
        initial_angle: Some(5.2),
        color: [0.8, 0.8, 0.8],
        texture: None,
        discovery_year: "1807",
        description: "Second-largest asteroid with a basaltic surface.",
        has_rings: false,
        moons: &[],
    },
    BodySpec {
        name: "Pallas",
        kind: BodyKind::Asteroid,
        size: 0.12,
        distance: 21.2,
        speed: 0.00022,
        initial_angle: Some(1.8),
        color: [0.67, 0.67, 0.67],
        texture: None,
        discovery_year: "1802",
        description: "Third-largest asteroid on a highly inclined orbit.",
        has_rings: false,
        moons: &[],
    },
    BodySpec {
        name: "Jupiter",
        kind: BodyKind::Planet,
        size: 2.0,
        distance: 25.0,
        speed: 0.000084,
        initial_angle: Some(2.7),
        color: [0.8, 0.7, 0.55],
        texture: Some("Jupiter.jpg"),
        discovery_year: "Ancient",
        description: "Largest planet. The Great Red Spot is a storm larger than Earth.",
        has_rings: false,
        moons: &[
            moon("Io", 0.15, 3.5, 0.56, 0.8, [1.0, 1.0, 0.6], "Most volcanically active body known."),
            moon("Europa", 0.13, 4.2, 0.28, 1.5, [0.53, 0.81, 0.92], "Ice shell over a subsurface ocean."),
            moon("Ganymede", 0.22, 5.1, 0.14, 3.2, [0.55, 0.49, 0.42], "Largest moon, with its own magnetic field."),
            moon("Callisto", 0.20, 6.0, 0.06, 4.9, [0.41, 0.41, 0.41], "Most heavily cratered body known."),
            moon("Amalthea", 0.08, 2.8, 2.0, 5.2, [0.6, 0.4, 0.2], "Irregular inner moon."),
            moon("Himalia", 0.05, 7.5, 0.013, 2.1, [0.5, 0.5, 0.5], "Largest irregular moon of Jupiter."),
            moon("Lysithea", 0.02, 8.2, 0.010, 4.7, [0.4, 0.4, 0.4], "Small prograde irregular moon."),
            moon("Elara", 0.03, 8.0, 0.011, 1.8, [0.45, 0.45, 0.45], "Irregular moon discovered in 1905."),
        ],
    },
    BodySpec {
        name: "Saturn",
        kind: BodyKind::Planet,
        size: 1.7,
        distance: 31.0,
        speed: 0.000034,
        initial_angle: Some(5.8),
        color: [0.9, 0.8, 0.6],
        texture: Some("Saturn.jpg"),
        discovery_year: "Ancient",
        description: "Prominent ring system; less dense than water.",
        has_rings: true,
        moons: &[
            moon("Mimas", 0.06, 2.8, 1.05, 0.9, [0.7, 0.7, 0.7], "Dominated by the Herschel crater."),
            moon("Enceladus", 0.08, 3.2, 0.73, 4.1, [0.94, 0.97, 1.0], "Ice geysers at the south pole."),
            moon("Tethys", 0.09, 3.7, 0.52, 2.7, [0.8, 0.8, 0.85], "Icy moon with the Odysseus crater."),
            moon("Dione", 0.09, 4.1, 0.37, 5.5, [0.75, 0.75, 0.8], "Ice cliffs on the trailing side."),
            moon("Rhea", 0.12, 4.8, 0.22, 1.3, [0.7, 0.7, 0.75], "Thin oxygen exosphere."),
            moon("Titan", 0.21, 5.5, 0.063, 2.3, [1.0, 0.65, 0.0], "Thick atmosphere and methane lakes."),
            moon("Hyperion", 0.04, 6.2, 0.048, 3.8, [0.6, 0.5, 0.4], "Chaotic rotation, sponge-like surface."),
            moon("Iapetus", 0.11, 7.0, 0.014, 0.5, [0.3, 0.3, 0.3], "Two-tone coloration."),
            moon("Phoebe", 0.03, 8.5, 0.006, 4.9, [0.25, 0.25, 0.25], "Retrograde captured body."),
        ],
    },
    BodySpec {
        name: "Uranus",
        kind: BodyKind::Planet,
        size: 1.2,
        distance: 37.0,
        speed: 0.000012,
        initial_angle: Some(1.2),
        color: [0.6, 0.85, 0.9],
        texture: Some("Uranus.jpg"),
        discovery_year: "1781",
        description: "Ice giant tilted on its side.",
        has_rings: false,
        moons: &[
            moon("Ariel", 0.08, 2.2, 0.39, 2.1, [0.6, 0.6, 0.65], "Youngest surface of the Uranian moons."),
            moon("Umbriel", 0.08, 2.5, 0.23, 4.8, [0.4, 0.4, 0.45], "Darkest major Uranian moon."),
            moon("Titania", 0.11, 3.0, 0.12, 1.7, [0.55, 0.55, 0.6], "Largest moon of Uranus."),
            moon("Oberon", 0.10, 3.4, 0.075, 5.3, [0.5, 0.5, 0.55], "Outermost major moon."),
            moon("Miranda", 0.06, 1.8, 0.67, 3.7, [0.53, 0.53, 0.53], "Extreme geological features."),
            moon("Puck", 0.03, 1.5, 1.18, 0.8, [0.45, 0.45, 0.5], "Small inner moon."),
        ],
    },
    BodySpec {
        name: "Neptune",
        kind: BodyKind::Planet,
        size: 1.1,
        distance: 42.0,
        speed: 0.0000061,
        initial_angle: Some(6.1),
        color: [0.25, 0.4, 0.85],
        texture: Some("Neptune.jpg"),
        discovery_year: "1846",
        description: "Windiest planet, deep blue from methane.",
        has_rings: false,
        moons: &[
            moon("Triton", 0.11, 3.0, 0.17, 0.9, [0.53, 0.81, 0.92], "Retrograde moon with nitrogen geysers."),
            moon("Nereid", 0.02, 4.8, 0.003, 3.2, [0.5, 0.5, 0.5], "Highly eccentric captured moon."),
            moon("Proteus", 0.03, 2.2, 0.89, 5.7, [0.4, 0.4, 0.4], "Largest irregular-shaped Neptunian moon."),
            moon("Larissa", 0.015, 1.8, 1.81, 2.4, [0.35, 0.35, 0.35], "Small inner moon."),
        ],
    },
    BodySpec {
        name: "Ceres",
        kind: BodyKind::Dwarf,
        size: 0.3,
        distance: 22.0,
        speed: 0.00022,
        initial_angle: None,
        color: [0.6, 0.6, 0.6],
        texture: None,
        discovery_year: "1801",
        description: "Largest object in the asteroid belt.",
        has_rings: false,
        moons: &[],
    },
    BodySpec {
        name: "Pluto",
        kind: BodyKind::Dwarf,
        size: 0.4,
        distance: 48.0,
        speed: 0.000004,
        initial_angle: Some(5.3),
        color: [0.82, 0.71, 0.55],
        texture: None,
        discovery_year: "1930",
        description: "Former ninth planet with heart-shaped nitrogen plains.",
        has_rings: false,
        moons: &[moon("Charon", 0.2, 1.8, 0.16, 1.8, [0.5, 0.5, 0.5], "Tidally locked to Pluto.")],
    },
    BodySpec {
        name: "Eris",
        kind: BodyKind::Dwarf,
        size: 0.35,
        distance: 52.0,
        speed: 0.0000018,
        initial_angle: Some(2.7),
        color: [0.9, 0.9, 0.98],
        texture: None,
        discovery_year: "2005",
        description: "Most massive dwarf planet.",
        has_rings: false,
        moons: &[moon("Dysnomia", 0.04, 2.0, 0.067, 4.5, [0.6, 0.6, 0.6], "Only known moon of Eris.")],
    },
    BodySpec {
        name: "Makemake",
        kind: BodyKind::Dwarf,
        size: 0.25,
        distance: 50.0,
        speed: 0.0000032,
        initial_angle: Some(1.9),
        color: [0.55, 0.27, 0.07],
        texture: None,
        discovery_year: "2005",
        description: "Reddish dwarf planet without an atmosphere.",
        has_rings: false,
        moons: &[moon("MK 2", 0.02, 1.5, 0.083, 0.7, [0.4, 0.4, 0.4], "Small, dark moon.")],
    },
    BodySpec {
        name: "Haumea",
        kind: BodyKind::Dwarf,
        size: 0.28,
        distance: 51.0,
        speed: 0.0000035,
        initial_angle: Some(4.2),
        color: [1.0, 1.0, 1.0],
        texture: None,
        discovery_year: "2004",
        description: "Elongated dwarf planet spinning every four hours.",
        has_rings: false,
        moons: &[
            moon("Hi'iaka", 0.05, 2.2, 0.02, 2.9, [0.87, 0.87, 0.87], "Larger moon of Haumea."),
            moon("Namaka", 0.03, 1.8, 0.056, 5.1, [0.8, 0.8, 0.8], "Smaller, inner moon of Haumea."),
        ],
    },
    BodySpec {
        name: "Sedna",
        kind: BodyKind::Dwarf,
        size: 0.2,
        distance: 65.0,
        speed: 0.00000009,
        initial_angle: Some(0.1),
        color: [0.55, 0.0, 0.0],
        texture: None,
        discovery_year: "2003",
        description: "Extremely distant detached object.",
        has_rings: false,
        moons: &[],
    },
    BodySpec {
        name: "Quaoar",
        kind: BodyKind::Dwarf,
        size: 0.18,
        distance: 54.0,
        speed: 0.0000035,
        initial_angle: Some(3.1),
        color: [0.4, 0.26, 0.13],
        texture: None,
        discovery_year: "2002",
        description: "Classical Kuiper belt object with a ring.",
        has_rings: false,
        moons: &[moon("Weywot", 0.02, 1.6, 0.083, 1.3, [0.33, 0.33, 0.33], "Moon of Quaoar.")],
    },
    BodySpec {
        name: "Orcus",
        kind: BodyKind::Dwarf,
        size: 0.16,
        distance: 49.0,
        speed: 0.000004,
        initial_angle: Some(5.7),
        color: [0.18, 0.31, 0.31],
        texture: None,
        discovery_year: "2004",
        description: "Plutino in 2:3 resonance with Neptune.",
        has_rings: false,
        moons: &[moon("Vanth", 0.06, 1.9, 0.1, 4.8, [0.27, 0.27, 0.27], "Large moon of Orcus.")],
    },
    BodySpec {
        name: "Gonggong",
        kind: BodyKind::Dwarf,
        size: 0.19,
        distance: 56.0,
        speed: 0.0000018,
        initial_angle: Some(2.4),
        color: [0.5, 0.0, 0.13],
        texture: None,
        discovery_year: "2007",
        description: "Red scattered-disk object.",
        has_rings: false,
        moons: &[moon("Xiangliu", 0.03, 1.7, 0.1, 3.8, [0.4, 0.4, 0.4], "Moon of Gonggong.")],
    },
    BodySpec {
        name: "Varuna",
        kind: BodyKind::Tno,
        size: 0.12,
        distance: 53.0,
        speed: 0.0000027,
        initial_angle: Some(4.7),
        color: [0.41, 0.41, 0.41],
        texture: None,
        discovery_year: "2000",
        description: "Elongated classical Kuiper belt object.",
        has_rings: false,
        moons: &[],
    },
    BodySpec {
        name: "Ixion",
        kind: BodyKind::Tno,
        size: 0.11,
        distance: 49.5,
        speed: 0.000004,
        initial_angle: Some(0.8),
        color: [0.55, 0.27, 0.07],
        texture: None,
        discovery_year: "2001",
        description: "Very red plutino.",
        has_rings: false,
        moons: &[],
    },
    BodySpec {
        name: "Salacia",
        kind: BodyKind::Tno,
        size: 0.13,
        distance: 50.3,
        speed: 0.0000035,
        initial_angle: Some(2.9),
        color: [0.6, 0.6, 0.65],
        texture: None,
        discovery_year: "2004",
        description: "Large trans-Neptunian object with a moon.",
        has_rings: false,
        moons: &[moon("Actaea", 0.04, 1.4, 0.09, 1.9, [0.5, 0.5, 0.55], "Moon of Salacia.")],
    },
    BodySpec {
        name: "2007 OR10",
        kind: BodyKind::Dwarf,
        size: 0.16,
        distance: 55.2,
        speed: 0.0000019,
        initial_angle: Some(3.7),
        color: [0.45, 0.15, 0.10],
        texture: None,
        discovery_year: "2007",
        description: "One of the largest known dwarf planets, very red.",
        has_rings: false,
        moons: &[moon(
            "S/2016 (225088) 1",
            0.025,
            1.6,
            0.08,
            5.1,
            [0.4, 0.4, 0.4],
            "Small moon of 2007 OR10.",
        )],
    },
];
