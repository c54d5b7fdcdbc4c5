//! Region table: where each population lives and how its members are drawn.

use std::f64::consts::{FRAC_PI_3, TAU};

/// Named population regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKind {
    InnerBelt,
    MiddleBelt,
    OuterBelt,
    /// Leading co-orbital cluster, 60° ahead of the primary.
    TrojanL4,
    /// Trailing co-orbital cluster, 60° behind the primary.
    TrojanL5,
    KuiperBelt,
    ScatteredDisk,
    OortCloud,
}

impl RegionKind {
    pub const ALL: [RegionKind; 8] = [
        RegionKind::InnerBelt,
        RegionKind::MiddleBelt,
        RegionKind::OuterBelt,
        RegionKind::TrojanL4,
        RegionKind::TrojanL5,
        RegionKind::KuiperBelt,
        RegionKind::ScatteredDisk,
        RegionKind::OortCloud,
    ];

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            RegionKind::InnerBelt => "inner belt",
            RegionKind::MiddleBelt => "middle belt",
            RegionKind::OuterBelt => "outer belt",
            RegionKind::TrojanL4 => "Trojans L4",
            RegionKind::TrojanL5 => "Trojans L5",
            RegionKind::KuiperBelt => "Kuiper belt",
            RegionKind::ScatteredDisk => "scattered disk",
            RegionKind::OortCloud => "Oort cloud",
        }
    }

    /// Stream salt mixed into the population seed so each region draws from
    /// its own sequence.
    pub fn salt(self) -> u64 {
        let index = RegionKind::ALL
            .iter()
            .position(|k| *k == self)
            .unwrap_or_default() as u64;
        (index + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Surface material of a minor body. Drives color only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialClass {
    Rocky,
    Metallic,
    Carbonaceous,
    Trojan,
    Icy,
    Dusky,
    Reddish,
    Scattered,
    Oort,
}

impl MaterialClass {
    /// Linear RGB albedo.
    pub fn color(self) -> [f32; 3] {
        match self {
            MaterialClass::Rocky => [0.4, 0.26, 0.13],
            MaterialClass::Metallic => [0.6, 0.6, 0.6],
            MaterialClass::Carbonaceous => [0.5, 0.4, 0.3],
            MaterialClass::Trojan => [0.35, 0.25, 0.15],
            MaterialClass::Icy => [0.6, 0.7, 0.8],
            MaterialClass::Dusky => [0.5, 0.4, 0.3],
            MaterialClass::Reddish => [0.7, 0.5, 0.4],
            MaterialClass::Scattered => [0.6, 0.3, 0.2],
            MaterialClass::Oort => [0.8, 0.6, 0.9],
        }
    }
}

/// One entry of a class-weighted color table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassWeight {
    pub class: MaterialClass,
    pub weight: f64,
}

/// Closed interval sampled linearly from a unit draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Interval centered on zero with total width `width`.
    pub const fn symmetric(width: f64) -> Self {
        Self {
            min: -width / 2.0,
            max: width / 2.0,
        }
    }

    /// Map a unit draw `t ∈ [0, 1)` into the interval.
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// How members are spread around the primary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AngularLayout {
    /// Evenly spaced by index, `(i / count)·2π + draw·jitter`.
    Stratified { jitter: f64 },
    /// Bunched around `base`, `base + (draw - 0.5)·spread`.
    Clustered { base: f64, spread: f64 },
    /// Anywhere on the circle.
    Uniform,
}

impl AngularLayout {
    pub fn angle(&self, index: usize, count: usize, draw: f64) -> f64 {
        match *self {
            AngularLayout::Stratified { jitter } => {
                index as f64 / count.max(1) as f64 * TAU + draw * jitter
            }
            AngularLayout::Clustered { base, spread } => base + (draw - 0.5) * spread,
            AngularLayout::Uniform => draw * TAU,
        }
    }
}

/// Orbital angular rate of a region's members.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitRate {
    /// Each member draws its own rate.
    Range(ValueRange),
    /// Every member shares one rate, locked to a co-orbital primary.
    Fixed(f64),
}

/// Generation parameters for one region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionConfig {
    pub kind: RegionKind,
    pub count: usize,
    /// Orbit radius band; `min` is the inner radius.
    pub radius: ValueRange,
    pub size: ValueRange,
    /// Total height of the slab members are scattered through.
    pub vertical_spread: f64,
    /// Per-axis tumble rate, radians per tick.
    pub spin: ValueRange,
    pub orbit_rate: OrbitRate,
    pub layout: AngularLayout,
    pub classes: Vec<ClassWeight>,
    /// Start each member at a random orientation instead of unrotated.
    pub random_orientation: bool,
}

impl RegionConfig {
    /// Pick a class from the weighted table with a unit draw.
    pub fn class_for(&self, draw: f64) -> MaterialClass {
        let total: f64 = self.classes.iter().map(|c| c.weight).sum();
        let mut threshold = draw * total;
        for entry in &self.classes {
            if threshold < entry.weight {
                return entry.class;
            }
            threshold -= entry.weight;
        }
        self.classes
            .last()
            .map_or(MaterialClass::Rocky, |entry| entry.class)
    }
}

fn weights(table: &[(MaterialClass, f64)]) -> Vec<ClassWeight> {
    table
        .iter()
        .map(|&(class, weight)| ClassWeight { class, weight })
        .collect()
}

/// Orbital rate of the co-orbital primary the Trojan clusters are locked to.
const TROJAN_PRIMARY_RATE: f64 = 0.000084;
/// Orbit radius of the co-orbital primary.
const TROJAN_PRIMARY_DISTANCE: f64 = 25.0;

/// The orrery's eight regions.
pub fn default_regions() -> Vec<RegionConfig> {
    use MaterialClass::*;

    let band = |kind: RegionKind,
                count: usize,
                radius: (f64, f64),
                size_span: f64,
                vertical_spread: f64,
                orbit: (f64, f64),
                table: &[(MaterialClass, f64)]| {
        RegionConfig {
            kind,
            count,
            radius: ValueRange::new(radius.0, radius.1),
            size: ValueRange::new(0.01, 0.01 + size_span),
            vertical_spread,
            spin: ValueRange::symmetric(0.02),
            orbit_rate: OrbitRate::Range(ValueRange::new(orbit.0, orbit.0 + orbit.1)),
            layout: AngularLayout::Stratified { jitter: 0.5 },
            classes: weights(table),
            random_orientation: true,
        }
    };

    let trojans = |kind, base| RegionConfig {
        kind,
        count: 50,
        radius: ValueRange::new(TROJAN_PRIMARY_DISTANCE - 2.0, TROJAN_PRIMARY_DISTANCE + 2.0),
        size: ValueRange::new(0.02, 0.07),
        vertical_spread: 1.0,
        spin: ValueRange::symmetric(0.015),
        orbit_rate: OrbitRate::Fixed(TROJAN_PRIMARY_RATE),
        layout: AngularLayout::Clustered { base, spread: 1.0 },
        classes: weights(&[(Trojan, 1.0)]),
        random_orientation: false,
    };

    vec![
        band(
            RegionKind::InnerBelt,
            150,
            (19.5, 21.5),
            0.06,
            0.8,
            (0.003, 0.002),
            &[(Rocky, 0.5), (Metallic, 0.3), (Carbonaceous, 0.2)],
        ),
        band(
            RegionKind::MiddleBelt,
            200,
            (21.5, 23.5),
            0.07,
            1.0,
            (0.0025, 0.002),
            &[(Rocky, 0.4), (Metallic, 0.35), (Carbonaceous, 0.25)],
        ),
        band(
            RegionKind::OuterBelt,
            150,
            (23.5, 25.5),
            0.08,
            1.2,
            (0.002, 0.0015),
            &[(Rocky, 0.3), (Metallic, 0.4), (Carbonaceous, 0.3)],
        ),
        trojans(RegionKind::TrojanL4, FRAC_PI_3),
        trojans(RegionKind::TrojanL5, -FRAC_PI_3),
        RegionConfig {
            kind: RegionKind::KuiperBelt,
            count: 200,
            radius: ValueRange::new(44.0, 58.0),
            size: ValueRange::new(0.03, 0.11),
            vertical_spread: 3.0,
            spin: ValueRange::symmetric(0.01),
            orbit_rate: OrbitRate::Range(ValueRange::new(0.000_001_5, 0.000_003_5)),
            layout: AngularLayout::Stratified { jitter: 1.0 },
            classes: weights(&[(Icy, 0.3), (Dusky, 0.3), (Reddish, 0.4)]),
            random_orientation: true,
        },
        RegionConfig {
            kind: RegionKind::ScatteredDisk,
            count: 80,
            radius: ValueRange::new(58.0, 80.0),
            size: ValueRange::new(0.04, 0.14),
            vertical_spread: 10.0,
            spin: ValueRange::symmetric(0.008),
            orbit_rate: OrbitRate::Range(ValueRange::new(0.000_000_8, 0.000_001_8)),
            layout: AngularLayout::Uniform,
            classes: weights(&[(Scattered, 1.0)]),
            random_orientation: true,
        },
        RegionConfig {
            kind: RegionKind::OortCloud,
            count: 50,
            radius: ValueRange::new(80.0, 120.0),
            size: ValueRange::new(0.05, 0.17),
            vertical_spread: 20.0,
            spin: ValueRange::symmetric(0.005),
            orbit_rate: OrbitRate::Range(ValueRange::new(0.000_000_3, 0.000_000_8)),
            layout: AngularLayout::Uniform,
            classes: weights(&[(Oort, 1.0)]),
            random_orientation: true,
        },
    ]
}
