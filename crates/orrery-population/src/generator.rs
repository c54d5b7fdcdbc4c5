//! Deterministic belt synthesis from the region table.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::region::{MaterialClass, OrbitRate, RegionConfig, RegionKind};

/// One synthesized minor body on a circular orbit.
#[derive(Clone, Debug, PartialEq)]
pub struct BeltMember {
    pub region: RegionKind,
    /// Orbit radius in scene units.
    pub radius: f64,
    /// Current orbital angle, radians. Grows without wrapping.
    pub angle: f64,
    /// Fixed offset from the orbital plane.
    pub height: f64,
    pub size: f64,
    pub class: MaterialClass,
    /// Euler orientation (x, y, z), radians.
    pub rotation: DVec3,
    /// Per-axis tumble rate, radians per tick.
    pub rotation_speed: DVec3,
    /// Orbital rate, radians per tick.
    pub orbit_speed: f64,
}

impl BeltMember {
    /// Scene-space position for the current angle.
    pub fn position(&self) -> DVec3 {
        let (sin, cos) = self.angle.sin_cos();
        DVec3::new(cos * self.radius, self.height, sin * self.radius)
    }

    /// Advance orbit and tumble by one tick at the given rate.
    pub fn advance(&mut self, rate: f64) {
        self.rotation += self.rotation_speed * rate;
        self.angle += self.orbit_speed * rate;
    }
}

/// Generates belt populations from a seed.
pub struct PopulationGenerator {
    seed: u64,
}

impl PopulationGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generate one region. Deterministic for a given seed and config.
    pub fn generate_region(&self, config: &RegionConfig) -> Vec<BeltMember> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ config.kind.salt());
        let mut members = Vec::with_capacity(config.count);

        for index in 0..config.count {
            let angle = config.layout.angle(index, config.count, rng.random());
            let radius = config.radius.lerp(rng.random());
            let size = config.size.lerp(rng.random());
            let class = config.class_for(rng.random());
            let height = (rng.random::<f64>() - 0.5) * config.vertical_spread;

            let rotation = if config.random_orientation {
                DVec3::new(rng.random(), rng.random(), rng.random()) * std::f64::consts::PI
            } else {
                DVec3::ZERO
            };
            let rotation_speed = DVec3::new(
                config.spin.lerp(rng.random()),
                config.spin.lerp(rng.random()),
                config.spin.lerp(rng.random()),
            );
            let orbit_speed = match config.orbit_rate {
                OrbitRate::Range(range) => range.lerp(rng.random()),
                OrbitRate::Fixed(rate) => rate,
            };

            members.push(BeltMember {
                region: config.kind,
                radius,
                angle,
                height,
                size,
                class,
                rotation,
                rotation_speed,
                orbit_speed,
            });
        }

        log::debug!(
            "Generated {} members for the {}",
            members.len(),
            config.kind.label()
        );
        members
    }

    /// Generate every region in table order.
    pub fn generate_all(&self, regions: &[RegionConfig]) -> Vec<BeltMember> {
        regions
            .iter()
            .flat_map(|region| self.generate_region(region))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::default_regions;

    #[test]
    fn test_counts_and_radius_bands() {
        let generator = PopulationGenerator::new(42);
        for region in default_regions() {
            let members = generator.generate_region(&region);
            assert_eq!(members.len(), region.count, "{}", region.kind.label());
            for m in &members {
                assert!(region.radius.contains(m.radius), "{} r={}", region.kind.label(), m.radius);
                assert!(region.size.contains(m.size));
                assert!(m.height.abs() <= region.vertical_spread / 2.0);
                assert_eq!(m.region, region.kind);
            }
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let regions = default_regions();
        let a = PopulationGenerator::new(7).generate_all(&regions);
        let b = PopulationGenerator::new(7).generate_all(&regions);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let region = &default_regions()[0];
        let a = PopulationGenerator::new(1).generate_region(region);
        let b = PopulationGenerator::new(2).generate_region(region);
        assert_ne!(a, b);
    }

    #[test]
    fn test_trojans_are_clustered_and_locked() {
        let regions = default_regions();
        let l4 = regions.iter().find(|r| r.kind == RegionKind::TrojanL4).unwrap();
        let members = PopulationGenerator::new(3).generate_region(l4);
        let rate = members[0].orbit_speed;
        for m in &members {
            assert_eq!(m.orbit_speed, rate);
            assert!((m.angle - std::f64::consts::FRAC_PI_3).abs() <= 0.5);
            assert_eq!(m.rotation, DVec3::ZERO);
            assert_eq!(m.class, MaterialClass::Trojan);
        }
    }

    #[test]
    fn test_orbit_speeds_within_range() {
        let regions = default_regions();
        let generator = PopulationGenerator::new(9);
        for region in &regions {
            if let OrbitRate::Range(range) = region.orbit_rate {
                for m in generator.generate_region(region) {
                    assert!(range.contains(m.orbit_speed));
                }
            }
        }
    }

    #[test]
    fn test_advance_moves_along_circle() {
        let mut member = PopulationGenerator::new(5).generate_region(&default_regions()[1])[0].clone();
        let before = member.position();
        member.advance(2.0);
        let after = member.position();
        let r_before = (before.x * before.x + before.z * before.z).sqrt();
        let r_after = (after.x * after.x + after.z * after.z).sqrt();
        assert!((r_before - member.radius).abs() < 1e-9);
        assert!((r_after - member.radius).abs() < 1e-9);
        assert_eq!(before.y, after.y);
        assert!(before != after);
    }

    #[test]
    fn test_advance_scales_with_rate() {
        let template = PopulationGenerator::new(5).generate_region(&default_regions()[0])[3].clone();
        let mut single = template.clone();
        let mut double = template.clone();
        for _ in 0..10 {
            single.advance(1.0);
            double.advance(2.0);
        }
        let d1 = single.angle - template.angle;
        let d2 = double.angle - template.angle;
        assert!((d2 - 2.0 * d1).abs() < 1e-12);
    }
}
