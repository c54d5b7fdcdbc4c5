//! Show/hide flags for population groups and labels.

use orrery_population::RegionKind;

use crate::body::BodyKind;

/// A group of renderables toggled together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisibilityGroup {
    Orbits,
    Moons,
    /// Inner, middle and outer main belt bands.
    MainBelt,
    Trojans,
    KuiperBelt,
    ScatteredDisk,
    OortCloud,
    /// Famous asteroids, near-Earth objects and sentry objects.
    FetchedAsteroids,
    Comets,
    PlanetLabels,
    MoonLabels,
}

impl VisibilityGroup {
    pub const ALL: [VisibilityGroup; 11] = [
        VisibilityGroup::Orbits,
        VisibilityGroup::Moons,
        VisibilityGroup::MainBelt,
        VisibilityGroup::Trojans,
        VisibilityGroup::KuiperBelt,
        VisibilityGroup::ScatteredDisk,
        VisibilityGroup::OortCloud,
        VisibilityGroup::FetchedAsteroids,
        VisibilityGroup::Comets,
        VisibilityGroup::PlanetLabels,
        VisibilityGroup::MoonLabels,
    ];

    /// Groups stepped through by the belt cycle key, in order.
    pub const BELT_CYCLE: [VisibilityGroup; 4] = [
        VisibilityGroup::MainBelt,
        VisibilityGroup::Trojans,
        VisibilityGroup::KuiperBelt,
        VisibilityGroup::ScatteredDisk,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Group a generated belt region belongs to.
    pub fn for_region(region: RegionKind) -> Self {
        match region {
            RegionKind::InnerBelt | RegionKind::MiddleBelt | RegionKind::OuterBelt => {
                VisibilityGroup::MainBelt
            }
            RegionKind::TrojanL4 | RegionKind::TrojanL5 => VisibilityGroup::Trojans,
            RegionKind::KuiperBelt => VisibilityGroup::KuiperBelt,
            RegionKind::ScatteredDisk => VisibilityGroup::ScatteredDisk,
            RegionKind::OortCloud => VisibilityGroup::OortCloud,
        }
    }

    /// Group that hides a body of this kind, if any. Built-in planets and
    /// minor planets are always shown.
    pub fn for_body(kind: BodyKind) -> Option<Self> {
        match kind {
            BodyKind::Moon => Some(VisibilityGroup::Moons),
            BodyKind::Neo | BodyKind::Sentry => Some(VisibilityGroup::FetchedAsteroids),
            BodyKind::Comet => Some(VisibilityGroup::Comets),
            BodyKind::Planet | BodyKind::Dwarf | BodyKind::Asteroid | BodyKind::Tno => None,
        }
    }
}

/// Visibility of every group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visibility {
    flags: [bool; VisibilityGroup::ALL.len()],
}

impl Default for Visibility {
    fn default() -> Self {
        let mut flags = [true; VisibilityGroup::ALL.len()];
        flags[VisibilityGroup::PlanetLabels.index()] = false;
        flags[VisibilityGroup::MoonLabels.index()] = false;
        Self { flags }
    }
}

impl Visibility {
    pub fn is_visible(&self, group: VisibilityGroup) -> bool {
        self.flags[group.index()]
    }

    pub fn set(&mut self, group: VisibilityGroup, visible: bool) {
        self.flags[group.index()] = visible;
    }

    /// Flip one group. Returns the new state.
    pub fn toggle(&mut self, group: VisibilityGroup) -> bool {
        let flag = &mut self.flags[group.index()];
        *flag = !*flag;
        *flag
    }

    /// Hide the first visible belt group and toggle the one after it. With
    /// nothing visible, toggle the first.
    pub fn cycle_belts(&mut self) {
        let cycle = VisibilityGroup::BELT_CYCLE;
        match cycle.iter().position(|&g| self.is_visible(g)) {
            Some(current) => {
                self.set(cycle[current], false);
                self.toggle(cycle[(current + 1) % cycle.len()]);
            }
            None => {
                self.toggle(cycle[0]);
            }
        }
    }

    /// Show every belt group if any is hidden, otherwise hide them all.
    pub fn toggle_all_belts(&mut self) {
        let show = VisibilityGroup::BELT_CYCLE
            .iter()
            .any(|&g| !self.is_visible(g));
        for group in VisibilityGroup::BELT_CYCLE {
            self.set(group, show);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VisibilityGroup, bool)> + '_ {
        VisibilityGroup::ALL
            .iter()
            .map(|&group| (group, self.is_visible(group)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_hide_labels_only() {
        let vis = Visibility::default();
        for (group, visible) in vis.iter() {
            let is_label = matches!(
                group,
                VisibilityGroup::PlanetLabels | VisibilityGroup::MoonLabels
            );
            assert_eq!(visible, !is_label, "{group:?}");
        }
    }

    #[test]
    fn test_cycle_from_all_visible() {
        let mut vis = Visibility::default();
        vis.cycle_belts();
        // main belt hidden, trojans toggled off as well
        assert!(!vis.is_visible(VisibilityGroup::MainBelt));
        assert!(!vis.is_visible(VisibilityGroup::Trojans));
        assert!(vis.is_visible(VisibilityGroup::KuiperBelt));
    }

    #[test]
    fn test_cycle_walks_single_visible_group() {
        let mut vis = Visibility::default();
        for group in VisibilityGroup::BELT_CYCLE {
            vis.set(group, false);
        }
        vis.cycle_belts();
        assert!(vis.is_visible(VisibilityGroup::MainBelt));

        vis.cycle_belts();
        assert!(!vis.is_visible(VisibilityGroup::MainBelt));
        assert!(vis.is_visible(VisibilityGroup::Trojans));

        vis.cycle_belts();
        vis.cycle_belts();
        assert!(vis.is_visible(VisibilityGroup::ScatteredDisk));
        vis.cycle_belts();
        // wraps back around
        assert!(vis.is_visible(VisibilityGroup::MainBelt));
        assert!(!vis.is_visible(VisibilityGroup::ScatteredDisk));
    }

    #[test]
    fn test_toggle_all_belts() {
        let mut vis = Visibility::default();
        vis.toggle_all_belts();
        assert!(VisibilityGroup::BELT_CYCLE.iter().all(|&g| !vis.is_visible(g)));
        vis.set(VisibilityGroup::Trojans, true);
        vis.toggle_all_belts();
        assert!(VisibilityGroup::BELT_CYCLE.iter().all(|&g| vis.is_visible(g)));
        assert!(vis.is_visible(VisibilityGroup::OortCloud));
    }

    #[test]
    fn test_region_and_kind_mapping() {
        assert_eq!(
            VisibilityGroup::for_region(RegionKind::MiddleBelt),
            VisibilityGroup::MainBelt
        );
        assert_eq!(
            VisibilityGroup::for_region(RegionKind::TrojanL5),
            VisibilityGroup::Trojans
        );
        assert_eq!(VisibilityGroup::for_body(BodyKind::Planet), None);
        assert_eq!(
            VisibilityGroup::for_body(BodyKind::Sentry),
            Some(VisibilityGroup::FetchedAsteroids)
        );
    }
}
