//! Best-match version selection.
//!
//! Given the versions an index knows about and the ranges callers demand,
//! pick the highest version every range admits.

use std::collections::BTreeSet;

use crux_core::types::{Version, VersionRange};
use tracing::debug;

/// Version selector for finding best matching versions
#[derive(Debug, Clone)]
pub struct VersionSelector {
    /// Available versions in ascending order
    available: BTreeSet<Version>,
}

/// Accumulates ranges and checks joint satisfiability
#[derive(Debug, Clone, Default)]
pub struct RangeSet {
    ranges: Vec<VersionRange>,
}

impl VersionSelector {
    /// Create new version selector with available versions
    pub fn new(versions: Vec<Version>) -> Self {
        let available = versions.into_iter().collect();
        Self { available }
    }

    /// Select highest version admitted by every range
    pub fn select_best(&self, ranges: &[VersionRange]) -> Option<Version> {
        let best = self
            .available
            .iter()
            .rev()
            .find(|version| ranges.iter().all(|range| range.contains(version)))
            .cloned();
        debug!(?best, candidates = self.available.len(), "selected best version");
        best
    }

    /// Select highest stable version (no pre-release) admitted by every range
    pub fn select_best_stable(&self, ranges: &[VersionRange]) -> Option<Version> {
        self.available
            .iter()
            .rev()
            .filter(|version| !version.is_prerelease())
            .find(|version| ranges.iter().all(|range| range.contains(version)))
            .cloned()
    }

    /// Select version with preference for stability
    pub fn select_preferred(
        &self,
        ranges: &[VersionRange],
        allow_prerelease: bool,
    ) -> Option<Version> {
        if allow_prerelease {
            self.select_best(ranges)
        } else {
            // Try stable first, fall back to pre-release if nothing stable matches
            self.select_best_stable(ranges)
                .or_else(|| self.select_best(ranges))
        }
    }

    /// Find all versions inside the range
    pub fn find_matching(&self, range: &VersionRange) -> Vec<Version> {
        self.available
            .iter()
            .filter(|version| range.contains(version))
            .cloned()
            .collect()
    }

    /// Find all stable versions inside the range
    pub fn find_matching_stable(&self, range: &VersionRange) -> Vec<Version> {
        self.available
            .iter()
            .filter(|version| !version.is_prerelease() && range.contains(version))
            .cloned()
            .collect()
    }

    /// Get the highest available version
    pub fn highest_version(&self) -> Option<&Version> {
        self.available.iter().next_back()
    }

    /// Get the lowest available version
    pub fn lowest_version(&self) -> Option<&Version> {
        self.available.iter().next()
    }

    /// Check if any version is admitted by every range
    pub fn has_matching(&self, ranges: &[VersionRange]) -> bool {
        self.available
            .iter()
            .any(|version| ranges.iter().all(|range| range.contains(version)))
    }
}

impl RangeSet {
    /// Create an empty range set
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Add a range constraint
    pub fn add(&mut self, range: VersionRange) {
        self.ranges.push(range);
    }

    /// Check if every accumulated range admits `version`
    pub fn admits(&self, version: &Version) -> bool {
        self.ranges.iter().all(|range| range.contains(version))
    }

    /// Check if any available version satisfies every range
    pub fn is_satisfiable(&self, available: &[Version]) -> bool {
        available.iter().any(|version| self.admits(version))
    }

    /// The accumulated ranges
    pub fn ranges(&self) -> &[VersionRange] {
        &self.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_versions() -> Vec<Version> {
        vec![
            Version::parse("1.0.0").unwrap(),
            Version::parse("1.1.0").unwrap(),
            Version::parse("1.2.0").unwrap(),
            Version::parse("2.0.0").unwrap(),
            Version::parse("2.1.0").unwrap(),
            Version::parse("2.2.0-beta").unwrap(),
        ]
    }

    #[test]
    fn test_version_selector_creation() {
        let versions = create_versions();
        let selector = VersionSelector::new(versions.clone());

        assert_eq!(selector.available.len(), 6);
        assert!(selector.available.contains(&versions[0]));
    }

    #[test]
    fn test_select_best() {
        let selector = VersionSelector::new(create_versions());

        let range = VersionRange::parse("[1.0.0,2.0.0)").unwrap();
        let selected = selector.select_best(&[range]).unwrap();

        // highest 1.x version
        assert_eq!(selected, Version::parse("1.2.0").unwrap());
    }

    #[test]
    fn test_select_best_takes_prerelease() {
        let selector = VersionSelector::new(create_versions());

        let range = VersionRange::parse("[2.0.0,)").unwrap();
        let selected = selector.select_best(&[range]).unwrap();

        assert_eq!(selected, Version::parse("2.2.0-beta").unwrap());
    }

    #[test]
    fn test_select_best_stable() {
        let selector = VersionSelector::new(create_versions());

        let range = VersionRange::parse("[2.0.0,)").unwrap();
        let selected = selector.select_best_stable(&[range]).unwrap();

        // 2.1.0, not 2.2.0-beta
        assert_eq!(selected, Version::parse("2.1.0").unwrap());
    }

    #[test]
    fn test_select_preferred_stable() {
        let selector = VersionSelector::new(create_versions());

        let range = VersionRange::parse("[2.0.0,)").unwrap();
        let selected = selector.select_preferred(&[range], false).unwrap();

        assert_eq!(selected, Version::parse("2.1.0").unwrap());
    }

    #[test]
    fn test_select_preferred_falls_back_to_prerelease() {
        let versions = vec![
            Version::parse("1.0.0").unwrap(),
            Version::parse("2.0.0-beta").unwrap(),
        ];
        let selector = VersionSelector::new(versions);

        let range = VersionRange::parse("(1.0.0,)").unwrap();
        let selected = selector.select_preferred(&[range], false).unwrap();

        // nothing stable matches, so the pre-release wins
        assert_eq!(selected, Version::parse("2.0.0-beta").unwrap());
    }

    #[test]
    fn test_find_matching() {
        let selector = VersionSelector::new(create_versions());

        let range = VersionRange::parse("[1.0.0,2.0.0)").unwrap();
        let matching = selector.find_matching(&range);

        assert_eq!(matching.len(), 3); // 1.0.0, 1.1.0, 1.2.0
        assert!(matching.contains(&Version::parse("1.0.0").unwrap()));
        assert!(matching.contains(&Version::parse("1.1.0").unwrap()));
        assert!(matching.contains(&Version::parse("1.2.0").unwrap()));
    }

    #[test]
    fn test_find_matching_stable() {
        let selector = VersionSelector::new(create_versions());

        let range = VersionRange::parse("[2.0.0,)").unwrap();
        let matching = selector.find_matching_stable(&range);

        assert_eq!(matching.len(), 2); // 2.0.0, 2.1.0 (not 2.2.0-beta)
        assert!(!matching.contains(&Version::parse("2.2.0-beta").unwrap()));
    }

    #[test]
    fn test_highest_lowest_version() {
        let selector = VersionSelector::new(create_versions());

        assert_eq!(
            selector.highest_version(),
            Some(&Version::parse("2.2.0-beta").unwrap())
        );
        assert_eq!(
            selector.lowest_version(),
            Some(&Version::parse("1.0.0").unwrap())
        );
    }

    #[test]
    fn test_has_matching() {
        let selector = VersionSelector::new(create_versions());

        let satisfiable = VersionRange::parse("[1.0.0,2.0.0)").unwrap();
        assert!(selector.has_matching(&[satisfiable]));

        let unsatisfiable = VersionRange::parse("[3.0.0,)").unwrap();
        assert!(!selector.has_matching(&[unsatisfiable]));
    }

    #[test]
    fn test_range_set_satisfiability() {
        let mut set = RangeSet::new();

        set.add(VersionRange::parse("[1.0.0,)").unwrap());
        set.add(VersionRange::parse("[,2.0.0)").unwrap());

        let versions = create_versions();
        assert!(set.is_satisfiable(&versions));
        assert_eq!(set.ranges().len(), 2);

        // conflicting constraint
        set.add(VersionRange::parse("[3.0.0,)").unwrap());
        assert!(!set.is_satisfiable(&versions));
    }
}
