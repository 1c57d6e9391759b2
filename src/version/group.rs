//! Per-source candidate groups and the cross-source algorithms
//!
//! A checking run builds one [`Group`] per scraped source and then narrows the
//! [`Groups`] down in three passes:
//!
//! ```text
//! weighten ──▶ group_versions ──▶ clean_by_weights
//! (frequency)   (merge by key)     (average filter)
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use tracing::{debug, warn};

use crate::version::error::EmptyInputError;
use crate::version::extract::extract_all;
use crate::version::semver::parse_version;
use crate::version::types::Version;

/// Candidates found in one source, plus the URLs that produced them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    versions: Vec<Version>,
    preferred_version: Option<Version>,
    urls: Vec<String>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group from an initial list of candidates; the first one is preferred.
    pub fn with_versions(versions: Vec<Version>) -> Self {
        let mut group = Self::new();
        for version in versions {
            group.add_version(version);
        }
        group
    }

    /// Create a group for one source: its URL and every candidate in its text.
    pub fn from_source(url: impl Into<String>, content: &str) -> Self {
        let mut group = Self::new();
        group.add_url(url);
        group.extract_all(content);
        group
    }

    /// Append a candidate. The first candidate ever added becomes the preferred one.
    pub fn add_version(&mut self, version: impl Into<Version>) {
        let version = version.into();
        if !self.has_preferred() {
            self.preferred_version = Some(version.clone());
        }
        self.versions.push(version);
    }

    pub fn add_url(&mut self, url: impl Into<String>) {
        self.urls.push(url.into());
    }

    /// Add every candidate found in `content` with weight 0.
    pub fn extract_all(&mut self, content: &str) {
        for value in extract_all(content) {
            self.add_version(Version::new(value));
        }
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn preferred_version(&self) -> Option<&Version> {
        self.preferred_version.as_ref()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    fn preferred_weight(&self) -> u32 {
        self.preferred_version.as_ref().map_or(0, |v| v.weight)
    }

    /// A preferred version with an empty value counts as unset.
    fn has_preferred(&self) -> bool {
        self.preferred_version
            .as_ref()
            .is_some_and(|v| !v.value.is_empty())
    }

    /// The version this group is clustered under: preferred, else first, never empty.
    fn key_version(&self) -> Option<&Version> {
        self.preferred_version
            .as_ref()
            .filter(|_| self.has_preferred())
            .or_else(|| self.versions.first())
            .filter(|v| !v.value.is_empty())
    }
}

/// All groups of one checking run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Groups {
    groups: Vec<Group>,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Weigh every candidate by how often its exact value appears across all groups.
    ///
    /// Each group is rebuilt with the global weights, and its preferred version
    /// becomes the heaviest candidate. Ties keep the candidate seen first.
    pub fn weighten(&mut self) {
        let mut weights: HashMap<String, u32> = HashMap::new();
        for version in self.groups.iter().flat_map(|group| &group.versions) {
            *weights.entry(version.value.clone()).or_insert(0) += 1;
        }

        let groups = self
            .groups
            .iter()
            .map(|group| {
                let mut preferred: Option<Version> = None;
                let versions: Vec<Version> = group
                    .versions
                    .iter()
                    .map(|version| {
                        let weight = weights.get(&version.value).copied().unwrap_or(0);
                        let weighted = version.clone().with_weight(weight);
                        let replace = match preferred.as_ref() {
                            Some(p) if !p.value.is_empty() => p.weight < weight,
                            _ => true,
                        };
                        if replace {
                            preferred = Some(weighted.clone());
                        }
                        weighted
                    })
                    .collect();

                if let Some(preferred) = &preferred {
                    debug!(
                        "Preferred version '{}' with weight {}",
                        preferred.value, preferred.weight
                    );
                }

                Group {
                    versions,
                    preferred_version: preferred,
                    urls: group.urls.clone(),
                }
            })
            .collect();

        self.groups = groups;
    }

    /// Merge groups that converge on the same version.
    ///
    /// The first group for a version provides the single candidate of the merged
    /// group; every group contributes its first URL. Groups without any
    /// candidate are dropped. Order follows the first appearance of each version.
    pub fn group_versions(&mut self) {
        let mut merged: IndexMap<String, Group> = IndexMap::new();

        for group in std::mem::take(&mut self.groups) {
            let Some(version) = group.key_version().cloned() else {
                debug!("Dropping group without candidates: {:?}", group.urls);
                continue;
            };
            let url = group.urls.into_iter().next();

            match merged.entry(version.value.clone()) {
                Entry::Occupied(mut entry) => entry.get_mut().urls.extend(url),
                Entry::Vacant(entry) => {
                    let mut grouped = Group::new();
                    grouped.add_version(version);
                    grouped.urls.extend(url);
                    entry.insert(grouped);
                }
            }
        }

        self.groups = merged.into_values().collect();
    }

    /// Drop groups whose preferred weight is below the average and that have no URL.
    ///
    /// Fails on an empty collection since there is no average to compare against.
    pub fn clean_by_weights(&mut self) -> Result<(), EmptyInputError> {
        if self.groups.is_empty() {
            return Err(EmptyInputError);
        }

        let total: u64 = self
            .groups
            .iter()
            .map(|group| u64::from(group.preferred_weight()))
            .sum();
        let average_weight = total / self.groups.len() as u64;

        self.groups.retain(|group| {
            let keep =
                u64::from(group.preferred_weight()) >= average_weight || !group.urls.is_empty();
            if !keep {
                debug!(
                    "Dropping {:?} below average weight {}",
                    group.preferred_version, average_weight
                );
            }
            keep
        });

        Ok(())
    }

    /// Run the full narrowing pipeline: weighten, group_versions, clean_by_weights.
    pub fn resolve(&mut self) -> Result<(), EmptyInputError> {
        self.weighten();
        self.group_versions();
        self.clean_by_weights()
    }

    /// The greatest preferred version across all groups.
    ///
    /// Candidates that are not semantic versions are skipped; on equal versions
    /// the first one wins.
    pub fn latest(&self) -> Option<&Version> {
        let mut latest: Option<&Version> = None;

        for candidate in self.groups.iter().filter_map(Group::preferred_version) {
            if let Err(e) = parse_version(&candidate.value) {
                warn!("Skipping candidate while choosing latest: {}", e);
                continue;
            }

            latest = match latest {
                Some(current) if !matches!(current.less_than(candidate), Ok(true)) => {
                    Some(current)
                }
                _ => Some(candidate),
            };
        }

        latest
    }
}

impl FromIterator<Group> for Groups {
    fn from_iter<I: IntoIterator<Item = Group>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn group(versions: &[&str], urls: &[&str]) -> Group {
        let mut group = Group::with_versions(versions.iter().map(|v| Version::new(*v)).collect());
        for url in urls {
            group.add_url(*url);
        }
        group
    }

    fn preferred_values(groups: &Groups) -> Vec<Option<&str>> {
        groups
            .iter()
            .map(|g| g.preferred_version().map(|v| v.value.as_str()))
            .collect()
    }

    #[test]
    fn add_version_first_candidate_becomes_preferred() {
        let mut group = Group::new();
        group.add_version("1.0");
        group.add_version(Version::new("2.0").with_weight(5));

        assert_eq!(group.preferred_version(), Some(&Version::new("1.0")));
        assert_eq!(group.versions().len(), 2);
    }

    #[test]
    fn add_version_replaces_empty_preferred_candidate() {
        let group = group(&["", "1.0"], &["u1"]);

        assert_eq!(group.preferred_version(), Some(&Version::new("1.0")));
    }

    #[test]
    fn weighten_replaces_empty_preferred_candidate() {
        // "" outweighs both real candidates but never stays preferred
        let mut groups: Groups = [group(&["", "1.0"], &["u1"]), group(&["", "2.0"], &["u2"])]
            .into_iter()
            .collect();

        groups.weighten();

        assert_eq!(preferred_values(&groups), vec![Some("1.0"), Some("2.0")]);
        assert_eq!(groups.groups()[0].versions()[0].weight, 2);
    }

    #[test]
    fn group_versions_keeps_group_with_empty_and_real_candidates() {
        let mut groups: Groups = [group(&["", "1.0"], &["u1"])].into_iter().collect();

        groups.group_versions();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.groups()[0].versions(), &[Version::new("1.0")]);
        assert_eq!(groups.groups()[0].urls(), &["u1".to_string()]);
    }

    #[test]
    fn extract_all_adds_candidates_with_zero_weight() {
        let mut group = Group::new();
        group.extract_all("App 1.2.3 (build 456) for x86_64");

        assert_eq!(
            group.versions(),
            &[Version::new("1.2.3"), Version::new("456")]
        );
        assert_eq!(group.preferred_version().unwrap().value, "1.2.3");
    }

    #[test]
    fn from_source_records_url_and_candidates() {
        let group = Group::from_source("https://example.com/appcast.xml", "Version 3.1");

        assert_eq!(group.urls(), &["https://example.com/appcast.xml".to_string()]);
        assert_eq!(group.versions(), &[Version::new("3.1")]);
    }

    #[test]
    fn weighten_counts_occurrences_across_groups() {
        let mut groups: Groups = [
            group(&["1.0"], &["u1"]),
            group(&["1.0"], &["u2"]),
            group(&["2.0", "1.0"], &["u3"]),
            group(&["2.0"], &["u4"]),
        ]
        .into_iter()
        .collect();

        groups.weighten();

        for g in &groups {
            for v in g.versions() {
                let expected = if v.value == "1.0" { 3 } else { 2 };
                assert_eq!(v.weight, expected, "weight of {}", v.value);
            }
        }
        assert_eq!(
            preferred_values(&groups),
            vec![Some("1.0"), Some("1.0"), Some("1.0"), Some("2.0")]
        );
    }

    #[test]
    fn weighten_keeps_first_candidate_on_tie() {
        let mut groups: Groups = [group(&["1.0", "2.0"], &["u1"]), group(&["2.0", "1.0"], &["u2"])]
            .into_iter()
            .collect();

        groups.weighten();

        assert_eq!(preferred_values(&groups), vec![Some("1.0"), Some("2.0")]);
    }

    #[test]
    fn weighten_replaces_literal_weights_and_keeps_urls() {
        let mut g = Group::new();
        g.add_version(Version::new("4.0").with_weight(99).with_prerelease(true));
        g.add_url("u1");
        g.add_url("u2");
        let mut groups: Groups = [g].into_iter().collect();

        groups.weighten();

        let weighted = &groups.groups()[0];
        assert_eq!(
            weighted.preferred_version(),
            Some(&Version::new("4.0").with_weight(1).with_prerelease(true))
        );
        assert_eq!(weighted.urls(), &["u1".to_string(), "u2".to_string()]);
    }

    #[test]
    fn weighten_leaves_empty_group_without_preferred() {
        let mut groups: Groups = [group(&[], &["u1"])].into_iter().collect();

        groups.weighten();

        assert_eq!(preferred_values(&groups), vec![None]);
    }

    #[test]
    fn group_versions_merges_urls_of_same_version() {
        let mut groups: Groups = [group(&["1.0"], &["u1"]), group(&["1.0"], &["u2", "u3"])]
            .into_iter()
            .collect();
        groups.weighten();

        groups.group_versions();

        assert_eq!(groups.len(), 1);
        let merged = &groups.groups()[0];
        assert_eq!(merged.versions(), &[Version::new("1.0").with_weight(2)]);
        assert_eq!(merged.urls(), &["u1".to_string(), "u2".to_string()]);
    }

    #[test]
    fn group_versions_preserves_first_encounter_order_and_drops_empty_groups() {
        let mut groups: Groups = [
            group(&["2.0"], &["u1"]),
            group(&[], &["u2"]),
            group(&["1.0"], &["u3"]),
            group(&["2.0"], &["u4"]),
        ]
        .into_iter()
        .collect();

        groups.group_versions();

        assert_eq!(preferred_values(&groups), vec![Some("2.0"), Some("1.0")]);
        assert_eq!(
            groups.groups()[0].urls(),
            &["u1".to_string(), "u4".to_string()]
        );
    }

    #[test]
    fn group_versions_tolerates_groups_without_urls() {
        let mut groups: Groups = [group(&["1.0"], &[]), group(&["1.0"], &["u2"])]
            .into_iter()
            .collect();

        groups.group_versions();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.groups()[0].urls(), &["u2".to_string()]);
    }

    #[test]
    fn clean_by_weights_fails_on_empty_groups() {
        let mut groups = Groups::new();

        assert_eq!(groups.clean_by_weights(), Err(EmptyInputError));
    }

    #[rstest]
    #[case(&[(5, true), (1, false), (0, false)], &[5])] // average 2: light groups without urls go
    #[case(&[(1, true), (1, true)], &[1, 1])]
    #[case(&[(0, true), (9, false)], &[0, 9])] // urls keep a light group alive
    fn clean_by_weights_keeps_heavy_or_linked_groups(
        #[case] input: &[(u32, bool)],
        #[case] expected_weights: &[u32],
    ) {
        let mut groups: Groups = input
            .iter()
            .enumerate()
            .map(|(i, (weight, has_url))| {
                let mut g = Group::new();
                g.add_version(Version::new(format!("{i}.0")).with_weight(*weight));
                if *has_url {
                    g.add_url(format!("u{i}"));
                }
                g
            })
            .collect();

        groups.clean_by_weights().unwrap();

        let weights: Vec<u32> = groups.iter().map(|g| g.preferred_weight()).collect();
        assert_eq!(weights, expected_weights);
    }

    #[test]
    fn resolve_fails_when_nothing_was_extracted() {
        let mut groups: Groups = [Group::from_source("u1", "no versions here")]
            .into_iter()
            .collect();

        assert_eq!(groups.resolve(), Err(EmptyInputError));
    }

    #[test]
    fn latest_skips_unparseable_candidates() {
        let groups: Groups = [
            group(&["1.2"], &["u1"]),
            group(&["1_9"], &["u2"]),
            group(&["1.10"], &["u3"]),
            group(&["1.10.0"], &["u4"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(groups.latest(), Some(&Version::new("1.10")));
    }

    #[test]
    fn latest_is_none_without_semver_candidates() {
        let groups: Groups = [group(&["1_0"], &["u1"]), group(&[], &["u2"])]
            .into_iter()
            .collect();

        assert_eq!(groups.latest(), None);
    }
}
