use crate::model::ContributorStat;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Order contributors by commit count (descending), then by name compared
/// case-insensitively. Remaining ties fall back to the exact name and then the
/// identity key, which is unique, so the result never depends on map order.
pub fn sort_contributors(map: HashMap<String, ContributorStat>) -> Vec<ContributorStat> {
    let mut stats: Vec<_> = map.into_values().collect();
    stats.sort_by(compare);
    stats
}

pub fn compare(a: &ContributorStat, b: &ContributorStat) -> Ordering {
    b.commits
        .cmp(&a.commits)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.identity_key.cmp(&b.identity_key))
}
