//! Labeled groups of samples and their display order.

use super::stats::{aggregate, Statistic};
use indexmap::IndexMap;
use log::debug;

/// Samples keyed by group label, in first-seen order
///
/// **Public** - built fresh from the dataset on every selection change
#[derive(Debug, Clone, Default)]
pub struct GroupedSamples {
    groups: IndexMap<String, Vec<Option<f64>>>,
}

impl GroupedSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group, replacing any previous group with the same label
    ///
    /// A replaced group keeps its original source position.
    pub fn insert(&mut self, label: impl Into<String>, samples: Vec<Option<f64>>) {
        self.groups.insert(label.into(), samples);
    }

    /// Append one sample to a group, creating the group if needed
    pub fn push(&mut self, label: &str, sample: Option<f64>) {
        match self.groups.get_mut(label) {
            Some(samples) => samples.push(sample),
            None => {
                self.groups.insert(label.to_string(), vec![sample]);
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&[Option<f64>]> {
        self.groups.get(label).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group labels in source order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Groups arranged by a priority list
    ///
    /// **Public** - see [`display_order`] for the ordering rule
    pub fn ordered<S: AsRef<str>>(&self, order: &[S]) -> Vec<(&str, &[Option<f64>])> {
        display_order(self.labels(), order)
            .into_iter()
            .filter_map(|label| {
                self.groups
                    .get_key_value(label)
                    .map(|(key, samples)| (key.as_str(), samples.as_slice()))
            })
            .collect()
    }
}

impl<L: Into<String>> FromIterator<(L, Vec<Option<f64>>)> for GroupedSamples {
    fn from_iter<I: IntoIterator<Item = (L, Vec<Option<f64>>)>>(iter: I) -> Self {
        let mut grouped = Self::new();
        for (label, samples) in iter {
            grouped.insert(label, samples);
        }
        grouped
    }
}

/// Statistic of one group, tagged with its label
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStatistic {
    pub label: String,
    pub statistic: Statistic,
}

/// Arrange present labels by a priority list
///
/// **Public** - shared by the aggregator and every chart builder
///
/// Labels named in `order` come first, in `order`'s sequence. Labels
/// present but missing from `order` follow in the order they were seen.
/// Entries of `order` that are not present are dropped.
pub fn display_order<'a, S: AsRef<str>>(
    present: impl IntoIterator<Item = &'a str>,
    order: &[S],
) -> Vec<&'a str> {
    let mut present: Vec<&'a str> = present.into_iter().collect();
    // keep the first occurrence of duplicated labels
    let mut seen = std::collections::HashSet::new();
    present.retain(|label| seen.insert(*label));

    let mut arranged = Vec::with_capacity(present.len());
    for wanted in order {
        let wanted = wanted.as_ref();
        if let Some(label) = present.iter().find(|label| **label == wanted) {
            if !arranged.contains(label) {
                arranged.push(*label);
            }
        }
    }

    for label in present {
        if !arranged.contains(&label) {
            arranged.push(label);
        }
    }

    arranged
}

/// Compute statistics for every group in display order
///
/// **Public** - groups without valid samples are omitted
pub fn aggregate_groups<S: AsRef<str>>(groups: &GroupedSamples, order: &[S]) -> Vec<GroupStatistic> {
    groups
        .ordered(order)
        .into_iter()
        .filter_map(|(label, samples)| match aggregate(samples) {
            Some(statistic) => Some(GroupStatistic {
                label: label.to_string(),
                statistic,
            }),
            None => {
                debug!("Group {} has no valid samples, omitting statistic", label);
                None
            }
        })
        .collect()
}
