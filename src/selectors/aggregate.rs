//! Cross-page plurality vote over per-page winning selectors

use crate::selectors::types::{CandidateSelector, Field};
use std::collections::BTreeMap;

/// Frequency counter that remembers first-seen order
///
/// Ties on count go to the value recorded first.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    counts: Vec<(String, usize)>,
}

impl Tally {
    pub fn record(&mut self, value: &str) {
        match self.counts.iter_mut().find(|(seen, _)| seen == value) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((value.to_string(), 1)),
        }
    }

    /// The most frequent value and its count
    pub fn winner(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (value, count) in &self.counts {
            if best.map_or(true, |(_, top)| *count > top) {
                best = Some((value.as_str(), *count));
            }
        }
        best
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Picks the final selector for every field
///
/// Candidates are counted per field in the order given; each field gets its
/// plurality winner, or the fixed fallback when no page produced one.
/// The result is deterministic for identical input.
pub fn aggregate(candidates: &[CandidateSelector]) -> BTreeMap<Field, String> {
    let mut tallies: BTreeMap<Field, Tally> = BTreeMap::new();
    for candidate in candidates {
        tallies
            .entry(candidate.field)
            .or_default()
            .record(&candidate.selector);
    }

    Field::ALL
        .iter()
        .map(|field| {
            let selector = tallies
                .get(field)
                .and_then(Tally::winner)
                .map(|(selector, _)| selector.to_string())
                .unwrap_or_else(|| field.fallback_selector().to_string());
            (*field, selector)
        })
        .collect()
}
