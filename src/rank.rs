//! Page-keyed probability distributions and rank tables.

use crate::corpus::Corpus;
use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt;

/// A mapping from page to a non-negative probability.
///
/// Iteration (and [`fmt::Display`]) is ordered by page identifier.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Distribution {
    probs: BTreeMap<String, f64>,
}

/// An estimator's output: a [`Distribution`] over every page of the corpus.
pub type RankTable = Distribution;

impl Distribution {
    /// Pair index-ordered `scores` with the pages of `corpus`.
    ///
    /// `scores` must have one entry per page, in corpus order.
    pub fn from_scores(corpus: &Corpus, scores: &[f64]) -> Self {
        debug_assert_eq!(corpus.len(), scores.len());
        Self {
            probs: corpus
                .pages()
                .iter()
                .cloned()
                .zip(scores.iter().copied())
                .collect(),
        }
    }

    pub fn get(&self, page: &str) -> Option<f64> {
        self.probs.get(page).copied()
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.probs.iter().map(|(p, &x)| (p.as_str(), x))
    }

    pub fn total(&self) -> f64 {
        self.probs.values().sum()
    }

    /// Whether the values sum to 1.0 within `tolerance`.
    pub fn sums_to_one(&self, tolerance: f64) -> bool {
        (self.total() - 1.0).abs() <= tolerance
    }

    /// The `k` highest-ranked pages, best first. Ties break by page identifier.
    ///
    /// Non-finite and non-positive values are skipped.
    pub fn top_k(&self, k: usize) -> Vec<(&str, f64)> {
        if k == 0 || self.probs.is_empty() {
            return Vec::new();
        }
        let mut heap = BinaryHeap::with_capacity(k + 1);
        for (page, &p) in &self.probs {
            if !p.is_finite() || p <= 0.0 {
                continue;
            }
            let Ok(s) = NotNan::new(p) else { continue };
            // Reverse on the page so that, among equal scores, the later page is evicted first.
            heap.push(Reverse((s, Reverse(page.as_str()))));
            if heap.len() > k {
                heap.pop();
            }
        }
        let mut results: Vec<(&str, f64)> = heap
            .into_iter()
            .map(|Reverse((s, Reverse(page)))| (page, s.into_inner()))
            .collect();
        results.sort_unstable_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        results
    }
}

impl FromIterator<(String, f64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            probs: iter.into_iter().collect(),
        }
    }
}

/// One line per page, `  <page>: <rank>` with four decimals, ordered by page.
impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (page, p) in &self.probs {
            writeln!(f, "  {page}: {p:.4}")?;
        }
        Ok(())
    }
}
