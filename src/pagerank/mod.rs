//! PageRank algorithms
//!
//! This module provides the random-surfer transition model and the two
//! estimators built on it: a sampling random walk and power iteration.

pub mod compare;
pub mod iterative;
pub mod sampling;
pub mod transition;

use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::graph::builder::PageId;
use crate::graph::csr::Corpus;

/// Enter a tracing span for a ranking stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("rank_stage", stage = $name).entered();
    };
}
pub(crate) use trace_stage;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each page (indexed by page ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta (largest per-page change)
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get top N pages by score
    pub fn top_n(&self, n: usize) -> Vec<(PageId, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as PageId, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
        indexed.truncate(n);
        indexed
    }

    /// Get the score for a specific page
    pub fn score(&self, page: PageId) -> f64 {
        self.scores.get(page as usize).copied().unwrap_or(0.0)
    }

    /// Attach page names, producing a rank distribution
    pub fn into_distribution(self, corpus: &Corpus) -> RankDistribution {
        RankDistribution::new(corpus, self.scores)
    }
}

/// Probability per page, keyed by page name
///
/// Used both for rank distributions and for one-step transition
/// distributions. Values are in `[0, 1]` and sum to 1 over every page of the
/// corpus it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct RankDistribution {
    names: Vec<String>,
    index: FxHashMap<String, PageId>,
    values: Vec<f64>,
}

impl RankDistribution {
    /// Pair each page of `corpus` with the value at its ID.
    pub fn new(corpus: &Corpus, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), corpus.num_pages);
        Self {
            names: corpus.names.clone(),
            index: corpus.index.clone(),
            values,
        }
    }

    /// Probability of `page`, or `None` if the page is unknown
    pub fn get(&self, page: &str) -> Option<f64> {
        self.index.get(page).map(|&id| self.values[id as usize])
    }

    /// Values indexed by page ID
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all values (1.0 up to rounding)
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Iterate in page-ID order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Entries sorted by page name
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Largest absolute per-page difference to another distribution over
    /// the same pages
    pub fn max_abs_deviation(&self, other: &RankDistribution) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Mean absolute per-page difference to another distribution over the
    /// same pages
    pub fn mean_abs_deviation(&self, other: &RankDistribution) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        total / self.values.len() as f64
    }
}

impl Serialize for RankDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted = self.sorted();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (page, value) in sorted {
            map.serialize_entry(page, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::graph::csr::Corpus;

    /// A <-> B
    pub fn two_cycle() -> Corpus {
        Corpus::from_links(vec![("A", vec!["B"]), ("B", vec!["A"])])
    }

    /// A -> {B, C}, B -> C, C dangling
    pub fn with_dangling() -> Corpus {
        Corpus::from_links(vec![
            ("A", vec!["B", "C"]),
            ("B", vec!["C"]),
            ("C", vec![]),
        ])
    }

    /// Four pages where 2.html collects most inbound links
    pub fn corpus0() -> Corpus {
        Corpus::from_links(vec![
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec!["2.html"]),
        ])
    }

    /// Hub linking to three spokes, plus an isolated page
    pub fn star_with_isolated() -> Corpus {
        Corpus::from_links(vec![
            ("hub", vec!["s1", "s2", "s3"]),
            ("s1", vec!["hub"]),
            ("s2", vec!["hub"]),
            ("s3", vec!["hub"]),
            ("island", vec![]),
        ])
    }
}
