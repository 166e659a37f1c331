//! Random-surfer transition model
//!
//! From any page the surfer follows one of its links with probability
//! `damping` and otherwise jumps to a uniformly random page. A dangling page
//! has no link to follow, so the surfer always jumps uniformly from it; this
//! keeps every row of the transition matrix stochastic.

use super::RankDistribution;
use crate::errors::{check_damping, Result};
use crate::graph::builder::PageId;
use crate::graph::csr::Corpus;

/// One-step transition probabilities of the damped random walk
#[derive(Debug, Clone, Copy)]
pub struct TransitionModel {
    /// Probability of following a link (typically 0.85)
    pub damping: f64,
}

impl Default for TransitionModel {
    fn default() -> Self {
        Self { damping: 0.85 }
    }
}

impl TransitionModel {
    /// Create a model with the given damping factor
    pub fn new(damping: f64) -> Result<Self> {
        check_damping(damping)?;
        Ok(Self { damping })
    }

    /// Write the distribution of the next page given `source` into `out`
    ///
    /// `out` must have one slot per page. Callers are responsible for
    /// rejecting empty corpora and out-of-range sources.
    pub(crate) fn fill(&self, corpus: &Corpus, source: PageId, out: &mut [f64]) {
        let n = corpus.num_pages as f64;
        let links = corpus.links(source);

        if links.is_empty() {
            out.fill(1.0 / n);
            return;
        }

        out.fill((1.0 - self.damping) / n);
        let follow = self.damping / links.len() as f64;
        for &target in links {
            out[target as usize] += follow;
        }
    }

    /// Distribution of the next page given the named source page
    pub fn distribution(&self, corpus: &Corpus, source: &str) -> Result<RankDistribution> {
        corpus.require_non_empty()?;
        let source = corpus.require_page(source)?;

        let mut probabilities = vec![0.0; corpus.num_pages];
        self.fill(corpus, source, &mut probabilities);
        Ok(RankDistribution::new(corpus, probabilities))
    }
}

/// Probability distribution over which page to visit after `source_page`.
pub fn transition(
    corpus: &Corpus,
    source_page: &str,
    damping_factor: f64,
) -> Result<RankDistribution> {
    TransitionModel::new(damping_factor)?.distribution(corpus, source_page)
}
