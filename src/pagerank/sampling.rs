//! Monte Carlo PageRank
//!
//! Walks the random-surfer chain for a fixed number of steps and reports how
//! often each page was visited. The estimate converges to the stationary
//! distribution computed by [`IterativePageRank`](super::iterative::IterativePageRank)
//! as the walk gets longer.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use super::transition::TransitionModel;
use super::{trace_stage, PageRankResult, RankDistribution};
use crate::cancel::CancellationToken;
use crate::errors::{check_damping, RankError, Result};
use crate::graph::builder::PageId;
use crate::graph::csr::Corpus;

/// Sampling PageRank implementation
#[derive(Debug, Clone)]
pub struct SamplingPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Number of pages visited by the walk, including the first
    pub samples: usize,
    cancel: Option<CancellationToken>,
}

impl Default for SamplingPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            cancel: None,
        }
    }
}

impl SamplingPageRank {
    /// Create a new SamplingPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the walk length
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Abort the walk when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run the walk using the thread-local RNG
    pub fn run(&self, corpus: &Corpus) -> Result<PageRankResult> {
        self.run_with_rng(corpus, &mut rand::rng())
    }

    /// Run the walk drawing every random choice from `rng`
    ///
    /// The same corpus, settings and RNG state always produce the same
    /// estimate.
    pub fn run_with_rng<R: Rng>(&self, corpus: &Corpus, rng: &mut R) -> Result<PageRankResult> {
        corpus.require_non_empty()?;
        check_damping(self.damping)?;
        if self.samples < 1 {
            return Err(RankError::InvalidSampleCount(self.samples));
        }

        trace_stage!("sampling");

        let n = corpus.num_pages;
        let model = TransitionModel {
            damping: self.damping,
        };
        let mut visits = vec![0u64; n];
        let mut probabilities = vec![0.0; n];

        let mut page = rng.random_range(0..n) as PageId;
        visits[page as usize] += 1;

        for _ in 1..self.samples {
            if self.is_cancelled() {
                tracing::debug!("sampling walk cancelled");
                return Err(RankError::Cancelled);
            }

            model.fill(corpus, page, &mut probabilities);
            let next = WeightedIndex::new(&probabilities)?;
            page = next.sample(rng) as PageId;
            visits[page as usize] += 1;
        }

        let total = self.samples as f64;
        let scores: Vec<f64> = visits.iter().map(|&v| v as f64 / total).collect();

        tracing::debug!(pages = n, samples = self.samples, "sampling walk finished");

        Ok(PageRankResult::new(scores, self.samples, 0.0, true))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

/// Estimate PageRank by sampling `sample_count` pages from the random walk.
pub fn sample_rank(
    corpus: &Corpus,
    damping_factor: f64,
    sample_count: usize,
) -> Result<RankDistribution> {
    SamplingPageRank::new()
        .with_damping(damping_factor)
        .with_samples(sample_count)
        .run(corpus)
        .map(|result| result.into_distribution(corpus))
}

/// [`sample_rank`] with an injected source of randomness.
pub fn sample_rank_with_rng<R: Rng>(
    corpus: &Corpus,
    damping_factor: f64,
    sample_count: usize,
    rng: &mut R,
) -> Result<RankDistribution> {
    SamplingPageRank::new()
        .with_damping(damping_factor)
        .with_samples(sample_count)
        .run_with_rng(corpus, rng)
        .map(|result| result.into_distribution(corpus))
}
