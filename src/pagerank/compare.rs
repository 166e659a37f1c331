//! Side-by-side run of both estimators over one corpus.
//!
//! Neither estimator mutates the corpus, so with `parallel` set the two run
//! on separate rayon workers without coordination.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::iterative::IterativePageRank;
use super::sampling::SamplingPageRank;
use super::{PageRankResult, RankDistribution};
use crate::cancel::CancellationToken;
use crate::errors::Result;
use crate::graph::csr::Corpus;
use crate::types::RankConfig;

/// Output of [`compare`]
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// Walk length used by the sampler
    pub samples: usize,
    /// Passes performed by the solver
    pub iterations: usize,
    /// Whether the solver met its threshold
    pub converged: bool,
    pub sampled: RankDistribution,
    pub iterated: RankDistribution,
}

impl Comparison {
    /// Largest per-page gap between the two estimates
    pub fn max_abs_deviation(&self) -> f64 {
        self.sampled.max_abs_deviation(&self.iterated)
    }

    /// Mean per-page gap between the two estimates
    pub fn mean_abs_deviation(&self) -> f64 {
        self.sampled.mean_abs_deviation(&self.iterated)
    }
}

/// Run the sampler and the solver against `corpus` with one configuration.
pub fn compare(corpus: &Corpus, config: &RankConfig) -> Result<Comparison> {
    compare_with_cancellation(corpus, config, CancellationToken::new())
}

/// [`compare`], aborting both estimators when `token` is cancelled.
pub fn compare_with_cancellation(
    corpus: &Corpus,
    config: &RankConfig,
    token: CancellationToken,
) -> Result<Comparison> {
    config.validate()?;
    corpus.require_non_empty()?;

    let sampler = SamplingPageRank::new()
        .with_damping(config.damping)
        .with_samples(config.samples)
        .with_cancellation(token.clone());
    let solver = IterativePageRank::new()
        .with_damping(config.damping)
        .with_max_iterations(config.max_iterations)
        .with_threshold(config.threshold)
        .with_cancellation(token);

    let run_sampler = || -> Result<PageRankResult> {
        match config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                sampler.run_with_rng(corpus, &mut rng)
            }
            None => sampler.run(corpus),
        }
    };
    let run_solver = || solver.run(corpus);

    let (sampled, iterated) = if config.parallel {
        rayon::join(run_sampler, run_solver)
    } else {
        (run_sampler(), run_solver())
    };
    let (sampled, iterated) = (sampled?, iterated?);

    let comparison = Comparison {
        samples: config.samples,
        iterations: iterated.iterations,
        converged: iterated.converged,
        sampled: sampled.into_distribution(corpus),
        iterated: iterated.into_distribution(corpus),
    };
    tracing::info!(
        pages = corpus.num_pages,
        links = corpus.num_links(),
        max_deviation = comparison.max_abs_deviation(),
        "ranked corpus"
    );

    Ok(comparison)
}
