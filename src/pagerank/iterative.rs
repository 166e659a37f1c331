//! Iterative PageRank
//!
//! Power iteration on the random-surfer chain with simultaneous updates.
//! Rank held by dangling pages is spread uniformly over the whole corpus on
//! every pass, matching the transition model's treatment of dangling
//! sources, so each pass preserves total mass.

use super::{trace_stage, PageRankResult, RankDistribution};
use crate::cancel::CancellationToken;
use crate::errors::{check_damping, RankError, Result};
use crate::graph::csr::Corpus;

/// Power-iteration PageRank implementation
#[derive(Debug, Clone)]
pub struct IterativePageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of passes
    pub max_iterations: usize,
    /// Stop once no page changes by more than this between passes
    pub threshold: f64,
    cancel: Option<CancellationToken>,
}

impl Default for IterativePageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 1000,
            threshold: 1e-10,
            cancel: None,
        }
    }
}

impl IterativePageRank {
    /// Create a new IterativePageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Abort between passes when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run PageRank on a corpus
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    /// In that case the scores are the mean of the last two passes, which
    /// settles the two-step oscillation of a periodic chain.
    pub fn run(&self, corpus: &Corpus) -> Result<PageRankResult> {
        corpus.require_non_empty()?;
        check_damping(self.damping)?;
        if self.max_iterations < 1 {
            return Err(RankError::InvalidMaxIterations(self.max_iterations));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RankError::InvalidThreshold(self.threshold));
        }

        trace_stage!("iteration");

        let n = corpus.num_pages;
        let initial_score = 1.0 / n as f64;
        let mut scores = vec![initial_score; n];
        let mut new_scores = vec![0.0; n];

        let dangling_pages = corpus.dangling_pages();
        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            if self.is_cancelled() {
                tracing::debug!(iterations, "iteration cancelled");
                return Err(RankError::Cancelled);
            }
            iterations += 1;

            let dangling_mass: f64 = dangling_pages.iter().map(|&d| scores[d as usize]).sum();
            let dangling_contribution = self.damping * dangling_mass / n as f64;

            new_scores.fill(teleport + dangling_contribution);

            // Every page reads only the previous pass
            for (page, &page_score) in scores.iter().enumerate() {
                let links = corpus.links(page as u32);
                if !links.is_empty() {
                    let contribution = self.damping * page_score / links.len() as f64;
                    for &target in links {
                        new_scores[target as usize] += contribution;
                    }
                }
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .fold(0.0, f64::max);

            std::mem::swap(&mut scores, &mut new_scores);
        }

        let converged = delta <= self.threshold;

        // A periodic chain (damping 1) oscillates between iterates forever;
        // their mean is the stationary distribution for period two
        if !converged {
            for (score, previous) in scores.iter_mut().zip(new_scores.iter()) {
                *score = (*score + previous) / 2.0;
            }
        }

        // Normalize scores (they should already sum to ~1, but ensure numerical stability)
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        if converged {
            tracing::debug!(iterations, delta, "iteration converged");
        } else {
            tracing::warn!(
                iterations,
                delta,
                threshold = self.threshold,
                "iteration stopped before converging"
            );
        }

        Ok(PageRankResult::new(scores, iterations, delta, converged))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

/// Compute PageRank by power iteration until the ranks stop changing.
///
/// Convergence status is not reported here; use [`IterativePageRank::run`]
/// to inspect `converged`. Chains with a period longer than two at damping 1
/// never converge and the returned ranks are only approximate.
pub fn iterate_rank(corpus: &Corpus, damping_factor: f64) -> Result<RankDistribution> {
    IterativePageRank::new()
        .with_damping(damping_factor)
        .run(corpus)
        .map(|result| result.into_distribution(corpus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagerank::fixtures;

    #[test]
    fn test_two_cycle_equal_scores() {
        let corpus = fixtures::two_cycle();
        let result = IterativePageRank::new().run(&corpus).unwrap();

        assert!(result.converged);
        for score in &result.scores {
            assert!((score - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_known_corpus_values() {
        let corpus = fixtures::corpus0();
        let dist = iterate_rank(&corpus, 0.85).unwrap();

        assert!((dist.get("1.html").unwrap() - 0.2199).abs() < 1e-4);
        assert!((dist.get("2.html").unwrap() - 0.4292).abs() < 1e-4);
        assert!((dist.get("3.html").unwrap() - 0.2199).abs() < 1e-4);
        assert!((dist.get("4.html").unwrap() - 0.1310).abs() < 1e-4);
    }

    #[test]
    fn test_dangling_mass_redistributed() {
        let corpus = fixtures::with_dangling();
        let dist = iterate_rank(&corpus, 0.85).unwrap();

        assert!((dist.total() - 1.0).abs() < 1e-6);
        assert!((dist.get("A").unwrap() - 0.197580).abs() < 1e-5);
        assert!((dist.get("B").unwrap() - 0.281551).abs() < 1e-5);
        assert!((dist.get("C").unwrap() - 0.520869).abs() < 1e-5);
    }

    #[test]
    fn test_isolated_page_keeps_teleport_mass() {
        let corpus = fixtures::star_with_isolated();
        let result = IterativePageRank::new().run(&corpus).unwrap();
        let island = corpus.page_id("island").unwrap();
        let hub = corpus.page_id("hub").unwrap();

        assert!(result.score(island) > 0.0);
        assert_eq!(result.top_n(1)[0].0, hub);
    }

    #[test]
    fn test_scores_sum_to_one() {
        for corpus in [
            fixtures::two_cycle(),
            fixtures::with_dangling(),
            fixtures::corpus0(),
            fixtures::star_with_isolated(),
        ] {
            for damping in [0.0, 0.3, 0.85, 1.0] {
                let dist = iterate_rank(&corpus, damping).unwrap();
                assert!((dist.total() - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let corpus = fixtures::star_with_isolated();
        let a = iterate_rank(&corpus, 0.85).unwrap();
        let b = iterate_rank(&corpus, 0.85).unwrap();

        let a_bits: Vec<u64> = a.values().iter().map(|v| v.to_bits()).collect();
        let b_bits: Vec<u64> = b.values().iter().map(|v| v.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn test_max_iterations_returns_partial() {
        let corpus = fixtures::corpus0();
        let result = IterativePageRank::new()
            .with_max_iterations(1)
            .with_threshold(0.0) // Never converge
            .run(&corpus)
            .unwrap();

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 4);
        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_damping_factor() {
        let corpus = fixtures::star_with_isolated();
        let hub = corpus.page_id("hub").unwrap();
        let spoke = corpus.page_id("s1").unwrap();

        // Lower damping = more teleportation = more uniform scores
        let low = IterativePageRank::new().with_damping(0.5).run(&corpus).unwrap();
        let high = IterativePageRank::new().with_damping(0.95).run(&corpus).unwrap();

        let advantage_low = low.score(hub) - low.score(spoke);
        let advantage_high = high.score(hub) - high.score(spoke);
        assert!(advantage_high > advantage_low);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::default();

        let err = iterate_rank(&corpus, 0.85).unwrap_err();
        assert!(matches!(err, RankError::EmptyCorpus));
    }

    #[test]
    fn test_invalid_parameters() {
        let corpus = fixtures::corpus0();

        assert!(matches!(
            iterate_rank(&corpus, 2.0),
            Err(RankError::InvalidDamping(_))
        ));
        assert!(matches!(
            IterativePageRank::new().with_threshold(f64::NAN).run(&corpus),
            Err(RankError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_zero_max_iterations_rejected() {
        let corpus = Corpus::from_links(vec![("A", vec!["B"]), ("B", vec![])]);

        let err = IterativePageRank::new()
            .with_max_iterations(0)
            .run(&corpus)
            .unwrap_err();

        assert!(matches!(err, RankError::InvalidMaxIterations(0)));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_periodic_chain_averages_oscillation() {
        // A <-> B, C -> A: without teleportation the mass flips between A and B
        let corpus = Corpus::from_links(vec![("A", vec!["B"]), ("B", vec!["A"]), ("C", vec!["A"])]);
        let result = IterativePageRank::new().with_damping(1.0).run(&corpus).unwrap();
        let a = corpus.page_id("A").unwrap();
        let b = corpus.page_id("B").unwrap();
        let c = corpus.page_id("C").unwrap();

        assert!(!result.converged);
        assert!((result.score(a) - 0.5).abs() < 1e-9);
        assert!((result.score(b) - 0.5).abs() < 1e-9);
        assert!(result.score(c).abs() < 1e-9);
    }

    #[test]
    fn test_cancelled_before_first_pass() {
        let corpus = fixtures::corpus0();
        let token = CancellationToken::new();
        token.cancel();

        let result = IterativePageRank::new().with_cancellation(token).run(&corpus);

        assert!(matches!(result, Err(RankError::Cancelled)));
    }
}
