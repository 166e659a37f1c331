//! Shared configuration types.
//!
//! A [`RankConfig`] carries every knob the two estimators take. It is a plain
//! serde document so it can be loaded from JSON:
//!
//! ```json
//! {
//!   "damping": 0.85,
//!   "samples": 10000,
//!   "max_iterations": 1000,
//!   "threshold": 1e-10,
//!   "seed": 42,
//!   "parallel": false
//! }
//! ```
//!
//! Omitted fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{check_damping, RankError, Result};

/// Default probability of following a link rather than teleporting.
pub const DEFAULT_DAMPING: f64 = 0.85;
/// Default length of the sampling random walk.
pub const DEFAULT_SAMPLES: usize = 10_000;
/// Default pass limit for the iterative solver.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
/// Default maximum per-page change at which the solver stops.
pub const DEFAULT_THRESHOLD: f64 = 1e-10;

/// Configuration for a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankConfig {
    /// Damping factor in `[0, 1]`
    pub damping: f64,
    /// Number of pages visited by the sampling walk
    pub samples: usize,
    /// Upper bound on power-iteration passes
    pub max_iterations: usize,
    /// Stop iterating once no page moves by more than this
    pub threshold: f64,
    /// Seed for the sampling walk; `None` draws from the thread-local RNG
    pub seed: Option<u64>,
    /// Run the two estimators concurrently
    pub parallel: bool,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
            seed: None,
            parallel: false,
        }
    }
}

/// Per-run overrides layered on top of a [`RankConfig`], e.g. command-line
/// flags over a config file. `None` keeps the base value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub damping: Option<f64>,
    pub samples: Option<usize>,
    pub max_iterations: Option<usize>,
    pub threshold: Option<f64>,
    pub seed: Option<u64>,
    /// Can only switch concurrency on; a base `parallel: true` stays on
    pub parallel: bool,
}

impl RankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Apply `overrides` and validate the merged result.
    pub fn merge(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(damping) = overrides.damping {
            self.damping = damping;
        }
        if let Some(samples) = overrides.samples {
            self.samples = samples;
        }
        if let Some(max_iterations) = overrides.max_iterations {
            self.max_iterations = max_iterations;
        }
        if let Some(threshold) = overrides.threshold {
            self.threshold = threshold;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self.parallel |= overrides.parallel;

        self.validate()?;
        Ok(self)
    }

    /// Check every field, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if self.samples < 1 {
            return Err(RankError::InvalidSampleCount(self.samples));
        }
        if self.max_iterations < 1 {
            return Err(RankError::InvalidMaxIterations(self.max_iterations));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RankError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    /// Parse a JSON config document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
