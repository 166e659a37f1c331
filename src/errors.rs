//! Error types for link ranking

use thiserror::Error;

/// Result type alias using RankError
pub type Result<T> = std::result::Result<T, RankError>;

/// Main error type for corpus construction and ranking
#[derive(Debug, Error)]
pub enum RankError {
    #[error("Corpus is empty")]
    EmptyCorpus,

    #[error("Page not in corpus: {0}")]
    UnknownPage(String),

    #[error("Page {page} links to {target}, which is not in the corpus")]
    DanglingReference { page: String, target: String },

    #[error("Malformed corpus: {0}")]
    MalformedCorpus(String),

    #[error("Sample count must be at least 1, got {0}")]
    InvalidSampleCount(usize),

    #[error("Iteration limit must be at least 1, got {0}")]
    InvalidMaxIterations(usize),

    #[error("Damping factor must be within [0, 1], got {0}")]
    InvalidDamping(f64),

    #[error("Convergence threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),

    #[error("Computation cancelled")]
    Cancelled,

    #[error("Invalid transition weights: {0}")]
    Weights(#[from] rand::distr::weighted::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl RankError {
    /// Whether this error describes a bad argument or corpus, as opposed to
    /// an environment failure or a cancellation.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            RankError::EmptyCorpus
                | RankError::UnknownPage(_)
                | RankError::DanglingReference { .. }
                | RankError::MalformedCorpus(_)
                | RankError::InvalidSampleCount(_)
                | RankError::InvalidMaxIterations(_)
                | RankError::InvalidDamping(_)
                | RankError::InvalidThreshold(_)
        )
    }
}

/// Reject damping factors outside `[0, 1]` (NaN included).
pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(RankError::InvalidDamping(damping))
    }
}
