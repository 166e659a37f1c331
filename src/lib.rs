//! # rapid-linkrank
//!
//! Random-surfer PageRank for a corpus of linked pages.
//!
//! Two independent estimators share one transition model:
//!
//! - [`sample_rank`] walks the damped random-surfer chain and counts visits.
//! - [`iterate_rank`] runs power iteration to the chain's stationary
//!   distribution.
//!
//! Both spread the rank of dangling pages (pages without outbound links)
//! uniformly over the corpus, so every distribution they return sums to 1.
//!
//! ```rust,ignore
//! use rapid_linkrank::{iterate_rank, sample_rank, Corpus};
//!
//! let corpus = Corpus::from_links(vec![
//!     ("1.html", vec!["2.html"]),
//!     ("2.html", vec!["1.html", "3.html"]),
//!     ("3.html", vec![]),
//! ]);
//! let exact = iterate_rank(&corpus, 0.85)?;
//! let approx = sample_rank(&corpus, 0.85, 10_000)?;
//! ```

pub mod cancel;
pub mod crawl;
pub mod errors;
pub mod graph;
pub mod pagerank;
pub mod report;
pub mod types;

pub use cancel::CancellationToken;
pub use crawl::crawl;
pub use errors::{RankError, Result};
pub use graph::builder::{CorpusBuilder, PageId};
pub use graph::csr::Corpus;
pub use pagerank::compare::{compare, compare_with_cancellation, Comparison};
pub use pagerank::iterative::{iterate_rank, IterativePageRank};
pub use pagerank::sampling::{sample_rank, sample_rank_with_rng, SamplingPageRank};
pub use pagerank::transition::{transition, TransitionModel};
pub use pagerank::{PageRankResult, RankDistribution};
pub use types::{ConfigOverrides, RankConfig};
