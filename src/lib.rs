//! `surfrank`: PageRank over a small, closed corpus of linked documents.
//!
//! Two independent estimators share one transition model:
//! - [`sample_pagerank`]: a single long random-surfer walk; rank is visit frequency.
//! - [`iterate_pagerank`]: synchronous fixed-point iteration of the PageRank recurrence.
//!
//! Public invariants (must not drift):
//! - **Closed corpus**: every link target in a [`Corpus`] is itself a page; self-links are dropped.
//! - **Dangling pages**: a page with no links jumps uniformly to *every* page (itself included),
//!   ignoring damping. Both estimators use this convention.
//! - **Node order**: index-level outputs are ordered by page identifier (the [`Corpus`] order).
//! - **Determinism**: the iterative estimator is deterministic; the sampling estimator is
//!   deterministic only given a seed (or an injected RNG).
//!
//! Swappable (allowed to change without breaking the contract):
//! - how the next page is drawn, so long as it is proportional to the transition weights
//! - internal data structures (so long as invariants hold)
//!
//! Loading a directory of HTML documents lives in the [`crawl`](mod@crawl) module; it is glue,
//! not part of the core.

pub mod config;
pub mod corpus;
pub mod crawl;
pub mod graph;
pub mod iterate;
pub mod rank;
pub mod sampling;
pub mod transition;

pub use config::RunConfig;
pub use corpus::Corpus;
pub use crawl::{crawl, extract_links};
pub use graph::{AdjacencyList, LinkGraph};
pub use iterate::{
    iterate_pagerank, iterate_pagerank_checked, iterate_pagerank_run, IterationConfig,
    IterationRun,
};
pub use rank::{Distribution, RankTable};
pub use sampling::{
    sample_pagerank, sample_pagerank_checked, sample_pagerank_with_rng, sample_visits,
    SamplingConfig,
};
pub use transition::{transition_model, transition_probs};

/// Largest accepted deviation of a rank table's total from 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 0.001;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("corpus has no pages")]
    EmptyCorpus,
    #[error("page not in corpus: {0}")]
    UnknownPage(String),
    #[error("probabilities do not sum to 1 (sum={sum})")]
    ProbabilitySum { sum: f64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
