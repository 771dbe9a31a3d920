//! Random-surfer sampling estimator.
//!
//! One long walk of `samples` steps driven by [`transition_probs`]; a page's rank is the
//! fraction of steps that landed on it. The result is stochastic unless a seed (or an RNG)
//! is supplied; larger `samples` reduce variance.

use crate::corpus::Corpus;
use crate::graph::LinkGraph;
use crate::rank::RankTable;
use crate::transition::transition_probs;
use crate::{Error, Result, PROBABILITY_TOLERANCE};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    pub damping: f64,
    /// Walk length (number of pages drawn).
    pub samples: usize,
    /// Seed for a deterministic walk. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            seed: None,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.damping.is_finite() {
            return Err(Error::InvalidParameter(
                "damping must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(Error::InvalidParameter(
                "damping must be in [0,1]".to_string(),
            ));
        }
        if self.samples == 0 {
            return Err(Error::InvalidParameter("samples must be > 0".to_string()));
        }
        Ok(())
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

/// Checked sampling estimator.
///
/// Validates `config` and rejects an empty corpus before walking.
pub fn sample_pagerank_checked(corpus: &Corpus, config: SamplingConfig) -> Result<RankTable> {
    config.validate()?;
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    sample_pagerank(corpus, config)
}

pub fn sample_pagerank(corpus: &Corpus, config: SamplingConfig) -> Result<RankTable> {
    let mut rng = config.rng();
    sample_pagerank_with_rng(corpus, config.damping, config.samples, &mut rng)
}

/// Sampling estimator with an injected RNG.
///
/// Fails with [`Error::ProbabilitySum`] if the normalized visit frequencies do not sum to 1
/// within [`PROBABILITY_TOLERANCE`]; that indicates a bug, not bad input (except `samples == 0`,
/// which the checked entry point rejects up front).
pub fn sample_pagerank_with_rng<R: Rng>(
    corpus: &Corpus,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<RankTable> {
    if corpus.is_empty() {
        return Ok(RankTable::default());
    }
    let visits = sample_visits(corpus, damping, samples, rng);
    let total = samples as f64;
    let ranks: Vec<f64> = visits.iter().map(|&c| c as f64 / total).collect();

    let sum: f64 = ranks.iter().sum();
    if !((sum - 1.0).abs() <= PROBABILITY_TOLERANCE) {
        return Err(Error::ProbabilitySum { sum });
    }
    Ok(RankTable::from_scores(corpus, &ranks))
}

/// Per-node visit counts of one walk of `samples` steps.
///
/// The start node is drawn uniformly and is not itself counted; each of the `samples` drawn
/// pages is. Returns an empty vector for an empty graph.
pub fn sample_visits<G: LinkGraph, R: Rng>(
    graph: &G,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Vec<u64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    let mut visits = vec![0u64; n];
    let mut probs: Vec<f64> = Vec::with_capacity(n);
    let mut curr = rng.random_range(0..n);
    for _ in 0..samples {
        transition_probs(graph, curr, damping, &mut probs);
        curr = sample_cdf(rng, &probs);
        visits[curr] += 1;
    }
    debug!(pages = n, samples, damping, "sampled random-surfer walk");
    visits
}

/// Draw an index proportionally to `weights`. Zero-weight entries are never drawn.
fn sample_cdf<R: Rng>(rng: &mut R, weights: &[f64]) -> usize {
    debug_assert!(!weights.is_empty());
    if weights.len() == 1 {
        return 0;
    }

    let sum = weights.iter().copied().sum::<f64>();
    if !(sum > 0.0) {
        return rng.random_range(0..weights.len());
    }

    let mut r = rng.random::<f64>() * sum;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        if r < w {
            return i;
        }
        r -= w;
        last_positive = i;
    }
    // Rounding left `r` past the final bucket.
    last_positive
}
