//! Random-surfer transition model.
//!
//! From a page with links, the surfer follows one of them with probability `d` (uniformly
//! among the links) and otherwise jumps to any page uniformly:
//! \[
//!   P(u \to v) = \frac{1-d}{N} + [v \in L(u)] \frac{d}{|L(u)|}
//! \]
//! From a dangling page (\(|L(u)| = 0\)) the surfer jumps uniformly, \(P(u \to v) = 1/N\),
//! regardless of `d`.

use crate::corpus::Corpus;
use crate::graph::LinkGraph;
use crate::rank::Distribution;
use crate::{Error, Result};

/// Fill `probs` with the next-page distribution from `node`, indexed by node.
///
/// `probs` is cleared and resized to `graph.node_count()`; reuse it across calls to avoid
/// allocating on every step of a walk.
pub fn transition_probs<G: LinkGraph>(graph: &G, node: usize, damping: f64, probs: &mut Vec<f64>) {
    let n = graph.node_count();
    probs.clear();
    if n == 0 {
        return;
    }
    let n_f64 = n as f64;
    let links = graph.links_ref(node);
    if links.is_empty() {
        probs.resize(n, 1.0 / n_f64);
        return;
    }
    probs.resize(n, (1.0 - damping) / n_f64);
    let follow = damping / links.len() as f64;
    for &v in links {
        probs[v] += follow;
    }
}

/// Next-page distribution from `page` over every page of `corpus`.
pub fn transition_model(corpus: &Corpus, page: &str, damping: f64) -> Result<Distribution> {
    let node = corpus
        .index_of(page)
        .ok_or_else(|| Error::UnknownPage(page.to_string()))?;
    let mut probs = Vec::with_capacity(corpus.len());
    transition_probs(corpus, node, damping, &mut probs);
    Ok(Distribution::from_scores(corpus, &probs))
}
