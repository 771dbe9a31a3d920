//! Iterative PageRank estimator.
//!
//! Synchronous fixed-point iteration of
//! \[
//!   PR'(p) = \frac{1-d}{N} + d \sum_{i \to p} \frac{PR(i)}{|L(i)|} + d \sum_{j:\,|L(j)|=0} \frac{PR(j)}{N}
//! \]
//! starting from the uniform table, until no page moves by `tolerance` or more.
//! Dangling pages spread their rank over every page, themselves included.

use crate::corpus::Corpus;
use crate::graph::LinkGraph;
use crate::rank::RankTable;
use crate::{Error, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationRun {
    pub scores: Vec<f64>,
    pub iterations: usize,
    /// Largest absolute per-page change in the final update step.
    pub delta_max: f64,
    pub converged: bool,
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationConfig {
    pub damping: f64,
    /// Stop once every page changes by strictly less than this.
    pub tolerance: f64,
    /// Optional cap on update steps. `None` iterates until convergence.
    pub max_iterations: Option<usize>,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 0.001,
            max_iterations: None,
        }
    }
}

impl IterationConfig {
    /// Rejects settings that cannot converge.
    ///
    /// Without an iteration cap, `damping` must be strictly below 1.
    pub fn validate(&self) -> Result<()> {
        if !self.damping.is_finite() {
            return Err(Error::InvalidParameter(
                "damping must be finite".to_string(),
            ));
        }
        let in_domain = match self.max_iterations {
            Some(_) => (0.0..=1.0).contains(&self.damping),
            None => (0.0..1.0).contains(&self.damping),
        };
        if !in_domain {
            return Err(Error::InvalidParameter(
                "damping must be in [0,1), or [0,1] with max_iterations".to_string(),
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(Error::InvalidParameter(
                "max_iterations must be > 0".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidParameter(
                "tolerance must be finite and > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Checked iterative estimator.
///
/// Validates `config` and rejects an empty corpus.
pub fn iterate_pagerank_checked(corpus: &Corpus, config: IterationConfig) -> Result<RankTable> {
    config.validate()?;
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    Ok(iterate_pagerank(corpus, config))
}

pub fn iterate_pagerank(corpus: &Corpus, config: IterationConfig) -> RankTable {
    let run = iterate_pagerank_run(corpus, config);
    RankTable::from_scores(corpus, &run.scores)
}

/// Iterative PageRank with convergence reporting.
///
/// `iterations` is the number of update steps computed, including the final one whose change
/// fell below `tolerance`. On convergence the returned scores are the table *before* that
/// final step; on hitting `max_iterations` they are the last computed table.
pub fn iterate_pagerank_run<G: LinkGraph>(graph: &G, config: IterationConfig) -> IterationRun {
    let n = graph.node_count();
    if n == 0 {
        return IterationRun {
            scores: Vec::new(),
            iterations: 0,
            delta_max: 0.0,
            converged: true,
        };
    }
    let n_f64 = n as f64;
    let mut scores = vec![1.0 / n_f64; n];
    let mut new_scores = vec![0.0; n];
    let out_degrees: Vec<usize> = (0..n).map(|i| graph.out_degree(i)).collect();
    let teleport = (1.0 - config.damping) / n_f64;

    let mut iters = 0usize;
    let mut last_delta = f64::INFINITY;
    let mut converged = false;
    while config.max_iterations.map_or(true, |cap| iters < cap) {
        iters += 1;
        let dangling_sum: f64 = out_degrees
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(i, _)| scores[i])
            .sum();
        let dangling_contrib = config.damping * dangling_sum / n_f64;
        new_scores.fill(teleport + dangling_contrib);

        for u in 0..n {
            let deg = out_degrees[u];
            if deg > 0 {
                let share = config.damping * scores[u] / deg as f64;
                for &v in graph.links_ref(u) {
                    new_scores[v] += share;
                }
            }
        }

        let delta = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, f64::max);
        last_delta = delta;
        if delta < config.tolerance {
            // Keep the table the convergence test was measured against.
            converged = true;
            break;
        }
        std::mem::swap(&mut scores, &mut new_scores);
    }

    if converged {
        debug!(pages = n, iterations = iters, delta_max = last_delta, "pagerank converged");
    } else {
        warn!(
            pages = n,
            iterations = iters,
            delta_max = last_delta,
            "pagerank stopped at max_iterations without converging"
        );
    }
    IterationRun {
        scores,
        iterations: iters,
        delta_max: last_delta,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyList;
    use proptest::prelude::*;

    #[test]
    fn mutual_pair_is_half_each() {
        let corpus = Corpus::new([("A", vec!["B"]), ("B", vec!["A"])]);
        let ranks = iterate_pagerank(&corpus, IterationConfig::default());
        assert!((ranks.get("A").unwrap() - 0.5).abs() < 1e-12);
        assert!((ranks.get("B").unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn converged_table_is_the_one_before_the_final_step() {
        // 1 -> 2, 2 -> {1, 3}, 3 -> {2, 4}, 4 -> 2
        let corpus = Corpus::new([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec!["2.html"]),
        ]);
        let ranks = iterate_pagerank(&corpus, IterationConfig::default());
        assert_eq!(
            ranks.to_string(),
            "  1.html: 0.2202\n  2.html: 0.4289\n  3.html: 0.2202\n  4.html: 0.1307\n"
        );

        // One more step from the returned table moves some page by less than the tolerance,
        // but by something: the returned table is not the last one computed.
        let run = iterate_pagerank_run(&corpus, IterationConfig::default());
        assert!(run.converged);
        assert!(run.delta_max > 0.0 && run.delta_max < 0.001);
        let capped = iterate_pagerank_run(
            &corpus,
            IterationConfig {
                max_iterations: Some(run.iterations - 1),
                tolerance: 1e-300,
                ..IterationConfig::default()
            },
        );
        for (x, y) in run.scores.iter().zip(capped.scores.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn cycle_is_uniform() {
        // 0 -> 1 -> 2 -> 0
        let adj = vec![vec![1], vec![2], vec![0]];
        let run = iterate_pagerank_run(&AdjacencyList(&adj), IterationConfig::default());
        assert!(run.converged);
        for &x in &run.scores {
            assert!((x - (1.0 / 3.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn dangling_page_mass_is_spread_to_everyone() {
        // A -> B, B dangling, C -> A.
        let corpus = Corpus::new([("A", vec!["B"]), ("B", vec![]), ("C", vec!["A"])]);
        let cfg = IterationConfig {
            tolerance: 1e-12,
            ..IterationConfig::default()
        };
        let ranks = iterate_pagerank(&corpus, cfg);
        let (a, b, c) = (
            ranks.get("A").unwrap(),
            ranks.get("B").unwrap(),
            ranks.get("C").unwrap(),
        );
        let d = 0.85;
        let base = (1.0 - d) / 3.0 + d * b / 3.0;
        assert!((a - (base + d * c)).abs() < 1e-9, "A={a}");
        assert!((b - (base + d * a)).abs() < 1e-9, "B={b}");
        assert!((c - base).abs() < 1e-9, "C={c}");
        assert!((a + b + c - 1.0).abs() < 1e-9);
        assert!(b > a && a > c);
    }

    #[test]
    fn max_iterations_caps_the_run() {
        let adj = vec![vec![1], vec![]];
        let cfg = IterationConfig {
            tolerance: 1e-300,
            max_iterations: Some(3),
            ..IterationConfig::default()
        };
        let run = iterate_pagerank_run(&AdjacencyList(&adj), cfg);
        assert_eq!(run.iterations, 3);
        assert!(!run.converged);
    }

    #[test]
    fn empty_graph_is_empty() {
        let adj: Vec<Vec<usize>> = Vec::new();
        let run = iterate_pagerank_run(&AdjacencyList(&adj), IterationConfig::default());
        assert!(run.scores.is_empty());
        assert!(run.converged);
    }

    #[test]
    fn validate_requires_damping_below_one_without_cap() {
        let unbounded = IterationConfig {
            damping: 1.0,
            ..IterationConfig::default()
        };
        let err = unbounded.validate().unwrap_err();
        assert!(format!("{err}").contains("max_iterations"));

        let negative = IterationConfig {
            damping: -0.1,
            max_iterations: Some(10),
            ..IterationConfig::default()
        };
        assert!(negative.validate().is_err());

        let capped = IterationConfig {
            damping: 1.0,
            max_iterations: Some(50),
            ..IterationConfig::default()
        };
        assert!(capped.validate().is_ok());

        let bad_tol = IterationConfig {
            tolerance: 0.0,
            ..IterationConfig::default()
        };
        assert!(bad_tol.validate().is_err());
    }

    #[test]
    fn checked_rejects_empty_corpus() {
        let err = iterate_pagerank_checked(&Corpus::default(), IterationConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus));
    }

    proptest! {
        #[test]
        fn prop_iterate_sums_to_one_and_is_deterministic(
            n in 1usize..10,
            edges in proptest::collection::vec((0usize..10, 0usize..10), 0..40),
            damping in 0.0f64..0.95,
        ) {
            let mut adj = vec![Vec::<usize>::new(); n];
            for (u, v) in edges {
                if u < n && v < n && u != v && !adj[u].contains(&v) {
                    adj[u].push(v);
                }
            }
            let g = AdjacencyList(&adj);
            let cfg = IterationConfig { damping, ..IterationConfig::default() };
            let r1 = iterate_pagerank_run(&g, cfg);
            let r2 = iterate_pagerank_run(&g, cfg);

            prop_assert!(r1.converged);
            prop_assert_eq!(r1.scores.len(), n);
            let sum: f64 = r1.scores.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9, "sum={}", sum);
            prop_assert!(r1.scores.iter().all(|x| *x >= 0.0));
            let bits1: Vec<u64> = r1.scores.iter().map(|x| x.to_bits()).collect();
            let bits2: Vec<u64> = r2.scores.iter().map(|x| x.to_bits()).collect();
            prop_assert_eq!(bits1, bits2);
        }
    }
}
