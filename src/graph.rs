//! Minimal link-graph adapter trait.
//!
//! Estimators are written against node indices `0..node_count()`; [`crate::Corpus`] maps
//! those indices back to page identifiers.

/// A directed graph view that returns **borrowed** outbound-link slices.
///
/// Requirements:
/// - every index in `links_ref(node)` is `< node_count()`
/// - no self-links, no duplicates
pub trait LinkGraph {
    fn node_count(&self) -> usize;
    fn links_ref(&self, node: usize) -> &[usize];
    fn out_degree(&self, node: usize) -> usize {
        self.links_ref(node).len()
    }
}

/// Adjacency-list view over raw index lists.
///
/// No invariants are enforced here; prefer [`crate::Corpus`] unless the lists are known clean.
pub struct AdjacencyList<'a>(pub &'a [Vec<usize>]);

impl<'a> LinkGraph for AdjacencyList<'a> {
    fn node_count(&self) -> usize {
        self.0.len()
    }
    fn links_ref(&self, node: usize) -> &[usize] {
        self.0.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}
