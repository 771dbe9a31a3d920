//! The closed corpus: pages and their intra-corpus outbound links.
//!
//! Invariants (enforced at construction, read-only afterwards):
//! - pages are unique and ordered by identifier; page `i` is node `i` of the [`LinkGraph`] view
//! - every link target is a page of the same corpus
//! - no self-links; duplicate links collapse

use crate::graph::LinkGraph;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pages: Vec<String>,
    index: HashMap<String, usize>,
    links: Vec<Vec<usize>>,
}

impl Corpus {
    /// Build a corpus from `(page, outbound links)` entries.
    ///
    /// Links whose target is not itself an entry are dropped, as are self-links.
    /// A page listed more than once gets the union of its link sets.
    pub fn new<I, P, L, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, links) in entries {
            raw.entry(page.into())
                .or_default()
                .extend(links.into_iter().map(Into::into));
        }

        let pages: Vec<String> = raw.keys().cloned().collect();
        let index: HashMap<String, usize> = pages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();

        // BTreeSet iteration is sorted, and indices follow page order, so each list is sorted.
        let links = raw
            .iter()
            .enumerate()
            .map(|(src, (_, targets))| {
                targets
                    .iter()
                    .filter_map(|t| index.get(t).copied())
                    .filter(|&dst| dst != src)
                    .collect()
            })
            .collect();

        Self {
            pages,
            index,
            links,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages, ordered by identifier.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page(&self, node: usize) -> Option<&str> {
        self.pages.get(node).map(String::as_str)
    }

    pub fn index_of(&self, page: &str) -> Option<usize> {
        self.index.get(page).copied()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.index.contains_key(page)
    }

    /// Outbound links of `page`, ordered by identifier. `None` if `page` is not in the corpus.
    pub fn links(&self, page: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let node = self.index_of(page)?;
        Some(self.links[node].iter().map(|&t| self.pages[t].as_str()))
    }

    pub fn out_degree_of(&self, page: &str) -> Option<usize> {
        self.index_of(page).map(|node| self.links[node].len())
    }

    /// Pages with no outbound links.
    pub fn dangling_pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.links
            .iter()
            .zip(self.pages.iter())
            .filter(|(links, _)| links.is_empty())
            .map(|(_, page)| page.as_str())
    }

    pub fn link_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum()
    }
}

impl LinkGraph for Corpus {
    fn node_count(&self) -> usize {
        self.pages.len()
    }
    fn links_ref(&self, node: usize) -> &[usize] {
        self.links.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}
