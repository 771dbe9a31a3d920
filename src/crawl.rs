//! Corpus loading from a directory of HTML documents.
//!
//! Each `*.html` file directly inside the directory is a page named by its file name.
//! Its links are the `href` targets of its anchor tags, minus itself, restricted to
//! other pages of the same directory.

use crate::corpus::Corpus;
use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

lazy_static! {
    static ref ANCHOR_HREF: Regex =
        Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("Invalid regex");
}

/// `href` targets of every anchor tag in `html`, de-duplicated.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    ANCHOR_HREF
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Build a [`Corpus`] from the `.html` files directly inside `dir`.
///
/// Symlinks are followed, so a linked page counts as a page. Subdirectories and other files
/// are ignored. Fails with [`Error::Io`] if the directory or a page cannot be read, and with
/// [`Error::EmptyCorpus`] if it holds no `.html` files.
pub fn crawl(dir: impl AsRef<Path>) -> Result<Corpus> {
    let dir = dir.as_ref();
    let mut pages: Vec<(String, BTreeSet<String>)> = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }
        let contents = std::fs::read_to_string(entry.path())?;
        let mut links = extract_links(&contents);
        links.remove(name);
        debug!(page = name, links = links.len(), "parsed page");
        pages.push((name.to_string(), links));
    }

    if pages.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    let corpus = Corpus::new(pages);
    debug!(
        dir = %dir.display(),
        pages = corpus.len(),
        links = corpus.link_count(),
        "loaded corpus"
    );
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_anchor_hrefs_only() {
        let html = r#"
            <html><body>
            <a href="2.html">two</a>
            <a class="x" href="3.html">three</a>
            <a href="2.html">again</a>
            <link href="style.css">
            <img src="4.html">
            </body></html>
        "#;
        let links: Vec<String> = extract_links(html).into_iter().collect();
        assert_eq!(links, vec!["2.html", "3.html"]);
    }

    #[test]
    fn anchor_attributes_may_span_lines() {
        let html = "<a\n   id=\"n\"\n   href=\"next.html\">next</a>";
        assert!(extract_links(html).contains("next.html"));
    }
}
