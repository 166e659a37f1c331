//! Corpus crawler for a directory of HTML pages.
//!
//! Every `*.html` file directly inside the directory is a page, named by its
//! file name. Anchors whose `href` names another page of the same directory
//! become links; everything else (external URLs, missing files, links from a
//! page to itself) is ignored.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use walkdir::WalkDir;

use crate::errors::Result;
use crate::graph::csr::Corpus;

lazy_static! {
    static ref HREF_RE: Regex = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap();
}

/// Extract every `href` target from anchor tags in `html`.
pub fn extract_links(html: &str) -> Vec<&str> {
    HREF_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Parse the HTML pages in `dir` into a corpus.
pub fn crawl(dir: impl AsRef<Path>) -> Result<Corpus> {
    let dir = dir.as_ref();
    let mut pages: Vec<(String, Vec<String>)> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") {
            continue;
        }

        let contents = std::fs::read_to_string(entry.path())?;
        let links = extract_links(&contents)
            .into_iter()
            .map(str::to_string)
            .collect();
        pages.push((name, links));
    }

    let corpus = Corpus::from_links(pages);
    tracing::info!(
        dir = %dir.display(),
        pages = corpus.num_pages,
        links = corpus.num_links(),
        "crawled corpus"
    );
    Ok(corpus)
}
