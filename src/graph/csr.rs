//! Compressed Sparse Row (CSR) corpus representation
//!
//! CSR is optimized for iteration over outbound links, which is exactly what
//! both the random walk and power iteration need.

use rustc_hash::FxHashMap;

use super::builder::{CorpusBuilder, PageId};
use crate::errors::{RankError, Result};

/// An immutable link graph in Compressed Sparse Row format
///
/// Page `i`'s outbound targets are `col_idx[row_ptr[i]..row_ptr[i + 1]]`,
/// sorted ascending. Every target is itself a page of the corpus.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Number of pages
    pub num_pages: usize,
    /// Row pointers: page i's links are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target pages) for each link
    pub col_idx: Vec<PageId>,
    /// Out-degree for each page
    pub out_degree: Vec<u32>,
    /// Page names, indexed by page ID
    pub names: Vec<String>,
    /// Maps page name -> page ID
    pub index: FxHashMap<String, PageId>,
}

impl Corpus {
    /// Freeze a CorpusBuilder into CSR format
    pub fn from_builder(builder: &CorpusBuilder) -> Self {
        let num_pages = builder.page_count();
        let mut row_ptr = Vec::with_capacity(num_pages + 1);
        let mut col_idx = Vec::with_capacity(builder.link_count());
        let mut out_degree = Vec::with_capacity(num_pages);
        let mut names = Vec::with_capacity(num_pages);
        let mut index = FxHashMap::with_capacity_and_hasher(num_pages, Default::default());

        row_ptr.push(0);

        for (id, page) in builder.pages() {
            names.push(page.name.clone());
            index.insert(page.name.clone(), id);

            // Sort targets for deterministic iteration
            let mut links: Vec<PageId> = page.links.iter().copied().collect();
            links.sort_unstable();

            out_degree.push(links.len() as u32);
            col_idx.extend(links);
            row_ptr.push(col_idx.len());
        }

        Self {
            num_pages,
            row_ptr,
            col_idx,
            out_degree,
            names,
            index,
        }
    }

    /// Build directly from a page -> targets mapping
    ///
    /// See [`CorpusBuilder::from_link_map`] for the filtering rules.
    pub fn from_links<I, P, T, S>(link_map: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_builder(&CorpusBuilder::from_link_map(link_map))
    }

    /// Outbound targets of a page (possibly empty)
    pub fn links(&self, page: PageId) -> &[PageId] {
        let start = self.row_ptr[page as usize];
        let end = self.row_ptr[page as usize + 1];
        &self.col_idx[start..end]
    }

    /// Get the out-degree of a page
    pub fn degree(&self, page: PageId) -> u32 {
        self.out_degree[page as usize]
    }

    /// Whether a page has no outbound links
    pub fn is_dangling(&self, page: PageId) -> bool {
        self.out_degree[page as usize] == 0
    }

    /// Find dangling pages (pages with no outbound links)
    pub fn dangling_pages(&self) -> Vec<PageId> {
        (0..self.num_pages as PageId)
            .filter(|&p| self.is_dangling(p))
            .collect()
    }

    /// Get the name of a page
    pub fn page_name(&self, page: PageId) -> &str {
        &self.names[page as usize]
    }

    /// Get page ID by name
    pub fn page_id(&self, name: &str) -> Option<PageId> {
        self.index.get(name).copied()
    }

    /// Look up a page ID, failing with `UnknownPage` when absent
    pub fn require_page(&self, name: &str) -> Result<PageId> {
        self.page_id(name)
            .ok_or_else(|| RankError::UnknownPage(name.to_string()))
    }

    /// Check whether a page name is part of the corpus
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over `(id, name)` for every page
    pub fn pages(&self) -> impl Iterator<Item = (PageId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (i as PageId, name.as_str()))
    }

    /// Check if the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.num_pages == 0
    }

    /// Get the total number of directed links
    pub fn num_links(&self) -> usize {
        self.col_idx.len()
    }

    /// Fail with `EmptyCorpus` when there is nothing to rank
    pub fn require_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(RankError::EmptyCorpus)
        } else {
            Ok(())
        }
    }

    /// Verify the structural invariants of the corpus
    ///
    /// Every link target must be a page of this corpus, row pointers must be
    /// monotone and cover `col_idx`, and the cached degrees and name index
    /// must agree with the adjacency. Corpora produced by
    /// [`Corpus::from_builder`] always pass; this exists for hand-assembled
    /// corpora and tests.
    pub fn validate(&self) -> Result<()> {
        let n = self.num_pages;
        if self.row_ptr.len() != n + 1
            || self.out_degree.len() != n
            || self.names.len() != n
            || self.index.len() != n
        {
            return Err(RankError::MalformedCorpus(format!(
                "inconsistent lengths for {n} pages"
            )));
        }
        if self.row_ptr[0] != 0 || self.row_ptr[n] != self.col_idx.len() {
            return Err(RankError::MalformedCorpus(
                "row pointers do not cover the link array".to_string(),
            ));
        }

        for page in 0..n {
            let (start, end) = (self.row_ptr[page], self.row_ptr[page + 1]);
            if start > end {
                return Err(RankError::MalformedCorpus(format!(
                    "row pointers decrease at page {}",
                    self.names[page]
                )));
            }
            if self.out_degree[page] as usize != end - start {
                return Err(RankError::MalformedCorpus(format!(
                    "out-degree mismatch for page {}",
                    self.names[page]
                )));
            }
            if self.index.get(&self.names[page]) != Some(&(page as PageId)) {
                return Err(RankError::MalformedCorpus(format!(
                    "name index disagrees for page {}",
                    self.names[page]
                )));
            }
            for &target in &self.col_idx[start..end] {
                if target as usize >= n {
                    return Err(RankError::DanglingReference {
                        page: self.names[page].clone(),
                        target: format!("#{target}"),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self {
            num_pages: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            out_degree: Vec::new(),
            names: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_corpus() -> Corpus {
        Corpus::from_links(vec![
            ("a", vec!["b", "c"]),
            ("b", vec!["c"]),
            ("c", vec![]),
        ])
    }

    #[test]
    fn test_csr_conversion() {
        let corpus = build_test_corpus();

        assert_eq!(corpus.num_pages, 3);
        assert_eq!(corpus.num_links(), 3);
        assert_eq!(corpus.names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_links_sorted_and_directed() {
        let corpus = build_test_corpus();
        let a = corpus.page_id("a").unwrap();
        let b = corpus.page_id("b").unwrap();
        let c = corpus.page_id("c").unwrap();

        assert_eq!(corpus.links(a), &[b, c]);
        assert_eq!(corpus.links(b), &[c]);
        assert!(corpus.links(c).is_empty());
        assert_eq!(corpus.degree(a), 2);
    }

    #[test]
    fn test_dangling_pages() {
        let corpus = build_test_corpus();
        let c = corpus.page_id("c").unwrap();

        assert!(corpus.is_dangling(c));
        assert_eq!(corpus.dangling_pages(), vec![c]);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::from_builder(&CorpusBuilder::new());

        assert!(corpus.is_empty());
        assert_eq!(corpus.num_links(), 0);
        assert!(matches!(
            corpus.require_non_empty(),
            Err(RankError::EmptyCorpus)
        ));
        assert!(corpus.validate().is_ok());
    }

    #[test]
    fn test_lookup_by_name() {
        let corpus = build_test_corpus();

        assert_eq!(corpus.page_id("a"), Some(0));
        assert_eq!(corpus.page_name(1), "b");
        assert!(corpus.contains("c"));
        assert!(matches!(
            corpus.require_page("z"),
            Err(RankError::UnknownPage(name)) if name == "z"
        ));
    }

    #[test]
    fn test_built_corpus_targets_are_keys() {
        let corpus = Corpus::from_links(vec![
            ("1.html", vec!["2.html", "4.html"]),
            ("2.html", vec!["3.html", "1.html"]),
            ("3.html", vec!["2.html", "5.html"]),
            ("4.html", vec!["2.html"]),
        ]);

        assert!(corpus.validate().is_ok());
        for (id, _) in corpus.pages() {
            for &target in corpus.links(id) {
                assert!(corpus.contains(corpus.page_name(target)));
            }
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_target() {
        let mut corpus = build_test_corpus();
        corpus.col_idx[0] = 42;

        let err = corpus.validate().unwrap_err();
        assert!(matches!(err, RankError::DanglingReference { ref page, .. } if page == "a"));
    }

    #[test]
    fn test_validate_rejects_degree_mismatch() {
        let mut corpus = build_test_corpus();
        corpus.out_degree[1] = 5;

        assert!(matches!(
            corpus.validate(),
            Err(RankError::MalformedCorpus(_))
        ));
    }
}
