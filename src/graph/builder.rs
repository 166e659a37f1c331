//! Corpus builder with interned page names
//!
//! This module provides a mutable builder that uses FxHashMap for O(1)
//! page lookups and FxHashSet for de-duplicated outbound links during
//! construction. Freeze it into a [`Corpus`](super::csr::Corpus) before
//! ranking.

use rustc_hash::{FxHashMap, FxHashSet};

/// Dense identifier of a page within one corpus
pub type PageId = u32;

/// A page in the corpus builder
#[derive(Debug, Clone)]
pub struct BuilderPage {
    /// The page name (file name, URL slug, ...)
    pub name: String,
    /// Outbound links: target page IDs
    pub links: FxHashSet<PageId>,
}

impl BuilderPage {
    /// Create a new page with no outbound links
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: FxHashSet::default(),
        }
    }
}

/// A mutable corpus builder optimized for incremental construction
#[derive(Debug)]
pub struct CorpusBuilder {
    /// Maps page name -> page ID
    name_to_id: FxHashMap<String, PageId>,
    /// Page storage
    pages: Vec<BuilderPage>,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self {
            name_to_id: FxHashMap::default(),
            pages: Vec::new(),
        }
    }

    /// Create a builder with pre-allocated capacity
    pub fn with_capacity(page_capacity: usize) -> Self {
        Self {
            name_to_id: FxHashMap::with_capacity_and_hasher(page_capacity, Default::default()),
            pages: Vec::with_capacity(page_capacity),
        }
    }

    /// Get or create a page for the given name, returning its ID
    pub fn get_or_create_page(&mut self, name: &str) -> PageId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }

        let id = self.pages.len() as PageId;
        self.name_to_id.insert(name.to_string(), id);
        self.pages.push(BuilderPage::new(name));
        id
    }

    /// Add a directed link between two existing pages
    ///
    /// Self-links and repeated links are ignored.
    pub fn add_link(&mut self, from: PageId, to: PageId) {
        if from == to || to as usize >= self.pages.len() {
            return;
        }
        if let Some(page) = self.pages.get_mut(from as usize) {
            page.links.insert(to);
        }
    }

    /// Build from an external page -> targets mapping
    ///
    /// Every key becomes a page, even when it has no links. Targets that are
    /// not themselves keys are dropped, so the result only holds links
    /// between pages of the same corpus.
    pub fn from_link_map<I, P, T, S>(link_map: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: Vec<(P, T)> = link_map.into_iter().collect();
        let mut builder = Self::with_capacity(entries.len());

        // Register all keys first so that link order does not matter
        for (page, _) in &entries {
            builder.get_or_create_page(page.as_ref());
        }

        for (page, targets) in entries {
            let from = builder.get_or_create_page(page.as_ref());
            for target in targets {
                match builder.page_id(target.as_ref()) {
                    Some(to) => builder.add_link(from, to),
                    None => tracing::debug!(
                        page = page.as_ref(),
                        target = target.as_ref(),
                        "dropping link to page outside the corpus"
                    ),
                }
            }
        }

        builder
    }

    /// Get the number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get the total number of directed links
    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }

    /// Get a page by ID
    pub fn get_page(&self, id: PageId) -> Option<&BuilderPage> {
        self.pages.get(id as usize)
    }

    /// Get a page ID by name
    pub fn page_id(&self, name: &str) -> Option<PageId> {
        self.name_to_id.get(name).copied()
    }

    /// Get the name for a page ID
    pub fn page_name(&self, id: PageId) -> Option<&str> {
        self.pages.get(id as usize).map(|p| p.name.as_str())
    }

    /// Iterate over all pages
    pub fn pages(&self) -> impl Iterator<Item = (PageId, &BuilderPage)> {
        self.pages.iter().enumerate().map(|(i, p)| (i as PageId, p))
    }

    /// Check if the builder holds no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
