//! Query interface over the store
//!
//! Every read goes through the document cache; writes go straight to the
//! store and are picked up by the next read through the mtime check.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use crate::core::document::{Document, DocumentCache};
use crate::core::error::StoreError;
use crate::core::store::Store;
use crate::parser::Section;
use crate::render::{Block, Element, layout_body, render_body};
use crate::search::{self, SearchResult};

/// The troubleshooting guide: store, cache and engines together
#[derive(Debug)]
pub struct Guide {
    store: Store,
    cache: DocumentCache,
}

impl Guide {
    pub fn new(store: Store) -> Self {
        Self::with_cache(store, DocumentCache::new())
    }

    pub fn with_cache(store: Store, cache: DocumentCache) -> Self {
        Self { store, cache }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Store::new(path))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Current parsed generation of the store
    pub fn document(&mut self) -> Arc<Document> {
        self.cache.get(&self.store)
    }

    pub fn list_sections(&mut self) -> Vec<Section> {
        self.document().sections.clone()
    }

    pub fn section(&mut self, ordinal: usize) -> Option<Section> {
        self.document().section(ordinal).cloned()
    }

    /// Blocks of one section, `None` when the ordinal is out of range
    pub fn render_section(&mut self, ordinal: usize) -> Option<Vec<Block>> {
        self.document()
            .section(ordinal)
            .map(|section| render_body(&section.body))
    }

    /// Blocks of one section with bullets grouped into lists
    pub fn layout_section(&mut self, ordinal: usize) -> Option<Vec<Element>> {
        self.document()
            .section(ordinal)
            .map(|section| layout_body(&section.body))
    }

    pub fn search(&mut self, query: &str) -> Vec<SearchResult> {
        search::search(query, &self.document().sections)
    }

    pub fn append_section(&mut self, name: &str, body: &str) -> Result<(), StoreError> {
        self.store.append_section(name, body)
    }

    pub fn replace_all(&mut self, text: &str) -> Result<(), StoreError> {
        self.store.replace_all(text)
    }

    /// Raw store text for editing, empty when unavailable
    pub fn raw_text(&self) -> String {
        self.store.read_or_empty()
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        self.store.modified()
    }

    /// Parse a public section identifier: `app<N>` or a bare `N`
    pub fn resolve(id: &str) -> Option<usize> {
        let id = id.trim();
        id.strip_prefix("app").unwrap_or(id).parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ids() {
        assert_eq!(Guide::resolve("app0"), Some(0));
        assert_eq!(Guide::resolve(" 12 "), Some(12));
        assert_eq!(Guide::resolve("app"), None);
        assert_eq!(Guide::resolve("appx"), None);
        assert_eq!(Guide::resolve("-1"), None);
    }

    #[test]
    fn test_missing_store_is_empty_guide() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut guide = Guide::open(dir.path().join("absent.txt"));

        assert!(guide.list_sections().is_empty());
        assert!(guide.search("").is_empty());
        assert!(guide.render_section(0).is_none());
        assert_eq!(guide.raw_text(), "");
        assert!(guide.last_modified().is_none());
    }
}
