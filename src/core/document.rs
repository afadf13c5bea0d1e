//! Document Cache
//!
//! Holds the parsed sections of the store, keyed by the file's modification
//! time. The mtime check is the only invalidation mechanism: writers never
//! have to notify the cache.

use std::sync::Arc;
use std::time::SystemTime;

use crate::core::store::Store;
use crate::parser::{Section, parse_document};

/// One generation of the parsed store; read-only once built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub sections: Vec<Section>,
    /// Store mtime this generation was parsed from
    pub modified: Option<SystemTime>,
}

impl Document {
    pub fn section(&self, ordinal: usize) -> Option<&Section> {
        self.sections.get(ordinal)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Owned, injectable cache of the parsed store
#[derive(Debug, Default)]
pub struct DocumentCache {
    cached: Option<Arc<Document>>,
    recorded_mtime: Option<SystemTime>,
    generation: u64,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current document, reparsed when the store's mtime moved
    ///
    /// A store that cannot be stat'ed yields an empty document and clears
    /// the recorded time, so the next successful stat forces a reparse.
    pub fn get(&mut self, store: &Store) -> Arc<Document> {
        let Some(mtime) = store.modified() else {
            self.recorded_mtime = None;
            let empty = Arc::new(Document::default());
            self.cached = Some(empty.clone());
            return empty;
        };

        if let Some(doc) = &self.cached {
            if self.recorded_mtime == Some(mtime) {
                return doc.clone();
            }
        }

        let text = store.read();
        let document = Arc::new(Document {
            sections: text.as_deref().map(parse_document).unwrap_or_default(),
            modified: Some(mtime),
        });

        self.recorded_mtime = text.is_some().then_some(mtime);
        self.cached = Some(document.clone());
        self.generation += 1;

        log::debug!(
            "Parsed {} sections from {} (generation {})",
            document.sections.len(),
            store.path().display(),
            self.generation
        );

        document
    }

    /// Number of reparses performed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn recorded_mtime(&self) -> Option<SystemTime> {
        self.recorded_mtime
    }
}
