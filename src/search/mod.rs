//! Section search with snippets and summaries.

pub mod engine;

pub use engine::{
    MARK_CLOSE, MARK_OPEN, SearchResult, error_count, find_occurrences, highlight,
    normalize_query, search, snippet, summarize,
};
