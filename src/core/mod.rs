//! Core Business Logic
//!
//! Flat-file store, the mtime-keyed document cache and the guide that
//! answers queries over them.

pub mod document;
pub mod error;
pub mod guide;
pub mod store;

pub use document::{Document, DocumentCache};
pub use error::StoreError;
pub use guide::Guide;
pub use store::Store;
