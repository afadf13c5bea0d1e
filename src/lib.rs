//! Troubleshooting Guide
//!
//! A small self-editable knowledge base kept in one flat text file.
//!
//! This library provides:
//! - Parsing the text into named sections
//! - Rendering section bodies into structured blocks
//! - Substring search with snippets, summaries and error badges
//! - An mtime-keyed document cache and the flat-file store
//! - An HTTP front end and configuration management

pub mod config;
pub mod core;
pub mod http;
pub mod parser;
pub mod render;
pub mod search;

pub use config::Config;
pub use crate::core::{Guide, Store, StoreError};
pub use parser::{Section, parse_document};
pub use render::{Block, Element, Span};
pub use search::{SearchResult, search};
