//! HTTP Boundary
//!
//! Thin transport over the guide: page chrome, editor forms and a JSON API.
//! All parsing, rendering and search happen in the core modules.

pub mod backend;
pub mod handlers;
pub mod page;
pub mod server;

pub use backend::Backend;
pub use server::{router, serve};
