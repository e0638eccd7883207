//! # storage-adapters
//!
//! Implementations of the `domains` ports: the portal's REST backend and
//! an in-process store for tests and offline runs.

#[cfg(feature = "http")]
pub mod http;
pub mod memory;

#[cfg(feature = "http")]
pub use http::HttpCommentRepo;
pub use memory::InMemoryCommentRepo;
