//! # domains
//!
//! Review comment entities, the shared error type, and the ports that
//! backend adapters implement.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
