//! # services
//!
//! Comment threading, the card view model built on top of it, action
//! routing, and the service that ties them to a backend.

pub mod actions;
pub mod comment_service;
pub mod comment_tree;
pub mod render;
pub mod time_format;

pub use actions::ActionDispatcher;
pub use comment_service::{CommentService, ReviewSection};
pub use comment_tree::{build_tree, CommentThread, CommentTree};
pub use render::{CommentCard, CommentSectionView, RenderContext, ReviewView, ThreadView};
