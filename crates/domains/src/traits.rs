//! # Core Traits (Ports)
//!
//! Any backend adapter must implement these traits to be used by the
//! services layer.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, CommentId, NewComment, Review, ReviewId};

/// Access to the review hosting a comment section.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReviewRepo: Send + Sync {
    async fn get_review(&self, id: ReviewId) -> Result<Review>;
    /// Removes the review; its comments go with it.
    async fn delete_review(&self, id: ReviewId) -> Result<()>;
}

/// Comment listing and mutation contract.
///
/// Listing returns comments flat, in creation order; threading is done
/// client-side.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn list_comments(&self, review_id: ReviewId) -> Result<Vec<Comment>>;
    async fn create_comment(&self, review_id: ReviewId, comment: NewComment) -> Result<()>;
    /// Replaces the body and returns the updated record.
    async fn update_comment(&self, id: CommentId, content: String) -> Result<Comment>;
    async fn delete_comment(&self, id: CommentId) -> Result<()>;
}
