//! # CommentService
//!
//! Fetch → thread → view orchestration for a review's comment section.
//! Every mutation is followed by a full reload; nothing is patched in
//! place and nothing is cached between calls.

use std::sync::Arc;

use domains::{
    CommentId, CommentRepo, DomainError, NewComment, Result, Review, ReviewId, ReviewRepo,
};
use tracing::{info, instrument};

use crate::comment_tree::{build_tree, CommentTree};
use crate::render::{CommentSectionView, RenderContext, ReviewView};

/// A loaded review with its threaded comments, ready to render.
#[derive(Debug, Clone)]
pub struct ReviewSection {
    pub review: Review,
    pub review_view: ReviewView,
    pub tree: CommentTree,
    pub view: CommentSectionView,
}

pub struct CommentService {
    reviews: Arc<dyn ReviewRepo>,
    comments: Arc<dyn CommentRepo>,
}

impl CommentService {
    pub fn new(reviews: Arc<dyn ReviewRepo>, comments: Arc<dyn CommentRepo>) -> Self {
        Self { reviews, comments }
    }

    /// Loads the review and its comments and builds the card view for `viewer`.
    #[instrument(skip(self))]
    pub async fn load_section(&self, review_id: ReviewId, viewer: Option<&str>) -> Result<ReviewSection> {
        let review = self.reviews.get_review(review_id).await?;
        let tree = self.load_tree(review_id).await?;
        let ctx = RenderContext::new(review.author_nickname.clone(), viewer.map(str::to_string));
        let view = CommentSectionView::build(&tree, &ctx);
        let review_view = ReviewView::from_review(&review, &ctx);
        Ok(ReviewSection {
            review,
            review_view,
            tree,
            view,
        })
    }

    #[instrument(skip(self))]
    pub async fn load_tree(&self, review_id: ReviewId) -> Result<CommentTree> {
        let comments = self.comments.list_comments(review_id).await?;
        Ok(build_tree(comments))
    }

    /// Posts a comment (or a reply when `parent_id` is set) and reloads.
    #[instrument(skip(self, content))]
    pub async fn post_comment(
        &self,
        review_id: ReviewId,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> Result<CommentTree> {
        let content = validate_content(content)?;
        self.comments
            .create_comment(review_id, NewComment { content, parent_id })
            .await?;
        info!("comment posted");
        self.load_tree(review_id).await
    }

    #[instrument(skip(self, content))]
    pub async fn edit_comment(
        &self,
        review_id: ReviewId,
        comment_id: CommentId,
        content: &str,
    ) -> Result<CommentTree> {
        let content = validate_content(content)?;
        self.comments.update_comment(comment_id, content).await?;
        info!("comment edited");
        self.load_tree(review_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, review_id: ReviewId, comment_id: CommentId) -> Result<CommentTree> {
        self.comments.delete_comment(comment_id).await?;
        info!("comment deleted");
        self.load_tree(review_id).await
    }

    /// Deletes the review. The backend decides whether the caller may;
    /// the page only offers the control to the review's author.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, review_id: ReviewId) -> Result<()> {
        self.reviews.delete_review(review_id).await?;
        info!("review deleted");
        Ok(())
    }
}

fn validate_content(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("comment content is empty".into()));
    }
    Ok(trimmed.to_string())
}
