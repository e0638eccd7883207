//! In-process implementation of both ports, backed by `DashMap`.
//!
//! Comments are kept per review in insertion order, which is also the
//! order `list_comments` returns them in, matching the backend.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use domains::{
    Comment, CommentId, CommentRepo, DomainError, NewComment, Result, Review, ReviewId, ReviewRepo,
};
use tracing::debug;

pub struct InMemoryCommentRepo {
    reviews: DashMap<ReviewId, Review>,
    comments: DashMap<ReviewId, Vec<Comment>>,
    next_id: AtomicI64,
    /// Nickname stamped on comments created through this repo.
    author: Option<String>,
}

impl Default for InMemoryCommentRepo {
    fn default() -> Self {
        Self::new(None)
    }
}

impl InMemoryCommentRepo {
    pub fn new(author: Option<String>) -> Self {
        Self {
            reviews: DashMap::new(),
            comments: DashMap::new(),
            next_id: AtomicI64::new(1),
            author,
        }
    }

    pub fn insert_review(&self, review: Review) {
        self.comments.entry(review.id).or_default();
        self.reviews.insert(review.id, review);
    }

    /// Appends pre-built comments as-is. Later ids allocated by
    /// `create_comment` start past the largest seeded id.
    pub fn seed_comments(&self, review_id: ReviewId, seed: Vec<Comment>) {
        if let Some(max) = seed.iter().map(|c| c.id.0).max() {
            self.next_id.fetch_max(max + 1, Ordering::SeqCst);
        }
        self.comments.entry(review_id).or_default().extend(seed);
    }
}

#[async_trait]
impl ReviewRepo for InMemoryCommentRepo {
    async fn get_review(&self, id: ReviewId) -> Result<Review> {
        self.reviews
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| DomainError::NotFound("Review".into(), id.to_string()))
    }

    async fn delete_review(&self, id: ReviewId) -> Result<()> {
        self.reviews
            .remove(&id)
            .ok_or_else(|| DomainError::NotFound("Review".into(), id.to_string()))?;
        self.comments.remove(&id);
        debug!(review_id = %id, "review deleted");
        Ok(())
    }
}

#[async_trait]
impl CommentRepo for InMemoryCommentRepo {
    async fn list_comments(&self, review_id: ReviewId) -> Result<Vec<Comment>> {
        self.comments
            .get(&review_id)
            .map(|c| c.value().clone())
            .ok_or_else(|| DomainError::NotFound("Review".into(), review_id.to_string()))
    }

    async fn create_comment(&self, review_id: ReviewId, comment: NewComment) -> Result<()> {
        let mut list = self
            .comments
            .get_mut(&review_id)
            .ok_or_else(|| DomainError::NotFound("Review".into(), review_id.to_string()))?;
        let id = CommentId(self.next_id.fetch_add(1, Ordering::SeqCst));
        debug!(%review_id, comment_id = %id, "storing comment");
        list.push(Comment {
            id,
            parent_id: comment.parent_id,
            author_nickname: self.author.clone(),
            content: comment.content,
            created_at: Some(Utc::now().to_rfc3339()),
        });
        Ok(())
    }

    async fn update_comment(&self, id: CommentId, content: String) -> Result<Comment> {
        for mut entry in self.comments.iter_mut() {
            if let Some(comment) = entry.value_mut().iter_mut().find(|c| c.id == id) {
                comment.content = content;
                return Ok(comment.clone());
            }
        }
        Err(DomainError::NotFound("Comment".into(), id.to_string()))
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        for mut entry in self.comments.iter_mut() {
            let list = entry.value_mut();
            let before = list.len();
            list.retain(|c| c.id != id);
            if list.len() != before {
                return Ok(());
            }
        }
        Err(DomainError::NotFound("Comment".into(), id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: i64) -> Review {
        Review {
            id: ReviewId(id),
            title: format!("review {id}"),
            author_nickname: Some("writer".into()),
            comment: String::new(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn created_comments_list_in_insertion_order() {
        let repo = InMemoryCommentRepo::new(Some("me".into()));
        repo.insert_review(review(1));

        for body in ["first", "second"] {
            repo.create_comment(ReviewId(1), NewComment { content: body.into(), parent_id: None })
                .await
                .unwrap();
        }

        let listed = repo.list_comments(ReviewId(1)).await.unwrap();
        let bodies: Vec<_> = listed.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
        assert_eq!(listed[0].author_nickname.as_deref(), Some("me"));
        assert_ne!(listed[0].id, listed[1].id);
    }

    #[tokio::test]
    async fn new_ids_do_not_collide_with_seeded_ones() {
        let repo = InMemoryCommentRepo::default();
        repo.insert_review(review(1));
        repo.seed_comments(
            ReviewId(1),
            vec![Comment {
                id: CommentId(40),
                parent_id: None,
                author_nickname: None,
                content: "seed".into(),
                created_at: None,
            }],
        );
        repo.create_comment(ReviewId(1), NewComment { content: "new".into(), parent_id: None })
            .await
            .unwrap();

        let listed = repo.list_comments(ReviewId(1)).await.unwrap();
        assert_eq!(listed[1].id, CommentId(41));
    }

    #[tokio::test]
    async fn update_and_delete_unknown_comment_are_not_found() {
        let repo = InMemoryCommentRepo::default();
        repo.insert_review(review(1));
        assert!(matches!(
            repo.update_comment(CommentId(5), "x".into()).await,
            Err(DomainError::NotFound(..))
        ));
        assert!(matches!(
            repo.delete_comment(CommentId(5)).await,
            Err(DomainError::NotFound(..))
        ));
    }

    #[tokio::test]
    async fn deleting_a_review_drops_its_comments() {
        let repo = InMemoryCommentRepo::default();
        repo.insert_review(review(1));
        repo.create_comment(ReviewId(1), NewComment { content: "hi".into(), parent_id: None })
            .await
            .unwrap();

        repo.delete_review(ReviewId(1)).await.unwrap();

        assert!(matches!(repo.get_review(ReviewId(1)).await, Err(DomainError::NotFound(..))));
        assert!(matches!(repo.list_comments(ReviewId(1)).await, Err(DomainError::NotFound(..))));
        assert!(matches!(repo.delete_review(ReviewId(1)).await, Err(DomainError::NotFound(..))));
    }

    #[tokio::test]
    async fn listing_unknown_review_is_not_found() {
        let repo = InMemoryCommentRepo::default();
        assert!(matches!(
            repo.list_comments(ReviewId(9)).await,
            Err(DomainError::NotFound(kind, _)) if kind == "Review"
        ));
    }
}
