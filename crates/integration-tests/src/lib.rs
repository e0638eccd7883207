//! Shared fixtures for the cross-crate tests.

use domains::{Comment, CommentId, Review, ReviewId};

pub const REVIEW_AUTHOR: &str = "writer";
pub const VIEWER: &str = "me";

pub fn review(id: i64) -> Review {
    Review {
        id: ReviewId(id),
        title: "Information Processing Engineer, passed".into(),
        author_nickname: Some(REVIEW_AUTHOR.into()),
        comment: "Two weeks of past papers.\nGood luck!".into(),
        created_at: Some("2024-05-01T09:00:00".into()),
    }
}

pub fn comment(id: i64, parent: Option<i64>, author: &str) -> Comment {
    Comment {
        id: CommentId(id),
        parent_id: parent.map(CommentId),
        author_nickname: Some(author.into()),
        content: format!("comment {id}"),
        created_at: Some("2024-05-01T10:00:00".into()),
    }
}

/// A listing as the backend would send it: one thread with two replies,
/// a second thread, and a reply whose parent was deleted.
pub fn backend_listing() -> serde_json::Value {
    serde_json::json!([
        { "id": 1, "parentId": null, "authorNickname": "writer", "content": "Thanks for reading", "createdAt": "2024-05-01T10:00:00" },
        { "id": 2, "parentId": 1, "authorNickname": "me", "content": "Which book?", "createdAt": "2024-05-01T10:05:00" },
        { "id": 3, "authorNickname": "other", "content": "Congrats!\nWell done", "createdAt": "2024-05-01T10:06:00" },
        { "id": 4, "parentId": 1, "authorNickname": "writer", "content": "The blue one", "createdAt": "2024-05-01T10:07:00" },
        { "id": 5, "parentId": 99, "authorNickname": "other", "content": "+1", "createdAt": "2024-05-01T10:08:00" }
    ])
}
