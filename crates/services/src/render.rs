//! View models for a review page: the review itself and its threaded
//! comment section.
//!
//! Who wrote the review and who is viewing are passed in explicitly through
//! [`RenderContext`]; every card records the outcome of comparing its
//! author against both, plus the actions the viewer may take on it.

use chrono::{DateTime, Utc};
use domains::{Comment, CommentAction, CommentId, Review, ReviewId};
use serde::Serialize;

use crate::comment_tree::CommentTree;
use crate::time_format::{format_time_ago, format_timestamp};

/// Caller-owned facts needed to tag and authorize cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Nickname of the review's author, for the "(author)" badge.
    pub post_author: Option<String>,
    /// Nickname of the signed-in viewer, for edit/delete controls.
    pub viewer: Option<String>,
    /// When set, dates render as "N minutes ago" relative to this instant.
    pub relative_to: Option<DateTime<Utc>>,
}

impl RenderContext {
    pub fn new(post_author: Option<String>, viewer: Option<String>) -> Self {
        Self {
            post_author,
            viewer,
            relative_to: None,
        }
    }

    pub fn with_relative_dates(mut self, now: DateTime<Utc>) -> Self {
        self.relative_to = Some(now);
        self
    }

    fn display_date(&self, raw: &str) -> String {
        match self.relative_to {
            Some(now) => format_time_ago(raw, now),
            None => format_timestamp(raw),
        }
    }

    pub fn is_post_author(&self, comment: &Comment) -> bool {
        same_nickname(self.post_author.as_deref(), comment.author_nickname.as_deref())
    }

    pub fn is_own(&self, comment: &Comment) -> bool {
        self.is_viewer(comment.author_nickname.as_deref())
    }

    pub fn is_viewer(&self, nickname: Option<&str>) -> bool {
        same_nickname(self.viewer.as_deref(), nickname)
    }
}

// A missing nickname never matches, not even another missing one.
fn same_nickname(a: Option<&str>, b: Option<&str>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

// Every newline becomes a break, trailing ones included.
fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

/// The review shown above its comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    pub id: ReviewId,
    pub title: String,
    pub author: String,
    /// Edit/delete controls; only the review's author sees them.
    pub show_controls: bool,
    pub body_lines: Vec<String>,
    pub posted_at: String,
}

impl ReviewView {
    pub fn from_review(review: &Review, ctx: &RenderContext) -> Self {
        Self {
            id: review.id,
            title: review.title.clone(),
            author: review.author_nickname.clone().unwrap_or_default(),
            show_controls: ctx.is_viewer(review.author_nickname.as_deref()),
            body_lines: split_lines(&review.comment),
            posted_at: review
                .created_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentCard {
    pub id: CommentId,
    pub author: String,
    pub is_post_author: bool,
    pub is_own: bool,
    pub is_reply: bool,
    pub actions: Vec<CommentAction>,
    /// Body split on newlines; the template joins them with line breaks.
    pub body_lines: Vec<String>,
    pub posted_at: String,
}

impl CommentCard {
    pub fn from_comment(comment: &Comment, ctx: &RenderContext, is_reply: bool) -> Self {
        let is_own = ctx.is_own(comment);

        let mut actions = Vec::with_capacity(3);
        if is_own {
            actions.extend([CommentAction::Edit, CommentAction::Delete]);
        }
        // Replies only get one level.
        if !is_reply {
            actions.push(CommentAction::Reply);
        }

        Self {
            id: comment.id,
            author: comment.author_nickname.clone().unwrap_or_default(),
            is_post_author: ctx.is_post_author(comment),
            is_own,
            is_reply,
            actions,
            body_lines: split_lines(&comment.content),
            posted_at: comment
                .created_at
                .as_deref()
                .map(|raw| ctx.display_date(raw))
                .unwrap_or_default(),
        }
    }

    pub fn allows(&self, action: CommentAction) -> bool {
        self.actions.contains(&action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadView {
    pub card: CommentCard,
    pub replies: Vec<CommentCard>,
}

/// Everything the comment-section template needs, in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentSectionView {
    pub threads: Vec<ThreadView>,
}

impl CommentSectionView {
    pub fn build(tree: &CommentTree, ctx: &RenderContext) -> Self {
        let threads = tree
            .threads
            .iter()
            .map(|thread| ThreadView {
                card: CommentCard::from_comment(&thread.comment, ctx, false),
                replies: thread
                    .replies
                    .iter()
                    .map(|reply| CommentCard::from_comment(reply, ctx, true))
                    .collect(),
            })
            .collect();
        Self { threads }
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Looks up a rendered card, top-level or reply.
    pub fn card(&self, id: CommentId) -> Option<&CommentCard> {
        self.threads
            .iter()
            .flat_map(|t| std::iter::once(&t.card).chain(t.replies.iter()))
            .find(|c| c.id == id)
    }
}
