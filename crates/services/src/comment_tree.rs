//! Threading of a flat comment listing into two levels.
//!
//! The backend returns every comment of a review in one flat list, in
//! creation order. The UI shows top-level comments with their replies
//! nested one level below, so the list is regrouped here:
//!
//! - a comment whose parent is absent, unknown, or itself is top-level;
//! - any other comment is a reply, filed under the top-level comment its
//!   parent chain ends at (chains deeper than one level are flattened);
//! - comments on a parent cycle have no such ancestor and are top-level.
//!
//! Input order is preserved at both levels and nothing is dropped.

use std::collections::HashMap;

use domains::{Comment, CommentId};
use serde::Serialize;
use tracing::debug;

/// Two-level view of a review's comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentTree {
    pub threads: Vec<CommentThread>,
}

/// A top-level comment and its replies, both in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

impl CommentTree {
    /// Total number of comments, top-level and replies.
    pub fn len(&self) -> usize {
        self.threads.iter().map(|t| 1 + t.replies.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    pub fn top_level_ids(&self) -> Vec<CommentId> {
        self.threads.iter().map(|t| t.comment.id).collect()
    }

    /// Replies filed under the top-level comment `id`, if it is top-level.
    pub fn replies_to(&self, id: CommentId) -> Option<&[Comment]> {
        self.threads
            .iter()
            .find(|t| t.comment.id == id)
            .map(|t| t.replies.as_slice())
    }

    pub fn find(&self, id: CommentId) -> Option<&Comment> {
        self.threads
            .iter()
            .flat_map(|t| std::iter::once(&t.comment).chain(t.replies.iter()))
            .find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Copy)]
enum Root {
    Pending,
    Visiting,
    At(usize),
}

/// Groups a flat comment listing into top-level threads.
///
/// Never fails. When two comments share an id, references to that id
/// resolve to the later one.
pub fn build_tree<I>(comments: I) -> CommentTree
where
    I: IntoIterator<Item = Comment>,
{
    let comments: Vec<Comment> = comments.into_iter().collect();

    let index: HashMap<CommentId, usize> = comments
        .iter()
        .enumerate()
        .map(|(pos, c)| (c.id, pos))
        .collect();

    let parent_of: Vec<Option<usize>> = comments
        .iter()
        .map(|c| {
            c.parent()
                .filter(|p| *p != c.id)
                .and_then(|p| index.get(&p).copied())
        })
        .collect();

    let roots = resolve_roots(&parent_of);

    let mut threads: Vec<CommentThread> = Vec::new();
    let mut thread_at: HashMap<usize, usize> = HashMap::new();
    let mut replies: Vec<(usize, Comment)> = Vec::new();
    let mut orphans = 0usize;
    let mut flattened = 0usize;

    for (pos, comment) in comments.into_iter().enumerate() {
        let root = roots[pos];
        if root == pos {
            if comment.parent().is_some() {
                orphans += 1;
            }
            thread_at.insert(pos, threads.len());
            threads.push(CommentThread {
                comment,
                replies: Vec::new(),
            });
        } else {
            if parent_of[pos] != Some(root) {
                flattened += 1;
            }
            replies.push((root, comment));
        }
    }

    let reply_count = replies.len();
    for (root, reply) in replies {
        // root always names a top-level position
        if let Some(&slot) = thread_at.get(&root) {
            threads[slot].replies.push(reply);
        }
    }

    debug!(
        top_level = threads.len(),
        replies = reply_count,
        orphans,
        flattened,
        "built comment tree"
    );

    CommentTree { threads }
}

/// For every position, the position of the top-level comment it files under.
fn resolve_roots(parent_of: &[Option<usize>]) -> Vec<usize> {
    let mut state = vec![Root::Pending; parent_of.len()];

    for start in 0..parent_of.len() {
        let mut path = Vec::new();
        let mut cur = start;
        let root = loop {
            let current = state[cur];
            match current {
                Root::At(root) => break root,
                Root::Visiting => {
                    // cur closes a cycle: its members become top-level
                    let entry = path.iter().position(|&p| p == cur).unwrap_or(0);
                    for &member in &path[entry..] {
                        state[member] = Root::At(member);
                    }
                    path.truncate(entry);
                    break cur;
                }
                Root::Pending => match parent_of[cur] {
                    None => {
                        state[cur] = Root::At(cur);
                        break cur;
                    }
                    Some(parent) => {
                        state[cur] = Root::Visiting;
                        path.push(cur);
                        cur = parent;
                    }
                },
            }
        };
        for pos in path {
            state[pos] = Root::At(root);
        }
    }

    state
        .into_iter()
        .enumerate()
        .map(|(pos, s)| match s {
            Root::At(root) => root,
            Root::Pending | Root::Visiting => pos,
        })
        .collect()
}
