//! # Domain Models
//!
//! Records as the portal backend returns them. Field names are camelCase
//! on the wire; anything the backend may omit is optional here so a
//! partial payload still deserializes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Reads an explicit `null` string the same as a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Backend-issued comment identifier. Only compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the review a comment section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub i64);

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single comment on a review, top-level or reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    #[serde(default)]
    pub author_nickname: Option<String>,
    /// Free text; may contain newlines.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    /// Raw timestamp as sent by the backend (ISO-8601, with or without offset).
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Comment {
    /// The parent reference, with the backend's `0` placeholder read as absent.
    pub fn parent(&self) -> Option<CommentId> {
        self.parent_id.filter(|p| p.0 != 0)
    }
}

/// The review hosting a comment section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub author_nickname: Option<String>,
    /// Review body.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of a create-comment call. `parent_id: None` posts a top-level comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub parent_id: Option<CommentId>,
}

/// An interaction exposed on a rendered comment card.
///
/// The tag returned by [`CommentAction::as_tag`] is what the markup carries
/// in its `data-action` attribute and what the dispatcher routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentAction {
    Reply,
    Edit,
    Delete,
}

impl CommentAction {
    pub fn as_tag(self) -> &'static str {
        match self {
            CommentAction::Reply => "reply",
            CommentAction::Edit => "edit",
            CommentAction::Delete => "delete",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            CommentAction::Reply => "Reply",
            CommentAction::Edit => "Edit",
            CommentAction::Delete => "Delete",
        }
    }
}

impl fmt::Display for CommentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for CommentAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "reply" => Ok(CommentAction::Reply),
            "edit" => Ok(CommentAction::Edit),
            "delete" => Ok(CommentAction::Delete),
            other => Err(DomainError::UnknownAction(other.to_string())),
        }
    }
}
