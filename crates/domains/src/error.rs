//! # DomainError
//!
//! Centralized error handling for the review comment section.
//! Tree building never fails; these cover the backend round-trips and
//! user-triggered actions around it.

use thiserror::Error;

use crate::models::CommentAction;

/// The primary error type for all comment-section operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Resource not found (e.g., Review, Comment)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty comment body)
    #[error("validation error: {0}")]
    Validation(String),

    /// The backend refused the caller (missing or foreign token)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Transport failure, unexpected status, or undecodable payload
    #[error("upstream error: {0}")]
    Upstream(String),

    /// A `data-action` tag that no action corresponds to
    #[error("unknown comment action: {0:?}")]
    UnknownAction(String),

    /// A known action with no handler registered
    #[error("no handler registered for action {0}")]
    Unhandled(CommentAction),
}

/// A specialized Result type for comment-section logic.
pub type Result<T> = std::result::Result<T, DomainError>;
