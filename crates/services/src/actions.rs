//! Routing of card actions to handlers.
//!
//! Rendered cards carry a `data-action` tag per control. The host wires a
//! single listener for the section and hands the tag plus the card's
//! comment id to [`ActionDispatcher::dispatch`].

use std::collections::HashMap;
use std::fmt;

use domains::{CommentAction, CommentId, DomainError, Result};
use tracing::debug;

use crate::render::CommentCard;

type Handler<C> = Box<dyn Fn(&mut C, CommentId) -> Result<()> + Send + Sync>;

/// Table from action to handler, generic over the caller's context `C`.
pub struct ActionDispatcher<C> {
    handlers: HashMap<CommentAction, Handler<C>>,
}

impl<C> Default for ActionDispatcher<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> fmt::Debug for ActionDispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("actions", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<C> ActionDispatcher<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`register`](Self::register).
    pub fn on<F>(mut self, action: CommentAction, handler: F) -> Self
    where
        F: Fn(&mut C, CommentId) -> Result<()> + Send + Sync + 'static,
    {
        self.register(action, handler);
        self
    }

    /// Installs `handler` for `action`, replacing any previous one.
    pub fn register<F>(&mut self, action: CommentAction, handler: F)
    where
        F: Fn(&mut C, CommentId) -> Result<()> + Send + Sync + 'static,
    {
        self.handlers.insert(action, Box::new(handler));
    }

    pub fn handles(&self, action: CommentAction) -> bool {
        self.handlers.contains_key(&action)
    }

    /// Parses `tag` and runs its handler.
    pub fn dispatch(&self, tag: &str, id: CommentId, ctx: &mut C) -> Result<()> {
        let action: CommentAction = tag.parse()?;
        self.dispatch_action(action, id, ctx)
    }

    pub fn dispatch_action(&self, action: CommentAction, id: CommentId, ctx: &mut C) -> Result<()> {
        let handler = self
            .handlers
            .get(&action)
            .ok_or(DomainError::Unhandled(action))?;
        debug!(%action, comment_id = %id, "dispatching comment action");
        handler(ctx, id)
    }

    /// Like [`dispatch`](Self::dispatch), but refuses actions the card does
    /// not expose (e.g. replying to a reply, editing someone else's comment).
    pub fn dispatch_on_card(&self, card: &CommentCard, tag: &str, ctx: &mut C) -> Result<()> {
        let action: CommentAction = tag.parse()?;
        if !card.allows(action) {
            return Err(DomainError::Unauthorized(format!(
                "{action} is not available on comment {}",
                card.id
            )));
        }
        self.dispatch_action(action, card.id, ctx)
    }
}
