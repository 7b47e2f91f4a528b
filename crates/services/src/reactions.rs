//! # Reaction engine
//!
//! One reaction per (news item, user), with toggle-or-switch semantics:
//! re-selecting the current kind clears it, selecting the other kind
//! updates the existing row in place, and a fresh reaction is inserted only
//! when none exists.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::{
    DomainError, Reaction, ReactionChange, ReactionKind, ReactionRepo, Result, Session,
};

#[derive(Clone)]
pub struct ReactionService {
    reactions: Arc<dyn ReactionRepo>,
}

impl ReactionService {
    pub fn new(reactions: Arc<dyn ReactionRepo>) -> Self {
        Self { reactions }
    }

    /// Applies one reaction press for the viewer.
    ///
    /// An unauthenticated viewer is rejected before any repository call is
    /// made. The existing-reaction lookup and the following mutation are
    /// not atomic against the same user reacting from another session;
    /// last write wins, bounded to a single row by the unique
    /// (news_id, user_id) index.
    ///
    /// The returned [`ReactionChange`] describes a mutation that has
    /// already been confirmed — callers merge it into their
    /// [`domains::EngagementState`] afterwards, so a failed mutation leaves
    /// their state untouched.
    pub async fn react(
        &self,
        viewer: Option<&Session>,
        news_id: Uuid,
        kind: ReactionKind,
    ) -> Result<ReactionChange> {
        let viewer = viewer.ok_or_else(|| {
            DomainError::Unauthorized("sign in to react to news".into())
        })?;

        let existing = self
            .reactions
            .find_by_news_and_user(news_id, viewer.user_id)
            .await?;

        match existing {
            Some(reaction) if reaction.kind == kind => {
                // Toggle off
                self.reactions.delete(reaction.id).await?;
                tracing::debug!(%news_id, user_id = %viewer.user_id, kind = kind.as_str(), "reaction removed");
                Ok(ReactionChange { previous: Some(kind), current: None })
            }
            Some(reaction) => {
                // Switch kind in place
                self.reactions.update_kind(reaction.id, kind).await?;
                tracing::debug!(%news_id, user_id = %viewer.user_id, kind = kind.as_str(), "reaction switched");
                Ok(ReactionChange { previous: Some(reaction.kind), current: Some(kind) })
            }
            None => {
                let reaction = Reaction {
                    id: Uuid::new_v4(),
                    news_id,
                    user_id: viewer.user_id,
                    kind,
                    created_at: Utc::now(),
                };
                self.reactions.insert(reaction).await?;
                tracing::debug!(%news_id, user_id = %viewer.user_id, kind = kind.as_str(), "reaction added");
                Ok(ReactionChange { previous: None, current: Some(kind) })
            }
        }
    }
}
