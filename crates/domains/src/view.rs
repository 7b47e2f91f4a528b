//! # View Models
//!
//! Derived, never-persisted aggregates the read side hands to clients.
//! Rebuilt fresh on every request; there is no caching between requests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Comment, NewsItem, Reaction, ReactionKind};

/// Author identity as resolved for display. A failed profile lookup
/// degrades to [`ResolvedAuthor::unknown`] instead of failing the whole
/// aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAuthor {
    pub username: String,
    pub avatar_url: Option<String>,
}

impl ResolvedAuthor {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn unknown() -> Self {
        Self {
            username: Self::UNKNOWN.to_string(),
            avatar_url: None,
        }
    }
}

/// A category as attached to a news item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

/// One news item with its author, categories and engagement counts
/// resolved — the unit the feed renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsWithDetails {
    #[serde(flatten)]
    pub news: NewsItem,
    pub author: ResolvedAuthor,
    pub categories: Vec<CategoryRef>,
    pub comment_count: u64,
    pub reaction_count: u64,
}

impl NewsWithDetails {
    pub fn has_category(&self, category_id: Uuid) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }
}

/// A comment with its author's profile resolved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: ResolvedAuthor,
}

/// Everything the news detail page needs in one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDetail {
    #[serde(flatten)]
    pub news: NewsItem,
    pub author: ResolvedAuthor,
    pub categories: Vec<CategoryRef>,
    pub comments: Vec<CommentWithAuthor>,
    pub engagement: EngagementState,
}

/// The net effect of one reaction mutation: which kind the viewer had
/// before, which they have now. Produced by the reaction engine only after
/// the backing mutation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionChange {
    pub previous: Option<ReactionKind>,
    pub current: Option<ReactionKind>,
}

/// Per-(news item, viewer) engagement counters plus the viewer's own
/// reaction. Mutated only through [`EngagementState::apply`] and
/// [`EngagementState::note_comment`], and only after the corresponding
/// backend mutation was confirmed — a failed mutation leaves the state
/// exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementState {
    pub likes: u64,
    pub dislikes: u64,
    pub comments: u64,
    pub viewer_reaction: Option<ReactionKind>,
}

impl EngagementState {
    /// Builds the state from raw reaction rows and a comment count.
    pub fn from_rows(reactions: &[Reaction], comments: u64, viewer: Option<Uuid>) -> Self {
        let likes = reactions.iter().filter(|r| r.kind == ReactionKind::Like).count() as u64;
        let dislikes = reactions.len() as u64 - likes;
        let viewer_reaction =
            viewer.and_then(|id| reactions.iter().find(|r| r.user_id == id).map(|r| r.kind));
        Self { likes, dislikes, comments, viewer_reaction }
    }

    /// Merges a confirmed reaction mutation into the counters.
    pub fn apply(&mut self, change: ReactionChange) {
        match change.previous {
            Some(ReactionKind::Like) => self.likes = self.likes.saturating_sub(1),
            Some(ReactionKind::Dislike) => self.dislikes = self.dislikes.saturating_sub(1),
            None => {}
        }
        match change.current {
            Some(ReactionKind::Like) => self.likes += 1,
            Some(ReactionKind::Dislike) => self.dislikes += 1,
            None => {}
        }
        self.viewer_reaction = change.current;
    }

    /// Merges a confirmed comment insert.
    pub fn note_comment(&mut self) {
        self.comments += 1;
    }
}
