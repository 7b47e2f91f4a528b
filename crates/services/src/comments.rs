//! # Comments
//!
//! Append-only from the public surface; the admin surface owns deletion.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use uuid::Uuid;

use domains::{
    Comment, CommentRepo, CommentWithAuthor, DomainError, ProfileRepo, ResolvedAuthor, Result,
    Session,
};

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepo>,
    profiles: Arc<dyn ProfileRepo>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepo>, profiles: Arc<dyn ProfileRepo>) -> Self {
        Self { comments, profiles }
    }

    /// Comments for one news item, newest first, each with its author's
    /// profile resolved. A failed profile lookup degrades to the placeholder
    /// author; the comment list itself failing is fatal.
    pub async fn list_for_news(&self, news_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        let comments = self.comments.list_for_news(news_id).await?;
        let authors = join_all(comments.iter().map(|c| self.resolve_author(c.author_id))).await;
        Ok(comments
            .into_iter()
            .zip(authors)
            .map(|(comment, author)| CommentWithAuthor { comment, author })
            .collect())
    }

    /// Appends a comment. Requires an authenticated viewer; rejected before
    /// any repository call otherwise. The caller merges the confirmed
    /// insert into its engagement counters.
    pub async fn submit(
        &self,
        viewer: Option<&Session>,
        news_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        let viewer = viewer.ok_or_else(|| {
            DomainError::Unauthorized("sign in to leave a comment".into())
        })?;

        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation("comment text is required".into()));
        }

        let comment = Comment {
            id: Uuid::new_v4(),
            news_id,
            author_id: viewer.user_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.comments.insert(comment.clone()).await?;
        tracing::debug!(%news_id, author_id = %viewer.user_id, "comment added");
        Ok(comment)
    }

    async fn resolve_author(&self, author_id: Uuid) -> ResolvedAuthor {
        match self.profiles.find(author_id).await {
            Ok(Some(profile)) => ResolvedAuthor {
                username: profile.username,
                avatar_url: profile.avatar_url,
            },
            Ok(None) => ResolvedAuthor::unknown(),
            Err(err) => {
                tracing::warn!(%author_id, %err, "commenter profile fetch failed");
                ResolvedAuthor::unknown()
            }
        }
    }
}
