//! # Feed aggregation
//!
//! Builds the denormalized view models the clients render: a base news
//! selection plus, per row, the resolved author, category set and
//! engagement counts.

use std::sync::Arc;

use futures_util::future::join_all;
use uuid::Uuid;

use domains::{
    CategoryRef, CategoryRepo, CommentRepo, CommentWithAuthor, DomainError, EngagementState,
    NewsDetail, NewsItem, NewsQuery, NewsRepo, NewsWithDetails, ProfileRepo, ReactionRepo,
    ResolvedAuthor, Result, Session,
};

/// Read-side aggregator over the repositories.
///
/// A failed base query is fatal for the call; failed per-row resolution
/// degrades to placeholders instead of aborting the aggregation.
#[derive(Clone)]
pub struct FeedService {
    news: Arc<dyn NewsRepo>,
    profiles: Arc<dyn ProfileRepo>,
    categories: Arc<dyn CategoryRepo>,
    comments: Arc<dyn CommentRepo>,
    reactions: Arc<dyn ReactionRepo>,
}

impl FeedService {
    pub fn new(
        news: Arc<dyn NewsRepo>,
        profiles: Arc<dyn ProfileRepo>,
        categories: Arc<dyn CategoryRepo>,
        comments: Arc<dyn CommentRepo>,
        reactions: Arc<dyn ReactionRepo>,
    ) -> Self {
        Self { news, profiles, categories, comments, reactions }
    }

    /// Fetches the base rows and resolves every row's details concurrently.
    ///
    /// The output preserves the base query's creation-time-descending order:
    /// rows are fanned out and reassembled by index, never by completion
    /// order.
    pub async fn fetch(&self, query: NewsQuery) -> Result<Vec<NewsWithDetails>> {
        let rows = self.news.list(query).await?;
        Ok(join_all(rows.into_iter().map(|row| self.resolve(row))).await)
    }

    /// Everything the detail page needs for one news item.
    ///
    /// Unpublished items are visible only to their author and to admins;
    /// for everyone else they do not exist.
    pub async fn detail(&self, id: Uuid, viewer: Option<&Session>) -> Result<NewsDetail> {
        let news = self
            .news
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("news", id))?;

        let visible = news.published
            || viewer.is_some_and(|s| s.is_admin() || s.user_id == news.author_id);
        if !visible {
            return Err(DomainError::not_found("news", id));
        }

        let (author, categories, comments, reactions) = futures_util::join!(
            self.resolve_author(news.author_id),
            self.resolve_categories(news.id),
            self.comments.list_for_news(news.id),
            self.reactions.list_for_news(news.id),
        );
        let comments = comments?;
        let reactions = reactions?;

        let comment_authors =
            join_all(comments.iter().map(|c| self.resolve_author(c.author_id))).await;
        let comments: Vec<CommentWithAuthor> = comments
            .into_iter()
            .zip(comment_authors)
            .map(|(comment, author)| CommentWithAuthor { comment, author })
            .collect();

        let engagement = EngagementState::from_rows(
            &reactions,
            comments.len() as u64,
            viewer.map(|s| s.user_id),
        );

        Ok(NewsDetail { news, author, categories, comments, engagement })
    }

    async fn resolve(&self, news: NewsItem) -> NewsWithDetails {
        let (author, categories, comment_count, reaction_count) = futures_util::join!(
            self.resolve_author(news.author_id),
            self.resolve_categories(news.id),
            self.resolve_comment_count(news.id),
            self.resolve_reaction_count(news.id),
        );
        NewsWithDetails { news, author, categories, comment_count, reaction_count }
    }

    async fn resolve_author(&self, author_id: Uuid) -> ResolvedAuthor {
        match self.profiles.find(author_id).await {
            Ok(Some(profile)) => ResolvedAuthor {
                username: profile.username,
                avatar_url: profile.avatar_url,
            },
            Ok(None) => ResolvedAuthor::unknown(),
            Err(err) => {
                tracing::warn!(%author_id, %err, "profile resolution failed, using placeholder");
                ResolvedAuthor::unknown()
            }
        }
    }

    async fn resolve_categories(&self, news_id: Uuid) -> Vec<CategoryRef> {
        match self.categories.categories_for(news_id).await {
            Ok(categories) => categories
                .into_iter()
                .map(|c| CategoryRef { id: c.id, name: c.name })
                .collect(),
            Err(err) => {
                tracing::warn!(%news_id, %err, "category resolution failed, using empty set");
                Vec::new()
            }
        }
    }

    async fn resolve_comment_count(&self, news_id: Uuid) -> u64 {
        self.comments.count_for_news(news_id).await.unwrap_or_else(|err| {
            tracing::warn!(%news_id, %err, "comment count failed, using zero");
            0
        })
    }

    async fn resolve_reaction_count(&self, news_id: Uuid) -> u64 {
        self.reactions.count_for_news(news_id).await.unwrap_or_else(|err| {
            tracing::warn!(%news_id, %err, "reaction count failed, using zero");
            0
        })
    }
}
