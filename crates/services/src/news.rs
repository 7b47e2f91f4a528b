//! # News authoring
//!
//! Create, edit and delete news items, including the category link set.
//! Ownership is enforced here: only the author or an admin may touch an
//! item, regardless of what the route guard already checked.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use domains::{
    CategoryRepo, DomainError, NewsItem, NewsRepo, NewsWithDetails, Result, Session,
};

/// The full mutable field set of a news item, as submitted by the editor
/// form. Edits replace every field, they do not patch.
#[derive(Debug, Clone)]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub category_ids: Vec<Uuid>,
    pub published: bool,
}

/// In-memory search over an author's own items: title substring
/// (case-insensitive) and exact creation date, both optional.
#[derive(Debug, Clone, Default)]
pub struct MyNewsSearch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct NewsService {
    news: Arc<dyn NewsRepo>,
    categories: Arc<dyn CategoryRepo>,
}

impl NewsService {
    pub fn new(news: Arc<dyn NewsRepo>, categories: Arc<dyn CategoryRepo>) -> Self {
        Self { news, categories }
    }

    pub async fn create(&self, author: &Session, draft: NewsDraft) -> Result<NewsItem> {
        validate(&draft)?;
        let now = Utc::now();
        let item = NewsItem {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            image_url: draft.image_url,
            video_url: draft.video_url,
            author_id: author.user_id,
            published: draft.published,
            created_at: now,
            updated_at: now,
        };
        self.news.insert(item.clone()).await?;
        self.categories.replace_links(item.id, draft.category_ids).await?;
        tracing::info!(news_id = %item.id, author_id = %author.user_id, "news created");
        Ok(item)
    }

    /// Replaces the full mutable field set and the whole category link set
    /// of an existing item.
    pub async fn update(&self, actor: &Session, id: Uuid, draft: NewsDraft) -> Result<NewsItem> {
        validate(&draft)?;
        let mut item = self.owned_item(actor, id).await?;

        item.title = draft.title;
        item.content = draft.content;
        item.image_url = draft.image_url;
        item.video_url = draft.video_url;
        item.published = draft.published;
        item.updated_at = Utc::now();

        self.news.update(item.clone()).await?;
        self.categories.replace_links(id, draft.category_ids).await?;
        tracing::info!(news_id = %id, actor_id = %actor.user_id, "news updated");
        Ok(item)
    }

    pub async fn delete(&self, actor: &Session, id: Uuid) -> Result<()> {
        self.owned_item(actor, id).await?;
        self.news.delete(id).await?;
        tracing::info!(news_id = %id, actor_id = %actor.user_id, "news deleted");
        Ok(())
    }

    async fn owned_item(&self, actor: &Session, id: Uuid) -> Result<NewsItem> {
        let item = self
            .news
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("news", id))?;
        if item.author_id != actor.user_id && !actor.is_admin() {
            return Err(DomainError::Forbidden("only the author or an admin may edit this news".into()));
        }
        Ok(item)
    }
}

/// Narrows an author's aggregated list by the search form's criteria.
pub fn filter_my_news(
    items: Vec<NewsWithDetails>,
    search: &MyNewsSearch,
) -> Vec<NewsWithDetails> {
    let needle = search.title.as_deref().map(str::to_lowercase);
    items
        .into_iter()
        .filter(|item| {
            let title_match = needle
                .as_deref()
                .is_none_or(|n| item.news.title.to_lowercase().contains(n));
            let date_match = search
                .date
                .is_none_or(|d| item.news.created_at.date_naive() == d);
            title_match && date_match
        })
        .collect()
}

fn validate(draft: &NewsDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(DomainError::Validation("title is required".into()));
    }
    if draft.content.trim().is_empty() {
        return Err(DomainError::Validation("content is required".into()));
    }
    Ok(())
}
