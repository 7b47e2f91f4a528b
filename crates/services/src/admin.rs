//! # Admin surface
//!
//! Per-entity list / edit / delete for the five administered relations.
//! The role check happens here on every call — the route guard upstream is
//! a convenience, not the boundary.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use domains::{
    Category, CategoryRepo, Comment, CommentRepo, DomainError, NewsItem, NewsQuery,
    NewsWithDetails, Profile, ProfileRepo, Reaction, ReactionRepo, Result, Session,
};

use crate::feed::FeedService;
use crate::news::{NewsDraft, NewsService};

/// Entity counts for the dashboard header, fetched concurrently.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Stats {
    pub news: u64,
    pub categories: u64,
    pub profiles: u64,
    pub comments: u64,
    pub reactions: u64,
}

/// The full mutable field set of a category.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
}

/// The full mutable field set of a profile.
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
}

#[derive(Clone)]
pub struct AdminService {
    feed: FeedService,
    news_service: NewsService,
    news: Arc<dyn domains::NewsRepo>,
    categories: Arc<dyn CategoryRepo>,
    profiles: Arc<dyn ProfileRepo>,
    comments: Arc<dyn CommentRepo>,
    reactions: Arc<dyn ReactionRepo>,
}

impl AdminService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        feed: FeedService,
        news_service: NewsService,
        news: Arc<dyn domains::NewsRepo>,
        categories: Arc<dyn CategoryRepo>,
        profiles: Arc<dyn ProfileRepo>,
        comments: Arc<dyn CommentRepo>,
        reactions: Arc<dyn ReactionRepo>,
    ) -> Self {
        Self { feed, news_service, news, categories, profiles, comments, reactions }
    }

    pub async fn stats(&self, actor: &Session) -> Result<Stats> {
        require_admin(actor)?;
        let (news, categories, profiles, comments, reactions) = futures_util::join!(
            self.news.count(),
            self.categories.count(),
            self.profiles.count(),
            self.comments.count(),
            self.reactions.count(),
        );
        Ok(Stats {
            news: news?,
            categories: categories?,
            profiles: profiles?,
            comments: comments?,
            reactions: reactions?,
        })
    }

    /// All news items, drafts included, with details resolved.
    pub async fn list_news(&self, actor: &Session) -> Result<Vec<NewsWithDetails>> {
        require_admin(actor)?;
        self.feed.fetch(NewsQuery::default()).await
    }

    pub async fn list_categories(&self, actor: &Session) -> Result<Vec<Category>> {
        require_admin(actor)?;
        self.categories.list_recent().await
    }

    pub async fn list_profiles(&self, actor: &Session) -> Result<Vec<Profile>> {
        require_admin(actor)?;
        self.profiles.list().await
    }

    pub async fn list_comments(&self, actor: &Session) -> Result<Vec<Comment>> {
        require_admin(actor)?;
        self.comments.list_recent().await
    }

    pub async fn list_reactions(&self, actor: &Session) -> Result<Vec<Reaction>> {
        require_admin(actor)?;
        self.reactions.list_recent().await
    }

    pub async fn update_news(
        &self,
        actor: &Session,
        id: Uuid,
        draft: NewsDraft,
    ) -> Result<NewsItem> {
        require_admin(actor)?;
        self.news_service.update(actor, id, draft).await
    }

    pub async fn create_category(&self, actor: &Session, draft: CategoryDraft) -> Result<Category> {
        require_admin(actor)?;
        validate_category(&draft)?;
        let category = Category {
            id: Uuid::new_v4(),
            name: draft.name,
            slug: draft.slug,
            created_at: Utc::now(),
        };
        self.categories.insert(category.clone()).await?;
        Ok(category)
    }

    pub async fn update_category(
        &self,
        actor: &Session,
        id: Uuid,
        draft: CategoryDraft,
    ) -> Result<Category> {
        require_admin(actor)?;
        validate_category(&draft)?;
        let mut category = self
            .categories
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("category", id))?;
        category.name = draft.name;
        category.slug = draft.slug;
        self.categories.update(category.clone()).await?;
        Ok(category)
    }

    pub async fn update_profile(
        &self,
        actor: &Session,
        id: Uuid,
        draft: ProfileDraft,
    ) -> Result<Profile> {
        require_admin(actor)?;
        let mut profile = self
            .profiles
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("profile", id))?;
        if let Some(taken) = self.profiles.find_by_username(&draft.username).await? {
            if taken.id != id {
                return Err(DomainError::Conflict("username is already taken".into()));
            }
        }
        profile.username = draft.username;
        profile.full_name = draft.full_name;
        profile.avatar_url = draft.avatar_url;
        profile.website = draft.website;
        self.profiles.update(profile.clone()).await?;
        Ok(profile)
    }

    pub async fn delete_news(&self, actor: &Session, id: Uuid) -> Result<()> {
        require_admin(actor)?;
        self.news_service.delete(actor, id).await
    }

    pub async fn delete_category(&self, actor: &Session, id: Uuid) -> Result<()> {
        require_admin(actor)?;
        self.categories.delete(id).await
    }

    pub async fn delete_profile(&self, actor: &Session, id: Uuid) -> Result<()> {
        require_admin(actor)?;
        self.profiles.delete(id).await
    }

    pub async fn delete_comment(&self, actor: &Session, id: Uuid) -> Result<()> {
        require_admin(actor)?;
        self.comments.delete(id).await
    }

    pub async fn delete_reaction(&self, actor: &Session, id: Uuid) -> Result<()> {
        require_admin(actor)?;
        self.reactions.delete(id).await
    }
}

fn require_admin(actor: &Session) -> Result<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(DomainError::Forbidden("admin role required".into()))
    }
}

fn validate_category(draft: &CategoryDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(DomainError::Validation("category name is required".into()));
    }
    let slug_ok = !draft.slug.is_empty()
        && draft
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !slug_ok {
        return Err(DomainError::Validation(
            "slug must contain only lowercase latin letters, digits and dashes".into(),
        ));
    }
    Ok(())
}

/// Rows with an identity, as shown in an admin table.
pub trait HasId {
    fn id(&self) -> Uuid;
}

impl HasId for NewsItem {
    fn id(&self) -> Uuid {
        self.id
    }
}
impl HasId for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}
impl HasId for Profile {
    fn id(&self) -> Uuid {
        self.id
    }
}
impl HasId for Comment {
    fn id(&self) -> Uuid {
        self.id
    }
}
impl HasId for Reaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Local list state of one admin tab. A delete that succeeds removes
/// exactly the deleted id from the rows without re-fetching; a delete that
/// fails leaves the rows untouched and surfaces the error.
#[derive(Debug, Clone, Default)]
pub struct AdminTable<T> {
    rows: Vec<T>,
}

impl<T: HasId> AdminTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Runs the delete operation for `id` and, only on success, drops the
    /// matching row from the local state.
    pub async fn delete_with<F, Fut>(&mut self, id: Uuid, delete: F) -> Result<()>
    where
        F: FnOnce(Uuid) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        delete(id).await?;
        self.rows.retain(|row| row.id() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{news_item, session};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn table_delete_removes_exactly_that_id_with_one_call() {
        let keep = news_item("остаётся");
        let gone = news_item("удаляется");
        let gone_id = gone.id;
        let mut table = AdminTable::new(vec![keep.clone(), gone]);

        let calls = AtomicUsize::new(0);
        table
            .delete_with(gone_id, |_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0].id, keep.id);
    }

    #[tokio::test]
    async fn failed_delete_leaves_rows_unchanged() {
        let a = news_item("a");
        let b = news_item("b");
        let b_id = b.id;
        let mut table = AdminTable::new(vec![a, b]);

        let err = table
            .delete_with(b_id, |_| async {
                Err(DomainError::Backend("delete failed".into()))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Backend(_)));
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn non_admin_is_rejected() {
        let err = require_admin(&session()).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn slug_validation() {
        assert!(validate_category(&CategoryDraft { name: "Спорт".into(), slug: "sport".into() }).is_ok());
        assert!(validate_category(&CategoryDraft { name: "Спорт".into(), slug: "Sport!".into() }).is_err());
        assert!(validate_category(&CategoryDraft { name: " ".into(), slug: "sport".into() }).is_err());
    }
}
