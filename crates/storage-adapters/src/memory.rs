//! In-memory repository implementations backed by `DashMap`.
//!
//! Used by the test suites and anywhere a database-free assembly of the
//! full stack is useful. Ordering semantics match the Postgres adapters.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use mime::Mime;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use domains::{
    Category, CategoryRepo, Comment, CommentRepo, MediaStore, NewsCategoryLink, NewsItem,
    NewsQuery, NewsRepo, Profile, ProfileRepo, Reaction, ReactionKind, ReactionRepo, Result,
    StoredMedia, User, UserRepo,
};

#[derive(Default)]
pub struct MemoryNewsRepo {
    rows: DashMap<Uuid, NewsItem>,
}

impl MemoryNewsRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsRepo for MemoryNewsRepo {
    async fn insert(&self, item: NewsItem) -> Result<()> {
        self.rows.insert(item.id, item);
        Ok(())
    }

    async fn update(&self, item: NewsItem) -> Result<()> {
        self.rows.insert(item.id, item);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.rows.remove(&id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<NewsItem>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn list(&self, query: NewsQuery) -> Result<Vec<NewsItem>> {
        let mut items: Vec<NewsItem> = self
            .rows
            .iter()
            .map(|r| r.value().clone())
            .filter(|item| !query.published_only || item.published)
            .filter(|item| query.author_id.is_none_or(|a| item.author_id == a))
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            items.truncate(limit as usize);
        }
        Ok(items)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.rows.len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryProfileRepo {
    rows: DashMap<Uuid, Profile>,
}

impl MemoryProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepo for MemoryProfileRepo {
    async fn insert(&self, profile: Profile) -> Result<()> {
        self.rows.insert(profile.id, profile);
        Ok(())
    }

    async fn update(&self, profile: Profile) -> Result<()> {
        self.rows.insert(profile.id, profile);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.rows.remove(&id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Profile>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>> {
        Ok(self
            .rows
            .iter()
            .find(|r| r.username == username)
            .map(|r| r.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        let mut profiles: Vec<Profile> = self.rows.iter().map(|r| r.value().clone()).collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.rows.len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryCategoryRepo {
    rows: DashMap<Uuid, Category>,
    /// Link rows keyed by news id.
    links: DashMap<Uuid, Vec<NewsCategoryLink>>,
}

impl MemoryCategoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepo for MemoryCategoryRepo {
    async fn insert(&self, category: Category) -> Result<()> {
        self.rows.insert(category.id, category);
        Ok(())
    }

    async fn update(&self, category: Category) -> Result<()> {
        self.rows.insert(category.id, category);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.rows.remove(&id);
        for mut linked in self.links.iter_mut() {
            linked.retain(|link| link.category_id != id);
        }
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> = self.rows.iter().map(|r| r.value().clone()).collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_recent(&self) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> = self.rows.iter().map(|r| r.value().clone()).collect();
        categories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(categories)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.rows.len() as u64)
    }

    async fn categories_for(&self, news_id: Uuid) -> Result<Vec<Category>> {
        let links = self
            .links
            .get(&news_id)
            .map(|l| l.value().clone())
            .unwrap_or_default();
        let mut categories: Vec<Category> = links
            .iter()
            .filter_map(|link| self.rows.get(&link.category_id).map(|r| r.value().clone()))
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn replace_links(&self, news_id: Uuid, category_ids: Vec<Uuid>) -> Result<()> {
        let links = category_ids
            .into_iter()
            .map(|category_id| NewsCategoryLink { news_id, category_id })
            .collect();
        self.links.insert(news_id, links);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCommentRepo {
    rows: DashMap<Uuid, Comment>,
}

impl MemoryCommentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(&self, mut comments: Vec<Comment>) -> Vec<Comment> {
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }
}

#[async_trait]
impl CommentRepo for MemoryCommentRepo {
    async fn insert(&self, comment: Comment) -> Result<()> {
        self.rows.insert(comment.id, comment);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.rows.remove(&id);
        Ok(())
    }

    async fn list_for_news(&self, news_id: Uuid) -> Result<Vec<Comment>> {
        let comments = self
            .rows
            .iter()
            .filter(|r| r.news_id == news_id)
            .map(|r| r.value().clone())
            .collect();
        Ok(self.sorted(comments))
    }

    async fn list_recent(&self) -> Result<Vec<Comment>> {
        let comments = self.rows.iter().map(|r| r.value().clone()).collect();
        Ok(self.sorted(comments))
    }

    async fn count_for_news(&self, news_id: Uuid) -> Result<u64> {
        Ok(self.rows.iter().filter(|r| r.news_id == news_id).count() as u64)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.rows.len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryReactionRepo {
    rows: DashMap<Uuid, Reaction>,
}

impl MemoryReactionRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReactionRepo for MemoryReactionRepo {
    async fn insert(&self, reaction: Reaction) -> Result<()> {
        self.rows.insert(reaction.id, reaction);
        Ok(())
    }

    async fn update_kind(&self, id: Uuid, kind: ReactionKind) -> Result<()> {
        if let Some(mut row) = self.rows.get_mut(&id) {
            row.kind = kind;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.rows.remove(&id);
        Ok(())
    }

    async fn find_by_news_and_user(
        &self,
        news_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Reaction>> {
        Ok(self
            .rows
            .iter()
            .find(|r| r.news_id == news_id && r.user_id == user_id)
            .map(|r| r.value().clone()))
    }

    async fn list_for_news(&self, news_id: Uuid) -> Result<Vec<Reaction>> {
        let mut reactions: Vec<Reaction> = self
            .rows
            .iter()
            .filter(|r| r.news_id == news_id)
            .map(|r| r.value().clone())
            .collect();
        reactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reactions)
    }

    async fn list_recent(&self) -> Result<Vec<Reaction>> {
        let mut reactions: Vec<Reaction> = self.rows.iter().map(|r| r.value().clone()).collect();
        reactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reactions)
    }

    async fn count_for_news(&self, news_id: Uuid) -> Result<u64> {
        Ok(self.rows.iter().filter(|r| r.news_id == news_id).count() as u64)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.rows.len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryUserRepo {
    rows: DashMap<Uuid, User>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn insert(&self, user: User) -> Result<()> {
        self.rows.insert(user.id, user);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .rows
            .iter()
            .find(|r| r.email == email)
            .map(|r| r.value().clone()))
    }
}

/// Media store that keeps nothing and hands back content-addressed URLs.
#[derive(Default)]
pub struct MemoryMediaStore;

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn store(&self, data: Bytes, _content_type: Mime) -> Result<StoredMedia> {
        let hash = hex::encode(Sha256::digest(&data));
        Ok(StoredMedia { url: format!("/media/{hash}"), id: hash })
    }
}
