//! # Ports
//!
//! Contracts every adapter must implement. Services only ever talk to these
//! traits; per-call failure is reported through [`crate::Result`] and must
//! be tolerated by the read side without crashing an aggregation.

use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;
use uuid::Uuid;

use crate::models::{
    Category, Comment, NewsItem, Profile, Reaction, ReactionKind, Session, User,
};
use crate::Result;

/// Filter for news selection. Results are always ordered by creation time
/// descending.
#[derive(Debug, Clone, Default)]
pub struct NewsQuery {
    pub published_only: bool,
    pub author_id: Option<Uuid>,
    pub limit: Option<i64>,
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait NewsRepo: Send + Sync {
    async fn insert(&self, item: NewsItem) -> Result<()>;
    /// Replaces the full mutable field set of an existing item.
    async fn update(&self, item: NewsItem) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn find(&self, id: Uuid) -> Result<Option<NewsItem>>;
    async fn list(&self, query: NewsQuery) -> Result<Vec<NewsItem>>;
    async fn count(&self) -> Result<u64>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    async fn insert(&self, profile: Profile) -> Result<()>;
    async fn update(&self, profile: Profile) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn find(&self, id: Uuid) -> Result<Option<Profile>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>>;
    /// Creation time descending.
    async fn list(&self) -> Result<Vec<Profile>>;
    async fn count(&self) -> Result<u64>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CategoryRepo: Send + Sync {
    async fn insert(&self, category: Category) -> Result<()>;
    async fn update(&self, category: Category) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn find(&self, id: Uuid) -> Result<Option<Category>>;
    /// Alphabetical by name — the public sidebar order.
    async fn list(&self) -> Result<Vec<Category>>;
    /// Creation time descending — the admin table order.
    async fn list_recent(&self) -> Result<Vec<Category>>;
    async fn count(&self) -> Result<u64>;

    /// Categories linked to one news item.
    async fn categories_for(&self, news_id: Uuid) -> Result<Vec<Category>>;
    /// Replaces the whole link set for a news item in one atomic step:
    /// existing links are removed and the given set inserted.
    async fn replace_links(&self, news_id: Uuid, category_ids: Vec<Uuid>) -> Result<()>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn insert(&self, comment: Comment) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    /// Creation time descending.
    async fn list_for_news(&self, news_id: Uuid) -> Result<Vec<Comment>>;
    /// Creation time descending, across all news items.
    async fn list_recent(&self) -> Result<Vec<Comment>>;
    async fn count_for_news(&self, news_id: Uuid) -> Result<u64>;
    async fn count(&self) -> Result<u64>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReactionRepo: Send + Sync {
    async fn insert(&self, reaction: Reaction) -> Result<()>;
    async fn update_kind(&self, id: Uuid, kind: ReactionKind) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    /// The at-most-one reaction of a user on a news item.
    async fn find_by_news_and_user(&self, news_id: Uuid, user_id: Uuid)
        -> Result<Option<Reaction>>;
    async fn list_for_news(&self, news_id: Uuid) -> Result<Vec<Reaction>>;
    /// Creation time descending, across all news items.
    async fn list_recent(&self) -> Result<Vec<Reaction>>;
    async fn count_for_news(&self, news_id: Uuid) -> Result<u64>;
    async fn count(&self) -> Result<u64>;
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: User) -> Result<()>;
    async fn find(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// A stored media object and where the public can fetch it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredMedia {
    pub id: String,
    pub url: String,
}

/// Media storage contract: upload raw bytes, get back a public URL.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, data: Bytes, content_type: Mime) -> Result<StoredMedia>;
}

/// Session token contract: issue an opaque serialized token for a signed-in
/// account and verify one back into an identity. Verification rejects stale
/// tokens — expiry is enforced here, never by the cookie reader.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SessionTokens: Send + Sync {
    fn issue(&self, user: &User, username: &str) -> Result<String>;
    fn verify(&self, token: &str) -> Result<Session>;
}

/// Password hashing contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String>;
    fn verify(&self, plain: &str, hash: &str) -> bool;
}
