//! # Domain Models
//!
//! These structs represent the core entities of Vestnik.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. Assigned once at registration (`User` by default) and
/// only ever read afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Public identity of an account. Shares its id with the owning [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    /// Unique display handle
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A published (or draft) news item. Owned by its author; mutable and
/// deletable by the author or an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    /// Rich-text body
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub author_id: Uuid,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// News rubric. Admin-owned lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// URL-safe unique identifier (e.g. "politika")
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Many-to-many association between news items and categories. On edit the
/// whole link set for a news item is replaced, not diffed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCategoryLink {
    pub news_id: Uuid,
    pub category_id: Uuid,
}

/// Reader comment. Append-only from the public surface; admins may delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub news_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// The two reaction kinds, mutually exclusive per (news item, user).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

/// A reader's reaction to a news item.
///
/// Invariant: at most one row per (news_id, user_id) pair. The unique index
/// backs the toggle-or-switch engine in the services crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    pub id: Uuid,
    pub news_id: Uuid,
    pub user_id: Uuid,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

/// The authenticated identity resolved from a session token, carried
/// through request extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&ReactionKind::Dislike).unwrap(), "\"dislike\"");
    }

    #[test]
    fn user_never_serializes_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.ru".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::User,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
