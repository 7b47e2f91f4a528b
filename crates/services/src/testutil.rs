//! Shared fixtures for the service unit tests.

use chrono::Utc;
use uuid::Uuid;

use domains::{
    CategoryRef, NewsItem, NewsWithDetails, Profile, ResolvedAuthor, Role, Session, User,
};

pub fn news_item(title: &str) -> NewsItem {
    let now = Utc::now();
    NewsItem {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: "текст".to_string(),
        image_url: None,
        video_url: None,
        author_id: Uuid::new_v4(),
        published: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn news_with_categories(title: &str, category_ids: &[Uuid]) -> NewsWithDetails {
    NewsWithDetails {
        news: news_item(title),
        author: ResolvedAuthor::unknown(),
        categories: category_ids
            .iter()
            .map(|id| CategoryRef { id: *id, name: format!("c-{id}") })
            .collect(),
        comment_count: 0,
        reaction_count: 0,
    }
}

pub fn profile(id: Uuid, username: &str) -> Profile {
    Profile {
        id,
        username: username.to_string(),
        full_name: String::new(),
        avatar_url: None,
        website: None,
        created_at: Utc::now(),
    }
}

pub fn user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: "$argon2id$stub".to_string(),
        role: Role::User,
        created_at: Utc::now(),
    }
}

pub fn session() -> Session {
    session_with_role(Role::User)
}

pub fn session_with_role(role: Role) -> Session {
    Session { user_id: Uuid::new_v4(), username: "vanya".to_string(), role }
}
