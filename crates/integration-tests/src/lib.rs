//! Shared fixtures for the cross-crate test suites: an in-memory backend,
//! a fully wired [`AppState`], and helpers for seeding rows and signing in
//! test users.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

#[cfg(feature = "web-axum")]
use api_adapters::AppState;
use auth_adapters::{ArgonPasswordHasher, JwtSessions, SESSION_COOKIE};
use domains::{
    Category, CategoryRepo, Comment, CommentRepo, NewsItem, NewsRepo, PasswordHasher, Profile,
    ProfileRepo, ReactionRepo, Role, SessionTokens, User, UserRepo,
};
#[cfg(feature = "web-axum")]
use services::{
    AdminService, AuthService, CommentService, FeedService, NewsService, ProfileService,
    ReactionService,
};
use storage_adapters::memory::{
    MemoryCategoryRepo, MemoryCommentRepo, MemoryMediaStore, MemoryNewsRepo, MemoryProfileRepo,
    MemoryReactionRepo, MemoryUserRepo,
};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Request plumbing for the API suites.
#[cfg(feature = "web-axum")]
pub mod http {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, Response};
    use axum::Router;
    use tower::ServiceExt;

    pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
        app.oneshot(request).await.unwrap()
    }

    pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub fn json(
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: serde_json::Value,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn delete(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// The in-memory backend shared between a test and its [`AppState`].
pub struct TestBackend {
    pub news: Arc<MemoryNewsRepo>,
    pub profiles: Arc<MemoryProfileRepo>,
    pub categories: Arc<MemoryCategoryRepo>,
    pub comments: Arc<MemoryCommentRepo>,
    pub reactions: Arc<MemoryReactionRepo>,
    pub users: Arc<MemoryUserRepo>,
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            news: Arc::new(MemoryNewsRepo::new()),
            profiles: Arc::new(MemoryProfileRepo::new()),
            categories: Arc::new(MemoryCategoryRepo::new()),
            comments: Arc::new(MemoryCommentRepo::new()),
            reactions: Arc::new(MemoryReactionRepo::new()),
            users: Arc::new(MemoryUserRepo::new()),
        }
    }

    /// Wires the real services over this backend.
    #[cfg(feature = "web-axum")]
    pub fn state(&self) -> AppState {
        let news = self.news.clone() as Arc<dyn NewsRepo>;
        let profiles = self.profiles.clone() as Arc<dyn ProfileRepo>;
        let categories = self.categories.clone() as Arc<dyn CategoryRepo>;
        let comments = self.comments.clone() as Arc<dyn CommentRepo>;
        let reactions = self.reactions.clone() as Arc<dyn ReactionRepo>;
        let users = self.users.clone() as Arc<dyn UserRepo>;

        let tokens = Arc::new(JwtSessions::new(TEST_SECRET, 24)) as Arc<dyn SessionTokens>;
        let passwords = Arc::new(ArgonPasswordHasher) as Arc<dyn PasswordHasher>;

        let feed = FeedService::new(
            news.clone(),
            profiles.clone(),
            categories.clone(),
            comments.clone(),
            reactions.clone(),
        );
        let news_service = NewsService::new(news.clone(), categories.clone());
        let admin = AdminService::new(
            feed.clone(),
            news_service.clone(),
            news.clone(),
            categories.clone(),
            profiles.clone(),
            comments.clone(),
            reactions.clone(),
        );

        AppState {
            feed,
            news: news_service,
            comments: CommentService::new(comments.clone(), profiles.clone()),
            reactions: ReactionService::new(reactions.clone()),
            profiles: ProfileService::new(profiles.clone()),
            admin,
            auth: AuthService::new(users, profiles.clone(), passwords, tokens),
            categories,
            media: Arc::new(MemoryMediaStore),
        }
    }

    /// Creates a user with a profile and returns it with a ready
    /// `Cookie` header value for requests on its behalf.
    pub async fn signed_in_user(&self, username: &str, role: Role) -> (User, String) {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: format!("{username}@example.ru"),
            password_hash: ArgonPasswordHasher.hash("parol-123").unwrap(),
            role,
            created_at: now,
        };
        self.users.insert(user.clone()).await.unwrap();
        self.profiles
            .insert(Profile {
                id: user.id,
                username: username.to_string(),
                full_name: String::new(),
                avatar_url: None,
                website: None,
                created_at: now,
            })
            .await
            .unwrap();

        let token = JwtSessions::new(TEST_SECRET, 24).issue(&user, username).unwrap();
        (user, format!("{SESSION_COOKIE}={token}"))
    }

    pub async fn seed_news(&self, author_id: Uuid, title: &str, age_minutes: i64) -> NewsItem {
        let created = Utc::now() - Duration::minutes(age_minutes);
        let item = NewsItem {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: "текст новости".to_string(),
            image_url: None,
            video_url: None,
            author_id,
            published: true,
            created_at: created,
            updated_at: created,
        };
        self.news.insert(item.clone()).await.unwrap();
        item
    }

    pub async fn seed_category(&self, name: &str, slug: &str) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        };
        self.categories.insert(category.clone()).await.unwrap();
        category
    }

    pub async fn seed_comment(&self, news_id: Uuid, author_id: Uuid, content: &str) -> Comment {
        let comment = Comment {
            id: Uuid::new_v4(),
            news_id,
            author_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.comments.insert(comment.clone()).await.unwrap();
        comment
    }
}
