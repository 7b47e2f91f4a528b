//! Shared application state: the services, plus the two ports the HTTP
//! layer talks to directly.

use std::sync::Arc;

use domains::{CategoryRepo, MediaStore};
use services::{
    AdminService, AuthService, CommentService, FeedService, NewsService, ProfileService,
    ReactionService,
};

#[derive(Clone)]
pub struct AppState {
    pub feed: FeedService,
    pub news: NewsService,
    pub comments: CommentService,
    pub reactions: ReactionService,
    pub profiles: ProfileService,
    pub admin: AdminService,
    pub auth: AuthService,
    pub categories: Arc<dyn CategoryRepo>,
    pub media: Arc<dyn MediaStore>,
}
