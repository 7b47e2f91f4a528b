//! Route table. The session middleware is outermost so every handler —
//! and the admin guard — sees the resolved identity in extensions.

use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};

use crate::extract::{require_admin, session_middleware};
use crate::handlers::{admin, auth, categories, comments, feed, media, news, profile, reactions};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/stats", get(admin::stats))
        .route("/news", get(admin::list_news))
        .route("/news/{id}", put(admin::update_news).delete(admin::delete_news))
        .route("/categories", get(admin::list_categories).post(admin::create_category))
        .route(
            "/categories/{id}",
            put(admin::update_category).delete(admin::delete_category),
        )
        .route("/profiles", get(admin::list_profiles))
        .route("/profiles/{id}", put(admin::update_profile).delete(admin::delete_profile))
        .route("/comments", get(admin::list_comments))
        .route("/comments/{id}", delete(admin::delete_comment))
        .route("/reactions", get(admin::list_reactions))
        .route("/reactions/{id}", delete(admin::delete_reaction))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/api/news", get(feed::list_news).post(news::create_news))
        .route(
            "/api/news/{id}",
            get(feed::news_detail).put(news::update_news).delete(news::delete_news),
        )
        .route(
            "/api/news/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/api/news/{id}/reactions", post(reactions::react))
        .route("/api/my/news", get(news::my_news))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/media", post(media::upload))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        .route("/api/profile", get(profile::get_own).put(profile::update_own))
        .route("/api/profiles/{id}", get(profile::get_by_id))
        .nest("/api/admin", admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}
