//! # Vestnik Binary
//!
//! The entry point that assembles adapters into the running service.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_adapters::{middleware, router, AppState};
use auth_adapters::{ArgonPasswordHasher, JwtSessions};
use configs::AppConfig;
use domains::{
    CategoryRepo, CommentRepo, MediaStore, NewsRepo, PasswordHasher, ProfileRepo, ReactionRepo,
    SessionTokens, UserRepo,
};
use services::{
    AdminService, AuthService, CommentService, FeedService, NewsService, ProfileService,
    ReactionService,
};
use storage_adapters::media_local::LocalMediaStore;
use storage_adapters::postgres::{
    self, PgCategoryRepo, PgCommentRepo, PgNewsRepo, PgProfileRepo, PgReactionRepo, PgUserRepo,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    // Storage
    let pool = postgres::connect(
        config.database.url.expose_secret(),
        config.database.max_connections,
    )
    .await
    .context("connecting to Postgres")?;
    postgres::MIGRATOR.run(&pool).await.context("applying migrations")?;
    tracing::info!("database ready");

    let news: Arc<dyn NewsRepo> = Arc::new(PgNewsRepo::new(pool.clone()));
    let profiles: Arc<dyn ProfileRepo> = Arc::new(PgProfileRepo::new(pool.clone()));
    let categories: Arc<dyn CategoryRepo> = Arc::new(PgCategoryRepo::new(pool.clone()));
    let comments: Arc<dyn CommentRepo> = Arc::new(PgCommentRepo::new(pool.clone()));
    let reactions: Arc<dyn ReactionRepo> = Arc::new(PgReactionRepo::new(pool.clone()));
    let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));

    // Media + auth
    let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(
        config.media.root.clone().into(),
        config.media.url_prefix.clone(),
    ));
    let passwords: Arc<dyn PasswordHasher> = Arc::new(ArgonPasswordHasher);
    let tokens: Arc<dyn SessionTokens> = Arc::new(JwtSessions::new(
        config.auth.jwt_secret.expose_secret(),
        config.auth.session_ttl_hours,
    ));

    // Services
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
    let state = AppState {
        feed,
        news: news_service,
        comments: CommentService::new(comments.clone(), profiles.clone()),
        reactions: ReactionService::new(reactions.clone()),
        profiles: ProfileService::new(profiles.clone()),
        admin,
        auth: AuthService::new(users, profiles.clone(), passwords, tokens),
        categories: categories.clone(),
        media,
    };

    let (set_request_id, propagate_request_id) = middleware::request_id_layers();
    let app = router(state)
        .nest_service(
            &config.media.url_prefix,
            middleware::media_service(Path::new(&config.media.root)),
        )
        .layer(propagate_request_id)
        .layer(middleware::trace_layer())
        .layer(set_request_id)
        .layer(middleware::cors_policy());

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "vestnik listening");
    axum::serve(listener, app).await.context("server stopped")?;
    Ok(())
}
