//! Seeds a fresh database: one admin account, the base categories, and a
//! welcome news item. Safe to re-run; existing rows are left alone.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use secrecy::ExposeSecret;
use uuid::Uuid;

use auth_adapters::ArgonPasswordHasher;
use configs::AppConfig;
use domains::{
    Category, CategoryRepo, NewsItem, NewsRepo, PasswordHasher, Profile, ProfileRepo, Role, User,
    UserRepo,
};
use storage_adapters::postgres::{
    self, PgCategoryRepo, PgNewsRepo, PgProfileRepo, PgUserRepo,
};

const ADMIN_EMAIL: &str = "admin@vestnik.local";
const ADMIN_PASSWORD: &str = "admin-change-me";

const CATEGORIES: &[(&str, &str)] = &[
    ("Политика", "politika"),
    ("Спорт", "sport"),
    ("Культура", "kultura"),
    ("Технологии", "tekhnologii"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load().context("loading configuration")?;

    let pool = postgres::connect(
        config.database.url.expose_secret(),
        config.database.max_connections,
    )
    .await
    .context("connecting to Postgres")?;
    postgres::MIGRATOR.run(&pool).await.context("applying migrations")?;

    let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));
    let profiles: Arc<dyn ProfileRepo> = Arc::new(PgProfileRepo::new(pool.clone()));
    let categories: Arc<dyn CategoryRepo> = Arc::new(PgCategoryRepo::new(pool.clone()));
    let news: Arc<dyn NewsRepo> = Arc::new(PgNewsRepo::new(pool.clone()));

    let admin_id = match users.find_by_email(ADMIN_EMAIL).await? {
        Some(existing) => {
            println!("admin account already present: {ADMIN_EMAIL}");
            existing.id
        }
        None => {
            let now = Utc::now();
            let admin = User {
                id: Uuid::new_v4(),
                email: ADMIN_EMAIL.to_string(),
                password_hash: ArgonPasswordHasher.hash(ADMIN_PASSWORD)?,
                role: Role::Admin,
                created_at: now,
            };
            users.insert(admin.clone()).await?;
            profiles
                .insert(Profile {
                    id: admin.id,
                    username: "admin".to_string(),
                    full_name: "Администратор".to_string(),
                    avatar_url: None,
                    website: None,
                    created_at: now,
                })
                .await?;
            println!("admin account created: {ADMIN_EMAIL} / {ADMIN_PASSWORD}");
            admin.id
        }
    };

    let existing = categories.list().await?;
    let mut first_category = existing.first().map(|c| c.id);
    for (name, slug) in CATEGORIES {
        if existing.iter().any(|c| c.slug == *slug) {
            continue;
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Utc::now(),
        };
        categories.insert(category.clone()).await?;
        first_category.get_or_insert(category.id);
        println!("category created: {name}");
    }

    if news.count().await? == 0 {
        let now = Utc::now();
        let welcome = NewsItem {
            id: Uuid::new_v4(),
            title: "Добро пожаловать в Вестник".to_string(),
            content: "Первая запись редакции. Зарегистрируйтесь, чтобы публиковать \
                      новости, комментировать и оценивать материалы."
                .to_string(),
            image_url: None,
            video_url: None,
            author_id: admin_id,
            published: true,
            created_at: now,
            updated_at: now,
        };
        news.insert(welcome.clone()).await?;
        if let Some(category_id) = first_category {
            categories.replace_links(welcome.id, vec![category_id]).await?;
        }
        println!("welcome news created");
    }

    Ok(())
}
