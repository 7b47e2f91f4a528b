use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domains::{NewsItem, NewsQuery, NewsRepo, Result};

use super::map_err;

pub struct PgNewsRepo {
    pool: PgPool,
}

impl PgNewsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NewsRow {
    id: Uuid,
    title: String,
    content: String,
    image_url: Option<String>,
    video_url: Option<String>,
    author_id: Uuid,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<NewsRow> for NewsItem {
    fn from(row: NewsRow) -> Self {
        NewsItem {
            id: row.id,
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            video_url: row.video_url,
            author_id: row.author_id,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str =
    "id, title, content, image_url, video_url, author_id, published, created_at, updated_at";

#[async_trait]
impl NewsRepo for PgNewsRepo {
    async fn insert(&self, item: NewsItem) -> Result<()> {
        sqlx::query(
            "INSERT INTO news (id, title, content, image_url, video_url, author_id, published, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(item.id)
        .bind(item.title)
        .bind(item.content)
        .bind(item.image_url)
        .bind(item.video_url)
        .bind(item.author_id)
        .bind(item.published)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update(&self, item: NewsItem) -> Result<()> {
        sqlx::query(
            "UPDATE news SET title = $2, content = $3, image_url = $4, video_url = $5, \
             published = $6, updated_at = $7 WHERE id = $1",
        )
        .bind(item.id)
        .bind(item.title)
        .bind(item.content)
        .bind(item.image_url)
        .bind(item.video_url)
        .bind(item.published)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<NewsItem>> {
        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {COLUMNS} FROM news WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(row.map(NewsItem::from))
    }

    /// Optional filters collapse inside the query itself; a NULL limit
    /// means no limit.
    async fn list(&self, query: NewsQuery) -> Result<Vec<NewsItem>> {
        let rows = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {COLUMNS} FROM news \
             WHERE ($1::bool = FALSE OR published = TRUE) \
               AND ($2::uuid IS NULL OR author_id = $2) \
             ORDER BY created_at DESC \
             LIMIT $3"
        ))
        .bind(query.published_only)
        .bind(query.author_id)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(rows.into_iter().map(NewsItem::from).collect())
    }

    async fn count(&self) -> Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(n as u64)
    }
}
