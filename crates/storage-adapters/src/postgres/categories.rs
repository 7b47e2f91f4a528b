use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domains::{Category, CategoryRepo, Result};

use super::map_err;

pub struct PgCategoryRepo {
    pool: PgPool,
}

impl PgCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category { id: row.id, name: row.name, slug: row.slug, created_at: row.created_at }
    }
}

#[async_trait]
impl CategoryRepo for PgCategoryRepo {
    async fn insert(&self, category: Category) -> Result<()> {
        sqlx::query("INSERT INTO categories (id, name, slug, created_at) VALUES ($1, $2, $3, $4)")
            .bind(category.id)
            .bind(category.name)
            .bind(category.slug)
            .bind(category.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn update(&self, category: Category) -> Result<()> {
        sqlx::query("UPDATE categories SET name = $2, slug = $3 WHERE id = $1")
            .bind(category.id)
            .bind(category.name)
            .bind(category.slug)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(row.map(Category::from))
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn list_recent(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, created_at FROM categories ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn count(&self) -> Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(n as u64)
    }

    async fn categories_for(&self, news_id: Uuid) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT c.id, c.name, c.slug, c.created_at FROM categories c \
             JOIN news_categories nc ON nc.category_id = c.id \
             WHERE nc.news_id = $1 ORDER BY c.name",
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Full link-set replacement. Delete and reinsert run inside one
    /// transaction so a crash cannot leave the item with zero links.
    async fn replace_links(&self, news_id: Uuid, category_ids: Vec<Uuid>) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(map_err)?;

        sqlx::query("DELETE FROM news_categories WHERE news_id = $1")
            .bind(news_id)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?;

        for category_id in category_ids {
            sqlx::query("INSERT INTO news_categories (news_id, category_id) VALUES ($1, $2)")
                .bind(news_id)
                .bind(category_id)
                .execute(&mut *tx)
                .await
                .map_err(map_err)?;
        }

        tx.commit().await.map_err(map_err)?;
        Ok(())
    }
}
