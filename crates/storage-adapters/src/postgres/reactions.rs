use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domains::{Reaction, ReactionKind, ReactionRepo, Result};

use super::{map_err, parse_kind};

pub struct PgReactionRepo {
    pool: PgPool,
}

impl PgReactionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReactionRow {
    id: Uuid,
    news_id: Uuid,
    user_id: Uuid,
    kind: String,
    created_at: DateTime<Utc>,
}

impl ReactionRow {
    fn into_model(self) -> Result<Reaction> {
        Ok(Reaction {
            id: self.id,
            news_id: self.news_id,
            user_id: self.user_id,
            kind: parse_kind(&self.kind)?,
            created_at: self.created_at,
        })
    }
}

const COLUMNS: &str = "id, news_id, user_id, kind, created_at";

#[async_trait]
impl ReactionRepo for PgReactionRepo {
    async fn insert(&self, reaction: Reaction) -> Result<()> {
        sqlx::query(
            "INSERT INTO reactions (id, news_id, user_id, kind, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(reaction.id)
        .bind(reaction.news_id)
        .bind(reaction.user_id)
        .bind(reaction.kind.as_str())
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update_kind(&self, id: Uuid, kind: ReactionKind) -> Result<()> {
        sqlx::query("UPDATE reactions SET kind = $2 WHERE id = $1")
            .bind(id)
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM reactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn find_by_news_and_user(
        &self,
        news_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Reaction>> {
        let row = sqlx::query_as::<_, ReactionRow>(&format!(
            "SELECT {COLUMNS} FROM reactions WHERE news_id = $1 AND user_id = $2"
        ))
        .bind(news_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;
        row.map(ReactionRow::into_model).transpose()
    }

    async fn list_for_news(&self, news_id: Uuid) -> Result<Vec<Reaction>> {
        let rows = sqlx::query_as::<_, ReactionRow>(&format!(
            "SELECT {COLUMNS} FROM reactions WHERE news_id = $1 ORDER BY created_at DESC"
        ))
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;
        rows.into_iter().map(ReactionRow::into_model).collect()
    }

    async fn list_recent(&self) -> Result<Vec<Reaction>> {
        let rows = sqlx::query_as::<_, ReactionRow>(&format!(
            "SELECT {COLUMNS} FROM reactions ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;
        rows.into_iter().map(ReactionRow::into_model).collect()
    }

    async fn count_for_news(&self, news_id: Uuid) -> Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reactions WHERE news_id = $1")
            .bind(news_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(n as u64)
    }

    async fn count(&self) -> Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reactions")
            .fetch_one(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(n as u64)
    }
}
