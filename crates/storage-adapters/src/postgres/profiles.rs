use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domains::{Profile, ProfileRepo, Result};

use super::map_err;

pub struct PgProfileRepo {
    pool: PgPool,
}

impl PgProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    username: String,
    full_name: String,
    avatar_url: Option<String>,
    website: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            username: row.username,
            full_name: row.full_name,
            avatar_url: row.avatar_url,
            website: row.website,
            created_at: row.created_at,
        }
    }
}

const COLUMNS: &str = "id, username, full_name, avatar_url, website, created_at";

#[async_trait]
impl ProfileRepo for PgProfileRepo {
    async fn insert(&self, profile: Profile) -> Result<()> {
        sqlx::query(
            "INSERT INTO profiles (id, username, full_name, avatar_url, website, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(profile.id)
        .bind(profile.username)
        .bind(profile.full_name)
        .bind(profile.avatar_url)
        .bind(profile.website)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update(&self, profile: Profile) -> Result<()> {
        sqlx::query(
            "UPDATE profiles SET username = $2, full_name = $3, avatar_url = $4, website = $5 \
             WHERE id = $1",
        )
        .bind(profile.id)
        .bind(profile.username)
        .bind(profile.full_name)
        .bind(profile.avatar_url)
        .bind(profile.website)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(row.map(Profile::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {COLUMNS} FROM profiles WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(row.map(Profile::from))
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {COLUMNS} FROM profiles ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn count(&self) -> Result<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(n as u64)
    }
}
