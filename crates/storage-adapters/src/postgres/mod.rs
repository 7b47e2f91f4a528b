//! Postgres implementations of the repository ports.
//!
//! Row structs mirror the table layout and are mapped into domain models at
//! the boundary; the domain crates never see sqlx types.

mod categories;
mod comments;
mod news;
mod profiles;
mod reactions;
mod users;

pub use categories::PgCategoryRepo;
pub use comments::PgCommentRepo;
pub use news::PgNewsRepo;
pub use profiles::PgProfileRepo;
pub use reactions::PgReactionRepo;
pub use users::PgUserRepo;

use domains::{DomainError, ReactionKind, Role};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Embedded migrations; applied by the binary at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connects a pool with the given connection cap.
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Maps a sqlx failure into the domain taxonomy. Unique-index violations
/// become conflicts; everything else is a backend failure whose detail is
/// logged, not surfaced.
pub(crate) fn map_err(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(ref db) = err {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return DomainError::Conflict("record already exists".into());
        }
    }
    tracing::error!(%err, "database call failed");
    DomainError::backend(err)
}

pub(crate) fn parse_kind(raw: &str) -> Result<ReactionKind, DomainError> {
    match raw {
        "like" => Ok(ReactionKind::Like),
        "dislike" => Ok(ReactionKind::Dislike),
        other => Err(DomainError::Backend(format!("unknown reaction kind in storage: {other}"))),
    }
}

pub(crate) fn parse_role(raw: &str) -> Result<Role, DomainError> {
    match raw {
        "admin" => Ok(Role::Admin),
        "user" => Ok(Role::User),
        other => Err(DomainError::Backend(format!("unknown role in storage: {other}"))),
    }
}
