//! Storage adapters for the `domains` ports: Postgres repositories behind
//! the `db-postgres` feature, a local filesystem media store behind
//! `media-local`, and always-available in-memory repositories used by the
//! test suites.

#[cfg(feature = "db-postgres")]
pub mod postgres;

#[cfg(feature = "media-local")]
pub mod media_local;

pub mod memory;
