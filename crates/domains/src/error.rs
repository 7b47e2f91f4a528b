//! # DomainError
//!
//! Centralized error taxonomy for the Vestnik ecosystem. Adapters map their
//! failures into these variants; the HTTP layer maps them to status codes
//! and display-language messages.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Resource not found (e.g. NewsItem, Profile, Category)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g. empty title, unsupported media type)
    #[error("validation error: {0}")]
    Validation(String),

    /// Authentication required — the prompt-to-authenticate signal
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (role or ownership mismatch)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource already exists (e.g. duplicate username or slug)
    #[error("conflict: {0}")]
    Conflict(String),

    /// A backend call failed (DB down, storage write failed)
    #[error("backend error: {0}")]
    Backend(String),
}

impl DomainError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        DomainError::NotFound(entity.to_string(), id.to_string())
    }

    pub fn backend(err: impl std::fmt::Display) -> Self {
        DomainError::Backend(err.to_string())
    }
}

/// A specialized Result type for Vestnik logic.
pub type Result<T> = std::result::Result<T, DomainError>;
