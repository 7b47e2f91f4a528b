//! The central domain vocabulary of Vestnik: entities, derived view
//! models, port contracts, and the error taxonomy.

pub mod error;
pub mod models;
pub mod ports;
pub mod view;

// Re-exporting for easier access in other crates
pub use error::{DomainError, Result};
pub use models::*;
pub use ports::*;
pub use view::*;
