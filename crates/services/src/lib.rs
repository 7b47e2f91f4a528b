//! Application services of Vestnik: the read-side aggregator, the reaction
//! and comment engines, authoring, the admin surface, and auth
//! orchestration. Everything here talks to the port traits in `domains`
//! and is exercised against mocks or in-memory adapters.

pub mod admin;
pub mod auth;
pub mod comments;
pub mod feed;
pub mod filter;
pub mod news;
pub mod profiles;
pub mod reactions;

pub use admin::{AdminService, AdminTable, CategoryDraft, ProfileDraft, Stats};
pub use auth::{AuthService, SignedIn};
pub use comments::CommentService;
pub use feed::FeedService;
pub use filter::filter_by_category;
pub use news::{filter_my_news, MyNewsSearch, NewsDraft, NewsService};
pub use profiles::{ProfileService, ProfileUpdate};
pub use reactions::ReactionService;

#[cfg(test)]
pub(crate) mod testutil;
