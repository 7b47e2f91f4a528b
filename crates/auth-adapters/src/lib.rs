//! Authentication adapters: argon2 password hashing, JWT session tokens
//! and the session-cookie accessor.

pub mod password;
pub mod session;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

pub use password::ArgonPasswordHasher;
pub use session::{clear_session_cookie, session_cookie, token_from_cookie_header, SESSION_COOKIE};

#[cfg(feature = "auth-jwt")]
pub use jwt::JwtSessions;
