//! Session-cookie accessor.
//!
//! One fixed cookie key carries the opaque serialized session token.
//! Reading is a pure parse of the `Cookie` header — no expiry logic here;
//! stale tokens are rejected by token verification.

pub const SESSION_COOKIE: &str = "vestnik_session";

/// 30 days, matching the session lifetime the clients expect.
const MAX_AGE_SECONDS: i64 = 30 * 24 * 60 * 60;

/// `Set-Cookie` value installing the session token.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={MAX_AGE_SECONDS}"
    )
}

/// `Set-Cookie` value removing the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
}

/// Extracts the raw token from a `Cookie` request header, if present.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .filter(|token| !token.is_empty())
}
