//! JWT implementation of the session token port.
//!
//! Expiry is enforced here at verification time; cookie readers never
//! inspect the token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::{DomainError, Result, Role, Session, SessionTokens, User};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    user_id: Uuid,
    username: String,
    role: String,
    iat: i64,
    exp: i64,
}

pub struct JwtSessions {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtSessions {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }
}

impl SessionTokens for JwtSessions {
    fn issue(&self, user: &User, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.email.clone(),
            user_id: user.id,
            username: username.to_string(),
            role: user.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| DomainError::Backend(format!("token signing failed: {err}")))
    }

    fn verify(&self, token: &str) -> Result<Session> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| DomainError::Unauthorized("session is invalid or expired".into()))?;
        let role = match data.claims.role.as_str() {
            "admin" => Role::Admin,
            _ => Role::User,
        };
        Ok(Session {
            user_id: data.claims.user_id,
            username: data.claims.username,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "vanya@example.ru".into(),
            password_hash: "$argon2id$x".into(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_verify_round_trip() {
        let sessions = JwtSessions::new("test-secret", 24);
        let user = user(Role::Admin);
        let token = sessions.issue(&user, "vanya").unwrap();

        let session = sessions.verify(&token).unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.username, "vanya");
        assert!(session.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issued = JwtSessions::new("secret-a", 24);
        let verifier = JwtSessions::new("secret-b", 24);
        let token = issued.issue(&user(Role::User), "vanya").unwrap();

        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let sessions = JwtSessions::new("secret", -1);
        let token = sessions.issue(&user(Role::User), "vanya").unwrap();
        assert!(sessions.verify(&token).is_err());
    }
}
