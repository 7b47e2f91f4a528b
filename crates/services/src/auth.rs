//! # Registration and sign-in
//!
//! Accounts are a User row (credentials, role) plus a Profile row sharing
//! its id. Role defaults to `user` at registration and is never assigned
//! anywhere else.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::{
    DomainError, PasswordHasher, Profile, ProfileRepo, Result, Role, Session, SessionTokens, User,
    UserRepo,
};

/// A signed-in identity together with its serialized session token.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub session: Session,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepo>,
    profiles: Arc<dyn ProfileRepo>,
    passwords: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn SessionTokens>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        profiles: Arc<dyn ProfileRepo>,
        passwords: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn SessionTokens>,
    ) -> Self {
        Self { users, profiles, passwords, tokens }
    }

    /// Creates the account and its profile, then signs the new user in.
    pub async fn register(&self, email: &str, password: &str, username: &str) -> Result<SignedIn> {
        let email = email.trim().to_lowercase();
        let username = username.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("a valid email is required".into()));
        }
        if username.is_empty() {
            return Err(DomainError::Validation("username is required".into()));
        }
        if password.len() < 6 {
            return Err(DomainError::Validation("password must be at least 6 characters".into()));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("email is already registered".into()));
        }
        if self.profiles.find_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict("username is already taken".into()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash: self.passwords.hash(password)?,
            role: Role::User,
            created_at: now,
        };
        let profile = Profile {
            id: user.id,
            username: username.to_string(),
            full_name: String::new(),
            avatar_url: None,
            website: None,
            created_at: now,
        };

        self.users.insert(user.clone()).await?;
        self.profiles.insert(profile).await?;
        tracing::info!(user_id = %user.id, "account registered");

        self.signed_in(user, username)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn> {
        let email = email.trim().to_lowercase();
        // A missing account and a wrong password answer identically.
        let invalid = || DomainError::Unauthorized("invalid email or password".into());

        let user = self.users.find_by_email(&email).await?.ok_or_else(invalid)?;
        if !self.passwords.verify(password, &user.password_hash) {
            return Err(invalid());
        }

        let username = match self.profiles.find(user.id).await? {
            Some(profile) => profile.username,
            None => domains::ResolvedAuthor::UNKNOWN.to_string(),
        };
        tracing::info!(user_id = %user.id, "signed in");
        self.signed_in(user, &username)
    }

    /// Resolves a serialized session token back into an identity.
    pub fn session_from_token(&self, token: &str) -> Result<Session> {
        self.tokens.verify(token)
    }

    fn signed_in(&self, user: User, username: &str) -> Result<SignedIn> {
        let token = self.tokens.issue(&user, username)?;
        Ok(SignedIn {
            session: Session {
                user_id: user.id,
                username: username.to_string(),
                role: user.role,
            },
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{MockPasswordHasher, MockProfileRepo, MockSessionTokens, MockUserRepo};

    fn tokens() -> MockSessionTokens {
        let mut tokens = MockSessionTokens::new();
        tokens.expect_issue().returning(|_, _| Ok("token".into()));
        tokens
    }

    #[tokio::test]
    async fn register_creates_user_and_profile_with_user_role() {
        let mut users = MockUserRepo::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_insert()
            .withf(|u| u.role == Role::User)
            .times(1)
            .returning(|_| Ok(()));
        let mut profiles = MockProfileRepo::new();
        profiles.expect_find_by_username().returning(|_| Ok(None));
        profiles
            .expect_insert()
            .withf(|p| p.username == "vanya" && p.full_name.is_empty())
            .times(1)
            .returning(|_| Ok(()));
        let mut passwords = MockPasswordHasher::new();
        passwords.expect_hash().returning(|_| Ok("$argon2id$x".into()));

        let svc = AuthService::new(
            Arc::new(users),
            Arc::new(profiles),
            Arc::new(passwords),
            Arc::new(tokens()),
        );
        let signed = svc.register("Vanya@Mail.ru", "secret1", "vanya").await.unwrap();
        assert_eq!(signed.session.role, Role::User);
        assert_eq!(signed.session.username, "vanya");
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let mut users = MockUserRepo::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let mut profiles = MockProfileRepo::new();
        profiles.expect_find_by_username().returning(|name| {
            Ok(Some(crate::testutil::profile(Uuid::new_v4(), name)))
        });
        let svc = AuthService::new(
            Arc::new(users),
            Arc::new(profiles),
            Arc::new(MockPasswordHasher::new()),
            Arc::new(MockSessionTokens::new()),
        );

        let err = svc.register("a@b.ru", "secret1", "vanya").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_answer_identically() {
        let known = crate::testutil::user("known@b.ru");
        let mut users = MockUserRepo::new();
        users.expect_find_by_email().returning(move |email| {
            Ok((email == known.email).then(|| known.clone()))
        });
        let mut passwords = MockPasswordHasher::new();
        passwords.expect_verify().returning(|_, _| false);
        let svc = AuthService::new(
            Arc::new(users),
            Arc::new(MockProfileRepo::new()),
            Arc::new(passwords),
            Arc::new(MockSessionTokens::new()),
        );

        let a = svc.login("known@b.ru", "wrong").await.unwrap_err();
        let b = svc.login("ghost@b.ru", "wrong").await.unwrap_err();
        assert_eq!(a.to_string(), b.to_string());
    }
}
