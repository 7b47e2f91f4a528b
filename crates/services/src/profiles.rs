//! Profile view and edit for account owners. The admin variant lives in
//! the admin surface.

use std::sync::Arc;

use uuid::Uuid;

use domains::{DomainError, Profile, ProfileRepo, Result, Session};

/// The full mutable field set of a profile, as submitted by the edit form.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
}

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepo>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepo>) -> Self {
        Self { profiles }
    }

    pub async fn get(&self, id: Uuid) -> Result<Profile> {
        self.profiles
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("profile", id))
    }

    /// Replaces the profile's mutable fields. Owner or admin only.
    pub async fn update(
        &self,
        actor: &Session,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile> {
        if actor.user_id != id && !actor.is_admin() {
            return Err(DomainError::Forbidden("only the owner or an admin may edit this profile".into()));
        }
        let username = update.username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation("username is required".into()));
        }

        let mut profile = self.get(id).await?;
        if let Some(taken) = self.profiles.find_by_username(username).await? {
            if taken.id != id {
                return Err(DomainError::Conflict("username is already taken".into()));
            }
        }

        profile.username = username.to_string();
        profile.full_name = update.full_name;
        profile.avatar_url = update.avatar_url;
        profile.website = update.website;
        self.profiles.update(profile.clone()).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{profile, session};
    use domains::MockProfileRepo;

    fn update() -> ProfileUpdate {
        ProfileUpdate {
            username: "novyi".into(),
            full_name: "Иван Иванов".into(),
            avatar_url: None,
            website: Some("https://example.ru".into()),
        }
    }

    #[tokio::test]
    async fn stranger_cannot_edit() {
        let svc = ProfileService::new(Arc::new(MockProfileRepo::new()));
        let err = svc
            .update(&session(), Uuid::new_v4(), update())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn owner_edit_replaces_fields() {
        let actor = session();
        let existing = profile(actor.user_id, "staryi");
        let mut repo = MockProfileRepo::new();
        repo.expect_find().returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_update()
            .withf(|p| p.username == "novyi" && p.full_name == "Иван Иванов")
            .times(1)
            .returning(|_| Ok(()));
        let svc = ProfileService::new(Arc::new(repo));

        let updated = svc.update(&actor, actor.user_id, update()).await.unwrap();
        assert_eq!(updated.website.as_deref(), Some("https://example.ru"));
    }

    #[tokio::test]
    async fn taken_username_is_a_conflict() {
        let actor = session();
        let existing = profile(actor.user_id, "staryi");
        let other = profile(Uuid::new_v4(), "novyi");
        let mut repo = MockProfileRepo::new();
        repo.expect_find().returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(other.clone())));
        repo.expect_update().never();
        let svc = ProfileService::new(Arc::new(repo));

        let err = svc.update(&actor, actor.user_id, update()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
