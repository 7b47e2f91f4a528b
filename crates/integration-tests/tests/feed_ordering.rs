//! Aggregation ordering: the output sequence must equal the base query's
//! creation-time-descending order no matter how per-row resolution
//! interleaves.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use domains::{
    CategoryRepo, CommentRepo, NewsQuery, NewsRepo, Profile, ProfileRepo, ReactionRepo, Result,
};
use integration_tests::TestBackend;
use services::FeedService;

/// Profile repo whose lookups complete after a per-author delay, so
/// completion order can be forced to differ from request order.
struct DelayedProfileRepo {
    names: HashMap<Uuid, &'static str>,
    delays_ms: HashMap<Uuid, u64>,
}

#[async_trait]
impl ProfileRepo for DelayedProfileRepo {
    async fn insert(&self, _profile: Profile) -> Result<()> {
        Ok(())
    }
    async fn update(&self, _profile: Profile) -> Result<()> {
        Ok(())
    }
    async fn delete(&self, _id: Uuid) -> Result<()> {
        Ok(())
    }
    async fn find(&self, id: Uuid) -> Result<Option<Profile>> {
        if let Some(delay) = self.delays_ms.get(&id) {
            tokio::time::sleep(Duration::from_millis(*delay)).await;
        }
        Ok(self.names.get(&id).map(|name| Profile {
            id,
            username: name.to_string(),
            full_name: String::new(),
            avatar_url: None,
            website: None,
            created_at: Utc::now(),
        }))
    }
    async fn find_by_username(&self, _username: &str) -> Result<Option<Profile>> {
        Ok(None)
    }
    async fn list(&self) -> Result<Vec<Profile>> {
        Ok(Vec::new())
    }
    async fn count(&self) -> Result<u64> {
        Ok(0)
    }
}

#[tokio::test]
async fn output_order_equals_base_order_despite_resolution_delays() {
    let backend = TestBackend::new();

    // Base order by creation time descending: item1 (T3), item3 (T2),
    // item2 (T1).
    let author1 = Uuid::new_v4();
    let author2 = Uuid::new_v4();
    let author3 = Uuid::new_v4();
    let item1 = backend.seed_news(author1, "новость-1", 1).await;
    let item2 = backend.seed_news(author2, "новость-2", 3).await;
    let item3 = backend.seed_news(author3, "новость-3", 2).await;

    // Item 2's profile resolves first, item 1's last.
    let profiles = DelayedProfileRepo {
        names: HashMap::from([(author1, "pervyi"), (author2, "vtoroi"), (author3, "tretii")]),
        delays_ms: HashMap::from([(author1, 120), (author2, 0), (author3, 60)]),
    };

    let feed = FeedService::new(
        backend.news.clone() as Arc<dyn NewsRepo>,
        Arc::new(profiles),
        backend.categories.clone() as Arc<dyn CategoryRepo>,
        backend.comments.clone() as Arc<dyn CommentRepo>,
        backend.reactions.clone() as Arc<dyn ReactionRepo>,
    );

    let out = feed.fetch(NewsQuery::default()).await.unwrap();

    let ids: Vec<Uuid> = out.iter().map(|d| d.news.id).collect();
    assert_eq!(ids, vec![item1.id, item3.id, item2.id]);

    // And each row carries its own author, not whichever resolved first.
    let names: Vec<&str> = out.iter().map(|d| d.author.username.as_str()).collect();
    assert_eq!(names, vec!["pervyi", "tretii", "vtoroi"]);
}
