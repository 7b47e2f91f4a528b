//! Reaction presses through the router: the prompt for anonymous viewers,
//! toggle and switch for signed-in ones.

use axum::http::StatusCode;
use serde_json::json;

use domains::{ReactionKind, ReactionRepo, Role};
use integration_tests::{http, TestBackend};

#[tokio::test]
async fn anonymous_press_gets_the_auth_prompt_and_mutates_nothing() {
    let backend = TestBackend::new();
    let (author, _) = backend.signed_in_user("avtor", Role::User).await;
    let item = backend.seed_news(author.id, "новость", 1).await;
    let app = api_adapters::router(backend.state());

    let response = http::send(
        app,
        http::json(
            "POST",
            &format!("/api/news/{}/reactions", item.id),
            None,
            json!({ "kind": "like" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = http::body_json(response).await;
    assert_eq!(body["error"], "Пожалуйста, авторизуйтесь, чтобы продолжить.");
    assert_eq!(backend.reactions.count().await.unwrap(), 0);
}

#[tokio::test]
async fn like_like_round_trips_and_like_dislike_switches() {
    let backend = TestBackend::new();
    let (author, _) = backend.signed_in_user("avtor", Role::User).await;
    let (_, cookie) = backend.signed_in_user("chitatel", Role::User).await;
    let item = backend.seed_news(author.id, "новость", 1).await;
    let app = api_adapters::router(backend.state());
    let uri = format!("/api/news/{}/reactions", item.id);

    // First like inserts.
    let first = http::body_json(
        http::send(
            app.clone(),
            http::json("POST", &uri, Some(&cookie), json!({ "kind": "like" })),
        )
        .await,
    )
    .await;
    assert_eq!(first["previous"], serde_json::Value::Null);
    assert_eq!(first["current"], "like");
    assert_eq!(backend.reactions.count().await.unwrap(), 1);

    // Dislike switches the same row.
    let switched = http::body_json(
        http::send(
            app.clone(),
            http::json("POST", &uri, Some(&cookie), json!({ "kind": "dislike" })),
        )
        .await,
    )
    .await;
    assert_eq!(switched["previous"], "like");
    assert_eq!(switched["current"], "dislike");
    assert_eq!(backend.reactions.count().await.unwrap(), 1);
    let rows = backend.reactions.list_for_news(item.id).await.unwrap();
    assert_eq!(rows[0].kind, ReactionKind::Dislike);

    // Dislike again toggles off; counts are back where they started.
    let cleared = http::body_json(
        http::send(app, http::json("POST", &uri, Some(&cookie), json!({ "kind": "dislike" })))
            .await,
    )
    .await;
    assert_eq!(cleared["current"], serde_json::Value::Null);
    assert_eq!(backend.reactions.count().await.unwrap(), 0);
}
