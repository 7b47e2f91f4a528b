//! The admin surface: the role gate, the dashboard stats, and the
//! per-entity tables.

use axum::http::StatusCode;
use serde_json::json;

use domains::{CategoryRepo, CommentRepo, NewsRepo, Role};
use integration_tests::{http, TestBackend};

#[tokio::test]
async fn admin_routes_are_gated_by_role() {
    let backend = TestBackend::new();
    let (_, user_cookie) = backend.signed_in_user("prostoi", Role::User).await;
    let app = api_adapters::router(backend.state());

    let anonymous = http::send(app.clone(), http::get("/api/admin/stats", None)).await;
    assert_eq!(anonymous.status(), StatusCode::FORBIDDEN);

    let non_admin =
        http::send(app, http::get("/api/admin/stats", Some(&user_cookie))).await;
    assert_eq!(non_admin.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn stats_counts_every_entity() {
    let backend = TestBackend::new();
    let (admin, cookie) = backend.signed_in_user("admin", Role::Admin).await;
    let (reader, _) = backend.signed_in_user("chitatel", Role::User).await;
    let item = backend.seed_news(admin.id, "новость", 1).await;
    backend.seed_category("Спорт", "sport").await;
    backend.seed_comment(item.id, reader.id, "коммент").await;
    let app = api_adapters::router(backend.state());

    let body =
        http::body_json(http::send(app, http::get("/api/admin/stats", Some(&cookie))).await).await;
    assert_eq!(body["news"], 1);
    assert_eq!(body["categories"], 1);
    assert_eq!(body["profiles"], 2);
    assert_eq!(body["comments"], 1);
    assert_eq!(body["reactions"], 0);
}

#[tokio::test]
async fn admin_news_list_includes_drafts_and_delete_removes_one_row() {
    let backend = TestBackend::new();
    let (admin, cookie) = backend.signed_in_user("admin", Role::Admin).await;
    let (author, _) = backend.signed_in_user("avtor", Role::User).await;
    let kept = backend.seed_news(author.id, "остаётся", 2).await;
    let doomed = backend.seed_news(admin.id, "удаляется", 1).await;
    let app = api_adapters::router(backend.state());

    let listed = http::body_json(
        http::send(app.clone(), http::get("/api/admin/news", Some(&cookie))).await,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let response = http::send(
        app.clone(),
        http::delete(&format!("/api/admin/news/{}", doomed.id), Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(backend.news.find(doomed.id).await.unwrap().is_none());
    assert!(backend.news.find(kept.id).await.unwrap().is_some());
}

#[tokio::test]
async fn category_lifecycle_create_edit_delete() {
    let backend = TestBackend::new();
    let (_, cookie) = backend.signed_in_user("admin", Role::Admin).await;
    let app = api_adapters::router(backend.state());

    let created = http::send(
        app.clone(),
        http::json(
            "POST",
            "/api/admin/categories",
            Some(&cookie),
            json!({ "name": "Экономика", "slug": "ekonomika" }),
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = http::body_json(created).await;
    let id = created["id"].as_str().unwrap().to_owned();

    let bad_slug = http::send(
        app.clone(),
        http::json(
            "PUT",
            &format!("/api/admin/categories/{id}"),
            Some(&cookie),
            json!({ "name": "Экономика", "slug": "Не Слаг" }),
        ),
    )
    .await;
    assert_eq!(bad_slug.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let renamed = http::send(
        app.clone(),
        http::json(
            "PUT",
            &format!("/api/admin/categories/{id}"),
            Some(&cookie),
            json!({ "name": "Финансы", "slug": "finansy" }),
        ),
    )
    .await;
    assert_eq!(renamed.status(), StatusCode::OK);

    let deleted = http::send(
        app,
        http::delete(&format!("/api/admin/categories/{id}"), Some(&cookie)),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert_eq!(backend.categories.count().await.unwrap(), 0);
}

#[tokio::test]
async fn admin_may_delete_a_comment() {
    let backend = TestBackend::new();
    let (_, cookie) = backend.signed_in_user("admin", Role::Admin).await;
    let (reader, _) = backend.signed_in_user("chitatel", Role::User).await;
    let item = backend.seed_news(reader.id, "новость", 1).await;
    let comment = backend.seed_comment(item.id, reader.id, "спорное мнение").await;
    let app = api_adapters::router(backend.state());

    let response = http::send(
        app,
        http::delete(&format!("/api/admin/comments/{}", comment.id), Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(backend.comments.count().await.unwrap(), 0);
}
