//! The public feed and detail endpoints over the full router.

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use domains::{CategoryRepo, NewsItem, NewsRepo, Role};
use integration_tests::{http, TestBackend};

#[tokio::test]
async fn feed_is_ordered_and_resolves_authors() {
    let backend = TestBackend::new();
    let (author, _) = backend.signed_in_user("avtor", Role::User).await;
    backend.seed_news(author.id, "старая", 30).await;
    backend.seed_news(author.id, "свежая", 1).await;
    let app = api_adapters::router(backend.state());

    let response = http::send(app, http::get("/api/news", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = http::body_json(response).await;

    let titles: Vec<&str> =
        body.as_array().unwrap().iter().map(|i| i["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["свежая", "старая"]);
    assert_eq!(body[0]["author"]["username"], "avtor");
}

#[tokio::test]
async fn category_parameter_narrows_the_feed() {
    let backend = TestBackend::new();
    let (author, _) = backend.signed_in_user("avtor", Role::User).await;
    let politics = backend.seed_category("Политика", "politika").await;
    let tagged = backend.seed_news(author.id, "про выборы", 2).await;
    backend.seed_news(author.id, "про погоду", 1).await;
    backend.categories.replace_links(tagged.id, vec![politics.id]).await.unwrap();
    let app = api_adapters::router(backend.state());

    let uri = format!("/api/news?category={}", politics.id);
    let response = http::send(app, http::get(&uri, None)).await;
    let body = http::body_json(response).await;

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "про выборы");
    assert_eq!(items[0]["categories"][0]["name"], "Политика");
}

#[tokio::test]
async fn missing_news_answers_not_found_in_display_language() {
    let backend = TestBackend::new();
    let app = api_adapters::router(backend.state());

    let uri = format!("/api/news/{}", Uuid::new_v4());
    let response = http::send(app, http::get(&uri, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = http::body_json(response).await;
    assert_eq!(body["error"], "Запись не найдена.");
}

#[tokio::test]
async fn detail_carries_comments_and_engagement() {
    let backend = TestBackend::new();
    let (author, _) = backend.signed_in_user("avtor", Role::User).await;
    let (reader, _) = backend.signed_in_user("chitatel", Role::User).await;
    let item = backend.seed_news(author.id, "новость", 5).await;
    backend.seed_comment(item.id, reader.id, "отличный материал").await;
    let app = api_adapters::router(backend.state());

    let uri = format!("/api/news/{}", item.id);
    let response = http::send(app, http::get(&uri, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = http::body_json(response).await;

    assert_eq!(body["title"], "новость");
    assert_eq!(body["comments"][0]["content"], "отличный материал");
    assert_eq!(body["comments"][0]["author"]["username"], "chitatel");
    assert_eq!(body["engagement"]["comments"], 1);
    assert_eq!(body["engagement"]["likes"], 0);
}

#[tokio::test]
async fn drafts_stay_out_of_the_public_feed_but_open_for_the_author() {
    let backend = TestBackend::new();
    let (author, cookie) = backend.signed_in_user("avtor", Role::User).await;
    let now = Utc::now();
    let draft = NewsItem {
        id: Uuid::new_v4(),
        title: "черновик".into(),
        content: "текст".into(),
        image_url: None,
        video_url: None,
        author_id: author.id,
        published: false,
        created_at: now,
        updated_at: now,
    };
    backend.news.insert(draft.clone()).await.unwrap();
    let app = api_adapters::router(backend.state());

    let feed = http::body_json(http::send(app.clone(), http::get("/api/news", None)).await).await;
    assert!(feed.as_array().unwrap().is_empty());

    let uri = format!("/api/news/{}", draft.id);
    let stranger = http::send(app.clone(), http::get(&uri, None)).await;
    assert_eq!(stranger.status(), StatusCode::NOT_FOUND);

    let owner = http::send(app, http::get(&uri, Some(&cookie))).await;
    assert_eq!(owner.status(), StatusCode::OK);
}

#[tokio::test]
async fn authoring_round_trip_creates_updates_and_searches() {
    let backend = TestBackend::new();
    let (_, cookie) = backend.signed_in_user("avtor", Role::User).await;
    let culture = backend.seed_category("Культура", "kultura").await;
    let app = api_adapters::router(backend.state());

    let created = http::send(
        app.clone(),
        http::json(
            "POST",
            "/api/news",
            Some(&cookie),
            json!({
                "title": "Премьера в театре",
                "content": "Подробности премьеры.",
                "category_ids": [culture.id],
            }),
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = http::body_json(created).await;
    let id = created["id"].as_str().unwrap().to_owned();

    // Full-field replacement, category set included.
    let updated = http::send(
        app.clone(),
        http::json(
            "PUT",
            &format!("/api/news/{id}"),
            Some(&cookie),
            json!({
                "title": "Премьера отложена",
                "content": "Обновлённые подробности.",
                "category_ids": [],
            }),
        ),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);

    // "отложена", percent-encoded for the query string.
    let search = "/api/my/news?title=%D0%BE%D1%82%D0%BB%D0%BE%D0%B6%D0%B5%D0%BD%D0%B0";
    let mine = http::body_json(http::send(app.clone(), http::get(search, Some(&cookie))).await).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["categories"].as_array().unwrap().len(), 0);

    let anonymous_create = http::send(
        app,
        http::json("POST", "/api/news", None, json!({ "title": "x", "content": "y" })),
    )
    .await;
    assert_eq!(anonymous_create.status(), StatusCode::UNAUTHORIZED);
}
