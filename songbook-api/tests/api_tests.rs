//! HTTP surface tests against the assembled router

mod helpers;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use songbook_api::catalog::CatalogService;
use songbook_api::{build_router, AppState};
use tower::ServiceExt;

use helpers::{catalog_for, offline_catalog, seed_library, Reply, StubUpstream};

async fn app_with(catalog: CatalogService) -> Router {
    build_router(AppState::new(catalog))
}

async fn seeded_app() -> Router {
    let catalog = offline_catalog().await;
    seed_library(catalog.pool()).await;
    app_with(catalog).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app_with(offline_catalog().await).await;

    let (status, body) = send(app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_body(&body);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "songbook-api");
}

#[tokio::test]
async fn test_list_returns_json_with_api_field_names() {
    let (status, body) = send(
        seeded_app().await,
        Method::GET,
        "/library/all?author=Muse&limit=1",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!([{
            "group": "Muse",
            "song": "Supermassive Black Hole",
            "releaseDate": "2006-07-16",
            "text": "Ooh baby\n\nGlaciers melting",
            "link": "https://youtu.be/Xsp3_a-PMTw",
        }])
    );
}

#[tokio::test]
async fn test_list_status_codes() {
    let (status, body) = send(
        seeded_app().await,
        Method::GET,
        "/library/all?author=Nobody",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body)["error"]["code"], "NOT_FOUND");

    let (status, _) = send(seeded_app().await, Method::GET, "/library/all?offset=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(seeded_app().await, Method::GET, "/library/all?limit=-5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_query_uses_error_envelope() {
    for (method, uri) in [
        (Method::GET, "/library/all?author=Muse&author=Queen"),
        (Method::GET, "/library/text?song=Uprising&song=Hysteria"),
        (Method::DELETE, "/library/delete?author=Muse&author=Queen&song=Uprising"),
    ] {
        let (status, body) = send(seeded_app().await, method, uri, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json_body(&body)["error"]["code"], "BAD_REQUEST", "{}", uri);
    }

    let (status, body) = send(
        seeded_app().await,
        Method::PATCH,
        "/library/update?author=Muse&author=Queen&song=Uprising",
        Some(json!({"text": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body)["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_text_is_plain() {
    let app = seeded_app().await;

    let request = Request::builder()
        .uri("/library/text?author=Muse&song=Supermassive%20Black%20Hole&verse=2")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Glaciers melting");
}

#[tokio::test]
async fn test_text_status_codes() {
    let (status, _) = send(
        seeded_app().await,
        Method::GET,
        "/library/text?author=Muse",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        seeded_app().await,
        Method::GET,
        "/library/text?author=Muse&song=Uprising&verse=9",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        seeded_app().await,
        Method::GET,
        "/library/text?author=Muse&song=Hysteria",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let app = seeded_app().await;

    let (status, _) = send(
        app.clone(),
        Method::DELETE,
        "/library/delete?author=Muse&song=Uprising",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        app,
        Method::DELETE,
        "/library/delete?author=Muse&song=Uprising",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_song_created() {
    let upstream =
        StubUpstream::start(vec![Reply::ok("01.12.2003", "It's bugging me", "https://x")]).await;
    let app = app_with(catalog_for(&upstream.url).await).await;

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/library/add",
        Some(json!({"group": "Muse", "song": "Hysteria", "text": "ignored"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = json_body(&body);
    assert_eq!(body["releaseDate"], "2003-12-01");
    assert_eq!(body["text"], "It's bugging me");

    let (status, _) = send(
        app,
        Method::POST,
        "/library/add",
        Some(json!({"group": "Muse", "song": "Hysteria"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_add_song_upstream_failures() {
    let upstream = StubUpstream::start(vec![Reply::status(500)]).await;
    let app = app_with(catalog_for(&upstream.url).await).await;
    let (status, body) = send(
        app,
        Method::POST,
        "/library/add",
        Some(json!({"group": "Muse", "song": "Hysteria"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(&body)["error"]["code"], "UPSTREAM_UNAVAILABLE");

    let upstream = StubUpstream::start(vec![Reply::status(400)]).await;
    let app = app_with(catalog_for(&upstream.url).await).await;
    let (status, _) = send(
        app,
        Method::POST,
        "/library/add",
        Some(json!({"group": "Muse", "song": "Hysteria"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let upstream = StubUpstream::start(vec![Reply::status(404)]).await;
    let app = app_with(catalog_for(&upstream.url).await).await;
    let (status, _) = send(
        app,
        Method::POST,
        "/library/add",
        Some(json!({"group": "Muse", "song": "Hysteria"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_add_song_bad_bodies() {
    let (status, _) = send(
        seeded_app().await,
        Method::POST,
        "/library/add",
        Some(json!({"group": "Muse"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let app = seeded_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/library/add")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_song_fields() {
    let app = seeded_app().await;

    let (status, _) = send(
        app.clone(),
        Method::PATCH,
        "/library/update?author=Muse&song=Uprising",
        Some(json!({"link": "https://example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(app, Method::GET, "/library/all?song=Uprising", None).await;
    let body = json_body(&body);
    assert_eq!(body[0]["link"], "https://example.com");
    assert_eq!(body[0]["text"], "Paranoia is in bloom");
}

#[tokio::test]
async fn test_update_group_rename() {
    let app = seeded_app().await;

    let (status, _) = send(
        app.clone(),
        Method::PATCH,
        "/library/update?author=Muse",
        Some(json!({"group": "MUSE"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(app, Method::GET, "/library/all?author=MUSE", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_status_codes() {
    let (status, _) = send(
        seeded_app().await,
        Method::PATCH,
        "/library/update?author=Muse&song=Hysteria",
        Some(json!({"text": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        seeded_app().await,
        Method::PATCH,
        "/library/update?author=Muse&song=Uprising",
        Some(json!({"song": "Supermassive Black Hole"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        seeded_app().await,
        Method::PATCH,
        "/library/update?author=Muse&song=Uprising",
        Some(json!({"lyrics": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        seeded_app().await,
        Method::PATCH,
        "/library/update?author=Muse&song=Uprising",
        Some(json!({"text": null})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        seeded_app().await,
        Method::PATCH,
        "/library/update?song=Uprising",
        Some(json!({"text": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_empty_body_is_noop() {
    let (status, _) = send(
        seeded_app().await,
        Method::PATCH,
        "/library/update?author=Muse&song=Uprising",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
