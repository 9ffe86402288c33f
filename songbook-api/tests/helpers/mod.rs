//! Shared fixtures for integration tests
//!
//! `StubUpstream` stands in for the external metadata source: an axum router
//! on an ephemeral port that replays a scripted sequence of responses.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use songbook_api::catalog::authors::resolve_or_create_group;
use songbook_api::catalog::CatalogService;
use songbook_api::db::songs::insert_song;
use songbook_api::enrichment::EnrichmentClient;
use songbook_api::models::Song;
use songbook_common::config::EnrichmentSettings;
use songbook_common::db::init_memory_database;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

/// A scripted upstream response
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(release_date: &str, text: &str, link: &str) -> Self {
        Self {
            status: 200,
            body: serde_json::json!({
                "releaseDate": release_date,
                "text": text,
                "link": link,
            })
            .to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone)]
struct StubState {
    script: Arc<Vec<Reply>>,
    hits: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn stub_handler(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let n = state.hits.fetch_add(1, Ordering::SeqCst);
    state.queries.lock().unwrap().push(params);

    // Past the end of the script, keep replaying the last entry
    let reply = state
        .script
        .get(n)
        .or_else(|| state.script.last())
        .cloned()
        .unwrap_or_else(|| Reply::status(500));

    (
        StatusCode::from_u16(reply.status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

/// Scripted metadata source on 127.0.0.1
///
/// Shuts down when dropped.
pub struct StubUpstream {
    pub url: String,
    hits: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl StubUpstream {
    pub async fn start(script: Vec<Reply>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let queries = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            script: Arc::new(script),
            hits: hits.clone(),
            queries: queries.clone(),
        };

        let app = Router::new().route("/info", get(stub_handler)).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            url: format!("http://{}/info", addr),
            hits,
            queries,
            _shutdown_tx: shutdown_tx,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }
}

/// Enrichment settings with millisecond backoff so retry tests stay fast
pub fn fast_settings(max_attempts: u32) -> EnrichmentSettings {
    EnrichmentSettings {
        max_attempts,
        initial_backoff_ms: 1,
        max_backoff_ms: 4,
        request_timeout_secs: 5,
    }
}

pub fn client_for(url: &str, max_attempts: u32) -> EnrichmentClient {
    EnrichmentClient::new(url, &fast_settings(max_attempts)).unwrap()
}

/// Catalog over a fresh in-memory database
pub async fn catalog_for(url: &str) -> CatalogService {
    let pool = init_memory_database().await.unwrap();
    CatalogService::new(pool, client_for(url, 3))
}

/// Catalog whose metadata source is never expected to be called
pub async fn offline_catalog() -> CatalogService {
    catalog_for("http://127.0.0.1:9/info").await
}

pub fn song(group: &str, name: &str, release_date: &str, text: &str, link: &str) -> Song {
    Song {
        group: group.to_string(),
        name: name.to_string(),
        release_date: release_date.to_string(),
        text: text.to_string(),
        link: link.to_string(),
    }
}

/// Insert a song directly, bypassing enrichment
pub async fn seed(pool: &SqlitePool, song: &Song) {
    let group_id = resolve_or_create_group(pool, &song.group).await.unwrap();
    insert_song(pool, &group_id, song).await.unwrap();
}

/// A small library spanning three groups
pub async fn seed_library(pool: &SqlitePool) {
    for s in [
        song(
            "Muse",
            "Supermassive Black Hole",
            "2006-07-16",
            "Ooh baby\n\nGlaciers melting",
            "https://youtu.be/Xsp3_a-PMTw",
        ),
        song(
            "Muse",
            "Uprising",
            "2009-09-07",
            "Paranoia is in bloom",
            "https://youtu.be/w8KQmps-Sog",
        ),
        song(
            "Arctic Monkeys",
            "Do I Wanna Know?",
            "2013-06-19",
            "Have you got colour",
            "https://youtu.be/bpOSxM0rNPM",
        ),
        song("Björk", "Army of Me", "1995-04-24", "Stand up", "https://youtu.be/qiv6e09EA8s"),
    ] {
        seed(pool, &s).await;
    }
}
