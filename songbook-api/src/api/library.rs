//! Song library endpoints
//!
//! Query values are taken as raw strings; numeric validation of `offset`,
//! `limit` and `verse` belongs to the catalog layer so it reports a uniform
//! caller error.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewSong, Song, SongFilter, SongUpdate};
use crate::pagination::Page;
use crate::AppState;

/// Query parameters for listing
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub author: Option<String>,
    pub song: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters identifying one song
#[derive(Debug, Default, Deserialize)]
pub struct SongParams {
    pub author: Option<String>,
    pub song: Option<String>,
}

/// Query parameters for lyrics retrieval
#[derive(Debug, Default, Deserialize)]
pub struct TextParams {
    pub author: Option<String>,
    pub song: Option<String>,
    pub verse: Option<String>,
}

/// GET /library/all
pub async fn list_library(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Song>>> {
    let Query(params) = params.map_err(query_error)?;
    let page = Page::parse(params.offset.as_deref(), params.limit.as_deref())?;
    let filter = SongFilter::from_raw(
        params.author,
        params.song,
        params.release_date,
        params.text,
        params.link,
    );

    let songs = state.catalog.list(&filter, page).await?;
    Ok(Json(songs))
}

/// GET /library/text
///
/// Plain-text lyrics; `verse=N` selects the N-th blank-line-separated verse.
pub async fn song_text(
    State(state): State<AppState>,
    params: Result<Query<TextParams>, QueryRejection>,
) -> ApiResult<String> {
    let Query(params) = params.map_err(query_error)?;
    let text = state
        .catalog
        .text(
            params.author.as_deref(),
            params.song.as_deref(),
            params.verse.as_deref(),
        )
        .await?;
    Ok(text)
}

/// DELETE /library/delete
pub async fn delete_song(
    State(state): State<AppState>,
    params: Result<Query<SongParams>, QueryRejection>,
) -> ApiResult<StatusCode> {
    let Query(params) = params.map_err(query_error)?;
    state
        .catalog
        .delete(params.author.as_deref(), params.song.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /library/add
///
/// Only `group` and `song` are taken from the body; the rest comes from the
/// metadata source.
pub async fn add_song(
    State(state): State<AppState>,
    payload: Result<Json<NewSong>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Song>)> {
    let Json(new_song) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let song = state.catalog.create(new_song).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// PATCH /library/update
///
/// `?author=X` with a body of only `{"group": "Y"}` renames group X to Y.
/// Otherwise `?author=X&song=S` updates the fields present in the body.
pub async fn update_song(
    State(state): State<AppState>,
    params: Result<Query<SongParams>, QueryRejection>,
    payload: Result<Json<SongUpdate>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Query(params) = params.map_err(query_error)?;
    let Json(update) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state
        .catalog
        .update(params.author.as_deref(), params.song.as_deref(), update)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn query_error(rejection: QueryRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

/// Build library routes
pub fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/library/all", get(list_library))
        .route("/library/text", get(song_text))
        .route("/library/delete", delete(delete_song))
        .route("/library/add", post(add_song))
        .route("/library/update", patch(update_song))
}
