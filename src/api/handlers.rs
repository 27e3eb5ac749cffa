use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use super::types::{normalize_movies, ApiError, MovieList};
use crate::server::AppState;
use crate::tmdb::TmdbError;

pub async fn movie_details(
    State(state): State<AppState>,
    Path(movie_id): Path<u32>,
) -> Result<Json<Value>, ApiError> {
    let details = state
        .tmdb
        .movie_details(movie_id)
        .await
        .map_err(|e| upstream_error("Failed to fetch movie details", e))?;

    Ok(Json(details))
}

pub async fn recommendations(
    State(state): State<AppState>,
    Path(movie_id): Path<u32>,
) -> Result<Json<MovieList>, ApiError> {
    let reply = state
        .tmdb
        .recommendations(movie_id)
        .await
        .map_err(|e| upstream_error("Failed to fetch recommendations", e))?;

    Ok(Json(MovieList {
        results: normalize_movies(reply.results),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MovieList>, ApiError> {
    let reply = state
        .tmdb
        .search_movies(params.query.as_deref())
        .await
        .map_err(|e| upstream_error("Failed to fetch data from TMDB", e))?;

    Ok(Json(MovieList {
        results: normalize_movies(reply.results),
    }))
}

pub async fn popular_movies(State(state): State<AppState>) -> Result<Json<MovieList>, ApiError> {
    let reply = state
        .tmdb
        .popular_movies()
        .await
        .map_err(|e| upstream_error("Failed to fetch popular movies", e))?;

    Ok(Json(MovieList {
        results: normalize_movies(reply.results),
    }))
}

fn upstream_error(message: &'static str, err: TmdbError) -> ApiError {
    error!("TMDB upstream failure: {}", err);

    ApiError {
        status: StatusCode::from_u16(err.forward_status()).unwrap_or(StatusCode::BAD_GATEWAY),
        message,
    }
}
