use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::types::MovieListResponse;
use crate::config::TmdbConfig;

/// Client for the TMDB v3 API. Owns the one shared HTTP client and the
/// server-held API key; the key is sent on every request and never leaves
/// this module.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// TMDB answered, but with a status other than 200.
    #[error("TMDB returned status {0}")]
    Status(StatusCode),
    /// The request never completed, or the body was not valid JSON.
    #[error("TMDB request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl TmdbError {
    /// Status the facade forwards to its own client: the upstream status
    /// as-is, or 502 when there was no upstream reply to forward.
    pub fn forward_status(&self) -> u16 {
        match self {
            TmdbError::Status(code) => code.as_u16(),
            TmdbError::Transport(_) => 502,
        }
    }
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig, api_key: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// `GET /movie/{id}` with videos and genres appended. The body stays
    /// raw JSON; the facade forwards it untouched.
    pub async fn movie_details(&self, movie_id: u32) -> Result<Value, TmdbError> {
        debug!(movie_id, "fetching movie details");
        let request = self.request(&format!("/movie/{}", movie_id)).query(&[
            ("language", "en-US"),
            ("append_to_response", "videos,genres"),
        ]);
        self.fetch(request).await
    }

    /// `GET /movie/{id}/recommendations`.
    pub async fn recommendations(&self, movie_id: u32) -> Result<MovieListResponse, TmdbError> {
        debug!(movie_id, "fetching recommendations");
        let request = self.request(&format!("/movie/{}/recommendations", movie_id));
        self.fetch(request).await
    }

    /// `GET /search/movie`. An absent query is not sent at all; an empty
    /// string is sent as `query=`. Both are left for TMDB to judge.
    pub async fn search_movies(&self, query: Option<&str>) -> Result<MovieListResponse, TmdbError> {
        debug!(query = ?query, "searching movies");
        let request = self.request("/search/movie").query(&[("query", query)]);
        self.fetch(request).await
    }

    /// `GET /movie/popular`.
    pub async fn popular_movies(&self) -> Result<MovieListResponse, TmdbError> {
        debug!("fetching popular movies");
        self.fetch(self.request("/movie/popular")).await
    }

    fn request(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("api_key", self.api_key.as_str())])
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, TmdbError> {
        let response = request.send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TmdbError::Status(status));
        }

        Ok(response.json().await?)
    }
}
