use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::tmdb::TmdbClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tmdb: Arc<TmdbClient>,
}

impl AppState {
    pub fn new(config: Config, tmdb: Arc<TmdbClient>) -> Self {
        Self {
            config: Arc::new(config),
            tmdb,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/movie/:id", get(crate::api::movie_details))
        .route("/api/recommendations/:id", get(crate::api::recommendations))
        .route("/api/movies/search", get(crate::api::search_movies))
        .route("/api/movies/popular", get(crate::api::popular_movies));

    let mut router = Router::new().merge(api_routes).fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        // The client shell: `/` resolves to index.html, assets live below
        // it. Replaces the plain fallback, so unknown paths become file
        // lookups.
        router = router.fallback_service(ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    // CORS preflight for unrouted paths; everything else is a 404.
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
