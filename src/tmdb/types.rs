use serde::Deserialize;

/// One movie as it appears in TMDB list replies (popular, search,
/// recommendations). TMDB omits or nulls fields freely, so nothing here
/// is required; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Envelope of the TMDB list endpoints. A 200 body without a `results`
/// key counts as an empty page.
#[derive(Debug, Default, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub results: Vec<MovieRecord>,
}
