use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::tmdb::MovieRecord;

/// Image host plus width segment, exactly as the web client expects
/// poster URLs to start.
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// One movie as the client grid renders it. `id` and `title` pass
/// through from TMDB unvalidated and may be null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewMovie {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub poster_url: String,
}

/// Envelope of the three list routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieList {
    pub results: Vec<ViewMovie>,
}

/// Keep the movies that have a poster, in their original order, and
/// attach a full poster URL. The path is concatenated verbatim; TMDB
/// paths start with a slash and need no encoding.
pub fn normalize_movies(records: Vec<MovieRecord>) -> Vec<ViewMovie> {
    records
        .into_iter()
        .filter_map(|record| {
            let poster_path = record.poster_path.filter(|path| !path.is_empty())?;
            Some(ViewMovie {
                id: record.id,
                title: record.title,
                poster_url: format!("{}{}", POSTER_BASE_URL, poster_path),
            })
        })
        .collect()
}

/// JSON error reply, `{"error": "..."}` with the given status. The
/// message is one fixed string per route; upstream details stay in the
/// server log.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Option<i64>, title: Option<&str>, poster_path: Option<&str>) -> MovieRecord {
        MovieRecord {
            id,
            title: title.map(str::to_string),
            poster_path: poster_path.map(str::to_string),
        }
    }

    #[test]
    fn keeps_only_movies_with_posters_in_order() {
        let records = vec![
            record(Some(1), Some("A"), Some("/a.jpg")),
            record(Some(2), Some("B"), None),
            record(Some(3), Some("C"), Some("/c.jpg")),
            record(Some(4), Some("D"), Some("")),
        ];

        let movies = normalize_movies(records);

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, Some(1));
        assert_eq!(movies[0].title.as_deref(), Some("A"));
        assert_eq!(movies[0].poster_url, "https://image.tmdb.org/t/p/w500/a.jpg");
        assert_eq!(movies[1].id, Some(3));
        assert_eq!(movies[1].poster_url, "https://image.tmdb.org/t/p/w500/c.jpg");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(normalize_movies(Vec::new()).is_empty());
    }

    #[test]
    fn drops_everything_when_no_record_has_a_poster() {
        let records = vec![
            record(Some(1), Some("A"), None),
            record(Some(2), Some("B"), Some("")),
        ];
        assert!(normalize_movies(records).is_empty());
    }

    #[test]
    fn missing_id_and_title_pass_through_as_null() {
        let movies = normalize_movies(vec![record(None, None, Some("/x.jpg"))]);

        assert_eq!(movies.len(), 1);
        let value = serde_json::to_value(&movies[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "id": null,
                "title": null,
                "poster_url": "https://image.tmdb.org/t/p/w500/x.jpg",
            })
        );
    }

    #[test]
    fn poster_path_is_used_verbatim() {
        let movies = normalize_movies(vec![record(Some(9), Some("Q"), Some("/spaced name.jpg"))]);
        assert_eq!(
            movies[0].poster_url,
            "https://image.tmdb.org/t/p/w500/spaced name.jpg"
        );
    }
}
