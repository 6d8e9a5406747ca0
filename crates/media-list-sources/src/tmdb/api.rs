use media_list_models::{RecordDetails, SearchHit};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::SourceError;

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    movie_results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// `GET /find/{external_id}?external_source=imdb_id`
pub fn find_url(base_url: &str, external_id: &str) -> String {
    format!(
        "{}/find/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(external_id)
    )
}

/// `GET /search/movie?query=...`
pub fn search_movie_url(base_url: &str) -> String {
    format!("{}/search/movie", base_url.trim_end_matches('/'))
}

/// `GET /movie/{id}`
pub fn movie_url(base_url: &str, id: u64) -> String {
    format!("{}/movie/{}", base_url.trim_end_matches('/'), id)
}

pub fn parse_find_response(body: &str) -> Result<Vec<SearchHit>, SourceError> {
    let response: FindResponse = serde_json::from_str(body)?;
    Ok(response.movie_results)
}

pub fn parse_search_response(body: &str) -> Result<Vec<SearchHit>, SourceError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.results)
}

pub fn parse_movie_response(body: &str) -> Result<RecordDetails, SourceError> {
    Ok(serde_json::from_str(body)?)
}

/// Map a non-success status to an error. `what` names the missing thing for 404s.
pub fn error_for_status(status: StatusCode, body: String, what: &str) -> SourceError {
    match status {
        StatusCode::NOT_FOUND => SourceError::NotFound(what.to_string()),
        StatusCode::UNAUTHORIZED => SourceError::Unauthorized,
        _ => SourceError::Http {
            status: status.as_u16(),
            body: status_message(&body).unwrap_or(body),
        },
    }
}

/// TMDB error bodies look like `{"status_code": 34, "status_message": "..."}`
fn status_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        status_message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| e.status_message)
}
