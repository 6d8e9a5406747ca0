use chrono::{Datelike, NaiveDate};
use media_list_models::{Record, RecordDetails};
use media_list_sources::MetadataService;
use std::sync::Arc;
use tracing::debug;

use crate::error::MediaListError;

const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fetches the canonical fields of a movie. One remote call per fetch, no caching.
pub struct RecordFetcher<S: ?Sized> {
    service: Arc<S>,
}

impl<S: MetadataService + ?Sized> RecordFetcher<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    pub async fn fetch(&self, tmdb_id: u64) -> Result<Record, MediaListError> {
        debug!("Fetching record for TMDB id {} from {}", tmdb_id, self.service.service_name());
        let details = self
            .service
            .get_record(tmdb_id)
            .await
            .map_err(|e| MediaListError::from_source(e, &tmdb_id.to_string()))?;
        validate_record(tmdb_id, details)
    }
}

/// Turn raw service data into a `Record`, rejecting data the list cannot use
pub fn validate_record(tmdb_id: u64, details: RecordDetails) -> Result<Record, MediaListError> {
    let invalid = |reason: String| MediaListError::InvalidRecord { tmdb_id, reason };

    if details.title.trim().is_empty() {
        return Err(invalid("missing title".to_string()));
    }
    let weight = match details.vote_average {
        None => return Err(invalid("missing vote average".to_string())),
        Some(v) if !v.is_finite() || v < 0.0 => {
            return Err(invalid(format!("unusable vote average {}", v)));
        }
        Some(v) => v,
    };
    let year = release_year(details.release_date.as_deref()).map_err(invalid)?;

    Ok(Record {
        tmdb_id,
        title: details.title,
        year,
        weight,
    })
}

/// Year component of a `YYYY-MM-DD` date
pub fn release_year(release_date: Option<&str>) -> Result<i32, String> {
    let raw = release_date
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| "missing release date".to_string())?;

    NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT)
        .map(|date| date.year())
        .map_err(|e| format!("malformed release date \"{}\": {}", raw, e))
}
