//! In-memory metadata service for tests

use async_trait::async_trait;
use media_list_models::{RecordDetails, SearchHit};
use media_list_sources::{MetadataService, SourceError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct FakeService {
    external: HashMap<String, Vec<u64>>,
    titles: HashMap<String, Vec<u64>>,
    records: HashMap<u64, RecordDetails>,
    unavailable: bool,
    calls: AtomicUsize,
    record_calls: AtomicUsize,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Matrix (603), reachable by id, IMDb id and title, plus a few others
    pub fn with_catalog() -> Self {
        Self::new()
            .with_movie(603, "The Matrix", 7.6, Some("1999-03-30"))
            .with_movie(680, "Pulp Fiction", 8.5, Some("1994-09-10"))
            .with_movie(11, "Star Wars", 8.2, Some("1977-05-25"))
            .with_movie(999, "Lost Date", 5.0, None)
            .with_movie(998, "Bad Date", 5.0, Some("March 1999"))
            .with_external("tt0133093", 603)
            .with_external("tt0110912", 680)
            .with_title("matrix", &[603, 604])
            .with_title("pulp", &[680])
    }

    pub fn with_movie(self, id: u64, title: &str, vote_average: f64, release_date: Option<&str>) -> Self {
        self.with_details(RecordDetails {
            id,
            title: title.to_string(),
            vote_average: Some(vote_average),
            release_date: release_date.map(str::to_string),
        })
    }

    /// Serve `details` as-is, e.g. a decoded payload with missing fields
    pub fn with_details(mut self, details: RecordDetails) -> Self {
        self.records.insert(details.id, details);
        self
    }

    pub fn with_external(mut self, external_id: &str, id: u64) -> Self {
        self.external.entry(external_id.to_string()).or_default().push(id);
        self
    }

    pub fn with_title(mut self, query: &str, ids: &[u64]) -> Self {
        self.titles.insert(query.to_lowercase(), ids.to_vec());
        self
    }

    /// Every call fails with a 503
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn record_calls(&self) -> usize {
        self.record_calls.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(), SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(SourceError::Http {
                status: 503,
                body: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn hits(ids: Option<&Vec<u64>>) -> Vec<SearchHit> {
    ids.map(|ids| ids.iter().map(|&id| SearchHit { id }).collect())
        .unwrap_or_default()
}

#[async_trait]
impl MetadataService for FakeService {
    fn service_name(&self) -> &str {
        "fake"
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Vec<SearchHit>, SourceError> {
        self.begin()?;
        Ok(hits(self.external.get(external_id)))
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchHit>, SourceError> {
        self.begin()?;
        Ok(hits(self.titles.get(&query.to_lowercase())))
    }

    async fn get_record(&self, id: u64) -> Result<RecordDetails, SourceError> {
        self.begin()?;
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("movie {}", id)))
    }
}
