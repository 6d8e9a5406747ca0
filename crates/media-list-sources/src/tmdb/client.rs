use crate::error::SourceError;
use crate::tmdb::api;
use crate::tmdb::auth::{self, TmdbCredential};
use crate::traits::MetadataService;
use async_trait::async_trait;
use media_list_config::TmdbConfig;
use media_list_models::{RecordDetails, SearchHit};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    credential: TmdbCredential,
    base_url: String,
    language: Option<String>,
}

impl TmdbClient {
    pub fn new(credential: TmdbCredential, config: &TmdbConfig) -> Result<Self, SourceError> {
        let client = auth::create_tmdb_client(Duration::from_secs(config.timeout_seconds))?;
        Ok(Self {
            client,
            credential,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }
        self.credential.apply(request)
    }

    /// Send a prepared request and return the body of a successful response
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<String, SourceError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("TMDB request for {} failed with {}", what, status);
            return Err(api::error_for_status(status, body, what));
        }

        Ok(body)
    }
}

#[async_trait]
impl MetadataService for TmdbClient {
    fn service_name(&self) -> &str {
        "tmdb"
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Vec<SearchHit>, SourceError> {
        debug!("TMDB: looking up external id {}", external_id);
        let request = self
            .request(&api::find_url(&self.base_url, external_id))
            .query(&[("external_source", "imdb_id")]);
        let body = self
            .send(request, &format!("external id {}", external_id))
            .await?;
        let hits = api::parse_find_response(&body)?;
        debug!("TMDB: {} movie result(s) for {}", hits.len(), external_id);
        Ok(hits)
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchHit>, SourceError> {
        debug!("TMDB: searching movies for {:?}", query);
        let request = self
            .request(&api::search_movie_url(&self.base_url))
            .query(&[("query", query)]);
        let body = self.send(request, &format!("title {:?}", query)).await?;
        let hits = api::parse_search_response(&body)?;
        debug!("TMDB: {} search result(s) for {:?}", hits.len(), query);
        Ok(hits)
    }

    async fn get_record(&self, id: u64) -> Result<RecordDetails, SourceError> {
        debug!("TMDB: fetching movie {}", id);
        let request = self.request(&api::movie_url(&self.base_url, id));
        let body = self.send(request, &format!("movie {}", id)).await?;
        api::parse_movie_response(&body)
    }
}
