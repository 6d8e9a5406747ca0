use async_trait::async_trait;
use media_list_models::{RecordDetails, SearchHit};

use crate::error::SourceError;

/// Remote movie metadata lookups.
///
/// Result lists are in the service's relevance order; callers only ever look
/// at the first hit.
#[async_trait]
pub trait MetadataService: Send + Sync {
    fn service_name(&self) -> &str;

    /// Cross-reference lookup by a foreign id (an IMDb `tt…` id)
    async fn find_by_external_id(&self, external_id: &str) -> Result<Vec<SearchHit>, SourceError>;

    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchHit>, SourceError>;

    /// Fails with `SourceError::NotFound` for unknown ids
    async fn get_record(&self, id: u64) -> Result<RecordDetails, SourceError>;
}

