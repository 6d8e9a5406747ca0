use media_list_models::Entry;
use media_list_sources::MetadataService;
use rand::Rng;
use std::sync::Arc;

use crate::error::MediaListError;
use crate::fetcher::RecordFetcher;
use crate::media_list::MediaList;
use crate::resolver::IdentifierResolver;

/// Identifier-level operations on a `MediaList`.
///
/// Each operation resolves the identifier first, then applies a single
/// change to the list. Any failure (lookup, validation, duplicate, missing)
/// happens before the list is touched.
pub struct ListManager<S: ?Sized> {
    list: MediaList,
    resolver: IdentifierResolver<S>,
    fetcher: RecordFetcher<S>,
}

impl<S: MetadataService + ?Sized> ListManager<S> {
    pub fn new(list: MediaList, service: Arc<S>) -> Self {
        Self {
            list,
            resolver: IdentifierResolver::new(service.clone()),
            fetcher: RecordFetcher::new(service),
        }
    }

    pub fn list(&self) -> &MediaList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut MediaList {
        &mut self.list
    }

    pub fn into_list(self) -> MediaList {
        self.list
    }

    pub async fn resolve(&self, identifier: &str) -> Result<u64, MediaListError> {
        self.resolver.resolve(identifier).await
    }

    /// Resolve, reject duplicates, fetch, insert as unwatched.
    ///
    /// The duplicate check runs before the fetch, so re-adding a movie costs
    /// no record lookup.
    pub async fn add(&mut self, identifier: &str) -> Result<Entry, MediaListError> {
        let tmdb_id = self.resolver.resolve(identifier).await?;
        self.list.check_not_present(tmdb_id)?;
        let record = self.fetcher.fetch(tmdb_id).await?;
        let entry = self.list.insert(record.into_entry())?;
        Ok(entry.clone())
    }

    pub async fn remove(&mut self, identifier: &str) -> Result<Entry, MediaListError> {
        let tmdb_id = self.resolver.resolve(identifier).await?;
        self.list.remove(tmdb_id)
    }

    pub async fn complete(&mut self, identifier: &str) -> Result<Entry, MediaListError> {
        self.set_completed(identifier, true).await
    }

    pub async fn uncomplete(&mut self, identifier: &str) -> Result<Entry, MediaListError> {
        self.set_completed(identifier, false).await
    }

    async fn set_completed(&mut self, identifier: &str, completed: bool) -> Result<Entry, MediaListError> {
        let tmdb_id = self.resolver.resolve(identifier).await?;
        Ok(self.list.set_completed(tmdb_id, completed)?.clone())
    }

    pub fn flip(&mut self) -> Result<Entry, MediaListError> {
        Ok(self.list.flip()?.clone())
    }

    pub fn flip_with<R: Rng>(&mut self, rng: &mut R) -> Result<Entry, MediaListError> {
        Ok(self.list.flip_with(rng)?.clone())
    }
}
