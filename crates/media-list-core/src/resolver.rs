use media_list_sources::MetadataService;
use std::sync::Arc;
use tracing::debug;

use crate::error::MediaListError;

/// Prefix of IMDb title ids ("tt0133093")
pub const EXTERNAL_ID_PREFIX: &str = "tt";

/// How a user-supplied identifier will be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind<'a> {
    /// IMDb id, resolved through the service's cross-reference lookup
    External(&'a str),
    /// Free text, resolved through a title search
    Title(&'a str),
    /// Already a TMDB id
    Canonical(&'a str),
}

impl<'a> IdentifierKind<'a> {
    /// Rules apply in order: the `tt` prefix wins over digit-ness, and only an
    /// all-digit string is taken as a TMDB id. Surrounding whitespace is ignored.
    pub fn classify(identifier: &'a str) -> Self {
        let identifier = identifier.trim();
        if identifier.starts_with(EXTERNAL_ID_PREFIX) {
            IdentifierKind::External(identifier)
        } else if identifier.is_empty() || !identifier.bytes().all(|b| b.is_ascii_digit()) {
            IdentifierKind::Title(identifier)
        } else {
            IdentifierKind::Canonical(identifier)
        }
    }

    /// Whether resolving this identifier calls the metadata service
    pub fn needs_lookup(&self) -> bool {
        !matches!(self, IdentifierKind::Canonical(_))
    }
}

/// Maps an identifier (TMDB id, IMDb id or title) to a TMDB id
pub struct IdentifierResolver<S: ?Sized> {
    service: Arc<S>,
}

impl<S: MetadataService + ?Sized> IdentifierResolver<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    pub async fn resolve(&self, identifier: &str) -> Result<u64, MediaListError> {
        let not_found = || MediaListError::NotFound {
            identifier: identifier.to_string(),
        };

        let tmdb_id = match IdentifierKind::classify(identifier) {
            IdentifierKind::External(external_id) => {
                let hits = self
                    .service
                    .find_by_external_id(external_id)
                    .await
                    .map_err(|e| MediaListError::from_source(e, identifier))?;
                hits.first().map(|hit| hit.id).ok_or_else(not_found)?
            }
            IdentifierKind::Title(query) => {
                let hits = self
                    .service
                    .search_by_title(query)
                    .await
                    .map_err(|e| MediaListError::from_source(e, identifier))?;
                hits.first().map(|hit| hit.id).ok_or_else(not_found)?
            }
            IdentifierKind::Canonical(digits) => digits.parse::<u64>().map_err(|_| not_found())?,
        };

        debug!("Resolved identifier {:?} to TMDB id {}", identifier, tmdb_id);
        Ok(tmdb_id)
    }
}
