use media_list_sources::SourceError;
use thiserror::Error;

/// Everything a list operation can fail with. A failed operation never
/// leaves a partial change behind.
#[derive(Debug, Error)]
pub enum MediaListError {
    #[error("Unable to locate a movie from identifier `{identifier}`")]
    NotFound { identifier: String },

    #[error("TMDB returned an unusable record for movie {tmdb_id}: {reason}")]
    InvalidRecord { tmdb_id: u64, reason: String },

    #[error("Metadata service error: {0}")]
    ServiceError(#[source] SourceError),

    #[error("The movie \"{title} ({year})\" is already on your list")]
    DuplicateEntry { title: String, year: i32 },

    #[error("Movie {tmdb_id} is not on your list")]
    NotInList { tmdb_id: u64 },

    #[error("No unwatched movies in your list")]
    EmptyQueue,
}

impl MediaListError {
    /// Translate a service error, turning the service's "not found" into
    /// ours with the identifier the user typed.
    pub(crate) fn from_source(error: SourceError, identifier: &str) -> Self {
        match error {
            SourceError::NotFound(_) => MediaListError::NotFound {
                identifier: identifier.to_string(),
            },
            other => MediaListError::ServiceError(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source_maps_not_found() {
        let err = MediaListError::from_source(SourceError::NotFound("movie 1".into()), "1");
        assert!(matches!(err, MediaListError::NotFound { ref identifier } if identifier == "1"));

        let err = MediaListError::from_source(SourceError::Unauthorized, "1");
        assert!(matches!(err, MediaListError::ServiceError(SourceError::Unauthorized)));
    }

    #[test]
    fn test_messages() {
        let err = MediaListError::DuplicateEntry {
            title: "The Matrix".to_string(),
            year: 1999,
        };
        assert_eq!(err.to_string(), "The movie \"The Matrix (1999)\" is already on your list");
        assert_eq!(MediaListError::EmptyQueue.to_string(), "No unwatched movies in your list");
        assert_eq!(
            MediaListError::NotInList { tmdb_id: 42 }.to_string(),
            "Movie 42 is not on your list"
        );
    }
}
