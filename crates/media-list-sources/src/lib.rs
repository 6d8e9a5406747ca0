pub mod error;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use tmdb::{TmdbClient, TmdbCredential};
pub use traits::MetadataService;
