pub mod error;
pub mod fetcher;
pub mod manager;
pub mod media_list;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use error::MediaListError;
pub use fetcher::RecordFetcher;
pub use manager::ListManager;
pub use media_list::MediaList;
pub use resolver::{IdentifierKind, IdentifierResolver};
