pub mod config;
pub mod list_store;
pub mod paths;

pub use config::{Config, LoggingConfig, TmdbConfig, DEFAULT_TMDB_BASE_URL};
pub use list_store::ListStore;
pub use paths::{home_override, PathManager, HOME_ENV};
