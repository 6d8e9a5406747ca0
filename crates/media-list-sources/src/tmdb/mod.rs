pub mod api;
pub mod auth;
pub mod client;

pub use auth::TmdbCredential;
pub use client::TmdbClient;
