use reqwest::{Client, RequestBuilder};
use std::fmt;
use std::time::Duration;

const USER_AGENT: &str = concat!("watchflip/", env!("CARGO_PKG_VERSION"));

/// TMDB accepts either a v3 API key (query parameter) or a v4 read access
/// token (bearer header). v4 tokens are JWTs, so they start with "eyJ".
#[derive(Clone, PartialEq, Eq)]
pub enum TmdbCredential {
    ApiKey(String),
    AccessToken(String),
}

impl TmdbCredential {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("eyJ") {
            TmdbCredential::AccessToken(raw.to_string())
        } else {
            TmdbCredential::ApiKey(raw.to_string())
        }
    }

    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            TmdbCredential::ApiKey(key) => request.query(&[("api_key", key.as_str())]),
            TmdbCredential::AccessToken(token) => request.bearer_auth(token),
        }
    }
}

// Keep secrets out of debug logs
impl fmt::Debug for TmdbCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TmdbCredential::ApiKey(_) => f.write_str("ApiKey(***)"),
            TmdbCredential::AccessToken(_) => f.write_str("AccessToken(***)"),
        }
    }
}

pub fn create_tmdb_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
