use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// A single hit from an id lookup or title search. Only the id is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
}

/// Raw record as returned by the metadata service, before validation.
/// Missing or null fields decode as empty so validation can reject them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDetails {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Validated canonical fields for a movie
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub tmdb_id: u64,
    pub title: String,
    pub year: i32,
    pub weight: f64,
}

impl Record {
    pub fn into_entry(self) -> Entry {
        Entry::new(self.tmdb_id, self.title, self.year, self.weight)
    }
}

fn null_as_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
