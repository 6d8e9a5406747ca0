use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// One movie on the watch-list.
///
/// Identity is the TMDB id alone: two entries with the same `tmdb_id` are the
/// same movie even if their cached title or weight drifted apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub tmdb_id: u64,
    pub title: String,
    pub year: i32,
    /// Sampling weight for `flip` (TMDB vote average, never negative)
    pub weight: f64,
    #[serde(default)]
    pub completed: bool,
}

impl Entry {
    pub fn new(tmdb_id: u64, title: impl Into<String>, year: i32, weight: f64) -> Self {
        Self {
            tmdb_id,
            title: title.into(),
            year,
            weight,
            completed: false,
        }
    }

    /// Key used for this entry in the persisted `"movies"` object
    pub fn key(&self) -> String {
        self.tmdb_id.to_string()
    }

    /// "Title (Year)" form used in user-facing messages
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.tmdb_id == other.tmdb_id
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tmdb_id.hash(state);
    }
}
