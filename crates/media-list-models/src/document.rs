use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entry::Entry;
use crate::settings::ListSettings;

pub const MOVIES_KEY: &str = "movies";
pub const MOVIES_CONFIG_KEY: &str = "movies_config";

/// On-disk shape of a watch-list.
///
/// ```json
/// {
///   "movies": { "603": { "tmdb_id": 603, "title": "The Matrix", ... } },
///   "movies_config": { "api_key": "..." }
/// }
/// ```
///
/// `movies` keeps the order of the JSON object, which is the order entries
/// were added in. Top-level keys other than the two above are preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDocument {
    #[serde(default, with = "entry_map")]
    pub movies: Vec<Entry>,
    #[serde(default)]
    pub movies_config: ListSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.movies_config.is_empty() && self.extra.is_empty()
    }
}

/// (De)serializes the entry list as an object keyed by the decimal TMDB id,
/// rejecting keys that disagree with the entry they hold.
mod entry_map {
    use super::Entry;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::collections::HashSet;
    use std::fmt;

    pub fn serialize<S>(entries: &[Entry], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for entry in entries {
            map.serialize_entry(&entry.key(), entry)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Entry>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntryMapVisitor)
    }

    struct EntryMapVisitor;

    impl<'de> Visitor<'de> for EntryMapVisitor {
        type Value = Vec<Entry>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping TMDB ids to movie entries")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            let mut seen = HashSet::new();

            while let Some((key, entry)) = access.next_entry::<String, Entry>()? {
                if key != entry.key() {
                    return Err(de::Error::custom(format!(
                        "entry key \"{}\" does not match tmdb_id {}",
                        key, entry.tmdb_id
                    )));
                }
                if !seen.insert(entry.tmdb_id) {
                    return Err(de::Error::custom(format!(
                        "tmdb_id {} appears more than once",
                        entry.tmdb_id
                    )));
                }
                entries.push(entry);
            }

            Ok(entries)
        }
    }
}
