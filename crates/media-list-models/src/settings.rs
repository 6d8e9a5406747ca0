use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const API_KEY: &str = "api_key";

/// Opaque per-list settings stored next to the entries (`"movies_config"`).
///
/// Only `api_key` is interpreted; every other key is carried through
/// untouched so hand-edited settings survive a save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListSettings(Map<String, Value>);

impl ListSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// TMDB credential (v3 API key or v4 read access token), ignoring blanks
    pub fn api_key(&self) -> Option<&str> {
        self.0
            .get(API_KEY)
            .and_then(Value::as_str)
            .filter(|key| !key.trim().is_empty())
    }

    pub fn set_api_key(&mut self, key: String) {
        self.set(API_KEY, Value::String(key));
    }

    /// Returns the removed key, if one was stored
    pub fn unset_api_key(&mut self) -> Option<String> {
        match self.remove(API_KEY) {
            Some(Value::String(key)) => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_key_set_and_unset() {
        let mut settings = ListSettings::new();
        assert_eq!(settings.api_key(), None);

        settings.set_api_key("abc123".to_string());
        assert_eq!(settings.api_key(), Some("abc123"));

        assert_eq!(settings.unset_api_key(), Some("abc123".to_string()));
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.unset_api_key(), None);
    }

    #[test]
    fn test_blank_or_non_string_api_key_is_ignored() {
        let mut settings = ListSettings::new();
        settings.set("api_key", json!("   "));
        assert_eq!(settings.api_key(), None);

        settings.set("api_key", json!(42));
        assert_eq!(settings.api_key(), None);
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let value = json!({"api_key": "k", "region": "GB", "nested": {"a": [1, 2]}});
        let settings: ListSettings = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(settings.get("region"), Some(&json!("GB")));
        assert_eq!(serde_json::to_value(&settings).unwrap(), value);
    }
}
