use media_list_models::{Entry, ListDocument, ListSettings};
use rand::Rng;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::MediaListError;

/// The watch-list: entries in insertion order plus the opaque settings that
/// are stored alongside them.
///
/// All mutations are keyed by TMDB id and either apply completely or return
/// an error without touching the list.
#[derive(Debug, Clone, Default)]
pub struct MediaList {
    entries: Vec<Entry>,
    settings: ListSettings,
    extra: Map<String, Value>,
}

impl MediaList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: ListDocument) -> Self {
        Self {
            entries: document.movies,
            settings: document.movies_config,
            extra: document.extra,
        }
    }

    pub fn to_document(&self) -> ListDocument {
        ListDocument {
            movies: self.entries.clone(),
            movies_config: self.settings.clone(),
            extra: self.extra.clone(),
        }
    }

    pub fn into_document(self) -> ListDocument {
        ListDocument {
            movies: self.entries,
            movies_config: self.settings,
            extra: self.extra,
        }
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ListSettings {
        &mut self.settings
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, tmdb_id: u64) -> bool {
        self.position(tmdb_id).is_some()
    }

    pub fn get(&self, tmdb_id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.tmdb_id == tmdb_id)
    }

    /// All entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entries not yet watched, in insertion order
    pub fn queued(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.completed)
    }

    fn position(&self, tmdb_id: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.tmdb_id == tmdb_id)
    }

    fn position_or_missing(&self, tmdb_id: u64) -> Result<usize, MediaListError> {
        self.position(tmdb_id)
            .ok_or(MediaListError::NotInList { tmdb_id })
    }

    /// Fails with `DuplicateEntry` (naming the entry already present) if the id is taken
    pub fn check_not_present(&self, tmdb_id: u64) -> Result<(), MediaListError> {
        match self.get(tmdb_id) {
            Some(existing) => Err(MediaListError::DuplicateEntry {
                title: existing.title.clone(),
                year: existing.year,
            }),
            None => Ok(()),
        }
    }

    pub fn insert(&mut self, entry: Entry) -> Result<&Entry, MediaListError> {
        self.check_not_present(entry.tmdb_id)?;
        info!("Adding {} (TMDB {}) to the list", entry.display_name(), entry.tmdb_id);
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn remove(&mut self, tmdb_id: u64) -> Result<Entry, MediaListError> {
        let index = self.position_or_missing(tmdb_id)?;
        let entry = self.entries.remove(index);
        info!("Removed {} (TMDB {}) from the list", entry.display_name(), tmdb_id);
        Ok(entry)
    }

    /// Idempotent: setting the current value again is not an error
    pub fn set_completed(&mut self, tmdb_id: u64, completed: bool) -> Result<&Entry, MediaListError> {
        let index = self.position_or_missing(tmdb_id)?;
        let entry = &mut self.entries[index];
        if entry.completed != completed {
            info!(
                "Marking {} (TMDB {}) as {}",
                entry.display_name(),
                tmdb_id,
                if completed { "watched" } else { "unwatched" }
            );
            entry.completed = completed;
        } else {
            debug!("TMDB {} already has completed = {}", tmdb_id, completed);
        }
        Ok(&self.entries[index])
    }

    /// Weighted draw among unwatched entries using the thread-local RNG
    pub fn flip(&mut self) -> Result<&Entry, MediaListError> {
        self.flip_with(&mut rand::rng())
    }

    /// Weighted draw among unwatched entries; the winner is marked watched
    pub fn flip_with<R: Rng>(&mut self, rng: &mut R) -> Result<&Entry, MediaListError> {
        let index = self.pick_index(rng)?;
        let entry = &mut self.entries[index];
        entry.completed = true;
        info!(
            "Flipped {} (TMDB {}, weight {})",
            entry.display_name(),
            entry.tmdb_id,
            entry.weight
        );
        Ok(&self.entries[index])
    }

    /// Inverse-CDF selection by linear scan: draw `r` in `[0, total)`, subtract
    /// weights in insertion order, take the first entry where `r <= 0`.
    ///
    /// Zero-weight entries are skipped unless every unwatched entry has zero
    /// weight, in which case the first one is returned.
    fn pick_index<R: Rng>(&self, rng: &mut R) -> Result<usize, MediaListError> {
        let queued: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.completed)
            .map(|(i, _)| i)
            .collect();

        let first = *queued.first().ok_or(MediaListError::EmptyQueue)?;

        let total: f64 = queued
            .iter()
            .map(|&i| effective_weight(&self.entries[i]))
            .sum();
        if !(total > 0.0 && total.is_finite()) {
            debug!("All unwatched entries have zero weight, taking the first");
            return Ok(first);
        }

        let mut running = rng.random_range(0.0..total);
        let mut last_weighted = first;
        for &i in &queued {
            let weight = effective_weight(&self.entries[i]);
            if weight <= 0.0 {
                continue;
            }
            last_weighted = i;
            running -= weight;
            if running <= 0.0 {
                return Ok(i);
            }
        }

        // Rounding left a sliver above zero
        Ok(last_weighted)
    }
}

/// Weight used for sampling; anything negative or non-finite counts as zero
fn effective_weight(entry: &Entry) -> f64 {
    if entry.weight.is_finite() && entry.weight > 0.0 {
        entry.weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn entry(tmdb_id: u64, title: &str, weight: f64) -> Entry {
        Entry::new(tmdb_id, title, 2000, weight)
    }

    fn list_of(entries: Vec<Entry>) -> MediaList {
        let mut list = MediaList::new();
        for entry in entries {
            list.insert(entry).unwrap();
        }
        list
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut list = list_of(vec![Entry::new(603, "The Matrix", 1999, 7.6)]);
        let err = list.insert(Entry::new(603, "Matrix (re-release)", 2021, 1.0)).unwrap_err();

        match err {
            MediaListError::DuplicateEntry { title, year } => {
                assert_eq!(title, "The Matrix");
                assert_eq!(year, 1999);
            }
            other => panic!("expected DuplicateEntry, got {:?}", other),
        }
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(603).unwrap().title, "The Matrix");
    }

    #[test]
    fn test_remove_missing_is_not_in_list() {
        let mut list = list_of(vec![entry(1, "A", 1.0)]);
        assert!(matches!(list.remove(2), Err(MediaListError::NotInList { tmdb_id: 2 })));
        assert_eq!(list.len(), 1);

        let removed = list.remove(1).unwrap();
        assert_eq!(removed.tmdb_id, 1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_set_completed_is_idempotent() {
        let mut list = list_of(vec![entry(1, "A", 1.0)]);

        assert!(list.set_completed(1, true).unwrap().completed);
        assert!(list.set_completed(1, true).unwrap().completed);
        assert!(!list.set_completed(1, false).unwrap().completed);
        assert!(!list.set_completed(1, false).unwrap().completed);

        assert!(matches!(
            list.set_completed(7, true),
            Err(MediaListError::NotInList { tmdb_id: 7 })
        ));
    }

    #[test]
    fn test_flip_empty_list_is_empty_queue() {
        let mut list = MediaList::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(list.flip_with(&mut rng), Err(MediaListError::EmptyQueue)));
    }

    #[test]
    fn test_flip_all_completed_is_empty_queue() {
        let mut list = list_of(vec![entry(1, "A", 5.0), entry(2, "B", 3.0)]);
        list.set_completed(1, true).unwrap();
        list.set_completed(2, true).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(list.flip(), Err(MediaListError::EmptyQueue)));
        assert!(matches!(list.flip_with(&mut rng), Err(MediaListError::EmptyQueue)));
    }

    #[test]
    fn test_flip_never_selects_zero_weight() {
        for order in [[("A", 10.0), ("B", 0.0)], [("B", 0.0), ("A", 10.0)]] {
            for seed in 0..500 {
                let mut list = list_of(
                    order
                        .iter()
                        .enumerate()
                        .map(|(i, (title, weight))| entry(i as u64 + 1, title, *weight))
                        .collect(),
                );
                let mut rng = StdRng::seed_from_u64(seed);
                let picked = list.flip_with(&mut rng).unwrap();
                assert_eq!(picked.title, "A", "seed {} picked B", seed);
                assert!(picked.completed);
            }
        }
    }

    #[test]
    fn test_flip_marks_winner_completed_and_shrinks_queue() {
        let mut list = list_of(vec![entry(1, "A", 2.0), entry(2, "B", 2.0), entry(3, "C", 2.0)]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut picked = Vec::new();
        for _ in 0..3 {
            picked.push(list.flip_with(&mut rng).unwrap().tmdb_id);
        }
        picked.sort();
        assert_eq!(picked, vec![1, 2, 3]);
        assert_eq!(list.queued().count(), 0);
        assert!(matches!(list.flip_with(&mut rng), Err(MediaListError::EmptyQueue)));
    }

    #[test]
    fn test_flip_skips_completed_entries() {
        let mut list = list_of(vec![entry(1, "A", 9.0), entry(2, "B", 1.0)]);
        list.set_completed(1, true).unwrap();

        for seed in 0..50 {
            let mut copy = list.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(copy.flip_with(&mut rng).unwrap().tmdb_id, 2);
        }
    }

    #[test]
    fn test_flip_all_zero_weights_takes_first_in_order() {
        let mut list = list_of(vec![entry(5, "E", 0.0), entry(3, "C", 0.0)]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(list.flip_with(&mut rng).unwrap().tmdb_id, 5);
        assert_eq!(list.flip_with(&mut rng).unwrap().tmdb_id, 3);
    }

    #[test]
    fn test_flip_is_deterministic_for_a_seed() {
        let build = || list_of(vec![entry(1, "A", 3.0), entry(2, "B", 5.0), entry(3, "C", 7.0)]);

        let mut first = build();
        let mut second = build();
        let a = first.flip_with(&mut StdRng::seed_from_u64(99)).unwrap().tmdb_id;
        let b = second.flip_with(&mut StdRng::seed_from_u64(99)).unwrap().tmdb_id;
        assert_eq!(a, b);
    }

    #[test]
    fn test_flip_frequencies_follow_weights() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<u64, u32> = HashMap::new();
        let draws = 20_000;

        let template = list_of(vec![entry(1, "A", 1.0), entry(2, "B", 3.0)]);
        for _ in 0..draws {
            let mut list = template.clone();
            *counts.entry(list.flip_with(&mut rng).unwrap().tmdb_id).or_default() += 1;
        }

        let share_b = counts[&2] as f64 / draws as f64;
        assert!((share_b - 0.75).abs() < 0.02, "share of B was {}", share_b);
    }

    #[test]
    fn test_document_round_trip_keeps_order_and_settings() {
        let mut list = list_of(vec![entry(680, "Pulp Fiction", 8.5), entry(11, "Star Wars", 8.2)]);
        list.settings_mut().set_api_key("key".to_string());

        let restored = MediaList::from_document(list.to_document());
        let ids: Vec<u64> = restored.iter().map(|e| e.tmdb_id).collect();
        assert_eq!(ids, vec![680, 11]);
        assert_eq!(restored.settings().api_key(), Some("key"));
    }
}
