use crate::commands::prompts;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use media_list_config::{Config, ListStore, PathManager};
use media_list_core::{ListManager, MediaList};
use media_list_sources::{TmdbClient, TmdbCredential};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Environment variable that overrides the stored TMDB key for one run
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Everything a command needs: where files live, settings, and the list store
pub struct AppContext {
    paths: PathManager,
    settings: Config,
    store: ListStore,
}

impl AppContext {
    pub fn new(paths: PathManager, settings: Config, list_file: Option<PathBuf>) -> Self {
        let store = ListStore::new(list_file.unwrap_or_else(|| paths.list_file()));
        Self {
            paths,
            settings,
            store,
        }
    }

    pub fn paths(&self) -> &PathManager {
        &self.paths
    }

    pub fn settings(&self) -> &Config {
        &self.settings
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub fn load_list(&self) -> Result<MediaList> {
        let document = self.store.load().map_err(|e| {
            eyre!("Failed to load list from {}: {}", self.store.path().display(), e)
        })?;
        Ok(MediaList::from_document(document))
    }

    pub fn save_list(&self, list: &MediaList) -> Result<()> {
        self.store.save(&list.to_document()).map_err(|e| {
            eyre!("Failed to save list to {}: {}", self.store.path().display(), e)
        })
    }

    /// `TMDB_API_KEY` wins over the key stored with the list
    pub fn api_key(&self, list: &MediaList) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| list.settings().api_key().map(str::to_string))
    }

    /// Wrap `list` in a manager backed by TMDB.
    ///
    /// When `needs_lookup` is set and no key is available, the user is asked
    /// for one (interactive terminals only) and it is saved right away.
    /// Without `needs_lookup` a missing key is fine: only local TMDB ids will
    /// be resolved and the service is never called.
    pub fn manager(
        &self,
        mut list: MediaList,
        needs_lookup: bool,
        output: &Output,
    ) -> Result<ListManager<TmdbClient>> {
        let key = match self.api_key(&list) {
            Some(key) => key,
            None if needs_lookup => {
                let key = prompts::prompt_first_run_api_key(output)?;
                list.settings_mut().set_api_key(key.clone());
                self.save_list(&list)?;
                output.success("Saved TMDB API key");
                key
            }
            None => {
                debug!("No TMDB API key configured; continuing with local ids only");
                String::new()
            }
        };

        let client = TmdbClient::new(TmdbCredential::parse(&key), &self.settings.tmdb)
            .map_err(|e| eyre!("Failed to create TMDB client: {}", e))?;
        Ok(ListManager::new(list, Arc::new(client)))
    }
}
