use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable that relocates every watchflip file
pub const HOME_ENV: &str = "WATCHFLIP_HOME";

/// Base directory from `WATCHFLIP_HOME`, if set and non-empty
pub fn home_override() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchflip");

        Ok(Self::with_base(base_dir))
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// The watch-list document
    pub fn list_file(&self) -> PathBuf {
        self.config_dir.join("watchflip.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Relative log file names from `config.toml` live under the log directory
    pub fn log_file(&self, configured: &Path) -> PathBuf {
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            self.log_dir.join(configured)
        }
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = home_override() {
            return Self::with_base(base);
        }

        // e.g. ~/.config/watchflip on Linux
        Self::new().unwrap_or_else(|_| Self::with_base(".watchflip"))
    }
}
