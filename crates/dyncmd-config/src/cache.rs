//! Thread-safe configuration caching with arc-swap for lock-free reads.

use crate::loader::{ConfigError, ConfigLoader};
use crate::schema::Config;
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Thread-safe configuration cache using arc-swap for lock-free reads.
pub struct ConfigCache {
    config: ArcSwap<Config>,
    source: Option<PathBuf>,
}

impl ConfigCache {
    /// Creates a new configuration cache with the given initial configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            source: None,
        }
    }

    /// Loads the file and remembers its path for later reloads.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = ConfigLoader::load_config(path)?;
        Ok(Self {
            config: ArcSwap::from_pointee(config),
            source: Some(path.to_path_buf()),
        })
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Updates the configuration atomically.
    pub fn update(&self, config: Config) {
        self.config.store(Arc::new(config));
    }

    /// Path the cache was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Re-reads the source file and swaps it in.
    ///
    /// On any failure the previous configuration stays active.
    pub fn reload(&self) -> Result<Arc<Config>, ConfigError> {
        let Some(path) = &self.source else {
            return Ok(self.get());
        };

        match ConfigLoader::load_config(path) {
            Ok(config) => {
                self.update(config);
                info!("Configuration reloaded from {}", path.display());
                Ok(self.get())
            }
            Err(e) => {
                warn!("Keeping previous configuration, reload failed: {}", e);
                Err(e)
            }
        }
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
