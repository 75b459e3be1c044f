//! Cache store for persisting raw response bodies to disk
//!
//! Provides a `CacheStore` that maps request identities to response bodies and
//! keeps a JSON file in sync with the in-memory map after every write.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// File name of the cache inside the cache directory
const CACHE_FILE_NAME: &str = "nps_cache.json";

/// Errors that can occur when persisting the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Writing the cache file (or creating its directory) failed
    #[error("Failed to write cache file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cache map could not be serialized
    #[error("Failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Returns the default location of the cache file
///
/// Uses `~/.cache/nps-explorer/nps_cache.json` on Linux, or the equivalent XDG
/// path on other platforms. Returns `None` if no home directory is available.
pub fn default_cache_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "nps-explorer")?;
    Some(project_dirs.cache_dir().join(CACHE_FILE_NAME))
}

/// Persistent map from request identity to raw response body
///
/// The whole map is serialized as one JSON object. Every `put` rewrites the
/// file, so the file always matches memory once `put` has returned `Ok`.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Location of the backing JSON file
    path: PathBuf,
    /// In-memory view of the cache
    entries: HashMap<String, String>,
}

impl CacheStore {
    /// Loads the cache from `path`
    ///
    /// A missing, unreadable, or malformed file yields an empty store. This
    /// never fails; problems are only logged at debug level.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Ignoring malformed cache file");
                    HashMap::new()
                }
            },
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No usable cache file, starting empty");
                HashMap::new()
            }
        };

        debug!(path = %path.display(), entries = entries.len(), "Cache loaded");
        Self { path, entries }
    }

    /// Returns the cached body for `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Inserts or replaces an entry, then rewrites the cache file
    ///
    /// The in-memory entry is kept even if the write fails.
    ///
    /// # Returns
    /// * `Ok(())` once the file reflects the new entry
    /// * `Err(CacheError)` if serialization, directory creation, or writing fails
    pub fn put(&mut self, key: impl Into<String>, body: impl Into<String>) -> Result<(), CacheError> {
        self.entries.insert(key.into(), body.into());
        self.save()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the full map to the cache file
    fn save(&self) -> Result<(), CacheError> {
        let json = serde_json::to_string(&self.entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CacheError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
