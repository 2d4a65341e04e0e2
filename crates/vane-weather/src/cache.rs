//! TTL-bounded weather cache persisted as a single JSON file.
//!
//! The cache owns its backing file exclusively within a process; no other
//! component reads or writes it. Single-process single-writer access is
//! assumed: concurrent processes race last-writer-wins on the full-file
//! rewrite, and a reader catching a half-written file sees a parse error,
//! which degrades to a cache miss.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::WeatherRecord;

/// One cached record with its storage timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub stored_at: DateTime<Utc>,
    pub data: WeatherRecord,
}

/// On-disk cache keyed by the strings from [`crate::key::cache_key`].
#[derive(Debug, Clone)]
pub struct WeatherCache {
    path: PathBuf,
}

impl WeatherCache {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached record for `key` if one exists and is younger than
    /// `ttl`. An expired entry is removed from the store on the way out.
    pub fn get(&self, key: &str, ttl: Duration) -> Option<WeatherRecord> {
        let mut store = self.load();
        let entry = store.get(key)?;

        let age = Utc::now().signed_duration_since(entry.stored_at);
        if age < ttl {
            return Some(entry.data.clone());
        }

        tracing::debug!("cache entry {} expired ({} min old)", key, age.num_minutes());
        store.remove(key);
        if let Err(e) = self.persist(&store) {
            tracing::warn!("failed to rewrite weather cache after expiry: {:#}", e);
        }
        None
    }

    /// Upsert `record` under `key`, stamped with the current time.
    ///
    /// Caching is best-effort: a write failure is logged and swallowed so a
    /// successful fetch is never turned into a failed lookup.
    pub fn set(&self, key: &str, record: &WeatherRecord) {
        let mut store = self.load();
        store.insert(
            key.to_string(),
            CacheEntry {
                stored_at: Utc::now(),
                data: record.clone(),
            },
        );

        if let Err(e) = self.persist(&store) {
            tracing::warn!("failed to write weather cache: {:#}", e);
        }
    }

    /// Load the whole store. A missing, unreadable or corrupt file is an
    /// empty store, never an error.
    fn load(&self) -> HashMap<String, CacheEntry> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_str(&contents) {
            Ok(store) => store,
            Err(e) => {
                tracing::debug!("ignoring unreadable weather cache: {}", e);
                HashMap::new()
            }
        }
    }

    fn persist(&self, store: &HashMap<String, CacheEntry>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create cache directory {}", parent.display()))?;
        }

        let json =
            serde_json::to_string_pretty(store).context("failed to serialize weather cache")?;

        fs::write(&self.path, json)
            .with_context(|| format!("failed to write weather cache to {}", self.path.display()))?;
        Ok(())
    }
}
