//! Parse cache for budget files
//!
//! Parsing is cheap, so the cache is only an optimization: an entry is keyed
//! by the source file identity (canonical path, modification time, length)
//! and the parse options, and any mismatch is treated as a miss. There is one
//! entry per (path, options), so a changed file replaces its old entry.
//! Entry names use SHA-256 so they stay the same across builds.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::file_io::{read_json_optional, write_json_atomic};
use crate::error::{BudgetError, BudgetResult};
use crate::services::prepare::{ParseOptions, PreparationOutcome};

/// Identity of a parsed source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKey {
    pub path: PathBuf,
    pub modified_secs: u64,
    pub modified_nanos: u32,
    pub len: u64,
    /// Fingerprint of the parse options
    pub options: String,
}

impl CacheKey {
    /// Build the key for a file on disk
    pub fn for_file(path: &Path, options: &ParseOptions) -> BudgetResult<Self> {
        let path = fs::canonicalize(path)
            .map_err(|e| BudgetError::Io(format!("Failed to resolve {}: {}", path.display(), e)))?;
        let metadata = fs::metadata(&path)?;
        let modified = metadata
            .modified()?
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        Ok(Self {
            path,
            modified_secs: modified.as_secs(),
            modified_nanos: modified.subsec_nanos(),
            len: metadata.len(),
            options: options.fingerprint(),
        })
    }

    /// File name of the entry for this key
    fn entry_name(&self) -> String {
        let input = format!("{}\n{}", self.path.to_string_lossy(), self.options);
        format!("table-{}.json", stable_digest(input.as_bytes()))
    }
}

/// First 16 hex characters of the SHA-256 of `input`
pub fn stable_digest(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    let result = hasher.finalize();

    result[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    key: CacheKey,
    cached_at: DateTime<Utc>,
    outcome: PreparationOutcome,
}

/// On-disk cache of prepared budget files
#[derive(Debug, Clone)]
pub struct TableCache {
    dir: PathBuf,
}

impl TableCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.entry_name())
    }

    /// Cached outcome for `key`, if present and current
    ///
    /// Unreadable entries are logged and treated as misses.
    pub fn get(&self, key: &CacheKey) -> Option<PreparationOutcome> {
        let path = self.entry_path(key);
        match read_json_optional::<CacheEntry, _>(&path) {
            Ok(Some(entry)) if entry.key == *key => {
                debug!(path = %key.path.display(), cached_at = %entry.cached_at, "parse cache hit");
                Some(entry.outcome)
            }
            Ok(Some(_)) => {
                debug!(path = %key.path.display(), "parse cache entry is stale");
                None
            }
            Ok(None) => {
                debug!(path = %key.path.display(), "parse cache miss");
                None
            }
            Err(e) => {
                warn!(error = %e, "ignoring unreadable parse cache entry");
                None
            }
        }
    }

    /// Store `outcome` under `key`, replacing any older entry for the file
    pub fn put(&self, key: &CacheKey, outcome: &PreparationOutcome) -> BudgetResult<()> {
        let entry = CacheEntry {
            key: key.clone(),
            cached_at: Utc::now(),
            outcome: outcome.clone(),
        };
        write_json_atomic(self.entry_path(key), &entry)
    }

    /// Remove every cache entry, returning how many were deleted
    pub fn clear(&self) -> BudgetResult<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_entry = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("table-"))
                .unwrap_or(false);

            if is_entry && path.is_file() {
                fs::remove_file(&path).map_err(|e| {
                    BudgetError::Cache(format!("Failed to remove {}: {}", path.display(), e))
                })?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}
