//! Persistent cache of completed rewrite systems.
//!
//! Completion can take seconds for larger presentations, while its result
//! depends only on the presentation. `CompletionCache` memoizes finished
//! systems keyed by the presentation fingerprint and persists them as CBOR.

use crate::fingerprint::HashValue;
use crate::rewrite::{Presentation, RewriteSystem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("CBOR codec: {0}")]
    Codec(#[from] serde_cbor::Error),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CacheEntry {
    presentation: Presentation,
    system: RewriteSystem,
}

/// Completed systems keyed by presentation fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCache {
    entries: BTreeMap<String, CacheEntry>,
}

impl CompletionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(fingerprint: &HashValue) -> String {
        fingerprint.to_hex()
    }

    /// Cached system for `presentation`. An entry whose stored presentation
    /// differs (a fingerprint collision) is treated as a miss.
    pub fn get(&self, presentation: &Presentation) -> Option<&RewriteSystem> {
        self.entries
            .get(&Self::key(&presentation.fingerprint()))
            .filter(|e| &e.presentation == presentation)
            .map(|e| &e.system)
    }

    pub fn insert(&mut self, presentation: &Presentation, system: RewriteSystem) {
        let key = Self::key(&presentation.fingerprint());
        debug!(key = %key, rules = system.rules().len(), "caching completion");
        self.entries.insert(
            key,
            CacheEntry {
                presentation: presentation.clone(),
                system,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>, CacheError> {
        Ok(serde_cbor::to_vec(self)?)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self, CacheError> {
        Ok(serde_cbor::from_slice(bytes)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), CacheError> {
        std::fs::write(path, self.to_cbor()?)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CacheError> {
        let bytes = std::fs::read(path)?;
        Self::from_cbor(&bytes)
    }
}
