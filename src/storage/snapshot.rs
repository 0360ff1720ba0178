use serde::{Deserialize, Serialize};

use crate::core::{Article, Result, StoreError};

/// Current on-disk snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A complete point-in-time copy of the collection plus the id counter.
///
/// Snapshots are disconnected copies taken under the store's read lock; the
/// persistence worker owns one for the duration of a write and discards it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub next_id: u64,
    pub articles: Vec<Article>,
}

impl StoreSnapshot {
    pub fn new(articles: Vec<Article>, next_id: u64) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            next_id,
            articles,
        }
    }

    /// Serializes the snapshot to MessagePack bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self)
            .map_err(|e| StoreError::Persistence(format!("failed to serialize snapshot: {}", e)))
    }

    /// Decodes a snapshot, rejecting truncated or mismatched byte streams and
    /// unknown format versions.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let snapshot: StoreSnapshot = rmp_serde::from_slice(bytes)
            .map_err(|e| StoreError::Corrupt(format!("failed to deserialize snapshot: {}", e)))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::Corrupt(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }
}
