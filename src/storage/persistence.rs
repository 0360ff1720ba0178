//! Snapshot persistence: the snapshot file, the background save worker, and
//! the startup load-or-seed path.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::{Notify, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::core::{Article, Result, StoreError};
use crate::storage::snapshot::StoreSnapshot;
use crate::storage::store::ArticleStore;

// ============================================================================
// Snapshot File
// ============================================================================

/// Owns the snapshot path and performs whole-file reads and writes.
///
/// Saves truncate and rewrite in place; a crash mid-write can leave a corrupt
/// file, which the startup path recovers from by reseeding.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Encodes the snapshot and overwrites the target file.
    pub fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Persistence(format!("failed to create snapshot directory: {}", e))
            })?;
        }

        let bytes = snapshot.encode()?;
        let file = File::create(&self.path).map_err(|e| {
            StoreError::Persistence(format!("failed to create snapshot file: {}", e))
        })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&bytes)
            .map_err(|e| StoreError::Persistence(format!("failed to write snapshot: {}", e)))?;
        writer
            .flush()
            .map_err(|e| StoreError::Persistence(format!("failed to flush snapshot: {}", e)))?;
        Ok(())
    }

    /// Reads and decodes the snapshot. `Ok(None)` when the file is absent.
    pub fn load(&self) -> Result<Option<StoreSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut file = File::open(&self.path)
            .map_err(|e| StoreError::Persistence(format!("failed to open snapshot: {}", e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| StoreError::Persistence(format!("failed to read snapshot: {}", e)))?;
        Ok(Some(StoreSnapshot::decode(&bytes)?))
    }
}

// ============================================================================
// Save Signal
// ============================================================================

/// Single-slot save request handle handed to the store.
///
/// Requests collapse into at most one pending wakeup, so a burst of mutations
/// produces a single write of the latest state and writes stay ordered.
#[derive(Debug, Clone)]
pub struct SaveSignal {
    notify: Arc<Notify>,
}

impl SaveSignal {
    /// Non-blocking; schedules a snapshot write on the worker task.
    pub fn request_save(&self) {
        self.notify.notify_one();
    }
}

// ============================================================================
// Snapshot Worker
// ============================================================================

/// Dedicated background task that serializes the store to disk on request.
///
/// Write failures are logged and swallowed: the mutation that triggered the
/// save already committed in memory, so the service keeps serving even if
/// persistence is permanently broken.
pub struct SnapshotWorker {
    signal: SaveSignal,
    stop_tx: Option<oneshot::Sender<()>>,
    join_handle: Option<JoinHandle<()>>,
}

impl SnapshotWorker {
    /// Handle for wiring store mutations to this worker.
    pub fn save_signal(&self) -> SaveSignal {
        self.signal.clone()
    }

    /// Signals the worker to stop and waits for it to finish. The worker
    /// writes one final snapshot on the way out, so a clean shutdown flushes
    /// any still-pending coalesced request.
    pub async fn stop(mut self) -> Result<()> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(join_handle) = self.join_handle.take() {
            join_handle
                .await
                .map_err(|e| StoreError::Persistence(format!("snapshot worker join: {}", e)))?;
        }
        Ok(())
    }
}

impl Drop for SnapshotWorker {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(join_handle) = self.join_handle.take() {
            join_handle.abort();
        }
    }
}

/// Spawns the persistence task for `store`, writing to `file`.
pub fn spawn_snapshot_worker(store: Arc<ArticleStore>, file: SnapshotFile) -> SnapshotWorker {
    let notify = Arc::new(Notify::new());
    let signal = SaveSignal {
        notify: notify.clone(),
    };
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let join_handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = &mut stop_rx => {
                    save_once(&store, &file).await;
                    break;
                }
                _ = notify.notified() => {
                    save_once(&store, &file).await;
                }
            }
        }
    });

    SnapshotWorker {
        signal,
        stop_tx: Some(stop_tx),
        join_handle: Some(join_handle),
    }
}

async fn save_once(store: &ArticleStore, file: &SnapshotFile) {
    let snapshot = store.snapshot().await;
    if let Err(err) = file.save(&snapshot) {
        warn!(path = %file.path().display(), error = %err, "snapshot write failed");
    }
}

// ============================================================================
// Startup: load or seed
// ============================================================================

/// Loads the persisted snapshot into `store`. On any failure (file absent,
/// unreadable, corrupt) the error is discarded, the store is populated with
/// the fixed seed set, and one synchronous save brings the file in line with
/// the seeded state.
pub async fn load_or_seed(store: &ArticleStore, file: &SnapshotFile) {
    match file.load() {
        Ok(Some(snapshot)) => {
            let count = snapshot.articles.len();
            store.restore(snapshot).await;
            info!(articles = count, path = %file.path().display(), "loaded articles from snapshot");
        }
        Ok(None) => {
            info!(path = %file.path().display(), "no snapshot found, seeding sample articles");
            seed(store, file).await;
        }
        Err(err) => {
            warn!(path = %file.path().display(), error = %err, "snapshot unreadable, reseeding");
            seed(store, file).await;
        }
    }
}

async fn seed(store: &ArticleStore, file: &SnapshotFile) {
    store.restore(seed_snapshot()).await;
    if let Err(err) = file.save(&store.snapshot().await) {
        warn!(path = %file.path().display(), error = %err, "failed to persist seed articles");
    }
}

/// The fixed sample set a fresh deployment starts with.
pub fn seed_snapshot() -> StoreSnapshot {
    let now = Utc::now();
    let articles = vec![
        Article {
            id: 1,
            title: "Introduction to Rust".to_string(),
            description: "Learn the basics of the Rust programming language".to_string(),
            content: "Rust is a systems programming language focused on safety, speed, \
                      and concurrency. Ownership and borrowing let the compiler guarantee \
                      memory safety without a garbage collector."
                .to_string(),
            created_at: now - Duration::hours(24),
            updated_at: now - Duration::hours(24),
        },
        Article {
            id: 2,
            title: "Building REST APIs with Axum".to_string(),
            description: "A practical guide to HTTP services in Rust".to_string(),
            content: "Axum builds on tokio, tower, and hyper to provide an ergonomic \
                      router, typed extractors, and middleware layers for production \
                      web services."
                .to_string(),
            created_at: now - Duration::hours(12),
            updated_at: now - Duration::hours(12),
        },
        Article {
            id: 3,
            title: "Snapshot Persistence for In-Memory Stores".to_string(),
            description: "Mirroring a live collection to durable storage".to_string(),
            content: "Serializing the whole collection after each mutation trades \
                      write amplification for simplicity. A background task keeps the \
                      request path free of disk I/O."
                .to_string(),
            created_at: now - Duration::hours(6),
            updated_at: now - Duration::hours(6),
        },
    ];
    StoreSnapshot::new(articles, 4)
}
