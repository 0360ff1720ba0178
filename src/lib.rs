// ============================================================================
// Article Backend Library
// ============================================================================

pub mod config;
pub mod core;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use crate::core::{Article, ArticleDraft, ArticleUpdate, Result, StoreError};
pub use crate::storage::{
    ArticleStore, SnapshotFile, SnapshotWorker, StoreSnapshot, load_or_seed, spawn_snapshot_worker,
};
pub use crate::web::{AppState, build_router};
