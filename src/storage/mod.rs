pub mod persistence;
pub mod snapshot;
pub mod store;

pub use persistence::{
    SaveSignal, SnapshotFile, SnapshotWorker, load_or_seed, seed_snapshot, spawn_snapshot_worker,
};
pub use snapshot::{SNAPSHOT_VERSION, StoreSnapshot};
pub use store::ArticleStore;
