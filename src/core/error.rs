use thiserror::Error;

/// Error taxonomy for the store and its persistence layer.
///
/// None of these are fatal: validation and not-found errors are mapped to
/// client responses at the web boundary, corrupt snapshots are recovered by
/// reseeding at startup, and persistence failures are logged and swallowed
/// because the mutation already committed in memory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("article {0} not found")]
    NotFound(u64),

    #[error("corrupt snapshot: {0}")]
    Corrupt(String),

    #[error("persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
