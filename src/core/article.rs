use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored article. `id` and `created_at` are immutable once assigned;
/// `updated_at` is refreshed on every successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an article. Every field is required and must be
/// non-empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
    pub content: String,
}

/// Partial update. `None` leaves a field unchanged; a provided value replaces
/// the stored one and must be non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

impl ArticleUpdate {
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.content.is_some()
    }
}
