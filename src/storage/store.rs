use std::sync::OnceLock;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::{Article, ArticleDraft, ArticleUpdate, Result, StoreError};
use crate::storage::persistence::SaveSignal;
use crate::storage::snapshot::StoreSnapshot;

struct StoreState {
    articles: Vec<Article>,
    next_id: u64,
}

/// Concurrency-safe owner of the live article collection.
///
/// Reads take the shared lock, mutations the exclusive lock. The lock is
/// always released before a save request is dispatched, so persistence never
/// blocks request handling and request handling never blocks persistence.
///
/// Ids are allocated from a counter that only ever increases; deleting an
/// article never frees its id for reuse.
pub struct ArticleStore {
    state: RwLock<StoreState>,
    saver: OnceLock<SaveSignal>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                articles: Vec::new(),
                next_id: 1,
            }),
            saver: OnceLock::new(),
        }
    }

    /// Wires the store to a snapshot worker. Call once at startup; a store
    /// without a signal (unit tests) silently skips save requests.
    pub fn attach_persistence(&self, signal: SaveSignal) {
        let _ = self.saver.set(signal);
    }

    fn request_save(&self) {
        if let Some(signal) = self.saver.get() {
            signal.request_save();
        }
    }

    /// Returns a copy of all articles in insertion order.
    pub async fn list(&self) -> Vec<Article> {
        self.state.read().await.articles.clone()
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.articles.len()
    }

    /// Linear scan by id. The collection is intended to stay small; there is
    /// no id index.
    pub async fn get(&self, id: u64) -> Result<Article> {
        let state = self.state.read().await;
        state
            .articles
            .iter()
            .find(|article| article.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Validates the draft, allocates the next id, stamps both timestamps,
    /// and appends the article to the end of the collection.
    pub async fn create(&self, draft: ArticleDraft) -> Result<Article> {
        validate_draft(&draft)?;

        let article = {
            let mut state = self.state.write().await;
            let now = Utc::now();
            let article = Article {
                id: state.next_id,
                title: draft.title,
                description: draft.description,
                content: draft.content,
                created_at: now,
                updated_at: now,
            };
            state.next_id += 1;
            state.articles.push(article.clone());
            article
        };

        self.request_save();
        Ok(article)
    }

    /// Applies the provided fields in place and refreshes `updated_at`, even
    /// when the patch is empty. `id` and `created_at` never change.
    pub async fn update(&self, id: u64, patch: ArticleUpdate) -> Result<Article> {
        validate_patch(&patch)?;

        let article = {
            let mut state = self.state.write().await;
            let article = state
                .articles
                .iter_mut()
                .find(|article| article.id == id)
                .ok_or(StoreError::NotFound(id))?;

            if let Some(title) = patch.title {
                article.title = title;
            }
            if let Some(description) = patch.description {
                article.description = description;
            }
            if let Some(content) = patch.content {
                article.content = content;
            }
            article.updated_at = Utc::now();
            article.clone()
        };

        self.request_save();
        Ok(article)
    }

    /// Removes the article with the given id, keeping the relative order of
    /// the survivors. Returns whether a removal occurred; a save is requested
    /// only when it did.
    pub async fn delete(&self, id: u64) -> bool {
        let removed = {
            let mut state = self.state.write().await;
            match state.articles.iter().position(|article| article.id == id) {
                Some(index) => {
                    state.articles.remove(index);
                    true
                }
                None => false,
            }
        };

        if removed {
            self.request_save();
        }
        removed
    }

    /// Takes a consistent, disconnected copy for the persistence worker.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot::new(state.articles.clone(), state.next_id)
    }

    /// Replaces the collection and counter wholesale. Startup path only;
    /// does not request a save.
    pub async fn restore(&self, snapshot: StoreSnapshot) {
        let mut state = self.state.write().await;
        state.articles = snapshot.articles;
        state.next_id = snapshot.next_id;
    }
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_draft(draft: &ArticleDraft) -> Result<()> {
    if draft.title.is_empty() || draft.description.is_empty() || draft.content.is_empty() {
        return Err(StoreError::validation(
            "title, description, and content are required",
        ));
    }
    Ok(())
}

fn validate_patch(patch: &ArticleUpdate) -> Result<()> {
    for (field, value) in [
        ("title", &patch.title),
        ("description", &patch.description),
        ("content", &patch.content),
    ] {
        if let Some(value) = value
            && value.is_empty()
        {
            return Err(StoreError::validation(format!("{field} must not be empty")));
        }
    }
    Ok(())
}
