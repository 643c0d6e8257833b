//! Bookmark Store: the student's saved recommendations.
//!
//! Identity is the (university, major, admission track) triple, never a generated ID.
//! Every mutation rewrites the whole list under one fixed key.

pub mod handlers;
pub mod storage;

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::recommendation::Recommendation;
use storage::KeyValueStore;

/// The single storage key holding the serialized bookmark list.
pub const BOOKMARKS_KEY: &str = "unipath_saved";

pub struct BookmarkStore {
    backend: Arc<dyn KeyValueStore>,
    items: Vec<Recommendation>,
}

impl BookmarkStore {
    /// Loads the saved list. Missing, unreadable, or malformed data yields an empty list.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        let items = match backend.get(BOOKMARKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Recommendation>>(&raw) {
                Ok(items) => dedup_by_identity(items),
                Err(e) => {
                    warn!("Stored bookmarks are malformed, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read stored bookmarks, starting empty: {e}");
                Vec::new()
            }
        };

        info!("Loaded {} bookmarks", items.len());
        Self { backend, items }
    }

    pub fn items(&self) -> &[Recommendation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_bookmarked(&self, rec: &Recommendation) -> bool {
        self.items.iter().any(|item| item.same_identity(rec))
    }

    /// Adds `rec` if its identity is absent, otherwise removes every entry with that
    /// identity. Returns whether `rec` is bookmarked afterwards.
    ///
    /// The new list is persisted before it replaces the in-memory one; a failed
    /// write leaves the store unchanged.
    pub async fn toggle(&mut self, rec: &Recommendation) -> Result<bool, AppError> {
        let now_bookmarked = !self.is_bookmarked(rec);

        let next: Vec<Recommendation> = if now_bookmarked {
            let mut next = self.items.clone();
            next.push(rec.clone());
            next
        } else {
            self.items
                .iter()
                .filter(|item| !item.same_identity(rec))
                .cloned()
                .collect()
        };

        self.persist(&next).await?;
        self.items = next;

        debug!(
            "Bookmark {} {} ({}) -> {now_bookmarked}",
            rec.university_name, rec.major_name, rec.admission_type
        );
        Ok(now_bookmarked)
    }

    /// Writes the whole list. The file write and fsync run on the blocking pool.
    async fn persist(&self, items: &[Recommendation]) -> Result<(), AppError> {
        let raw = serde_json::to_string(items)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize bookmarks: {e}")))?;
        let backend = Arc::clone(&self.backend);

        tokio::task::spawn_blocking(move || backend.set(BOOKMARKS_KEY, &raw))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in bookmark write: {e}"))
            })?
            .map_err(|e| AppError::Storage(e.to_string()))
    }
}

/// Keeps the first record of each identity, in stored order.
fn dedup_by_identity(mut items: Vec<Recommendation>) -> Vec<Recommendation> {
    let before = items.len();
    let mut seen = HashSet::new();
    let mut first_seen = Vec::with_capacity(items.len());
    for item in &items {
        first_seen.push(seen.insert(item.bookmark_key()));
    }
    drop(seen);

    let mut keep = first_seen.into_iter();
    items.retain(|_| keep.next().unwrap_or(true));

    if items.len() != before {
        warn!("Dropped {} duplicate bookmarks on load", before - items.len());
    }
    items
}
