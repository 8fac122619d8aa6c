use crate::error::{CorpusError, Result};
use crate::item::TaskItem;
use crate::provider::{CorpusProvider, KeywordProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

pub const CORPUS_SCHEMA_VERSION: u32 = 1;

/// In-memory corpus keyed by id.
///
/// Iteration order is ascending id, which doubles as the documented
/// corpus-scan order for suggestion candidates.
#[derive(Debug, Default)]
pub struct InMemoryCorpus {
    items: RwLock<BTreeMap<u64, String>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCorpus {
    schema_version: u32,
    items: Vec<TaskItem>,
}

impl InMemoryCorpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = TaskItem>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id, item.title))
            .collect();
        Self {
            items: RwLock::new(items),
        }
    }

    /// Canonical three-item demo corpus used by the CLI seed command.
    #[must_use]
    pub fn sample() -> Self {
        Self::from_items([
            TaskItem::new(1, "Email boss".to_string()),
            TaskItem::new(2, "Organize desk".to_string()),
            TaskItem::new(3, "Update report".to_string()),
        ])
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let persisted: PersistedCorpus = serde_json::from_slice(&bytes)?;
        if persisted.schema_version != CORPUS_SCHEMA_VERSION {
            return Err(CorpusError::SchemaVersion {
                expected: CORPUS_SCHEMA_VERSION,
                found: persisted.schema_version,
            });
        }
        log::debug!(
            "Loaded corpus snapshot from {} ({} items)",
            path.display(),
            persisted.items.len()
        );
        Ok(Self::from_items(persisted.items))
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let persisted = PersistedCorpus {
            schema_version: CORPUS_SCHEMA_VERSION,
            items: self.items_snapshot(),
        };
        let bytes = serde_json::to_vec_pretty(&persisted)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Insert or replace a title under `id`.
    pub fn upsert(&self, id: u64, title: impl Into<String>) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, title.into());
    }

    /// Remove `id`; returns whether it was present.
    pub fn remove(&self, id: u64) -> bool {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn items_snapshot(&self) -> Vec<TaskItem> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, title)| TaskItem::new(*id, title.clone()))
            .collect()
    }
}

#[async_trait]
impl CorpusProvider for InMemoryCorpus {
    async fn snapshot(&self) -> Result<Vec<TaskItem>> {
        Ok(self.items_snapshot())
    }
}

#[async_trait]
impl KeywordProvider for InMemoryCorpus {
    async fn keyword_hits(&self, query: &str) -> Result<Vec<TaskItem>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .items_snapshot()
            .into_iter()
            .filter(|item| item.title.to_lowercase().contains(query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn snapshot_iterates_in_ascending_id_order() {
        let corpus = InMemoryCorpus::new();
        corpus.upsert(3, "Update report");
        corpus.upsert(1, "Email boss");
        corpus.upsert(2, "Organize desk");

        let snapshot = corpus.snapshot().await.unwrap();
        let ids: Vec<u64> = snapshot.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn upsert_replaces_and_remove_reports_presence() {
        let corpus = InMemoryCorpus::sample();
        assert_eq!(corpus.len(), 3);

        corpus.upsert(2, "Organize entire desk");
        assert_eq!(corpus.len(), 3);
        let snapshot = corpus.snapshot().await.unwrap();
        assert_eq!(snapshot[1].title, "Organize entire desk");

        assert!(corpus.remove(2));
        assert!(!corpus.remove(2));
        assert_eq!(corpus.len(), 2);
    }

    #[tokio::test]
    async fn keyword_hits_are_case_insensitive_substring_matches() {
        let corpus = InMemoryCorpus::sample();

        let hits = corpus.keyword_hits("desk").await.unwrap();
        assert_eq!(hits, vec![TaskItem::new(2, "Organize desk".to_string())]);

        // Providers receive a normalized query; titles are lowercased on
        // their side of the comparison.
        let hits = corpus.keyword_hits("email").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        assert!(corpus.keyword_hits("").await.unwrap().is_empty());
        assert!(corpus.keyword_hits("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn snapshot_file_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");

        let corpus = InMemoryCorpus::sample();
        corpus.save(&path).await.unwrap();

        let loaded = InMemoryCorpus::load(&path).await.unwrap();
        assert_eq!(
            loaded.snapshot().await.unwrap(),
            corpus.snapshot().await.unwrap()
        );
    }

    #[tokio::test]
    async fn load_rejects_unknown_schema_version() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        tokio::fs::write(&path, r#"{"schema_version":99,"items":[]}"#)
            .await
            .unwrap();

        let err = InMemoryCorpus::load(&path).await.unwrap_err();
        match err {
            CorpusError::SchemaVersion { expected, found } => {
                assert_eq!(expected, CORPUS_SCHEMA_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
