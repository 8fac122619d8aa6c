use crate::similarity::cosine_similarity;
use crate::types::{SemanticHit, VectorDocument};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Concurrency-safe in-memory vector store.
///
/// Documents live in an owned map behind a read-write lock: reads run
/// concurrently, writers serialize, and concurrent upserts to the same id
/// resolve last-writer-wins in lock acquisition order. Contents live for
/// the process lifetime only.
#[derive(Debug, Default)]
pub struct VectorStore {
    docs: RwLock<HashMap<u64, VectorDocument>>,
}

impl VectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the document under `id`.
    pub fn upsert(&self, id: u64, text: impl Into<String>, embedding: Vec<f32>) {
        let doc = VectorDocument::new(id, text.into(), embedding);
        self.write().insert(id, doc);
    }

    /// Remove the document under `id`; returns whether it was present.
    pub fn remove(&self, id: u64) -> bool {
        self.write().remove(&id).is_some()
    }

    /// Score every stored document against `query_embedding` and return the
    /// best `top_k`, sorted descending by score with ties broken by
    /// ascending id.
    ///
    /// The scan is brute force over the whole store and never fails: an
    /// empty store yields an empty list, and width mismatches fall back to
    /// truncated cosine similarity.
    #[must_use]
    pub fn query(&self, query_embedding: &[f32], top_k: usize) -> Vec<SemanticHit> {
        let mut hits: Vec<SemanticHit> = self
            .read()
            .values()
            .map(|doc| SemanticHit {
                id: doc.id,
                text: doc.text.clone(),
                score: cosine_similarity(query_embedding, &doc.embedding),
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(top_k);
        hits
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<VectorDocument> {
        self.read().get(&id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<u64, VectorDocument>> {
        self.docs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<u64, VectorDocument>> {
        self.docs.write().unwrap_or_else(PoisonError::into_inner)
    }
}
