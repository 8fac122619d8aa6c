use crate::error::Result;
use crate::item::TaskItem;
use async_trait::async_trait;

/// Read-only view of the full task corpus.
///
/// `snapshot` returns every item in a stable, reproducible order. The fuzzy
/// ranker iterates it directly and the suggestion scan derives its candidate
/// word order from it, so providers must not reorder between calls.
#[async_trait]
pub trait CorpusProvider: Send + Sync {
    async fn snapshot(&self) -> Result<Vec<TaskItem>>;
}

/// Substring lookup over task titles.
///
/// `keyword_hits` expects an already-normalized (trimmed, lowercased) query
/// and returns every item whose lowercased title contains it. An empty query
/// matches nothing.
#[async_trait]
pub trait KeywordProvider: Send + Sync {
    async fn keyword_hits(&self, query: &str) -> Result<Vec<TaskItem>>;
}
