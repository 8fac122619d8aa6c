use crate::config::HybridConfig;
use crate::error::Result;
use crate::fusion::{AdditiveFusion, FusedResult, RankFusion, ScoredHit, SearchSource};
use serde::Serialize;
use std::sync::Arc;
use taskseek_corpus::{CorpusProvider, KeywordProvider};
use taskseek_fuzzy::{FuzzyRanker, MatchClassifier};
use taskseek_vector_store::{EmbeddingProvider, VectorStore};

/// Fused results plus the fuzzy channel's "did you mean" suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridOutcome {
    pub results: Vec<FusedResult>,
    pub suggestion: Option<String>,
}

impl HybridOutcome {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            suggestion: None,
        }
    }
}

/// Orchestrates the keyword, fuzzy and semantic channels over one corpus.
///
/// Each query fans out to the three channels concurrently, rescales their
/// native scores onto the shared fusion axis and merges the streams in the
/// fixed order keyword, fuzzy, semantic. A failing collaborator fails the
/// whole query; there is no per-channel isolation.
pub struct HybridSearch {
    corpus: Arc<dyn CorpusProvider>,
    keyword: Arc<dyn KeywordProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<VectorStore>,
    ranker: FuzzyRanker,
    fusion: Box<dyn RankFusion>,
    config: HybridConfig,
}

impl HybridSearch {
    #[must_use]
    pub fn new(
        corpus: Arc<dyn CorpusProvider>,
        keyword: Arc<dyn KeywordProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<VectorStore>,
        config: HybridConfig,
    ) -> Self {
        Self {
            corpus,
            keyword,
            embedder,
            store,
            ranker: FuzzyRanker::new(),
            fusion: Box::new(AdditiveFusion),
            config,
        }
    }

    /// Replace the fusion strategy.
    #[must_use]
    pub fn with_fusion(mut self, fusion: Box<dyn RankFusion>) -> Self {
        self.fusion = fusion;
        self
    }

    /// Embed every corpus title into the vector store.
    ///
    /// Titles are batch-embedded first, then upserted; returns the number
    /// of indexed items.
    pub async fn index_corpus(&self) -> Result<usize> {
        let items = self.corpus.snapshot().await?;
        let titles: Vec<String> = items.iter().map(|item| item.title.clone()).collect();
        let embeddings = self.embedder.embed_batch(&titles).await?;
        for (item, embedding) in items.iter().zip(embeddings) {
            self.store.upsert(item.id, item.title.clone(), embedding);
        }
        log::info!("Indexed {} corpus items into the vector store", items.len());
        Ok(items.len())
    }

    /// Run one hybrid query.
    ///
    /// A blank query resolves to an empty outcome without touching any
    /// channel.
    pub async fn search(&self, query: &str) -> Result<HybridOutcome> {
        let query = MatchClassifier::normalize(query);
        if query.is_empty() {
            return Ok(HybridOutcome::empty());
        }

        let (keyword_stream, (fuzzy_stream, suggestion), semantic_stream) = tokio::try_join!(
            self.keyword_stream(&query),
            self.fuzzy_stream(&query),
            self.semantic_stream(&query),
        )?;

        let results = self
            .fusion
            .merge(&[keyword_stream, fuzzy_stream, semantic_stream]);
        log::debug!("Hybrid '{}': {} fused results", query, results.len());

        Ok(HybridOutcome {
            results,
            suggestion,
        })
    }

    async fn keyword_stream(&self, query: &str) -> Result<Vec<ScoredHit>> {
        let hits = self.keyword.keyword_hits(query).await?;
        Ok(hits
            .into_iter()
            .map(|item| ScoredHit {
                id: item.id,
                title: item.title,
                score: self.config.keyword_score,
                source: SearchSource::Keyword,
            })
            .collect())
    }

    async fn fuzzy_stream(&self, query: &str) -> Result<(Vec<ScoredHit>, Option<String>)> {
        let corpus = self.corpus.snapshot().await?;
        let outcome = self.ranker.search(query, &corpus);
        let stream = outcome
            .results
            .into_iter()
            .map(|result| ScoredHit {
                id: result.id,
                title: result.title,
                score: self.config.fuzzy_fusion_score(result.score),
                source: SearchSource::Fuzzy,
            })
            .collect();
        Ok((stream, outcome.suggestion))
    }

    async fn semantic_stream(&self, query: &str) -> Result<Vec<ScoredHit>> {
        let embedding = self.embedder.embed(query).await?;
        Ok(self
            .store
            .query(&embedding, self.config.top_k)
            .into_iter()
            .map(|hit| ScoredHit {
                id: hit.id,
                title: hit.text,
                score: hit.score,
                source: SearchSource::Semantic,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use taskseek_corpus::{CorpusError, InMemoryCorpus, TaskItem};
    use taskseek_vector_store::{HashEmbedder, VectorStoreError};

    fn sample_corpus() -> Arc<InMemoryCorpus> {
        Arc::new(InMemoryCorpus::from_items([
            TaskItem::new(1, "Email boss".to_string()),
            TaskItem::new(2, "Organize desk".to_string()),
            TaskItem::new(3, "Update report".to_string()),
        ]))
    }

    fn searcher(
        corpus: Arc<InMemoryCorpus>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: HybridConfig,
    ) -> (HybridSearch, Arc<VectorStore>) {
        let store = Arc::new(VectorStore::new());
        let search = HybridSearch::new(
            corpus.clone(),
            corpus,
            embedder,
            Arc::clone(&store),
            config,
        );
        (search, store)
    }

    /// Embedder with hand-picked vectors so channel arithmetic stays exact.
    struct StaticEmbedder {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl StaticEmbedder {
        fn new(entries: &[(&str, &[f32])]) -> Self {
            Self {
                vectors: entries
                    .iter()
                    .map(|(text, vector)| ((*text).to_string(), vector.to_vec()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for StaticEmbedder {
        async fn embed(&self, text: &str) -> taskseek_vector_store::Result<Vec<f32>> {
            self.vectors.get(text).cloned().ok_or_else(|| {
                VectorStoreError::EmbeddingError(format!("no vector for '{text}'"))
            })
        }

        fn dimension(&self) -> usize {
            3
        }
    }

    struct FailingCorpus;

    #[async_trait]
    impl CorpusProvider for FailingCorpus {
        async fn snapshot(&self) -> taskseek_corpus::Result<Vec<TaskItem>> {
            Err(CorpusError::Unavailable("database offline".to_string()))
        }
    }

    #[async_trait]
    impl KeywordProvider for FailingCorpus {
        async fn keyword_hits(&self, _query: &str) -> taskseek_corpus::Result<Vec<TaskItem>> {
            Err(CorpusError::Unavailable("database offline".to_string()))
        }
    }

    fn exact_embedder() -> Arc<StaticEmbedder> {
        Arc::new(StaticEmbedder::new(&[
            ("Email boss", &[1.0, 0.0, 0.0]),
            ("Organize desk", &[0.0, 1.0, 0.0]),
            ("Update report", &[0.0, 0.0, 1.0]),
            ("desk", &[0.0, 1.0, 0.0]),
            ("dsek", &[0.0, 1.0, 0.0]),
            ("plan", &[1.0, 0.0, 0.0]),
        ]))
    }

    #[tokio::test]
    async fn overlapping_channels_sum_scores_and_concatenate_tags() {
        let (search, _store) = searcher(sample_corpus(), exact_embedder(), HybridConfig::default());
        search.index_corpus().await.unwrap();

        let outcome = search.search("desk").await.unwrap();
        let ids: Vec<u64> = outcome.results.iter().map(|result| result.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        // keyword 1.0 + fuzzy substring 0.78 + semantic ~1.0
        let top = &outcome.results[0];
        assert!((top.final_score - 2.78).abs() < 1e-3, "score {}", top.final_score);
        assert_eq!(top.sources.to_string(), "keyword+fuzzy+semantic");
        assert_eq!(top.title, "Organize desk");
        assert_eq!(outcome.suggestion, None);
    }

    #[tokio::test]
    async fn weak_fuzzy_match_contributes_negatively_and_suggests() {
        let (search, _store) = searcher(sample_corpus(), exact_embedder(), HybridConfig::default());
        search.index_corpus().await.unwrap();

        let outcome = search.search("dsek").await.unwrap();
        assert_eq!(outcome.suggestion.as_deref(), Some("desk"));

        let top = &outcome.results[0];
        assert_eq!(top.id, 2);
        // fuzzy band 101 rescales to -0.21; semantic ~1.0
        assert!((top.final_score - 0.79).abs() < 1e-3, "score {}", top.final_score);
        assert_eq!(top.sources.to_string(), "fuzzy+semantic");
    }

    #[tokio::test]
    async fn semantic_channel_honors_top_k() {
        let config = HybridConfig {
            top_k: 1,
            ..HybridConfig::default()
        };
        let (search, _store) = searcher(sample_corpus(), exact_embedder(), config);
        search.index_corpus().await.unwrap();

        // "plan" reaches no keyword or fuzzy band, so only the capped
        // semantic stream contributes.
        let outcome = search.search("plan").await.unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].sources.to_string(), "semantic");
        assert_eq!(outcome.suggestion, None);
    }

    #[tokio::test]
    async fn blank_query_short_circuits_before_any_channel() {
        // An embedder with no vectors errors on every call; a blank query
        // must succeed anyway because no channel runs.
        let (search, _store) = searcher(
            sample_corpus(),
            Arc::new(StaticEmbedder::new(&[])),
            HybridConfig::default(),
        );

        let outcome = search.search("   ").await.unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.suggestion, None);
    }

    #[tokio::test]
    async fn embedding_failure_fails_the_whole_search() {
        let (search, _store) = searcher(
            sample_corpus(),
            Arc::new(StaticEmbedder::new(&[])),
            HybridConfig::default(),
        );

        let err = search.search("desk").await.unwrap_err();
        assert!(matches!(err, SearchError::VectorStoreError(_)), "{err}");
    }

    #[tokio::test]
    async fn corpus_failure_fails_the_whole_search() {
        let corpus = Arc::new(FailingCorpus);
        let search = HybridSearch::new(
            corpus.clone(),
            corpus,
            exact_embedder(),
            Arc::new(VectorStore::new()),
            HybridConfig::default(),
        );

        let err = search.search("desk").await.unwrap_err();
        assert!(matches!(err, SearchError::CorpusError(_)), "{err}");
    }

    #[tokio::test]
    async fn index_corpus_embeds_every_title() {
        let (search, store) = searcher(
            sample_corpus(),
            Arc::new(HashEmbedder::new(32)),
            HybridConfig::default(),
        );

        let count = search.index_corpus().await.unwrap();
        assert_eq!(count, 3);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(2).unwrap().text, "Organize desk");
    }

    #[tokio::test]
    async fn hash_embedder_end_to_end_smoke() {
        let (search, _store) = searcher(
            sample_corpus(),
            Arc::new(HashEmbedder::new(64)),
            HybridConfig::default(),
        );
        search.index_corpus().await.unwrap();

        let outcome = search.search("desk").await.unwrap();
        let top = &outcome.results[0];
        assert_eq!(top.id, 2);
        assert!(top.sources.contains(SearchSource::Keyword));
        assert!(top.sources.contains(SearchSource::Fuzzy));
        assert!(top.final_score > 1.0, "score {}", top.final_score);
    }
}
