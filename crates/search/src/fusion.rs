use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// Which retrieval channel produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    Keyword,
    Fuzzy,
    Semantic,
}

impl SearchSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Fuzzy => "fuzzy",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hit from one channel, already rescaled onto the shared score axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredHit {
    pub id: u64,
    pub title: String,
    pub score: f32,
    pub source: SearchSource,
}

/// Ordered record of the channels that contributed to a fused result.
///
/// Renders as the `+`-joined tag string (`keyword+semantic`). Tags repeat
/// when the same channel contributes twice; the order is arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSet(Vec<SearchSource>);

impl SourceSet {
    #[must_use]
    pub fn single(source: SearchSource) -> Self {
        Self(vec![source])
    }

    pub fn push(&mut self, source: SearchSource) {
        self.0.push(source);
    }

    #[must_use]
    pub fn contains(&self, source: SearchSource) -> bool {
        self.0.contains(&source)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SearchSource] {
        &self.0
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, source) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("+")?;
            }
            f.write_str(source.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for SourceSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One fused, deduplicated search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusedResult {
    pub id: u64,
    pub title: String,
    pub final_score: f32,
    pub sources: SourceSet,
}

/// Merges per-channel result streams into one ranked list.
///
/// Implementations own the scoring arithmetic; the orchestrator stays
/// agnostic so the fusion scheme can be swapped without touching the
/// channels.
pub trait RankFusion: Send + Sync {
    fn merge(&self, streams: &[Vec<ScoredHit>]) -> Vec<FusedResult>;
}

/// Reference fusion: raw additive accumulation keyed by id.
///
/// Scores from every stream are summed with no normalization, source tags
/// concatenate in arrival order and the title comes from the latest stream
/// that mentioned the id. Feeding the same stream twice therefore doubles
/// its contribution; callers control deduplication by controlling the
/// streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditiveFusion;

impl RankFusion for AdditiveFusion {
    fn merge(&self, streams: &[Vec<ScoredHit>]) -> Vec<FusedResult> {
        let mut merged: HashMap<u64, FusedResult> = HashMap::new();

        for stream in streams {
            for hit in stream {
                match merged.entry(hit.id) {
                    Entry::Occupied(mut entry) => {
                        let result = entry.get_mut();
                        result.final_score += hit.score;
                        result.sources.push(hit.source);
                        result.title = hit.title.clone();
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(FusedResult {
                            id: hit.id,
                            title: hit.title.clone(),
                            final_score: hit.score,
                            sources: SourceSet::single(hit.source),
                        });
                    }
                }
            }
        }

        let mut results: Vec<FusedResult> = merged.into_values().collect();
        results.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then_with(|| a.id.cmp(&b.id))
        });
        results
    }
}
