use crate::classify::{MatchClassifier, MatchTier, SUBSTRING_SCORE};
use crate::suggest::closest_word;
use serde::{Deserialize, Serialize};
use taskseek_corpus::TaskItem;

/// One corpus item that reached a match band for the current query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: u64,
    /// Original display title, not the normalized form.
    pub title: String,
    pub tier: MatchTier,
    /// Banded score; lower is better.
    pub score: u32,
}

/// Ranked fuzzy matches plus an optional "did you mean" suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzySearchOutcome {
    pub results: Vec<MatchResult>,
    pub suggestion: Option<String>,
}

impl FuzzySearchOutcome {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            suggestion: None,
        }
    }
}

/// Ranks a whole corpus against one query.
///
/// Every title is classified independently; there is no index, so a query
/// costs O(corpus size * title length^2). Non-matches are dropped and the
/// survivors ordered best-first. When nothing strong matched, a spelling
/// suggestion is drawn from the corpus titles themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyRanker;

impl FuzzyRanker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Rank `corpus` against `query`.
    ///
    /// A blank query yields an empty outcome. Results sort ascending by
    /// (score, title, id). The suggestion is computed only when no result
    /// scored at or below the substring band, scanning corpus words in
    /// snapshot order, left to right within each title; the first word at
    /// the minimum distance wins.
    #[must_use]
    pub fn search(&self, query: &str, corpus: &[TaskItem]) -> FuzzySearchOutcome {
        let query = MatchClassifier::normalize(query);
        if query.is_empty() {
            return FuzzySearchOutcome::empty();
        }

        let mut results: Vec<MatchResult> = Vec::new();
        let mut corpus_words: Vec<String> = Vec::new();
        for item in corpus {
            let title = MatchClassifier::normalize(&item.title);
            corpus_words.extend(title.split_whitespace().map(str::to_string));
            if let Some(hit) = MatchClassifier::classify_normalized(&query, &title) {
                results.push(MatchResult {
                    id: item.id,
                    title: item.title.clone(),
                    tier: hit.tier,
                    score: hit.score,
                });
            }
        }

        results.sort_by(|a, b| {
            a.score
                .cmp(&b.score)
                .then_with(|| a.title.cmp(&b.title))
                .then_with(|| a.id.cmp(&b.id))
        });

        let strong_hit = results.iter().any(|result| result.score <= SUBSTRING_SCORE);
        let suggestion = if strong_hit {
            None
        } else {
            closest_word(&query, corpus_words.iter().map(String::as_str)).map(str::to_string)
        };

        log::debug!(
            "Fuzzy '{}': {} matches, suggestion={:?}",
            query,
            results.len(),
            suggestion
        );

        FuzzySearchOutcome {
            results,
            suggestion,
        }
    }
}
