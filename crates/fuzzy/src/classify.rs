use crate::distance::damerau_levenshtein;
use serde::{Deserialize, Serialize};

/// Score of a prefix match, the strongest band.
pub const PREFIX_SCORE: u32 = 1;
/// Score of a substring match.
pub const SUBSTRING_SCORE: u32 = 2;
/// Base score of a per-word fuzzy match; the word distance is added on top.
pub const WORD_FUZZY_BASE: u32 = 100;
/// Base score of a full-title fuzzy match; the title distance is added on top.
pub const FULL_FUZZY_BASE: u32 = 200;
/// Largest per-word distance that still reaches the fuzzy-word band.
pub const WORD_FUZZY_MAX_DISTANCE: usize = 2;
/// Largest full-title distance that still reaches the full-fuzzy band.
pub const FULL_FUZZY_MAX_DISTANCE: usize = 3;

/// Match quality band, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchTier {
    /// Title starts with the query.
    Prefix,
    /// Query appears anywhere in the title.
    Substring,
    /// A single title word is within edit distance 2 of the query.
    FuzzyWord,
    /// The whole title is within edit distance 3 of the query.
    FullFuzzy,
}

/// One classified query/title comparison: the tier plus its banded score.
///
/// Lower is better. Prefix and substring score 1 and 2; the fuzzy bands
/// start at 100 and 200, so bands never interleave and "score <= 2" is a
/// reliable strong-match test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierMatch {
    pub tier: MatchTier,
    pub score: u32,
}

/// Classifies a single query/title pair onto the banded score ladder.
pub struct MatchClassifier;

impl MatchClassifier {
    /// Normalize an input for comparison: trim surrounding whitespace,
    /// then lowercase.
    #[must_use]
    pub fn normalize(input: &str) -> String {
        input.trim().to_lowercase()
    }

    /// Classify after normalizing both sides exactly once.
    ///
    /// Returns `None` when the pair reaches no band, or when the normalized
    /// query is empty (a blank query matches nothing rather than failing).
    #[must_use]
    pub fn classify(query: &str, title: &str) -> Option<TierMatch> {
        Self::classify_normalized(&Self::normalize(query), &Self::normalize(title))
    }

    /// Classify inputs that are already normalized.
    ///
    /// The ranker uses this to normalize the query once per search instead
    /// of once per candidate.
    #[must_use]
    pub fn classify_normalized(query: &str, title: &str) -> Option<TierMatch> {
        if query.is_empty() {
            return None;
        }

        if title.starts_with(query) {
            return Some(TierMatch {
                tier: MatchTier::Prefix,
                score: PREFIX_SCORE,
            });
        }
        if title.contains(query) {
            return Some(TierMatch {
                tier: MatchTier::Substring,
                score: SUBSTRING_SCORE,
            });
        }

        let mut best = title
            .split_whitespace()
            .map(|word| damerau_levenshtein(query, word))
            .min()
            .filter(|distance| *distance <= WORD_FUZZY_MAX_DISTANCE)
            .map(|distance| TierMatch {
                tier: MatchTier::FuzzyWord,
                score: WORD_FUZZY_BASE + distance as u32,
            });

        // The full-title comparison only wins when it beats the word band,
        // which can happen only when no word qualified.
        let full_distance = damerau_levenshtein(query, title);
        if full_distance <= FULL_FUZZY_MAX_DISTANCE {
            let full_score = FULL_FUZZY_BASE + full_distance as u32;
            if best.map_or(true, |hit| full_score < hit.score) {
                best = Some(TierMatch {
                    tier: MatchTier::FullFuzzy,
                    score: full_score,
                });
            }
        }

        best
    }
}
