//! Banded fuzzy matching over task titles.
//!
//! The channel is built from four small pieces: a Damerau-Levenshtein edit
//! distance ([`damerau_levenshtein`]), a tier classifier mapping one
//! query/title pair onto a score band ([`MatchClassifier`]), a "did you
//! mean" word suggester ([`closest_word`]) and the corpus-level ranker that
//! ties them together ([`FuzzyRanker`]).
//!
//! Scores are bands, not similarities: lower is better, and the absolute
//! values (1, 2, 100 + distance, 200 + distance) are part of the public
//! contract that downstream rescaling depends on.

mod classify;
mod distance;
mod ranker;
mod suggest;

pub use classify::{
    MatchClassifier, MatchTier, TierMatch, FULL_FUZZY_BASE, FULL_FUZZY_MAX_DISTANCE, PREFIX_SCORE,
    SUBSTRING_SCORE, WORD_FUZZY_BASE, WORD_FUZZY_MAX_DISTANCE,
};
pub use distance::damerau_levenshtein;
pub use ranker::{FuzzyRanker, FuzzySearchOutcome, MatchResult};
pub use suggest::{closest_word, SUGGESTION_MAX_DISTANCE};
