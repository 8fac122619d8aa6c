//! Hybrid search pipeline: keyword containment, banded fuzzy matching and
//! vector similarity run as concurrent channels over one corpus and fuse
//! into a single ranked, provenance-tagged list.

mod config;
mod error;
mod fusion;
mod hybrid;

pub use config::HybridConfig;
pub use error::{Result, SearchError};
pub use fusion::{AdditiveFusion, FusedResult, RankFusion, ScoredHit, SearchSource, SourceSet};
pub use hybrid::{HybridOutcome, HybridSearch};
