//! Task corpus primitives shared by every search channel.
//!
//! Defines the record type ([`TaskItem`]), the collaborator contracts the
//! search layers depend on ([`CorpusProvider`], [`KeywordProvider`]) and an
//! in-memory reference implementation backed by a versioned JSON snapshot
//! file ([`InMemoryCorpus`]).

mod error;
mod item;
mod provider;
mod store;

pub use error::{CorpusError, Result};
pub use item::TaskItem;
pub use provider::{CorpusProvider, KeywordProvider};
pub use store::{InMemoryCorpus, CORPUS_SCHEMA_VERSION};
