//! # Taskseek Vector Store
//!
//! In-memory vector storage and cosine similarity search for task titles.
//!
//! ## Features
//!
//! - **Concurrency-safe store**: owned map behind a read-write lock,
//!   last-writer-wins upserts
//! - **Total query path**: scoring never fails; mismatched embedding widths
//!   degrade to truncated cosine similarity
//! - **Pluggable embeddings** via [`EmbeddingProvider`], with a
//!   deterministic offline [`HashEmbedder`] for tests and demos
//!
//! ## Example
//!
//! ```
//! use taskseek_vector_store::{EmbeddingProvider, HashEmbedder, VectorStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> taskseek_vector_store::Result<()> {
//! let store = VectorStore::new();
//! let embedder = HashEmbedder::default();
//!
//! store.upsert(2, "Organize desk", embedder.embed("Organize desk").await?);
//!
//! let hits = store.query(&embedder.embed("Organize desk").await?, 5);
//! assert_eq!(hits[0].id, 2);
//! # Ok(())
//! # }
//! ```

mod embeddings;
mod error;
mod similarity;
mod store;
mod types;

pub use embeddings::{EmbeddingProvider, HashEmbedder, DEFAULT_EMBEDDING_DIM};
pub use error::{Result, VectorStoreError};
pub use similarity::cosine_similarity;
pub use store::VectorStore;
pub use types::{SemanticHit, VectorDocument};
