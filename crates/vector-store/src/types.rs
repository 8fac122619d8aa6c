use serde::{Deserialize, Serialize};

/// A stored record: the original text plus its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDocument {
    pub id: u64,
    pub text: String,
    pub embedding: Vec<f32>,
}

impl VectorDocument {
    #[must_use]
    pub const fn new(id: u64, text: String, embedding: Vec<f32>) -> Self {
        Self {
            id,
            text,
            embedding,
        }
    }
}

/// One scored answer from a vector store query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticHit {
    pub id: u64,
    pub text: String,
    /// Cosine similarity against the query embedding.
    pub score: f32,
}
