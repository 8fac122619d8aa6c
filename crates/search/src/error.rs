use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Corpus error: {0}")]
    CorpusError(#[from] taskseek_corpus::CorpusError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] taskseek_vector_store::VectorStoreError),

    #[error("Config error: {0}")]
    ConfigError(String),
}
