use async_trait::async_trait;

use crate::error::QuoteResult;

/// Trait for embedding generation providers
///
/// The returned vector must have the dimension the vector index was
/// configured with.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> QuoteResult<Vec<f32>>;
}
