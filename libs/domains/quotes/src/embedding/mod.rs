mod openai;
mod provider;

pub use openai::{DEFAULT_BASE_URL, OpenAIConfig, OpenAIProvider};
pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
