//! Quotes Domain
//!
//! Semantic search over motivational quotes. Full records live in a
//! [`QuoteRepository`]; their embeddings live in a [`VectorIndex`], either the
//! in-process [`VectorIndexService`](domain_vector_index::VectorIndexService)
//! or a remote one through [`HttpVectorIndex`].
//!
//! ```text
//!              ┌──────────────┐
//!              │ QuoteService │
//!              └──────┬───────┘
//!        ┌────────────┼─────────────┐
//! ┌──────▼──────┐ ┌───▼────┐ ┌──────▼──────┐
//! │ Embeddings  │ │ Index  │ │ Repository  │
//! └─────────────┘ └────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_quotes::{CreateQuote, InMemoryQuoteRepository, OpenAIProvider, QuoteService};
//! use domain_vector_index::{IndexConfig, VectorIndexService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = QuoteService::new(
//!     InMemoryQuoteRepository::new(),
//!     Arc::new(OpenAIProvider::from_env()?),
//!     Arc::new(VectorIndexService::new(IndexConfig::default())),
//! );
//!
//! service.add_quote(CreateQuote::new("Fortune favors the bold")).await?;
//! let best = service.semantic_search("be brave", 5).await?;
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod explanation;
pub mod index_client;
pub mod models;
pub mod repository;
pub mod service;

pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{QuoteError, QuoteResult};
pub use explanation::{ExplanationProvider, OpenAIChatConfig, OpenAIChatProvider};
pub use index_client::{HttpVectorIndex, VectorIndex};
pub use models::{CreateQuote, Quote, QuoteExplanation, QuoteFilter};
pub use repository::{InMemoryQuoteRepository, QuoteRepository};
pub use service::QuoteService;
