//! Vector Index Domain
//!
//! In-memory exact nearest-neighbor search over fixed-dimension embeddings.
//! Callers store `(id, vector)` pairs and query with a vector to get the ids
//! of the closest entries by Euclidean distance, nearest first.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, request validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Shared state, locking, top_k policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  FlatIndex  │  ← Linear scan, distance ranking
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_vector_index::{IndexConfig, VectorIndexService, handlers};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = VectorIndexService::new(IndexConfig::new(3));
//! service.add_embedding("q1".into(), vec![1.0, 0.0, 0.0]).await?;
//!
//! let ids = service.search(&[0.9, 0.1, 0.0], 5).await?;
//! assert_eq!(ids, vec!["q1"]);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```
//!
//! Contents are lost when the process exits.

pub mod config;
pub mod error;
pub mod handlers;
pub mod index;
pub mod models;
pub mod service;

pub use config::{DEFAULT_DIMENSION, DEFAULT_TOP_K, IndexConfig};
pub use error::{IndexError, IndexResult};
pub use handlers::ApiDoc;
pub use index::{FlatIndex, Neighbor};
pub use models::{IndexEntry, IndexStats, ScoredResult};
pub use service::VectorIndexService;
