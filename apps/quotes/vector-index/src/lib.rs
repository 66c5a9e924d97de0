//! Vector Index Service
//!
//! HTTP server in front of an in-memory nearest-neighbor index of quote
//! embeddings.
//!
//! ```text
//! Orchestrator (embeds text)
//!   ↓ POST /api/add_embedding, POST /api/search
//! domain_vector_index::handlers
//!   ↓
//! VectorIndexService (RwLock<FlatIndex>)
//! ```
//!
//! The index starts empty on every boot; callers repopulate it.

pub mod config;
pub mod openapi;
pub mod server;

pub use config::Config;
pub use server::{build_router, run};
