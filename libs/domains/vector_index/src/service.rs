//! Vector Index Service - shared, concurrency-safe access to a [`FlatIndex`]

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::IndexConfig;
use crate::error::{IndexError, IndexResult};
use crate::index::{FlatIndex, validate_entry};
use crate::models::{IndexEntry, IndexStats, ScoredResult};

/// Process-wide vector index.
///
/// Cloning is cheap and every clone sees the same entries. Inserts take the
/// write lock, searches hold the read lock for the whole scan, so a search
/// observes either all or none of a concurrent insert.
#[derive(Clone)]
pub struct VectorIndexService {
    index: Arc<RwLock<FlatIndex>>,
    config: IndexConfig,
}

impl VectorIndexService {
    pub fn new(config: IndexConfig) -> Self {
        info!(
            dimension = config.dimension,
            default_top_k = config.default_top_k,
            max_top_k = ?config.max_top_k,
            max_body_bytes = config.max_body_bytes,
            "Vector index initialized"
        );
        Self {
            index: Arc::new(RwLock::new(FlatIndex::new(config.dimension))),
            config,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    /// Store `vector` under `id`. Duplicate ids are kept as separate entries.
    #[instrument(skip(self, vector), fields(dimension = vector.len()))]
    pub async fn add_embedding(&self, id: String, vector: Vec<f32>) -> IndexResult<()> {
        let entry = IndexEntry::new(id, vector);
        validate_entry(self.config.dimension, &entry)?;

        let mut index = self.index.write().await;
        index.extend_validated([entry]);
        debug!(count = index.len(), "Embedding added");
        Ok(())
    }

    /// Store every entry or none of them.
    ///
    /// All entries are validated before the write lock is taken, so a search
    /// never sees part of a batch.
    #[instrument(skip(self, entries), fields(batch_size = entries.len()))]
    pub async fn add_batch(&self, entries: Vec<IndexEntry>) -> IndexResult<usize> {
        if entries.is_empty() {
            return Err(IndexError::Validation("batch must contain at least one entry".into()));
        }
        for (i, entry) in entries.iter().enumerate() {
            validate_entry(self.config.dimension, entry)
                .map_err(|e| IndexError::Validation(format!("entry {i}: {e}")))?;
        }

        let added = entries.len();
        let mut index = self.index.write().await;
        index.extend_validated(entries);
        info!(added, count = index.len(), "Embedding batch added");
        Ok(added)
    }

    /// Ids of the `top_k` nearest entries, nearest first.
    #[instrument(skip(self, query))]
    pub async fn search(&self, query: &[f32], top_k: usize) -> IndexResult<Vec<String>> {
        let top_k = self.clamp_top_k(top_k)?;
        self.validate_query(query)?;

        let index = self.index.read().await;
        let results = index
            .nearest(query, top_k)
            .into_iter()
            .map(|n| n.id.to_string())
            .collect::<Vec<_>>();
        debug!(returned = results.len(), "Search completed");
        Ok(results)
    }

    /// Like [`search`](Self::search) but keeps each hit's squared distance.
    #[instrument(skip(self, query))]
    pub async fn search_with_distances(
        &self,
        query: &[f32],
        top_k: usize,
    ) -> IndexResult<Vec<ScoredResult>> {
        let top_k = self.clamp_top_k(top_k)?;
        self.validate_query(query)?;

        let index = self.index.read().await;
        Ok(index
            .nearest(query, top_k)
            .into_iter()
            .map(|n| ScoredResult {
                id: n.id.to_string(),
                distance: n.distance,
            })
            .collect())
    }

    /// Turn an optional request value into an effective `top_k`.
    ///
    /// `None` uses the configured default. Values below 1 are rejected.
    pub fn resolve_top_k(&self, requested: Option<i64>) -> IndexResult<usize> {
        match requested {
            None => Ok(self.config.default_top_k),
            Some(k) if k < 1 => Err(IndexError::InvalidTopK(k)),
            Some(k) => Ok(usize::try_from(k).unwrap_or(usize::MAX)),
        }
    }

    pub async fn count(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn stats(&self) -> IndexStats {
        IndexStats {
            dimension: self.config.dimension,
            count: self.count().await,
        }
    }

    fn clamp_top_k(&self, top_k: usize) -> IndexResult<usize> {
        if top_k == 0 {
            return Err(IndexError::InvalidTopK(0));
        }
        Ok(match self.config.max_top_k {
            Some(max) => top_k.min(max),
            None => top_k,
        })
    }

    fn validate_query(&self, query: &[f32]) -> IndexResult<()> {
        crate::index::validate_vector(self.config.dimension, query)
    }
}

impl Default for VectorIndexService {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}
