//! Exact nearest-neighbor index over fixed-dimension vectors.
//!
//! Entries live in one insertion-ordered `Vec<IndexEntry>`, so an id can never
//! drift away from its vector. Queries are a full linear scan computing squared
//! Euclidean distance; ties rank the earlier insertion first.
//!
//! [`FlatIndex`] is not synchronized. [`crate::VectorIndexService`] owns one
//! behind a lock.

use std::cmp::Ordering;

use crate::error::{IndexError, IndexResult};
use crate::models::IndexEntry;

/// A search hit borrowed from the index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub id: &'a str,
    pub position: usize,
    pub distance: f32,
}

/// Append-only flat vector index.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimension: usize,
    entries: Vec<IndexEntry>,
}

impl FlatIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Check length and finiteness against this index's dimension.
    pub fn validate_vector(&self, vector: &[f32]) -> IndexResult<()> {
        validate_vector(self.dimension, vector)
    }

    /// Validate and append one entry.
    pub fn add(&mut self, entry: IndexEntry) -> IndexResult<()> {
        validate_entry(self.dimension, &entry)?;
        self.entries.push(entry);
        Ok(())
    }

    /// Append entries that were already validated against this dimension.
    pub(crate) fn extend_validated(&mut self, entries: impl IntoIterator<Item = IndexEntry>) {
        self.entries.extend(entries);
    }

    /// The `top_k` nearest entries to `query`, nearest first.
    ///
    /// `top_k` larger than the entry count returns every entry. An empty index
    /// or `top_k == 0` returns nothing.
    pub fn search(&self, query: &[f32], top_k: usize) -> IndexResult<Vec<Neighbor<'_>>> {
        self.validate_vector(query)?;
        Ok(self.nearest(query, top_k))
    }

    /// [`search`](Self::search) for a query already checked against this
    /// dimension. Lets callers validate before taking a lock.
    pub(crate) fn nearest(&self, query: &[f32], top_k: usize) -> Vec<Neighbor<'_>> {
        let k = top_k.min(self.entries.len());
        if k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(f32, usize)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (squared_euclidean(query, &entry.vector), position))
            .collect();

        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, rank);
            scored.truncate(k);
        }
        scored.sort_unstable_by(rank);

        scored
            .into_iter()
            .map(|(distance, position)| Neighbor {
                id: &self.entries[position].id,
                position,
                distance,
            })
            .collect()
    }
}

/// Ascending distance, then ascending insertion position.
fn rank(a: &(f32, usize), b: &(f32, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Sum of squared per-dimension differences. Callers guarantee equal lengths.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

pub fn validate_vector(dimension: usize, vector: &[f32]) -> IndexResult<()> {
    if vector.len() != dimension {
        return Err(IndexError::DimensionMismatch {
            expected: dimension,
            actual: vector.len(),
        });
    }
    if let Some(position) = vector.iter().position(|v| !v.is_finite()) {
        return Err(IndexError::NonFiniteValue { position });
    }
    Ok(())
}

pub fn validate_entry(dimension: usize, entry: &IndexEntry) -> IndexResult<()> {
    if entry.id.is_empty() {
        return Err(IndexError::EmptyId);
    }
    validate_vector(dimension, &entry.vector)
}
