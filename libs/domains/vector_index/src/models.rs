use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One stored vector and the id it was inserted under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IndexEntry {
    pub id: String,
    pub vector: Vec<f32>,
}

impl IndexEntry {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
        }
    }
}

/// Request body for `POST /add_embedding`.
///
/// `quote_id` and `embedding` are accepted for compatibility with existing callers.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddEmbeddingRequest {
    /// Opaque identifier of the embedded record
    #[serde(alias = "quote_id")]
    #[validate(length(min = 1, message = "id must be a non-empty string"))]
    pub id: String,
    /// Embedding values; length must equal the index dimension
    #[serde(alias = "embedding")]
    pub vector: Vec<f32>,
}

/// Request body for `POST /add_embedding/batch`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddBatchRequest {
    #[validate(length(min = 1, message = "entries must not be empty"), nested)]
    pub entries: Vec<AddEmbeddingRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddEmbeddingResponse {
    pub status: String,
}

impl AddEmbeddingResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddBatchResponse {
    pub status: String,
    pub added: usize,
}

/// Request body for `POST /search`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SearchRequest {
    /// Query embedding; length must equal the index dimension
    #[serde(alias = "embedding")]
    pub vector: Vec<f32>,
    /// Number of results; the service default applies when omitted
    #[validate(range(min = 1, message = "top_k must be a positive integer"))]
    pub top_k: Option<i64>,
}

/// Ranked ids, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub results: Vec<String>,
}

/// An id with its squared Euclidean distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoredResult {
    pub id: String,
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoredSearchResponse {
    pub results: Vec<ScoredResult>,
}

/// Size and shape of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IndexStats {
    pub dimension: usize,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_accepts_legacy_field_names() {
        let request: AddEmbeddingRequest =
            serde_json::from_str(r#"{"quote_id": "q1", "embedding": [0.5, 1.0]}"#).unwrap();
        assert_eq!(request.id, "q1");
        assert_eq!(request.vector, vec![0.5, 1.0]);
    }

    #[test]
    fn test_add_request_rejects_empty_id() {
        let request = AddEmbeddingRequest {
            id: String::new(),
            vector: vec![1.0],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_search_request_top_k_is_optional() {
        let request: SearchRequest = serde_json::from_str(r#"{"embedding": [0.1]}"#).unwrap();
        assert_eq!(request.top_k, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_search_request_rejects_non_positive_top_k() {
        for top_k in [0, -3] {
            let request = SearchRequest {
                vector: vec![0.1],
                top_k: Some(top_k),
            };
            assert!(request.validate().is_err(), "top_k={top_k} should be rejected");
        }
    }
}
