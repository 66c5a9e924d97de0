//! Access to the vector index, in-process or over HTTP.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_required};
use domain_vector_index::VectorIndexService;
use domain_vector_index::models::{AddEmbeddingRequest, SearchRequest, SearchResponse};
use reqwest::{Client, Response};
use tracing::instrument;

use crate::error::{QuoteError, QuoteResult};

/// The two index operations the quote service relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn add_embedding(&self, id: &str, vector: Vec<f32>) -> QuoteResult<()>;

    /// Ids nearest to `vector`, nearest first
    async fn search(&self, vector: Vec<f32>, top_k: usize) -> QuoteResult<Vec<String>>;
}

#[async_trait]
impl VectorIndex for VectorIndexService {
    async fn add_embedding(&self, id: &str, vector: Vec<f32>) -> QuoteResult<()> {
        VectorIndexService::add_embedding(self, id.to_string(), vector).await?;
        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, top_k: usize) -> QuoteResult<Vec<String>> {
        Ok(VectorIndexService::search(self, &vector, top_k).await?)
    }
}

/// Client for a vector index server reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpVectorIndex {
    client: Client,
    base_url: String,
}

impl HttpVectorIndex {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> QuoteResult<Self> {
        let config = HttpIndexConfig::from_env().map_err(|e| QuoteError::Config(e.to_string()))?;
        Ok(Self::new(config.url))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

/// - VECTOR_INDEX_URL: required
#[derive(Debug, Clone)]
pub struct HttpIndexConfig {
    pub url: String,
}

impl FromEnv for HttpIndexConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("VECTOR_INDEX_URL")?,
        })
    }
}

async fn ensure_success(response: Response) -> QuoteResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    Err(QuoteError::Dependency(format!(
        "vector index error ({}): {}",
        status, error_text
    )))
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    #[instrument(skip(self, vector))]
    async fn add_embedding(&self, id: &str, vector: Vec<f32>) -> QuoteResult<()> {
        let request = AddEmbeddingRequest {
            id: id.to_string(),
            vector,
        };
        let response = self
            .client
            .post(self.url("/add_embedding"))
            .json(&request)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    #[instrument(skip(self, vector))]
    async fn search(&self, vector: Vec<f32>, top_k: usize) -> QuoteResult<Vec<String>> {
        let request = SearchRequest {
            vector,
            top_k: Some(i64::try_from(top_k).unwrap_or(i64::MAX)),
        };
        let response = self
            .client
            .post(self.url("/search"))
            .json(&request)
            .send()
            .await?;
        let body: SearchResponse = ensure_success(response).await?.json().await?;
        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_vector_index::IndexConfig;
    use serde_json::json;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

    #[tokio::test]
    async fn test_local_index_round_trip() {
        let index = VectorIndexService::new(IndexConfig::new(2));
        VectorIndex::add_embedding(&index, "q1", vec![1.0, 0.0]).await.unwrap();
        VectorIndex::add_embedding(&index, "q2", vec![0.0, 1.0]).await.unwrap();

        let ids = VectorIndex::search(&index, vec![0.1, 0.9], 1).await.unwrap();
        assert_eq!(ids, vec!["q2"]);
    }

    #[tokio::test]
    async fn test_local_index_rejection_is_dependency_error() {
        let index = VectorIndexService::new(IndexConfig::new(2));
        let err = VectorIndex::add_embedding(&index, "q1", vec![1.0]).await.unwrap_err();
        assert!(matches!(err, QuoteError::Dependency(_)));
    }

    #[test]
    fn test_http_urls() {
        let index = HttpVectorIndex::new("http://index:8080/");
        assert_eq!(index.url("/search"), "http://index:8080/api/search");
    }

    #[test]
    fn test_http_config_requires_url() {
        temp_env::with_var_unset("VECTOR_INDEX_URL", || {
            assert!(matches!(
                HttpVectorIndex::from_env().unwrap_err(),
                QuoteError::Config(_)
            ));
        });
    }

    #[tokio::test]
    async fn test_http_add_embedding_posts_under_api() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/add_embedding"))
            .and(matchers::body_json(json!({ "id": "q1", "vector": [0.5, 1.0] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let index = HttpVectorIndex::new(mock_server.uri());
        index.add_embedding("q1", vec![0.5, 1.0]).await.unwrap();
    }

    #[tokio::test]
    async fn test_http_search_returns_ids_in_server_order() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/search"))
            .and(matchers::body_json(json!({ "vector": [0.0, 1.0], "top_k": 2 })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "results": ["q2", "q1"] })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let index = HttpVectorIndex::new(mock_server.uri());
        let ids = index.search(vec![0.0, 1.0], 2).await.unwrap();
        assert_eq!(ids, vec!["q2", "q1"]);
    }

    #[tokio::test]
    async fn test_http_rejection_is_dependency_error_with_status() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/add_embedding"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": 1001,
                "error": "VALIDATION_ERROR",
                "message": "vector has 2 dimensions, expected 1536"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let index = HttpVectorIndex::new(mock_server.uri());
        let err = index.add_embedding("q1", vec![0.5, 1.0]).await.unwrap_err();
        match err {
            QuoteError::Dependency(msg) => {
                assert!(msg.contains("400"), "{msg}");
                assert!(msg.contains("expected 1536"), "{msg}");
            }
            other => panic!("expected dependency error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_server_error_on_search_is_dependency_error() {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let index = HttpVectorIndex::new(mock_server.uri());
        let err = index.search(vec![0.0], 1).await.unwrap_err();
        assert!(matches!(err, QuoteError::Dependency(msg) if msg.contains("503")));
    }
}
