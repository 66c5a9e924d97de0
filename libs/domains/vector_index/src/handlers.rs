use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse},
};
use utoipa::OpenApi;

use crate::error::IndexResult;
use crate::models::{
    AddBatchRequest, AddBatchResponse, AddEmbeddingRequest, AddEmbeddingResponse, IndexEntry,
    IndexStats, ScoredResult, ScoredSearchResponse, SearchRequest, SearchResponse,
};
use crate::service::VectorIndexService;

/// OpenAPI documentation for the vector index API
#[derive(OpenApi)]
#[openapi(
    paths(add_embedding, add_batch, search, search_scored, stats),
    components(
        schemas(
            AddEmbeddingRequest,
            AddEmbeddingResponse,
            AddBatchRequest,
            AddBatchResponse,
            SearchRequest,
            SearchResponse,
            ScoredResult,
            ScoredSearchResponse,
            IndexStats
        ),
        responses(
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Vector Index", description = "In-memory nearest-neighbor search over embeddings")
    )
)]
pub struct ApiDoc;

/// Router with all vector index endpoints. Nest it wherever the app wants them.
///
/// Bodies are capped at `IndexConfig::max_body_bytes` instead of axum's 2 MB default.
pub fn router(service: VectorIndexService) -> Router {
    let body_limit = DefaultBodyLimit::max(service.config().max_body_bytes);
    Router::new()
        .route("/add_embedding", post(add_embedding))
        .route("/add_embedding/batch", post(add_batch))
        .route("/search", post(search))
        .route("/search/scored", post(search_scored))
        .route("/stats", get(stats))
        .layer(body_limit)
        .with_state(service)
}

/// Add one embedding to the index
#[utoipa::path(
    post,
    path = "/add_embedding",
    tag = "Vector Index",
    request_body = AddEmbeddingRequest,
    responses(
        (status = 200, description = "Embedding stored", body = AddEmbeddingResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 413, description = "Body larger than MAX_BODY_BYTES"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_embedding(
    State(service): State<VectorIndexService>,
    ValidatedJson(input): ValidatedJson<AddEmbeddingRequest>,
) -> IndexResult<Json<AddEmbeddingResponse>> {
    service.add_embedding(input.id, input.vector).await?;
    Ok(Json(AddEmbeddingResponse::success()))
}

/// Add several embeddings atomically
#[utoipa::path(
    post,
    path = "/add_embedding/batch",
    tag = "Vector Index",
    request_body = AddBatchRequest,
    responses(
        (status = 200, description = "All embeddings stored", body = AddBatchResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 413, description = "Body larger than MAX_BODY_BYTES"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_batch(
    State(service): State<VectorIndexService>,
    ValidatedJson(input): ValidatedJson<AddBatchRequest>,
) -> IndexResult<Json<AddBatchResponse>> {
    let entries = input
        .entries
        .into_iter()
        .map(|e| IndexEntry::new(e.id, e.vector))
        .collect();
    let added = service.add_batch(entries).await?;
    Ok(Json(AddBatchResponse {
        status: "success".to_string(),
        added,
    }))
}

/// Find the ids nearest to a query vector
#[utoipa::path(
    post,
    path = "/search",
    tag = "Vector Index",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Ids ordered nearest first", body = SearchResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 413, description = "Body larger than MAX_BODY_BYTES"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search(
    State(service): State<VectorIndexService>,
    ValidatedJson(input): ValidatedJson<SearchRequest>,
) -> IndexResult<Json<SearchResponse>> {
    let top_k = service.resolve_top_k(input.top_k)?;
    let results = service.search(&input.vector, top_k).await?;
    Ok(Json(SearchResponse { results }))
}

/// Same as `/search`, with squared Euclidean distances
#[utoipa::path(
    post,
    path = "/search/scored",
    tag = "Vector Index",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Hits ordered nearest first", body = ScoredSearchResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 413, description = "Body larger than MAX_BODY_BYTES"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_scored(
    State(service): State<VectorIndexService>,
    ValidatedJson(input): ValidatedJson<SearchRequest>,
) -> IndexResult<Json<ScoredSearchResponse>> {
    let top_k = service.resolve_top_k(input.top_k)?;
    let results = service.search_with_distances(&input.vector, top_k).await?;
    Ok(Json(ScoredSearchResponse { results }))
}

/// Index dimension and entry count
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Vector Index",
    responses(
        (status = 200, description = "Index statistics", body = IndexStats)
    )
)]
async fn stats(State(service): State<VectorIndexService>) -> Json<IndexStats> {
    Json(service.stats().await)
}
