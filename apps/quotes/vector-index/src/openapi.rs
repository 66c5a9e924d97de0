//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the vector index server
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quotes Vector Index",
        version = "0.1.0",
        description = "In-memory exact nearest-neighbor search over quote embeddings"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_vector_index::ApiDoc)
    ),
    tags(
        (name = "Vector Index", description = "Embedding insert and similarity search")
    )
)]
pub struct ApiDoc;
