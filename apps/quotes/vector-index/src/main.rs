//! Vector Index Service - Entry Point

#[tokio::main]
async fn main() -> eyre::Result<()> {
    quotes_vector_index::run().await
}
