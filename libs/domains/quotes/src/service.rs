//! Quote Service - embeds quotes, indexes them and resolves search hits

use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::embedding::EmbeddingProvider;
use crate::error::{QuoteError, QuoteResult};
use crate::explanation::ExplanationProvider;
use crate::index_client::VectorIndex;
use crate::models::{CreateQuote, Quote, QuoteExplanation, QuoteFilter};
use crate::repository::QuoteRepository;

/// Glue between the document store, the embedding generator and the index.
///
/// Writes go to the index first and the store second, with no compensation:
/// if the store write fails the id stays indexed and is skipped by
/// [`semantic_search`](Self::semantic_search) until the record appears.
pub struct QuoteService<R: QuoteRepository> {
    repository: Arc<R>,
    embeddings: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    explainer: Option<Arc<dyn ExplanationProvider>>,
}

impl<R: QuoteRepository> Clone for QuoteService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            embeddings: Arc::clone(&self.embeddings),
            index: Arc::clone(&self.index),
            explainer: self.explainer.clone(),
        }
    }
}

impl<R: QuoteRepository> QuoteService<R> {
    pub fn new(
        repository: R,
        embeddings: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            embeddings,
            index,
            explainer: None,
        }
    }

    /// Enable [`explain_quote`](Self::explain_quote).
    pub fn with_explanation_provider(mut self, explainer: Arc<dyn ExplanationProvider>) -> Self {
        self.explainer = Some(explainer);
        self
    }

    /// Embed, index and store a new quote.
    #[instrument(skip(self, input), fields(quote_id = ?input.quote_id))]
    pub async fn add_quote(&self, input: CreateQuote) -> QuoteResult<Quote> {
        input
            .validate()
            .map_err(|e| QuoteError::Validation(e.to_string()))?;
        if input.quote_text.trim().is_empty() {
            return Err(QuoteError::Validation("quote_text must not be empty".into()));
        }

        let quote_id = input
            .quote_id
            .clone()
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        let embedding = self.embeddings.embed(&input.quote_text).await?;
        self.index.add_embedding(&quote_id, embedding).await?;

        let quote = input.into_quote(quote_id);
        self.repository.put(quote.clone()).await.map_err(|e| {
            warn!(quote_id = %quote.quote_id, error = %e, "Quote indexed but not stored");
            match e {
                QuoteError::Dependency(msg) => QuoteError::Dependency(msg),
                other => QuoteError::Dependency(format!("quote store: {}", other)),
            }
        })?;

        info!(quote_id = %quote.quote_id, "Quote added");
        Ok(quote)
    }

    /// Quotes closest in meaning to `text`, best match first.
    ///
    /// Index hits without a stored record are dropped.
    #[instrument(skip(self, text))]
    pub async fn semantic_search(&self, text: &str, top_k: usize) -> QuoteResult<Vec<Quote>> {
        if text.trim().is_empty() {
            return Err(QuoteError::Validation("query text must not be empty".into()));
        }
        if top_k == 0 {
            return Err(QuoteError::Validation("top_k must be a positive integer".into()));
        }

        let embedding = self.embeddings.embed(text).await?;
        let ids = self.index.search(embedding, top_k).await?;

        let mut quotes = Vec::with_capacity(ids.len());
        for id in ids {
            match self.repository.get(&id).await? {
                Some(quote) => quotes.push(quote),
                None => warn!(quote_id = %id, "Indexed id has no stored quote"),
            }
        }
        Ok(quotes)
    }

    /// Get one quote by id
    #[instrument(skip(self))]
    pub async fn get_quote(&self, quote_id: &str) -> QuoteResult<Quote> {
        self.repository
            .get(quote_id)
            .await?
            .ok_or_else(|| QuoteError::NotFound(quote_id.to_string()))
    }

    /// Plain-language explanation of a stored quote.
    #[instrument(skip(self))]
    pub async fn explain_quote(&self, quote_id: &str) -> QuoteResult<QuoteExplanation> {
        if quote_id.trim().is_empty() {
            return Err(QuoteError::Validation("quote_id is required".into()));
        }
        let explainer = self
            .explainer
            .as_ref()
            .ok_or_else(|| QuoteError::Config("no explanation provider configured".into()))?;

        let quote = self.get_quote(quote_id).await?;
        let explanation = explainer.explain(&quote.quote_text).await?;

        info!(quote_id = %quote.quote_id, "Quote explained");
        Ok(QuoteExplanation {
            quote_id: quote.quote_id,
            quote_text: quote.quote_text,
            explanation,
        })
    }

    /// List quotes with optional filters
    #[instrument(skip(self))]
    pub async fn list_quotes(&self, filter: QuoteFilter) -> QuoteResult<Vec<Quote>> {
        self.repository.scan(filter).await
    }
}
