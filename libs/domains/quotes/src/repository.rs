use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::QuoteResult;
use crate::models::{Quote, QuoteFilter};

/// Document store holding full quote records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Get a quote by id
    async fn get(&self, quote_id: &str) -> QuoteResult<Option<Quote>>;

    /// Insert or replace a quote
    async fn put(&self, quote: Quote) -> QuoteResult<()>;

    /// All quotes matching `filter`
    async fn scan(&self, filter: QuoteFilter) -> QuoteResult<Vec<Quote>>;
}

/// In-memory implementation of QuoteRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryQuoteRepository {
    quotes: Arc<RwLock<HashMap<String, Quote>>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn get(&self, quote_id: &str) -> QuoteResult<Option<Quote>> {
        Ok(self.quotes.read().await.get(quote_id).cloned())
    }

    async fn put(&self, quote: Quote) -> QuoteResult<()> {
        let mut quotes = self.quotes.write().await;
        tracing::info!(quote_id = %quote.quote_id, "Stored quote");
        quotes.insert(quote.quote_id.clone(), quote);
        Ok(())
    }

    async fn scan(&self, filter: QuoteFilter) -> QuoteResult<Vec<Quote>> {
        let quotes = self.quotes.read().await;

        let mut result: Vec<Quote> = quotes
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.quote_id.cmp(&b.quote_id));

        Ok(result)
    }
}
