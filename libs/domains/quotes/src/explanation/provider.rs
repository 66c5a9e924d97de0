use async_trait::async_trait;

use crate::error::QuoteResult;

/// Turns a quote into a short plain-language explanation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(&self, quote_text: &str) -> QuoteResult<String>;
}
