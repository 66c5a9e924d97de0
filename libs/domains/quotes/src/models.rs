use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A motivational quote as kept in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    pub quote_id: String,
    pub quote_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A stored quote with a generated plain-language explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuoteExplanation {
    pub quote_id: String,
    pub quote_text: String,
    pub explanation: String,
}

/// Input for [`QuoteService::add_quote`](crate::QuoteService::add_quote).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateQuote {
    /// Generated when absent
    #[serde(default)]
    #[validate(length(min = 1, message = "quote_id must not be empty when provided"))]
    pub quote_id: Option<String>,
    #[validate(length(min = 1, message = "quote_text must not be empty"))]
    pub quote_text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
}

impl CreateQuote {
    pub fn new(quote_text: impl Into<String>) -> Self {
        Self {
            quote_text: quote_text.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, quote_id: impl Into<String>) -> Self {
        self.quote_id = Some(quote_id.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub(crate) fn into_quote(self, quote_id: String) -> Quote {
        Quote {
            quote_id,
            quote_text: self.quote_text,
            author: self.author,
            year: self.year,
            category: self.category,
        }
    }
}

/// Scan filter. Every set field must match.
///
/// `keyword` is a case-insensitive substring of the text; `category` and
/// `author` are case-insensitive substrings of their fields; `year` is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuoteFilter {
    pub year: Option<i32>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub keyword: Option<String>,
}

impl QuoteFilter {
    pub fn matches(&self, quote: &Quote) -> bool {
        if let Some(year) = self.year {
            if quote.year != Some(year) {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            if !contains_ignore_case(&quote.quote_text, keyword) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !optional_contains(quote.category.as_deref(), category) {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if !optional_contains(quote.author.as_deref(), author) {
                return false;
            }
        }
        true
    }
}

fn optional_contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| contains_ignore_case(f, needle))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> Quote {
        CreateQuote::new("Stay hungry, stay foolish")
            .with_author("Steve Jobs")
            .with_year(2005)
            .with_category("Motivation")
            .into_quote("q1".to_string())
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(QuoteFilter::default().matches(&quote()));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let filter = QuoteFilter {
            keyword: Some("HUNGRY".into()),
            ..Default::default()
        };
        assert!(filter.matches(&quote()));

        let filter = QuoteFilter {
            keyword: Some("patience".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&quote()));
    }

    #[test]
    fn test_all_fields_must_match() {
        let filter = QuoteFilter {
            year: Some(2005),
            category: Some("motiv".into()),
            author: Some("jobs".into()),
            keyword: Some("foolish".into()),
        };
        assert!(filter.matches(&quote()));

        let filter = QuoteFilter {
            year: Some(2006),
            ..filter
        };
        assert!(!filter.matches(&quote()));
    }

    #[test]
    fn test_category_filter_skips_uncategorized() {
        let mut q = quote();
        q.category = None;
        let filter = QuoteFilter {
            category: Some("motivation".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&q));
    }

    #[test]
    fn test_create_quote_validation() {
        assert!(CreateQuote::new("").validate().is_err());
        assert!(CreateQuote::new("ok").with_id("").validate().is_err());
        assert!(CreateQuote::new("ok").validate().is_ok());
    }

    #[test]
    fn test_quote_json_uses_store_field_names() {
        let json = serde_json::to_value(quote()).unwrap();
        assert_eq!(json["quote_id"], "q1");
        assert_eq!(json["quote_text"], "Stay hungry, stay foolish");
        assert_eq!(json["year"], 2005);
    }
}
