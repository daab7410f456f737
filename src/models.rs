//! Data models for scraped headlines and their classified representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`NewsRecord`]: One normalized headline as scraped from a source
//! - [`NewsFeed`]: The `{ "news": [...] }` envelope returned by aggregation
//! - [`WatchedRecord`]: A headline annotated with the watch-list tickers it matched
//! - [`AnalysisReport`]: Sentiment classification returned by the LLM
//!
//! The analysis models use camelCase field names to match the JSON schema
//! requested from the LLM, hence the `#[allow(non_snake_case)]` attributes.

use serde::{Deserialize, Serialize};

/// A single headline as scraped from a news source.
///
/// Records are built fresh on every aggregation and never mutated afterwards.
/// Adapters only emit a record when both `title` and `link` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsRecord {
    /// The headline as published.
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
    /// Publication time or label exactly as shown by the site. May be empty.
    pub time: String,
    /// Label of the adapter that produced the record.
    pub source: String,
}

impl NewsRecord {
    /// Whether the record carries both a title and a link.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.link.trim().is_empty()
    }
}

/// The aggregation response envelope.
///
/// Serializes as `{"news": [...]}`. An empty `news` list is a valid answer
/// meaning no source yielded data this round.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NewsFeed {
    pub news: Vec<NewsRecord>,
}

/// A headline that matched at least one watch-list ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchedRecord {
    #[serde(flatten)]
    pub record: NewsRecord,
    /// Tickers that matched the title, in watch-list order.
    pub tickers: Vec<String>,
}

/// Sentiment classification for a batch of headlines.
///
/// # JSON Schema
///
/// ```text
/// {
///   "analysis": [{ "newsTitle", "sentiment", "confidence", "reasoning", "affectedStocks" }],
///   "overallSentiment": "..."
/// }
/// ```
#[allow(non_snake_case)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisReport {
    /// One entry per headline sent to the model.
    pub analysis: Vec<HeadlineSentiment>,
    /// Overall sentiment label for the whole batch.
    pub overallSentiment: String,
}

/// Classification of a single headline.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeadlineSentiment {
    pub newsTitle: String,
    /// Free-form label such as "positive", "negative" or "neutral".
    pub sentiment: String,
    /// Free-form confidence indicator ("high", "0.8", ...).
    pub confidence: String,
    pub reasoning: String,
    #[serde(default)]
    pub affectedStocks: Vec<String>,
}

/// Structured failure returned when classification cannot produce a report.
#[derive(Debug, Serialize)]
pub struct FailureEnvelope {
    pub error: String,
    pub details: String,
}
