//! Headline sentiment classification.
//!
//! The first few headlines are rendered into a prompt asking for a JSON
//! report, the prompt goes to the LLM, and the reply is treated as untrusted
//! free text: it is scanned for the first embedded JSON object that actually
//! has the report's shape.
//!
//! There is no partial salvage. Either a full [`AnalysisReport`] comes back
//! or the caller gets an [`AnalysisError`] with a readable message.

use crate::api::AskAsync;
use crate::models::{AnalysisReport, FailureEnvelope, NewsRecord};
use crate::utils::{looks_truncated, truncate_for_log};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

/// Maximum number of headlines sent in one classification request.
pub const DEFAULT_BATCH: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("No news items provided")]
    NoNewsItems,

    #[error("LLM request failed: {0}")]
    Transport(String),

    #[error("No JSON object found in model response")]
    NoJsonObject,

    #[error("Model response JSON does not match the expected report: {0}")]
    Malformed(String),
}

impl AnalysisError {
    /// Render as the `{ "error", "details" }` failure envelope.
    pub fn envelope(&self) -> FailureEnvelope {
        FailureEnvelope {
            error: "Failed to analyze news".to_string(),
            details: self.to_string(),
        }
    }
}

/// Build the classification prompt for the given headlines.
pub fn build_prompt(titles: &[&str]) -> String {
    let numbered = titles
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {}", i + 1, title))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze these stock market news headlines and determine their potential impact:

News Items:
{numbered}

Provide JSON:
{{
  "analysis": [
    {{
      "newsTitle": "...",
      "sentiment": "...",
      "confidence": "...",
      "reasoning": "...",
      "affectedStocks": ["..."]
    }}
  ],
  "overallSentiment": "..."
}}
"#
    )
}

/// Locate and parse the report embedded in a model reply.
///
/// Every `{` is tried as the start of a JSON value, in order; trailing text
/// after a complete value is ignored. The first object that deserializes
/// into an [`AnalysisReport`] wins.
pub fn extract_report(reply: &str) -> Result<AnalysisReport, AnalysisError> {
    let mut mismatch: Option<serde_json::Error> = None;

    for (start, _) in reply.match_indices('{') {
        let mut values = serde_json::Deserializer::from_str(&reply[start..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(value @ Value::Object(_))) => match serde_json::from_value::<AnalysisReport>(value) {
                Ok(report) => return Ok(report),
                Err(e) => {
                    debug!(offset = start, error = %e, "JSON object is not a report");
                    mismatch.get_or_insert(e);
                }
            },
            Some(Err(e)) if looks_truncated(&e) => {
                warn!(offset = start, "Model reply looks truncated");
            }
            _ => {}
        }
    }

    match mismatch {
        Some(e) => Err(AnalysisError::Malformed(e.to_string())),
        None => Err(AnalysisError::NoJsonObject),
    }
}

/// Classify the first `batch` headlines of `records`. A zero batch still
/// sends one headline.
#[instrument(level = "info", skip_all, fields(records = records.len(), batch = batch))]
pub async fn analyze<A>(asker: &A, records: &[NewsRecord], batch: usize) -> Result<AnalysisReport, AnalysisError>
where
    A: AskAsync<Response = String>,
{
    if records.is_empty() {
        return Err(AnalysisError::NoNewsItems);
    }

    let batch = batch.max(1);
    let titles: Vec<&str> = records.iter().take(batch).map(|r| r.title.as_str()).collect();
    let prompt = build_prompt(&titles);

    let reply = asker.ask(&prompt).await.map_err(|e| {
        error!(error = %e, "Classification request failed");
        AnalysisError::Transport(e.to_string())
    })?;

    match extract_report(&reply) {
        Ok(report) => {
            info!(
                headlines = report.analysis.len(),
                overall = %report.overallSentiment,
                "Classified headlines"
            );
            Ok(report)
        }
        Err(e) => {
            warn!(
                error = %e,
                response_preview = %truncate_for_log(&reply, 300),
                "Model returned no usable report"
            );
            Err(e)
        }
    }
}
