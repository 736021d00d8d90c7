//! Error types for due-diligence operations

use dd_llm::LLMError;
use dd_prompt::PromptError;
use thiserror::Error;

/// Message every JSON extraction failure starts with
pub const NO_VALID_JSON: &str = "No valid JSON found in the response";

/// Report pipeline errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Market data lookup failed
    #[error("Market data error: {0}")]
    MarketData(String),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinance(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Language model call failed
    #[error("Generation error: {0}")]
    Generation(#[from] LLMError),

    /// Prompt template missing or failed to render
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    /// Model output could not be normalized
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Writing a report to disk failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures of structured-output extraction
///
/// Both variants render with the same leading message so callers that only
/// look at text see one stable diagnostic.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No `{` in the text, or the first object never closes
    #[error("No valid JSON found in the response")]
    NotFound,

    /// A balanced span was found but is not a JSON object
    #[error("No valid JSON found in the response: {0}")]
    Invalid(#[source] serde_json::Error),
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;
