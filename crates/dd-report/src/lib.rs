//! Stock due-diligence reports
//!
//! This crate turns a ticker into a written due-diligence report. It:
//!
//! - collects recent news (with the article text scraped) and 18 financial
//!   fields from Yahoo Finance
//! - builds prompts from Jinja templates for a business report (text), a
//!   technical report (HTML) and a merged report (JSON)
//! - calls a language model through [`dd_llm::LLMProvider`]
//! - strips code fences and extracts the JSON object from the answer
//!
//! Failures never abort a run. They come back as report text, labelled with a
//! [`ReportStatus`].
//!
//! # Example
//!
//! ```rust,no_run
//! use dd_llm::providers::{OpenAIConfig, OpenAIProvider};
//! use dd_report::{DueDiligencePipeline, ReportConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let llm = Arc::new(OpenAIProvider::with_config(OpenAIConfig::from_env())?);
//!     let pipeline = DueDiligencePipeline::with_yahoo(llm, &ReportConfig::default())?;
//!
//!     let dd = pipeline.run("AAPL").await?;
//!     println!("{}", dd.merged);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod collector;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod report;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use collector::{DataCollector, NewsItem, TechnicalDataset};
pub use config::ReportConfig;
pub use error::{FormatError, ReportError, Result};
pub use pipeline::{DueDiligence, DueDiligencePipeline};
pub use report::{
    GeneratedReport, ReportBody, ReportKind, ReportRole, ReportStatus, ReportTemplate,
};
