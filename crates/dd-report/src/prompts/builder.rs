//! Turning collected data into a ready-to-send prompt

use crate::collector::{NewsItem, TechnicalDataset};
use crate::error::Result;
use crate::report::ReportKind;
use dd_prompt::PromptRegistry;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;
use tracing::debug;

/// Message returned instead of a business report when there is no news
pub const NO_NEWS: &str = "No news found for the given stock.";

/// Message returned instead of a technical report when there is no financial data
pub const NO_FINANCIAL_DATA: &str = "No financial data found for the given stock.";

/// The data a report is written from
#[derive(Debug, Clone)]
pub enum DataBlock {
    News(Vec<NewsItem>),
    Technical(TechnicalDataset),
    /// Two finished reports to be merged
    Reports { business: String, technical: String },
}

impl DataBlock {
    /// Data text as embedded in the prompt
    pub fn render(&self) -> String {
        match self {
            Self::News(items) => {
                let mut out = String::new();
                for item in items {
                    let _ = write!(out, "Title: {}\nContent: {}\n\n", item.title, item.content);
                }
                out
            },
            Self::Technical(dataset) => dataset.render(),
            Self::Reports { business, technical } => format!(
                "Business due diligence:\n{business}\n\nTechnical due diligence:\n{technical}"
            ),
        }
    }

    /// The fixed message for an empty block, or `None` when there is data
    ///
    /// Finished reports always count as data, even when they are diagnostics.
    fn no_data_message(&self) -> Option<&'static str> {
        match self {
            Self::News(items) if items.is_empty() => Some(NO_NEWS),
            Self::Technical(dataset) if dataset.is_empty() => Some(NO_FINANCIAL_DATA),
            _ => None,
        }
    }
}

/// The assembled, ticker-scoped prompt payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    pub ticker: String,
    pub dataset_text: String,
}

/// System and user messages ready for the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPrompt {
    pub system: String,
    pub user: String,
    pub request: ReportRequest,
}

/// Either a prompt, or the reason no prompt was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    NoData(String),
    Ready(PreparedPrompt),
}

/// Build the prompt for `kind` from `data`
///
/// Empty data short-circuits to [`PromptOutcome::NoData`] without rendering anything.
pub fn build_prompt(
    registry: &PromptRegistry,
    ticker: &str,
    data: &DataBlock,
    kind: &ReportKind,
) -> Result<PromptOutcome> {
    if let Some(message) = data.no_data_message() {
        if let DataBlock::Technical(TechnicalDataset { note: Some(note), .. }) = data {
            debug!("No technical data for {ticker}: {note}");
        }
        return Ok(PromptOutcome::NoData(message.to_string()));
    }

    let vars = json!({ "ticker": ticker });
    let system = registry.render(&kind.persona_name(), &vars)?;
    let instruction = registry.render(&kind.instruction_name(), &vars)?;

    let dataset_text = data.render();
    let user = registry.render(
        kind.template.template_name(),
        &json!({
            "ticker": ticker,
            "instruction": instruction,
            "title": kind.title_for(ticker),
            "data": dataset_text,
            "sections": kind.sections,
        }),
    )?;

    debug!(
        "Built {} prompt for {ticker}: {} chars",
        kind.role.as_str(),
        user.len()
    );

    Ok(PromptOutcome::Ready(PreparedPrompt {
        system,
        user,
        request: ReportRequest {
            ticker: ticker.to_string(),
            dataset_text,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::default_registry;
    use crate::report::ReportTemplate;

    fn ready(outcome: PromptOutcome) -> PreparedPrompt {
        match outcome {
            PromptOutcome::Ready(prompt) => prompt,
            PromptOutcome::NoData(msg) => panic!("expected a prompt, got no data: {msg}"),
        }
    }

    #[test]
    fn test_empty_news_is_no_data() {
        let registry = default_registry().unwrap();
        let outcome =
            build_prompt(&registry, "AAPL", &DataBlock::News(Vec::new()), &ReportKind::business())
                .unwrap();
        assert_eq!(outcome, PromptOutcome::NoData(NO_NEWS.to_string()));
    }

    #[test]
    fn test_empty_dataset_is_no_data() {
        let registry = default_registry().unwrap();
        let data = DataBlock::Technical(TechnicalDataset::unavailable("provider down"));
        let outcome = build_prompt(&registry, "AAPL", &data, &ReportKind::technical()).unwrap();
        assert_eq!(outcome, PromptOutcome::NoData(NO_FINANCIAL_DATA.to_string()));
    }

    #[test]
    fn test_business_text_prompt() {
        let registry = default_registry().unwrap();
        let data = DataBlock::News(vec![NewsItem {
            title: "Apple beats estimates".to_string(),
            content: "Failed to retrieve content. Status code: 404".to_string(),
        }]);

        let prompt =
            ready(build_prompt(&registry, "AAPL", &data, &ReportKind::business()).unwrap());

        assert!(prompt.system.starts_with("You are a seasoned financial expert"));
        assert!(prompt.user.contains("on the following stock: AAPL."));
        assert!(prompt.user.contains(
            "Title: Apple beats estimates\nContent: Failed to retrieve content. Status code: 404\n\n"
        ));
        assert!(prompt.user.contains("Due Diligence Report on AAPL"));
        assert!(prompt.user.contains("1. Executive Summary\n"));
        assert!(prompt.user.contains("8. Recommendations\n"));
        assert!(prompt.user.contains("no bullet points"));
        assert_eq!(prompt.request.ticker, "AAPL");
        assert_eq!(prompt.request.dataset_text, data.render());
    }

    #[test]
    fn test_technical_html_prompt() {
        let registry = default_registry().unwrap();
        let data = DataBlock::Technical(TechnicalDataset {
            sections: vec![("Calendar".to_string(), "Not available".to_string())],
            note: None,
        });

        let prompt =
            ready(build_prompt(&registry, "MSFT", &data, &ReportKind::technical()).unwrap());

        assert!(prompt.user.contains("--- Calendar ---\nNot available\n\n"));
        assert!(prompt.user.contains("<h1>Technical Analysis Report on MSFT</h1>"));
        assert!(prompt.user.contains("<h2>4. Technical Indicators</h2>"));
        assert!(prompt.user.contains("body { font-family: Arial, sans-serif; margin: 30px; }"));
    }

    #[test]
    fn test_merge_json_prompt_embeds_reports() {
        let registry = default_registry().unwrap();
        let data = DataBlock::Reports {
            business: "B".to_string(),
            technical: "T".to_string(),
        };

        let prompt = ready(build_prompt(&registry, "MSFT", &data, &ReportKind::merged()).unwrap());

        assert!(prompt.system.contains("combining both business and technical analysis"));
        assert!(prompt.user.contains("Business due diligence:\nB\n"));
        assert!(prompt.user.contains("Technical due diligence:\nT"));
        assert!(prompt.user.contains("\"Technical Price Analysis\": "));
        assert!(prompt.user.contains("single JSON object"));
    }

    #[test]
    fn test_template_override() {
        let registry = default_registry().unwrap();
        let data = DataBlock::News(vec![NewsItem {
            title: "t".to_string(),
            content: "c".to_string(),
        }]);
        let kind = ReportKind::business().with_template(ReportTemplate::Html);

        let prompt = ready(build_prompt(&registry, "AAPL", &data, &kind).unwrap());
        assert!(prompt.user.contains("<h2>5. News and Events</h2>"));
    }
}
