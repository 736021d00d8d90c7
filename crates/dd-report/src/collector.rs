//! Data collection for a single ticker
//!
//! Collection never fails outright. A broken article turns into diagnostic
//! text, and a failed provider lookup turns into an empty result that the
//! prompt builder reports as "no data".

use crate::api::{ArticleSource, FinancialField, MarketDataProvider};
use crate::config::ReportConfig;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Placeholder for a field the provider did not return
pub const NOT_AVAILABLE: &str = "Not available";

/// A headline with the scraped article text (or a diagnostic in its place)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub content: String,
}

/// Ordered `(section, text)` pairs describing a ticker's financials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalDataset {
    pub sections: Vec<(String, String)>,
    /// Why the dataset is empty, when the lookup failed
    pub note: Option<String>,
}

impl TechnicalDataset {
    /// An empty dataset explaining why nothing was collected
    pub fn unavailable(note: impl Into<String>) -> Self {
        Self {
            sections: Vec::new(),
            note: Some(note.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// `--- <section> ---\n<text>\n\n` for every section, in order
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (section, text) in &self.sections {
            let _ = write!(out, "--- {section} ---\n{text}\n\n");
        }
        out
    }
}

/// Gathers news and financial data through the configured sources
pub struct DataCollector {
    market: Arc<dyn MarketDataProvider>,
    articles: Arc<dyn ArticleSource>,
    news_count: usize,
}

impl DataCollector {
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        articles: Arc<dyn ArticleSource>,
        config: &ReportConfig,
    ) -> Self {
        Self {
            market,
            articles,
            news_count: config.news_count,
        }
    }

    /// Recent news with scraped article bodies, fetched one article at a time
    ///
    /// Entries without a title or link are skipped. A failed lookup yields an empty list.
    pub async fn fetch_news(&self, ticker: &str) -> Vec<NewsItem> {
        let headlines = match self.market.news(ticker, self.news_count).await {
            Ok(headlines) => headlines,
            Err(e) => {
                warn!("An error occurred while fetching news for {ticker}: {e}");
                return Vec::new();
            },
        };

        let mut items = Vec::with_capacity(headlines.len());
        for headline in headlines {
            if headline.title.trim().is_empty() || headline.link.trim().is_empty() {
                debug!("Skipping headline without title or link");
                continue;
            }

            let content = self.articles.article_text(&headline.link).await;
            items.push(NewsItem {
                title: headline.title,
                content,
            });
        }

        info!("Collected {} news items for {ticker}", items.len());
        items
    }

    /// Every [`FinancialField`] rendered as text under its label
    ///
    /// A lookup that fails or returns no fields at all yields an empty dataset.
    pub async fn fetch_technical_dataset(&self, ticker: &str) -> TechnicalDataset {
        let financials = match self.market.financials(ticker).await {
            Ok(financials) => financials,
            Err(e) => {
                warn!("Error fetching financial data for {ticker}: {e}");
                return TechnicalDataset::unavailable(format!(
                    "Error fetching financial data for {ticker}: {e}"
                ));
            },
        };

        // Placeholders alone are not data worth a report
        if financials.is_empty() {
            warn!("No financial fields returned for {ticker}");
            return TechnicalDataset::unavailable(format!(
                "No financial fields returned for {ticker}"
            ));
        }

        let sections = FinancialField::ALL
            .into_iter()
            .map(|field| {
                let text = financials
                    .get(&field)
                    .map_or_else(|| NOT_AVAILABLE.to_string(), |value| format!("{value:#}"));
                (field.label().to_string(), text)
            })
            .collect();

        info!(
            "Collected {} of {} financial fields for {ticker}",
            financials.len(),
            FinancialField::ALL.len()
        );

        TechnicalDataset {
            sections,
            note: None,
        }
    }
}
