//! The full due-diligence run for one ticker

use crate::api::{ArticleFetcher, ArticleSource, MarketDataProvider, YahooFinanceClient};
use crate::collector::DataCollector;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::prompts::{DataBlock, PromptOutcome, build_prompt, default_registry};
use crate::report::{GeneratedReport, ReportGenerator, ReportKind, ReportMerger, ReportRole};
use chrono::{DateTime, Utc};
use dd_llm::LLMProvider;
use dd_prompt::PromptRegistry;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Result of one complete run
#[derive(Debug, Clone, Serialize)]
pub struct DueDiligence {
    pub ticker: String,
    pub business: GeneratedReport,
    pub technical: GeneratedReport,
    pub merged: GeneratedReport,
    pub generated_at: DateTime<Utc>,
}

/// Collects data, builds prompts and generates reports
///
/// Immutable once built; share it behind an `Arc` to serve concurrent requests.
pub struct DueDiligencePipeline {
    collector: DataCollector,
    registry: Arc<PromptRegistry>,
    generator: Arc<ReportGenerator>,
    merger: ReportMerger,
}

impl DueDiligencePipeline {
    /// Build a pipeline over explicit data sources and model provider
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        articles: Arc<dyn ArticleSource>,
        llm: Arc<dyn LLMProvider>,
        config: &ReportConfig,
    ) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(default_registry()?);
        let generator = Arc::new(ReportGenerator::new(
            llm,
            config.model.clone(),
            config.max_tokens,
            config.merge_max_tokens,
        ));

        Ok(Self {
            collector: DataCollector::new(market, articles, config),
            merger: ReportMerger::new(registry.clone(), generator.clone()),
            registry,
            generator,
        })
    }

    /// Build a pipeline backed by Yahoo Finance and plain HTTP article fetching
    pub fn with_yahoo(llm: Arc<dyn LLMProvider>, config: &ReportConfig) -> Result<Self> {
        let market = Arc::new(YahooFinanceClient::new(config)?);
        let articles = Arc::new(ArticleFetcher::new(config)?);
        Self::new(market, articles, llm, config)
    }

    /// Collect the data `kind` needs and generate the report
    ///
    /// Merged reports need two finished reports; use [`Self::merge`] for those.
    #[instrument(skip(self, kind), fields(role = kind.role.as_str()))]
    pub async fn report(&self, ticker: &str, kind: &ReportKind) -> Result<GeneratedReport> {
        let data = match kind.role {
            ReportRole::Business => DataBlock::News(self.collector.fetch_news(ticker).await),
            ReportRole::Technical => {
                DataBlock::Technical(self.collector.fetch_technical_dataset(ticker).await)
            },
            ReportRole::Merged => {
                return Err(ReportError::Config(
                    "merged reports are built from two finished reports".to_string(),
                ));
            },
        };

        Ok(match build_prompt(&self.registry, ticker, &data, kind)? {
            PromptOutcome::NoData(message) => {
                info!("No data for {ticker}, skipping generation");
                GeneratedReport::no_data(message)
            },
            PromptOutcome::Ready(prepared) => self.generator.generate_report(kind, &prepared).await,
        })
    }

    /// News-driven business report in its default text form
    pub async fn business_report(&self, ticker: &str) -> Result<GeneratedReport> {
        self.report(ticker, &ReportKind::business()).await
    }

    /// Financial-data-driven technical report in its default HTML form
    pub async fn technical_report(&self, ticker: &str) -> Result<GeneratedReport> {
        self.report(ticker, &ReportKind::technical()).await
    }

    /// Merge two finished reports into the JSON report
    pub async fn merge(
        &self,
        ticker: &str,
        business: &str,
        technical: &str,
    ) -> Result<GeneratedReport> {
        self.merger.merge(ticker, business, technical).await
    }

    /// Business, then technical, then merge
    #[instrument(skip(self))]
    pub async fn run(&self, ticker: &str) -> Result<DueDiligence> {
        info!("Starting due diligence for {ticker}");

        let business = self.business_report(ticker).await?;
        info!("Business report: {:?}", business.status);

        let technical = self.technical_report(ticker).await?;
        info!("Technical report: {:?}", technical.status);

        let merged = self
            .merge(ticker, &business.to_text(), &technical.to_text())
            .await?;
        info!("Merged report: {:?}", merged.status);

        Ok(DueDiligence {
            ticker: ticker.to_string(),
            business,
            technical,
            merged,
            generated_at: Utc::now(),
        })
    }
}
