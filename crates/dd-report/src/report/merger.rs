//! Merging a business and a technical report into one

use super::{GeneratedReport, ReportGenerator, ReportKind};
use crate::error::Result;
use crate::prompts::{DataBlock, PromptOutcome, build_prompt};
use dd_prompt::PromptRegistry;
use std::sync::Arc;
use tracing::info;

/// Combines two finished reports through a second model call
pub struct ReportMerger {
    registry: Arc<PromptRegistry>,
    generator: Arc<ReportGenerator>,
    kind: ReportKind,
}

impl ReportMerger {
    pub fn new(registry: Arc<PromptRegistry>, generator: Arc<ReportGenerator>) -> Self {
        Self {
            registry,
            generator,
            kind: ReportKind::merged(),
        }
    }

    /// Merge two reports, embedded verbatim, into one JSON report
    ///
    /// Generation and format failures come back as the report body. Only a
    /// broken prompt template is an error.
    pub async fn merge(
        &self,
        ticker: &str,
        business: &str,
        technical: &str,
    ) -> Result<GeneratedReport> {
        info!("Merging reports for {ticker}");

        let data = DataBlock::Reports {
            business: business.to_string(),
            technical: technical.to_string(),
        };

        Ok(match build_prompt(&self.registry, ticker, &data, &self.kind)? {
            PromptOutcome::Ready(prepared) => {
                self.generator.generate_report(&self.kind, &prepared).await
            },
            PromptOutcome::NoData(message) => GeneratedReport::no_data(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NO_VALID_JSON;
    use crate::prompts::default_registry;
    use crate::report::{MERGED_SECTION_KEYS, ReportStatus};
    use crate::testing::ScriptedProvider;
    use serde_json::json;

    fn merger(provider: Arc<ScriptedProvider>) -> ReportMerger {
        let generator = ReportGenerator::new(provider, "gpt-4o-mini", 15000, 15000);
        ReportMerger::new(Arc::new(default_registry().unwrap()), Arc::new(generator))
    }

    #[tokio::test]
    async fn test_merge_embeds_both_reports() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(
            r#"{"Executive Summary": "Solid"}"#.to_string(),
        )]));

        let report = merger(provider.clone()).merge("MSFT", "B", "T").await.unwrap();

        assert_eq!(provider.calls(), 1);
        let user = provider.user_message(0);
        assert!(user.contains("MSFT"));
        assert!(user.contains("Business due diligence:\nB\n"));
        assert!(user.contains("Technical due diligence:\nT"));

        assert!(report.is_complete());
        assert_eq!(report.as_sections().unwrap()["Executive Summary"], json!("Solid"));
        assert_eq!(report.missing_sections(&MERGED_SECTION_KEYS).len(), 8);
    }

    #[tokio::test]
    async fn test_merge_without_braces_returns_message() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(
            "I am unable to merge these reports.".to_string(),
        )]));

        let report = merger(provider).merge("MSFT", "B", "T").await.unwrap();

        assert_eq!(report.status, ReportStatus::FormatFailed);
        assert_eq!(report.to_text(), NO_VALID_JSON);
    }

    #[tokio::test]
    async fn test_merge_accepts_diagnostic_inputs() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok("{}".to_string())]));

        let report = merger(provider.clone())
            .merge("ZZZZ", "No news found for the given stock.", "Error generating due diligence report: x")
            .await
            .unwrap();

        assert_eq!(provider.calls(), 1);
        assert!(report.is_complete());
    }
}
