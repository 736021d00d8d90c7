//! Language-model calls for report generation

use super::{GeneratedReport, ReportKind, ReportRole, normalize};
use crate::prompts::PreparedPrompt;
use dd_llm::{CompletionRequest, LLMError, LLMProvider, Message};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Prefix of every report body produced by a failed model call
pub const GENERATION_ERROR_PREFIX: &str = "Error generating due diligence report";

/// Sends prepared prompts to the model and shapes the answers
pub struct ReportGenerator {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: usize,
    merge_max_tokens: usize,
}

impl ReportGenerator {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        model: impl Into<String>,
        max_tokens: usize,
        merge_max_tokens: usize,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens,
            merge_max_tokens,
        }
    }

    /// One chat completion; the raw text of the answer
    ///
    /// An empty answer is an error.
    #[instrument(skip(self, system, user), fields(model = %self.model, provider = self.provider.name()))]
    pub async fn generate(
        &self,
        system: &str,
        user: &str,
        max_tokens: usize,
    ) -> dd_llm::Result<String> {
        let request = CompletionRequest::builder(&self.model)
            .system(system)
            .add_message(Message::user(user))
            .max_tokens(max_tokens)
            .build();

        let response = self.provider.complete(request).await?;
        info!(
            "Completion finished: {:?}, {} tokens",
            response.stop_reason,
            response.usage.total()
        );

        let text = response.message.content;
        if text.trim().is_empty() {
            return Err(LLMError::EmptyCompletion);
        }
        Ok(text)
    }

    /// Generate and normalize one report, absorbing every failure into the result
    pub async fn generate_report(
        &self,
        kind: &ReportKind,
        prepared: &PreparedPrompt,
    ) -> GeneratedReport {
        let max_tokens = match kind.role {
            ReportRole::Merged => self.merge_max_tokens,
            ReportRole::Business | ReportRole::Technical => self.max_tokens,
        };

        match self.generate(&prepared.system, &prepared.user, max_tokens).await {
            Ok(raw) => normalize(kind, &raw),
            Err(e) => {
                warn!(
                    "{} report for {} failed: {e}",
                    kind.role.as_str(),
                    prepared.request.ticker
                );
                GeneratedReport::generation_failed(format!("{GENERATION_ERROR_PREFIX}: {e}"))
            },
        }
    }
}
