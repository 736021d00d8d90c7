//! Test doubles shared by the unit tests

use crate::api::ArticleSource;
use async_trait::async_trait;
use dd_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason, TokenUsage,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Provider that replays scripted answers and records every request
pub(crate) struct ScriptedProvider {
    answers: Mutex<Vec<dd_llm::Result<String>>>,
    pub(crate) requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    /// Answers are handed out in order
    pub(crate) fn new(answers: Vec<dd_llm::Result<String>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().rev().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn user_message(&self, index: usize) -> String {
        self.requests.lock().unwrap()[index].messages[0].content.clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> dd_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(LLMError::RequestFailed("no scripted answer".to_string())))?;

        Ok(CompletionResponse {
            message: Message::assistant(answer),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Article source answering from a fixed URL → text table
#[derive(Default)]
pub(crate) struct StaticArticles {
    pages: HashMap<String, String>,
}

impl StaticArticles {
    pub(crate) fn with_page(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl ArticleSource for StaticArticles {
    async fn article_text(&self, url: &str) -> String {
        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| "Failed to retrieve content. Status code: 404".to_string())
    }
}
