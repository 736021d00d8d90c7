//! Configuration for due-diligence report generation

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Browser-like user agent sent with every scraping and market-data request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Default Yahoo Finance API host
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Page whose `set-cookie` header opens a Yahoo session
pub const DEFAULT_YAHOO_COOKIE_URL: &str = "https://fc.yahoo.com";

/// Endpoint handing out the crumb that authorizes quoteSummary calls
pub const DEFAULT_YAHOO_CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Model identifier passed to the language-model provider
    pub model: String,

    /// Output token cap for the business and technical reports
    pub max_tokens: usize,

    /// Output token cap for the merged report
    pub merge_max_tokens: usize,

    /// Maximum number of news items to collect
    pub news_count: usize,

    /// Timeout for a single article fetch
    pub article_timeout: Duration,

    /// User-Agent header for article and market-data requests
    pub user_agent: String,

    /// Yahoo Finance API host used for the quoteSummary endpoint
    pub yahoo_base_url: String,

    /// Session cookie source for the quoteSummary handshake
    pub yahoo_cookie_url: String,

    /// Crumb endpoint for the quoteSummary handshake
    pub yahoo_crumb_url: String,

    /// Market-data request timeout
    pub request_timeout: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 15000,
            merge_max_tokens: 15000,
            news_count: 10,
            article_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            yahoo_cookie_url: DEFAULT_YAHOO_COOKIE_URL.to_string(),
            yahoo_crumb_url: DEFAULT_YAHOO_CRUMB_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Override the model from `OPENAI_MODEL` when it is set
    pub fn with_env_model(mut self) -> Self {
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ReportError::Config("model must not be empty".to_string()));
        }

        if self.max_tokens == 0 || self.merge_max_tokens == 0 {
            return Err(ReportError::Config(
                "token limits must be greater than 0".to_string(),
            ));
        }

        if self.news_count == 0 {
            return Err(ReportError::Config(
                "news_count must be greater than 0".to_string(),
            ));
        }

        for (name, url) in [
            ("yahoo_base_url", &self.yahoo_base_url),
            ("yahoo_cookie_url", &self.yahoo_cookie_url),
            ("yahoo_crumb_url", &self.yahoo_crumb_url),
        ] {
            if !url.starts_with("http") {
                return Err(ReportError::Config(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }

        Ok(())
    }
}

/// Builder for ReportConfig
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    model: Option<String>,
    max_tokens: Option<usize>,
    merge_max_tokens: Option<usize>,
    news_count: Option<usize>,
    article_timeout: Option<Duration>,
    user_agent: Option<String>,
    yahoo_base_url: Option<String>,
    yahoo_cookie_url: Option<String>,
    yahoo_crumb_url: Option<String>,
    request_timeout: Option<Duration>,
}

impl ReportConfigBuilder {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the output token cap for single reports
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the output token cap for the merged report
    pub fn merge_max_tokens(mut self, max_tokens: usize) -> Self {
        self.merge_max_tokens = Some(max_tokens);
        self
    }

    /// Set the news item limit
    pub fn news_count(mut self, count: usize) -> Self {
        self.news_count = Some(count);
        self
    }

    /// Set the per-article fetch timeout
    pub fn article_timeout(mut self, timeout: Duration) -> Self {
        self.article_timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the Yahoo Finance API host
    pub fn yahoo_base_url(mut self, url: impl Into<String>) -> Self {
        self.yahoo_base_url = Some(url.into());
        self
    }

    /// Set the cookie and crumb endpoints used to authorize quoteSummary calls
    pub fn yahoo_session_urls(
        mut self,
        cookie_url: impl Into<String>,
        crumb_url: impl Into<String>,
    ) -> Self {
        self.yahoo_cookie_url = Some(cookie_url.into());
        self.yahoo_crumb_url = Some(crumb_url.into());
        self
    }

    /// Set the market-data request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load the model from `OPENAI_MODEL` when set
    pub fn with_env_model(mut self) -> Self {
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            if !model.trim().is_empty() {
                self.model = Some(model);
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ReportConfig> {
        let defaults = ReportConfig::default();

        let config = ReportConfig {
            model: self.model.unwrap_or(defaults.model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            merge_max_tokens: self.merge_max_tokens.unwrap_or(defaults.merge_max_tokens),
            news_count: self.news_count.unwrap_or(defaults.news_count),
            article_timeout: self.article_timeout.unwrap_or(defaults.article_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            yahoo_base_url: self.yahoo_base_url.unwrap_or(defaults.yahoo_base_url),
            yahoo_cookie_url: self.yahoo_cookie_url.unwrap_or(defaults.yahoo_cookie_url),
            yahoo_crumb_url: self.yahoo_crumb_url.unwrap_or(defaults.yahoo_crumb_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
