//! Yahoo Finance market-data client
//!
//! News headlines come from the search endpoint through `yahoo_finance_api`.
//! Financial statements, analyst data and estimates come from the
//! `quoteSummary` endpoint, fetched with `reqwest` after a cookie and crumb
//! handshake and picked apart with JSON pointers.

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};
use yahoo_finance_api as yahoo;

/// A news entry as returned by the provider, before its article is scraped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsHeadline {
    pub title: String,
    pub link: String,
    pub publisher: String,
}

/// Raw provider values keyed by field
pub type Financials = HashMap<FinancialField, Value>;

/// Source of news headlines and financial fields for a ticker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Up to `count` recent headlines for the ticker
    async fn news(&self, ticker: &str, count: usize) -> Result<Vec<NewsHeadline>>;

    /// Every [`FinancialField`] the provider has for the ticker
    async fn financials(&self, ticker: &str) -> Result<Financials>;
}

/// The fixed set of financial fields fed into a technical report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinancialField {
    Calendar,
    SecFilings,
    IncomeStatement,
    QuarterlyIncomeStatement,
    BalanceSheet,
    QuarterlyBalanceSheet,
    CashFlowStatement,
    QuarterlyCashFlowStatement,
    Recommendations,
    RecommendationsSummary,
    UpgradesDowngrades,
    AnalystPriceTargets,
    EarningsEstimate,
    RevenueEstimate,
    EarningsHistory,
    EpsTrend,
    EpsRevisions,
    GrowthEstimates,
}

/// How a field is pulled out of its quoteSummary module
enum Extraction {
    /// The module object as-is
    Whole,
    /// A single JSON pointer below the module
    Pointer(&'static str),
    /// A subset of the module's keys
    Pick(&'static [&'static str]),
    /// One key from every entry of `earningsTrend.trend`, labelled by period
    Trend(&'static str),
}

impl FinancialField {
    /// All fields in report order
    pub const ALL: [FinancialField; 18] = [
        Self::Calendar,
        Self::SecFilings,
        Self::IncomeStatement,
        Self::QuarterlyIncomeStatement,
        Self::BalanceSheet,
        Self::QuarterlyBalanceSheet,
        Self::CashFlowStatement,
        Self::QuarterlyCashFlowStatement,
        Self::Recommendations,
        Self::RecommendationsSummary,
        Self::UpgradesDowngrades,
        Self::AnalystPriceTargets,
        Self::EarningsEstimate,
        Self::RevenueEstimate,
        Self::EarningsHistory,
        Self::EpsTrend,
        Self::EpsRevisions,
        Self::GrowthEstimates,
    ];

    /// Section heading used in the technical dataset
    pub fn label(self) -> &'static str {
        match self {
            Self::Calendar => "Calendar",
            Self::SecFilings => "SEC Filings",
            Self::IncomeStatement => "Income Statement",
            Self::QuarterlyIncomeStatement => "Quarterly Income Statement",
            Self::BalanceSheet => "Balance Sheet",
            Self::QuarterlyBalanceSheet => "Quarterly Balance Sheet",
            Self::CashFlowStatement => "Cash Flow Statement",
            Self::QuarterlyCashFlowStatement => "Quarterly Cash Flow Statement",
            Self::Recommendations => "Recommendations",
            Self::RecommendationsSummary => "Recommendations Summary",
            Self::UpgradesDowngrades => "Upgrades and Downgrades",
            Self::AnalystPriceTargets => "Analyst Price Targets",
            Self::EarningsEstimate => "Earnings Estimate",
            Self::RevenueEstimate => "Revenue Estimate",
            Self::EarningsHistory => "Earnings History",
            Self::EpsTrend => "EPS Trend",
            Self::EpsRevisions => "EPS Revisions",
            Self::GrowthEstimates => "Growth Estimates",
        }
    }

    /// quoteSummary module holding this field
    fn module(self) -> &'static str {
        match self {
            Self::Calendar => "calendarEvents",
            Self::SecFilings => "secFilings",
            Self::IncomeStatement => "incomeStatementHistory",
            Self::QuarterlyIncomeStatement => "incomeStatementHistoryQuarterly",
            Self::BalanceSheet => "balanceSheetHistory",
            Self::QuarterlyBalanceSheet => "balanceSheetHistoryQuarterly",
            Self::CashFlowStatement => "cashflowStatementHistory",
            Self::QuarterlyCashFlowStatement => "cashflowStatementHistoryQuarterly",
            Self::Recommendations => "recommendationTrend",
            Self::RecommendationsSummary | Self::AnalystPriceTargets => "financialData",
            Self::UpgradesDowngrades => "upgradeDowngradeHistory",
            Self::EarningsHistory => "earningsHistory",
            Self::EarningsEstimate
            | Self::RevenueEstimate
            | Self::EpsTrend
            | Self::EpsRevisions
            | Self::GrowthEstimates => "earningsTrend",
        }
    }

    fn extraction(self) -> Extraction {
        match self {
            Self::Calendar => Extraction::Whole,
            Self::SecFilings => Extraction::Pointer("/filings"),
            Self::IncomeStatement | Self::QuarterlyIncomeStatement => {
                Extraction::Pointer("/incomeStatementHistory")
            },
            Self::BalanceSheet | Self::QuarterlyBalanceSheet => {
                Extraction::Pointer("/balanceSheetStatements")
            },
            Self::CashFlowStatement | Self::QuarterlyCashFlowStatement => {
                Extraction::Pointer("/cashflowStatements")
            },
            Self::Recommendations => Extraction::Pointer("/trend"),
            Self::RecommendationsSummary => Extraction::Pick(&[
                "recommendationKey",
                "recommendationMean",
                "numberOfAnalystOpinions",
            ]),
            Self::UpgradesDowngrades | Self::EarningsHistory => Extraction::Pointer("/history"),
            Self::AnalystPriceTargets => Extraction::Pick(&[
                "currentPrice",
                "targetHighPrice",
                "targetLowPrice",
                "targetMeanPrice",
                "targetMedianPrice",
            ]),
            Self::EarningsEstimate => Extraction::Trend("earningsEstimate"),
            Self::RevenueEstimate => Extraction::Trend("revenueEstimate"),
            Self::EpsTrend => Extraction::Trend("epsTrend"),
            Self::EpsRevisions => Extraction::Trend("epsRevisions"),
            Self::GrowthEstimates => Extraction::Trend("growth"),
        }
    }

    /// Pull this field out of a quoteSummary result object
    fn extract(self, result: &Value) -> Option<Value> {
        let module = result.get(self.module())?;

        let value = match self.extraction() {
            Extraction::Whole => module.clone(),
            Extraction::Pointer(pointer) => module.pointer(pointer)?.clone(),
            Extraction::Pick(keys) => {
                let picked: Map<String, Value> = keys
                    .iter()
                    .filter_map(|k| module.get(*k).map(|v| ((*k).to_string(), v.clone())))
                    .collect();
                if picked.is_empty() {
                    return None;
                }
                Value::Object(picked)
            },
            Extraction::Trend(key) => {
                let rows: Vec<Value> = module
                    .get("trend")?
                    .as_array()?
                    .iter()
                    .filter_map(|row| {
                        let mut entry = Map::new();
                        entry.insert(
                            "period".to_string(),
                            row.get("period").cloned().unwrap_or(Value::Null),
                        );
                        entry.insert(key.to_string(), row.get(key)?.clone());
                        Some(Value::Object(entry))
                    })
                    .collect();
                if rows.is_empty() {
                    return None;
                }
                Value::Array(rows)
            },
        };

        (!value.is_null()).then_some(value)
    }
}

/// Comma-separated module list for the quoteSummary query, in field order without repeats
pub fn summary_modules() -> String {
    let mut modules: Vec<&str> = Vec::new();
    for field in FinancialField::ALL {
        if !modules.contains(&field.module()) {
            modules.push(field.module());
        }
    }
    modules.join(",")
}

/// Turn a quoteSummary response body into per-field values
///
/// Fields whose module is absent from the response are simply missing from the map.
pub fn parse_financials(body: &Value) -> Result<Financials> {
    if let Some(error) = body.pointer("/quoteSummary/error").filter(|e| !e.is_null()) {
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .map_or_else(|| error.to_string(), str::to_string);
        return Err(ReportError::YahooFinance(description));
    }

    let result = body
        .pointer("/quoteSummary/result/0")
        .ok_or_else(|| ReportError::MarketData("quoteSummary returned no result".to_string()))?;

    Ok(FinancialField::ALL
        .into_iter()
        .filter_map(|field| field.extract(result).map(|value| (field, value)))
        .collect())
}

/// Cookie and crumb pair that authorizes quoteSummary calls
#[derive(Debug, Clone)]
struct Session {
    cookie: String,
    crumb: String,
}

/// Yahoo Finance implementation of [`MarketDataProvider`]
///
/// quoteSummary only answers requests carrying a session cookie and the
/// matching crumb. Both are fetched on first use, cached, and fetched again
/// once if Yahoo rejects them.
pub struct YahooFinanceClient {
    http: Client,
    base_url: Url,
    cookie_url: String,
    crumb_url: String,
    user_agent: String,
    session: Mutex<Option<Session>>,
}

impl YahooFinanceClient {
    /// Create a client from the report configuration
    pub fn new(config: &ReportConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        let base_url = Url::parse(&config.yahoo_base_url).map_err(|e| {
            ReportError::Config(format!(
                "invalid yahoo_base_url '{}': {e}",
                config.yahoo_base_url
            ))
        })?;

        Ok(Self {
            http,
            base_url,
            cookie_url: config.yahoo_cookie_url.clone(),
            crumb_url: config.yahoo_crumb_url.clone(),
            user_agent: config.user_agent.clone(),
            session: Mutex::new(None),
        })
    }

    /// quoteSummary URL with the ticker as a single encoded path segment
    fn summary_url(&self, ticker: &str, crumb: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ReportError::Config(format!("yahoo_base_url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v10", "finance", "quoteSummary"])
            .push(ticker);
        url.query_pairs_mut()
            .append_pair("modules", &summary_modules())
            .append_pair("crumb", crumb);
        Ok(url)
    }

    /// The cached session, opening one if there is none
    async fn session(&self) -> Result<Session> {
        let mut cached = self.session.lock().await;
        if let Some(session) = cached.as_ref() {
            return Ok(session.clone());
        }

        let session = self.open_session().await?;
        *cached = Some(session.clone());
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn open_session(&self) -> Result<Session> {
        // The cookie page answers 404; only its set-cookie header matters
        let response = self
            .http
            .get(&self.cookie_url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .ok_or_else(|| ReportError::YahooFinance("no session cookie returned".to_string()))?
            .to_string();

        let response = self
            .http
            .get(&self.crumb_url)
            .header(USER_AGENT, &self.user_agent)
            .header(COOKIE, &cookie)
            .send()
            .await?;

        let status = response.status();
        let crumb = response.text().await?.trim().to_string();
        if !status.is_success() || crumb.is_empty() {
            return Err(ReportError::YahooFinance(format!(
                "crumb request failed with HTTP {status}"
            )));
        }

        debug!("Opened Yahoo session");
        Ok(Session { cookie, crumb })
    }
}

/// Yahoo's answer to a missing, expired or mismatched crumb
fn session_rejected(status: StatusCode, body: &Value) -> bool {
    status == StatusCode::UNAUTHORIZED
        || body
            .pointer("/finance/error/description")
            .and_then(Value::as_str)
            .is_some_and(|description| description.contains("Invalid Crumb"))
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn news(&self, ticker: &str, count: usize) -> Result<Vec<NewsHeadline>> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| ReportError::YahooFinance(e.to_string()))?;

        let result = connector
            .search_ticker(ticker)
            .await
            .map_err(|e| ReportError::YahooFinance(e.to_string()))?;

        debug!("Yahoo returned {} news items", result.news.len());

        Ok(result
            .news
            .into_iter()
            .take(count)
            .map(|item| NewsHeadline {
                title: item.title,
                link: item.link,
                publisher: item.publisher,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn financials(&self, ticker: &str) -> Result<Financials> {
        let mut refreshed = false;

        loop {
            let session = self.session().await?;
            let response = self
                .http
                .get(self.summary_url(ticker, &session.crumb)?)
                .header(USER_AGENT, &self.user_agent)
                .header(COOKIE, &session.cookie)
                .send()
                .await?;

            let status = response.status();
            let text = response.text().await?;
            let body = match serde_json::from_str::<Value>(&text) {
                Ok(body) => body,
                Err(_) if !status.is_success() => Value::Null,
                Err(e) => return Err(e.into()),
            };

            if !refreshed && session_rejected(status, &body) {
                warn!("Yahoo rejected the session (HTTP {status}), opening a new one");
                *self.session.lock().await = None;
                refreshed = true;
                continue;
            }

            // Yahoo reports unknown tickers as a 404 with an error object in the body
            if !status.is_success() && body.pointer("/quoteSummary/error").is_none() {
                return Err(ReportError::MarketData(format!(
                    "quoteSummary returned HTTP {status}"
                )));
            }

            let financials = parse_financials(&body)?;
            debug!(
                "Parsed {} of {} financial fields",
                financials.len(),
                FinancialField::ALL.len()
            );
            return Ok(financials);
        }
    }
}
