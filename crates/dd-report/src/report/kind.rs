//! Report kinds: which persona, instruction, template and sections a report uses

use serde::{Deserialize, Serialize};

/// Keys of a merged report, in order
pub const MERGED_SECTION_KEYS: [&str; 9] = [
    "Executive Summary",
    "Company Overview",
    "Financial Analysis",
    "Technical Price Analysis",
    "Market Sentiment",
    "Volume and Liquidity Analysis",
    "Risk Assessment",
    "Valuation",
    "Recommendations",
];

/// Which stage of the pipeline a report belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportRole {
    Business,
    Technical,
    Merged,
}

impl ReportRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Technical => "technical",
            Self::Merged => "merged",
        }
    }
}

/// Output structure requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTemplate {
    /// Numbered plain-text sections
    Text,
    /// A standalone HTML document with inline style
    Html,
    /// A single JSON object keyed by section heading
    Json,
}

impl ReportTemplate {
    /// Registry name of the output template
    pub fn template_name(self) -> &'static str {
        match self {
            Self::Text => "report.format.text",
            Self::Html => "report.format.html",
            Self::Json => "report.format.json",
        }
    }

    /// File extension for a saved report body
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

/// A required report section and what it should cover
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: &'static str,
    pub guidance: &'static str,
}

const fn section(heading: &'static str, guidance: &'static str) -> Section {
    Section { heading, guidance }
}

/// Everything that distinguishes one report from another
///
/// The business, technical and merged reports all run through the same
/// prompt-building and generation path; only this description changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportKind {
    pub role: ReportRole,
    pub template: ReportTemplate,
    /// Heading text placed before the ticker, e.g. "Due Diligence Report on"
    pub title: &'static str,
    pub sections: Vec<Section>,
}

impl ReportKind {
    /// News-driven fundamental report, plain text by default
    pub fn business() -> Self {
        Self {
            role: ReportRole::Business,
            template: ReportTemplate::Text,
            title: "Due Diligence Report on",
            sections: vec![
                section(
                    "Executive Summary",
                    "Provide a high-level overview of the key findings, including potential risks and opportunities.",
                ),
                section(
                    "Company Overview",
                    "Summarize the company's business model, industry positioning, and key products or services.",
                ),
                section(
                    "Financial Analysis",
                    "Analyze recent financial statements and key financial ratios (e.g., P/E ratio, revenue growth, profit margins, etc.). Highlight any trends or concerns.",
                ),
                section(
                    "Market and Industry Analysis",
                    "Assess the market conditions, industry trends, and competitive landscape. Discuss how these factors might impact the company's performance.",
                ),
                section(
                    "News and Events",
                    "Evaluate the recent news articles provided, identifying significant events or announcements that could affect the company's stock price.",
                ),
                section(
                    "Risk Assessment",
                    "Identify potential risks, including financial, operational, regulatory, and market risks.",
                ),
                section(
                    "Valuation",
                    "Offer an estimate of the stock's intrinsic value using relevant valuation methods (e.g., discounted cash flow analysis, comparable company analysis).",
                ),
                section(
                    "Recommendations",
                    "Provide a clear recommendation (e.g., buy, hold, sell) based on your analysis, including a rationale for your decision.",
                ),
            ],
        }
    }

    /// Financial-data-driven market report, HTML by default
    pub fn technical() -> Self {
        Self {
            role: ReportRole::Technical,
            template: ReportTemplate::Html,
            title: "Technical Analysis Report on",
            sections: vec![
                section(
                    "Executive Summary",
                    "Provide a high-level overview of the key findings, including potential price trends and trading signals.",
                ),
                section(
                    "Stock Overview",
                    "Summarize the company's stock performance, including its historical price movements, trading volume, and volatility.",
                ),
                section(
                    "Price Pattern Analysis",
                    "Examine recent price patterns using technical indicators such as moving averages, support and resistance levels, and trend lines. Highlight any notable patterns.",
                ),
                section(
                    "Technical Indicators",
                    "Analyze key technical indicators (e.g., RSI, MACD, Bollinger Bands) and what they suggest about the stock's momentum, strength, and potential reversals.",
                ),
                section(
                    "Market Sentiment",
                    "Assess the overall market sentiment and its impact on the stock. Consider sentiment analysis from recent news articles and social media trends.",
                ),
                section(
                    "Volume and Liquidity Analysis",
                    "Evaluate the trading volume and liquidity of the stock to understand the ease of buying and selling, and potential for price manipulation.",
                ),
                section(
                    "Risk and Volatility Assessment",
                    "Identify the volatility of the stock and potential risks associated with trading it. Use statistical measures such as beta and standard deviation.",
                ),
                section(
                    "Recommendations",
                    "Provide a clear trading recommendation (e.g., buy, hold, sell) based on your technical analysis, including specific entry and exit points and a rationale for your decision.",
                ),
            ],
        }
    }

    /// Combination of a business and a technical report, always JSON
    pub fn merged() -> Self {
        Self {
            role: ReportRole::Merged,
            template: ReportTemplate::Json,
            title: "Comprehensive Due Diligence Report on",
            sections: vec![
                section(
                    MERGED_SECTION_KEYS[0],
                    "A high-level overview of the combined business and technical findings, including the main risks and opportunities.",
                ),
                section(
                    MERGED_SECTION_KEYS[1],
                    "The company's business model, industry positioning, competitive landscape, and key products or services.",
                ),
                section(
                    MERGED_SECTION_KEYS[2],
                    "Recent financial statements, key ratios, and the trends or concerns they reveal.",
                ),
                section(
                    MERGED_SECTION_KEYS[3],
                    "Price patterns, support and resistance levels, and what the technical indicators suggest about momentum.",
                ),
                section(
                    MERGED_SECTION_KEYS[4],
                    "Overall sentiment from news, analysts, and the market, and its likely effect on the stock.",
                ),
                section(
                    MERGED_SECTION_KEYS[5],
                    "Trading volume and liquidity, and what they mean for entering or exiting a position.",
                ),
                section(
                    MERGED_SECTION_KEYS[6],
                    "Financial, operational, regulatory, market, and volatility risks.",
                ),
                section(
                    MERGED_SECTION_KEYS[7],
                    "An estimate of intrinsic value using relevant methods such as discounted cash flow or comparable companies.",
                ),
                section(
                    MERGED_SECTION_KEYS[8],
                    "A clear buy, hold, or sell recommendation with entry and exit considerations and the rationale behind it.",
                ),
            ],
        }
    }

    /// The same report with a different output structure
    pub fn with_template(mut self, template: ReportTemplate) -> Self {
        self.template = template;
        self
    }

    /// Full report title for a ticker
    pub fn title_for(&self, ticker: &str) -> String {
        format!("{} {ticker}", self.title)
    }

    /// Registry name of this kind's system persona
    pub fn persona_name(&self) -> String {
        format!("report.system.{}", self.role.as_str())
    }

    /// Registry name of this kind's instruction
    pub fn instruction_name(&self) -> String {
        format!("report.instruction.{}", self.role.as_str())
    }

    /// Section headings in order
    pub fn headings(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.heading).collect()
    }
}
