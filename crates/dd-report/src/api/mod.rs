//! Clients for the external data sources

pub mod articles;
pub mod yahoo;

pub use articles::{ArticleFetcher, ArticleSource, paragraph_text};
pub use yahoo::{
    FinancialField, Financials, MarketDataProvider, NewsHeadline, YahooFinanceClient,
};

#[cfg(test)]
pub use yahoo::MockMarketDataProvider;
