//! News article scraping

use crate::config::ReportConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Fetches the readable text of a news article
///
/// Never fails: problems are reported as diagnostic text in place of the content.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn article_text(&self, url: &str) -> String;
}

/// Plain HTTP implementation of [`ArticleSource`]
pub struct ArticleFetcher {
    client: Client,
    user_agent: String,
}

impl ArticleFetcher {
    /// Build a fetcher with the configured user agent and article timeout
    pub fn new(config: &ReportConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.article_timeout).build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait]
impl ArticleSource for ArticleFetcher {
    async fn article_text(&self, url: &str) -> String {
        debug!("Fetching article {url}");

        let response = match self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Article fetch failed for {url}: {e}");
                return format!("Error fetching content: {e}");
            },
        };

        let status = response.status();
        if status != StatusCode::OK {
            return format!(
                "Failed to retrieve content. Status code: {}",
                status.as_u16()
            );
        }

        match response.text().await {
            Ok(body) => paragraph_text(&body),
            Err(e) => format!("Error fetching content: {e}"),
        }
    }
}

/// Text of every `<p>` element in document order, joined by single spaces
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single GET with the given raw response
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            while !String::from_utf8_lossy(&raw).contains("\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/news/article")
    }

    fn fetcher() -> ArticleFetcher {
        ArticleFetcher::new(&ReportConfig::default()).unwrap()
    }

    #[test]
    fn test_paragraph_text_joins_in_order() {
        let html = r#"<html><body>
            <div><p>First <b>bold</b> line.</p></div>
            <span>not a paragraph</span>
            <p>Second line.</p>
        </body></html>"#;

        assert_eq!(paragraph_text(html), "First bold line. Second line.");
    }

    #[test]
    fn test_paragraph_text_without_paragraphs() {
        assert_eq!(paragraph_text("<html><body><div>x</div></body></html>"), "");
    }

    #[tokio::test]
    async fn test_not_found_becomes_diagnostic() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;

        let text = fetcher().article_text(&url).await;
        assert_eq!(text, "Failed to retrieve content. Status code: 404");
    }

    #[tokio::test]
    async fn test_ok_extracts_paragraphs() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 33\r\nConnection: close\r\n\r\n<html><p>One</p><p>Two</p></html>",
        )
        .await;

        let text = fetcher().article_text(&url).await;
        assert_eq!(text, "One Two");
    }

    #[tokio::test]
    async fn test_transport_error_becomes_diagnostic() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let text = fetcher().article_text(&format!("http://{addr}/")).await;
        assert!(text.starts_with("Error fetching content: "));
    }
}
