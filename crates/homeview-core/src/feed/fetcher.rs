use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

use super::models::Headline;
use super::parser::parse_headlines;
use crate::config::NewsConfig;
use crate::{Error, Result};

const MAX_FEED_BYTES: usize = 2 * 1024 * 1024;
const MAX_RETRIES: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 500;

static USER_AGENT_INDEX: AtomicUsize = AtomicUsize::new(0);
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

fn next_user_agent() -> &'static str {
    let index = USER_AGENT_INDEX.fetch_add(1, Ordering::Relaxed) % USER_AGENTS.len();
    USER_AGENTS[index]
}

/// Where the news panel gets its headlines from
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Headline>>;
}

/// Headline source backed by an RSS/Atom feed over HTTP
pub struct RssHeadlineSource {
    client: Client,
    url: Url,
    source_name: String,
    max_items: usize,
}

impl RssHeadlineSource {
    pub fn new(config: &NewsConfig) -> Result<Self> {
        let url = Url::parse(&config.feed_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            url,
            source_name: config.source_name.clone(),
            max_items: config.max_items,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn build_headers(user_agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/rss+xml,application/atom+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ja,en-US;q=0.8,en;q=0.7"));
        if let Ok(ua) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers
    }

    /// GET with exponential backoff on transport errors and 429/503
    async fn fetch_with_retry(&self) -> Result<Bytes> {
        let mut last_error = None;
        let mut delay_ms = INITIAL_RETRY_DELAY_MS;

        for attempt in 0..MAX_RETRIES {
            let headers = Self::build_headers(next_user_agent());
            tracing::debug!("Fetch attempt {} for {}", attempt + 1, self.url);

            match self.client.get(self.url.clone()).headers(headers).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS
                        || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
                    {
                        tracing::warn!("Received {} for {}, retrying after {}ms", status, self.url, delay_ms);
                        last_error = Some(Error::FeedParse(format!("HTTP {} for URL: {}", status, self.url)));
                    } else if !status.is_success() {
                        return Err(Error::FeedParse(format!("HTTP {} for URL: {}", status, self.url)));
                    } else {
                        return Ok(response.bytes().await?);
                    }
                }
                Err(e) => {
                    tracing::warn!("Request failed for {} (attempt {}): {}", self.url, attempt + 1, e);
                    last_error = Some(Error::Http(e));
                }
            }

            if attempt < MAX_RETRIES - 1 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                delay_ms *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::FeedParse(format!("Failed to fetch URL after {} retries: {}", MAX_RETRIES, self.url))
        }))
    }
}

#[async_trait]
impl HeadlineSource for RssHeadlineSource {
    async fn fetch(&self) -> Result<Vec<Headline>> {
        tracing::info!("Fetching news from: {}", self.url);
        let content = self.fetch_with_retry().await?;
        ensure_content_size(content.len(), self.url.as_str())?;
        parse_headlines(&content, &self.source_name, self.max_items)
    }
}

fn ensure_content_size(size: usize, url: &str) -> Result<()> {
    if size > MAX_FEED_BYTES {
        return Err(Error::FeedParse(format!("Feed too large ({} bytes) for URL: {}", size, url)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_url() {
        let config = NewsConfig {
            feed_url: "not a url".to_string(),
            ..NewsConfig::default()
        };
        assert!(matches!(RssHeadlineSource::new(&config), Err(Error::UrlParse(_))));
    }

    #[test]
    fn test_default_feed_url_parses() {
        let source = RssHeadlineSource::new(&NewsConfig::default()).unwrap();
        assert_eq!(source.url().host_str(), Some("news.google.com"));
    }

    #[test]
    fn test_content_size_limit() {
        assert!(ensure_content_size(MAX_FEED_BYTES, "u").is_ok());
        assert!(ensure_content_size(MAX_FEED_BYTES + 1, "u").is_err());
    }

    #[test]
    fn test_user_agent_rotation() {
        let first = next_user_agent();
        let second = next_user_agent();
        assert_ne!(first, second);
    }
}
