use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use super::fetcher::HeadlineSource;
use super::models::{fallback_headlines, Headline};

struct Cache {
    headlines: Vec<Headline>,
    fetched_at: Instant,
}

/// Cached access to a headline source.
///
/// Successful fetches are reused for `cache_ttl`. A failed fetch is logged
/// and answered with the built-in headlines; failures are never cached, so
/// the next call tries the network again.
pub struct NewsService {
    source: Arc<dyn HeadlineSource>,
    cache_ttl: Duration,
    cache: Mutex<Option<Cache>>,
}

impl NewsService {
    pub fn new(source: Arc<dyn HeadlineSource>, cache_ttl: Duration) -> Self {
        Self {
            source,
            cache_ttl,
            cache: Mutex::new(None),
        }
    }

    /// Current headlines, from cache when fresh
    pub async fn headlines(&self) -> Vec<Headline> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < self.cache_ttl {
                tracing::debug!("Serving {} cached headlines", cached.headlines.len());
                return cached.headlines.clone();
            }
        }
        self.fetch_into(&mut cache).await
    }

    /// Bypass the cache
    pub async fn force_refresh(&self) -> Vec<Headline> {
        let mut cache = self.cache.lock().await;
        self.fetch_into(&mut cache).await
    }

    async fn fetch_into(&self, cache: &mut Option<Cache>) -> Vec<Headline> {
        match self.source.fetch().await {
            Ok(headlines) if !headlines.is_empty() => {
                tracing::info!("Fetched {} headlines", headlines.len());
                *cache = Some(Cache {
                    headlines: headlines.clone(),
                    fetched_at: Instant::now(),
                });
                headlines
            }
            Ok(_) => {
                tracing::warn!("Feed returned no headlines, using fallback");
                fallback_headlines()
            }
            Err(e) => {
                tracing::error!("News fetch failed: {}", e);
                fallback_headlines()
            }
        }
    }
}
