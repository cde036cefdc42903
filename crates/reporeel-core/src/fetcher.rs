// Repository fetch client: query building + page cache in front of the search API
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reporeel_api::SearchRequest;
use reporeel_cache::{Clock, TtlCache};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    models::{FetchParams, Repository},
    query::{build_search_query, created_after, DateJitter, RandomJitter, DEFAULT_MIN_STARS},
    Result,
};

/// Pages stay fresh this long
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const CACHE_MAX_ENTRIES: usize = 256;

/// Anything that can answer a repository search - the real API or a test double
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Repository>>;
}

type PageCache = TtlCache<String, Arc<Vec<Repository>>>;

/// Fetches feed pages, serving repeats from a short-lived cache
pub struct RepoFetcher {
    source: Arc<dyn RepoSource>,
    cache: Mutex<PageCache>,
    jitter: Box<dyn DateJitter>,
    min_stars: u32,
}

impl RepoFetcher {
    pub fn new(source: Arc<dyn RepoSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(TtlCache::new(CACHE_TTL, CACHE_MAX_ENTRIES)),
            jitter: Box::new(RandomJitter),
            min_stars: DEFAULT_MIN_STARS,
        }
    }

    /// Wire up cache size, TTL and star floor from config
    pub fn from_config(source: Arc<dyn RepoSource>, config: &Config) -> Self {
        Self::new(source)
            .with_cache(TtlCache::new(
                Duration::from_secs(config.cache.ttl_secs),
                config.cache.max_entries,
            ))
            .with_min_stars(config.feed.min_stars)
    }

    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = Mutex::new(cache);
        self
    }

    /// Default-sized cache driven by `clock`
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        self.with_cache(TtlCache::with_clock(CACHE_TTL, CACHE_MAX_ENTRIES, clock))
    }

    pub fn with_jitter(mut self, jitter: impl DateJitter + 'static) -> Self {
        self.jitter = Box::new(jitter);
        self
    }

    pub fn with_min_stars(mut self, min_stars: u32) -> Self {
        self.min_stars = min_stars;
        self
    }

    /// One page of repositories for `params`.
    ///
    /// A cache hit returns the very same `Arc` stored by the earlier call. Only
    /// successful responses are cached.
    pub async fn fetch(&self, params: &FetchParams) -> Result<Arc<Vec<Repository>>> {
        let key = params.cache_key();

        if let Some(cached) = self.cache.lock().await.get(&key) {
            debug!("Returning cached data for: {}", key);
            return Ok(cached);
        }

        let request = self.search_request(params);
        debug!("Cache miss for {}, querying: {}", key, request.query);

        let repos = match self.source.search(&request).await {
            Ok(repos) => Arc::new(repos),
            Err(e) => {
                warn!("Error fetching repositories: {}", e);
                return Err(e);
            }
        };

        info!("Fetched {} repositories for page {}", repos.len(), params.page);
        self.cache.lock().await.insert(key, Arc::clone(&repos));
        Ok(repos)
    }

    /// Drop expired pages; returns how many were removed
    pub async fn sweep_cache(&self) -> usize {
        self.cache.lock().await.sweep_expired()
    }

    fn search_request(&self, params: &FetchParams) -> SearchRequest {
        let since = created_after(Utc::now().date_naive(), self.jitter.days_back());

        SearchRequest {
            query: build_search_query(params, self.min_stars, Some(since)),
            sort: params.sort.as_str().to_string(),
            order: params.order.as_str().to_string(),
            page: params.page,
            per_page: params.per_page,
        }
    }
}
