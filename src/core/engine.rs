use std::time::Duration;

use crate::config::AppConfig;
use crate::core::cache::ResolveCache;
use crate::core::error::DetectError;
use crate::core::handle::Handle;
use crate::core::time::now_utc;
use crate::core::types::{ReportCard, ResolvedAccount, ScoreReport};
use crate::pipeline::{reporter, resolver, scorer};
use crate::providers::{ApiClient, ScrapeClient};

/// Everything one analysis run produces: the resolved raw material, the
/// scored rationale, and the render-ready card.
#[derive(Debug)]
pub struct Analysis {
    pub resolved: ResolvedAccount,
    pub report: ScoreReport,
    pub card: ReportCard,
}

pub struct Engine {
    api: ApiClient,
    scraper: ScrapeClient,
    cache: ResolveCache,
    pub config: AppConfig,
}

impl Engine {
    pub fn new(config: AppConfig) -> Result<Self, DetectError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(DetectError::from)?;
        let api = ApiClient::new(client, config.api.base_url.clone(), config.bearer.clone());
        let scraper = ScrapeClient::new(
            config.scrape.command.clone(),
            Duration::from_secs(config.scrape.profile_timeout_secs),
            Duration::from_secs(config.scrape.posts_timeout_secs),
        );
        let cache = ResolveCache::new(Duration::from_secs(config.cache_ttl_seconds));
        Ok(Self {
            api,
            scraper,
            cache,
            config,
        })
    }

    /// Full pipeline for one handle: validate, resolve (memoized), score,
    /// assemble. `Err(InvalidHandle)` before any provider call;
    /// `Err(NotFound)` when both providers come up empty.
    pub async fn analyze(
        &self,
        raw_handle: &str,
        use_cache: bool,
    ) -> Result<Analysis, DetectError> {
        let handle = Handle::parse(raw_handle)?;

        let cached = use_cache
            .then(|| self.cache.get(handle.as_str()))
            .flatten();
        let resolved = match cached {
            Some(hit) => {
                tracing::debug!("cache hit for @{handle}");
                hit
            }
            None => {
                let resolved =
                    resolver::resolve(&self.api, &self.scraper, &handle, self.config.max_posts)
                        .await
                        .ok_or_else(|| DetectError::NotFound(handle.as_str().to_string()))?;
                if use_cache {
                    self.cache.put(handle.as_str(), &resolved);
                }
                resolved
            }
        };

        let report = scorer::score(&resolved.profile, &resolved.posts, now_utc());
        let card = reporter::assemble(&resolved, &report);
        Ok(Analysis {
            resolved,
            report,
            card,
        })
    }
}
