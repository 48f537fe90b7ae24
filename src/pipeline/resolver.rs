use crate::core::handle::Handle;
use crate::core::types::{ResolvedAccount, Source};
use crate::pipeline::normalizer;
use crate::providers::{ApiClient, ScrapeClient};

/// Resolve an account through the providers in fixed priority order,
/// stopping at the first usable profile. Attempts are sequential: the
/// fallback exists to avoid the scrape cost when the API answers.
///
/// Returns `None` when both providers come up empty — the caller surfaces
/// that as not-found. Provider errors never reach this function; the
/// clients convert them to "no data" at their own boundary.
pub async fn resolve(
    api: &ApiClient,
    scraper: &ScrapeClient,
    handle: &Handle,
    max_posts: usize,
) -> Option<ResolvedAccount> {
    if let Some(user) = api.fetch_profile(handle).await {
        match normalizer::profile_from_api(&user) {
            Ok(profile) => {
                let tweets = api.fetch_recent_posts(&profile.id, max_posts).await;
                let mut posts = normalizer::posts_from_api(&tweets);
                posts.truncate(max_posts);
                tracing::info!("resolved @{handle} via {}", Source::Api);
                return Some(ResolvedAccount {
                    profile,
                    posts,
                    source: Source::Api,
                });
            }
            Err(err) => tracing::warn!("x-api payload for @{handle} rejected: {err}"),
        }
    }

    tracing::info!("primary source yielded no profile for @{handle}; trying scrape fallback");
    let user = scraper.fetch_profile(handle).await?;
    match normalizer::profile_from_scrape(&user) {
        Ok(profile) => {
            let tweets = scraper.fetch_recent_posts(handle, max_posts).await;
            let mut posts = normalizer::posts_from_scrape(&tweets);
            posts.truncate(max_posts);
            tracing::info!("resolved @{handle} via {}", Source::Scraper);
            Some(ResolvedAccount {
                profile,
                posts,
                source: Source::Scraper,
            })
        }
        Err(err) => {
            tracing::warn!("scrape payload for @{handle} rejected: {err}");
            None
        }
    }
}
