use serde_json::Value;

use crate::core::error::DetectError;
use crate::core::time::parse_timestamp;
use crate::core::types::{AccountProfile, Post};
use crate::providers::api::{ApiTweet, ApiUser};
use crate::providers::scrape::{ScrapeTweet, ScrapeUser};

/// Canonicalize a structured-API profile payload.
///
/// An absent or unparseable creation timestamp makes the whole payload
/// unusable: the caller treats it like a failed fetch and falls back.
pub fn profile_from_api(user: &ApiUser) -> Result<AccountProfile, DetectError> {
    let created_at = user
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .ok_or_else(|| {
            DetectError::Payload(format!("unusable created_at for @{}", user.username))
        })?;
    Ok(AccountProfile {
        id: user.id.clone(),
        username: user.username.clone(),
        display_name: user.name.clone(),
        bio: user.description.clone(),
        created_at,
        location: user.location.clone(),
        avatar_url: user.profile_image_url.clone(),
        verified: coerce_flag(&user.verified),
        protected: coerce_flag(&user.protected),
        followers_count: coerce_count(&user.public_metrics.followers_count),
        following_count: coerce_count(&user.public_metrics.following_count),
        tweet_count: coerce_count(&user.public_metrics.tweet_count),
    })
}

pub fn posts_from_api(tweets: &[ApiTweet]) -> Vec<Post> {
    tweets
        .iter()
        .map(|t| Post {
            id: t.id.clone(),
            text: t.text.clone(),
            created_at: t.created_at.as_deref().and_then(parse_timestamp),
            source_label: t.source.clone().unwrap_or_default(),
        })
        .collect()
}

/// Canonicalize a scrape-tool user record. Same creation-timestamp rule as
/// the API path; a record without a usable id is rejected too.
pub fn profile_from_scrape(user: &ScrapeUser) -> Result<AccountProfile, DetectError> {
    let username = user.username.clone().unwrap_or_default();
    let id = coerce_id(&user.id);
    if id.is_empty() {
        return Err(DetectError::Payload(format!(
            "scrape record without id for @{username}"
        )));
    }
    let created_at = user
        .created
        .as_deref()
        .and_then(parse_timestamp)
        .ok_or_else(|| DetectError::Payload(format!("unusable created for @{username}")))?;
    Ok(AccountProfile {
        id,
        username,
        display_name: user.displayname.clone().unwrap_or_default(),
        bio: user.description.clone(),
        created_at,
        location: user.location.clone(),
        avatar_url: user.profile_image_url.clone(),
        verified: coerce_flag(&user.verified),
        protected: coerce_flag(&user.protected),
        followers_count: coerce_count(&user.followers_count),
        following_count: coerce_count(&user.friends_count),
        tweet_count: coerce_count(&user.statuses_count),
    })
}

pub fn posts_from_scrape(tweets: &[ScrapeTweet]) -> Vec<Post> {
    tweets
        .iter()
        .map(|t| Post {
            id: coerce_id(&t.id),
            text: t.raw_content.clone().unwrap_or_default(),
            created_at: t.date.as_deref().and_then(parse_timestamp),
            source_label: t.source_label.clone().unwrap_or_default(),
        })
        .collect()
}

/// Count fields arrive as numbers, numeric strings, or not at all; anything
/// unusable collapses to zero so the canonical schema stays total.
fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().map_or(false, |v| v != 0),
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
        _ => false,
    }
}

fn coerce_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
