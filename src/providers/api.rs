use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::core::error::DetectError;
use crate::core::handle::Handle;

const USER_FIELDS: &str =
    "created_at,description,id,location,name,profile_image_url,protected,public_metrics,url,username,verified";
const TWEET_FIELDS: &str = "created_at,public_metrics,source";

/// Profile payload as the structured API ships it, counts left as raw JSON
/// values for the normalizer to coerce.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub verified: Value,
    #[serde(default)]
    pub protected: Value,
    #[serde(default)]
    pub public_metrics: ApiMetrics,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMetrics {
    #[serde(default)]
    pub followers_count: Value,
    #[serde(default)]
    pub following_count: Value,
    #[serde(default)]
    pub tweet_count: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    data: Option<ApiUser>,
}

#[derive(Deserialize)]
struct TweetsEnvelope {
    #[serde(default)]
    data: Vec<ApiTweet>,
}

/// Credentialed client for the versioned profile-lookup and tweets-by-user
/// endpoints. An absent bearer token behaves exactly like a failed fetch.
pub struct ApiClient {
    client: Client,
    base_url: String,
    bearer: Option<String>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: impl Into<String>, bearer: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            bearer,
        }
    }

    pub async fn fetch_profile(&self, handle: &Handle) -> Option<ApiUser> {
        let Some(token) = self.bearer.as_deref() else {
            tracing::debug!("no bearer token configured; skipping x-api");
            return None;
        };
        match self.try_fetch_profile(token, handle).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!("x-api profile fetch for @{handle} failed: {err}");
                None
            }
        }
    }

    pub async fn fetch_recent_posts(&self, user_id: &str, limit: usize) -> Vec<ApiTweet> {
        let Some(token) = self.bearer.as_deref() else {
            return Vec::new();
        };
        match self.try_fetch_posts(token, user_id, limit).await {
            Ok(tweets) => tweets,
            Err(err) => {
                tracing::warn!("x-api tweets fetch for user {user_id} failed: {err}");
                Vec::new()
            }
        }
    }

    async fn try_fetch_profile(
        &self,
        token: &str,
        handle: &Handle,
    ) -> Result<Option<ApiUser>, DetectError> {
        let url = format!(
            "{}/users/by/username/{}?user.fields={}",
            self.base_url, handle, USER_FIELDS
        );
        let resp = self.client.get(url).bearer_auth(token).send().await?;
        if resp.status() != StatusCode::OK {
            tracing::debug!("x-api returned {} for @{handle}", resp.status());
            return Ok(None);
        }
        let envelope: UserEnvelope = resp
            .json()
            .await
            .map_err(|e| DetectError::Payload(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn try_fetch_posts(
        &self,
        token: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ApiTweet>, DetectError> {
        let url = format!(
            "{}/users/{}/tweets?max_results={}&tweet.fields={}",
            self.base_url, user_id, limit, TWEET_FIELDS
        );
        let resp = self.client.get(url).bearer_auth(token).send().await?;
        if resp.status() != StatusCode::OK {
            tracing::debug!("x-api returned {} for tweets of {user_id}", resp.status());
            return Ok(Vec::new());
        }
        let envelope: TweetsEnvelope = resp
            .json()
            .await
            .map_err(|e| DetectError::Payload(e.to_string()))?;
        Ok(envelope.data)
    }
}
