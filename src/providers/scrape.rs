use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;

use crate::core::handle::Handle;

/// User record from the scrape tool's newline-delimited JSON output. Field
/// names follow the tool's own schema; counts and flags stay raw for the
/// normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeUser {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub displayname: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "profileImageUrl")]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub verified: Value,
    #[serde(default)]
    pub protected: Value,
    #[serde(default, rename = "followersCount")]
    pub followers_count: Value,
    #[serde(default, rename = "friendsCount")]
    pub friends_count: Value,
    #[serde(default, rename = "statusesCount")]
    pub statuses_count: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeTweet {
    #[serde(default)]
    pub id: Value,
    #[serde(default, rename = "rawContent")]
    pub raw_content: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "sourceLabel")]
    pub source_label: Option<String>,
}

/// Credential-free fallback driving the `snscrape` CLI as a bounded
/// subprocess. A stalled or failing invocation never blocks the resolver:
/// each call is wrapped in an explicit timeout with kill-on-drop.
pub struct ScrapeClient {
    command: String,
    profile_timeout: Duration,
    posts_timeout: Duration,
}

impl ScrapeClient {
    pub fn new(command: impl Into<String>, profile_timeout: Duration, posts_timeout: Duration) -> Self {
        Self {
            command: command.into(),
            profile_timeout,
            posts_timeout,
        }
    }

    pub async fn fetch_profile(&self, handle: &Handle) -> Option<ScrapeUser> {
        let scope = format!("twitter-user {handle}");
        let stdout = self
            .run(&["--jsonl", "--max-results", "1", &scope], self.profile_timeout)
            .await?;
        let first = stdout.lines().find(|line| !line.trim().is_empty())?;
        match serde_json::from_str(first) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!("snscrape user record for @{handle} unparseable: {err}");
                None
            }
        }
    }

    pub async fn fetch_recent_posts(&self, handle: &Handle, limit: usize) -> Vec<ScrapeTweet> {
        let max = limit.to_string();
        let scope = format!("twitter-user {handle}");
        match self
            .run(&["--jsonl", "--max-results", &max, &scope], self.posts_timeout)
            .await
        {
            Some(stdout) => parse_tweet_lines(&stdout),
            None => Vec::new(),
        }
    }

    async fn run(&self, args: &[&str], limit: Duration) -> Option<String> {
        let mut cmd = Command::new(&self.command);
        cmd.args(args).kill_on_drop(true);
        let output = match tokio::time::timeout(limit, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                tracing::warn!("could not spawn {}: {err}", self.command);
                return None;
            }
            Err(_) => {
                tracing::warn!("{} timed out after {:?}", self.command, limit);
                return None;
            }
        };
        if !output.status.success() {
            tracing::debug!("{} exited with {}", self.command, output.status);
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.trim().is_empty() {
            return None;
        }
        Some(stdout)
    }
}

/// One tweet per line; malformed lines are skipped individually rather than
/// failing the batch.
fn parse_tweet_lines(stdout: &str) -> Vec<ScrapeTweet> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(tweet) => Some(tweet),
            Err(err) => {
                tracing::debug!("skipping malformed scrape line: {err}");
                None
            }
        })
        .collect()
}
