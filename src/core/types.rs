use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Canonical, provider-independent account profile. Every field carries a
/// type-correct default so nothing downstream has to re-check the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    pub username: String,
    pub display_name: String,
    /// `None` means the provider had no bio field at all; an empty string
    /// means the account left it blank.
    pub bio: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub verified: bool,
    pub protected: bool,
    pub followers_count: u64,
    pub following_count: u64,
    pub tweet_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub text: String,
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub source_label: String,
}

/// Which provider satisfied an account lookup. Displayed in the report as
/// data provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Api,
    Scraper,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Api => f.write_str("x-api"),
            Source::Scraper => f.write_str("snscrape"),
        }
    }
}

/// A successful resolution: normalized profile, a bounded batch of recent
/// posts, and the source that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAccount {
    pub profile: AccountProfile,
    pub posts: Vec<Post>,
    pub source: Source,
}

/// Ordered good/bad rationale lists. A rule lands in exactly one of the two,
/// at most once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasonTrail {
    pub good: Vec<String>,
    pub bad: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Clamped to 0..=100.
    pub score: u8,
    pub account_age_days: i64,
    pub reasons: ReasonTrail,
}

/// Flat, render-ready structure handed to an external document renderer.
/// Counts arrive pre-formatted; reasons arrive with emphasis markup stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCard {
    pub username: String,
    pub display_name: String,
    pub score: u8,
    pub created_display: String,
    pub account_age_days: i64,
    pub followers_display: String,
    pub following_display: String,
    pub tweet_count_display: String,
    pub source: String,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Json,
    Markdown,
}
