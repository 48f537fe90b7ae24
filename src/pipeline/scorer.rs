use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::core::time::account_age_days;
use crate::core::types::{AccountProfile, Post, ReasonTrail, ScoreReport};

/// Marker the platform embeds in default (egg) avatar URLs.
const DEFAULT_AVATAR_MARKER: &str = "default_profile";

const SHORT_BIO_CHARS: usize = 10;
const MIN_RECENT_POSTS: usize = 10;

/// Deterministic rule evaluation over a canonical profile and its recent
/// posts. Pure: no I/O, no clock reads; `now` is injected by the caller.
///
/// Rules run in a fixed order and each lands exactly one line in the good or
/// bad trail. The post-history rules are skipped outright when there are no
/// posts to inspect; that is an insufficient-data policy, not a zero-risk
/// signal.
pub fn score(profile: &AccountProfile, posts: &[Post], now: DateTime<Utc>) -> ScoreReport {
    let mut reasons = ReasonTrail::default();
    let mut tally: i64 = 0;

    let followers = profile.followers_count;
    let following = profile.following_count;
    if followers < 50 && following > 300 {
        tally += 30;
        reasons.bad.push(format!(
            "**Suspicious follower ratio** ({followers} followers / {following} following): +30"
        ));
    } else {
        reasons
            .good
            .push("Account has a healthy follower/following ratio.".to_string());
    }

    let bio_chars = profile.bio.as_deref().map_or(0, |b| b.chars().count());
    if bio_chars > SHORT_BIO_CHARS {
        reasons.good.push("Profile has a descriptive bio.".to_string());
    } else {
        tally += 20;
        reasons
            .bad
            .push("**No significant bio** on the profile: +20".to_string());
    }

    let custom_avatar = profile
        .avatar_url
        .as_deref()
        .map_or(false, |url| !url.contains(DEFAULT_AVATAR_MARKER));
    if custom_avatar {
        reasons
            .good
            .push("Account has a custom profile picture.".to_string());
    } else {
        tally += 20;
        reasons
            .bad
            .push("**Default profile picture** still in use: +20".to_string());
    }

    if profile.verified {
        tally -= 25;
        reasons
            .good
            .push("Account is verified by the platform: -25".to_string());
    }

    let age_days = account_age_days(&profile.created_at, now);
    if age_days < 30 {
        tally += 25;
        reasons.bad.push(format!(
            "**Very new account** ({age_days} days old): +25"
        ));
    } else if age_days < 180 {
        tally += 15;
        reasons.bad.push(format!(
            "**Relatively new account** ({age_days} days old): +15"
        ));
    } else {
        reasons
            .good
            .push("Account is well-established and has existed for a long time.".to_string());
    }

    if !posts.is_empty() {
        if posts.len() < MIN_RECENT_POSTS {
            tally += 20;
            reasons.bad.push(format!(
                "**Very few recent posts** ({} found): +20",
                posts.len()
            ));
        }

        let link_posts = posts.iter().filter(|p| contains_link(&p.text)).count();
        let link_ratio = (link_posts as f64 / posts.len() as f64) * 100.0;
        if link_ratio > 50.0 {
            tally += 20;
            reasons.bad.push(format!(
                "**Very high link percentage** in recent posts ({link_ratio:.0}%): +20"
            ));
        } else if link_ratio > 20.0 {
            tally += 10;
            reasons.bad.push(format!(
                "**High link percentage** in recent posts ({link_ratio:.0}%): +10"
            ));
        } else {
            reasons
                .good
                .push("Low percentage of posts containing links.".to_string());
        }
    }

    ScoreReport {
        score: tally.clamp(0, 100) as u8,
        account_age_days: age_days,
        reasons,
    }
}

/// Substring match, not URL validation: `http://`, `https://`, or a bare
/// `www.` prefix anywhere in the text counts.
fn contains_link(text: &str) -> bool {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    let re = LINK_RE.get_or_init(|| Regex::new(r"(?i)https?://|www\.").expect("link regex"));
    re.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn profile_aged(days: i64) -> AccountProfile {
        AccountProfile {
            id: "1".into(),
            username: "tester".into(),
            display_name: "Tester".into(),
            bio: Some("a biography well over ten characters".into()),
            created_at: (fixed_now() - Duration::days(days)).fixed_offset(),
            location: None,
            avatar_url: Some("https://pbs.example/me/photo_normal.jpg".into()),
            verified: false,
            protected: false,
            followers_count: 1_000,
            following_count: 100,
            tweet_count: 500,
        }
    }

    fn post(text: &str) -> Post {
        Post {
            id: "p".into(),
            text: text.into(),
            created_at: None,
            source_label: String::new(),
        }
    }

    #[test]
    fn throwaway_profile_scores_95() {
        let mut profile = profile_aged(5);
        profile.followers_count = 10;
        profile.following_count = 500;
        profile.bio = Some(String::new());
        profile.avatar_url = Some("https://abs.example/default_profile_normal.png".into());
        let report = score(&profile, &[], fixed_now());
        assert_eq!(report.score, 95);
        assert_eq!(report.reasons.bad.len(), 4);
        assert!(report.reasons.good.is_empty());
    }

    #[test]
    fn established_verified_profile_floors_at_zero() {
        let mut profile = profile_aged(1_000);
        profile.followers_count = 10_000;
        profile.following_count = 200;
        profile.verified = true;
        let posts: Vec<Post> = (0..20)
            .map(|i| {
                if i == 0 {
                    post("read this https://example.com/article")
                } else {
                    post("an ordinary post")
                }
            })
            .collect();
        let report = score(&profile, &posts, fixed_now());
        assert_eq!(report.score, 0);
        // one good line per evaluated rule: ratio, bio, avatar, verified,
        // age, link ratio
        assert_eq!(report.reasons.good.len(), 6);
        assert!(report.reasons.bad.is_empty());
    }

    #[test]
    fn verified_always_contributes_minus_25() {
        let mut base = profile_aged(5);
        base.followers_count = 10;
        base.following_count = 500;
        base.bio = None;
        base.avatar_url = None;
        let unverified = score(&base, &[], fixed_now());
        base.verified = true;
        let verified = score(&base, &[], fixed_now());
        assert_eq!(unverified.score, 95);
        assert_eq!(verified.score, 70);
        assert!(verified
            .reasons
            .good
            .iter()
            .any(|r| r.contains("verified")));
    }

    #[test]
    fn empty_posts_suppress_post_rules() {
        let report = score(&profile_aged(1_000), &[], fixed_now());
        let all: Vec<&String> = report
            .reasons
            .good
            .iter()
            .chain(report.reasons.bad.iter())
            .collect();
        assert!(all.iter().all(|r| !r.contains("post")));
        assert!(all.iter().all(|r| !r.contains("link")));
        // only the four profile rules spoke: ratio, bio, avatar, age
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn link_ratio_tiers() {
        let posts_of = |links: usize, total: usize| -> Vec<Post> {
            (0..total)
                .map(|i| {
                    if i < links {
                        post("check www.example.com")
                    } else {
                        post("nothing to see")
                    }
                })
                .collect()
        };

        // 7 of 12 -> ~58% -> +20
        let report = score(&profile_aged(1_000), &posts_of(7, 12), fixed_now());
        assert!(report
            .reasons
            .bad
            .iter()
            .any(|r| r.contains("Very high link percentage")));
        assert_eq!(report.score, 20);

        // 5 of 12 -> ~42% -> +10
        let report = score(&profile_aged(1_000), &posts_of(5, 12), fixed_now());
        assert_eq!(report.score, 10);

        // 2 of 12 -> ~17% -> good
        let report = score(&profile_aged(1_000), &posts_of(2, 12), fixed_now());
        assert_eq!(report.score, 0);

        // exactly 50% stays in the +10 tier
        let report = score(&profile_aged(1_000), &posts_of(6, 12), fixed_now());
        assert_eq!(report.score, 10);
    }

    #[test]
    fn sparse_history_flags_post_count() {
        let posts: Vec<Post> = (0..3).map(|_| post("hello")).collect();
        let report = score(&profile_aged(1_000), &posts, fixed_now());
        assert!(report
            .reasons
            .bad
            .iter()
            .any(|r| r.contains("Very few recent posts")));
        assert_eq!(report.score, 20);
    }

    #[test]
    fn score_never_exceeds_100() {
        let mut profile = profile_aged(5);
        profile.followers_count = 0;
        profile.following_count = 5_000;
        profile.bio = None;
        profile.avatar_url = None;
        let posts: Vec<Post> = (0..5).map(|_| post("buy https://spam.example")).collect();
        let report = score(&profile, &posts, fixed_now());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn reason_trails_are_disjoint_and_rules_fire_once() {
        let posts: Vec<Post> = (0..12).map(|_| post("plain")).collect();
        let report = score(&profile_aged(90), &posts, fixed_now());
        for bad in &report.reasons.bad {
            assert!(!report.reasons.good.contains(bad));
        }
        // ratio, bio, avatar, age, post-count, link-ratio: one entry each
        assert_eq!(report.reasons.good.len() + report.reasons.bad.len(), 5);
    }

    #[test]
    fn link_detection_is_case_insensitive_substring() {
        assert!(contains_link("HTTPS://EXAMPLE.COM"));
        assert!(contains_link("go to www.example.com now"));
        assert!(contains_link("inline http://x.y link"));
        assert!(!contains_link("wwwords are not links"));
        assert!(!contains_link("no links here"));
    }

    #[test]
    fn age_counts_whole_days_in_creation_offset() {
        let mut profile = profile_aged(0);
        profile.created_at = DateTime::parse_from_rfc3339("2025-05-31T23:00:00+00:00").unwrap();
        let report = score(&profile, &[], fixed_now());
        assert_eq!(report.account_age_days, 0);
        assert!(report
            .reasons
            .bad
            .iter()
            .any(|r| r.contains("Very new account")));
    }
}
