use httpmock::prelude::*;
use serde_json::json;

use shambird::config::{ApiConfig, AppConfig, ScrapeConfig};
use shambird::core::engine::Engine;
use shambird::pipeline::reporter;

// Pins the clock for the whole test binary; keep every test in this file on
// the same fixed instant.
const FIXED_NOW: &str = "2020-01-10T00:00:00Z";

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        user_agent: "shambird-test".to_string(),
        cache_ttl_seconds: 0,
        max_posts: 100,
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
        },
        scrape: ScrapeConfig {
            command: "shambird-test-no-such-scraper".to_string(),
            profile_timeout_secs: 1,
            posts_timeout_secs: 1,
        },
        bearer: Some("test-token".to_string()),
    }
}

#[tokio::test]
async fn throwaway_account_end_to_end() {
    std::env::set_var("SHAMBIRD_FIXED_TIME", FIXED_NOW);

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users/by/username/burner123");
        then.status(200).json_body(json!({"data": {
            "id": "900",
            "username": "burner123",
            "name": "",
            "created_at": "2020-01-05T00:00:00.000Z",
            "description": "",
            "profile_image_url": "https://abs.example/default_profile_normal.png",
            "verified": false,
            "public_metrics": {"followers_count": 10, "following_count": 500, "tweet_count": 3}
        }}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/users/900/tweets");
        then.status(200).json_body(json!({"meta": {"result_count": 0}}));
    });

    let engine = Engine::new(test_config(&server.base_url())).unwrap();
    let analysis = engine.analyze("burner123", false).await.unwrap();

    assert_eq!(analysis.report.score, 95);
    assert_eq!(analysis.report.account_age_days, 5);
    assert_eq!(analysis.report.reasons.bad.len(), 4);
    assert!(analysis.report.reasons.good.is_empty());

    // no posts came back, so the post-history rules stayed silent
    let all_reasons = analysis.report.reasons.bad.join(" ");
    assert!(!all_reasons.contains("posts"));
    assert!(!all_reasons.contains("link"));

    assert_eq!(analysis.card.created_display, "January 05, 2020 (5 days ago)");
    assert_eq!(analysis.card.followers_display, "10");
    assert_eq!(analysis.card.source, "x-api");
    assert!(analysis.card.flags.iter().all(|f| !f.contains("**")));

    let markdown = reporter::render_markdown(&analysis.card);
    assert!(markdown.contains("# Fake Account Analysis: @burner123"));
    assert!(markdown.contains("- Fakeness Score: 95/100"));
    assert!(markdown.contains("- Data Source: x-api"));
}

#[tokio::test]
async fn established_account_end_to_end() {
    std::env::set_var("SHAMBIRD_FIXED_TIME", FIXED_NOW);

    let posts: Vec<serde_json::Value> = (0..20)
        .map(|i| {
            let text = if i == 0 {
                "read this https://example.com/article"
            } else {
                "an ordinary post"
            };
            json!({"id": i.to_string(), "text": text, "created_at": "2020-01-09T00:00:00.000Z"})
        })
        .collect();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users/by/username/oldhand");
        then.status(200).json_body(json!({"data": {
            "id": "42",
            "username": "oldhand",
            "name": "Old Hand",
            "created_at": "2017-04-15T12:00:00.000Z",
            "description": "30+ char biography text goes right here",
            "profile_image_url": "https://pbs.example/oldhand_normal.jpg",
            "verified": true,
            "public_metrics": {"followers_count": 10000, "following_count": 200, "tweet_count": 8000}
        }}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/users/42/tweets");
        then.status(200).json_body(json!({"data": posts}));
    });

    let engine = Engine::new(test_config(&server.base_url())).unwrap();
    let analysis = engine.analyze("oldhand", false).await.unwrap();

    // -25 from verification is the only delta; the floor clamps it to 0
    assert_eq!(analysis.report.score, 0);
    assert!(analysis.report.reasons.bad.is_empty());
    assert_eq!(analysis.report.reasons.good.len(), 6);

    assert_eq!(analysis.card.followers_display, "10,000");
    assert_eq!(analysis.card.tweet_count_display, "8,000");
    assert!(analysis.card.flags.is_empty());
    assert!(reporter::render_markdown(&analysis.card)
        .contains("No significant behavioral anomalies detected."));
}
