use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::core::types::{OutputFormat, ReportCard, ResolvedAccount, ScoreReport};

/// Shape the scored analysis into the flat structure an external document
/// renderer consumes. Field selection and string formatting only; every
/// number was computed upstream.
pub fn assemble(resolved: &ResolvedAccount, report: &ScoreReport) -> ReportCard {
    let profile = &resolved.profile;
    ReportCard {
        username: profile.username.clone(),
        display_name: profile.display_name.clone(),
        score: report.score,
        created_display: format!(
            "{} ({} days ago)",
            profile.created_at.format("%B %d, %Y"),
            report.account_age_days
        ),
        account_age_days: report.account_age_days,
        followers_display: format_count(profile.followers_count),
        following_display: format_count(profile.following_count),
        tweet_count_display: format_count(profile.tweet_count),
        source: resolved.source.to_string(),
        flags: report.reasons.bad.iter().map(|r| strip_markup(r)).collect(),
    }
}

pub fn write_card(card: &ReportCard, format: OutputFormat, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    match format {
        OutputFormat::Json => fs::write(path, serde_json::to_string_pretty(card)?)?,
        OutputFormat::Markdown => fs::write(path, render_markdown(card))?,
    }
    Ok(())
}

pub fn render_markdown(card: &ReportCard) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Fake Account Analysis: @{}\n\n", card.username));
    out.push_str("## Summary\n");
    out.push_str(&format!("- Fakeness Score: {}/100\n", card.score));
    out.push_str(&format!("- Account Created: {}\n", card.created_display));
    out.push_str(&format!("- Followers: {}\n", card.followers_display));
    out.push_str(&format!("- Following: {}\n", card.following_display));
    out.push_str(&format!("- Total Posts: {}\n", card.tweet_count_display));
    out.push_str(&format!("- Data Source: {}\n\n", card.source));
    out.push_str("## Analysis Breakdown\n");
    if card.flags.is_empty() {
        out.push_str("- No significant behavioral anomalies detected.\n");
    } else {
        for flag in &card.flags {
            out.push_str(&format!("- {}\n", flag));
        }
    }
    out
}

fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn strip_markup(reason: &str) -> String {
    reason.replace("**", "")
}
