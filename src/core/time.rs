use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Current instant, overridable via `SHAMBIRD_FIXED_TIME` (RFC 3339) so
/// integration runs can be replayed deterministically.
pub fn now_utc() -> DateTime<Utc> {
    if let Ok(value) = std::env::var("SHAMBIRD_FIXED_TIME") {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return dt.with_timezone(&Utc);
        }
    }
    Utc::now()
}

/// Whole days between `now` and the account creation instant, with `now`
/// shifted into the creation timestamp's own offset. Never negative for a
/// sane profile; clock skew clamps to zero.
pub fn account_age_days(created_at: &DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
    let now_aligned = now.with_timezone(created_at.offset());
    now_aligned.signed_duration_since(*created_at).num_days().max(0)
}

/// Parses a provider timestamp into a timezone-aware instant.
///
/// Accepts RFC 3339 (both providers' native form), an offset-carrying
/// `YYYY-MM-DD HH:MM:SS+00:00`, and a bare naive datetime taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%z") {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive).fixed_offset());
    }
    None
}
