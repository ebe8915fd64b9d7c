//
//  github-rest
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Formatting helpers shared by the CLI commands.
//!
//! ## Categories
//!
//! - **Time**: [`format_timestamp`], [`format_relative_time`], [`format_duration`]
//! - **Strings**: [`truncate`], [`parse_key_value`]
//! - **Sizes**: [`format_size`]
//!
//! ## Example
//!
//! ```rust
//! use github_rest::util::{format_size, parse_key_value, truncate};
//!
//! assert_eq!(format_size(1536), "1.5 KB");
//! assert_eq!(truncate("a very long title", 8), "a ver...");
//! assert_eq!(parse_key_value("state=open").unwrap(), ("state", "open"));
//! ```

use std::time::Duration;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

/// Renders a GitHub ISO 8601 timestamp relative to now.
///
/// Unparseable input is returned unchanged.
pub fn format_timestamp(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(time) => format_relative_time(time.with_timezone(&Utc), Utc::now()),
        Err(_) => iso.to_string(),
    }
}

/// "3 hours ago", "2 weeks ago" and so on.
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(then).num_seconds();
    if diff < 0 {
        return "in the future".to_string();
    }

    let plural = |n: i64, unit: &str| format!("{} {}{} ago", n, unit, if n == 1 { "" } else { "s" });

    match diff {
        0..=59 => "just now".to_string(),
        60..=3599 => plural(diff / 60, "minute"),
        3600..=86_399 => plural(diff / 3600, "hour"),
        86_400..=604_799 => plural(diff / 86_400, "day"),
        604_800..=2_591_999 => plural(diff / 604_800, "week"),
        2_592_000..=31_535_999 => plural(diff / 2_592_000, "month"),
        _ => plural(diff / 31_536_000, "year"),
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Splits `key=value`. The value may itself contain `=`.
pub fn parse_key_value(input: &str) -> Result<(&str, &str)> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("Expected key=value, got '{}'", input),
    }
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let at = |secs: i64| now - chrono::Duration::seconds(secs);

        assert_eq!(format_relative_time(at(5), now), "just now");
        assert_eq!(format_relative_time(at(60), now), "1 minute ago");
        assert_eq!(format_relative_time(at(7200), now), "2 hours ago");
        assert_eq!(format_relative_time(at(86_400 * 3), now), "3 days ago");
        assert_eq!(format_relative_time(at(-10), now), "in the future");
    }

    #[test]
    fn test_format_timestamp_passthrough() {
        assert_eq!(format_timestamp("yesterday-ish"), "yesterday-ish");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo wörld", 6), "hél...");
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("q=a=b").unwrap(), ("q", "a=b"));
        assert_eq!(parse_key_value("body=").unwrap(), ("body", ""));
        assert!(parse_key_value("=x").is_err());
        assert!(parse_key_value("novalue").is_err());
    }

    #[test]
    fn test_format_duration_and_size() {
        assert_eq!(format_duration(Duration::from_secs(725)), "12m 5s");
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
