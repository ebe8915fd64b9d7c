//
//  github-rest
//  api/common/rate_limit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Rate-limit headers attached to GitHub API responses.
//!
//! GitHub reports the caller's budget on every response:
//!
//! | Header | Meaning |
//! |--------|---------|
//! | `x-ratelimit-limit` | Requests allowed per window |
//! | `x-ratelimit-remaining` | Requests left in the current window |
//! | `x-ratelimit-reset` | Window reset time, Unix seconds (UTC) |
//!
//! The client only reads these values. It never waits for a reset.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::Serialize;

/// Header carrying the request budget of the current window.
pub const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";

/// Header carrying the requests left in the current window.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Header carrying the window reset time in Unix seconds.
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Parsed rate-limit headers of a single response.
///
/// Each field is `None` when its header is absent or unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimit {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Reads the rate-limit headers from a response header map.
    ///
    /// Returns `None` when none of the three headers is present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use github_rest::api::common::RateLimit;
    /// use reqwest::header::{HeaderMap, HeaderValue};
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("x-ratelimit-remaining", HeaderValue::from_static("12"));
    ///
    /// let rate = RateLimit::from_headers(&headers).unwrap();
    /// assert_eq!(rate.remaining, Some(12));
    /// assert_eq!(rate.limit, None);
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_u64(headers, RATE_LIMIT_LIMIT);
        let remaining = header_u64(headers, RATE_LIMIT_REMAINING);
        let reset = header_u64(headers, RATE_LIMIT_RESET)
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        if limit.is_none() && remaining.is_none() && reset.is_none() {
            return None;
        }

        Some(Self {
            limit,
            remaining,
            reset,
        })
    }

    /// Whether the window is used up.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_from_headers_full() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from_static("5000"));
        headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from_static("4987"));
        headers.insert(RATE_LIMIT_RESET, HeaderValue::from_static("1700000000"));

        let rate = RateLimit::from_headers(&headers).unwrap();
        assert_eq!(rate.limit, Some(5000));
        assert_eq!(rate.remaining, Some(4987));
        assert_eq!(
            rate.reset.unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
        assert!(!rate.is_exhausted());
    }

    #[test]
    fn test_from_headers_absent() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        assert!(RateLimit::from_headers(&headers).is_none());
    }

    #[test]
    fn test_from_headers_ignores_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from_static("0"));
        headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from_static("lots"));

        let rate = RateLimit::from_headers(&headers).unwrap();
        assert_eq!(rate.limit, None);
        assert!(rate.is_exhausted());
    }
}
