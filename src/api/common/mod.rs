//
//  github-rest
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the GitHub REST client
//!
//! This module provides the types shared by the request dispatcher and every
//! endpoint module: the error taxonomy, the closed set of HTTP verbs the
//! dispatcher accepts, rate-limit header parsing and a handful of resource
//! shapes that appear across many endpoints.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Verb`] - Parsed, case-insensitive HTTP verb
//! - [`RateLimit`] - Values of the `x-ratelimit-*` response headers
//! - [`SimpleUser`], [`Label`], [`Milestone`] - Shared resource shapes
//!
//! # Example
//!
//! ```rust
//! use github_rest::api::common::{ApiError, Verb};
//!
//! assert_eq!(" Patch ".parse::<Verb>().unwrap(), Verb::Patch);
//!
//! match "options".parse::<Verb>() {
//!     Err(ApiError::UnsupportedVerb(verb)) => assert_eq!(verb, "options"),
//!     _ => unreachable!(),
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use thiserror::Error;

mod models;
mod rate_limit;

pub use models::*;
pub use rate_limit::*;

/// Unified error type for all GitHub API operations.
///
/// Every failure of the request dispatcher is reported through this type;
/// nothing is retried and nothing is swallowed.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `UnsupportedVerb` | Verb outside GET/POST/PATCH/PUT/DELETE, no request sent | N/A |
/// | `Transport` | DNS, connection, TLS or timeout failure | N/A |
/// | `Http` | A response arrived with a non-success status | 4xx/5xx |
/// | `Decode` | A success body did not match the expected type | 2xx |
/// | `InvalidUrl` | The configured host or request URL does not parse | N/A |
/// | `MissingRepository` | A default-repository call without `owner`/`repo` | N/A |
/// | `Client` | The HTTP client could not be built | N/A |
///
/// # Notes
///
/// - Rate-limit responses (403/429) are plain `Http` errors. Use
///   [`ApiError::is_rate_limited`] to recognise them.
/// - The `Transport` variant converts from `reqwest::Error` and the `Decode`
///   variant from `serde_json::Error`, so `?` works inside the dispatcher.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The caller passed a verb outside the supported set.
    ///
    /// Raised before any network I/O and before the request counter moves.
    #[error("Unsupported HTTP verb: {0}")]
    UnsupportedVerb(String),

    /// A network-level failure with no HTTP response.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `message` is the provider's `message` field when the body is JSON,
    /// otherwise the raw body, otherwise the canonical reason phrase.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code of the response.
        status: u16,
        /// Human readable error description.
        message: String,
        /// The parsed JSON error body, when the body was JSON.
        body: Option<serde_json::Value>,
        /// Rate-limit headers that accompanied the error response.
        rate_limit: Option<RateLimit>,
    },

    /// A success response body could not be deserialized.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A URL (configured host or request URL) is not valid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A call scoped to the default repository ran without one configured.
    #[error("No default repository configured (set both owner and repo)")]
    MissingRepository,

    /// The underlying HTTP client could not be constructed.
    #[error("Client error: {0}")]
    Client(String),
}

impl ApiError {
    /// Returns the HTTP status when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the error description without the status prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` for a `404 Not Found` response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` when the provider refused the call because the
    /// rate limit is exhausted.
    ///
    /// Any 429 counts, with or without rate-limit headers. A 403 counts
    /// only when it carries `x-ratelimit-remaining: 0`.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Http { status: 429, .. } => true,
            Self::Http {
                status: 403,
                rate_limit: Some(limit),
                ..
            } => limit.is_exhausted(),
            _ => false,
        }
    }
}

/// The HTTP verbs the dispatcher accepts.
///
/// Parsing trims surrounding whitespace and ignores case, so `"PATCH"`,
/// `"patch"` and `" Patch "` are the same verb. Anything else is rejected
/// with [`ApiError::UnsupportedVerb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Verb {
    /// Parses a verb string.
    pub fn parse(verb: &str) -> Result<Self, ApiError> {
        match verb.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "patch" => Ok(Self::Patch),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            _ => Err(ApiError::UnsupportedVerb(verb.to_string())),
        }
    }

    /// Upper-case wire name of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether a request body is serialized for this verb.
    ///
    /// `GET` and `DELETE` requests never carry a payload.
    pub fn carries_body(&self) -> bool {
        matches!(self, Self::Post | Self::Patch | Self::Put)
    }

    pub fn method(&self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Patch => Method::PATCH,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

impl FromStr for Verb {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_parse_is_case_insensitive() {
        assert_eq!(Verb::parse("PATCH").unwrap(), Verb::Patch);
        assert_eq!(Verb::parse("patch").unwrap(), Verb::Patch);
        assert_eq!(Verb::parse("  Delete\n").unwrap(), Verb::Delete);
        assert_eq!("get".parse::<Verb>().unwrap(), Verb::Get);
    }

    #[test]
    fn test_verb_parse_rejects_unknown() {
        for verb in ["options", "HEAD", "", "getx"] {
            match Verb::parse(verb) {
                Err(ApiError::UnsupportedVerb(v)) => assert_eq!(v, verb),
                other => panic!("expected UnsupportedVerb, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_verb_body_rules() {
        assert!(Verb::Post.carries_body());
        assert!(Verb::Patch.carries_body());
        assert!(Verb::Put.carries_body());
        assert!(!Verb::Get.carries_body());
        assert!(!Verb::Delete.carries_body());
        assert_eq!(Verb::Put.method(), Method::PUT);
        assert_eq!(Verb::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_error_accessors() {
        let err = ApiError::Http {
            status: 404,
            message: "Not Found".to_string(),
            body: None,
            rate_limit: None,
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.message(), "Not Found");
        assert!(err.is_not_found());
        assert!(!err.is_rate_limited());
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_rate_limited_detection() {
        let exhausted = RateLimit {
            limit: Some(60),
            remaining: Some(0),
            reset: None,
        };
        let forbidden = ApiError::Http {
            status: 403,
            message: "API rate limit exceeded".to_string(),
            body: None,
            rate_limit: Some(exhausted),
        };
        assert!(forbidden.is_rate_limited());

        let plain_forbidden = ApiError::Http {
            status: 403,
            message: "Must have admin rights".to_string(),
            body: None,
            rate_limit: Some(RateLimit {
                remaining: Some(4999),
                ..exhausted
            }),
        };
        assert!(!plain_forbidden.is_rate_limited());

        let secondary = ApiError::Http {
            status: 429,
            message: "You have exceeded a secondary rate limit".to_string(),
            body: None,
            rate_limit: None,
        };
        assert!(secondary.is_rate_limited());

        let forbidden_without_headers = ApiError::Http {
            status: 403,
            message: "Resource not accessible".to_string(),
            body: None,
            rate_limit: None,
        };
        assert!(!forbidden_without_headers.is_rate_limited());
    }
}
