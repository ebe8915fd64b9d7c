//
//  github-rest
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Host Resolution Module
//!
//! The configured `host` is the API base URL every endpoint path is appended
//! to. Users tend to type a web hostname instead, so this module maps between
//! the two forms.
//!
//! ## github.com vs GitHub Enterprise Server
//!
//! | Input | API base URL | Web host |
//! |-------|--------------|----------|
//! | `github.com` | `https://api.github.com` | `github.com` |
//! | `ghe.company.com` | `https://ghe.company.com/api/v3` | `ghe.company.com` |
//! | `https://ghe.company.com/api/v3/` | `https://ghe.company.com/api/v3` | `ghe.company.com` |
//!
//! ## Usage
//!
//! ```rust
//! use github_rest::config::{api_base_url, normalize_host, web_host};
//!
//! assert_eq!(api_base_url("github.com"), "https://api.github.com");
//! assert_eq!(api_base_url("GHE.Company.com"), "https://ghe.company.com/api/v3");
//! assert_eq!(normalize_host("https://GitHub.com/"), "github.com");
//! assert_eq!(web_host("https://api.github.com"), "github.com");
//! ```

/// The web hostname of github.com.
pub const GITHUB_WEB: &str = "github.com";

/// The API base URL of github.com.
pub const GITHUB_API: &str = "https://api.github.com";

/// Whether a bare hostname refers to github.com (web or API).
pub fn is_dotcom_host(host: &str) -> bool {
    let host = normalize_host(host);
    host == GITHUB_WEB || host == "api.github.com"
}

/// Reduces a host or URL to a bare, lower-case hostname.
///
/// Strips the scheme, any path and trailing slashes.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.strip_prefix("https://").unwrap_or(host);
    let host = host.strip_prefix("http://").unwrap_or(host);
    let host = host.split('/').next().unwrap_or(host);
    host.to_lowercase()
}

/// Turns user input into an API base URL.
///
/// Full URLs are kept as given (minus a trailing slash) so that scheme, port
/// and path choices survive; bare hostnames are expanded.
pub fn api_base_url(host: &str) -> String {
    let trimmed = host.trim().trim_end_matches('/');

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }

    if is_dotcom_host(trimmed) {
        GITHUB_API.to_string()
    } else {
        format!("https://{}/api/v3", normalize_host(trimmed))
    }
}

/// The web hostname that serves an API base URL.
///
/// Used to key stored credentials and to build browser links.
pub fn web_host(api_base: &str) -> String {
    let host = normalize_host(api_base);
    if host == "api.github.com" {
        GITHUB_WEB.to_string()
    } else {
        host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url() {
        assert_eq!(api_base_url("github.com"), GITHUB_API);
        assert_eq!(api_base_url("api.github.com"), GITHUB_API);
        assert_eq!(api_base_url(" https://api.github.com/ "), GITHUB_API);
        assert_eq!(api_base_url("ghe.corp.io"), "https://ghe.corp.io/api/v3");
        assert_eq!(api_base_url("http://127.0.0.1:8080"), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("https://GHE.corp.io/api/v3"), "ghe.corp.io");
        assert_eq!(normalize_host("github.com/"), "github.com");
    }

    #[test]
    fn test_web_host() {
        assert_eq!(web_host(GITHUB_API), "github.com");
        assert_eq!(web_host("https://ghe.corp.io/api/v3"), "ghe.corp.io");
        assert!(is_dotcom_host("https://api.github.com"));
        assert!(!is_dotcom_host("ghe.corp.io"));
    }
}
