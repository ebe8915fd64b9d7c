//
//  github-rest
//  api/github/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! GitHub REST API v3 endpoint modules.
//!
//! Each submodule adds methods to [`GitHubClient`](crate::api::GitHubClient)
//! and carries the serde models for the resources it returns. An endpoint
//! method does three things only:
//!
//! 1. Builds its path from owner, repo and resource identifiers
//! 2. Assembles the query string from the caller's [`QueryParams`] using the
//!    endpoint's own whitelist
//! 3. Makes exactly one dispatcher call and returns the parsed body
//!
//! No endpoint follows `Link` headers. Callers pass `page` and `per_page`
//! themselves.
//!
//! # Module Organization
//!
//! - [`repositories`] - Repositories, branches, tags, languages, contributors
//! - [`issues`] - Issues, comments and labels
//! - [`pulls`] - Pull requests, reviews and merges
//! - [`releases`] - Releases and release assets
//! - [`teams`] - Organization teams and their repositories
//! - [`collaborators`] - Repository collaborators and permissions
//! - [`commits`] - Commits, comparisons and combined statuses
//! - [`contents`] - File contents and READMEs
//! - [`events`] - Activity event streams
//!
//! # Example
//!
//! ```rust,no_run
//! use github_rest::api::query::QueryParams;
//! use github_rest::api::GitHubClient;
//! use github_rest::config::Config;
//!
//! # async fn example() -> Result<(), github_rest::api::ApiError> {
//! let client = GitHubClient::new(Config::default())?;
//! let params = QueryParams::new().set("per_page", 5);
//! for release in client.list_releases("tokio-rs", "tokio", Some(&params)).await? {
//!     println!("{}", release.tag_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`QueryParams`]: crate::api::query::QueryParams

pub mod collaborators;
pub mod commits;
pub mod contents;
pub mod events;
pub mod issues;
pub mod pulls;
pub mod releases;
pub mod repositories;
pub mod teams;

pub use collaborators::*;
pub use commits::*;
pub use contents::*;
pub use events::*;
pub use issues::*;
pub use pulls::*;
pub use releases::*;
pub use repositories::*;
pub use teams::*;

/// Whitelist shared by every paginated listing.
pub const PAGINATION_PARAMS: &[&str] = &["per_page", "page"];

/// `/repos/{owner}/{repo}` followed by `suffix`.
pub(crate) fn repo_path(owner: &str, repo: &str, suffix: &str) -> String {
    format!(
        "/repos/{}/{}{}",
        urlencoding::encode(owner),
        urlencoding::encode(repo),
        suffix
    )
}

/// Percent-encodes one path segment (branch names, tags, slugs).
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Maps a `404` to `Ok(false)`, a success to `Ok(true)`.
///
/// GitHub answers yes/no checks with `204` or `404`.
pub(crate) fn found(result: Result<(), crate::api::ApiError>) -> Result<bool, crate::api::ApiError> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.is_not_found() => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::GitHubClient;
    use crate::config::Config;

    pub fn client(host: &str) -> GitHubClient {
        GitHubClient::new(Config {
            host: host.to_string(),
            token: Some("test-token".to_string()),
            owner: Some("octo".to_string()),
            repo: Some("hello".to_string()),
            ..Config::default()
        })
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_repo_path_encodes_segments() {
        assert_eq!(repo_path("octo", "hello", "/issues"), "/repos/octo/hello/issues");
        assert_eq!(repo_path("octo", "a b", ""), "/repos/octo/a%20b");
        assert_eq!(segment("feature/login"), "feature%2Flogin");
    }

    #[test]
    fn test_found_maps_not_found_only() {
        assert!(found(Ok(())).unwrap());

        let not_found = ApiError::Http {
            status: 404,
            message: "Not Found".to_string(),
            body: None,
            rate_limit: None,
        };
        assert!(!found(Err(not_found)).unwrap());

        let forbidden = ApiError::Http {
            status: 403,
            message: "Forbidden".to_string(),
            body: None,
            rate_limit: None,
        };
        assert!(found(Err(forbidden)).is_err());
    }
}
