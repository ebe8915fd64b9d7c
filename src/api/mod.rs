//
//  github-rest
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed access to the GitHub REST API (v3), from `api.github.com` or a
//! GitHub Enterprise Server at `https://<host>/api/v3`.
//!
//! ## Architecture
//!
//! - [`client`]: The request dispatcher, the single place that performs HTTP
//! - [`query`]: Whitelist-based query string assembly
//! - [`common`]: Error taxonomy, verbs, rate-limit headers, shared models
//! - [`github`]: Endpoint modules, thin callers of the dispatcher
//!
//! Data flows one way: an endpoint function assembles its URL with
//! [`query::assemble_query_params`] and its own whitelist, hands the URL to
//! [`GitHubClient::standard_request`], and returns the parsed body.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use github_rest::api::query::QueryParams;
//! use github_rest::api::GitHubClient;
//! use github_rest::config::Config;
//!
//! # async fn example() -> Result<(), github_rest::api::ApiError> {
//! let client = GitHubClient::new(Config {
//!     token: Some("ghp_example".to_string()),
//!     ..Config::default()
//! })?;
//!
//! let params = QueryParams::new().set("state", "open").set("per_page", 10);
//! let issues = client.list_repo_issues("rust-lang", "rust", Some(&params)).await?;
//! println!("{} open issues on the first page", issues.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure surfaces as an [`ApiError`]:
//!
//! - `UnsupportedVerb`: rejected before any request is sent
//! - `Transport`: no HTTP response
//! - `Http`: non-2xx response with status and provider message
//! - `Decode`: a success body did not match the expected type

/// Request dispatcher: verb validation, auth headers, error normalization
/// and request counting.
pub mod client;

/// Error types, verbs, rate-limit parsing and shared resource shapes.
pub mod common;

/// GitHub endpoint modules.
///
/// Each submodule adds methods to [`GitHubClient`]:
/// - [`github::repositories`], [`github::issues`], [`github::pulls`]
/// - [`github::releases`], [`github::teams`], [`github::collaborators`]
/// - [`github::commits`], [`github::contents`], [`github::events`]
pub mod github;

/// Query string assembly from a parameter bag and a whitelist.
pub mod query;

pub use client::{
    default_client, request_count, set_default_client, ExtendedResponse, GitHubClient, NO_BODY,
};
pub use common::{ApiError, RateLimit, Verb};
pub use query::{assemble_query_params, QueryParams};
